// Copyright (c) 2018 Fabian Schuiki

//! Terminals and the tokens they match.
//!
//! The parser treats terminals as opaque matchers: all it needs is the
//! [`Terminal`] trait, which decides whether a terminal accepts a given input
//! token. Two matchers are provided:
//!
//! - [`TokenMatcher`] matches tokens of a lexer, either by their literal text
//!   or by their category.
//! - [`CharSet`] matches single characters, for grammars that operate directly
//!   on the characters of the input.
//!
//! The grammar compiler creates terminals through a [`TerminalBuilder`], which
//! is implemented by the [`Categories`] and [`CharClasses`] registries.

use std::collections::BTreeSet;
use std::fmt;
use std::iter::FromIterator;
use std::ops::RangeInclusive;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// A terminal that can be matched against input tokens of type `Tok`.
pub trait Terminal<Tok: ?Sized> {
    /// Check whether this terminal accepts the given token.
    fn matches(&self, token: &Tok) -> bool;
}

/// A means of creating terminals from their names in a grammar description.
pub trait TerminalBuilder {
    /// The type of terminal created.
    type Terminal;

    /// Create a terminal for a quoted literal.
    fn literal(&self, text: &str) -> Result<Self::Terminal>;

    /// Create a terminal for an upper-case name.
    fn named(&self, name: &str) -> Result<Self::Terminal>;
}

/// Check whether a terminal name is entirely upper-case.
///
/// This is the case if the name contains at least one cased character and no
/// lower-case ones. Digits and underscores are ignored, so `NUMBER_2` is
/// upper-case while `_` and `42` are not.
pub fn is_upper(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}

/// An opaque category tag of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(u32);

impl Category {
    /// Create a category from a u32.
    pub fn from_u32(tag: u32) -> Category {
        Category(tag)
    }

    /// Obtain the category as a u32.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// The attributes of an input token a [`TokenMatcher`] looks at.
pub trait Lexeme {
    /// The raw text of the token.
    fn text(&self) -> &str;

    /// The category of the token, if it has one.
    fn category(&self) -> Option<Category>;
}

impl Lexeme for str {
    fn text(&self) -> &str {
        self
    }

    fn category(&self) -> Option<Category> {
        None
    }
}

impl Lexeme for String {
    fn text(&self) -> &str {
        self
    }

    fn category(&self) -> Option<Category> {
        None
    }
}

impl<'a, L: Lexeme + ?Sized> Lexeme for &'a L {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn category(&self) -> Option<Category> {
        (**self).category()
    }
}

/// A simple input token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    text: String,
    category: Option<Category>,
}

impl Token {
    /// Create a new token.
    pub fn new<S: Into<String>>(text: S, category: Option<Category>) -> Token {
        Token {
            text: text.into(),
            category,
        }
    }

    /// Create a token without a category.
    pub fn literal<S: Into<String>>(text: S) -> Token {
        Token::new(text, None)
    }
}

impl Lexeme for Token {
    fn text(&self) -> &str {
        &self.text
    }

    fn category(&self) -> Option<Category> {
        self.category
    }
}

/// A registry of token categories.
///
/// Maps the upper-case terminal names of a grammar to the category tags
/// attached to tokens by the lexer.
#[derive(Debug, Clone, Default)]
pub struct Categories {
    names: IndexMap<String, Category>,
}

impl Categories {
    /// Create an empty registry.
    pub fn new() -> Categories {
        Default::default()
    }

    /// Register a category under a name, allocating a fresh tag.
    ///
    /// Returns the existing tag if the name is already registered.
    pub fn register<S: Into<String>>(&mut self, name: S) -> Category {
        let next = self.names.values().map(|c| c.0 + 1).max().unwrap_or(0);
        *self.names.entry(name.into()).or_insert(Category(next))
    }

    /// Bind a name to a specific category tag.
    pub fn insert<S: Into<String>>(&mut self, name: S, category: Category) {
        self.names.insert(name.into(), category);
    }

    /// Look up the category of a name.
    pub fn get(&self, name: &str) -> Option<Category> {
        self.names.get(name).cloned()
    }

    /// Look up the first name bound to a category.
    pub fn name(&self, category: Category) -> Option<&str> {
        self.names
            .iter()
            .find(|&(_, &c)| c == category)
            .map(|(name, _)| name.as_str())
    }

    /// The number of registered names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl TerminalBuilder for Categories {
    type Terminal = TokenMatcher;

    fn literal(&self, text: &str) -> Result<TokenMatcher> {
        TokenMatcher::from_name(text, self)
    }

    fn named(&self, name: &str) -> Result<TokenMatcher> {
        TokenMatcher::from_name(name, self)
    }
}

/// A terminal matching lexer tokens.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenMatcher {
    /// Matches tokens whose text is exactly the given string.
    Literal(String),
    /// Matches tokens of the given category.
    Category {
        /// The name of the category in the grammar.
        name: String,
        /// The category tag.
        category: Category,
    },
}

impl TokenMatcher {
    /// Create a terminal from its textual name.
    ///
    /// Upper-case names refer to a token category and must be registered in
    /// `categories`. Anything else is matched verbatim.
    pub fn from_name(name: &str, categories: &Categories) -> Result<TokenMatcher> {
        if !is_upper(name) {
            return Ok(TokenMatcher::Literal(name.to_owned()));
        }
        match categories.get(name) {
            Some(category) => Ok(TokenMatcher::Category {
                name: name.to_owned(),
                category,
            }),
            None => Err(Error::UnknownTokenCategory(name.to_owned())),
        }
    }
}

impl<L: Lexeme + ?Sized> Terminal<L> for TokenMatcher {
    fn matches(&self, token: &L) -> bool {
        match *self {
            TokenMatcher::Literal(ref text) => token.text() == text,
            TokenMatcher::Category { category, .. } => token.category() == Some(category),
        }
    }
}

impl fmt::Display for TokenMatcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TokenMatcher::Literal(ref text) if text.contains('\'') => write!(f, "\"{}\"", text),
            TokenMatcher::Literal(ref text) => write!(f, "'{}'", text),
            TokenMatcher::Category { ref name, .. } => write!(f, "{}", name),
        }
    }
}

/// A terminal matching a single character out of a fixed set.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharSet {
    chars: BTreeSet<char>,
}

impl CharSet {
    /// Create an empty set.
    pub fn new() -> CharSet {
        Default::default()
    }

    /// Create a set containing a range of characters.
    pub fn range(range: RangeInclusive<char>) -> CharSet {
        range.collect()
    }

    /// Insert a character. Returns `true` if it was not yet in the set.
    pub fn insert(&mut self, ch: char) -> bool {
        self.chars.insert(ch)
    }

    /// Add all characters of another set to this one.
    pub fn union_with(&mut self, other: &CharSet) {
        self.chars.extend(other.chars.iter().cloned());
    }

    /// Whether the set contains a character.
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// The number of characters in the set.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(chars: I) -> Self {
        CharSet {
            chars: chars.into_iter().collect(),
        }
    }
}

impl<'a> From<&'a str> for CharSet {
    fn from(chars: &'a str) -> CharSet {
        chars.chars().collect()
    }
}

impl Terminal<char> for CharSet {
    fn matches(&self, token: &char) -> bool {
        self.contains(*token)
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.chars.len() > 2 {
            // Only the bounds are shown, gaps in the set are not.
            let min = self.chars.iter().next();
            let max = self.chars.iter().next_back();
            if let (Some(min), Some(max)) = (min, max) {
                return write!(f, "{}-{}", min, max);
            }
        }
        for ch in &self.chars {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

/// A registry of named character classes.
///
/// Used to compile grammars that operate on individual characters. Quoted
/// literals become the set of their characters, so `'+-'` matches either a
/// plus or a minus sign. Upper-case names refer to registered classes.
#[derive(Debug, Clone, Default)]
pub struct CharClasses {
    classes: IndexMap<String, CharSet>,
}

impl CharClasses {
    /// Create an empty registry.
    pub fn new() -> CharClasses {
        Default::default()
    }

    /// Create a registry with the common ASCII classes `DIGIT`, `LOWER`,
    /// `UPPER`, `LETTER`, `ALNUM`, and `SPACE`.
    pub fn standard() -> CharClasses {
        let digit = CharSet::range('0'..='9');
        let lower = CharSet::range('a'..='z');
        let upper = CharSet::range('A'..='Z');
        let mut letter = lower.clone();
        letter.union_with(&upper);
        let mut alnum = letter.clone();
        alnum.union_with(&digit);

        let mut classes = CharClasses::new();
        classes.insert("DIGIT", digit);
        classes.insert("LOWER", lower);
        classes.insert("UPPER", upper);
        classes.insert("LETTER", letter);
        classes.insert("ALNUM", alnum);
        classes.insert("SPACE", CharSet::from(" \t\r\n"));
        classes
    }

    /// Register a class under a name, replacing any previous one.
    pub fn insert<S: Into<String>>(&mut self, name: S, set: CharSet) {
        self.classes.insert(name.into(), set);
    }

    /// Look up a class.
    pub fn get(&self, name: &str) -> Option<&CharSet> {
        self.classes.get(name)
    }
}

impl TerminalBuilder for CharClasses {
    type Terminal = CharSet;

    fn literal(&self, text: &str) -> Result<CharSet> {
        Ok(CharSet::from(text))
    }

    fn named(&self, name: &str) -> Result<CharSet> {
        self.get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownTokenCategory(name.to_owned()))
    }
}
