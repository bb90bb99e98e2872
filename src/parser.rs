// Copyright (c) 2018 Fabian Schuiki

//! A parser for grammar descriptions.
//!
//! A grammar description is a list of rules, one per line:
//!
//! ```text
//! rule : alternative ( '|' alternative )*
//! alternative : item+
//! item : '[' alternative ( '|' alternative )* ']' | atom ( '+' | '*' )?
//! atom : '(' alternative ( '|' alternative )* ')' | IDENTIFIER | STRING
//! ```
//!
//! The parser produces the abstract syntax tree in [`ast`], which is lowered
//! to a plain grammar by the [`lower`](crate::lower) module.

use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token};
use crate::terminal::is_upper;

/// The abstract syntax tree of a grammar description.
pub mod ast {
    /// The root node of a grammar description.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct Desc {
        /// The rule declarations, in the order they appear.
        pub rules: Vec<RuleDecl>,
    }

    /// A rule declaration.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct RuleDecl {
        /// The name of the rule.
        pub name: String,
        /// The different alternatives of the rule.
        pub alternatives: Vec<Sequence>,
    }

    /// A sequence of items.
    pub type Sequence = Vec<Item>;

    /// An item in a sequence.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum Item {
        /// An atom, `x`.
        Atom(Atom),
        /// An optional group, `[x | y]`.
        Optional(Vec<Sequence>),
        /// A repeated atom, `x+` or `x*`.
        Repeat(Atom, Repetition),
    }

    /// How often a repeated atom may occur.
    #[allow(missing_docs)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Repetition {
        OneOrMore,
        ZeroOrMore,
    }

    /// A single atom.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum Atom {
        /// A group of alternatives, `(x | y)`.
        Group(Vec<Sequence>),
        /// A reference to a rule.
        Nonterminal(String),
        /// A token category, given as an upper-case identifier.
        Category(String),
        /// A quoted literal.
        Literal(String),
    }
}

use self::ast::{Atom, Desc, Item, Repetition, RuleDecl, Sequence};

/// Parse a grammar description.
pub fn parse_str(input: &str) -> Result<Desc> {
    Parser::new(Lexer::from_str(input))?.parse_desc()
}

/// A recursive descent parser over a stream of grammar description tokens.
pub struct Parser<I: Iterator<Item = Result<(usize, usize, Token)>>> {
    input: I,
    token: Option<(usize, usize, Token)>,
    last_end: usize,
}

impl<I: Iterator<Item = Result<(usize, usize, Token)>>> Parser<I> {
    /// Create a new parser.
    pub fn new(mut input: I) -> Result<Parser<I>> {
        let token = match input.next() {
            Some(t) => Some(t?),
            None => None,
        };
        Ok(Parser {
            input,
            token,
            last_end: 0,
        })
    }

    /// Parse an entire grammar description.
    pub fn parse_desc(mut self) -> Result<Desc> {
        let mut rules = Vec::new();
        loop {
            while self.is(&Token::Newline) {
                self.bump()?;
            }
            if self.token.is_none() {
                break;
            }
            rules.push(self.parse_rule()?);
        }
        debug!("parsed {} rule declarations", rules.len());
        Ok(Desc { rules })
    }

    /// Parse a rule declaration, `name : rhs NEWLINE`.
    ///
    /// Every rule, including the last one, must be terminated by a newline.
    fn parse_rule(&mut self) -> Result<RuleDecl> {
        let name = match self.bump()? {
            Some((_, _, Token::Ident(name))) => name,
            other => return Err(self.unexpected(other, "rule name")),
        };
        self.expect(Token::Colon)?;
        let alternatives = self.parse_rhs()?;
        match self.bump()? {
            Some((_, _, Token::Newline)) => (),
            other => return Err(self.unexpected(other, "`|` or newline")),
        }
        Ok(RuleDecl { name, alternatives })
    }

    /// Parse alternatives separated by `|`.
    fn parse_rhs(&mut self) -> Result<Vec<Sequence>> {
        let mut alternatives = vec![self.parse_alt()?];
        while self.is(&Token::Pipe) {
            self.bump()?;
            alternatives.push(self.parse_alt()?);
        }
        Ok(alternatives)
    }

    /// Parse a sequence of one or more items.
    fn parse_alt(&mut self) -> Result<Sequence> {
        let mut items = vec![self.parse_item()?];
        while self.starts_item() {
            items.push(self.parse_item()?);
        }
        Ok(items)
    }

    fn parse_item(&mut self) -> Result<Item> {
        if self.is(&Token::LBrack) {
            self.bump()?;
            let alternatives = self.parse_rhs()?;
            self.expect(Token::RBrack)?;
            return Ok(Item::Optional(alternatives));
        }
        let atom = self.parse_atom()?;
        let repetition = match self.token {
            Some((_, _, Token::Plus)) => Repetition::OneOrMore,
            Some((_, _, Token::Star)) => Repetition::ZeroOrMore,
            _ => return Ok(Item::Atom(atom)),
        };
        self.bump()?;
        Ok(Item::Repeat(atom, repetition))
    }

    fn parse_atom(&mut self) -> Result<Atom> {
        match self.bump()? {
            Some((_, _, Token::LParen)) => {
                let alternatives = self.parse_rhs()?;
                self.expect(Token::RParen)?;
                Ok(Atom::Group(alternatives))
            }
            Some((_, _, Token::Ident(name))) => {
                if is_upper(&name) {
                    Ok(Atom::Category(name))
                } else {
                    Ok(Atom::Nonterminal(name))
                }
            }
            Some((_, _, Token::Str(text))) => Ok(Atom::Literal(text)),
            other => Err(self.unexpected(other, "`(`, `[`, identifier, or string")),
        }
    }

    /// Check whether the current token can start an item.
    fn starts_item(&self) -> bool {
        match self.token {
            Some((_, _, Token::LParen))
            | Some((_, _, Token::LBrack))
            | Some((_, _, Token::Ident(_)))
            | Some((_, _, Token::Str(_))) => true,
            _ => false,
        }
    }

    /// Check whether the current token is `tkn`.
    fn is(&self, tkn: &Token) -> bool {
        match self.token {
            Some((_, _, ref t)) => t == tkn,
            None => false,
        }
    }

    /// Consume the current token and fetch the next one from the input.
    fn bump(&mut self) -> Result<Option<(usize, usize, Token)>> {
        let next = match self.input.next() {
            Some(t) => Some(t?),
            None => None,
        };
        let current = ::std::mem::replace(&mut self.token, next);
        if let Some((_, end, _)) = current {
            self.last_end = end;
        }
        Ok(current)
    }

    /// Consume the current token, which must be `tkn`.
    fn expect(&mut self, tkn: Token) -> Result<()> {
        match self.bump()? {
            Some((_, _, ref t)) if *t == tkn => Ok(()),
            other => Err(self.unexpected(other, &tkn.to_string())),
        }
    }

    fn unexpected(&self, found: Option<(usize, usize, Token)>, expected: &str) -> Error {
        let (found, offset) = match found {
            Some((offset, _, tkn)) => (tkn.to_string(), offset),
            None => ("end of input".to_owned(), self.last_end),
        };
        Error::GrammarSyntax {
            found,
            expected: expected.to_owned(),
            offset,
        }
    }
}
