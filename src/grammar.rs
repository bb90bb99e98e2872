// Copyright (c) 2018 Fabian Schuiki

//! Data structures representing a grammar.

use std::fmt;
use std::sync::Arc;

use bit_set::BitSet;
use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::nullable;

/// A compiled grammar.
///
/// Consists of a list of rules in pure BNF form, a start symbol, and the set
/// of nullable nonterminals derived from the rules. A grammar is immutable once
/// constructed and can be shared between any number of concurrent parses.
#[derive(Debug, Clone)]
pub struct Grammar<T> {
    rules: Vec<Rule<T>>,
    start: Nonterminal,
    nonterms: IndexMap<Nonterminal, Vec<RuleId>>,
    nullable: BitSet,
}

/// A single rule within a grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule<T> {
    head: Nonterminal,
    expansion: Vec<Symbol<T>>,
}

/// A symbol of a production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol<T> {
    /// A terminal, matched directly against an input token.
    Terminal(T),
    /// A nonterminal, expanded by the rules of the grammar.
    Nonterminal(Nonterminal),
}

/// The name of a nonterminal.
///
/// Two nonterminals are equal if their names are equal. Cloning is cheap.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nonterminal(Arc<str>);

/// A unique rule identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(usize);

/// An iterator over the rules of a grammar.
pub type RulesIter<'a, T> = std::slice::Iter<'a, Rule<T>>;

/// An iterator over the nonterminals of a grammar.
pub type NonterminalsIter<'a> = indexmap::map::Keys<'a, Nonterminal, Vec<RuleId>>;

impl<T> Grammar<T> {
    /// Create a new grammar from a list of rules and a start symbol.
    ///
    /// Fails if any nonterminal used in a rule's expansion, or the start
    /// symbol itself, is not the head of at least one rule.
    pub fn new(rules: Vec<Rule<T>>, start: Nonterminal) -> Result<Grammar<T>> {
        let mut nonterms: IndexMap<Nonterminal, Vec<RuleId>> = IndexMap::new();
        for (index, rule) in rules.iter().enumerate() {
            nonterms
                .entry(rule.head.clone())
                .or_insert_with(Vec::new)
                .push(RuleId(index));
        }

        // Every referenced nonterminal needs at least one rule.
        for rule in &rules {
            for nt in rule.expansion.iter().filter_map(Symbol::as_nonterminal) {
                if !nonterms.contains_key(nt) {
                    return Err(Error::MalformedGrammar {
                        nonterminal: nt.name().to_owned(),
                    });
                }
            }
        }
        if !nonterms.contains_key(&start) {
            return Err(Error::MalformedGrammar {
                nonterminal: start.name().to_owned(),
            });
        }

        let nullable = nullable::compute(&rules, &nonterms);
        debug!(
            "grammar with {} rules, {} nonterminals ({} nullable), start `{}`",
            rules.len(),
            nonterms.len(),
            nullable.len(),
            start
        );
        Ok(Grammar {
            rules,
            start,
            nonterms,
            nullable,
        })
    }

    /// The start symbol of this grammar.
    pub fn start(&self) -> &Nonterminal {
        &self.start
    }

    /// The rules in this grammar.
    pub fn rules(&self) -> RulesIter<T> {
        self.rules.iter()
    }

    /// The number of rules in this grammar.
    pub fn num_rules(&self) -> usize {
        self.rules.len()
    }

    /// Access a single rule of this grammar.
    ///
    /// Panics if the id does not belong to this grammar.
    pub fn rule(&self, id: RuleId) -> &Rule<T> {
        &self.rules[id.as_usize()]
    }

    /// The rules for a specific nonterminal in the grammar.
    ///
    /// Returns an empty slice for nonterminals the grammar does not know.
    pub fn rules_for(&self, nt: &Nonterminal) -> &[RuleId] {
        self.nonterms.get(nt).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The nonterminals of this grammar, in order of their first rule.
    pub fn nonterminals(&self) -> NonterminalsIter {
        self.nonterms.keys()
    }

    /// Check whether a symbol can derive the empty sequence.
    ///
    /// Terminals are never nullable.
    pub fn is_nullable(&self, symbol: &Symbol<T>) -> bool {
        match *symbol {
            Symbol::Terminal(_) => false,
            Symbol::Nonterminal(ref nt) => self.is_nullable_nonterminal(nt),
        }
    }

    /// Check whether a nonterminal can derive the empty sequence.
    pub fn is_nullable_nonterminal(&self, nt: &Nonterminal) -> bool {
        match self.nonterms.get_full(nt) {
            Some((index, _, _)) => self.nullable.contains(index),
            None => false,
        }
    }

    /// The nullable nonterminals of this grammar.
    pub fn nullable(&self) -> impl Iterator<Item = &Nonterminal> {
        let nonterms = &self.nonterms;
        self.nullable
            .iter()
            .filter_map(move |index| nonterms.get_index(index).map(|(nt, _)| nt))
    }
}

impl<T: fmt::Display> Grammar<T> {
    /// Render each rule on a line of its own, sorted alphabetically.
    pub fn sorted_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.rules.iter().map(|r| r.to_string()).collect();
        lines.sort();
        lines
    }
}

impl<T: fmt::Display> fmt::Display for Grammar<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, rule) in self.rules.iter().enumerate() {
            if index > 0 {
                write!(f, "\n")?;
            }
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}

impl<T> Rule<T> {
    /// Create a new rule.
    pub fn new(head: Nonterminal, expansion: Vec<Symbol<T>>) -> Rule<T> {
        Rule { head, expansion }
    }

    /// The nonterminal this rule expands.
    pub fn head(&self) -> &Nonterminal {
        &self.head
    }

    /// The symbols in this production.
    pub fn expansion(&self) -> &[Symbol<T>] {
        &self.expansion
    }

    /// Whether this is an epsilon rule.
    pub fn is_empty(&self) -> bool {
        self.expansion.is_empty()
    }
}

impl<T: fmt::Display> fmt::Display for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ->", self.head)?;
        for symbol in &self.expansion {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

impl<T> Symbol<T> {
    /// Create a nonterminal symbol.
    pub fn nonterminal<S: AsRef<str>>(name: S) -> Symbol<T> {
        Symbol::Nonterminal(Nonterminal::new(name))
    }

    /// Create a terminal symbol.
    pub fn terminal(matcher: T) -> Symbol<T> {
        Symbol::Terminal(matcher)
    }

    /// Whether this symbol is a terminal.
    pub fn is_terminal(&self) -> bool {
        match *self {
            Symbol::Terminal(_) => true,
            Symbol::Nonterminal(_) => false,
        }
    }

    /// The terminal matcher, if this is a terminal.
    pub fn as_terminal(&self) -> Option<&T> {
        match *self {
            Symbol::Terminal(ref t) => Some(t),
            Symbol::Nonterminal(_) => None,
        }
    }

    /// The nonterminal, if this is one.
    pub fn as_nonterminal(&self) -> Option<&Nonterminal> {
        match *self {
            Symbol::Terminal(_) => None,
            Symbol::Nonterminal(ref nt) => Some(nt),
        }
    }
}

impl<T> From<Nonterminal> for Symbol<T> {
    fn from(nt: Nonterminal) -> Symbol<T> {
        Symbol::Nonterminal(nt)
    }
}

impl<T: fmt::Display> fmt::Display for Symbol<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Symbol::Terminal(ref t) => write!(f, "{}", t),
            Symbol::Nonterminal(ref nt) => write!(f, "{}", nt),
        }
    }
}

impl Nonterminal {
    /// Create a nonterminal with the given name.
    pub fn new<S: AsRef<str>>(name: S) -> Nonterminal {
        Nonterminal(Arc::from(name.as_ref()))
    }

    /// The name of this nonterminal.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl<'a> From<&'a str> for Nonterminal {
    fn from(name: &'a str) -> Nonterminal {
        Nonterminal::new(name)
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl RuleId {
    /// Create a rule id from a usize.
    pub fn from_usize(id: usize) -> RuleId {
        RuleId(id)
    }

    /// Obtain the id as a usize.
    pub fn as_usize(self) -> usize {
        self.0
    }
}
