// Copyright (c) 2018 Fabian Schuiki

//! An Earley chart parser.
//!
//! The parser builds one [`ItemSet`] per position of the input, left to right.
//! Each set is processed as a work list: items appended while the set is being
//! processed are visited as well, until no new items appear. For each item one
//! of three operations applies:
//!
//! - *Completion*: the item is complete, so every item in its origin set that
//!   waits for the item's nonterminal is advanced into the current set.
//! - *Scan*: the next symbol is a terminal which matches the current token, so
//!   the advanced item is added to the next set.
//! - *Prediction*: the next symbol is a nonterminal, so an item for each of its
//!   rules is added to the current set. If the nonterminal is nullable, the
//!   advanced item is added to the current set right away.
//!
//! Since each set holds any item at most once, the procedure terminates for all
//! grammars, including left-recursive ones.

use std::fmt;

use crate::grammar::{Grammar, Nonterminal, Symbol};
use crate::item_set::{Item, ItemSet};
use crate::terminal::Terminal;
use crate::Pretty;

/// The result of parsing an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseOutcome {
    /// The entire input is a derivation of the start symbol.
    FullParse(Item),
    /// Only a prefix of the input, ending at `column`, is a derivation of the
    /// start symbol.
    PartialParse {
        /// The complete item for the start symbol.
        item: Item,
        /// The length of the recognized prefix.
        column: usize,
    },
    /// No prefix of the input is a derivation of the start symbol.
    NoParse,
}

impl ParseOutcome {
    /// Whether the entire input was recognized.
    pub fn is_full_parse(&self) -> bool {
        match *self {
            ParseOutcome::FullParse(_) => true,
            _ => false,
        }
    }

    /// The item proving the full or partial parse, if any.
    pub fn item(&self) -> Option<Item> {
        match *self {
            ParseOutcome::FullParse(item) => Some(item),
            ParseOutcome::PartialParse { item, .. } => Some(item),
            ParseOutcome::NoParse => None,
        }
    }

    /// Get a pretty printer for this outcome.
    pub fn pretty<'a, T>(&'a self, grammar: &'a Grammar<T>) -> Pretty<&'a Grammar<T>, &'a Self> {
        Pretty::new(grammar, self)
    }
}

impl<'a, T: fmt::Display> fmt::Display for Pretty<&'a Grammar<T>, &'a ParseOutcome> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.item {
            ParseOutcome::FullParse(ref item) => {
                write!(f, "fully parsed: {}", item.pretty(self.ctx))
            }
            ParseOutcome::PartialParse { ref item, column } => write!(
                f,
                "partial parse up to {}: {}",
                column,
                item.pretty(self.ctx)
            ),
            ParseOutcome::NoParse => write!(f, "no parse"),
        }
    }
}

/// Parse a sequence of tokens, starting at the grammar's start symbol.
pub fn parse<T, Tok>(grammar: &Grammar<T>, tokens: &[Tok]) -> ParseOutcome
where
    T: Terminal<Tok>,
{
    Chart::parse(grammar, tokens).outcome()
}

/// Parse a sequence of tokens, starting at the given nonterminal.
pub fn parse_from<T, Tok>(grammar: &Grammar<T>, tokens: &[Tok], start: &Nonterminal) -> ParseOutcome
where
    T: Terminal<Tok>,
{
    Chart::parse_from(grammar, tokens, start).outcome()
}

/// The chart built while parsing an input.
///
/// Holds one item set for each position in the input, including the position
/// after the last token. The chart is kept around after parsing such that it
/// can be inspected or used to extract a syntax tree.
#[derive(Debug, Clone)]
pub struct Chart<'a, T: 'a> {
    grammar: &'a Grammar<T>,
    start: Nonterminal,
    columns: Vec<ItemSet>,
}

impl<'a, T> Chart<'a, T> {
    /// Parse a sequence of tokens, starting at the grammar's start symbol.
    pub fn parse<Tok>(grammar: &'a Grammar<T>, tokens: &[Tok]) -> Chart<'a, T>
    where
        T: Terminal<Tok>,
    {
        Chart::parse_from(grammar, tokens, grammar.start())
    }

    /// Parse a sequence of tokens, starting at the given nonterminal.
    pub fn parse_from<Tok>(
        grammar: &'a Grammar<T>,
        tokens: &[Tok],
        start: &Nonterminal,
    ) -> Chart<'a, T>
    where
        T: Terminal<Tok>,
    {
        let mut chart = Chart {
            grammar,
            start: start.clone(),
            columns: (0..tokens.len() + 1).map(|_| ItemSet::new()).collect(),
        };
        chart.run(tokens);
        chart
    }

    /// Fill in the item sets.
    fn run<Tok>(&mut self, tokens: &[Tok])
    where
        T: Terminal<Tok>,
    {
        let grammar = self.grammar;
        for &rule in grammar.rules_for(&self.start) {
            self.add(0, Item::new(rule, 0, 0));
        }

        for index in 0..self.columns.len() {
            let token = tokens.get(index);

            // The set grows while it is being processed, so walk it by index
            // until no unvisited items remain.
            let mut next = 0;
            while let Some(item) = self.columns[index].get(next) {
                next += 1;
                match item.next_symbol(grammar) {
                    None => self.complete(index, item),
                    Some(&Symbol::Terminal(ref terminal)) => {
                        if let Some(token) = token {
                            if terminal.matches(token) {
                                self.add(index + 1, item.advance());
                            }
                        }
                    }
                    Some(&Symbol::Nonterminal(ref nt)) => self.predict(index, item, nt),
                }
            }
            trace!("state set {} settled with {} items", index, next);
        }

        debug!(
            "parsed {} tokens, {} items in {} state sets",
            tokens.len(),
            self.columns.iter().map(ItemSet::len).sum::<usize>(),
            self.columns.len()
        );
    }

    /// Advance all items waiting for the head of a complete item.
    fn complete(&mut self, index: usize, item: Item) {
        let grammar = self.grammar;
        let head = grammar.rule(item.rule()).head();
        let advanced: Vec<Item> = self.columns[item.origin()]
            .items()
            .filter(|waiting| match waiting.next_symbol(grammar) {
                Some(&Symbol::Nonterminal(ref nt)) => nt == head,
                _ => false,
            })
            .map(Item::advance)
            .collect();
        for item in advanced {
            self.add(index, item);
        }
    }

    /// Add an item for each rule of an expected nonterminal.
    fn predict(&mut self, index: usize, item: Item, nt: &Nonterminal) {
        let grammar = self.grammar;
        for &rule in grammar.rules_for(nt) {
            self.add(index, Item::new(rule, index, 0));
        }
        if grammar.is_nullable_nonterminal(nt) {
            self.add(index, item.advance());
        }
    }

    fn add(&mut self, index: usize, item: Item) {
        if self.columns[index].insert(item) {
            trace!("added {:?} to state set {}", item, index);
        }
    }

    /// The grammar of this chart.
    pub fn grammar(&self) -> &'a Grammar<T> {
        self.grammar
    }

    /// The start symbol the input was parsed against.
    pub fn start(&self) -> &Nonterminal {
        &self.start
    }

    /// All item sets, one for each position in the input.
    pub fn columns(&self) -> &[ItemSet] {
        &self.columns
    }

    /// The item set at a position in the input.
    pub fn column(&self, index: usize) -> Option<&ItemSet> {
        self.columns.get(index)
    }

    /// The full parse items in a column, in the order they were added.
    fn full_parses_at(&self, index: usize) -> impl Iterator<Item = Item> + '_ {
        self.columns[index]
            .items()
            .cloned()
            .filter(move |item| item.is_full_parse(self.grammar, &self.start))
    }

    /// All items proving that the entire input is a derivation of the start
    /// symbol.
    ///
    /// More than one item indicates that the grammar is ambiguous for this
    /// input.
    pub fn full_parses(&self) -> impl Iterator<Item = Item> + '_ {
        self.full_parses_at(self.columns.len() - 1)
    }

    /// All items proving that a prefix of the input is a derivation of the
    /// start symbol, from the longest prefix to the shortest.
    ///
    /// Full parses are not included.
    pub fn partial_parses(&self) -> impl Iterator<Item = (usize, Item)> + '_ {
        (0..self.columns.len() - 1)
            .rev()
            .flat_map(move |index| self.full_parses_at(index).map(move |item| (index, item)))
    }

    /// Determine the outcome of the parse.
    ///
    /// If the input was fully parsed, reports the first full parse item in the
    /// last set. Otherwise reports the first item of the longest recognized
    /// prefix, if any.
    pub fn outcome(&self) -> ParseOutcome {
        if let Some(item) = self.full_parses().next() {
            return ParseOutcome::FullParse(item);
        }
        match self.partial_parses().next() {
            Some((column, item)) => ParseOutcome::PartialParse { item, column },
            None => ParseOutcome::NoParse,
        }
    }
}

impl<'a, T: fmt::Display> fmt::Display for Chart<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, column) in self.columns.iter().enumerate() {
            if index > 0 {
                write!(f, "\n")?;
            }
            write!(f, "State {}:", index)?;
            for item in column.items() {
                write!(f, "\n    {}", item.pretty(self.grammar))?;
            }
        }
        Ok(())
    }
}
