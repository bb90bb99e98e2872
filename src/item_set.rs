// Copyright (c) 2018 Fabian Schuiki

//! Earley items and the state sets that hold them.

use std::fmt;

use indexmap::IndexSet;

use crate::grammar::{Grammar, Nonterminal, RuleId, Symbol};
use crate::Pretty;

/// A set of items at one position of the input.
///
/// Items are kept in insertion order and each item is stored at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSet {
    items: IndexSet<Item>,
}

/// An iterator over the items of an item set.
pub type ItemsIter<'a> = indexmap::set::Iter<'a, Item>;

impl ItemSet {
    /// Create an empty item set.
    pub fn new() -> ItemSet {
        Default::default()
    }

    /// Add an item to the set.
    ///
    /// Returns `false` if an equal item was already present, in which case the
    /// set remains unchanged.
    pub fn insert(&mut self, item: Item) -> bool {
        self.items.insert(item)
    }

    /// Check whether the set contains an item.
    pub fn contains(&self, item: &Item) -> bool {
        self.items.contains(item)
    }

    /// Get the item at a position in insertion order.
    pub fn get(&self, index: usize) -> Option<Item> {
        self.items.get_index(index).cloned()
    }

    /// Get the items in the set, in insertion order.
    pub fn items(&self) -> ItemsIter {
        self.items.iter()
    }

    /// The number of items in the set.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a pretty printer for this item set.
    pub fn pretty<'a, T>(&'a self, grammar: &'a Grammar<T>) -> Pretty<&'a Grammar<T>, &'a Self> {
        Pretty::new(grammar, self)
    }
}

impl<'a, T: fmt::Display> fmt::Display for Pretty<&'a Grammar<T>, &'a ItemSet> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, item) in self.item.items.iter().enumerate() {
            if index > 0 {
                write!(f, "\n")?;
            }
            write!(f, "{}", item.pretty(self.ctx))?;
        }
        if self.item.items.is_empty() {
            write!(f, "<empty>")?;
        }
        Ok(())
    }
}

/// A single item.
///
/// Records how much of a rule has been recognized and at which input position
/// the recognition started. Two items are equal if rule, origin, and marker
/// position are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    /// The rule of the item.
    rule: RuleId,
    /// The input position where recognition of the rule started.
    origin: usize,
    /// The position of the marker within the rule.
    dot: usize,
}

impl Item {
    /// Create a new item.
    ///
    /// The marker position `dot` must not exceed the length of the rule.
    /// Querying or printing an item that violates this against its grammar
    /// panics.
    pub fn new(rule: RuleId, origin: usize, dot: usize) -> Item {
        Item { rule, origin, dot }
    }

    /// Get the rule this item represents.
    pub fn rule(&self) -> RuleId {
        self.rule
    }

    /// Get the input position where this item started.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Get the position of the marker within the rule.
    pub fn dot(&self) -> usize {
        self.dot
    }

    /// The same item with the marker moved past the next symbol.
    pub fn advance(&self) -> Item {
        Item {
            dot: self.dot + 1,
            ..*self
        }
    }

    /// The symbol right after the marker, or `None` if the item is complete.
    pub fn next_symbol<'a, T>(&self, grammar: &'a Grammar<T>) -> Option<&'a Symbol<T>> {
        grammar.rule(self.rule).expansion().get(self.dot)
    }

    /// Whether the marker has reached the end of the rule.
    pub fn is_complete<T>(&self, grammar: &Grammar<T>) -> bool {
        self.dot == grammar.rule(self.rule).expansion().len()
    }

    /// Whether this item is a complete derivation of `start` beginning at the
    /// start of the input.
    pub fn is_full_parse<T>(&self, grammar: &Grammar<T>, start: &Nonterminal) -> bool {
        self.origin == 0 && self.is_complete(grammar) && grammar.rule(self.rule).head() == start
    }

    /// Get a pretty printer for this item.
    ///
    /// Panics if the marker lies past the end of the rule.
    pub fn pretty<'a, T>(&'a self, grammar: &'a Grammar<T>) -> Pretty<&'a Grammar<T>, &'a Self> {
        let len = grammar.rule(self.rule).expansion().len();
        assert!(
            self.dot <= len,
            "marker {} past the end of a rule with {} symbols",
            self.dot,
            len
        );
        Pretty::new(grammar, self)
    }
}

impl<'a, T: fmt::Display> fmt::Display for Pretty<&'a Grammar<T>, &'a Item> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rule = self.ctx.rule(self.item.rule);
        write!(f, "{} ->", rule.head())?;
        let symbols = rule.expansion();
        for symbol in &symbols[0..self.item.dot] {
            write!(f, " {}", symbol)?;
        }
        write!(f, " •")?;
        for symbol in &symbols[self.item.dot..] {
            write!(f, " {}", symbol)?;
        }
        write!(f, " ({})", self.item.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Rule;

    fn grammar() -> Grammar<char> {
        Grammar::new(
            vec![
                Rule::new(
                    "S".into(),
                    vec![Symbol::terminal('('), Symbol::nonterminal("S"), Symbol::terminal(')')],
                ),
                Rule::new("S".into(), vec![]),
            ],
            "S".into(),
        ).unwrap()
    }

    #[test]
    fn dedup_keeps_insertion_order() {
        let mut set = ItemSet::new();
        let a = Item::new(RuleId::from_usize(0), 0, 0);
        let b = Item::new(RuleId::from_usize(1), 0, 0);
        assert!(set.insert(a));
        assert!(set.insert(b));
        assert!(!set.insert(a));
        assert!(!set.insert(Item::new(RuleId::from_usize(0), 0, 0)));
        assert!(set.insert(a.advance()));
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(0), Some(a));
        assert_eq!(set.get(1), Some(b));
        assert_eq!(set.get(2), Some(Item::new(RuleId::from_usize(0), 0, 1)));
        assert_eq!(set.get(3), None);
    }

    #[test]
    fn origin_distinguishes_items() {
        let mut set = ItemSet::new();
        assert!(set.insert(Item::new(RuleId::from_usize(0), 0, 1)));
        assert!(set.insert(Item::new(RuleId::from_usize(0), 1, 1)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn completeness() {
        let g = grammar();
        let start = Nonterminal::new("S");
        let item = Item::new(RuleId::from_usize(0), 0, 0);
        assert_eq!(item.next_symbol(&g), Some(&Symbol::terminal('(')));
        assert!(!item.is_complete(&g));
        let done = item.advance().advance().advance();
        assert_eq!(done.next_symbol(&g), None);
        assert!(done.is_full_parse(&g, &start));
        assert!(!Item::new(RuleId::from_usize(1), 2, 0).is_full_parse(&g, &start));
        assert!(Item::new(RuleId::from_usize(1), 0, 0).is_full_parse(&g, &start));
    }

    #[test]
    fn pretty() {
        let g = grammar();
        let item = Item::new(RuleId::from_usize(0), 3, 1);
        assert_eq!(format!("{}", item.pretty(&g)), "S -> ( • S ) (3)");
        let empty = Item::new(RuleId::from_usize(1), 0, 0);
        assert_eq!(format!("{}", empty.pretty(&g)), "S -> • (0)");

        let mut set = ItemSet::new();
        assert_eq!(format!("{}", set.pretty(&g)), "<empty>");
        set.insert(item);
        set.insert(empty);
        assert_eq!(format!("{}", set.pretty(&g)), "S -> ( • S ) (3)\nS -> • (0)");
    }

    #[test]
    #[should_panic(expected = "past the end of a rule")]
    fn marker_past_the_end() {
        let g = grammar();
        Item::new(RuleId::from_usize(1), 0, 1).pretty(&g);
    }
}
