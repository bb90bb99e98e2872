// Copyright (c) 2018 Fabian Schuiki

//! Nullable set computation.
//!
//! This module determines which nonterminals of a grammar can derive the empty
//! sequence. A nonterminal is nullable if it has a rule whose expansion
//! consists entirely of nullable symbols, the empty expansion being the base
//! case. Terminals are never nullable.

use bit_set::BitSet;
use indexmap::IndexMap;

use crate::grammar::{Nonterminal, Rule, RuleId, Symbol};

/// Compute the nullable set of a list of rules.
///
/// The returned set contains the index of each nullable nonterminal in
/// `nonterms`. Iterates over all rules until a full pass adds no nonterminal to
/// the set.
pub(crate) fn compute<T>(
    rules: &[Rule<T>],
    nonterms: &IndexMap<Nonterminal, Vec<RuleId>>,
) -> BitSet {
    let mut nullable = BitSet::with_capacity(nonterms.len());
    let index_of = |nt: &Nonterminal| nonterms.get_full(nt).map(|(index, _, _)| index);

    let mut pass = 0;
    loop {
        pass += 1;
        let mut changed = false;
        for rule in rules {
            let head = match index_of(rule.head()) {
                Some(index) => index,
                None => continue,
            };
            if nullable.contains(head) {
                continue;
            }
            let all_nullable = rule.expansion().iter().all(|symbol| match *symbol {
                Symbol::Terminal(_) => false,
                Symbol::Nonterminal(ref nt) => match index_of(nt) {
                    Some(index) => nullable.contains(index),
                    None => false,
                },
            });
            if all_nullable {
                trace!("`{}` is nullable", rule.head());
                nullable.insert(head);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    trace!("nullable set settled after {} passes", pass);

    nullable
}
