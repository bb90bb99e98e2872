// Copyright (c) 2018 Fabian Schuiki

//! Lowering of grammar descriptions to basic grammars.
//!
//! Optional groups, parenthesized groups, and repetitions are replaced by
//! synthesized nonterminals such that each rule of the resulting grammar is a
//! flat sequence of symbols:
//!
//! - `[x]` becomes `N` with rules `N -> x` and `N -> ε`.
//! - `(x | y)` becomes `N` with rules `N -> x` and `N -> y`.
//! - `x+` becomes `N` with rules `N -> x` and `N -> N x`.
//! - `x*` becomes `N` with rules `N -> x`, `N -> N x`, and `N -> ε`.
//!
//! Synthesized nonterminals are named `rule#n`, where `rule` is the rule they
//! were created for and `n` counts up for each one created during a single
//! compilation. Since `#` cannot appear in an identifier, these names never
//! collide with the names in the description.

use crate::error::{Error, Result};
use crate::grammar::{Grammar, Nonterminal, Rule, Symbol};
use crate::parser::{self, ast};
use crate::terminal::TerminalBuilder;

/// Compile a grammar description into a grammar.
///
/// Terminals are created by `builder`. The start symbol of the grammar is the
/// first rule in the description.
pub fn compile<B>(source: &str, builder: &B) -> Result<Grammar<B::Terminal>>
where
    B: TerminalBuilder,
    B::Terminal: Clone,
{
    let desc = parser::parse_str(source)?;
    Context::new(builder).lower(&desc)
}

/// Context information for lowering a grammar description.
pub struct Context<'a, B: TerminalBuilder + 'a> {
    builder: &'a B,
    rules: Vec<Rule<B::Terminal>>,
    counter: usize,
}

impl<'a, B> Context<'a, B>
where
    B: TerminalBuilder,
    B::Terminal: Clone,
{
    /// Create a new lowering context.
    pub fn new(builder: &'a B) -> Context<'a, B> {
        Context {
            builder,
            rules: Vec::new(),
            counter: 0,
        }
    }

    /// Perform the lowering.
    ///
    /// Consumes the context.
    pub fn lower(mut self, desc: &ast::Desc) -> Result<Grammar<B::Terminal>> {
        let start = match desc.rules.first() {
            Some(decl) => Nonterminal::new(&decl.name),
            None => return Err(Error::EmptyGrammar),
        };
        for decl in &desc.rules {
            let head = Nonterminal::new(&decl.name);
            self.lower_alternatives(&head, &decl.name, &decl.alternatives)?;
        }
        debug!(
            "lowered {} rule declarations to {} rules ({} synthesized nonterminals)",
            desc.rules.len(),
            self.rules.len(),
            self.counter
        );
        Grammar::new(self.rules, start)
    }

    fn lower_alternatives(
        &mut self,
        head: &Nonterminal,
        rule_name: &str,
        alternatives: &[ast::Sequence],
    ) -> Result<()> {
        for seq in alternatives {
            let mut symbols = Vec::with_capacity(seq.len());
            for item in seq {
                symbols.push(self.lower_item(rule_name, item)?);
            }
            self.add_rule(head.clone(), symbols);
        }
        Ok(())
    }

    fn lower_item(&mut self, rule_name: &str, item: &ast::Item) -> Result<Symbol<B::Terminal>> {
        match *item {
            ast::Item::Atom(ref atom) => self.lower_atom(rule_name, atom),
            ast::Item::Optional(ref alternatives) => {
                let sub = self.pick_subrule_name(rule_name);
                self.lower_alternatives(&sub, rule_name, alternatives)?;
                self.add_rule(sub.clone(), vec![]);
                Ok(sub.into())
            }
            ast::Item::Repeat(ref atom, repetition) => {
                let symbol = self.lower_atom(rule_name, atom)?;
                let sub = self.pick_subrule_name(rule_name);
                self.add_rule(sub.clone(), vec![symbol.clone()]);
                self.add_rule(sub.clone(), vec![sub.clone().into(), symbol]);
                if repetition == ast::Repetition::ZeroOrMore {
                    self.add_rule(sub.clone(), vec![]);
                }
                Ok(sub.into())
            }
        }
    }

    fn lower_atom(&mut self, rule_name: &str, atom: &ast::Atom) -> Result<Symbol<B::Terminal>> {
        Ok(match *atom {
            ast::Atom::Group(ref alternatives) => {
                let sub = self.pick_subrule_name(rule_name);
                self.lower_alternatives(&sub, rule_name, alternatives)?;
                sub.into()
            }
            ast::Atom::Nonterminal(ref name) => Symbol::nonterminal(name),
            ast::Atom::Category(ref name) => Symbol::Terminal(self.builder.named(name)?),
            ast::Atom::Literal(ref text) => Symbol::Terminal(self.builder.literal(text)?),
        })
    }

    fn add_rule(&mut self, head: Nonterminal, expansion: Vec<Symbol<B::Terminal>>) {
        trace!("rule {} with {} symbols", head, expansion.len());
        self.rules.push(Rule::new(head, expansion));
    }

    fn pick_subrule_name(&mut self, rule_name: &str) -> Nonterminal {
        self.counter += 1;
        Nonterminal::new(format!("{}#{}", rule_name, self.counter))
    }
}
