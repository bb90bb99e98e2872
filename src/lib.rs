// Copyright (c) 2018 Fabian Schuiki

//! A grammar compiler and Earley parser for context-free languages.
//!
//! Grammars are written in a compact EBNF-like notation and compiled into a
//! [`Grammar`] of plain rules. The Earley parser then recognizes sequences of
//! input tokens against such a grammar. It accepts all context-free grammars,
//! including left-recursive and ambiguous ones.
//!
//! ```
//! use chartist::{compile, parse, CharClasses};
//!
//! let grammar = compile("sum : sum '+' DIGIT | DIGIT\n", &CharClasses::standard()).unwrap();
//! let input: Vec<char> = "1+2+3".chars().collect();
//! assert!(parse(&grammar, &input).is_full_parse());
//! ```

#![deny(missing_docs)]

#[macro_use]
extern crate log;

pub mod earley;
pub mod error;
pub mod grammar;
pub mod item_set;
pub mod lexer;
pub mod lower;
mod nullable;
pub mod parser;
pub mod terminal;

pub use crate::earley::{parse, parse_from, Chart, ParseOutcome};
pub use crate::error::{Error, Result};
pub use crate::grammar::{Grammar, Nonterminal, Rule, RuleId, Symbol};
pub use crate::lower::compile;
pub use crate::terminal::{
    Categories, Category, CharClasses, CharSet, Lexeme, Terminal, TerminalBuilder, Token,
    TokenMatcher,
};

/// A pretty printer.
pub struct Pretty<C, T> {
    ctx: C,
    item: T,
}

impl<C, T> Pretty<C, T> {
    pub(crate) fn new(ctx: C, item: T) -> Pretty<C, T> {
        Pretty { ctx, item }
    }
}
