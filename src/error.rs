// Copyright (c) 2018 Fabian Schuiki

//! Errors reported while compiling or constructing a grammar.
//!
//! Parsing an input never fails with an error. An input that is not a
//! sentence of the grammar is a regular outcome, see
//! [`ParseOutcome`](crate::earley::ParseOutcome).

use thiserror::Error;

/// An error that prevents a grammar from being built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The grammar description contains a character that cannot start a token.
    #[error("invalid character {ch:?} in grammar description at offset {offset}")]
    InvalidGrammarSource {
        /// The offending character.
        ch: char,
        /// The byte offset of the character.
        offset: usize,
    },
    /// The grammar description contains a token where a different one was
    /// expected.
    #[error("syntax error at offset {offset}: found {found}, expected {expected}")]
    GrammarSyntax {
        /// A description of the token that was found.
        found: String,
        /// A description of what was expected instead.
        expected: String,
        /// The byte offset of the offending token.
        offset: usize,
    },
    /// The grammar description does not contain a single rule.
    #[error("grammar description contains no rules")]
    EmptyGrammar,
    /// A nonterminal is referenced but never defined by a rule.
    #[error("nonterminal `{nonterminal}` is used but has no rules")]
    MalformedGrammar {
        /// The name of the undefined nonterminal.
        nonterminal: String,
    },
    /// An upper-case terminal name has no registered token category.
    #[error("unknown token category `{0}`")]
    UnknownTokenCategory(String),
}

/// A result carrying an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
