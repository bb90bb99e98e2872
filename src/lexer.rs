// Copyright (c) 2018 Fabian Schuiki

//! A lexer for grammar descriptions.

use std::fmt;
use std::iter::Peekable;

use crate::error::{Error, Result};

/// The tokens that may appear in a grammar description.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Ident(String),
    Str(String),
    LParen,
    RParen,
    LBrack,
    RBrack,
    Pipe,
    Star,
    Plus,
    Colon,
    Newline,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Token::Ident(ref i) => write!(f, "identifier `{}`", i),
            Token::Str(ref s) => write!(f, "string {:?}", s),
            Token::LParen => write!(f, "`(`"),
            Token::RParen => write!(f, "`)`"),
            Token::LBrack => write!(f, "`[`"),
            Token::RBrack => write!(f, "`]`"),
            Token::Pipe => write!(f, "`|`"),
            Token::Star => write!(f, "`*`"),
            Token::Plus => write!(f, "`+`"),
            Token::Colon => write!(f, "`:`"),
            Token::Newline => write!(f, "newline"),
        }
    }
}

/// A lexer for grammar descriptions.
///
/// Newlines are only significant outside of parentheses and brackets, which
/// allows the body of a rule to span multiple lines as long as it is nested.
pub struct Lexer<T: Iterator<Item = (usize, char)>> {
    input: Peekable<T>,
    nesting: usize,
}

impl<T: Iterator<Item = (usize, char)>> Lexer<T> {
    /// Create a new lexer.
    pub fn new(input: T) -> Lexer<T> {
        Lexer {
            input: input.peekable(),
            nesting: 0,
        }
    }
}

impl<'a> Lexer<::std::str::CharIndices<'a>> {
    /// Create a new lexer for a string.
    pub fn from_str(input: &'a str) -> Lexer<::std::str::CharIndices<'a>> {
        Lexer::new(input.char_indices())
    }
}

/// Checks whether a character may appear in an identifier.
fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<T: Iterator<Item = (usize, char)>> Lexer<T> {
    /// Return the next relevant input character, skipping plain spaces,
    /// comments, and nested newlines.
    fn next_relevant(&mut self) -> Option<(usize, char)> {
        while let Some((p, c)) = self.input.next() {
            match c {
                ' ' => continue,
                '\n' if self.nesting > 0 => continue,
                '#' => {
                    // The comment ends before the newline, which may still be
                    // significant.
                    while let Some(&(_, c)) = self.input.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.input.next();
                    }
                }
                _ => return Some((p, c)),
            }
        }
        None
    }
}

impl<T: Iterator<Item = (usize, char)>> Iterator for Lexer<T> {
    type Item = Result<(usize, usize, Token)>;

    fn next(&mut self) -> Option<Self::Item> {
        // Fetch the first character and see what we can do with it.
        let (sp, sc) = self.next_relevant()?;
        let mut sl = sp + sc.len_utf8();
        let tkn = match sc {
            '\n' => Token::Newline,
            '(' => {
                self.nesting += 1;
                Token::LParen
            }
            '[' => {
                self.nesting += 1;
                Token::LBrack
            }
            ')' => {
                self.nesting = self.nesting.saturating_sub(1);
                Token::RParen
            }
            ']' => {
                self.nesting = self.nesting.saturating_sub(1);
                Token::RBrack
            }
            '|' => Token::Pipe,
            '*' => Token::Star,
            '+' => Token::Plus,
            ':' => Token::Colon,
            '\'' | '"' => {
                let mut buffer = String::new();
                let mut closed = false;
                while let Some((ep, ec)) = self.input.next() {
                    sl = ep + ec.len_utf8();
                    if ec == sc {
                        closed = true;
                        break;
                    }
                    buffer.push(ec);
                }
                if !closed {
                    return Some(Err(Error::GrammarSyntax {
                        found: "end of input".into(),
                        expected: format!("closing {}", sc),
                        offset: sp,
                    }));
                }
                Token::Str(buffer)
            }
            c if is_ident(c) => {
                let mut buffer = String::new();
                buffer.push(sc);
                while let Some(&(ep, ec)) = self.input.peek() {
                    if !is_ident(ec) {
                        break;
                    }
                    buffer.push(ec);
                    sl = ep + ec.len_utf8();
                    self.input.next();
                }
                Token::Ident(buffer)
            }
            c => {
                return Some(Err(Error::InvalidGrammarSource { ch: c, offset: sp }));
            }
        };
        Some(Ok((sp, sl, tkn)))
    }
}

#[cfg(test)]
mod tests {
    use super::Token::*;
    use super::*;

    fn lex<S: AsRef<str>>(input: S) -> Vec<Token> {
        let lex = Lexer::from_str(input.as_ref());
        lex.map(|r| r.unwrap().2).collect()
    }

    #[test]
    fn tokens1() {
        assert_eq!(
            lex("sum : sum '+' product | product\n"),
            vec![
                Ident("sum".into()),
                Colon,
                Ident("sum".into()),
                Str("+".into()),
                Ident("product".into()),
                Pipe,
                Ident("product".into()),
                Newline,
            ]
        );
    }

    #[test]
    fn operators() {
        assert_eq!(
            lex("( ) [ ] | * + :"),
            vec![LParen, RParen, LBrack, RBrack, Pipe, Star, Plus, Colon]
        );
    }

    #[test]
    fn identifiers() {
        assert_eq!(
            lex("NAME name_2 _x 42"),
            vec![
                Ident("NAME".into()),
                Ident("name_2".into()),
                Ident("_x".into()),
                Ident("42".into()),
            ]
        );
    }

    #[test]
    fn comment_single_line() {
        assert_eq!(
            lex("a # comment : | \nb"),
            vec![Ident("a".into()), Newline, Ident("b".into())]
        );
    }

    #[test]
    fn nested_newlines() {
        assert_eq!(
            lex("a : (b\n| c)\n[d\n]\n"),
            vec![
                Ident("a".into()),
                Colon,
                LParen,
                Ident("b".into()),
                Pipe,
                Ident("c".into()),
                RParen,
                Newline,
                LBrack,
                Ident("d".into()),
                RBrack,
                Newline,
            ]
        );
    }

    #[test]
    fn quotes_without_escapes() {
        assert_eq!(
            lex(r#"'"' "'" 'a\b'"#),
            vec![Str("\"".into()), Str("'".into()), Str("a\\b".into())]
        );
    }

    #[test]
    fn spans() {
        let spans: Vec<(usize, usize)> = Lexer::from_str("ab 'cd'")
            .map(|r| {
                let (s, e, _) = r.unwrap();
                (s, e)
            })
            .collect();
        assert_eq!(spans, vec![(0, 2), (3, 7)]);
    }

    #[test]
    fn unterminated_string() {
        let result: Result<Vec<_>> = Lexer::from_str("a : 'abc").collect();
        assert_eq!(
            result,
            Err(Error::GrammarSyntax {
                found: "end of input".into(),
                expected: "closing '".into(),
                offset: 4,
            })
        );
    }

    #[test]
    fn tabs_and_carriage_returns_are_invalid() {
        let result: Result<Vec<_>> = Lexer::from_str("a :\t'x'").collect();
        assert_eq!(
            result,
            Err(Error::InvalidGrammarSource { ch: '\t', offset: 3 })
        );
        let result: Result<Vec<_>> = Lexer::from_str("a : 'x'\r\n").collect();
        assert_eq!(
            result,
            Err(Error::InvalidGrammarSource { ch: '\r', offset: 7 })
        );
    }

    #[test]
    fn invalid_character() {
        let result: Result<Vec<_>> = Lexer::from_str("a : b;").collect();
        assert_eq!(
            result,
            Err(Error::InvalidGrammarSource { ch: ';', offset: 5 })
        );
    }
}
