// Copyright (c) 2018 Fabian Schuiki
#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use std::error::Error;
use std::fmt;
use std::fs::File;

use chartist::{compile, Categories, CharClasses, Chart, Grammar, Terminal, Token};
use clap::{App, Arg, ArgMatches};
use memmap::Mmap;

fn main() {
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::with_name("verbosity")
                .short("v")
                .multiple(true)
                .help("Increase message verbosity"),
        )
        .arg(
            Arg::with_name("chars")
                .long("chars")
                .help("Parse the input character by character"),
        )
        .arg(
            Arg::with_name("dump-grammar")
                .long("dump-grammar")
                .help("Print the compiled grammar"),
        )
        .arg(
            Arg::with_name("dump-chart")
                .long("dump-chart")
                .help("Print the state sets built during parsing"),
        )
        .arg(
            Arg::with_name("GRAMMAR")
                .help("The grammar description")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("The input to parse")
                .required(true)
                .index(2),
        )
        .get_matches();

    stderrlog::new()
        .module(module_path!())
        .verbosity(matches.occurrences_of("verbosity") as usize)
        .init()
        .ok();

    match run(&matches) {
        Ok(true) => (),
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Compile the grammar and parse the input. Returns whether the entire input
/// was recognized.
fn run(matches: &ArgMatches) -> Result<bool, Box<dyn Error>> {
    let grammar_path = matches.value_of("GRAMMAR").unwrap_or_default();
    let input_path = matches.value_of("INPUT").unwrap_or_default();

    // Mapping an empty file fails, so only map files with content.
    let file = File::open(grammar_path)?;
    let mmap;
    let source = if file.metadata()?.len() == 0 {
        ""
    } else {
        mmap = unsafe { Mmap::map(&file)? };
        std::str::from_utf8(&mmap)?
    };
    let input = std::fs::read_to_string(input_path)?;
    debug!("read {} bytes of grammar, {} bytes of input", source.len(), input.len());

    if matches.is_present("chars") {
        let grammar = compile(source, &CharClasses::standard())?;
        let tokens: Vec<char> = input
            .trim_end_matches(|c: char| c == '\n' || c == '\r')
            .chars()
            .collect();
        Ok(report(matches, &grammar, &tokens))
    } else {
        let mut categories = Categories::new();
        for name in &["NAME", "NUMBER", "STRING"] {
            categories.register(*name);
        }
        let grammar = compile(source, &categories)?;
        let tokens: Vec<Token> = input
            .split_whitespace()
            .map(|word| classify(word, &categories))
            .collect();
        Ok(report(matches, &grammar, &tokens))
    }
}

/// Assign a category to a word of the input.
///
/// Words that are neither names, numbers, nor quoted strings stay
/// uncategorized and can only be matched by their text.
fn classify(word: &str, categories: &Categories) -> Token {
    let first = word.chars().next().unwrap_or(' ');
    let last = word.chars().last().unwrap_or(' ');
    let name = if (first.is_alphabetic() || first == '_')
        && word.chars().all(|c| c.is_alphanumeric() || c == '_')
    {
        "NAME"
    } else if first.is_ascii_digit()
        && word.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
    {
        "NUMBER"
    } else if word.len() >= 2 && (first == '"' || first == '\'') && last == first {
        "STRING"
    } else {
        return Token::literal(word);
    };
    Token::new(word, categories.get(name))
}

fn report<T, Tok>(matches: &ArgMatches, grammar: &Grammar<T>, tokens: &[Tok]) -> bool
where
    T: Terminal<Tok> + fmt::Display,
{
    if matches.is_present("dump-grammar") {
        println!("{}", grammar);
    }
    let chart = Chart::parse(grammar, tokens);
    if matches.is_present("dump-chart") {
        println!("{}", chart);
    }
    let full = chart.full_parses().count();
    if full > 1 {
        info!("input is ambiguous, {} full parses", full);
    }
    for (column, item) in chart.partial_parses() {
        debug!("prefix of length {} recognized by {}", column, item.pretty(grammar));
    }
    let outcome = chart.outcome();
    println!("{}", outcome.pretty(grammar));
    outcome.is_full_parse()
}
