// Copyright (c) 2018 Fabian Schuiki

//! End-to-end tests compiling grammar descriptions and parsing inputs.

use std::sync::Arc;
use std::thread;

use chartist::{
    compile, parse, Categories, CharClasses, CharSet, Chart, Error, Grammar, ParseOutcome, Rule,
    Symbol, Token,
};

const ARITHMETIC: &str = "
# Left-recursive arithmetic over single characters.
sum : sum '+-' product | product
product : product '*/' factor | factor
factor : '(' sum ')' | DIGIT+ | LETTER+
";

fn chars(input: &str) -> Vec<char> {
    input.chars().collect()
}

fn accepts(grammar: &Grammar<CharSet>, input: &str) -> bool {
    parse(grammar, &chars(input)).is_full_parse()
}

#[test]
fn balanced_parentheses() {
    let grammar = compile("s : [ '(' s ')' ]\n", &CharClasses::new()).unwrap();
    assert!(accepts(&grammar, "(())"));
    assert!(accepts(&grammar, "()"));
    assert!(accepts(&grammar, ""));
    match parse(&grammar, &chars("(()")) {
        ParseOutcome::FullParse(_) => panic!("unbalanced input fully parsed"),
        ParseOutcome::PartialParse { column, .. } => assert!(column < 3),
        ParseOutcome::NoParse => (),
    }
}

#[test]
fn balanced_parentheses_hand_built() {
    let grammar = Grammar::new(
        vec![
            Rule::new(
                "S".into(),
                vec![
                    Symbol::terminal(CharSet::from("(")),
                    Symbol::nonterminal("S"),
                    Symbol::terminal(CharSet::from(")")),
                ],
            ),
            Rule::new("S".into(), vec![]),
        ],
        "S".into(),
    ).unwrap();
    assert!(accepts(&grammar, "(())"));
    assert!(!accepts(&grammar, "(()"));
}

#[test]
fn arithmetic() {
    let grammar = compile(ARITHMETIC, &CharClasses::standard()).unwrap();
    let chart = Chart::parse(&grammar, &chars("1+2*3"));
    assert_eq!(chart.columns().len(), 6);
    match chart.outcome() {
        ParseOutcome::FullParse(item) => {
            assert_eq!(item.origin(), 0);
            assert_eq!(grammar.rule(item.rule()).head().name(), "sum");
        }
        other => panic!("expected a full parse, got {:?}", other),
    }

    assert!(accepts(&grammar, "(a+12)/x-3"));
    assert!(!accepts(&grammar, "1+"));
    assert!(!accepts(&grammar, "1 + 2"));
    match parse(&grammar, &chars("1+2)")) {
        ParseOutcome::PartialParse { column, .. } => assert_eq!(column, 3),
        other => panic!("expected a partial parse, got {:?}", other),
    }
}

#[test]
fn arithmetic_prefix() {
    let grammar = compile(ARITHMETIC, &CharClasses::standard()).unwrap();
    match parse(&grammar, &chars("12*(3")) {
        ParseOutcome::PartialParse { column, item } => {
            assert_eq!(column, 2);
            assert_eq!(grammar.rule(item.rule()).head().name(), "sum");
        }
        other => panic!("expected a partial parse, got {:?}", other),
    }
}

#[test]
fn empty_input() {
    let nullable = compile("s : ['x']\n", &CharClasses::new()).unwrap();
    match parse(&nullable, &chars("")) {
        ParseOutcome::FullParse(item) => assert_eq!(item.origin(), 0),
        other => panic!("expected a full parse, got {:?}", other),
    }

    let solid = compile("s : 'x'\n", &CharClasses::new()).unwrap();
    assert_eq!(parse(&solid, &chars("")), ParseOutcome::NoParse);
}

#[test]
fn token_categories() {
    let mut categories = Categories::new();
    let number = categories.register("NUMBER");
    let name = categories.register("NAME");
    let grammar = compile("expr : NUMBER '+' NUMBER\n", &categories).unwrap();

    let tokens = vec![
        Token::new("1", Some(number)),
        Token::literal("+"),
        Token::new("22", Some(number)),
    ];
    assert!(parse(&grammar, &tokens).is_full_parse());

    let tokens = vec![
        Token::new("1", Some(number)),
        Token::literal("+"),
        Token::new("x", Some(name)),
    ];
    assert!(!parse(&grammar, &tokens).is_full_parse());

    // Literal terminals match on text, regardless of the category.
    let tokens = vec![
        Token::new("1", Some(number)),
        Token::new("+", Some(name)),
        Token::new("2", Some(number)),
    ];
    assert!(parse(&grammar, &tokens).is_full_parse());

    // Quoted upper-case names refer to categories as well.
    let grammar = compile("expr : 'NUMBER'\n", &categories).unwrap();
    assert!(parse(&grammar, &[Token::new("42", Some(number))]).is_full_parse());
    assert!(!parse(&grammar, &[Token::literal("NUMBER")]).is_full_parse());
}

#[test]
fn plain_text_tokens() {
    let grammar = compile("greeting : 'hello' ['dear'] 'world'\n", &Categories::new()).unwrap();
    assert!(parse(&grammar, &["hello", "world"]).is_full_parse());
    assert!(parse(&grammar, &["hello", "dear", "world"]).is_full_parse());
    assert!(!parse(&grammar, &["hello", "there", "world"]).is_full_parse());
    let owned: Vec<String> = vec!["hello".into(), "world".into()];
    assert!(parse(&grammar, &owned).is_full_parse());
}

#[test]
fn repetition_desugaring() {
    let classes = CharClasses::new();
    let star = compile("s : 'a'*\n", &classes).unwrap();
    let plus = compile("s : 'a'+\n", &classes).unwrap();
    let optional = compile("s : ['a']\n", &classes).unwrap();
    let expected = [
        ("", true, false, true),
        ("a", true, true, true),
        ("aa", true, true, false),
        ("aaaa", true, true, false),
        ("ab", false, false, false),
    ];
    for &(input, s, p, o) in &expected {
        assert_eq!(accepts(&star, input), s, "{:?} against `*`", input);
        assert_eq!(accepts(&plus, input), p, "{:?} against `+`", input);
        assert_eq!(accepts(&optional, input), o, "{:?} against `[]`", input);
    }
}

#[test]
fn grouping_and_alternatives() {
    let grammar = compile(
        "list : '[' [item (',' item)*] ']'\nitem : LETTER | list\n",
        &CharClasses::standard(),
    ).unwrap();
    assert!(accepts(&grammar, "[]"));
    assert!(accepts(&grammar, "[a]"));
    assert!(accepts(&grammar, "[a,[b,c],[]]"));
    assert!(!accepts(&grammar, "[a,]"));
    assert!(!accepts(&grammar, "[,a]"));
}

#[test]
fn compilation_is_deterministic() {
    let classes = CharClasses::standard();
    let first = compile(ARITHMETIC, &classes).unwrap();
    let second = compile(ARITHMETIC, &classes).unwrap();
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(first.sorted_lines(), second.sorted_lines());
    let input = chars("(1+2)*3");
    assert_eq!(
        Chart::parse(&first, &input).to_string(),
        Chart::parse(&second, &input).to_string()
    );
}

#[test]
fn dangling_reference() {
    assert_eq!(
        compile("s : t 'x'\n", &CharClasses::new()).unwrap_err(),
        Error::MalformedGrammar {
            nonterminal: "t".into(),
        }
    );
}

#[test]
fn shared_between_threads() {
    let grammar = Arc::new(compile(ARITHMETIC, &CharClasses::standard()).unwrap());
    let inputs = vec!["1+2*3", "(a)", "1+", "x*(y-z)", ""];
    let handles: Vec<_> = inputs
        .into_iter()
        .map(|input| {
            let grammar = grammar.clone();
            thread::spawn(move || (input, accepts(&grammar, input)))
        })
        .collect();
    for handle in handles {
        let (input, accepted) = handle.join().unwrap();
        assert_eq!(accepted, input == "1+2*3" || input == "(a)" || input == "x*(y-z)");
    }
}
