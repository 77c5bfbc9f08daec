// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Unit tests for the tokeniser.

use crate::error::ReedError;
use crate::sql::lexer::{tokenize, Token};

#[test]
fn test_tokenize_punctuation_and_keywords() {
    let tokens = tokenize("CREATE TABLE users (id, name)").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Create,
            Token::Table,
            Token::Identifier("users".to_string()),
            Token::LParen,
            Token::Identifier("id".to_string()),
            Token::Comma,
            Token::Identifier("name".to_string()),
            Token::RParen,
        ]
    );
}

#[test]
fn test_keywords_are_case_insensitive() {
    let tokens = tokenize("select * from Users").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Select,
            Token::Star,
            Token::From,
            Token::Identifier("Users".to_string()),
        ]
    );
}

#[test]
fn test_string_literal_strips_quotes() {
    let tokens = tokenize("'Alice in Wonderland'").unwrap();
    assert_eq!(
        tokens,
        vec![Token::StringLiteral("Alice in Wonderland".to_string())]
    );
}

#[test]
fn test_empty_string_literal() {
    assert_eq!(
        tokenize("''").unwrap(),
        vec![Token::StringLiteral(String::new())]
    );
}

#[test]
fn test_number_literal() {
    assert_eq!(tokenize("42").unwrap(), vec![Token::Number(42)]);
}

#[test]
fn test_newlines_are_skipped() {
    let tokens = tokenize("SELECT *\nFROM users\n").unwrap();
    assert_eq!(tokens.len(), 4);
}

#[test]
fn test_identifier_with_underscore() {
    let tokens = tokenize("_user_name2").unwrap();
    assert_eq!(
        tokens,
        vec![Token::Identifier("_user_name2".to_string())]
    );
}

#[test]
fn test_illegal_character_is_rejected() {
    match tokenize("SELECT * FROM users;") {
        Err(ReedError::Syntax { reason }) => {
            assert!(reason.contains("illegal character ';'"), "{}", reason);
        }
        other => panic!("Expected Syntax error, got {:?}", other),
    }
}

#[test]
fn test_unterminated_string_is_rejected() {
    match tokenize("INSERT INTO t VALUES ('oops)") {
        Err(ReedError::Syntax { reason }) => {
            assert!(reason.contains("unterminated string"), "{}", reason);
        }
        other => panic!("Expected Syntax error, got {:?}", other),
    }
}

#[test]
fn test_out_of_range_integer_is_rejected() {
    assert!(matches!(
        tokenize("99999999999999999999999999"),
        Err(ReedError::Syntax { .. })
    ));
}

#[test]
fn test_no_float_literals_in_grammar() {
    // "1.5" lexes as a number followed by an illegal '.'
    assert!(matches!(tokenize("1.5"), Err(ReedError::Syntax { .. })));
}
