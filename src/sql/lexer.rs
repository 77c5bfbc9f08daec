// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! SQL tokeniser.
//!
//! Single pass over the input bytes. Keywords are recognised
//! case-insensitively out of the identifier rule, mirroring the reserved
//! word table of the grammar.

use crate::error::{ReedError, ReedResult};
use std::fmt;

/// One lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords (case-insensitive in the input)
    Create,
    Table,
    Insert,
    Into,
    Values,
    Select,
    From,
    Update,
    Set,
    Where,
    Delete,

    /// `[A-Za-z_][A-Za-z0-9_]*` that is not a keyword.
    Identifier(String),

    /// Single-quoted string, quotes stripped, no escapes.
    StringLiteral(String),

    /// Unsigned integer literal.
    Number(i64),

    Comma,
    LParen,
    RParen,
    Equals,
    Star,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "CREATE"),
            Self::Table => write!(f, "TABLE"),
            Self::Insert => write!(f, "INSERT"),
            Self::Into => write!(f, "INTO"),
            Self::Values => write!(f, "VALUES"),
            Self::Select => write!(f, "SELECT"),
            Self::From => write!(f, "FROM"),
            Self::Update => write!(f, "UPDATE"),
            Self::Set => write!(f, "SET"),
            Self::Where => write!(f, "WHERE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Identifier(name) => write!(f, "{}", name),
            Self::StringLiteral(text) => write!(f, "'{}'", text),
            Self::Number(n) => write!(f, "{}", n),
            Self::Comma => write!(f, ","),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Equals => write!(f, "="),
            Self::Star => write!(f, "*"),
        }
    }
}

/// Map an identifier spelling onto its keyword token, if any.
fn keyword(word: &str) -> Option<Token> {
    match word.to_ascii_lowercase().as_str() {
        "create" => Some(Token::Create),
        "table" => Some(Token::Table),
        "insert" => Some(Token::Insert),
        "into" => Some(Token::Into),
        "values" => Some(Token::Values),
        "select" => Some(Token::Select),
        "from" => Some(Token::From),
        "update" => Some(Token::Update),
        "set" => Some(Token::Set),
        "where" => Some(Token::Where),
        "delete" => Some(Token::Delete),
        _ => None,
    }
}

/// Tokenise one statement.
///
/// ## Output
/// - `Ok(Vec<Token>)`: token sequence, whitespace dropped
/// - `Err(ReedError::Syntax)`: illegal character, unterminated string or
///   out-of-range integer literal, with the position in the input
pub fn tokenize(input: &str) -> ReedResult<Vec<Token>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let ch = bytes[pos];

        if ch.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        match ch {
            b',' => {
                tokens.push(Token::Comma);
                pos += 1;
            }
            b'(' => {
                tokens.push(Token::LParen);
                pos += 1;
            }
            b')' => {
                tokens.push(Token::RParen);
                pos += 1;
            }
            b'=' => {
                tokens.push(Token::Equals);
                pos += 1;
            }
            b'*' => {
                tokens.push(Token::Star);
                pos += 1;
            }
            b'\'' => {
                let start = pos + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end] != b'\'' {
                    end += 1;
                }
                if end == bytes.len() {
                    return Err(ReedError::Syntax {
                        reason: format!("unterminated string literal at position {}", pos),
                    });
                }
                tokens.push(Token::StringLiteral(input[start..end].to_string()));
                pos = end + 1;
            }
            b'0'..=b'9' => {
                let start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
                let text = &input[start..pos];
                let number = text.parse::<i64>().map_err(|_| ReedError::Syntax {
                    reason: format!("integer literal '{}' out of range", text),
                })?;
                tokens.push(Token::Number(number));
            }
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => {
                let start = pos;
                while pos < bytes.len()
                    && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_')
                {
                    pos += 1;
                }
                let word = &input[start..pos];
                match keyword(word) {
                    Some(token) => tokens.push(token),
                    None => tokens.push(Token::Identifier(word.to_string())),
                }
            }
            _ => {
                return Err(ReedError::Syntax {
                    reason: format!(
                        "illegal character '{}' at position {}",
                        char::from(ch),
                        pos
                    ),
                });
            }
        }
    }

    Ok(tokens)
}
