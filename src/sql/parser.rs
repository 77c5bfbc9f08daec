// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent parser.
//!
//! Consumes the token sequence produced by the lexer and builds one
//! [`Statement`]. The grammar is ambiguity-free, so a single token of
//! lookahead suffices and no backtracking happens.

use crate::error::{ReedError, ReedResult};
use crate::sql::ast::{Literal, SelectList, SetClause, Statement, WhereClause};
use crate::sql::lexer::{tokenize, Token};

/// Parse one SQL statement.
///
/// ## Input
/// - `input`: statement text
///
/// ## Output
/// - `Ok(Statement)`: parsed statement value
/// - `Err(ReedError::Syntax)`: tokeniser or grammar rejection carrying
///   the offending token text or position
///
/// ## Example
/// ```
/// use reedsql::sql::parse;
///
/// let statement = parse("SELECT * FROM users")?;
/// # Ok::<(), reedsql::ReedError>(())
/// ```
pub fn parse(input: &str) -> ReedResult<Statement> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let statement = parser.parse_statement()?;

    // The grammar covers whole statements only; trailing tokens are an
    // error, not a second statement
    if let Some(token) = parser.peek() {
        return Err(ReedError::Syntax {
            reason: format!("unexpected trailing token '{}'", token),
        });
    }
    Ok(statement)
}

/// Parser state over the token sequence.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn parse_statement(&mut self) -> ReedResult<Statement> {
        match self.peek() {
            Some(Token::Create) => self.parse_create(),
            Some(Token::Insert) => self.parse_insert(),
            Some(Token::Select) => self.parse_select(),
            Some(Token::Update) => self.parse_update(),
            Some(Token::Delete) => self.parse_delete(),
            Some(token) => Err(ReedError::Syntax {
                reason: format!("at '{}'", token),
            }),
            None => Err(ReedError::Syntax {
                reason: "empty statement".to_string(),
            }),
        }
    }

    /// `CREATE TABLE id "(" id {"," id} ")"`
    fn parse_create(&mut self) -> ReedResult<Statement> {
        self.expect(Token::Create)?;
        self.expect(Token::Table)?;
        let table = self.identifier()?;
        self.expect(Token::LParen)?;
        let columns = self.identifier_list()?;
        self.expect(Token::RParen)?;
        Ok(Statement::CreateTable { table, columns })
    }

    /// `INSERT INTO id VALUES "(" value {"," value} ")"`
    fn parse_insert(&mut self) -> ReedResult<Statement> {
        self.expect(Token::Insert)?;
        self.expect(Token::Into)?;
        let table = self.identifier()?;
        self.expect(Token::Values)?;
        self.expect(Token::LParen)?;
        let mut values = vec![self.value()?];
        while self.eat(&Token::Comma) {
            values.push(self.value()?);
        }
        self.expect(Token::RParen)?;
        Ok(Statement::Insert { table, values })
    }

    /// `SELECT select_list FROM id`
    fn parse_select(&mut self) -> ReedResult<Statement> {
        self.expect(Token::Select)?;
        let columns = if self.eat(&Token::Star) {
            SelectList::All
        } else {
            SelectList::Columns(self.identifier_list()?)
        };
        self.expect(Token::From)?;
        let table = self.identifier()?;
        Ok(Statement::Select { table, columns })
    }

    /// `UPDATE id SET set_clause where_clause`
    fn parse_update(&mut self) -> ReedResult<Statement> {
        self.expect(Token::Update)?;
        let table = self.identifier()?;
        self.expect(Token::Set)?;
        let column = self.identifier()?;
        self.expect(Token::Equals)?;
        let value = self.value()?;
        let set = SetClause { column, value };
        let filter = self.where_clause()?;
        Ok(Statement::Update { table, set, filter })
    }

    /// `DELETE FROM id where_clause`
    fn parse_delete(&mut self) -> ReedResult<Statement> {
        self.expect(Token::Delete)?;
        self.expect(Token::From)?;
        let table = self.identifier()?;
        let filter = self.where_clause()?;
        Ok(Statement::Delete { table, filter })
    }

    /// `WHERE id "=" value`
    fn where_clause(&mut self) -> ReedResult<WhereClause> {
        self.expect(Token::Where)?;
        let column = self.identifier()?;
        self.expect(Token::Equals)?;
        let value = self.value()?;
        Ok(WhereClause { column, value })
    }

    /// `id {"," id}`
    fn identifier_list(&mut self) -> ReedResult<Vec<String>> {
        let mut names = vec![self.identifier()?];
        while self.eat(&Token::Comma) {
            names.push(self.identifier()?);
        }
        Ok(names)
    }

    /// `string_literal | integer_literal`
    fn value(&mut self) -> ReedResult<Literal> {
        match self.next() {
            Some(Token::Number(n)) => Ok(Literal::Number(n)),
            Some(Token::StringLiteral(s)) => Ok(Literal::String(s)),
            Some(token) => Err(ReedError::Syntax {
                reason: format!("expected a value, found '{}'", token),
            }),
            None => Err(ReedError::Syntax {
                reason: "expected a value, found end of statement".to_string(),
            }),
        }
    }

    fn identifier(&mut self) -> ReedResult<String> {
        match self.next() {
            Some(Token::Identifier(name)) => Ok(name),
            Some(token) => Err(ReedError::Syntax {
                reason: format!("expected an identifier, found '{}'", token),
            }),
            None => Err(ReedError::Syntax {
                reason: "expected an identifier, found end of statement".to_string(),
            }),
        }
    }

    /// Consume the next token, requiring it to equal `expected`.
    fn expect(&mut self, expected: Token) -> ReedResult<()> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(ReedError::Syntax {
                reason: format!("expected '{}', found '{}'", expected, token),
            }),
            None => Err(ReedError::Syntax {
                reason: format!("expected '{}', found end of statement", expected),
            }),
        }
    }

    /// Consume the next token if it equals `wanted`.
    fn eat(&mut self, wanted: &Token) -> bool {
        if self.peek() == Some(wanted) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }
}
