// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Cell values and literal coercion.
//!
//! Keys and cells share one tagged value type over integers, floats and
//! strings. Equality is class-strict: `Int(1)`, `Float(1.0)` and
//! `Str("1")` are three different values. Ordering is natural within a
//! class and falls back to class rank across classes, which keeps `Ord`
//! total; within one table all keys are expected to be of the same class
//! (the caller's responsibility).
//!
//! Coercion is shared by INSERT values, SET values and WHERE literals:
//! integer literals stay integers, and string literals are put through
//! `f64` parsing - the only road a float can take into the store, since
//! the grammar has no float literals.

use crate::sql::Literal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One cell value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Coerce a statement literal into a stored value.
    ///
    /// ## Rules
    /// - `Literal::Number` → `Int`
    /// - `Literal::String` that parses as `f64` → `Float`
    /// - any other `Literal::String` → `Str`
    ///
    /// Note the asymmetry this creates: `'1'` coerces to `Float(1.0)`,
    /// which never equals the integer `1`.
    pub fn coerce(literal: &Literal) -> Value {
        match literal {
            Literal::Number(n) => Value::Int(*n),
            Literal::String(s) => match s.parse::<f64>() {
                Ok(f) => Value::Float(f),
                Err(_) => Value::Str(s.clone()),
            },
        }
    }

    /// Rank used to order values of different classes.
    fn class_rank(&self) -> u8 {
        match self {
            Value::Int(_) => 0,
            Value::Float(_) => 1,
            Value::Str(_) => 2,
        }
    }

    /// Render as a JSON value for the HTTP result surface.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
            Value::Str(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            _ => self.class_rank().cmp(&other.class_rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}
