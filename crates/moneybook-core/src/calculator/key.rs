use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }
}

/// One press on the amount keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Digit(u8),
    DoubleZero,
    DecimalPoint,
    Backspace,
    Clear,
    Operator(Operator),
    Equals,
}

impl Key {
    pub fn label(&self) -> String {
        match self {
            Key::Digit(d) => d.to_string(),
            Key::DoubleZero => "00".into(),
            Key::DecimalPoint => ".".into(),
            Key::Backspace => "<-".into(),
            Key::Clear => "AC".into(),
            Key::Operator(op) => op.symbol().into(),
            Key::Equals => "=".into(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Key {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim() {
            "00" => Key::DoubleZero,
            "." | "," => Key::DecimalPoint,
            "<-" | "->" | "back" => Key::Backspace,
            "AC" | "ac" | "C" | "c" => Key::Clear,
            "+" => Key::Operator(Operator::Add),
            "-" => Key::Operator(Operator::Subtract),
            "*" | "x" | "X" | "×" => Key::Operator(Operator::Multiply),
            "/" | "÷" => Key::Operator(Operator::Divide),
            "=" => Key::Equals,
            other => match other.parse::<u8>() {
                Ok(d) if d <= 9 && other.len() == 1 => Key::Digit(d),
                _ => return Err(CoreError::InvalidKey(other.to_string())),
            },
        };
        Ok(key)
    }
}

const MULTI_CHAR_LABELS: [&str; 4] = ["AC", "ac", "<-", "->"];

/// Tokenizes a key string such as `"12+8*2="` or `"1 2 . 5 0 <-"`.
///
/// Whitespace-separated chunks that are a whole label (`00`, `AC`) map to that
/// key; anything else is read one key at a time, so `"100"` is three digits.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, CoreError> {
    let mut keys = Vec::new();
    for chunk in input.split_whitespace() {
        if chunk.chars().count() > 1 {
            if let Ok(key) = chunk.parse::<Key>() {
                keys.push(key);
                continue;
            }
        }

        let mut rest = chunk;
        while !rest.is_empty() {
            if let Some(label) = MULTI_CHAR_LABELS.iter().find(|l| rest.starts_with(**l)) {
                keys.push(label.parse()?);
                rest = &rest[label.len()..];
                continue;
            }
            let mut chars = rest.chars();
            let Some(c) = chars.next() else {
                break;
            };
            keys.push(c.to_string().parse()?);
            rest = chars.as_str();
        }
    }
    Ok(keys)
}
