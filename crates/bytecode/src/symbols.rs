//! Symbol tables and argument resolution.
//!
//! The tables come from the grammar compiler and are supplied once, before any
//! decoding. Every lookup that can miss falls back to a placeholder so a
//! listing can always be produced.

use std::fmt;
use std::str::FromStr;

use common::text::escape;
use serde::{Deserialize, Serialize};

use crate::instruction::ArgKind;

/// Placeholder shown for character classes and class expectations.
pub const CLASS_PLACEHOLDER: &str = "[..]";

/// What a failing match expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectationKind {
    Literal,
    Class,
    Any,
}

impl ExpectationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpectationKind::Literal => "literal",
            ExpectationKind::Class => "class",
            ExpectationKind::Any => "any",
        }
    }
}

/// An expectation kind outside `literal`, `class` and `any`.
///
/// The expectation pool is machine-generated, so this means the compiler that
/// produced it is broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownExpectationKind(pub String);

impl fmt::Display for UnknownExpectationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown expectation type: {}", self.0)
    }
}

impl std::error::Error for UnknownExpectationKind {}

impl FromStr for ExpectationKind {
    type Err = UnknownExpectationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "literal" => Ok(ExpectationKind::Literal),
            "class" => Ok(ExpectationKind::Class),
            "any" => Ok(ExpectationKind::Any),
            other => Err(UnknownExpectationKind(other.to_string())),
        }
    }
}

/// One entry of the expectation pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    #[serde(rename = "type")]
    pub kind: ExpectationKind,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl Expectation {
    pub fn literal(value: impl Into<String>) -> Self {
        Self { kind: ExpectationKind::Literal, value: serde_json::Value::String(value.into()) }
    }

    pub fn class() -> Self {
        Self { kind: ExpectationKind::Class, value: serde_json::Value::Null }
    }

    pub fn any() -> Self {
        Self { kind: ExpectationKind::Any, value: serde_json::Value::Null }
    }

    /// Build from a textual kind, rejecting anything unknown.
    pub fn new(kind: &str, value: serde_json::Value) -> Result<Self, UnknownExpectationKind> {
        Ok(Self { kind: kind.parse()?, value })
    }

    fn display(&self) -> String {
        match self.kind {
            ExpectationKind::Literal => {
                let text = match &self.value {
                    serde_json::Value::String(s) => escape(s),
                    other => other.to_string(),
                };
                format!("\"{}\"", text)
            }
            ExpectationKind::Class => CLASS_PLACEHOLDER.to_string(),
            ExpectationKind::Any => ".".to_string(),
        }
    }
}

/// Rule names, literal pool and expectation pool of one compiled grammar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTables {
    pub rules: Vec<String>,
    pub literals: Vec<String>,
    pub expectations: Vec<Expectation>,
}

impl SymbolTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules = rules.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_literals<I, S>(mut self, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.literals = literals.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_expectations(mut self, expectations: Vec<Expectation>) -> Self {
        self.expectations = expectations;
        self
    }
}

/// Turns raw argument cells into display text.
#[derive(Debug, Clone, Default)]
pub struct SymbolResolver {
    symbols: SymbolTables,
    detailed: bool,
}

impl SymbolResolver {
    /// `detailed` prefixes every resolved argument with its raw value.
    pub fn new(symbols: SymbolTables, detailed: bool) -> Self {
        Self { symbols, detailed }
    }

    pub fn symbols(&self) -> &SymbolTables {
        &self.symbols
    }

    pub fn is_detailed(&self) -> bool {
        self.detailed
    }

    /// Resolve `value` according to `kind`. Never fails.
    pub fn resolve(&self, value: u32, kind: ArgKind) -> String {
        let idx = value as usize;
        let text = match kind {
            ArgKind::Number => value.to_string(),
            ArgKind::Rule => match self.symbols.rules.get(idx) {
                Some(name) => format!("<{}>", name),
                None => format!("<#{}>", value),
            },
            ArgKind::Literal => match self.symbols.literals.get(idx) {
                Some(lit) => format!("'{}'", escape(lit)),
                None => format!("<literal #{}>", value),
            },
            ArgKind::Expectation => match self.symbols.expectations.get(idx) {
                Some(expectation) => expectation.display(),
                None => format!("<expectation #{}>", value),
            },
            ArgKind::Class => format!("{}#{}", CLASS_PLACEHOLDER, value),
        };

        if self.detailed {
            format!("({}) {}", value, text)
        } else {
            text
        }
    }
}
