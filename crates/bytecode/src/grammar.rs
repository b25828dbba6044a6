//! Loading a compiled grammar from its JSON form.
//!
//! The compiler output carries the bytecode of each rule next to the pools the
//! bytecode indexes into:
//!
//! ```json
//! {
//!   "rules": [{ "name": "start", "bytecode": [27, 1] }],
//!   "literals": ["if"],
//!   "expectations": [{ "type": "literal", "value": "if" }]
//! }
//! ```
//!
//! Unknown fields are ignored, so a full compiler AST can be fed in as is.

use std::fmt;
use std::io::Read;

use serde::Deserialize;

use crate::disasm::{DisasmOptions, Disassembler};
use crate::registry::{RegistryError, RuleRegistry};
use crate::symbols::{Expectation, SymbolTables};

/// Errors that can occur while loading a grammar
#[derive(Debug)]
pub enum GrammarError {
    /// Malformed JSON, including expectation types outside the known set
    Json(serde_json::Error),
    /// Rule table could not be built
    Registry(RegistryError),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::Json(e) => write!(f, "invalid grammar: {}", e),
            GrammarError::Registry(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GrammarError::Json(e) => Some(e),
            GrammarError::Registry(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for GrammarError {
    fn from(e: serde_json::Error) -> Self {
        GrammarError::Json(e)
    }
}

impl From<RegistryError> for GrammarError {
    fn from(e: RegistryError) -> Self {
        GrammarError::Registry(e)
    }
}

/// A compiled rule
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GrammarRule {
    pub name: String,
    #[serde(default)]
    pub bytecode: Vec<u32>,
}

/// A compiled grammar: rules plus the pools their bytecode refers to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Grammar {
    #[serde(default)]
    pub rules: Vec<GrammarRule>,
    #[serde(default)]
    pub literals: Vec<String>,
    #[serde(default)]
    pub expectations: Vec<Expectation>,
}

impl Grammar {
    pub fn from_json(text: &str) -> Result<Self, GrammarError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GrammarError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Symbol tables for this grammar; rule indices follow rule order.
    pub fn symbols(&self) -> SymbolTables {
        SymbolTables::new()
            .with_rules(self.rules.iter().map(|rule| rule.name.clone()))
            .with_literals(self.literals.iter().cloned())
            .with_expectations(self.expectations.clone())
    }

    /// Build a registry holding every rule, in grammar order.
    pub fn registry(&self, options: DisasmOptions) -> Result<RuleRegistry, GrammarError> {
        let mut registry = RuleRegistry::new(Disassembler::new(self.symbols(), options));
        for rule in &self.rules {
            registry.add(rule.name.clone(), rule.bytecode.clone())?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::ExpectationKind;
    use indoc::indoc;

    const GRAMMAR: &str = r#"{
        "type": "grammar",
        "rules": [
            { "type": "rule", "name": "start", "bytecode": [27, 1] },
            { "type": "rule", "name": "digit", "bytecode": [20, 0, 23, 0] }
        ],
        "literals": [],
        "classes": [{ "value": [["0", "9"]], "inverted": false }],
        "expectations": [{ "type": "class", "value": [["0", "9"]] }]
    }"#;

    #[test]
    fn test_load_and_render() {
        let grammar = Grammar::from_json(GRAMMAR).unwrap();
        assert_eq!(grammar.rules.len(), 2);
        assert_eq!(grammar.expectations[0].kind, ExpectationKind::Class);

        let registry = grammar.registry(DisasmOptions::default()).unwrap();
        let expected = indoc! {"
            start:
              RULE <digit>

            digit:
              MATCH_CHAR_CLASS [..]#0
              FAIL [..]"};
        assert_eq!(registry.render(), expected);
    }

    #[test]
    fn test_symbols_follow_rule_order() {
        let grammar = Grammar::from_json(GRAMMAR).unwrap();
        let symbols = grammar.symbols();
        assert_eq!(symbols.rules, vec!["start".to_string(), "digit".to_string()]);
        assert!(symbols.literals.is_empty());
    }

    #[test]
    fn test_unknown_expectation_type_is_fatal() {
        let text = r#"{ "rules": [], "expectations": [{ "type": "regex", "value": "x" }] }"#;
        let err = Grammar::from_json(text).unwrap_err();
        assert!(matches!(err, GrammarError::Json(_)));
    }

    #[test]
    fn test_duplicate_rule_in_grammar() {
        let text = r#"{ "rules": [{ "name": "a", "bytecode": [6] }, { "name": "a" }] }"#;
        let grammar = Grammar::from_json(text).unwrap();
        let err = grammar.registry(DisasmOptions::default()).err().unwrap();
        assert_eq!(err.to_string(), "rule a already defined");
    }

    #[test]
    fn test_from_reader() {
        let grammar = Grammar::from_reader(GRAMMAR.as_bytes()).unwrap();
        assert_eq!(grammar.rules[1].name, "digit");
        assert_eq!(grammar.rules[1].bytecode, vec![20, 0, 23, 0]);
    }
}
