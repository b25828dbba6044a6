//! Parse events as reported by the parse engine.

use serde::{Deserialize, Serialize};

/// Event type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "rule.enter")]
    Enter,
    #[serde(rename = "rule.match")]
    Match,
    #[serde(rename = "rule.fail")]
    Fail,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Enter => "rule.enter",
            EventKind::Match => "rule.match",
            EventKind::Fail => "rule.fail",
        }
    }

    /// The part after `rule.`
    pub fn verb(self) -> &'static str {
        match self {
            EventKind::Enter => "enter",
            EventKind::Match => "match",
            EventKind::Fail => "fail",
        }
    }

    /// `true` for events that close a rule opened by [`EventKind::Enter`].
    pub fn is_exit(self) -> bool {
        !matches!(self, EventKind::Enter)
    }
}

/// A position in the parsed input. Line and column are 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLoc {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl SourceLoc {
    pub fn new(offset: u32, line: u32, column: u32) -> Self {
        Self { offset, line, column }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLoc,
    pub end: SourceLoc,
}

impl SourceSpan {
    pub fn new(start: SourceLoc, end: SourceLoc) -> Self {
        Self { start, end }
    }
}

/// One parse event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceSpan>,
    /// Value produced by a successful match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl TraceEvent {
    pub fn new(kind: EventKind, rule: impl Into<String>) -> Self {
        Self { kind, rule: rule.into(), location: None, result: None }
    }

    pub fn enter(rule: impl Into<String>) -> Self {
        Self::new(EventKind::Enter, rule)
    }

    pub fn matched(rule: impl Into<String>) -> Self {
        Self::new(EventKind::Match, rule)
    }

    pub fn failed(rule: impl Into<String>) -> Self {
        Self::new(EventKind::Fail, rule)
    }

    pub fn at(mut self, span: SourceSpan) -> Self {
        self.location = Some(span);
        self
    }

    pub fn with_result(mut self, result: serde_json::Value) -> Self {
        self.result = Some(result);
        self
    }
}
