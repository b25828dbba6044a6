//! Box-drawing trace trees.
//!
//! ```text
//! ? sum
//! │  ? digit
//! │  └─> "1"
//! └─> NO (at 1:2:1)
//! ```

use std::io::{self, Stdout, Write};

use crate::event::{EventKind, TraceEvent};
use crate::tracer::Tracer;

/// Default name of the whitespace rule, which is never traced.
pub const WHITESPACE_RULE: &str = "_";

const BRANCH: &str = "│  ";
const RESULT: &str = "└─>";

/// Line builder and depth counter shared by the tree tracers.
#[derive(Debug, Clone)]
pub struct TreeLines {
    depth: usize,
    whitespace_rule: String,
}

impl Default for TreeLines {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeLines {
    pub fn new() -> Self {
        Self::with_whitespace_rule(WHITESPACE_RULE)
    }

    pub fn with_whitespace_rule(name: impl Into<String>) -> Self {
        Self { depth: 0, whitespace_rule: name.into() }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn whitespace_rule(&self) -> &str {
        &self.whitespace_rule
    }

    pub fn is_ignored(&self, event: &TraceEvent) -> bool {
        event.rule == self.whitespace_rule
    }

    /// Advance the depth for `event` and return its line.
    ///
    /// Events for the whitespace rule return `None` and leave the depth alone.
    pub fn step(&mut self, event: &TraceEvent) -> Option<String> {
        if self.is_ignored(event) {
            return None;
        }
        match event.kind {
            EventKind::Enter => {
                let line = format!("{}? {}", BRANCH.repeat(self.depth), event.rule);
                self.depth += 1;
                Some(line)
            }
            EventKind::Match | EventKind::Fail => {
                self.depth = self.depth.saturating_sub(1);
                Some(format!("{}{} {}", BRANCH.repeat(self.depth), RESULT, outcome(event)))
            }
        }
    }
}

fn outcome(event: &TraceEvent) -> String {
    match event.kind {
        EventKind::Match => match &event.result {
            Some(result) => result.to_string(),
            None => "YES".to_string(),
        },
        _ => match &event.location {
            Some(span) => {
                let start = span.start;
                format!("NO (at {}:{}:{})", start.line, start.column, start.offset)
            }
            None => "NO".to_string(),
        },
    }
}

/// Prints a box-drawing tree of rule attempts.
pub struct TreeTracer<W: Write = Stdout> {
    lines: TreeLines,
    out: W,
}

impl TreeTracer<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TreeTracer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TreeTracer<W> {
    pub fn with_writer(out: W) -> Self {
        Self { lines: TreeLines::new(), out }
    }

    pub fn whitespace_rule(mut self, name: impl Into<String>) -> Self {
        self.lines = TreeLines::with_whitespace_rule(name);
        self
    }

    pub fn depth(&self) -> usize {
        self.lines.depth()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Tracer for TreeTracer<W> {
    fn trace(&mut self, event: &TraceEvent) {
        if let Some(line) = self.lines.step(event) {
            writeln!(self.out, "{}", line).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{SourceLoc, SourceSpan};
    use indoc::indoc;
    use serde_json::json;

    fn run(tracer: TreeTracer<Vec<u8>>, events: &[TraceEvent]) -> String {
        let mut tracer = tracer;
        for event in events {
            tracer.trace(event);
        }
        String::from_utf8(tracer.into_inner()).unwrap()
    }

    #[test]
    fn test_tree_output() {
        let at = SourceSpan::new(SourceLoc::new(1, 1, 2), SourceLoc::new(1, 1, 2));
        let output = run(
            TreeTracer::with_writer(Vec::new()),
            &[
                TraceEvent::enter("sum"),
                TraceEvent::enter("digit"),
                TraceEvent::matched("digit").with_result(json!("1")),
                TraceEvent::enter("plus"),
                TraceEvent::matched("plus"),
                TraceEvent::failed("sum").at(at),
            ],
        );
        let expected = indoc! {r#"
            ? sum
            │  ? digit
            │  └─> "1"
            │  ? plus
            │  └─> YES
            └─> NO (at 1:2:1)
        "#};
        assert_eq!(output, expected);
    }

    #[test]
    fn test_whitespace_rule_is_invisible() {
        let mut tracer = TreeTracer::with_writer(Vec::new());
        tracer.trace(&TraceEvent::enter("a"));
        tracer.trace(&TraceEvent::enter("_"));
        assert_eq!(tracer.depth(), 1);
        tracer.trace(&TraceEvent::failed("_"));
        tracer.trace(&TraceEvent::failed("a"));
        assert_eq!(tracer.depth(), 0);

        let output = String::from_utf8(tracer.into_inner()).unwrap();
        assert_eq!(output, "? a\n└─> NO\n");
    }

    #[test]
    fn test_custom_whitespace_rule() {
        let output = run(
            TreeTracer::with_writer(Vec::new()).whitespace_rule("ws"),
            &[TraceEvent::enter("ws"), TraceEvent::enter("_"), TraceEvent::matched("_")],
        );
        assert_eq!(output, "? _\n└─> YES\n");
    }

    #[test]
    fn test_step_without_writer() {
        let mut lines = TreeLines::new();
        assert_eq!(lines.step(&TraceEvent::enter("a")).as_deref(), Some("? a"));
        assert_eq!(lines.step(&TraceEvent::enter("b")).as_deref(), Some("│  ? b"));
        assert_eq!(lines.step(&TraceEvent::matched("b")).as_deref(), Some("│  └─> YES"));
        assert_eq!(lines.step(&TraceEvent::enter("_")), None);
        assert_eq!(lines.depth(), 1);
    }
}
