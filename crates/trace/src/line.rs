//! Plain, space-indented trace lines.

use std::io::{self, Stdout, Write};

use common::text::{rpad, zpad};

use crate::event::{EventKind, SourceSpan, TraceEvent};
use crate::tracer::Tracer;

/// Width the `enter <rule>` label is padded to.
const LABEL_WIDTH: usize = 12;

/// Width of each zero-padded line/column number.
const POS_WIDTH: usize = 3;

/// `LLL:CCC-LLL:CCC`
pub fn format_span(span: &SourceSpan) -> String {
    format!(
        "{}:{}-{}:{}",
        zpad(span.start.line, POS_WIDTH),
        zpad(span.start.column, POS_WIDTH),
        zpad(span.end.line, POS_WIDTH),
        zpad(span.end.column, POS_WIDTH),
    )
}

/// Prints one line per event, indented two spaces per open rule.
///
/// Enter lines are printed at the current depth, which then grows; exit lines
/// shrink the depth first, so a rule's enter and exit line up.
pub struct LineTracer<W: Write = Stdout> {
    depth: usize,
    out: W,
}

impl LineTracer<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for LineTracer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> LineTracer<W> {
    pub fn with_writer(out: W) -> Self {
        Self { depth: 0, out }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Format `event` at the current depth without changing any state.
    pub fn format_line(&self, event: &TraceEvent) -> String {
        let label = format!("{} <{}>", event.kind.verb(), event.rule);
        let mut line = format!("{}{}", "  ".repeat(self.depth), rpad(&label, LABEL_WIDTH, ' '));
        if let Some(span) = &event.location {
            line.push(' ');
            line.push_str(&format_span(span));
        }
        if event.kind == EventKind::Match {
            if let Some(result) = &event.result {
                line.push(' ');
                line.push_str(&result.to_string());
            }
        }
        line.truncate(line.trim_end().len());
        line
    }
}

impl<W: Write> Tracer for LineTracer<W> {
    fn trace(&mut self, event: &TraceEvent) {
        if event.kind.is_exit() {
            self.depth = self.depth.saturating_sub(1);
        }
        let line = self.format_line(event);
        writeln!(self.out, "{}", line).ok();
        if event.kind == EventKind::Enter {
            self.depth += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SourceLoc;
    use indoc::indoc;
    use serde_json::json;

    fn run(events: &[TraceEvent]) -> String {
        let mut tracer = LineTracer::with_writer(Vec::new());
        for event in events {
            tracer.trace(event);
        }
        String::from_utf8(tracer.into_inner()).unwrap()
    }

    fn depth_of(line: &str) -> usize {
        (line.len() - line.trim_start().len()) / 2
    }

    #[test]
    fn test_depths_for_nested_rules() {
        let output = run(&[
            TraceEvent::enter("A"),
            TraceEvent::enter("B"),
            TraceEvent::matched("B"),
            TraceEvent::matched("A"),
        ]);
        let depths: Vec<usize> = output.lines().map(depth_of).collect();
        assert_eq!(depths, vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_line_format() {
        let span = SourceSpan::new(SourceLoc::new(0, 1, 1), SourceLoc::new(3, 1, 4));
        let output = run(&[
            TraceEvent::enter("num").at(span),
            TraceEvent::enter("digit"),
            TraceEvent::failed("digit").at(span),
            TraceEvent::matched("num").at(span).with_result(json!(123)),
        ]);
        let expected = indoc! {"
            enter <num>  001:001-001:004
              enter <digit>
              fail <digit> 001:001-001:004
            match <num>  001:001-001:004 123
        "};
        assert_eq!(output, expected);
    }

    #[test]
    fn test_fail_never_prints_result() {
        let tracer = LineTracer::with_writer(Vec::new());
        let line = tracer.format_line(&TraceEvent::failed("x").with_result(json!("ignored")));
        assert_eq!(line, "fail <x>");
    }

    #[test]
    fn test_depth_never_negative() {
        let mut tracer = LineTracer::with_writer(io::sink());
        tracer.trace(&TraceEvent::matched("stray"));
        assert_eq!(tracer.depth(), 0);
        tracer.trace(&TraceEvent::enter("a"));
        assert_eq!(tracer.depth(), 1);
    }

    #[test]
    fn test_format_span() {
        let span = SourceSpan::new(SourceLoc::new(0, 12, 7), SourceLoc::new(0, 1000, 2));
        assert_eq!(format_span(&span), "012:007-1000:002");
    }
}
