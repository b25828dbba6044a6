//! Tree tracer that also shows the input around each failure.

use std::fmt;
use std::io::{self, Stdout, Write};

use common::text::{escape, excerpt};

use crate::event::{EventKind, TraceEvent};
use crate::tracer::Tracer;
use crate::tree::TreeLines;

/// Characters of input shown on each side of a failure offset.
pub const DEFAULT_RADIUS: usize = 20;

type Accessor = Box<dyn Fn() -> serde_json::Value>;

/// Named live values, read each time a failure is traced.
#[derive(Default)]
pub struct Variables {
    vars: Vec<(String, Accessor)>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn() -> serde_json::Value + 'static,
    {
        self.vars.push((name.into(), Box::new(accessor)));
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// ` (a = 1,b = "x")`, or empty when there are no variables.
    pub fn render(&self) -> String {
        if self.vars.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = self
            .vars
            .iter()
            .map(|(name, accessor)| format!("{} = {}", name, accessor()))
            .collect();
        format!(" ({})", parts.join(","))
    }
}

impl fmt::Debug for Variables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.vars.iter().map(|(name, _)| name)).finish()
    }
}

/// [`TreeTracer`](crate::TreeTracer) output plus, after each failure, an
/// escaped excerpt of the input and the current variable values.
pub struct DetailedTreeTracer<W: Write = Stdout> {
    tree: TreeLines,
    input: String,
    vars: Variables,
    radius: usize,
    out: W,
}

impl DetailedTreeTracer<Stdout> {
    pub fn new(input: impl Into<String>, vars: Variables) -> Self {
        Self::with_writer(input, vars, io::stdout())
    }
}

impl<W: Write> DetailedTreeTracer<W> {
    pub fn with_writer(input: impl Into<String>, vars: Variables, out: W) -> Self {
        Self {
            tree: TreeLines::new(),
            input: input.into(),
            vars,
            radius: DEFAULT_RADIUS,
            out,
        }
    }

    pub fn radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    pub fn whitespace_rule(mut self, name: impl Into<String>) -> Self {
        self.tree = TreeLines::with_whitespace_rule(name);
        self
    }

    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Advance state for `event` and return every line it produces.
    pub fn lines(&mut self, event: &TraceEvent) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(line) = self.tree.step(event) {
            lines.push(line);
            if event.kind == EventKind::Fail {
                lines.extend(self.failure_context(event));
            }
        }
        lines
    }

    fn failure_context(&self, event: &TraceEvent) -> Option<String> {
        if self.input.is_empty() {
            return None;
        }
        let shown = match &event.location {
            Some(span) => excerpt(&self.input, span.start.offset as usize, self.radius),
            None => escape(&self.input),
        };
        Some(format!("{}{}", shown, self.vars.render()))
    }
}

impl<W: Write> Tracer for DetailedTreeTracer<W> {
    fn trace(&mut self, event: &TraceEvent) {
        for line in self.lines(event) {
            writeln!(self.out, "{}", line).ok();
        }
    }
}
