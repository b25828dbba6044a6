//! Picking a tracer from a caller-supplied option.

use std::fmt;
use std::io::{self, Stdout, Write};

use common::debug::create_logger;
use common::log;

use crate::detailed::{DetailedTreeTracer, Variables};
use crate::event::TraceEvent;
use crate::line::LineTracer;
use crate::tracer::{FnTracer, NullTracer, Tracer};

/// What the caller asked for.
pub enum TracerSpec {
    /// `default`, `detailed` or `peggy`. Other tags select nothing.
    Tag(String),
    Custom(Box<dyn Tracer>),
    Function(Box<dyn FnMut(&TraceEvent)>),
}

impl From<&str> for TracerSpec {
    fn from(tag: &str) -> Self {
        TracerSpec::Tag(tag.to_string())
    }
}

impl From<String> for TracerSpec {
    fn from(tag: String) -> Self {
        TracerSpec::Tag(tag)
    }
}

impl fmt::Debug for TracerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TracerSpec::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            TracerSpec::Custom(_) => f.write_str("Custom(..)"),
            TracerSpec::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// The tracer that was picked.
pub enum Selected<W: Write = Stdout> {
    Null(NullTracer),
    Line(LineTracer<W>),
    Detailed(DetailedTreeTracer<W>),
    Custom(Box<dyn Tracer>),
    /// The host parser should use its own built-in tracer. Traces nothing here.
    HostBuiltin,
}

impl<W: Write> Selected<W> {
    pub fn is_host_builtin(&self) -> bool {
        matches!(self, Selected::HostBuiltin)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Selected::Null(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Selected::Null(_) => "null",
            Selected::Line(_) => "line",
            Selected::Detailed(_) => "detailed",
            Selected::Custom(_) => "custom",
            Selected::HostBuiltin => "host",
        }
    }
}

impl<W: Write> Tracer for Selected<W> {
    fn trace(&mut self, event: &TraceEvent) {
        match self {
            Selected::Null(tracer) => tracer.trace(event),
            Selected::Line(tracer) => tracer.trace(event),
            Selected::Detailed(tracer) => tracer.trace(event),
            Selected::Custom(tracer) => tracer.trace(event),
            Selected::HostBuiltin => {}
        }
    }
}

/// [`select_tracer_with`] writing to stdout.
pub fn select_tracer(spec: Option<TracerSpec>, input: &str, vars: Variables) -> Selected<Stdout> {
    select_tracer_with(spec, input, vars, io::stdout())
}

/// Map `spec` to a tracer. `input` and `vars` only matter for `detailed`.
pub fn select_tracer_with<W: Write>(
    spec: Option<TracerSpec>,
    input: &str,
    vars: Variables,
    out: W,
) -> Selected<W> {
    let logger = create_logger("tracer");
    let selected = match spec {
        None => Selected::Null(NullTracer),
        Some(TracerSpec::Custom(tracer)) => Selected::Custom(tracer),
        Some(TracerSpec::Function(f)) => Selected::Custom(Box::new(FnTracer(f))),
        Some(TracerSpec::Tag(tag)) => match tag.as_str() {
            "default" => Selected::Line(LineTracer::with_writer(out)),
            "detailed" => Selected::Detailed(DetailedTreeTracer::with_writer(input, vars, out)),
            "peggy" => Selected::HostBuiltin,
            other => {
                log!(logger, "unknown tracer tag {:?}, tracing disabled", other);
                Selected::Null(NullTracer)
            }
        },
    };
    log!(logger, "selected {} tracer", selected.kind());
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn select(spec: Option<TracerSpec>) -> Selected<Vec<u8>> {
        select_tracer_with(spec, "ab", Variables::new(), Vec::new())
    }

    #[test]
    fn test_tags() {
        assert!(matches!(select(Some("default".into())), Selected::Line(_)));
        assert!(matches!(select(Some("detailed".into())), Selected::Detailed(_)));
        assert!(select(Some("peggy".into())).is_host_builtin());
        assert!(select(Some("verbose".into())).is_null());
        assert!(select(Some(String::new().into())).is_null());
        assert!(select(None).is_null());
    }

    #[test]
    fn test_default_tag_writes_lines() {
        let mut tracer = select(Some("default".into()));
        tracer.trace(&TraceEvent::enter("a"));
        tracer.trace(&TraceEvent::matched("a").with_result(json!(1)));
        match tracer {
            Selected::Line(line) => {
                let output = String::from_utf8(line.into_inner()).unwrap();
                assert_eq!(output, "enter <a>\nmatch <a> 1\n");
            }
            _ => panic!("expected a line tracer"),
        }
    }

    #[test]
    fn test_detailed_tag_gets_input() {
        let vars = Variables::new().with("n", || json!(0));
        let mut tracer = select_tracer_with(Some("detailed".into()), "xy", vars, Vec::new());
        tracer.trace(&TraceEvent::enter("a"));
        tracer.trace(&TraceEvent::failed("a"));
        match tracer {
            Selected::Detailed(detailed) => {
                let output = String::from_utf8(detailed.into_inner()).unwrap();
                assert_eq!(output, "? a\n└─> NO\nxy (n = 0)\n");
            }
            _ => panic!("expected a detailed tracer"),
        }
    }

    #[test]
    fn test_function_is_wrapped() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let spec = TracerSpec::Function(Box::new(move |event: &TraceEvent| {
            sink.borrow_mut().push(event.kind.as_str());
        }));
        let mut tracer = select(Some(spec));
        assert_eq!(tracer.kind(), "custom");
        tracer.trace(&TraceEvent::enter("a"));
        tracer.trace(&TraceEvent::failed("a"));
        assert_eq!(*seen.borrow(), vec!["rule.enter", "rule.fail"]);
    }

    #[test]
    fn test_custom_tracer_passes_through() {
        struct Counter(Rc<RefCell<usize>>);
        impl Tracer for Counter {
            fn trace(&mut self, _event: &TraceEvent) {
                *self.0.borrow_mut() += 1;
            }
        }

        let count = Rc::new(RefCell::new(0));
        let mut tracer = select(Some(TracerSpec::Custom(Box::new(Counter(Rc::clone(&count))))));
        tracer.trace(&TraceEvent::enter("a"));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_host_builtin_traces_nothing() {
        let mut tracer = select(Some("peggy".into()));
        tracer.trace(&TraceEvent::enter("a"));
        assert_eq!(tracer.kind(), "host");
        assert_eq!(format!("{:?}", TracerSpec::from("peggy")), "Tag(\"peggy\")");
    }
}
