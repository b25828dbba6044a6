//! pegscope parse tracing
//!
//! Renders the rule enter/match/fail events a PEG parser emits while it runs.
//!
//! # Overview
//!
//! - [`TraceEvent`] - One parse event, deserializable from the engine's JSON
//! - [`Tracer`] - The capability every tracer implements
//! - [`LineTracer`] - One space-indented line per event
//! - [`TreeTracer`] - Box-drawing tree, whitespace rule hidden
//! - [`DetailedTreeTracer`] - Tree plus input excerpt and live variables on failure
//! - [`select_tracer`] - Tag, function or tracer to a concrete tracer
//!
//! # Example
//!
//! ```
//! use pegscope_trace::{TraceEvent, Tracer, TreeTracer};
//!
//! let mut tracer = TreeTracer::with_writer(Vec::new());
//! tracer.trace(&TraceEvent::enter("start"));
//! tracer.trace(&TraceEvent::matched("start"));
//!
//! let output = String::from_utf8(tracer.into_inner()).unwrap();
//! assert_eq!(output, "? start\n└─> YES\n");
//! ```

pub mod detailed;
pub mod event;
pub mod line;
pub mod select;
pub mod tracer;
pub mod tree;

pub use detailed::{DetailedTreeTracer, Variables, DEFAULT_RADIUS};
pub use event::{EventKind, SourceLoc, SourceSpan, TraceEvent};
pub use line::{format_span, LineTracer};
pub use select::{select_tracer, select_tracer_with, Selected, TracerSpec};
pub use tracer::{FnTracer, NullTracer, Tracer};
pub use tree::{TreeLines, TreeTracer, WHITESPACE_RULE};
