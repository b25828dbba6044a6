//! The tracer capability and its trivial implementations.

use crate::event::TraceEvent;

/// Consumer of parse events.
///
/// Tracers keep per-parse state (usually a nesting depth), so a fresh
/// instance is used for every parse. `&mut self` keeps one instance from being
/// driven by two parses at once.
pub trait Tracer {
    fn trace(&mut self, event: &TraceEvent);
}

impl<T: Tracer + ?Sized> Tracer for Box<T> {
    fn trace(&mut self, event: &TraceEvent) {
        (**self).trace(event)
    }
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn trace(&mut self, event: &TraceEvent) {
        (**self).trace(event)
    }
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullTracer;

impl Tracer for NullTracer {
    fn trace(&mut self, _event: &TraceEvent) {}
}

/// Adapts a bare function into a [`Tracer`].
pub struct FnTracer<F>(pub F);

impl<F: FnMut(&TraceEvent)> FnTracer<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F: FnMut(&TraceEvent)> Tracer for FnTracer<F> {
    fn trace(&mut self, event: &TraceEvent) {
        (self.0)(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_tracer_sees_every_event() {
        let mut seen = Vec::new();
        {
            let mut tracer = FnTracer::new(|event: &TraceEvent| seen.push(event.rule.clone()));
            tracer.trace(&TraceEvent::enter("a"));
            tracer.trace(&TraceEvent::matched("a"));
        }
        assert_eq!(seen, vec!["a", "a"]);
    }

    #[test]
    fn test_boxed_and_borrowed_tracers() {
        let mut count = 0;
        {
            let mut inner = FnTracer::new(|_: &TraceEvent| count += 1);
            let borrowed: &mut dyn Tracer = &mut inner;
            borrowed.trace(&TraceEvent::enter("x"));
            let mut boxed: Box<dyn Tracer + '_> = Box::new(borrowed);
            boxed.trace(&TraceEvent::failed("x"));
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_null_tracer() {
        let mut tracer = NullTracer;
        tracer.trace(&TraceEvent::enter("x"));
        assert_eq!(tracer, NullTracer::default());
    }
}
