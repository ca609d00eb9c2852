//! Deferred expression nodes

use std::fmt;

use tracing::trace;

use crate::expr::{CompiledExpr, Value};
use crate::provider::Provider;

/// One compiled expression bound to one live input provider
///
/// Created during document resolution and living as long as the surrounding
/// tree. Every `evaluate` call draws a fresh [`crate::Sample`] from the
/// provider and runs the expression against it; nothing is cached between
/// calls, so the result always reflects the provider's current state.
pub struct DeferredExpression {
    selector: String,
    expr: CompiledExpr,
    provider: Box<dyn Provider>,
}

impl DeferredExpression {
    pub(crate) fn new(selector: String, expr: CompiledExpr, provider: Box<dyn Provider>) -> Self {
        Self { selector, expr, provider }
    }

    /// Selector this node was bound with, for diagnostics
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Sample the provider and evaluate. Infallible once resolved; numeric
    /// edge cases follow IEEE-754. Holds no mutable state, so it is
    /// reentrant whenever the provider's own `sample()` is thread-safe.
    pub fn evaluate(&self) -> Value {
        let sample = self.provider.sample();
        let value = self.expr.evaluate(&sample);
        trace!(selector = %self.selector, ?value, "evaluated deferred expression");
        value
    }
}

impl fmt::Debug for DeferredExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredExpression")
            .field("selector", &self.selector)
            .field("expr", &self.expr)
            .finish_non_exhaustive()
    }
}
