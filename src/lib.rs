//! Livetag - live-input expression bindings for tagged YAML documents
//!
//! A document author tags scalar values with a provider selector
//! (`!<selector> "<expression>"`). Resolution replaces each tagged scalar
//! with a [`DeferredExpression`] bound to the provider the host registered
//! for that selector; every later evaluation samples the provider's current
//! state and recomputes the value.
//!
//! ```
//! use livetag::{MockProvider, Provider, Resolver, Sample, Value};
//!
//! let pad = MockProvider::with_state(Sample::new().with_axis(0, 0.5));
//! let handle = pad.clone();
//! let resolver = Resolver::new(move |selector| {
//!     (selector == "7").then(|| Box::new(pad.clone()) as Box<dyn Provider>)
//! });
//!
//! let tree = resolver.resolve("gain: !7 'axis[0] * 2'").unwrap();
//! let gain = tree.get("gain").unwrap().as_deferred().unwrap();
//! assert_eq!(gain.evaluate(), Value::Number(1.0));
//!
//! handle.set_state(Sample::new().with_axis(0, -0.5));
//! assert_eq!(gain.evaluate(), Value::Number(-1.0));
//! ```

pub mod deferred;
pub mod document;
pub mod error;
pub mod expr;
pub mod provider;
pub mod resolver;
pub mod sample;

pub use deferred::DeferredExpression;
pub use document::{dump_str, Node};
pub use error::{FixSuggestion, LivetagError};
pub use expr::{compile, CompiledExpr, ExprError, Value};
pub use provider::{MockProvider, Provider};
pub use resolver::{ProviderLookup, Resolver};
pub use sample::Sample;
