//! Document tag resolver
//!
//! Parses a YAML document and replaces every tagged scalar
//! (`!<selector> "<expression>"`) with a bound [`DeferredExpression`]. The
//! provider lookup is supplied by the host at construction and is consulted
//! exactly once per tagged node, at resolution time; evaluation later
//! re-samples the provider, never the lookup.
//!
//! Any structural, compile, or binding failure aborts the whole load: a
//! malformed document fails deterministically instead of resolving halfway.

use serde_yaml::Value as Yaml;
use tracing::debug;

use crate::deferred::DeferredExpression;
use crate::document::Node;
use crate::error::LivetagError;
use crate::expr;
use crate::provider::Provider;

/// Host-supplied selector-to-provider lookup
pub type ProviderLookup = Box<dyn Fn(&str) -> Option<Box<dyn Provider>>>;

/// Resolves documents against one provider lookup
pub struct Resolver {
    lookup: ProviderLookup,
}

impl Resolver {
    pub fn new(lookup: impl Fn(&str) -> Option<Box<dyn Provider>> + 'static) -> Self {
        Self { lookup: Box::new(lookup) }
    }

    /// Parse `text` and substitute every tagged scalar with its bound
    /// expression. Untagged nodes pass through unchanged, mapping key order
    /// included.
    pub fn resolve(&self, text: &str) -> Result<Node, LivetagError> {
        let value: Yaml = serde_yaml::from_str(text)?;
        self.resolve_value(value)
    }

    fn resolve_value(&self, value: Yaml) -> Result<Node, LivetagError> {
        match value {
            Yaml::Sequence(items) => {
                let resolved = items
                    .into_iter()
                    .map(|item| self.resolve_value(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::Sequence(resolved))
            }
            Yaml::Mapping(mapping) => {
                let mut entries = Vec::with_capacity(mapping.len());
                for (key, value) in mapping {
                    entries.push((key, self.resolve_value(value)?));
                }
                Ok(Node::Mapping(entries))
            }
            Yaml::Tagged(tagged) => {
                let selector = tagged.tag.to_string().trim_start_matches('!').to_string();
                let text = scalar_text(&tagged.value).ok_or_else(|| {
                    LivetagError::TaggedNotScalar {
                        selector: selector.clone(),
                        found: describe(&tagged.value),
                    }
                })?;
                Ok(Node::Deferred(self.bind(selector, text)?))
            }
            scalar => Ok(Node::Scalar(scalar)),
        }
    }

    /// Compile the expression and bind its provider, once per tagged node
    fn bind(&self, selector: String, text: String) -> Result<DeferredExpression, LivetagError> {
        let compiled = expr::compile(&text).map_err(|source| LivetagError::Compile {
            selector: selector.clone(),
            text: text.clone(),
            source,
        })?;
        let provider = (self.lookup)(&selector).ok_or_else(|| LivetagError::NoProvider {
            selector: selector.clone(),
        })?;
        debug!(selector = %selector, expression = %text, "bound tagged expression");
        Ok(DeferredExpression::new(selector, compiled, provider))
    }
}

/// Text form of a tagged scalar. Numbers and bools are scalars too; their
/// literal text is compiled like any quoted expression.
fn scalar_text(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn describe(value: &Yaml) -> String {
    match value {
        Yaml::Null => "an empty node".to_string(),
        Yaml::Sequence(_) => "a sequence".to_string(),
        Yaml::Mapping(_) => "a mapping".to_string(),
        Yaml::Tagged(_) => "another tagged node".to_string(),
        _ => "a scalar".to_string(),
    }
}
