//! Error types with fix suggestions

use thiserror::Error;

use crate::expr::ExprError;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
#[derive(Error, Debug)]
pub enum LivetagError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A tagged node must be a plain YAML scalar; sequences, mappings and
    /// empty nodes cannot carry an expression.
    #[error("tagged node must be a YAML scalar: tag '!{selector}' is applied to {found}")]
    TaggedNotScalar { selector: String, found: String },

    /// The expression text under a tag failed to compile.
    #[error("failed to compile expression {text:?} for selector '{selector}': {source}")]
    Compile {
        selector: String,
        text: String,
        #[source]
        source: ExprError,
    },

    /// No controller/provider is registered for the selector.
    #[error("no controller matches selector '{selector}'")]
    NoProvider { selector: String },
}

impl FixSuggestion for LivetagError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            LivetagError::Yaml(_) => Some("Check YAML syntax: indentation and quoting"),
            LivetagError::TaggedNotScalar { .. } => {
                Some("Quote the expression so the tag applies to a single scalar string")
            }
            LivetagError::Compile { .. } => Some(
                "Check the expression against the supported grammar: axis[i]/button[i]/toggle[i], \
                 arithmetic, comparisons, and/or/not, allow-listed math functions",
            ),
            LivetagError::NoProvider { .. } => {
                Some("Register a controller for this selector, or fix the tag to name an existing one")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_error_mentions_yaml_scalar() {
        let err = LivetagError::TaggedNotScalar {
            selector: "999".to_string(),
            found: "a sequence".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("YAML scalar"));
        assert!(msg.contains("!999"));
    }

    #[test]
    fn compile_error_mentions_compile_and_selector() {
        let err = LivetagError::Compile {
            selector: "7".to_string(),
            text: "0syntax error".to_string(),
            source: ExprError::UnexpectedToken {
                position: 1,
                details: "expected an operator".to_string(),
            },
        };
        let msg = err.to_string();
        assert!(msg.to_lowercase().contains("compile"));
        assert!(msg.contains("'7'"));
        assert!(msg.contains("0syntax error"));
    }

    #[test]
    fn binding_error_mentions_controller_and_selector() {
        let err = LivetagError::NoProvider {
            selector: "999".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("controller"));
        assert!(msg.contains("selector '999'"));
    }

    #[test]
    fn every_variant_has_a_suggestion() {
        let err = LivetagError::NoProvider {
            selector: "x".to_string(),
        };
        assert!(err.fix_suggestion().is_some());
    }
}
