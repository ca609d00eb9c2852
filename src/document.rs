//! Resolved document trees
//!
//! After resolution a document is a [`Node`] tree mirroring the YAML
//! structure, except that every validly tagged scalar has been replaced by a
//! [`DeferredExpression`]. Mappings keep their source key order, which
//! matters for usability of the serialized output.

use serde_yaml::Value as Yaml;

use crate::deferred::DeferredExpression;
use crate::error::LivetagError;

/// One node of a resolved document
#[derive(Debug)]
pub enum Node {
    /// Plain scalar (null, bool, number, string), passed through untouched
    Scalar(Yaml),
    Sequence(Vec<Node>),
    /// Key order is the source order
    Mapping(Vec<(Yaml, Node)>),
    /// A tagged scalar, replaced by its bound expression
    Deferred(DeferredExpression),
}

impl Node {
    /// Look up a mapping entry by string key
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Sequence element by position
    pub fn index(&self, i: usize) -> Option<&Node> {
        match self {
            Node::Sequence(items) => items.get(i),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Yaml> {
        match self {
            Node::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_deferred(&self) -> Option<&DeferredExpression> {
        match self {
            Node::Deferred(node) => Some(node),
            _ => None,
        }
    }

    /// Mapping keys in source order
    pub fn keys(&self) -> Vec<&Yaml> {
        match self {
            Node::Mapping(entries) => entries.iter().map(|(k, _)| k).collect(),
            _ => Vec::new(),
        }
    }

    /// Deep-copy into plain YAML, evaluating every deferred node once
    ///
    /// Each call draws fresh samples, so two materializations of the same
    /// tree may differ when the underlying input state has moved.
    pub fn materialize(&self) -> Yaml {
        match self {
            Node::Scalar(value) => value.clone(),
            Node::Sequence(items) => Yaml::Sequence(items.iter().map(Node::materialize).collect()),
            Node::Mapping(entries) => {
                let mut mapping = serde_yaml::Mapping::new();
                for (key, value) in entries {
                    mapping.insert(key.clone(), value.materialize());
                }
                Yaml::Mapping(mapping)
            }
            Node::Deferred(node) => node.evaluate().into(),
        }
    }
}

/// Materialize and serialize a resolved tree
///
/// Non-finite floats render in YAML's native forms (`.inf`, `-.inf`,
/// `.nan`), so the output stays loadable.
pub fn dump_str(node: &Node) -> Result<String, LivetagError> {
    Ok(serde_yaml::to_string(&node.materialize())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::compile;
    use crate::provider::MockProvider;
    use crate::sample::Sample;

    fn deferred(text: &str, provider: MockProvider) -> Node {
        Node::Deferred(DeferredExpression::new(
            "7".to_string(),
            compile(text).unwrap(),
            Box::new(provider),
        ))
    }

    #[test]
    fn get_and_index_traversal() {
        let tree = Node::Mapping(vec![(
            Yaml::from("items"),
            Node::Sequence(vec![Node::Scalar(Yaml::from(1)), Node::Scalar(Yaml::from(2))]),
        )]);
        let second = tree.get("items").and_then(|n| n.index(1)).unwrap();
        assert_eq!(second.as_scalar(), Some(&Yaml::from(2)));
    }

    #[test]
    fn materialize_preserves_key_order() {
        let tree = Node::Mapping(vec![
            (Yaml::from("zulu"), Node::Scalar(Yaml::from(1))),
            (Yaml::from("alpha"), Node::Scalar(Yaml::from(2))),
            (Yaml::from("mike"), Node::Scalar(Yaml::from(3))),
        ]);
        let yaml = serde_yaml::to_string(&tree.materialize()).unwrap();
        assert_eq!(yaml, "zulu: 1\nalpha: 2\nmike: 3\n");
    }

    #[test]
    fn materialize_evaluates_deferred_nodes() {
        let provider = MockProvider::with_state(Sample::new().with_axis(0, 0.25));
        let tree = Node::Mapping(vec![
            (Yaml::from("gain"), deferred("axis[0] * 2", provider.clone())),
            (Yaml::from("label"), Node::Scalar(Yaml::from("fixed"))),
        ]);

        let first = tree.materialize();
        assert_eq!(first["gain"], Yaml::from(0.5));
        assert_eq!(first["label"], Yaml::from("fixed"));

        provider.set_state(Sample::new().with_axis(0, 0.5));
        let second = tree.materialize();
        assert_eq!(second["gain"], Yaml::from(1.0));
    }

    #[test]
    fn dump_renders_non_finite_floats() {
        let provider = MockProvider::new();
        let tree = Node::Mapping(vec![(Yaml::from("boom"), deferred("1 / 0", provider))]);
        let yaml = dump_str(&tree).unwrap();
        assert_eq!(yaml, "boom: .inf\n");
    }
}
