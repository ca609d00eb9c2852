//! End-to-end resolution and evaluation tests

use livetag::{dump_str, LivetagError, MockProvider, Provider, Resolver, Sample, Value};

fn approx(value: Value, expected: f64) {
    match value {
        Value::Number(n) => assert!(
            (n - expected).abs() < 1e-9,
            "expected ~{expected}, got {n}"
        ),
        other => panic!("expected a number, got {other:?}"),
    }
}

fn resolver_for(selector: &'static str, provider: MockProvider) -> Resolver {
    Resolver::new(move |s| {
        if s == selector {
            Some(Box::new(provider.clone()) as Box<dyn Provider>)
        } else {
            None
        }
    })
}

#[test]
fn end_to_end_publish_scenario() {
    let pad = MockProvider::with_state(
        Sample::new()
            .with_axis(0, 0.5)
            .with_axis(5, -0.7)
            .with_button(2, true)
            .with_toggle(1, false),
    );
    let resolver = resolver_for("7", pad.clone());

    let tree = resolver
        .resolve("{foo: !7 'sin(axis[0] + 1.0)', bar: !7 'toggle[1] and button[2]'}")
        .unwrap();

    // key order survives resolution
    let keys: Vec<_> = tree.keys().iter().filter_map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["foo", "bar"]);

    let foo = tree.get("foo").unwrap().as_deferred().unwrap();
    let bar = tree.get("bar").unwrap().as_deferred().unwrap();
    approx(foo.evaluate(), (1.5f64).sin());
    assert_eq!(bar.evaluate(), Value::Bool(false));

    // Move the controls and re-evaluate: no caching anywhere.
    pad.set_state(
        Sample::new()
            .with_axis(0, -0.5)
            .with_button(2, true)
            .with_toggle(1, true),
    );
    approx(foo.evaluate(), (0.5f64).sin());
    assert_eq!(bar.evaluate(), Value::Bool(true));

    // Absent controls read as zeros / false.
    pad.clear();
    approx(foo.evaluate(), (1.0f64).sin());
    assert_eq!(bar.evaluate(), Value::Bool(false));
}

#[test]
fn repeated_resolution_is_deterministic() {
    let text = "{foo: !7 'sin(axis[0] + 1.0)', bar: !7 'toggle[1] and button[2]'}";
    let state = Sample::new().with_axis(0, 0.25).with_toggle(1, true);

    for _ in 0..2 {
        let resolver = resolver_for("7", MockProvider::with_state(state.clone()));
        let tree = resolver.resolve(text).unwrap();
        approx(
            tree.get("foo").unwrap().as_deferred().unwrap().evaluate(),
            (1.25f64).sin(),
        );
        assert_eq!(
            tree.get("bar").unwrap().as_deferred().unwrap().evaluate(),
            Value::Bool(false),
        );
    }
}

#[test]
fn evaluation_reflects_latest_sample() {
    let pad = MockProvider::new();
    let resolver = resolver_for("stick", pad.clone());
    let tree = resolver.resolve("out: !stick 'axis[3]'").unwrap();
    let out = tree.get("out").unwrap().as_deferred().unwrap();

    for step in 0..5 {
        pad.set_state(Sample::new().with_axis(3, step as f64 / 10.0));
        approx(out.evaluate(), step as f64 / 10.0);
    }
    // one fresh sample per evaluation
    assert_eq!(pad.samples_taken(), 5);
}

#[test]
fn non_scalar_tagged_node_fails_structurally() {
    let resolver = Resolver::new(|_| None);
    let err = resolver.resolve("baz: !999 []").unwrap_err();
    assert!(matches!(err, LivetagError::TaggedNotScalar { .. }));
    assert!(err.to_string().contains("YAML scalar"));
}

#[test]
fn invalid_expression_fails_compilation() {
    let resolver = Resolver::new(|_| None);
    let err = resolver.resolve("baz: !999 0syntax error").unwrap_err();
    assert!(matches!(err, LivetagError::Compile { .. }));
    assert!(err.to_string().to_lowercase().contains("compile"));
}

#[test]
fn unknown_selector_fails_binding() {
    let resolver = Resolver::new(|_| None);
    let err = resolver.resolve("baz: !999 axis[0]").unwrap_err();
    assert!(matches!(err, LivetagError::NoProvider { .. }));
    let msg = err.to_string();
    assert!(msg.contains("controller"));
    assert!(msg.contains("999"));
}

#[test]
fn one_bad_tag_fails_the_whole_load() {
    let resolver = resolver_for("7", MockProvider::new());
    // first tag is fine, second is not
    let err = resolver
        .resolve("{ok: !7 'axis[0]', bad: !unknown 'axis[0]'}")
        .unwrap_err();
    assert!(matches!(err, LivetagError::NoProvider { .. }));
}

#[test]
fn mixed_document_materializes_in_order() {
    let pad = MockProvider::with_state(Sample::new().with_axis(0, 0.5).with_toggle(1, true));
    let resolver = resolver_for("7", pad);

    let tree = resolver
        .resolve(
            "kind: setpoint\nvalue: !7 'axis[0] * 2'\nflags:\n  - !7 'toggle[1]'\n  - fixed\n",
        )
        .unwrap();

    let yaml = dump_str(&tree).unwrap();
    assert_eq!(yaml, "kind: setpoint\nvalue: 1.0\nflags:\n- true\n- fixed\n");
}
