//! Property tests for config renaming.

use proptest::prelude::*;
use proptest::sample::Index;
use serde_yaml_ng::{Mapping, Value};

use stack_rotate::domain::entities::ComposeDocument;
use stack_rotate::domain::services::{rewrite, RewriteError};
use stack_rotate::domain::value_objects::ConfigPrefix;

/// References of one generated service: which config, and short or long form
type ServiceRefs = Vec<(Index, bool)>;

fn build_compose(names: &[String], services: &[(ServiceRefs, String)]) -> Value {
    let mut root = Mapping::new();
    root.insert("version".into(), "3.8".into());

    let mut service_map = Mapping::new();
    for (i, (refs, image)) in services.iter().enumerate() {
        let mut body = Mapping::new();
        body.insert("image".into(), Value::String(image.clone()));
        if !refs.is_empty() {
            let references = refs
                .iter()
                .map(|(idx, short)| {
                    let name = &names[idx.index(names.len())];
                    if *short {
                        Value::String(name.clone())
                    } else {
                        let mut long = Mapping::new();
                        long.insert("source".into(), Value::String(name.clone()));
                        long.insert("target".into(), Value::String(format!("/etc/{name}")));
                        long.insert("mode".into(), Value::Number(0o440.into()));
                        Value::Mapping(long)
                    }
                })
                .collect();
            body.insert("configs".into(), Value::Sequence(references));
        }
        service_map.insert(Value::String(format!("svc{i}")), Value::Mapping(body));
    }
    root.insert("services".into(), Value::Mapping(service_map));

    let mut networks = Mapping::new();
    networks.insert("front".into(), Value::Mapping(Mapping::new()));
    root.insert("networks".into(), Value::Mapping(networks));

    if !names.is_empty() {
        let mut configs = Mapping::new();
        for name in names {
            let mut definition = Mapping::new();
            definition.insert("file".into(), Value::String(format!("./{name}.conf")));
            configs.insert(Value::String(name.clone()), Value::Mapping(definition));
        }
        root.insert("configs".into(), Value::Mapping(configs));
    }

    Value::Mapping(root)
}

/// Config names plus a compose document whose references all resolve
fn compose_value() -> impl Strategy<Value = (Vec<String>, Value)> {
    proptest::collection::btree_set("[a-z][a-z0-9_]{0,8}", 0..6)
        .prop_flat_map(|names| {
            let names: Vec<String> = names.into_iter().collect();
            let max_refs = if names.is_empty() { 1 } else { 4 };
            let service = (
                proptest::collection::vec((any::<Index>(), any::<bool>()), 0..max_refs),
                "[a-z]{1,8}",
            );
            (Just(names), proptest::collection::vec(service, 0..4))
        })
        .prop_map(|(names, services)| {
            let value = build_compose(&names, &services);
            (names, value)
        })
}

fn prefix() -> impl Strategy<Value = ConfigPrefix> {
    "[a-z0-9_]{0,12}".prop_map(ConfigPrefix::new)
}

/// Blank out everything the rewrite is allowed to change
fn without_config_names(mut value: Value) -> Value {
    if let Some(root) = value.as_mapping_mut() {
        root.remove("configs");
        if let Some(Value::Mapping(services)) = root.get_mut("services") {
            for service in services.values_mut() {
                if let Some(Value::Sequence(references)) = service.get_mut("configs") {
                    for reference in references.iter_mut() {
                        match reference {
                            Value::Mapping(long) => {
                                long.remove("source");
                            }
                            short => *short = Value::Null,
                        }
                    }
                }
            }
        }
    }
    value
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every config is renamed to `prefix + name`, in order, with
    /// its definition unchanged.
    #[test]
    fn property_every_config_is_renamed(
        (names, value) in compose_value(),
        prefix in prefix()
    ) {
        let doc = ComposeDocument::from_value(value).unwrap();
        let out = rewrite(&doc, &prefix).unwrap();

        let renamed: Vec<String> = out.configs().iter().map(|c| c.name().to_string()).collect();
        let expected: Vec<String> = names.iter().map(|n| prefix.apply(n)).collect();
        prop_assert_eq!(renamed, expected);

        for (before, after) in doc.configs().iter().zip(out.configs()) {
            prop_assert_eq!(before.definition(), after.definition());
        }
    }

    /// PROPERTY: after rendering and reparsing, every reference names a
    /// config defined in the same document.
    #[test]
    fn property_references_resolve_after_rewrite(
        (_names, value) in compose_value(),
        prefix in prefix()
    ) {
        let doc = ComposeDocument::from_value(value).unwrap();
        let rendered = rewrite(&doc, &prefix).unwrap().to_yaml().unwrap();
        let reparsed =
            ComposeDocument::from_value(serde_yaml_ng::from_str(&rendered).unwrap()).unwrap();

        for service in reparsed.services() {
            for reference in service.configs() {
                prop_assert!(
                    reparsed.config(reference.source()).is_some(),
                    "{} references undefined {}",
                    service.name(),
                    reference.source()
                );
                prop_assert!(reference.source().starts_with(prefix.as_str()));
            }
        }
    }

    /// PROPERTY: apart from config names and reference sources the document
    /// is unchanged, including reference form and count.
    #[test]
    fn property_rewrite_touches_only_config_names(
        (_names, value) in compose_value(),
        prefix in prefix()
    ) {
        let doc = ComposeDocument::from_value(value).unwrap();
        let out = rewrite(&doc, &prefix).unwrap();

        prop_assert_eq!(
            without_config_names(out.to_value()),
            without_config_names(doc.to_value())
        );
        for (before, after) in doc.services().iter().zip(out.services()) {
            let forms_before: Vec<bool> = before.configs().iter().map(|r| r.is_short()).collect();
            let forms_after: Vec<bool> = after.configs().iter().map(|r| r.is_short()).collect();
            prop_assert_eq!(forms_before, forms_after);
        }
    }

    /// PROPERTY: a reference to an undefined config always fails the rewrite.
    #[test]
    fn property_dangling_reference_is_rejected(
        (_names, mut value) in compose_value(),
        ghost in "[A-Z]{1,6}",
        prefix in prefix()
    ) {
        let mut body = Mapping::new();
        body.insert("image".into(), "busybox".into());
        body.insert(
            "configs".into(),
            Value::Sequence(vec![Value::String(ghost.clone())]),
        );
        value
            .get_mut("services")
            .and_then(Value::as_mapping_mut)
            .unwrap()
            .insert("ghost".into(), Value::Mapping(body));

        let doc = ComposeDocument::from_value(value).unwrap();
        match rewrite(&doc, &prefix) {
            Err(RewriteError::DanglingReferences { references }) => {
                prop_assert_eq!(references.len(), 1);
                prop_assert_eq!(&references[0].service, "ghost");
                prop_assert_eq!(&references[0].config, &ghost);
            }
            Ok(_) => prop_assert!(false, "rewrite accepted undefined config {}", ghost),
        }
    }
}
