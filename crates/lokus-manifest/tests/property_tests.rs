#[cfg(test)]
mod tests {
    use lokus_manifest::*;
    use proptest::prelude::*;
    use serde_json::{Map, Value, json};

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-zA-Z0-9:._ @/^~<>=+-]{0,16}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
                prop::collection::vec((arb_key(), inner), 0..8)
                    .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
            ]
        })
    }

    /// Keys biased towards the fields the validator inspects.
    fn arb_key() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(vec![
                "id", "name", "version", "main", "lokusVersion", "description", "keywords",
                "permissions", "activationEvents", "categories", "dependencies", "author",
                "homepage", "repository", "contributes", "commands", "menus", "email", "url",
            ])
            .prop_map(String::from),
            "[a-z]{1,8}",
        ]
    }

    fn arb_name() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 _.!-]{0,24}"
    }

    proptest! {
        #[test]
        fn validate_never_panics_and_keeps_invariant(value in arb_json()) {
            let result = validate(&value);
            prop_assert_eq!(result.valid, result.errors.is_empty());
        }

        #[test]
        fn validate_is_idempotent(value in arb_json()) {
            prop_assert_eq!(validate(&value), validate(&value));
        }

        #[test]
        fn validate_str_never_panics(text in ".{0,64}") {
            let result = validate_str(&text);
            prop_assert_eq!(result.valid, result.errors.is_empty());
        }

        #[test]
        fn template_from_any_name_is_valid(name in arb_name()) {
            let options = TemplateOptions { name: Some(name), ..Default::default() };
            let result = validate(&create_template(&options));
            prop_assert!(result.valid, "{:?}", result.errors);
        }

        #[test]
        fn template_from_any_id_is_valid(id in "[a-z]([a-z0-9-]{0,14}[a-z0-9])?") {
            let options = TemplateOptions { id: Some(id.clone()), ..Default::default() };
            let template = create_template(&options);
            prop_assert_eq!(template["id"].as_str(), Some(id.as_str()));
            prop_assert!(template["name"].as_str().is_some_and(|n| !n.is_empty()));
            let result = validate(&template);
            prop_assert!(result.valid, "{:?}", result.errors);
        }

        #[test]
        fn template_from_id_and_name_is_valid(
            id in "[a-z]([a-z0-9-]{0,14}[a-z0-9])?",
            name in arb_name(),
        ) {
            let options = TemplateOptions { id: Some(id), name: Some(name), ..Default::default() };
            let result = validate(&create_template(&options));
            prop_assert!(result.valid, "{:?}", result.errors);
        }

        #[test]
        fn template_with_known_extras_is_clean(
            perms in prop::sample::subsequence(VALID_PERMISSIONS.to_vec(), 0..4),
            cats in prop::sample::subsequence(VALID_CATEGORIES.to_vec(), 0..3),
        ) {
            let options = TemplateOptions {
                id: Some("sample-plugin".into()),
                permissions: Some(perms.iter().map(|p| p.to_string()).collect()),
                categories: Some(cats.iter().map(|c| c.to_string()).collect()),
                ..Default::default()
            };
            let result = validate(&create_template(&options));
            prop_assert!(result.valid);
            prop_assert!(result.warnings.iter().all(|w| w.starts_with("Potentially dangerous")));
        }

        #[test]
        fn self_dependency_always_reported(id in "[a-z][a-z0-9-]{0,10}", extra in arb_json()) {
            let manifest = json!({
                "id": id.clone(),
                "version": extra,
                "dependencies": { id: "^1.0.0" }
            });
            let result = validate(&manifest);
            prop_assert!(result.errors.iter().any(|e| e == "Plugin cannot depend on itself"));
        }
    }
}
