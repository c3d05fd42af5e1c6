use serde_json::{Value, json};

use lokus_manifest::{
    CONTRIBUTION_POINTS, DANGEROUS_PERMISSIONS, REQUIRED_FIELDS, Result, VALID_ACTIVATION_EVENTS,
    VALID_CATEGORIES, VALID_PERMISSIONS, schema,
};

/// The recognized tables as one JSON document, for editor tooling.
pub fn schema_document() -> Value {
    let contributes: serde_json::Map<String, Value> = CONTRIBUTION_POINTS
        .iter()
        .map(|(name, shape)| (name.to_string(), json!(shape)))
        .collect();

    json!({
        "required": REQUIRED_FIELDS,
        "fields": schema().fields(),
        "permissions": VALID_PERMISSIONS,
        "dangerousPermissions": DANGEROUS_PERMISSIONS,
        "activationEvents": VALID_ACTIVATION_EVENTS,
        "categories": VALID_CATEGORIES,
        "contributes": contributes,
    })
}

pub(super) fn cmd_schema(as_json: bool) -> Result<i32> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&schema_document())?);
        return Ok(0);
    }

    println!("\x1b[1mRequired fields\x1b[0m");
    println!("  {}", REQUIRED_FIELDS.join(", "));

    println!("\n\x1b[1mFields\x1b[0m");
    for field in schema().fields() {
        let marker = if field.required { " (required)" } else { "" };
        println!("  {:<18} {}{}", field.name, field.expected(), marker);
    }

    println!("\n\x1b[1mPermissions\x1b[0m");
    for p in VALID_PERMISSIONS {
        let risk = if DANGEROUS_PERMISSIONS.contains(p) { " ⚠️  dangerous" } else { "" };
        println!("  {p}{risk}");
    }

    println!("\n\x1b[1mActivation events\x1b[0m");
    println!("  {}", VALID_ACTIVATION_EVENTS.join(", "));

    println!("\n\x1b[1mCategories\x1b[0m");
    println!("  {}", VALID_CATEGORIES.join(", "));

    println!("\n\x1b[1mContribution points\x1b[0m");
    for (name, shape) in CONTRIBUTION_POINTS {
        println!("  {name} ({})", shape.as_str());
    }

    Ok(0)
}
