use serde::Deserialize;
use serde_json::{Map, Value};

use crate::format;
use crate::validator::validate;
use crate::{ManifestError, Result};

pub const DEFAULT_ID: &str = "my-plugin";
pub const DEFAULT_NAME: &str = "My Plugin";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_MAIN: &str = "index.js";
pub const DEFAULT_LOKUS_VERSION: &str = "^1.0.0";

/// Overrides for [`create_template`]. Unset required fields fall back to
/// defaults; unset optional fields are left out of the manifest.
///
/// Deserializes from the same camelCase keys a manifest uses, so a partial
/// manifest can be fed straight in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateOptions {
    pub id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub main: Option<String>,
    pub lokus_version: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub author: Option<Value>,
    pub homepage: Option<String>,
    pub repository: Option<Value>,
    pub permissions: Option<Vec<String>>,
    pub activation_events: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub dependencies: Option<Map<String, Value>>,
    pub contributes: Option<Map<String, Value>>,
}

impl TemplateOptions {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Build a minimal manifest from `options`.
///
/// The result passes [`validate`] unless an override is itself invalid.
pub fn create_template(options: &TemplateOptions) -> Value {
    let (id, name) = resolve_identity(options.id.as_deref(), options.name.as_deref());

    let mut manifest = Map::new();
    manifest.insert("id".into(), Value::String(id));
    manifest.insert("name".into(), Value::String(name));
    manifest.insert(
        "version".into(),
        Value::String(options.version.clone().unwrap_or_else(|| DEFAULT_VERSION.into())),
    );
    manifest.insert(
        "main".into(),
        Value::String(options.main.clone().unwrap_or_else(|| DEFAULT_MAIN.into())),
    );
    manifest.insert(
        "lokusVersion".into(),
        Value::String(
            options
                .lokus_version
                .clone()
                .unwrap_or_else(|| DEFAULT_LOKUS_VERSION.into()),
        ),
    );

    let optional = [
        ("description", options.description.clone().map(Value::String)),
        ("keywords", options.keywords.clone().map(string_array)),
        ("author", options.author.clone()),
        ("homepage", options.homepage.clone().map(Value::String)),
        ("repository", options.repository.clone()),
        ("permissions", options.permissions.clone().map(string_array)),
        ("activationEvents", options.activation_events.clone().map(string_array)),
        ("categories", options.categories.clone().map(string_array)),
        ("dependencies", options.dependencies.clone().map(Value::Object)),
        ("contributes", options.contributes.clone().map(Value::Object)),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            manifest.insert(key.into(), value);
        }
    }

    Value::Object(manifest)
}

/// [`create_template`], failing when a caller override makes the template
/// invalid.
pub fn try_create_template(options: &TemplateOptions) -> Result<Value> {
    let manifest = create_template(options);
    let result = validate(&manifest);
    if !result.valid {
        return Err(ManifestError::Template(result.errors.join("; ")));
    }
    Ok(manifest)
}

fn string_array(items: Vec<String>) -> Value {
    Value::Array(items.into_iter().map(Value::String).collect())
}

/// Fill in whichever of id and name the caller left out.
fn resolve_identity(id: Option<&str>, name: Option<&str>) -> (String, String) {
    match (id, name) {
        (Some(id), Some(name)) => (id.to_string(), name.to_string()),
        (Some(id), None) => {
            let name = format::title_case(id);
            let name = if name.is_empty() { DEFAULT_NAME.to_string() } else { name };
            (id.to_string(), name)
        }
        (None, Some(name)) => (id_from_name(name), name.to_string()),
        (None, None) => (DEFAULT_ID.to_string(), DEFAULT_NAME.to_string()),
    }
}

fn id_from_name(name: &str) -> String {
    let slug = format::slugify(name);
    // Ids must start with a letter: drop leading digits and hyphens.
    let slug = slug.trim_start_matches(|c: char| !c.is_ascii_lowercase());
    if format::is_valid_plugin_id(slug) {
        slug.to_string()
    } else {
        DEFAULT_ID.to_string()
    }
}
