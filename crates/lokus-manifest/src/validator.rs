use serde_json::{Map, Value};
use tracing::debug;

use crate::format;
use crate::result::ValidationResult;
use crate::schema::{self, ManifestSchema, REQUIRED_FIELDS};

pub const NOT_AN_OBJECT: &str = "Manifest must be a valid JSON object";

/// Validate an untrusted manifest.
///
/// Never panics and never fails: every problem is reported in the returned
/// [`ValidationResult`]. Each call owns its own accumulation context, so the
/// function is safe to call concurrently.
pub fn validate(manifest: &Value) -> ValidationResult {
    let Some(fields) = manifest.as_object() else {
        debug!(kind = schema::kind_of(manifest), "manifest is not an object");
        return ValidationResult::rejected(NOT_AN_OBJECT);
    };

    let mut ctx = ValidationContext::new(fields);
    ctx.check_required_fields();
    ctx.check_field_types();
    ctx.check_field_formats();
    ctx.check_dependencies();
    ctx.check_permissions();
    ctx.check_activation_events();
    ctx.check_contributes();
    ctx.check_categories();

    let result = ctx.finish();
    debug!(
        plugin = fields.get("id").and_then(serde_json::Value::as_str).unwrap_or("<unknown>"),
        valid = result.valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "manifest validated"
    );
    result
}

/// Parse `text` as JSON and validate it. Unparseable text is rejected rather
/// than raised.
pub fn validate_str(text: &str) -> ValidationResult {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => validate(&value),
        Err(e) => {
            debug!(error = %e, "manifest is not valid JSON");
            ValidationResult::rejected(format!("Manifest is not valid JSON: {e}"))
        }
    }
}

/// Per-call accumulator threaded through every check, consumed by `finish`.
struct ValidationContext<'a> {
    fields: &'a Map<String, Value>,
    schema: &'static ManifestSchema,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl<'a> ValidationContext<'a> {
    fn new(fields: &'a Map<String, Value>) -> Self {
        Self {
            fields,
            schema: schema::schema(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn finish(self) -> ValidationResult {
        ValidationResult::new(self.errors, self.warnings)
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// A field counts as present unless it is absent or `null`.
    fn present(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// Present and of an accepted kind; format checks only look at these.
    fn typed(&self, name: &str) -> Option<&'a Value> {
        let value = self.present(name)?;
        let spec = self.schema.field(name)?;
        spec.accepts(value).then_some(value)
    }

    fn typed_str(&self, name: &str) -> Option<&'a str> {
        self.typed(name).and_then(Value::as_str)
    }

    // ── Required fields ────────────────────────────────────────

    fn check_required_fields(&mut self) {
        for field in REQUIRED_FIELDS {
            if self.present(field).is_none() {
                self.error(format!("Missing required field: {field}"));
            }
        }
    }

    // ── Types ──────────────────────────────────────────────────

    fn check_field_types(&mut self) {
        for spec in self.schema.fields() {
            let Some(value) = self.present(spec.name) else {
                continue;
            };
            if !spec.accepts(value) {
                self.error(format!(
                    "Field '{}' has invalid type. Expected {}, got {}",
                    spec.name,
                    spec.expected(),
                    schema::kind_of(value)
                ));
            }
        }
    }

    // ── Formats ────────────────────────────────────────────────

    fn check_field_formats(&mut self) {
        if let Some(id) = self.typed_str("id") {
            if !format::is_valid_plugin_id(id) {
                self.error(
                    "Plugin ID must be lowercase, start with a letter, and contain only letters, numbers, and hyphens",
                );
            }
        }

        if let Some(version) = self.typed_str("version") {
            if !format::is_valid_version(version) {
                self.error("Version must follow semantic versioning (e.g., 1.0.0)");
            }
        }

        if let Some(range) = self.typed_str("lokusVersion") {
            if !format::is_valid_version_range(range) {
                self.error("lokusVersion must be a valid version range (e.g., ^1.0.0)");
            }
        }

        if let Some(main) = self.typed_str("main") {
            if !format::has_valid_main_extension(main) {
                self.error("Main file must have .js, .mjs, or .ts extension");
            }
        }

        if let Some(homepage) = self.typed_str("homepage") {
            if !format::is_valid_http_url(homepage) {
                self.error("Homepage must be a valid URL");
            }
        }

        self.check_author();
    }

    fn check_author(&mut self) {
        let Some(author) = self.typed("author") else {
            return;
        };
        // A plain string author needs no further checks.
        let Value::Object(details) = author else {
            return;
        };

        let has_name = details
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|name| !name.trim().is_empty());
        if !has_name {
            self.error("Author object must have a name field");
        }

        if let Some(email) = details.get("email").filter(|v| !v.is_null()) {
            if !email.as_str().is_some_and(format::is_valid_email) {
                self.error("Author email must be a valid email address");
            }
        }

        if let Some(url) = details.get("url").filter(|v| !v.is_null()) {
            if !url.as_str().is_some_and(format::is_valid_url) {
                self.error("Author URL must be a valid URL");
            }
        }
    }

    // ── Dependencies ───────────────────────────────────────────

    fn check_dependencies(&mut self) {
        let Some(dependencies) = self.present("dependencies") else {
            return;
        };
        let Some(dependencies) = dependencies.as_object() else {
            self.error("Dependencies must be an object");
            return;
        };

        let own_id = self.fields.get("id").and_then(Value::as_str);
        for (dep_id, range) in dependencies {
            if !format::is_valid_plugin_id(dep_id) {
                self.error(format!("Invalid dependency ID: {dep_id}"));
            }
            if !range.as_str().is_some_and(|r| !r.is_empty()) {
                self.error(format!("Invalid dependency version for {dep_id}"));
            }
            if own_id == Some(dep_id.as_str()) {
                self.error("Plugin cannot depend on itself");
            }
        }
    }

    // ── String lists ───────────────────────────────────────────

    /// Shared shape check for the array-of-string semantic fields. Returns the
    /// string elements when the field is present and is an array.
    fn string_list(
        &mut self,
        field: &str,
        not_array: &str,
        not_string: &str,
    ) -> Option<Vec<&'a str>> {
        let value = self.present(field)?;
        let Some(items) = value.as_array() else {
            self.error(not_array);
            return None;
        };
        if items.iter().any(|item| !item.is_string()) {
            self.error(not_string);
        }
        Some(items.iter().filter_map(Value::as_str).collect())
    }

    fn check_permissions(&mut self) {
        let Some(permissions) = self.string_list(
            "permissions",
            "Permissions must be an array",
            "Each permission must be a string",
        ) else {
            return;
        };

        // Unknown and dangerous are evaluated independently.
        for permission in permissions {
            if !self.schema.is_known_permission(permission) {
                self.warn(format!("Unknown permission: {permission}"));
            }
            if self.schema.is_dangerous_permission(permission) {
                self.warn(format!("Potentially dangerous permission: {permission}"));
            }
        }
    }

    fn check_activation_events(&mut self) {
        let Some(events) = self.string_list(
            "activationEvents",
            "ActivationEvents must be an array",
            "Each activation event must be a string",
        ) else {
            return;
        };

        for event in events {
            if !self.schema.is_known_activation_event(event) {
                self.warn(format!("Unknown activation event: {event}"));
            }
        }
    }

    fn check_categories(&mut self) {
        let Some(categories) = self.string_list(
            "categories",
            "Categories must be an array",
            "Each category must be a string",
        ) else {
            return;
        };

        for category in categories {
            if !self.schema.is_known_category(category) {
                self.warn(format!("Unknown category: {category}"));
            }
        }
    }

    // ── Contributions ──────────────────────────────────────────

    fn check_contributes(&mut self) {
        let Some(contributes) = self.present("contributes") else {
            return;
        };
        let Some(contributes) = contributes.as_object() else {
            self.error("Contributes must be an object");
            return;
        };

        for (point, value) in contributes {
            match self.schema.contribution_shape(point) {
                Some(shape) if !shape.matches(value) => {
                    self.error(format!("contributes.{point} must be {}", shape.as_str()));
                }
                Some(_) => {}
                None => self.warn(format!("Unknown contribution: {point}")),
            }
        }
    }
}
