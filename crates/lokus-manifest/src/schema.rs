use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Fields every manifest must carry, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 5] = ["id", "name", "version", "main", "lokusVersion"];

/// Permissions the host knows how to grant.
pub const VALID_PERMISSIONS: &[&str] = &[
    "read_files",
    "write_files",
    "delete_files",
    "access_network",
    "execute_commands",
    "modify_ui",
    "register_commands",
    "access_editor",
    "access_clipboard",
    "show_notifications",
    "storage",
    "all",
];

/// Recognized permissions that still warrant a confirmation prompt.
pub const DANGEROUS_PERMISSIONS: &[&str] = &["all", "execute_commands"];

/// Activation events. Entries ending in `:*` match any event with that prefix.
pub const VALID_ACTIVATION_EVENTS: &[&str] = &[
    "*",
    "onStartup",
    "onStartupFinished",
    "onCommand:*",
    "onLanguage:*",
    "onView:*",
    "onFileOpen:*",
    "onUri",
    "workspaceContains:*",
];

pub const VALID_CATEGORIES: &[&str] = &[
    "Editor",
    "Formatter",
    "Language",
    "Theme",
    "Snippets",
    "Productivity",
    "Visualization",
    "Integration",
    "Export",
    "Import",
    "Sync",
    "Utility",
    "Other",
];

/// Expected JSON shape of a contribution point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionShape {
    Array,
    Object,
}

impl ContributionShape {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            ContributionShape::Array => value.is_array(),
            ContributionShape::Object => value.is_object(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContributionShape::Array => "an array",
            ContributionShape::Object => "an object",
        }
    }
}

pub const CONTRIBUTION_POINTS: &[(&str, ContributionShape)] = &[
    ("commands", ContributionShape::Array),
    ("menus", ContributionShape::Object),
    ("keybindings", ContributionShape::Array),
    ("themes", ContributionShape::Array),
    ("languages", ContributionShape::Array),
    ("views", ContributionShape::Object),
    ("configuration", ContributionShape::Object),
];

/// JSON kind a manifest field may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Object,
    Array,
    /// An array whose every element is a string.
    StringArray,
}

impl FieldKind {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Object => value.is_object(),
            FieldKind::Array => value.is_array(),
            FieldKind::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
            FieldKind::StringArray => "array of strings",
        }
    }
}

/// Name of the JSON kind of `value`, as used in type-mismatch messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One row of the field table.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kinds: &'static [FieldKind],
    pub required: bool,
}

impl FieldSpec {
    pub fn accepts(&self, value: &Value) -> bool {
        self.kinds.iter().any(|k| k.matches(value))
    }

    /// Human-readable list of accepted kinds, e.g. `string or object`.
    pub fn expected(&self) -> String {
        self.kinds
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

const STRING: &[FieldKind] = &[FieldKind::String];
const OBJECT: &[FieldKind] = &[FieldKind::Object];
const STRING_ARRAY: &[FieldKind] = &[FieldKind::StringArray];
const STRING_OR_OBJECT: &[FieldKind] = &[FieldKind::String, FieldKind::Object];

const FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "id", kinds: STRING, required: true },
    FieldSpec { name: "name", kinds: STRING, required: true },
    FieldSpec { name: "version", kinds: STRING, required: true },
    FieldSpec { name: "main", kinds: STRING, required: true },
    FieldSpec { name: "lokusVersion", kinds: STRING, required: true },
    FieldSpec { name: "description", kinds: STRING, required: false },
    FieldSpec { name: "keywords", kinds: STRING_ARRAY, required: false },
    FieldSpec { name: "permissions", kinds: STRING_ARRAY, required: false },
    FieldSpec { name: "activationEvents", kinds: STRING_ARRAY, required: false },
    FieldSpec { name: "categories", kinds: STRING_ARRAY, required: false },
    FieldSpec { name: "dependencies", kinds: OBJECT, required: false },
    FieldSpec { name: "author", kinds: STRING_OR_OBJECT, required: false },
    FieldSpec { name: "homepage", kinds: STRING, required: false },
    FieldSpec { name: "repository", kinds: STRING_OR_OBJECT, required: false },
    FieldSpec { name: "contributes", kinds: OBJECT, required: false },
];

/// Permission policy applied to each requested permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionRisk {
    Standard,
    Dangerous,
    Unknown,
}

/// Lookup tables built once per process and shared read-only.
#[derive(Debug)]
pub struct ManifestSchema {
    permissions: HashSet<&'static str>,
    dangerous: HashSet<&'static str>,
    exact_events: HashSet<&'static str>,
    event_prefixes: Vec<&'static str>,
    categories: HashSet<&'static str>,
}

static SCHEMA: LazyLock<ManifestSchema> = LazyLock::new(ManifestSchema::build);

/// The process-wide schema.
pub fn schema() -> &'static ManifestSchema {
    &SCHEMA
}

impl ManifestSchema {
    fn build() -> Self {
        let mut exact_events = HashSet::new();
        let mut event_prefixes = Vec::new();
        for event in VALID_ACTIVATION_EVENTS {
            match event.strip_suffix('*') {
                Some(prefix) if prefix.ends_with(':') => event_prefixes.push(prefix),
                _ => {
                    exact_events.insert(*event);
                }
            }
        }

        Self {
            permissions: VALID_PERMISSIONS.iter().copied().collect(),
            dangerous: DANGEROUS_PERMISSIONS.iter().copied().collect(),
            exact_events,
            event_prefixes,
            categories: VALID_CATEGORIES.iter().copied().collect(),
        }
    }

    /// Every recognized field, required ones first.
    pub fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        FIELDS.iter().find(|f| f.name == name)
    }

    pub fn is_known_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    pub fn is_dangerous_permission(&self, permission: &str) -> bool {
        self.dangerous.contains(permission)
    }

    /// Exact match, or a `prefix:*` pattern sharing the prefix through the colon.
    pub fn is_known_activation_event(&self, event: &str) -> bool {
        self.exact_events.contains(event)
            || self.event_prefixes.iter().any(|p| event.starts_with(p))
    }

    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    pub fn contribution_shape(&self, point: &str) -> Option<ContributionShape> {
        CONTRIBUTION_POINTS
            .iter()
            .find(|(name, _)| *name == point)
            .map(|(_, shape)| *shape)
    }
}

/// Classify a permission name against the fixed policy lists.
pub fn classify_permission(permission: &str) -> PermissionRisk {
    let schema = schema();
    if schema.is_dangerous_permission(permission) {
        PermissionRisk::Dangerous
    } else if schema.is_known_permission(permission) {
        PermissionRisk::Standard
    } else {
        PermissionRisk::Unknown
    }
}
