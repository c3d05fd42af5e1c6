//! # lokus-manifest
//!
//! Validation gate for third-party Lokus plugin manifests. A manifest is the
//! `plugin.json` shipped inside a plugin package; nothing in it is trusted until
//! [`validate`] has accepted it.
//!
//! ```json
//! {
//!   "id": "note-sync",
//!   "name": "Note Sync",
//!   "version": "2.1.0",
//!   "main": "index.js",
//!   "lokusVersion": "^1.0.0",
//!   "permissions": ["read_files", "execute_commands"]
//! }
//! ```
//!
//! Validation runs in a fixed order: structural gate, required fields, field
//! types and formats, then semantic checks (dependencies, permissions,
//! activation events, contributions, categories). Findings are reported as
//! stable strings in a [`ValidationResult`]; the validator itself never fails.
//!
//! [`create_template`] builds a starter manifest that always passes the gate.

pub mod error;
pub mod format;
pub mod manifest;
pub mod result;
pub mod schema;
pub mod template;
pub mod validator;

pub use error::{ManifestError, Result};
pub use manifest::{Author, PluginManifest, Repository};
pub use result::ValidationResult;
pub use schema::{
    CONTRIBUTION_POINTS, ContributionShape, DANGEROUS_PERMISSIONS, FieldKind, FieldSpec,
    ManifestSchema, PermissionRisk, REQUIRED_FIELDS, VALID_ACTIVATION_EVENTS, VALID_CATEGORIES,
    VALID_PERMISSIONS, classify_permission, schema,
};
pub use template::{TemplateOptions, create_template, try_create_template};
pub use validator::{validate, validate_str};
