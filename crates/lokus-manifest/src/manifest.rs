use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use semver::Version;
use std::collections::BTreeMap;

use crate::schema::{PermissionRisk, classify_permission};
use crate::validator::validate;
use crate::{ManifestError, Result};

/// Typed view of a manifest that has already passed the validation gate.
///
/// Build it with [`PluginManifest::from_value`] or
/// [`PluginManifest::from_json_str`]; both refuse manifests the validator
/// rejects. Every manifest the validator accepts deserializes: `null`
/// optional fields read as empty, and free-form objects stay as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    pub main: String,
    pub lokus_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub activation_events: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Map::is_empty")]
    pub contributes: Map<String, Value>,
}

/// The validator treats `null` as absent; so does the typed model.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `author` is either a bare name or an object with contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Details {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl Author {
    pub fn name(&self) -> &str {
        match self {
            Author::Name(name) => name,
            Author::Details { name, .. } => name,
        }
    }
}

/// `repository` is either a URL string or an object such as
/// `{ "type": "git", "url": ... }`. The object's contents are not validated,
/// so they are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Repository {
    Url(String),
    Details(Map<String, Value>),
}

impl Repository {
    pub fn url(&self) -> Option<&str> {
        match self {
            Repository::Url(url) => Some(url),
            Repository::Details(details) => details.get("url").and_then(Value::as_str),
        }
    }

    /// Version-control system named by `type`, e.g. `git`.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Repository::Url(_) => None,
            Repository::Details(details) => details.get("type").and_then(Value::as_str),
        }
    }
}

impl PluginManifest {
    /// Validate `value`, then deserialize it.
    pub fn from_value(value: Value) -> Result<Self> {
        validate(&value).into_result()?;
        Ok(serde_json::from_value(value)?)
    }

    /// Parse JSON text, validate it, then deserialize it.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Get the semver version.
    pub fn semver(&self) -> Option<Version> {
        Version::parse(&self.version).ok()
    }

    /// Requested permissions paired with their risk classification.
    pub fn permission_risks(&self) -> Vec<(&str, PermissionRisk)> {
        self.permissions
            .iter()
            .map(|p| (p.as_str(), classify_permission(p)))
            .collect()
    }

    /// Permissions a loader should confirm with the user before granting.
    pub fn dangerous_permissions(&self) -> Vec<&str> {
        self.permission_risks()
            .into_iter()
            .filter(|(_, risk)| *risk == PermissionRisk::Dangerous)
            .map(|(p, _)| p)
            .collect()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ManifestError::from)
    }
}
