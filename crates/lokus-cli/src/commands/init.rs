use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

use lokus_manifest::{ManifestError, Result, TemplateOptions, try_create_template};

/// Everything `init` needs to scaffold a manifest.
#[derive(Debug, Clone, Default)]
pub struct InitRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub permissions: Vec<String>,
    pub out: PathBuf,
    pub force: bool,
}

impl InitRequest {
    fn template_options(&self) -> TemplateOptions {
        TemplateOptions {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            author: self.author.clone().map(Value::String),
            permissions: (!self.permissions.is_empty()).then(|| self.permissions.clone()),
            ..Default::default()
        }
    }
}

/// Build the template, re-validate it, and write it to `request.out`.
/// Refuses to overwrite an existing file unless `force` is set.
pub fn write_template(request: &InitRequest) -> Result<Value> {
    if request.out.exists() && !request.force {
        return Err(ManifestError::Template(format!(
            "file already exists: {} (use --force to overwrite)",
            request.out.display()
        )));
    }

    let manifest = try_create_template(&request.template_options())?;

    if let Some(parent) = request.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut text = serde_json::to_string_pretty(&manifest)?;
    text.push('\n');
    std::fs::write(&request.out, text)?;

    info!(path = ?request.out, id = manifest["id"].as_str(), "manifest written");
    Ok(manifest)
}

pub(super) fn cmd_init(request: &InitRequest) -> Result<i32> {
    let manifest = write_template(request)?;
    println!(
        "✅ Created {} for {}",
        request.out.display(),
        manifest["id"].as_str().unwrap_or_default()
    );
    Ok(0)
}
