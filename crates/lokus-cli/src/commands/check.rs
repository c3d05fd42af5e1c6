use std::path::Path;
use tracing::{debug, info};

use lokus_manifest::{Result, ValidationResult, validate_str};

/// Result of checking one manifest file.
#[derive(Debug)]
pub struct CheckOutcome {
    pub result: ValidationResult,
    /// Whether the check counts as passed under the active warning policy.
    pub passed: bool,
}

/// Read and validate the manifest at `path`.
pub fn check_manifest(path: &Path, deny_warnings: bool) -> Result<CheckOutcome> {
    debug!(?path, "reading manifest");
    let raw = std::fs::read_to_string(path)?;
    let result = validate_str(&raw);
    let passed = result.valid && !(deny_warnings && result.has_warnings());
    info!(?path, valid = result.valid, passed, "manifest checked");
    Ok(CheckOutcome { result, passed })
}

pub(super) fn cmd_check(path: &Path, json: bool, deny_warnings: bool) -> Result<i32> {
    let outcome = check_manifest(path, deny_warnings)?;
    let result = &outcome.result;

    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        if result.valid {
            println!("✅ {} is valid", path.display());
        } else {
            println!("❌ {} is invalid", path.display());
        }
        for e in &result.errors {
            println!("  ❌ {e}");
        }
        for w in &result.warnings {
            println!("  ⚠️  {w}");
        }
        if result.valid && !outcome.passed {
            println!("\nWarnings are denied; treating as failure.");
        }
    }

    Ok(if outcome.passed { 0 } else { 1 })
}
