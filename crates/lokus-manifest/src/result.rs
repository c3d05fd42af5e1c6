use serde::{Deserialize, Serialize};

/// Outcome of one [`validate`](crate::validate) call.
///
/// `valid` is always `errors.is_empty()`. Warnings are advisory and never
/// affect `valid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Build a result from accumulated findings.
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// A rejection carrying a single error and no warnings.
    pub fn rejected(error: impl Into<String>) -> Self {
        Self::new(vec![error.into()], Vec::new())
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Convert into `Err` when the manifest was rejected.
    pub fn into_result(self) -> crate::Result<Self> {
        if self.valid {
            Ok(self)
        } else {
            Err(crate::ManifestError::Invalid {
                errors: self.errors,
            })
        }
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.valid {
            write!(f, "valid")?;
        } else {
            write!(f, "invalid ({} error(s))", self.errors.len())?;
        }
        if !self.warnings.is_empty() {
            write!(f, ", {} warning(s)", self.warnings.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tracks_errors() {
        assert!(ValidationResult::new(vec![], vec!["w".into()]).valid);
        assert!(!ValidationResult::rejected("boom").valid);
    }

    #[test]
    fn test_into_result_carries_errors() {
        let err = ValidationResult::rejected("Missing required field: id")
            .into_result()
            .unwrap_err();
        assert!(err.to_string().contains("Missing required field: id"));
    }

    #[test]
    fn test_display_summary() {
        let r = ValidationResult::new(vec!["a".into(), "b".into()], vec!["w".into()]);
        assert_eq!(r.to_string(), "invalid (2 error(s)), 1 warning(s)");
    }
}
