use std::collections::HashMap;
use thiserror::Error;

use crate::config::{RegistrySettings, RuleSettings, Settings};

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if settings.forms.dir.trim().is_empty() {
            errors.push(ValidationError::MissingField("forms.dir".to_string()));
        }

        if let Err(e) = Self::validate_rules(&settings.rules) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_registry(&settings.registry) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_rules(rules: &RuleSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if rules.max_operations == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "rules.max_operations".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if rules.max_expr_depth == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "rules.max_expr_depth".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_registry(registry: &RegistrySettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_aliases = HashMap::new();

        for (idx, alias) in registry.aliases.iter().enumerate() {
            let name = alias.alias.trim().to_ascii_lowercase();

            if name.is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "registry.aliases[{}].alias",
                    idx
                )));
                continue;
            }

            if alias.target.trim().is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "registry.aliases[{}].target",
                    idx
                )));
            } else if alias.target.trim().eq_ignore_ascii_case(&name) {
                errors.push(ValidationError::InvalidValue {
                    field: format!("registry.aliases[{}]", idx),
                    reason: format!("alias '{}' points to itself", alias.alias),
                });
            }

            if let Some(prev_idx) = seen_aliases.insert(name, idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Alias '{}' appears at indices {} and {}",
                    alias.alias, prev_idx, idx
                )));
            }
        }

        for (idx, id) in registry.disabled.iter().enumerate() {
            if id.trim().is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "registry.disabled[{}]",
                    idx
                )));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
