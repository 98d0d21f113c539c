//! Loading form definitions from JSON, YAML or TOML files

use std::path::Path;

use crate::domain::{FormDefinition, FormError};

/// Parse one definition file, choosing the format from its extension.
pub fn load_form(path: &Path) -> Result<FormDefinition, FormError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let content = std::fs::read_to_string(path)?;

    let form = match ext {
        "json" => serde_json::from_str(&content)?,
        "yaml" | "yml" => serde_yaml::from_str(&content)?,
        "toml" => toml::from_str(&content)?,
        _ => {
            return Err(FormError::DefinitionLoad {
                path: path.display().to_string(),
                reason: format!("unsupported file extension '{}'", ext),
            })
        }
    };
    Ok(form)
}

/// Load every definition in `dir`; other files are ignored.
pub fn load_forms_from_dir(dir: &str) -> Result<Vec<FormDefinition>, anyhow::Error> {
    let pattern = format!("{}/*", glob::Pattern::escape(dir));
    let mut forms = Vec::new();

    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) => {
                if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                    if matches!(ext, "json" | "yaml" | "yml" | "toml") {
                        let form = load_form(&path)?;
                        tracing::debug!(path = %path.display(), form = %form.unique_id, "loaded form definition");
                        forms.push(form);
                    }
                }
            }
            Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
        }
    }

    Ok(forms)
}
