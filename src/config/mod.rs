use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub mod forms;
pub mod validator;

use crate::domain::FormDefinition;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub forms: FormsSettings,
    #[serde(default)]
    pub rules: RuleSettings,
    #[serde(default)]
    pub registry: RegistrySettings,
}

/// Where form definitions are read from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormsSettings {
    #[serde(default = "default_forms_dir")]
    pub dir: String,
}

impl Default for FormsSettings {
    fn default() -> Self {
        Self {
            dir: default_forms_dir(),
        }
    }
}

fn default_forms_dir() -> String {
    "forms".to_string()
}

/// Limits and variables for the rule engine
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleSettings {
    #[serde(default = "default_max_operations")]
    pub max_operations: u64,
    #[serde(default = "default_max_expr_depth")]
    pub max_expr_depth: usize,
    /// Extra string variables visible to every expression
    #[serde(default)]
    pub globals: BTreeMap<String, String>,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            max_operations: default_max_operations(),
            max_expr_depth: default_max_expr_depth(),
            globals: BTreeMap::new(),
        }
    }
}

fn default_max_operations() -> u64 {
    10_000
}

fn default_max_expr_depth() -> usize {
    64
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct RegistrySettings {
    /// Additional identifiers for registered field types
    #[serde(default)]
    pub aliases: Vec<AliasConfig>,
    /// Field types that resolve to placeholders
    #[serde(default)]
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AliasConfig {
    pub alias: String,
    pub target: String,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Load `formview.toml` (or `.yaml`/`.json`) from `root`
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("formview");
        Self::build(File::from(config_path).required(false))
    }

    /// Load an explicit configuration file, which may be absent
    pub fn from_path(path: &Path) -> Result<Self, anyhow::Error> {
        Self::build(File::from(path.to_path_buf()).required(false))
    }

    fn build<S>(source: S) -> Result<Self, anyhow::Error>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let s = Config::builder()
            .add_source(source)
            .set_default("forms.dir", default_forms_dir())?
            .set_default("rules.max_operations", default_max_operations() as i64)?
            .set_default("rules.max_expr_depth", default_max_expr_depth() as i64)?
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        validator::ConfigValidator::validate(&settings).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;

        Ok(settings)
    }

    /// Every form definition found under `forms.dir`
    pub fn load_forms(&self) -> Result<Vec<FormDefinition>, anyhow::Error> {
        forms::load_forms_from_dir(&self.forms.dir)
    }
}
