use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

pub mod control;
pub mod error;
pub mod property;
pub mod view;

pub use control::{FieldControl, HasRequired, Initialize, ProducesResult, SetFromQuery};
pub use error::{CoercionError, FormError};
pub use property::{Configurable, Property};
pub use view::{FieldViewModel, FormViewModel, SectionViewModel};

/// String-keyed configuration as it arrives from definitions
pub type Parameters = BTreeMap<String, String>;

/// Merge `localized` over `base`; on key collision the localized value wins.
pub fn merge_parameters(base: &Parameters, localized: &Parameters) -> Parameters {
    let mut merged = base.clone();
    merged.extend(localized.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Opaque handle to the content item a definition came from
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl ItemRef {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            path: None,
            language: None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    #[default]
    Basic,
    Inline,
    Horizontal,
}

impl FormType {
    /// CSS class implied by the layout type
    pub fn css_class(&self) -> &'static str {
        match self {
            FormType::Basic => "",
            FormType::Inline => "form-inline",
            FormType::Horizontal => "form-horizontal",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormType::Basic => "basic",
            FormType::Inline => "inline",
            FormType::Horizontal => "horizontal",
        };
        f.write_str(name)
    }
}

/// A failure recorded by an earlier validation stage
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Failure {
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<Uuid>,
}

/// One submitted value harvested from a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlResult {
    pub field_id: Uuid,
    pub field_name: String,
    pub value: Option<String>,
    #[serde(default)]
    pub parameters: String,
    /// Marks values that must not be echoed back or logged
    #[serde(default)]
    pub secure: bool,
}

// ============================================================================
// Definitions
// ============================================================================

/// Source description of a whole form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefinition {
    pub unique_id: String,
    pub item: ItemRef,
    pub introduction: Option<String>,
    pub form_name: Option<String>,
    pub footer: String,
    #[serde(default = "default_title_tag")]
    pub title_tag: String,
    pub is_ajax_form: bool,
    pub show_title: bool,
    pub show_footer: bool,
    pub show_introduction: bool,
    pub save_form_data_to_storage: bool,
    pub submit_name: Option<String>,
    pub submit_button_position: Option<String>,
    pub submit_button_size: Option<String>,
    pub submit_button_type: Option<String>,
    pub success_message: Option<String>,
    pub form_type: FormType,
    /// Overrides the class implied by `form_type`
    pub form_type_class: Option<String>,
    pub custom_css: Option<String>,
    pub form_alignment: Option<String>,
    pub left_column_style: String,
    pub right_column_style: String,
    pub parameters: Parameters,
    pub sections: Vec<SectionDefinition>,
    pub failures: Vec<Failure>,
    pub read_query_string: bool,
    pub query_parameters: Parameters,
    /// Filled in by result harvesting
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ControlResult>,
}

fn default_title_tag() -> String {
    "H1".to_string()
}

impl Default for FormDefinition {
    fn default() -> Self {
        Self {
            unique_id: String::new(),
            item: ItemRef::default(),
            introduction: None,
            form_name: None,
            footer: String::new(),
            title_tag: default_title_tag(),
            is_ajax_form: false,
            show_title: false,
            show_footer: false,
            show_introduction: false,
            save_form_data_to_storage: false,
            submit_name: None,
            submit_button_position: None,
            submit_button_size: None,
            submit_button_type: None,
            success_message: None,
            form_type: FormType::default(),
            form_type_class: None,
            custom_css: None,
            form_alignment: None,
            left_column_style: String::new(),
            right_column_style: String::new(),
            parameters: Parameters::new(),
            sections: Vec::new(),
            failures: Vec::new(),
            read_query_string: false,
            query_parameters: Parameters::new(),
            results: Vec::new(),
        }
    }
}

impl FormDefinition {
    pub fn type_class(&self) -> &str {
        self.form_type_class
            .as_deref()
            .unwrap_or_else(|| self.form_type.css_class())
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionDefinition {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub item: Option<ItemRef>,
    pub title: Option<String>,
    /// Rule expression; empty means always visible
    pub conditions: String,
    pub parameters: Parameters,
    pub localized_parameters: Parameters,
    pub fields: Vec<FieldDefinition>,
}

impl SectionDefinition {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefinition {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub item: Option<ItemRef>,
    /// Identifier of the presentation type, resolved through the registry
    pub field_type: String,
    pub title: Option<String>,
    pub name: Option<String>,
    pub is_required: bool,
    pub conditions: String,
    pub parameters: Parameters,
    pub localized_parameters: Parameters,
    pub validation_messages: Parameters,
}

impl FieldDefinition {
    pub fn new(field_type: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: Uuid::new_v4(),
            field_type: field_type.into(),
            name: Some(title.clone()),
            title: Some(title),
            ..Default::default()
        }
    }
}

// ============================================================================
// Rule evaluation port
// ============================================================================

/// A view-model node a rule may inspect and mutate
pub trait RuleSubject: Configurable {
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
    /// Readable state exposed to rule expressions
    fn rule_scope(&self) -> Value;
    fn as_configurable(&mut self) -> &mut dyn Configurable;
}

/// Evaluates condition expressions against a node.
///
/// Implementations may change the subject's visibility or bind other
/// properties; they report nothing back and must not panic on
/// malformed expressions.
pub trait RuleEvaluator: Send + Sync {
    fn run_rules(&self, expression: &str, subject: &mut dyn RuleSubject);
}

impl<F> RuleEvaluator for F
where
    F: Fn(&str, &mut dyn RuleSubject) + Send + Sync,
{
    fn run_rules(&self, expression: &str, subject: &mut dyn RuleSubject) {
        self(expression, subject)
    }
}
