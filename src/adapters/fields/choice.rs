//! Controls whose value comes from a fixed set of options

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::control::{FieldControl, HasRequired, Initialize, ProducesResult, SetFromQuery};
use crate::domain::property::{parse_flag, Configurable, Property};
use crate::domain::ControlResult;

// ============================================================================
// Checkbox
// ============================================================================

#[derive(Debug, Default, Clone, Serialize)]
pub struct CheckboxField {
    pub label: String,
    pub checked: bool,
}

impl Configurable for CheckboxField {
    fn property(&mut self, name: &str) -> Option<Property<'_>> {
        Some(match name {
            "label" => Property::Text(&mut self.label),
            "checked" | "value" => Property::Flag(&mut self.checked),
            _ => return None,
        })
    }
}

impl FieldControl for CheckboxField {
    fn kind(&self) -> &'static str {
        "checkbox"
    }

    fn state(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn as_query_target(&mut self) -> Option<&mut dyn SetFromQuery> {
        Some(self)
    }

    fn as_result_producer(&self) -> Option<&dyn ProducesResult> {
        Some(self)
    }
}

impl SetFromQuery for CheckboxField {
    fn set_value_from_query(&mut self, value: &str) {
        if let Ok(checked) = parse_flag(value) {
            self.checked = checked;
        }
    }
}

impl ProducesResult for CheckboxField {
    fn control_result(&self, field_id: Uuid, field_name: &str) -> Option<ControlResult> {
        Some(ControlResult {
            field_id,
            field_name: field_name.to_string(),
            value: Some(if self.checked { "1" } else { "0" }.to_string()),
            parameters: String::new(),
            secure: false,
        })
    }
}

// ============================================================================
// Drop list
// ============================================================================

#[derive(Debug, Default, Clone, Serialize)]
pub struct DropListField {
    pub label: String,
    pub items: Vec<String>,
    pub value: Option<String>,
    /// Render a leading empty option instead of preselecting the first item
    pub show_empty_item: bool,
    pub is_required: bool,
}

impl DropListField {
    fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|item| item == value)
    }
}

impl Configurable for DropListField {
    fn property(&mut self, name: &str) -> Option<Property<'_>> {
        Some(match name {
            "label" => Property::Text(&mut self.label),
            "items" => Property::List(&mut self.items),
            "value" | "selectedvalue" => Property::OptionalText(&mut self.value),
            "showemptyitem" | "emptychoice" => Property::Flag(&mut self.show_empty_item),
            "isrequired" => Property::Flag(&mut self.is_required),
            _ => return None,
        })
    }
}

impl FieldControl for DropListField {
    fn kind(&self) -> &'static str {
        "drop-list"
    }

    fn state(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn as_required(&mut self) -> Option<&mut dyn HasRequired> {
        Some(self)
    }

    fn required(&self) -> Option<&dyn HasRequired> {
        Some(self)
    }

    fn as_query_target(&mut self) -> Option<&mut dyn SetFromQuery> {
        Some(self)
    }

    fn as_result_producer(&self) -> Option<&dyn ProducesResult> {
        Some(self)
    }

    fn as_initializer(&mut self) -> Option<&mut dyn Initialize> {
        Some(self)
    }
}

impl HasRequired for DropListField {
    fn is_required(&self) -> bool {
        self.is_required
    }

    fn set_required(&mut self, required: bool) {
        self.is_required = required;
    }
}

impl Initialize for DropListField {
    fn initialize(&mut self) {
        if let Some(value) = &self.value {
            if !self.contains(value) {
                self.value = None;
            }
        }
        if self.value.is_none() && !self.show_empty_item {
            self.value = self.items.first().cloned();
        }
    }
}

impl SetFromQuery for DropListField {
    /// Only accepts values that are one of the configured items.
    fn set_value_from_query(&mut self, value: &str) {
        if self.contains(value) {
            self.value = Some(value.to_string());
        }
    }
}

impl ProducesResult for DropListField {
    fn control_result(&self, field_id: Uuid, field_name: &str) -> Option<ControlResult> {
        if self.items.is_empty() {
            return None;
        }
        Some(ControlResult {
            field_id,
            field_name: field_name.to_string(),
            value: self.value.clone(),
            parameters: self.items.join("|"),
            secure: false,
        })
    }
}
