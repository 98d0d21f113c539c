use serde::Serialize;
use serde_json::Value;

use crate::domain::control::FieldControl;
use crate::domain::property::{Configurable, Property};

/// Static text shown between inputs. Declares no capabilities.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LiteralTextField {
    pub label: String,
    pub text: String,
}

impl Configurable for LiteralTextField {
    fn property(&mut self, name: &str) -> Option<Property<'_>> {
        Some(match name {
            "label" => Property::Text(&mut self.label),
            "text" => Property::Text(&mut self.text),
            _ => return None,
        })
    }
}

impl FieldControl for LiteralTextField {
    fn kind(&self) -> &'static str {
        "literal-text"
    }

    fn state(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
