//! Mutable view-model tree produced by assembly

use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use uuid::Uuid;

use super::control::FieldControl;
use super::property::{Configurable, Property};
use super::{ControlResult, FormType, ItemRef, Parameters, RuleSubject};

// ============================================================================
// Form
// ============================================================================

#[derive(Debug, Default, Serialize)]
pub struct FormViewModel {
    pub unique_id: String,
    pub item: ItemRef,
    pub title: String,
    pub name: String,
    pub title_tag: String,
    pub information: String,
    pub footer: String,
    pub is_ajax_form: bool,
    pub is_save_form_data_to_storage: bool,
    pub show_title: bool,
    pub show_footer: bool,
    pub show_information: bool,
    pub submit_button_name: String,
    pub submit_button_position: String,
    pub submit_button_size: String,
    pub submit_button_type: String,
    pub success_message: String,
    pub success_submit: bool,
    pub errors: Vec<String>,
    pub visible: bool,
    pub form_type: FormType,
    pub css_class: String,
    pub left_column_style: String,
    pub right_column_style: String,
    pub read_query_string: bool,
    pub query_parameters: Parameters,
    pub parameters: Parameters,
    pub sections: Vec<SectionViewModel>,
}

impl FormViewModel {
    pub fn fields(&self) -> impl Iterator<Item = &FieldViewModel> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut FieldViewModel> {
        self.sections.iter_mut().flat_map(|s| s.fields.iter_mut())
    }

    pub fn field(&self, name: &str) -> Option<&FieldViewModel> {
        self.fields().find(|f| f.name == name)
    }

    /// Apply posted values (keyed by field name) to the matching fields.
    ///
    /// Returns how many fields accepted a value.
    pub fn apply_submission(&mut self, values: &Parameters) -> usize {
        let mut accepted = 0;
        for field in self.fields_mut() {
            if let Some(value) = values.get(&field.name) {
                if field.submit(value) {
                    accepted += 1;
                }
            }
        }
        accepted
    }
}

impl Configurable for FormViewModel {
    fn property(&mut self, name: &str) -> Option<Property<'_>> {
        Some(match name {
            "title" => Property::Text(&mut self.title),
            "titletag" => Property::Text(&mut self.title_tag),
            "information" => Property::Text(&mut self.information),
            "footer" => Property::Text(&mut self.footer),
            "isajaxform" => Property::Flag(&mut self.is_ajax_form),
            "showtitle" => Property::Flag(&mut self.show_title),
            "showfooter" => Property::Flag(&mut self.show_footer),
            "showinformation" => Property::Flag(&mut self.show_information),
            "submitbuttonname" => Property::Text(&mut self.submit_button_name),
            "submitbuttonposition" => Property::Text(&mut self.submit_button_position),
            "submitbuttonsize" => Property::Text(&mut self.submit_button_size),
            "submitbuttontype" => Property::Text(&mut self.submit_button_type),
            "successmessage" => Property::Text(&mut self.success_message),
            "cssclass" => Property::Text(&mut self.css_class),
            "leftcolumnstyle" => Property::Text(&mut self.left_column_style),
            "rightcolumnstyle" => Property::Text(&mut self.right_column_style),
            _ => return None,
        })
    }
}

// ============================================================================
// Section
// ============================================================================

#[derive(Debug, Default, Serialize)]
pub struct SectionViewModel {
    pub id: Uuid,
    pub item: Option<ItemRef>,
    pub title: String,
    pub information: String,
    pub show_title: bool,
    pub show_information: bool,
    /// Legend display setting; `"No"` suppresses the title
    pub show_legend: String,
    pub css_class: String,
    pub visible: bool,
    pub parameters: Parameters,
    pub fields: Vec<FieldViewModel>,
}

impl Configurable for SectionViewModel {
    fn property(&mut self, name: &str) -> Option<Property<'_>> {
        Some(match name {
            "title" => Property::Text(&mut self.title),
            "information" => Property::Text(&mut self.information),
            "showtitle" => Property::Flag(&mut self.show_title),
            "showinformation" => Property::Flag(&mut self.show_information),
            "showlegend" => Property::Text(&mut self.show_legend),
            "cssclass" => Property::Text(&mut self.css_class),
            "visible" => Property::Flag(&mut self.visible),
            _ => return None,
        })
    }
}

impl RuleSubject for SectionViewModel {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn rule_scope(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "show_title": self.show_title,
            "show_legend": self.show_legend,
            "css_class": self.css_class,
            "parameters": self.parameters,
            "fields": self.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        })
    }

    fn as_configurable(&mut self) -> &mut dyn Configurable {
        self
    }
}

// ============================================================================
// Field
// ============================================================================

#[derive(Debug, Default, Serialize)]
pub struct FieldViewModel {
    /// Identifier the control was resolved from; `None` for placeholders
    pub type_id: Option<String>,
    pub title: String,
    pub name: String,
    pub information: String,
    pub css_class: String,
    pub visible: bool,
    pub show_title: bool,
    pub show_information: bool,
    pub item: Option<ItemRef>,
    pub form_id: Uuid,
    pub form_type: FormType,
    pub field_item_id: Uuid,
    pub left_column_style: String,
    pub right_column_style: String,
    pub parameters: Parameters,
    #[serde(serialize_with = "serialize_control")]
    pub control: Option<Box<dyn FieldControl>>,
}

impl FieldViewModel {
    /// Inert node that keeps a field's position and identity when its
    /// type could not be resolved.
    pub fn placeholder(item: Option<ItemRef>, field_item_id: Uuid, form_id: Uuid) -> Self {
        Self {
            item,
            field_item_id,
            form_id,
            ..Default::default()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.control.is_none()
    }

    pub fn is_required(&self) -> bool {
        self.control
            .as_deref()
            .and_then(|c| c.required())
            .map(|r| r.is_required())
            .unwrap_or(false)
    }

    /// Bind a posted value through the control's `Value` slot.
    pub fn submit(&mut self, value: &str) -> bool {
        match self.control.as_deref_mut().and_then(|c| c.property("value")) {
            Some(slot) => slot.assign(value).is_ok(),
            None => false,
        }
    }

    /// Submission record, when the control produces one
    pub fn result(&self) -> Option<ControlResult> {
        self.control
            .as_deref()
            .and_then(|c| c.as_result_producer())
            .and_then(|p| p.control_result(self.field_item_id, &self.name))
    }
}

impl Configurable for FieldViewModel {
    fn property(&mut self, name: &str) -> Option<Property<'_>> {
        match name {
            "title" => Some(Property::Text(&mut self.title)),
            "name" => Some(Property::Text(&mut self.name)),
            "information" => Some(Property::Text(&mut self.information)),
            "cssclass" => Some(Property::Text(&mut self.css_class)),
            "visible" => Some(Property::Flag(&mut self.visible)),
            "showtitle" => Some(Property::Flag(&mut self.show_title)),
            "showinformation" => Some(Property::Flag(&mut self.show_information)),
            "leftcolumnstyle" => Some(Property::Text(&mut self.left_column_style)),
            "rightcolumnstyle" => Some(Property::Text(&mut self.right_column_style)),
            _ => self.control.as_deref_mut().and_then(|c| c.property(name)),
        }
    }
}

impl RuleSubject for FieldViewModel {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn rule_scope(&self) -> Value {
        json!({
            "field_item_id": self.field_item_id,
            "form_id": self.form_id,
            "type_id": self.type_id,
            "title": self.title,
            "name": self.name,
            "css_class": self.css_class,
            "parameters": self.parameters,
            "control": self.control.as_ref().map(|c| c.state()),
        })
    }

    fn as_configurable(&mut self) -> &mut dyn Configurable {
        self
    }
}

fn serialize_control<S>(control: &Option<Box<dyn FieldControl>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match control {
        Some(control) => json!({ "kind": control.kind(), "state": control.state() }).serialize(serializer),
        None => serializer.serialize_none(),
    }
}
