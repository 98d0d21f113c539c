//! Form Assembler - builds the view-model tree from a form definition
//!
//! Assembly runs top-down: the form copies its own attributes, then each
//! section, then each field. Sections and fields hidden by their rules are
//! pruned at the end of their own step, so a hidden node never reaches its
//! parent's child list.
//!
//! Data problems (unknown field types, configuration keys no property
//! matches, missing query values) are absorbed here. The only path that
//! drops a field without a rule hiding it is a type whose factory fails.

use std::sync::Arc;

use crate::adapters::field_registry::FieldTypeRegistry;
use crate::adapters::property_binder::PropertyBinder;
use crate::domain::{
    merge_parameters, FieldDefinition, FieldViewModel, FormDefinition, FormViewModel,
    RuleEvaluator, SectionDefinition, SectionViewModel,
};

/// Legend setting value that hides a section title
pub const SUPPRESS_LEGEND: &str = "No";

#[derive(Clone)]
pub struct FormAssembler {
    registry: Arc<FieldTypeRegistry>,
    rules: Arc<dyn RuleEvaluator>,
}

impl FormAssembler {
    pub fn new(registry: Arc<FieldTypeRegistry>, rules: Arc<dyn RuleEvaluator>) -> Self {
        Self { registry, rules }
    }

    pub fn registry(&self) -> &FieldTypeRegistry {
        &self.registry
    }

    /// Build the full tree. Never fails; only sections and fields can be pruned.
    pub fn assemble_form(&self, definition: &FormDefinition) -> FormViewModel {
        let form_name = definition.form_name.clone().unwrap_or_default();

        let mut form = FormViewModel {
            unique_id: definition.unique_id.clone(),
            item: definition.item.clone(),
            information: definition.introduction.clone().unwrap_or_default(),
            is_ajax_form: definition.is_ajax_form,
            is_save_form_data_to_storage: definition.save_form_data_to_storage,
            title: form_name.clone(),
            name: form_name,
            title_tag: definition.title_tag.clone(),
            show_title: definition.show_title,
            show_footer: definition.show_footer,
            show_information: definition.show_introduction,
            submit_button_name: definition.submit_name.clone().unwrap_or_default(),
            submit_button_position: definition.submit_button_position.clone().unwrap_or_default(),
            submit_button_size: definition.submit_button_size.clone().unwrap_or_default(),
            submit_button_type: definition.submit_button_type.clone().unwrap_or_default(),
            success_message: definition.success_message.clone().unwrap_or_default(),
            success_submit: false,
            errors: definition
                .failures
                .iter()
                .map(|f| f.error_message.clone())
                .collect(),
            visible: true,
            left_column_style: definition.left_column_style.clone(),
            right_column_style: definition.right_column_style.clone(),
            footer: definition.footer.clone(),
            form_type: definition.form_type,
            read_query_string: definition.read_query_string,
            query_parameters: definition.query_parameters.clone(),
            parameters: definition.parameters.clone(),
            ..Default::default()
        };

        form.css_class = format!(
            "{} {} {}",
            definition.type_class(),
            definition.custom_css.as_deref().unwrap_or_default(),
            definition.form_alignment.as_deref().unwrap_or_default(),
        )
        .trim()
        .to_string();

        PropertyBinder::bind(&mut form, &definition.parameters, true);

        let sections: Vec<SectionViewModel> = definition
            .sections
            .iter()
            .filter_map(|section| self.assemble_section(section, &form))
            .collect();
        form.sections = sections;

        tracing::debug!(
            form = %form.unique_id,
            sections = form.sections.len(),
            "assembled form"
        );
        form
    }

    pub fn assemble_section(
        &self,
        definition: &SectionDefinition,
        form: &FormViewModel,
    ) -> Option<SectionViewModel> {
        let mut section = SectionViewModel {
            id: definition.id,
            item: definition.item.clone(),
            visible: true,
            parameters: merge_parameters(&definition.parameters, &definition.localized_parameters),
            fields: Vec::new(),
            ..Default::default()
        };

        if let Some(title) = definition.title.as_deref().filter(|t| !t.is_empty()) {
            section.show_information = true;
            section.title = title.to_string();

            // Title display is derived between the two passes; localized
            // values cannot change it retroactively.
            PropertyBinder::bind(&mut section, &definition.parameters, true);
            section.show_title = section.show_legend != SUPPRESS_LEGEND;
            PropertyBinder::bind(&mut section, &definition.localized_parameters, true);
        }

        section.fields = definition
            .fields
            .iter()
            .filter_map(|field| self.assemble_field(field, form))
            .collect();

        if !definition.conditions.is_empty() {
            self.rules.run_rules(&definition.conditions, &mut section);
        }

        if !section.visible {
            tracing::debug!(section = %section.id, "section hidden by rules");
            return None;
        }
        Some(section)
    }

    pub fn assemble_field(
        &self,
        definition: &FieldDefinition,
        form: &FormViewModel,
    ) -> Option<FieldViewModel> {
        let placeholder =
            || FieldViewModel::placeholder(definition.item.clone(), definition.id, form.item.id);

        if definition.field_type.trim().is_empty() {
            return Some(placeholder());
        }
        let Some(field_type) = self.registry.resolve(&definition.field_type) else {
            tracing::debug!(field_type = %definition.field_type, "unresolved field type, using placeholder");
            return Some(placeholder());
        };

        let control = match field_type.instantiate() {
            Ok(control) => control,
            Err(e) => {
                tracing::warn!(field = %definition.id, "{}", e);
                return None;
            }
        };

        let mut field = FieldViewModel {
            type_id: Some(field_type.id().to_string()),
            title: definition.title.clone().unwrap_or_default(),
            name: definition.name.clone().unwrap_or_default(),
            visible: true,
            show_title: true,
            show_information: true,
            item: definition.item.clone(),
            form_id: form.item.id,
            form_type: form.form_type,
            field_item_id: definition.id,
            left_column_style: form.left_column_style.clone(),
            right_column_style: form.right_column_style.clone(),
            control: Some(control),
            ..Default::default()
        };

        if let Some(required) = field.control.as_deref_mut().and_then(|c| c.as_required()) {
            required.set_required(definition.is_required);
        }

        field.parameters =
            merge_parameters(&definition.parameters, &definition.localized_parameters);
        PropertyBinder::bind(&mut field, &definition.parameters, true);
        PropertyBinder::bind(&mut field, &definition.localized_parameters, true);

        for (key, message) in &definition.validation_messages {
            field
                .parameters
                .entry(key.clone())
                .or_insert_with(|| message.clone());
        }

        if !field.visible {
            return None;
        }

        if let Some(initializer) = field.control.as_deref_mut().and_then(|c| c.as_initializer()) {
            initializer.initialize();
        }

        if !definition.conditions.is_empty() {
            self.rules.run_rules(&definition.conditions, &mut field);
        }

        if form.read_query_string {
            let query_value = form
                .query_parameters
                .get(&field.title)
                .filter(|v| !v.is_empty());
            let target = field.control.as_deref_mut().and_then(|c| c.as_query_target());
            if let (Some(value), Some(target)) = (query_value, target) {
                target.set_value_from_query(value);
            }
        }

        if !field.visible {
            tracing::debug!(field = %field.field_item_id, "field hidden by rules");
            return None;
        }
        Some(field)
    }
}

#[cfg(test)]
#[path = "assembler_test.rs"]
mod tests;
