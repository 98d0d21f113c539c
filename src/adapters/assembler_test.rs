use super::*;
use crate::domain::{
    Failure, FormError, FormType, ItemRef, Parameters, RuleSubject,
};
use serde_json::Value;
use uuid::Uuid;

fn assembler_with<F>(rules: F) -> FormAssembler
where
    F: Fn(&str, &mut dyn RuleSubject) + Send + Sync + 'static,
{
    FormAssembler::new(Arc::new(FieldTypeRegistry::with_builtin_fields()), Arc::new(rules))
}

/// Hides any node whose condition is exactly `hide`
fn assembler() -> FormAssembler {
    assembler_with(|expression: &str, subject: &mut dyn RuleSubject| {
        if expression == "hide" {
            subject.set_visible(false);
        }
    })
}

fn params(pairs: &[(&str, &str)]) -> Parameters {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn form_with(fields: Vec<FieldDefinition>) -> FormDefinition {
    let mut section = SectionDefinition::new("Contact");
    section.fields = fields;
    FormDefinition {
        unique_id: "contact".to_string(),
        item: ItemRef::new(Uuid::new_v4()),
        form_name: Some("Contact us".to_string()),
        sections: vec![section],
        ..Default::default()
    }
}

fn state(field: &FieldViewModel) -> Value {
    field.control.as_ref().map(|c| c.state()).unwrap_or(Value::Null)
}

#[test]
fn test_form_attributes_are_copied() {
    let mut definition = form_with(vec![]);
    definition.introduction = Some("Tell us".to_string());
    definition.submit_name = Some("Send".to_string());
    definition.show_title = true;
    definition.title_tag = "H2".to_string();
    definition.failures = vec![
        Failure {
            error_message: "Name is required".to_string(),
            field_id: None,
        },
        Failure {
            error_message: "Email is invalid".to_string(),
            field_id: Some(Uuid::new_v4()),
        },
    ];

    let view = assembler().assemble_form(&definition);

    assert_eq!(view.unique_id, "contact");
    assert_eq!(view.title, "Contact us");
    assert_eq!(view.name, "Contact us");
    assert_eq!(view.title_tag, "H2");
    assert_eq!(view.information, "Tell us");
    assert_eq!(view.submit_button_name, "Send");
    assert!(view.show_title);
    assert!(view.visible);
    assert!(!view.success_submit);
    assert_eq!(view.errors, vec!["Name is required", "Email is invalid"]);
}

#[test]
fn test_css_class_is_trimmed_and_ordered() {
    let mut definition = form_with(vec![]);
    assert_eq!(assembler().assemble_form(&definition).css_class, "");

    definition.form_alignment = Some("right".to_string());
    assert_eq!(assembler().assemble_form(&definition).css_class, "right");

    definition.form_type = FormType::Horizontal;
    definition.custom_css = Some("wide".to_string());
    assert_eq!(
        assembler().assemble_form(&definition).css_class,
        "form-horizontal wide right"
    );

    definition.form_type_class = Some("stacked".to_string());
    assert_eq!(
        assembler().assemble_form(&definition).css_class,
        "stacked wide right"
    );
}

#[test]
fn test_form_parameters_are_bound() {
    let mut definition = form_with(vec![]);
    definition.submit_name = Some("Send".to_string());
    definition.parameters = params(&[
        ("SubmitButtonName", "Go"),
        ("Show_Footer", "true"),
        ("NoSuchProperty", "ignored"),
    ]);

    let view = assembler().assemble_form(&definition);

    assert_eq!(view.submit_button_name, "Go");
    assert!(view.show_footer);
    assert_eq!(view.parameters.len(), 3);
}

#[test]
fn test_unknown_and_empty_types_become_placeholders() {
    let unknown = FieldDefinition::new("signature-pad", "Signature");
    let mut empty = FieldDefinition::new("", "Blank");
    empty.item = Some(ItemRef::new(Uuid::new_v4()));
    // Rules never run on placeholders
    empty.conditions = "hide".to_string();

    let definition = form_with(vec![unknown.clone(), empty.clone()]);
    let view = assembler().assemble_form(&definition);
    let fields = &view.sections[0].fields;

    assert_eq!(fields.len(), 2);
    for (field, source) in fields.iter().zip([&unknown, &empty]) {
        assert!(field.is_placeholder());
        assert!(field.type_id.is_none());
        assert!(!field.visible);
        assert_eq!(field.field_item_id, source.id);
        assert_eq!(field.item, source.item);
        assert_eq!(field.form_id, definition.item.id);
    }
}

#[test]
fn test_failing_factory_drops_only_that_field() {
    let mut registry = FieldTypeRegistry::with_builtin_fields();
    registry.register("broken", || {
        Err(FormError::Construction {
            type_id: "broken".to_string(),
            reason: "no default state".to_string(),
        })
    });
    let assembler = FormAssembler::new(
        Arc::new(registry),
        Arc::new(|_: &str, _: &mut dyn RuleSubject| {}),
    );

    let definition = form_with(vec![
        FieldDefinition::new("single-line-text", "Name"),
        FieldDefinition::new("broken", "Broken"),
        FieldDefinition::new("email", "Email"),
    ]);
    let view = assembler.assemble_form(&definition);

    let names: Vec<&str> = view.fields().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Name", "Email"]);
}

#[test]
fn test_field_copies_form_context() {
    let mut definition = form_with(vec![FieldDefinition::new("email", "Email")]);
    definition.form_type = FormType::Horizontal;
    definition.left_column_style = "col-md-3".to_string();
    definition.right_column_style = "col-md-9".to_string();

    let view = assembler().assemble_form(&definition);
    let field = view.field("Email").unwrap();

    assert_eq!(field.type_id.as_deref(), Some("email"));
    assert_eq!(field.title, "Email");
    assert_eq!(field.form_id, definition.item.id);
    assert_eq!(field.form_type, FormType::Horizontal);
    assert_eq!(field.left_column_style, "col-md-3");
    assert_eq!(field.right_column_style, "col-md-9");
    assert!(field.visible);
    assert!(field.show_title);
    assert!(field.show_information);
}

#[test]
fn test_localized_parameters_win() {
    let mut field = FieldDefinition::new("multiple-line-text", "Comments");
    field.parameters = params(&[("Label", "Comments"), ("Rows", "6")]);
    field.localized_parameters = params(&[("Label", "Kommentare")]);

    let view = assembler().assemble_form(&form_with(vec![field]));
    let field = view.field("Comments").unwrap();

    assert_eq!(state(field)["label"], "Kommentare");
    assert_eq!(state(field)["rows"], 6);
    assert_eq!(field.parameters.len(), 2);
    assert_eq!(field.parameters["Label"], "Kommentare");
}

#[test]
fn test_required_flag_needs_capability() {
    let mut email = FieldDefinition::new("email", "Email");
    email.is_required = true;
    let mut literal = FieldDefinition::new("literal-text", "Notice");
    literal.is_required = true;
    let optional = FieldDefinition::new("single-line-text", "Nickname");

    let view = assembler().assemble_form(&form_with(vec![email, literal, optional]));
    let required: Vec<bool> = view.fields().map(|f| f.is_required()).collect();

    assert_eq!(required, vec![true, false, false]);
}

#[test]
fn test_validation_messages_do_not_overwrite() {
    let mut field = FieldDefinition::new("email", "Email");
    field.parameters = params(&[("RequiredMessage", "Please enter your email")]);
    field.validation_messages = params(&[
        ("RequiredMessage", "Field is required"),
        ("FormatMessage", "Not an email address"),
    ]);

    let view = assembler().assemble_form(&form_with(vec![field]));
    let field = view.field("Email").unwrap();

    assert_eq!(field.parameters["RequiredMessage"], "Please enter your email");
    assert_eq!(field.parameters["FormatMessage"], "Not an email address");
}

#[test]
fn test_visible_false_in_configuration_drops_field() {
    let mut hidden = FieldDefinition::new("single-line-text", "Internal");
    hidden.parameters = params(&[("Visible", "false")]);

    let view = assembler().assemble_form(&form_with(vec![
        hidden,
        FieldDefinition::new("single-line-text", "Name"),
    ]));

    assert_eq!(view.fields().count(), 1);
    assert!(view.field("Internal").is_none());
}

#[test]
fn test_rules_prune_fields_and_sections() {
    let mut hidden_field = FieldDefinition::new("email", "Email");
    hidden_field.conditions = "hide".to_string();
    let mut definition = form_with(vec![
        hidden_field,
        FieldDefinition::new("single-line-text", "Name"),
    ]);

    let mut hidden_section = SectionDefinition::new("Billing");
    hidden_section.conditions = "hide".to_string();
    hidden_section.fields = vec![FieldDefinition::new("number", "Amount")];
    definition.sections.push(hidden_section);

    let mut emptied = SectionDefinition::new("Extras");
    let mut only_field = FieldDefinition::new("checkbox", "Newsletter");
    only_field.conditions = "hide".to_string();
    emptied.fields = vec![only_field];
    definition.sections.push(emptied);

    let view = assembler().assemble_form(&definition);

    let titles: Vec<&str> = view.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Contact", "Extras"]);
    assert_eq!(view.sections[0].fields.len(), 1);
    assert!(view.sections[1].fields.is_empty());
}

#[test]
fn test_rules_see_the_expression_and_can_bind() {
    let assembler = assembler_with(|expression: &str, subject: &mut dyn RuleSubject| {
        if let Some(label) = expression.strip_prefix("label=") {
            if let Some(slot) = subject.as_configurable().property("label") {
                let _ = slot.assign(label);
            }
        }
    });
    let mut field = FieldDefinition::new("single-line-text", "Name");
    field.conditions = "label=Full name".to_string();

    let view = assembler.assemble_form(&form_with(vec![field]));

    assert_eq!(state(view.field("Name").unwrap())["label"], "Full name");
}

#[test]
fn test_rules_run_after_initialize_and_before_query() {
    // Hides the field when the drop list holds `b` at rule time
    let assembler = assembler_with(|_: &str, subject: &mut dyn RuleSubject| {
        let scope = subject.rule_scope();
        if scope["control"]["value"] == "b" {
            subject.set_visible(false);
        }
    });

    let mut colour = FieldDefinition::new("drop-list", "Colour");
    colour.parameters = params(&[("Items", "a|b")]);
    colour.conditions = "check".to_string();

    let mut definition = form_with(vec![colour]);
    definition.read_query_string = true;
    definition.query_parameters = params(&[("Colour", "b")]);

    let view = assembler.assemble_form(&definition);
    let field = view.field("Colour").unwrap();

    assert_eq!(state(field)["value"], "b");
}

#[test]
fn test_query_prefill_conditions() {
    let mut email = FieldDefinition::new("email", "Email");
    email.name = Some("email_address".to_string());
    let mut nickname = FieldDefinition::new("single-line-text", "Nickname");
    nickname.parameters = params(&[("Value", "preset")]);
    let password = FieldDefinition::new("password", "Password");

    let mut definition = form_with(vec![email, nickname, password]);
    definition.query_parameters = params(&[
        ("Email", " foo@bar.com "),
        ("Nickname", ""),
        ("Password", "secret"),
    ]);

    // Off unless the form asks for it
    let view = assembler().assemble_form(&definition);
    assert!(state(view.field("email_address").unwrap())["value"].is_null());

    definition.read_query_string = true;
    let view = assembler().assemble_form(&definition);

    // Matched by title, not name
    assert_eq!(state(view.field("email_address").unwrap())["value"], "foo@bar.com");
    // Empty query values are ignored
    assert_eq!(state(view.field("Nickname").unwrap())["value"], "preset");
    // No query capability
    let password = view.field("Password").unwrap();
    assert!(password.result().unwrap().value.is_none());
}

#[test]
fn test_section_title_and_legend() {
    let mut section = SectionDefinition::new("Address");
    section.parameters = params(&[("ShowLegend", "No"), ("CssClass", "boxed")]);
    section.localized_parameters = params(&[("ShowLegend", "Yes"), ("Title", "Adresse")]);

    let view = assembler().assemble_section(&section, &FormViewModel::default()).unwrap();

    assert_eq!(view.title, "Adresse");
    assert_eq!(view.css_class, "boxed");
    assert_eq!(view.show_legend, "Yes");
    // Derived from the first pass only
    assert!(!view.show_title);
    assert!(view.show_information);
    assert_eq!(view.parameters["ShowLegend"], "Yes");
}

#[test]
fn test_section_legend_default_shows_title() {
    let mut section = SectionDefinition::new("Address");
    section.localized_parameters = params(&[("ShowLegend", "No")]);

    let view = assembler().assemble_section(&section, &FormViewModel::default()).unwrap();

    assert!(view.show_title);
    assert_eq!(view.show_legend, "No");
}

#[test]
fn test_untitled_section_is_kept_unbound() {
    let section = SectionDefinition {
        parameters: params(&[("CssClass", "boxed")]),
        ..Default::default()
    };

    let view = assembler().assemble_section(&section, &FormViewModel::default()).unwrap();

    assert!(view.title.is_empty());
    assert!(!view.show_title);
    assert!(!view.show_information);
    assert!(view.css_class.is_empty());
    assert!(view.fields.is_empty());
    assert!(view.visible);
    assert_eq!(view.parameters["CssClass"], "boxed");
}

#[test]
fn test_initializer_runs_during_assembly() {
    let mut colour = FieldDefinition::new("drop-list", "Colour");
    colour.parameters = params(&[("Items", "red|green"), ("SelectedValue", "purple")]);
    let mut amount = FieldDefinition::new("number", "Amount");
    amount.parameters = params(&[("Value", "250"), ("Maximum", "100")]);

    let view = assembler().assemble_form(&form_with(vec![colour, amount]));

    assert_eq!(state(view.field("Colour").unwrap())["value"], "red");
    assert_eq!(state(view.field("Amount").unwrap())["value"], "100");
}
