use formview::adapters::harvester::ResultHarvester;
use formview::config::{AliasConfig, Settings};
use formview::domain::{FieldDefinition, FormDefinition, ItemRef, SectionDefinition};
use std::collections::BTreeMap;
use uuid::Uuid;

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn contact_form() -> FormDefinition {
    let mut email = FieldDefinition::new("email", "Email");
    email.parameters = params(&[("Label", "Email")]);
    email.is_required = true;

    let mut phone = FieldDefinition::new("single-line-text", "Phone");
    phone.conditions = r#"params.Channel == "phone""#.to_string();
    phone.parameters = params(&[("Channel", "email")]);

    let mut topic = FieldDefinition::new("drop-list", "Topic");
    topic.parameters = params(&[("Items", "Sales|Support|Other")]);
    topic.conditions = r#"props.Label = "Topic (" + env + ")";"#.to_string();

    let mut contact = SectionDefinition::new("Contact");
    contact.fields = vec![email, phone, topic];

    let mut internal = SectionDefinition::new("Internal");
    internal.conditions = r#"env != "production""#.to_string();
    internal.fields = vec![FieldDefinition::new("literal-text", "Notes")];

    FormDefinition {
        unique_id: "contact".to_string(),
        item: ItemRef::new(Uuid::new_v4()),
        form_name: Some("Contact".to_string()),
        read_query_string: true,
        query_parameters: params(&[("Email", "foo@bar.com"), ("Topic", "Support")]),
        sections: vec![contact, internal],
        ..Default::default()
    }
}

fn settings(environment: &str) -> Settings {
    let mut settings = Settings::default();
    settings
        .rules
        .globals
        .insert("env".to_string(), environment.to_string());
    settings
}

#[test]
fn test_contact_form_end_to_end() {
    let mut definition = contact_form();
    let assembler = formview::build_assembler(&settings("production"));

    let mut view = assembler.assemble_form(&definition);

    // The Internal section is hidden by its rule
    assert_eq!(view.sections.len(), 1);
    let names: Vec<&str> = view.fields().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Email", "Topic"]);

    let email = view.field("Email").unwrap();
    let state = email.control.as_ref().unwrap().state();
    assert_eq!(state["label"], "Email");
    assert_eq!(state["value"], "foo@bar.com");
    assert_eq!(state["is_required"], true);

    let topic = view.field("Topic").unwrap();
    let state = topic.control.as_ref().unwrap().state();
    assert_eq!(state["label"], "Topic (production)");
    assert_eq!(state["value"], "Support");

    let submitted = params(&[("Email", "ada@example.com"), ("Unknown", "x")]);
    assert_eq!(view.apply_submission(&submitted), 1);

    let results = ResultHarvester::harvest(&view, &mut definition);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].field_name, "Email");
    assert_eq!(results[0].value.as_deref(), Some("ada@example.com"));
    assert_eq!(results[1].field_name, "Topic");
    assert_eq!(results[1].value.as_deref(), Some("Support"));
    assert_eq!(results[1].parameters, "Sales|Support|Other");
    assert_eq!(definition.results.len(), 2);
}

#[test]
fn test_rule_globals_change_the_tree() {
    let assembler = formview::build_assembler(&settings("staging"));

    let view = assembler.assemble_form(&contact_form());

    assert_eq!(view.sections.len(), 2);
    assert!(view.field("Notes").is_some());
}

#[test]
fn test_configured_alias_and_disabled_type() {
    let mut settings = settings("staging");
    settings.registry.aliases.push(AliasConfig {
        alias: "Acme.Forms.Email".to_string(),
        target: "email".to_string(),
    });
    settings.registry.disabled.push("literal-text".to_string());
    let assembler = formview::build_assembler(&settings);

    let mut definition = contact_form();
    definition.sections[0].fields[0].field_type = "Acme.Forms.Email, Acme.Forms".to_string();

    let view = assembler.assemble_form(&definition);

    let email = view.field("Email").unwrap();
    assert_eq!(email.type_id.as_deref(), Some("email"));

    // Disabled types keep their position as placeholders
    let internal = &view.sections[1];
    assert_eq!(internal.fields.len(), 1);
    assert!(internal.fields[0].is_placeholder());
}

#[test]
fn test_view_serializes_to_json() {
    let assembler = formview::build_assembler(&settings("production"));
    let view = assembler.assemble_form(&contact_form());

    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["unique_id"], "contact");
    assert_eq!(json["form_type"], "basic");
    let field = &json["sections"][0]["fields"][0];
    assert_eq!(field["control"]["kind"], "email");
    assert_eq!(field["control"]["state"]["value"], "foo@bar.com");
}
