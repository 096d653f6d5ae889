use super::common::*;
use crate::forms::{CampaignActionForm, FieldErrors, FormData, LINK_MAX_LENGTH};
use crate::models::campaign::CampaignAction;
use crate::models::choices::{ActionCategory, CampaignActionType};

fn errors_for(data: &FormData) -> FieldErrors {
    match CampaignActionForm.validate(data) {
        Err(errors) => errors,
        Ok(action) => panic!("expected field errors, got {action:?}"),
    }
}

fn without(mut data: FormData, field: &str) -> FormData {
    data.remove(field);
    data
}

#[test]
fn valid_action_produces_typed_record() {
    let action = CampaignActionForm
        .validate(&action_data().with("icon", "").with("group", " morning "))
        .expect("action validates");

    assert_eq!(action.title, "Apply now");
    assert_eq!(action.action_type, CampaignActionType::Link);
    assert_eq!(action.category, ActionCategory::Primary);
    assert_eq!(action.icon, None);
    assert_eq!(action.group.as_deref(), Some("morning"));
    assert_eq!(action.seq, 1);
    assert!(!action.public);
}

#[test]
fn missing_title_and_seq_are_both_required() {
    let data = without(without(action_data(), "title"), "seq");
    let errors = errors_for(&data);

    assert_eq!(errors.get("title"), ["You must provide some text"]);
    assert_eq!(errors.get("seq"), ["This is required"]);
    assert_eq!(errors.len(), 2);
}

#[test]
fn zero_sequence_counts_as_missing() {
    let data = without(action_data(), "seq").with("seq", "0");
    assert_eq!(errors_for(&data).get("seq"), ["This is required"]);

    let data = without(action_data(), "seq").with("seq", "first");
    assert_eq!(
        errors_for(&data).get("seq"),
        ["Not a valid integer value", "This is required"]
    );
}

#[test]
fn type_and_category_are_required_choices() {
    let data = without(without(action_data(), "type"), "category");
    let errors = errors_for(&data);
    assert_eq!(errors.get("type"), ["Not a valid choice", "This is required"]);
    assert_eq!(
        errors.get("category"),
        ["Not a valid choice", "This is required"]
    );

    let data = without(action_data(), "type").with("type", "X");
    assert_eq!(errors_for(&data).get("type"), ["Not a valid choice"]);
}

fn link_of_length(length: usize) -> String {
    let prefix = "https://hasjob.co/";
    format!("{prefix}{}", "a".repeat(length - prefix.len()))
}

#[test]
fn link_of_exactly_max_length_passes() {
    let link = link_of_length(LINK_MAX_LENGTH);
    assert_eq!(link.len(), 250);

    let action = CampaignActionForm
        .validate(&without(action_data(), "link").with("link", link.clone()))
        .expect("250 character link validates");
    assert_eq!(action.link, Some(link));
}

#[test]
fn link_longer_than_max_length_fails() {
    let link = link_of_length(LINK_MAX_LENGTH + 1);
    let errors = errors_for(&without(action_data(), "link").with("link", link));
    assert_eq!(errors.get("link"), ["250 characters maximum"]);
}

#[test]
fn link_is_optional_but_must_be_well_formed() {
    let action = CampaignActionForm
        .validate(&without(action_data(), "link").with("link", "   "))
        .expect("blank link validates");
    assert_eq!(action.link, None);

    let errors = errors_for(&without(action_data(), "link").with("link", "hasjob dot co"));
    assert_eq!(errors.get("link"), ["The URL “hasjob dot co” is not valid"]);
}

#[test]
fn message_links_must_be_valid() {
    let data = action_data().with("message", r#"<p>Thanks! <a href="http://">back</a></p>"#);
    assert!(errors_for(&data).contains("message"));
}

#[test]
fn form_definition_is_kept_verbatim() {
    let definition = "{\n  \"fields\": [\"name\", \"email\"]\n}";
    let action = CampaignActionForm
        .validate(&without(action_data(), "type").with("type", "F").with("form", definition))
        .expect("form action validates");
    assert_eq!(action.form.as_deref(), Some(definition));
}

#[test]
fn populate_overwrites_existing_action() {
    let mut action: CampaignAction = CampaignActionForm
        .validate(&action_data())
        .expect("action validates")
        .into();

    CampaignActionForm
        .validate(
            &without(without(action_data(), "title"), "seq")
                .with("title", "Maybe later")
                .with("seq", "4")
                .with("public", "on"),
        )
        .expect("action validates")
        .populate(&mut action);

    assert_eq!(action.title, "Maybe later");
    assert_eq!(action.seq, 4);
    assert!(action.public);
}
