use serde::Serialize;
use tracing::debug;

use super::campaign::{required_choice, rich_text};
use super::data::FormData;
use super::errors::FieldErrors;
use super::fields::{self, NOT_A_VALID_INTEGER};
use crate::models::campaign::CampaignAction;
use crate::models::choices::{ActionCategory, CampaignActionType};

pub const LINK_MAX_LENGTH: usize = 250;

const THIS_IS_REQUIRED: &str = "This is required";

/// Validated call-to-action, ready to be assigned to a [`CampaignAction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedCampaignAction {
    pub title: String,
    pub icon: Option<String>,
    pub public: bool,
    #[serde(rename = "type")]
    pub action_type: CampaignActionType,
    pub group: Option<String>,
    pub category: ActionCategory,
    pub message: Option<String>,
    pub link: Option<String>,
    pub form: Option<String>,
    pub seq: i32,
}

impl ValidatedCampaignAction {
    pub fn populate(self, action: &mut CampaignAction) {
        *action = self.into();
    }
}

impl From<ValidatedCampaignAction> for CampaignAction {
    fn from(validated: ValidatedCampaignAction) -> Self {
        CampaignAction {
            title: validated.title,
            icon: validated.icon,
            public: validated.public,
            action_type: validated.action_type,
            group: validated.group,
            category: validated.category,
            message: validated.message,
            link: validated.link,
            form: validated.form,
            seq: validated.seq,
        }
    }
}

/// Editor for a campaign's call-to-action buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct CampaignActionForm;

impl CampaignActionForm {
    pub fn validate(&self, data: &FormData) -> Result<ValidatedCampaignAction, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = fields::strip(data.first("title")).unwrap_or_default();
        if title.is_empty() {
            errors.add("title", "You must provide some text");
        }

        let icon = fields::optional_text(data.first("icon"));
        let public = fields::checkbox(data.first("public"));
        let action_type =
            required_choice::<CampaignActionType>(data, "type", Some(THIS_IS_REQUIRED), &mut errors);
        let group = fields::optional_text(data.first("group"));
        let category =
            required_choice::<ActionCategory>(data, "category", Some(THIS_IS_REQUIRED), &mut errors);
        let message = rich_text(data, "message", &mut errors);
        let link = link_field(data, &mut errors);
        let form = data
            .first("form")
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string);
        let seq = seq_field(data, &mut errors);

        match (action_type, category, seq) {
            (Some(action_type), Some(category), Some(seq)) if errors.is_empty() => {
                Ok(ValidatedCampaignAction {
                    title,
                    icon,
                    public,
                    action_type,
                    group,
                    category,
                    message,
                    link,
                    form,
                    seq,
                })
            }
            _ => {
                debug!(fields = ?errors.fields().collect::<Vec<_>>(), "campaign action form rejected");
                Err(errors)
            }
        }
    }
}

/// Blank links are allowed; anything else is length-capped and must be a web URL.
fn link_field(data: &FormData, errors: &mut FieldErrors) -> Option<String> {
    let link = fields::optional_text(data.first("link"))?;

    if let Err(message) = fields::max_length(&link, LINK_MAX_LENGTH) {
        errors.add("link", message);
    }
    if let Err(message) = fields::web_url(&link) {
        errors.add("link", message);
    }
    Some(link)
}

/// Zero counts as missing, like any other falsy required value. A value
/// that fails to parse leaves nothing behind, so it is also missing.
fn seq_field(data: &FormData, errors: &mut FieldErrors) -> Option<i32> {
    let parsed = match fields::integer(data.first("seq")) {
        Ok(value) => value,
        Err(message) => {
            errors.add("seq", message);
            None
        }
    };

    match parsed {
        None | Some(0) => {
            errors.add("seq", THIS_IS_REQUIRED);
            None
        }
        Some(value) => match i32::try_from(value) {
            Ok(seq) => Some(seq),
            Err(_) => {
                errors.add("seq", NOT_A_VALID_INTEGER);
                None
            }
        },
    }
}
