use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use tracing::debug;

use super::data::FormData;
use super::errors::FieldErrors;
use super::fields::{self, NOT_A_VALID_CHOICE, NOT_A_VALID_INTEGER};
use crate::config::FormsConfig;
use crate::models::board::{Board, BoardId, BoardRepository, RepositoryError};
use crate::models::campaign::{Campaign, CampaignContent};
use crate::models::choices::{BannerLocation, CampaignPosition};
use crate::models::flags::{FlagSelection, UserFlag};

const CONTENT_PREFIX: &str = "content";

/// Validated campaign content, ready to be assigned to a [`CampaignContent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedCampaignContent {
    pub subject: Option<String>,
    pub blurb: Option<String>,
    pub description: Option<String>,
    pub banner_image: Option<String>,
    pub banner_location: BannerLocation,
}

impl ValidatedCampaignContent {
    pub fn populate(self, content: &mut CampaignContent) {
        content.subject = self.subject;
        content.blurb = self.blurb;
        content.description = self.description;
        content.banner_image = self.banner_image;
        content.banner_location = self.banner_location;
    }
}

impl From<ValidatedCampaignContent> for CampaignContent {
    fn from(validated: ValidatedCampaignContent) -> Self {
        CampaignContent {
            subject: validated.subject,
            blurb: validated.blurb,
            description: validated.description,
            banner_image: validated.banner_image,
            banner_location: validated.banner_location,
        }
    }
}

/// Validated campaign, ready to be assigned to a [`Campaign`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedCampaign {
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub public: bool,
    pub position: CampaignPosition,
    pub priority: i32,
    pub boards: Vec<Board>,
    pub geonameids: Vec<u64>,
    pub user_required: Option<bool>,
    pub flags: FlagSelection,
    pub content: ValidatedCampaignContent,
}

impl ValidatedCampaign {
    /// Overwrite every form-managed attribute of `campaign`. Actions are kept.
    pub fn populate(self, campaign: &mut Campaign) {
        campaign.title = self.title;
        campaign.start_at = self.start_at;
        campaign.end_at = self.end_at;
        campaign.public = self.public;
        campaign.position = self.position;
        campaign.priority = self.priority;
        campaign.boards = self.boards.iter().map(|board| board.id).collect();
        campaign.geonameids = self.geonameids;
        campaign.user_required = self.user_required;
        campaign.flags = self.flags;
        self.content.populate(&mut campaign.content);
    }
}

impl From<ValidatedCampaign> for Campaign {
    fn from(validated: ValidatedCampaign) -> Self {
        Campaign {
            title: validated.title,
            start_at: validated.start_at,
            end_at: validated.end_at,
            public: validated.public,
            position: validated.position,
            priority: validated.priority,
            boards: validated.boards.iter().map(|board| board.id).collect(),
            geonameids: validated.geonameids,
            user_required: validated.user_required,
            flags: validated.flags,
            content: validated.content.into(),
            actions: Vec::new(),
        }
    }
}

/// Failure of a campaign submission.
#[derive(Debug, thiserror::Error)]
pub enum CampaignFormError {
    #[error("campaign form is invalid: {0}")]
    Invalid(#[from] FieldErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CampaignFormError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            CampaignFormError::Invalid(errors) => Some(errors),
            CampaignFormError::Repository(_) => None,
        }
    }
}

/// Subject, blurb, description and banner of a campaign.
#[derive(Debug, Clone, Copy, Default)]
pub struct CampaignContentForm;

impl CampaignContentForm {
    pub fn validate(&self, data: &FormData) -> Result<ValidatedCampaignContent, FieldErrors> {
        let mut errors = FieldErrors::new();

        let subject = fields::optional_text(data.first("subject"));
        let blurb = rich_text(data, "blurb", &mut errors);
        let description = rich_text(data, "description", &mut errors);
        let banner_image = fields::optional_text(data.first("banner_image"));
        let banner_location =
            required_choice::<BannerLocation>(data, "banner_location", None, &mut errors);

        match banner_location {
            Some(banner_location) if errors.is_empty() => Ok(ValidatedCampaignContent {
                subject,
                blurb,
                description,
                banner_image,
                banner_location,
            }),
            _ => Err(errors),
        }
    }
}

/// The campaign editor. Board choices come from the injected repository.
pub struct CampaignForm<'a, B: ?Sized> {
    boards: &'a B,
    timezone: FixedOffset,
}

impl<'a, B> CampaignForm<'a, B>
where
    B: BoardRepository + ?Sized,
{
    pub fn new(boards: &'a B, config: &FormsConfig) -> Self {
        Self {
            boards,
            timezone: config.timezone,
        }
    }

    /// Board choices in display order.
    pub fn board_choices(&self) -> Result<Vec<Board>, RepositoryError> {
        self.boards.selectable()
    }

    pub fn validate(&self, data: &FormData) -> Result<ValidatedCampaign, CampaignFormError> {
        let selectable = self.board_choices()?;
        let mut errors = FieldErrors::new();

        let title = fields::strip(data.first("title")).unwrap_or_default();
        if title.is_empty() {
            errors.add("title", "A title is required");
        }

        let start_at = datetime_field(data, "start_at", &self.timezone, &mut errors);
        let end_at = datetime_field(data, "end_at", &self.timezone, &mut errors);
        if let (Some(start_at), Some(end_at)) = (start_at, end_at) {
            if end_at <= start_at {
                errors.add("end_at", "The campaign can’t end before it starts");
            }
        }

        let public = fields::checkbox(data.first("public"));
        let position = required_choice::<CampaignPosition>(data, "position", None, &mut errors);
        let priority = priority_field(data, &mut errors);
        let boards = selected_boards(data.all("boards"), selectable, &mut errors);
        let geonameids = numeric_geonameids(data.all("geonameids"));
        let user_required = fields::getbool(data.first("user_required"));

        let mut flags = FlagSelection::new();
        for flag in UserFlag::ALL {
            flags.set(*flag, fields::getbool(data.first(flag.key())));
        }

        let content = match CampaignContentForm.validate(&data.nested(CONTENT_PREFIX)) {
            Ok(content) => Some(content),
            Err(nested) => {
                errors.merge_nested(CONTENT_PREFIX, nested);
                None
            }
        };

        match (start_at, end_at, position, content) {
            (Some(start_at), Some(end_at), Some(position), Some(content)) if errors.is_empty() => {
                Ok(ValidatedCampaign {
                    title,
                    start_at,
                    end_at,
                    public,
                    position,
                    priority,
                    boards,
                    geonameids,
                    user_required,
                    flags,
                    content,
                })
            }
            _ => {
                debug!(fields = ?errors.fields().collect::<Vec<_>>(), "campaign form rejected");
                Err(CampaignFormError::Invalid(errors))
            }
        }
    }
}

/// Keep entries made only of ASCII digits and coerce them; everything else,
/// blanks and padded values included, is dropped without an error.
pub fn numeric_geonameids(values: &[String]) -> Vec<u64> {
    values
        .iter()
        .filter(|value| !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|value| value.parse::<u64>().ok())
        .collect()
}

fn selected_boards(values: &[String], selectable: Vec<Board>, errors: &mut FieldErrors) -> Vec<Board> {
    let mut wanted = Vec::new();
    let mut invalid = false;

    for value in values.iter().map(|value| value.trim()).filter(|v| !v.is_empty()) {
        match value.parse::<u32>().map(BoardId) {
            Ok(id) if selectable.iter().any(|board| board.id == id) => wanted.push(id),
            _ => invalid = true,
        }
    }

    if invalid {
        errors.add("boards", NOT_A_VALID_CHOICE);
        return Vec::new();
    }

    selectable
        .into_iter()
        .filter(|board| wanted.contains(&board.id))
        .collect()
}

fn priority_field(data: &FormData, errors: &mut FieldErrors) -> i32 {
    match fields::integer(data.first("priority")) {
        Ok(None) => 0,
        Ok(Some(value)) => i32::try_from(value).unwrap_or_else(|_| {
            errors.add("priority", NOT_A_VALID_INTEGER);
            0
        }),
        Err(message) => {
            errors.add("priority", message);
            0
        }
    }
}

fn datetime_field(
    data: &FormData,
    name: &str,
    timezone: &FixedOffset,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    match fields::datetime(data.all(name), timezone) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.add(name, message);
            None
        }
    }
}

/// Optional rich text; blank is `None`, and every embedded link must be valid.
pub(crate) fn rich_text(data: &FormData, name: &str, errors: &mut FieldErrors) -> Option<String> {
    let value = data.first(name).filter(|value| !value.trim().is_empty())?;
    for message in fields::all_urls_valid(value) {
        errors.add(name, message);
    }
    Some(value.to_string())
}

/// A choice that must be present. Blank input is never a valid choice;
/// `required` is stacked after that message when given.
pub(crate) fn required_choice<T: crate::models::choices::Choice>(
    data: &FormData,
    name: &str,
    required: Option<&str>,
    errors: &mut FieldErrors,
) -> Option<T> {
    match fields::choice::<T>(data.first(name)) {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            errors.add(name, NOT_A_VALID_CHOICE);
            if let Some(message) = required {
                errors.add(name, message);
            }
            None
        }
        Err(message) => {
            errors.add(name, message);
            None
        }
    }
}
