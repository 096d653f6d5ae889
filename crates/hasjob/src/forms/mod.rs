//! Campaign administration forms.
//!
//! Each form takes the submitted field map and returns either a validated
//! record or every field error at once. Nothing is written to an entity
//! until a validated record is explicitly applied with `populate`.

pub mod action;
pub mod campaign;
pub mod data;
pub mod errors;
pub mod fields;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use action::{CampaignActionForm, ValidatedCampaignAction, LINK_MAX_LENGTH};
pub use campaign::{
    numeric_geonameids, CampaignContentForm, CampaignForm, CampaignFormError, ValidatedCampaign,
    ValidatedCampaignContent,
};
pub use data::FormData;
pub use errors::FieldErrors;
pub use router::campaign_router;
pub use service::CampaignFormService;
