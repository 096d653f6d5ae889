use std::sync::Arc;

use tracing::{info, warn};

use super::action::{CampaignActionForm, ValidatedCampaignAction};
use super::campaign::{CampaignForm, CampaignFormError, ValidatedCampaign};
use super::data::FormData;
use super::errors::FieldErrors;
use crate::config::FormsConfig;
use crate::models::board::{Board, BoardRepository, RepositoryError};

/// Entry point the HTTP layer uses to run the campaign forms.
pub struct CampaignFormService<B> {
    boards: Arc<B>,
    config: FormsConfig,
}

impl<B> CampaignFormService<B>
where
    B: BoardRepository + 'static,
{
    pub fn new(boards: Arc<B>, config: FormsConfig) -> Self {
        Self { boards, config }
    }

    pub fn board_choices(&self) -> Result<Vec<Board>, RepositoryError> {
        self.campaign_form().board_choices()
    }

    pub fn validate_campaign(&self, data: &FormData) -> Result<ValidatedCampaign, CampaignFormError> {
        let result = self.campaign_form().validate(data);
        match &result {
            Ok(campaign) => info!(
                title = %campaign.title,
                boards = campaign.boards.len(),
                "campaign submission validated"
            ),
            Err(CampaignFormError::Invalid(errors)) => {
                info!(invalid_fields = errors.len(), "campaign submission rejected")
            }
            Err(CampaignFormError::Repository(err)) => {
                warn!(error = %err, "board lookup failed during campaign validation")
            }
        }
        result
    }

    pub fn validate_action(&self, data: &FormData) -> Result<ValidatedCampaignAction, FieldErrors> {
        let result = CampaignActionForm.validate(data);
        match &result {
            Ok(action) => info!(seq = action.seq, "campaign action submission validated"),
            Err(errors) => info!(
                invalid_fields = errors.len(),
                "campaign action submission rejected"
            ),
        }
        result
    }

    fn campaign_form(&self) -> CampaignForm<'_, B> {
        CampaignForm::new(self.boards.as_ref(), &self.config)
    }
}
