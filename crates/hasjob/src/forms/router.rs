use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::campaign::CampaignFormError;
use super::data::FormData;
use super::errors::FieldErrors;
use super::service::CampaignFormService;
use crate::models::board::{Board, BoardId, BoardRepository};
use crate::models::choices::{
    ActionCategory, BannerLocation, CampaignActionType, CampaignPosition, Choice,
};
use crate::models::flags::{flag_choices, FlagChoice};

/// Board option as offered to the campaign editor.
#[derive(Debug, Clone, Serialize)]
pub struct BoardChoiceView {
    pub id: BoardId,
    pub name: String,
    pub title: String,
    pub featured: bool,
    pub label: String,
}

impl From<Board> for BoardChoiceView {
    fn from(board: Board) -> Self {
        let label = board.title_and_name();
        Self {
            id: board.id,
            name: board.name,
            title: board.title,
            featured: board.featured,
            label,
        }
    }
}

/// A radio option offered by the editor.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceView {
    pub code: &'static str,
    pub label: &'static str,
}

fn choice_views<T: Choice>() -> Vec<ChoiceView> {
    T::choices()
        .into_iter()
        .map(|(code, label)| ChoiceView { code, label })
        .collect()
}

/// Every closed option set the campaign and action editors render.
#[derive(Debug, Clone, Serialize)]
pub struct EditorChoices {
    pub position: Vec<ChoiceView>,
    pub banner_location: Vec<ChoiceView>,
    pub action_type: Vec<ChoiceView>,
    pub category: Vec<ChoiceView>,
}

impl EditorChoices {
    pub fn catalog() -> Self {
        Self {
            position: choice_views::<CampaignPosition>(),
            banner_location: choice_views::<BannerLocation>(),
            action_type: choice_views::<CampaignActionType>(),
            category: choice_views::<ActionCategory>(),
        }
    }
}

/// Router exposing the campaign form boundary over JSON.
pub fn campaign_router<B>(service: Arc<CampaignFormService<B>>) -> Router
where
    B: BoardRepository + 'static,
{
    Router::new()
        .route("/api/v1/campaigns/boards", get(boards_handler::<B>))
        .route("/api/v1/campaigns/flags", get(flags_handler))
        .route("/api/v1/campaigns/choices", get(choices_handler))
        .route("/api/v1/campaigns/validate", post(validate_campaign_handler::<B>))
        .route(
            "/api/v1/campaigns/actions/validate",
            post(validate_action_handler::<B>),
        )
        .with_state(service)
}

fn invalid_response(errors: &FieldErrors) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(json!({ "errors": errors })),
    )
        .into_response()
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({ "error": message })),
    )
        .into_response()
}

pub(crate) async fn boards_handler<B>(
    State(service): State<Arc<CampaignFormService<B>>>,
) -> Response
where
    B: BoardRepository + 'static,
{
    match service.board_choices() {
        Ok(boards) => {
            let views: Vec<BoardChoiceView> = boards.into_iter().map(Into::into).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => internal_error(err.to_string()),
    }
}

pub(crate) async fn flags_handler() -> axum::Json<Vec<FlagChoice>> {
    axum::Json(flag_choices())
}

pub(crate) async fn choices_handler() -> axum::Json<EditorChoices> {
    axum::Json(EditorChoices::catalog())
}

pub(crate) async fn validate_campaign_handler<B>(
    State(service): State<Arc<CampaignFormService<B>>>,
    axum::Json(data): axum::Json<FormData>,
) -> Response
where
    B: BoardRepository + 'static,
{
    match service.validate_campaign(&data) {
        Ok(campaign) => (StatusCode::OK, axum::Json(campaign)).into_response(),
        Err(CampaignFormError::Invalid(errors)) => invalid_response(&errors),
        Err(other) => internal_error(other.to_string()),
    }
}

pub(crate) async fn validate_action_handler<B>(
    State(service): State<Arc<CampaignFormService<B>>>,
    axum::Json(data): axum::Json<FormData>,
) -> Response
where
    B: BoardRepository + 'static,
{
    match service.validate_action(&data) {
        Ok(action) => (StatusCode::OK, axum::Json(action)).into_response(),
        Err(errors) => invalid_response(&errors),
    }
}
