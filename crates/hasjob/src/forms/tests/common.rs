use std::sync::{Arc, Mutex};

use chrono::FixedOffset;

use crate::config::FormsConfig;
use crate::forms::{CampaignFormService, FormData};
use crate::models::board::{Board, BoardId, BoardRepository, RepositoryError};

#[derive(Default, Clone)]
pub(super) struct MemoryBoards {
    boards: Arc<Mutex<Vec<Board>>>,
}

impl MemoryBoards {
    pub(super) fn with(boards: Vec<Board>) -> Self {
        Self {
            boards: Arc::new(Mutex::new(boards)),
        }
    }
}

impl BoardRepository for MemoryBoards {
    fn boards(&self) -> Result<Vec<Board>, RepositoryError> {
        Ok(self.boards.lock().expect("boards mutex poisoned").clone())
    }
}

pub(super) struct UnavailableBoards;

impl BoardRepository for UnavailableBoards {
    fn boards(&self) -> Result<Vec<Board>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn board(id: u32, name: &str, title: &str, featured: bool) -> Board {
    Board {
        id: BoardId(id),
        name: name.to_string(),
        title: title.to_string(),
        featured,
    }
}

/// Zeta (not featured) and Alpha (featured).
pub(super) fn boards() -> MemoryBoards {
    MemoryBoards::with(vec![
        board(1, "zeta", "Zeta", false),
        board(2, "alpha", "Alpha", true),
    ])
}

pub(super) fn utc_config() -> FormsConfig {
    FormsConfig {
        timezone: FixedOffset::east_opt(0).expect("valid offset"),
    }
}

pub(super) fn campaign_data() -> FormData {
    FormData::new()
        .with("title", "  Diwali hiring drive  ")
        .with("start_at", "2026-10-20 09:00")
        .with("end_at", "2026-10-27 18:00")
        .with("public", "y")
        .with("position", "1")
        .with("content-subject", "Hiring now")
        .with("content-blurb", r#"<p>See <a href="https://hasjob.co/drive">openings</a></p>"#)
        .with("content-banner_location", "0")
}

pub(super) fn action_data() -> FormData {
    FormData::new()
        .with("title", "Apply now")
        .with("type", "L")
        .with("category", "primary")
        .with("link", "https://hasjob.co/apply")
        .with("seq", "1")
}

pub(super) fn service(boards: MemoryBoards) -> Arc<CampaignFormService<MemoryBoards>> {
    Arc::new(CampaignFormService::new(Arc::new(boards), utc_config()))
}
