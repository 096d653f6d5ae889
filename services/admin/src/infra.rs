use hasjob::models::{Board, BoardId, BoardRepository, RepositoryError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryBoardRepository {
    boards: Arc<RwLock<Vec<Board>>>,
}

impl InMemoryBoardRepository {
    pub(crate) fn seeded() -> Self {
        Self {
            boards: Arc::new(RwLock::new(sample_boards())),
        }
    }
}

impl BoardRepository for InMemoryBoardRepository {
    fn boards(&self) -> Result<Vec<Board>, RepositoryError> {
        self.boards
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| RepositoryError::Unavailable("board store lock poisoned".to_string()))
    }
}

fn sample_boards() -> Vec<Board> {
    [
        (1, "www", "Hasjob", true),
        (2, "tech", "Tech jobs", true),
        (3, "design", "Design jobs", false),
        (4, "remote", "Remote work", false),
    ]
    .into_iter()
    .map(|(id, name, title, featured)| Board {
        id: BoardId(id),
        name: name.to_string(),
        title: title.to_string(),
        featured,
    })
    .collect()
}
