use serde::{Deserialize, Serialize};

/// Primary key of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(pub u32);

/// A named collection of job posts that campaigns can be restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub title: String,
    pub featured: bool,
}

impl Board {
    /// Label shown next to the board's checkbox.
    pub fn title_and_name(&self) -> String {
        format!("{} ({})", self.title, self.name)
    }
}

/// Storage abstraction for board lookups so forms stay free of database access.
pub trait BoardRepository: Send + Sync {
    fn boards(&self) -> Result<Vec<Board>, RepositoryError>;

    /// Boards offered by the campaign form: featured first, then by title.
    fn selectable(&self) -> Result<Vec<Board>, RepositoryError> {
        let mut boards = self.boards()?;
        boards.sort_by(|a, b| {
            b.featured
                .cmp(&a.featured)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(boards)
    }

    fn find(&self, id: BoardId) -> Result<Option<Board>, RepositoryError> {
        Ok(self.boards()?.into_iter().find(|board| board.id == id))
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
