pub mod board;
pub mod campaign;
pub mod choices;
pub mod flags;

pub use board::{Board, BoardId, BoardRepository, RepositoryError};
pub use campaign::{Campaign, CampaignAction, CampaignContent};
pub use choices::{ActionCategory, BannerLocation, CampaignActionType, CampaignPosition, Choice};
pub use flags::{flag_choices, FlagCategory, FlagChoice, FlagSelection, UserFlag, UserFlagValues};
