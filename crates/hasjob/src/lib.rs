//! Campaign administration for the Hasjob job board: form schemas that turn
//! submitted fields into validated campaign records, the models they bind
//! to, and the operator tool for issuing Twitter access credentials.

pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod telemetry;
pub mod twitter;
