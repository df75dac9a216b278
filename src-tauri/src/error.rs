use thiserror::Error;

use crate::state::TabId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TabListError {
    #[error("failed to list tabs: {0}")]
    Provider(String),
    #[error("failed to close {} tab(s): {reason}", .ids.len())]
    Close { ids: Vec<TabId>, reason: String },
    #[error("invalid settings: {0}")]
    Config(String),
}
