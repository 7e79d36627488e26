use force_layout::LayoutError;
use thiserror::Error;

use crate::knowledge::KnowledgeGraphError;
use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid knowledge graph: {0}")]
    KnowledgeGraph(#[from] KnowledgeGraphError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}
