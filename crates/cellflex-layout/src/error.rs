// ABOUTME: Error type for widget tree operations.
// ABOUTME: Covers unknown handles, malformed descriptors, and out-of-range indices.

use crate::WidgetId;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Unknown widget handle {0}")]
    UnknownWidget(WidgetId),

    #[error("No widget with id '{0}'")]
    UnknownName(String),

    #[error("Widget id must not be empty")]
    EmptyId,

    #[error("Widget id '{0}' is already registered")]
    DuplicateId(String),

    #[error("Widget '{0}' cannot hold children")]
    NotAContainer(String),

    #[error("Widget '{0}' is not a splitter")]
    NotASplit(String),

    #[error("Insert index {index} out of range for {len} panes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Divider {index} out of range ({count} dividers)")]
    DividerOutOfRange { index: usize, count: usize },

    #[error("Grid position ({column}, {row}) does not address a cell")]
    InvalidGridPosition { column: f64, row: f64 },

    #[error("Unknown property '{0}'")]
    UnknownProperty(String),

    #[error("Invalid value '{value}' for property '{prop}'")]
    InvalidValue { prop: String, value: String },
}
