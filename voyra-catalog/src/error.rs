use crate::layout::TransportMode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid {mode} seat class: {name}")]
    UnknownClass { mode: TransportMode, name: String },

    #[error("Total seats must match the number of seats in layout (declared {declared}, found {actual})")]
    LayoutMismatch { declared: u32, actual: usize },

    #[error("Duplicate seat number in layout: {0}")]
    DuplicateSeatNumber(String),

    #[error("Duplicate seat position in layout: row {row}, column {column}")]
    DuplicatePosition { row: u32, column: u32 },

    #[error("Invalid seat {0}: rows and columns start at 1 and seat numbers cannot be blank")]
    InvalidSeat(String),

    #[error("Seat layout label is required")]
    MissingLabel,
}

impl LayoutError {
    /// True when the caller asked for a class outside the registry.
    pub fn is_unknown_class(&self) -> bool {
        matches!(self, LayoutError::UnknownClass { .. })
    }
}
