use uuid::Uuid;
use voyra_catalog::{LayoutError, TransportMode};

/// Declares a closed string-valued enum: serde names, `as_str`, `Display`
/// and a `FromStr` that reports the offending value as a validation error.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($label:literal) {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::CoreError::Validation(format!("Invalid {}: {}", $label, other))),
                }
            }
        }
    };
}

pub mod booking;
pub mod bus;
pub mod calendar;
pub mod fleet;
pub mod flight;
pub mod repository;
pub mod route;
pub mod search;
pub mod seat_layout;
pub mod seating;
pub mod stats;
pub mod user;
pub mod vehicle;

pub use fleet::FleetService;
pub use repository::Repositories;
pub use search::SearchService;
pub use seating::SeatingService;
pub use stats::StatsService;
pub use user::UserDirectory;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Seat layout not found for this {mode}")]
    SeatMapNotFound { mode: TransportMode, vehicle_id: Uuid },
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("Repository error: {0}")]
    Repository(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<repository::RepoError> for CoreError {
    fn from(err: repository::RepoError) -> Self {
        CoreError::Repository(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

pub(crate) fn require_text(field: &str, value: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("Please provide {}", field)));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn check_rating(rating: f64) -> CoreResult<()> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(CoreError::Validation("Rating must be between 0 and 5".into()));
    }
    Ok(())
}
