pub mod error;
pub mod repository;
pub mod review;
pub mod state;

pub use error::MappingError;
pub use repository::{DraftMetadata, DraftRepository, MappingDraft};
pub use review::{ReviewSummary, session_from_matches};
pub use state::{CLOSE_DELAY, ConfirmOptions, MappingEditSession, MappingRow, SaveState};
