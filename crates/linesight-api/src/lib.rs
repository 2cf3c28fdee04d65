pub mod checksum;
pub mod client;
pub mod error;

pub use checksum::compute_file_sha256;
pub use client::IngestClient;
pub use error::{ApiError, Result};
