mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use http_mapping::{post_error_to_status_code, repository_error_to_status_code};
pub use traits::PostRepository;
pub use types::{ScanPage, StoredRecord, WriteAck};
