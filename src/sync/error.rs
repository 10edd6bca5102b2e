use thiserror::Error;

use crate::catalog::{CatalogFetchError, DetailFetchError};
use crate::tree::StorageSetupError;

/// A failure that ends the run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Catalog fetch failed: {0}")]
    Catalog(#[from] CatalogFetchError),

    #[error("Building the content tree failed: {0}")]
    Storage(#[from] StorageSetupError),

    #[error("Photo detail fetch failed: {0}")]
    Detail(#[from] DetailFetchError),
}
