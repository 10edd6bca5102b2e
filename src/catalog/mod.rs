//! Catalog fetcher: reads the folder hierarchy, the bulk image listing, and
//! per-image details from the media API, and shapes them into domain types.

pub mod error;
pub mod normalize;
pub mod records;
pub mod session;

pub use error::{CatalogFetchError, DetailFetchError};
pub use session::{AuthenticatedClient, CatalogSession};

use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{Folder, Photo};
use records::{FolderListing, ResourceListing};

/// Where the API lives for one account: `{host}/{account}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: String,
}

impl ApiEndpoint {
    pub fn new(host: &str, account: &str) -> Self {
        Self {
            base: format!("{}/{}", host.trim_end_matches('/'), account),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn folders_url(&self) -> String {
        format!("{}/folders", self.base)
    }

    pub fn resources_url(&self) -> String {
        format!("{}/resources/image", self.base)
    }

    /// The identifier is percent-encoded as a single path segment, `/` included.
    pub fn resource_detail_url(&self, public_id: &str) -> String {
        format!(
            "{}/resources/image/upload/{}",
            self.base,
            urlencoding::encode(public_id)
        )
    }
}

/// Result of the bulk image listing.
#[derive(Debug, Default)]
pub struct PhotoListing {
    pub photos: Vec<Photo>,
    /// Records dropped because they failed validation.
    pub rejected: usize,
}

pub struct CatalogFetcher {
    session: Box<dyn CatalogSession>,
    endpoint: ApiEndpoint,
}

impl std::fmt::Debug for CatalogFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogFetcher")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl CatalogFetcher {
    pub fn new(session: Box<dyn CatalogSession>, endpoint: ApiEndpoint) -> Self {
        Self { session, endpoint }
    }

    /// Fetch the complete folder listing in one request.
    pub async fn fetch_folders(&self) -> Result<Vec<Folder>, CatalogFetchError> {
        let value = self
            .session
            .get_json(&self.endpoint.folders_url(), &[])
            .await
            .map_err(|source| CatalogFetchError::Request {
                what: "folders",
                source,
            })?;
        let listing: FolderListing =
            serde_json::from_value(value).map_err(|source| CatalogFetchError::Shape {
                what: "folders",
                source,
            })?;
        debug!("Fetched {} folders", listing.folders.len());
        Ok(listing.folders)
    }

    /// Fetch up to `max_results` images, tags included, in one request.
    ///
    /// Anything past the cutoff is not fetched. Records that fail validation
    /// are logged and counted, not returned.
    pub async fn fetch_all_photos(
        &self,
        max_results: u32,
    ) -> Result<PhotoListing, CatalogFetchError> {
        let max = max_results.to_string();
        let value = self
            .session
            .get_json(
                &self.endpoint.resources_url(),
                &[("max_results", max.as_str()), ("tags", "true")],
            )
            .await
            .map_err(|source| CatalogFetchError::Request {
                what: "photo listing",
                source,
            })?;
        let listing: ResourceListing =
            serde_json::from_value(value).map_err(|source| CatalogFetchError::Shape {
                what: "photo listing",
                source,
            })?;

        let mut result = PhotoListing::default();
        for (i, record) in listing.resources.into_iter().enumerate() {
            let public_id = record_public_id(&record);
            match normalize::normalize_value(record) {
                Ok(photo) => result.photos.push(photo),
                Err(e) => {
                    warn!(
                        index = i,
                        public_id = public_id.as_deref().unwrap_or("<unknown>"),
                        "Skipping resource record: {}",
                        e
                    );
                    result.rejected += 1;
                }
            }
        }
        debug!(
            "Fetched {} photos ({} rejected)",
            result.photos.len(),
            result.rejected
        );
        Ok(result)
    }

    /// Fetch one image with its metadata and dominant colors.
    pub async fn fetch_photo_detail(&self, public_id: &str) -> Result<Photo, DetailFetchError> {
        let value = self
            .session
            .get_json(
                &self.endpoint.resource_detail_url(public_id),
                &[("image_metadata", "true"), ("colors", "true")],
            )
            .await
            .map_err(|source| DetailFetchError::Request {
                public_id: public_id.to_string(),
                source,
            })?;
        normalize::normalize_value(value).map_err(|source| DetailFetchError::Record {
            public_id: public_id.to_string(),
            source,
        })
    }
}

fn record_public_id(record: &Value) -> Option<String> {
    record["public_id"].as_str().map(str::to_string)
}
