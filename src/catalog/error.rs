use thiserror::Error;

/// A single HTTP request to the media API failed.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("HTTP request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP error {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Response from {url} is not valid JSON: {source}")]
    Decode { url: String, source: reqwest::Error },
}

/// A raw resource record could not be turned into a `Photo`.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("public_id '{0}' is not of the form <album>/<name>")]
    InvalidPublicId(String),

    #[error("Malformed resource record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One of the bulk catalog reads (folders, photo listing) failed.
#[derive(Debug, Error)]
pub enum CatalogFetchError {
    #[error("Failed to fetch {what}: {source}")]
    Request {
        what: &'static str,
        source: RequestError,
    },

    #[error("Unexpected shape of {what} response: {source}")]
    Shape {
        what: &'static str,
        source: serde_json::Error,
    },
}

/// The per-photo detail read failed.
#[derive(Debug, Error)]
pub enum DetailFetchError {
    #[error("Failed to fetch details of {public_id}: {source}")]
    Request {
        public_id: String,
        source: RequestError,
    },

    #[error("Invalid detail record for {public_id}: {source}")]
    Record {
        public_id: String,
        source: NormalizeError,
    },
}

impl DetailFetchError {
    pub fn public_id(&self) -> &str {
        match self {
            DetailFetchError::Request { public_id, .. } => public_id,
            DetailFetchError::Record { public_id, .. } => public_id,
        }
    }
}
