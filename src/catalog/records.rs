//! Wire shapes of the media API responses.
//!
//! Only the fields the content tree needs are modeled; everything else in a
//! response is ignored. Required fields are plain (a record missing one fails
//! to deserialize), optional ones are `Option`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::model::Folder;

/// `GET {base}/folders`
#[derive(Debug, Deserialize)]
pub struct FolderListing {
    pub folders: Vec<Folder>,
}

/// `GET {base}/resources/image`
///
/// Records stay untyped here so each one can be validated on its own.
#[derive(Debug, Deserialize)]
pub struct ResourceListing {
    pub resources: Vec<Value>,
}

/// One image resource, from either the bulk listing or the detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResource {
    pub public_id: String,
    pub format: String,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub colors: Option<Vec<RawColor>>,
}

/// A `[code, weight]` pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawColor(pub String, pub f64);
