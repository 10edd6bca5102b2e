//! Domain types persisted into the content tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name, path, and tag of the synthetic featured collection.
pub const FEATURED: &str = "featured";

/// An album directory in the remote hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    pub path: String,
}

impl Folder {
    /// The locally injected folder holding every photo tagged `featured`.
    pub fn featured() -> Self {
        Self {
            name: FEATURED.to_string(),
            path: FEATURED.to_string(),
        }
    }

    pub fn is_featured(&self) -> bool {
        self.name == FEATURED && self.path == FEATURED
    }

    /// Whether `photo` belongs in this folder's index.
    ///
    /// The featured folder selects by tag, every other folder by album name.
    pub fn contains(&self, photo: &Photo) -> bool {
        if self.is_featured() {
            photo.is_featured()
        } else {
            photo.album == self.name
        }
    }
}

/// A dominant color and its relative prevalence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub code: String,
    pub weight: f64,
}

/// A normalized photo record.
///
/// Field order here is the field order of every JSON file written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub name: String,
    pub album: String,
    pub public_id: String,
    pub format: String,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<Color>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Photo {
    pub fn is_featured(&self) -> bool {
        self.tags.iter().any(|t| t == FEATURED)
    }
}

/// Content of an `index.json` file.
#[derive(Debug, Serialize)]
pub struct AlbumIndex<'a> {
    pub name: &'a str,
    pub photos: Vec<&'a Photo>,
}

impl<'a> AlbumIndex<'a> {
    /// Select the photos of `folder` from the full listing, keeping listing order.
    pub fn for_folder(folder: &'a Folder, photos: &'a [Photo]) -> Self {
        Self {
            name: &folder.name,
            photos: photos.iter().filter(|p| folder.contains(p)).collect(),
        }
    }
}
