//! Content tree writer: owns the output root and everything written under it.
//!
//! Layout:
//! - `<root>/<folder-path>/index.json`: `{ name, photos }` for every folder
//! - `<root>/<album>/<name>.json`: one enriched photo
//! - `<root>/featured/...`: the same two shapes, selected by the `featured` tag

pub mod error;
pub mod paths;

pub use error::{DetailWriteError, StorageSetupError};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures_util::future::join_all;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, warn};

use crate::model::{AlbumIndex, Folder, Photo, FEATURED};

#[derive(Debug, Clone)]
pub struct ContentTreeWriter {
    root: PathBuf,
}

/// The remote folders plus the synthetic featured folder, which owns its path.
///
/// Each path appears once; later duplicates are dropped with a warning.
pub fn with_featured(folders: &[Folder]) -> Vec<Folder> {
    let mut seen = HashSet::new();
    let mut all: Vec<Folder> = folders
        .iter()
        .filter(|f| {
            if f.path == FEATURED {
                warn!(
                    "Remote folder '{}' collides with the featured collection, ignoring it",
                    f.name
                );
                false
            } else if !seen.insert(f.path.as_str()) {
                warn!("Remote folder path '{}' is listed twice, keeping the first", f.path);
                false
            } else {
                true
            }
        })
        .cloned()
        .collect();
    all.push(Folder::featured());
    all
}

/// Pretty JSON with a trailing newline.
fn to_json_bytes<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write through a `.part` sibling and rename into place, so a failed write
/// never leaves a truncated file at `path`.
async fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let part = paths::part_path(path);
    if let Err(e) = fs::write(&part, contents).await {
        let _ = fs::remove_file(&part).await;
        return Err(e);
    }
    if let Err(e) = fs::rename(&part, path).await {
        let _ = fs::remove_file(&part).await;
        return Err(e);
    }
    Ok(())
}

/// Wait for every result, then report the first failure in input order.
fn first_error<E>(results: Vec<Result<(), E>>) -> Result<(), E> {
    results.into_iter().collect()
}

impl ContentTreeWriter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn featured_dir(&self) -> PathBuf {
        self.root.join(FEATURED)
    }

    /// Remove the root recursively (if present) and recreate it empty.
    pub async fn reset_root(&self) -> Result<(), StorageSetupError> {
        match fs::remove_dir_all(&self.root).await {
            Ok(()) => debug!("Removed {}", self.root.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(StorageSetupError::Reset {
                    path: self.root.clone(),
                    source,
                })
            }
        }
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StorageSetupError::Reset {
                path: self.root.clone(),
                source,
            })
    }

    /// Create one directory per folder plus the featured directory, concurrently.
    ///
    /// Every creation runs to completion; the first failure is returned after.
    pub async fn create_album_directories(
        &self,
        folders: &[Folder],
    ) -> Result<(), StorageSetupError> {
        let dirs = with_featured(folders)
            .iter()
            .map(|f| paths::join_relative(&self.root, &f.path))
            .collect::<Result<Vec<_>, _>>()?;

        let results = join_all(dirs.into_iter().map(|dir| async move {
            fs::create_dir_all(&dir)
                .await
                .map_err(|source| StorageSetupError::CreateDir { path: dir, source })
        }))
        .await;

        first_error(results)
    }

    /// Write `index.json` for every folder (featured included), concurrently.
    pub async fn write_album_indices(
        &self,
        folders: &[Folder],
        photos: &[Photo],
    ) -> Result<(), StorageSetupError> {
        let folders = with_featured(folders);
        let dirs = folders
            .iter()
            .map(|f| paths::join_relative(&self.root, &f.path))
            .collect::<Result<Vec<_>, _>>()?;

        let results = join_all(folders.iter().zip(dirs).map(|(folder, dir)| async move {
            let index = AlbumIndex::for_folder(folder, photos);
            let bytes = to_json_bytes(&index).map_err(|source| StorageSetupError::Serialize {
                name: folder.name.clone(),
                source,
            })?;
            let path = paths::index_path(&dir);
            write_file(&path, &bytes)
                .await
                .map_err(|source| StorageSetupError::WriteIndex {
                    path: path.clone(),
                    source,
                })?;
            debug!(
                photos = index.photos.len(),
                "Wrote index {}",
                path.display()
            );
            Ok::<(), StorageSetupError>(())
        }))
        .await;

        first_error(results)
    }

    /// Write the photo under its album, and under featured if it is tagged so.
    ///
    /// Directories are not created here; they belong to the skeleton.
    pub async fn write_photo_detail(&self, photo: &Photo) -> Result<Vec<PathBuf>, DetailWriteError> {
        let bytes = to_json_bytes(photo).map_err(|source| DetailWriteError::Serialize {
            public_id: photo.public_id.clone(),
            source,
        })?;

        let mut targets = vec![paths::detail_path(
            &paths::join_relative(&self.root, &photo.album)?,
            &photo.name,
        )?];
        if photo.is_featured() {
            targets.push(paths::detail_path(&self.featured_dir(), &photo.name)?);
        }

        for path in &targets {
            write_file(path, &bytes)
                .await
                .map_err(|source| DetailWriteError::Io {
                    path: path.clone(),
                    source,
                })?;
            debug!("Wrote {}", path.display());
        }
        Ok(targets)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    /// Fresh, empty per-test directory under the system temp dir.
    pub fn test_tmp_dir(subdir: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("albumsync-tests").join(subdir);
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }
}
