use std::path::{Path, PathBuf};

use super::error::UnsafePath;

pub const INDEX_FILE: &str = "index.json";

/// Join a `/`-separated relative path from the catalog onto `root`.
///
/// Each component is joined separately so the result is a native path.
/// Empty, `.` and `..` components are rejected, as are components carrying a
/// backslash or drive separator, so the result always stays under `root`.
pub fn join_relative(root: &Path, relative: &str) -> Result<PathBuf, UnsafePath> {
    let mut path = root.to_path_buf();
    for component in relative.split('/') {
        if !is_safe_component(component) {
            return Err(UnsafePath(relative.to_string()));
        }
        path.push(component);
    }
    Ok(path)
}

fn is_safe_component(component: &str) -> bool {
    !component.is_empty()
        && component != "."
        && component != ".."
        && !component.contains(['\\', ':', '\0'])
}

/// `<dir>/index.json`
pub fn index_path(dir: &Path) -> PathBuf {
    dir.join(INDEX_FILE)
}

/// `<dir>/<name>.json`
///
/// A photo named like the index file would overwrite it, so that name is rejected.
pub fn detail_path(dir: &Path, name: &str) -> Result<PathBuf, UnsafePath> {
    let index_stem = INDEX_FILE.trim_end_matches(".json");
    if !is_safe_component(name) || name.contains('/') || name == index_stem {
        return Err(UnsafePath(name.to_string()));
    }
    Ok(dir.join(format!("{name}.json")))
}

/// Sibling temp path used while a file is being written.
pub fn part_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}
