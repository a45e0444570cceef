use crate::errors::AppError;
use crate::fs::resolve::is_within;
use serde::Serialize;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

#[derive(Debug, Serialize)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub is_image: bool,
    pub mime: Option<String>,
    pub mtime: f64,
}

#[derive(Debug, Serialize)]
pub struct Listing {
    pub path: PathBuf,
    pub entries: Vec<DirEntry>,
    pub parent: Option<PathBuf>,
}

/// Enumerate the immediate children of a validated directory.
///
/// A child whose metadata cannot be read is skipped rather than failing the
/// whole listing.
pub fn list_directory(path: &Path) -> Result<Vec<DirEntry>, AppError> {
    let meta = fs::metadata(path).map_err(enumeration_error)?;
    if !meta.is_dir() {
        return Err(AppError::NotADirectory);
    }
    let reader = fs::read_dir(path).map_err(enumeration_error)?;
    let mut entries: Vec<DirEntry> = reader
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry_record(&entry.file_name(), entry.metadata()))
        .collect();
    // Directories first, then case-insensitive by name.
    entries.sort_by_key(|e| (!e.is_dir, e.name.to_lowercase()));
    Ok(entries)
}

fn enumeration_error(err: io::Error) -> AppError {
    match err.kind() {
        io::ErrorKind::NotFound => AppError::NotFound,
        io::ErrorKind::PermissionDenied => AppError::PermissionDenied,
        _ => AppError::Internal(err.to_string()),
    }
}

/// Build one listing entry; `None` when the stat failed. MIME comes from the
/// file name only, no content sniffing, matching what the raw endpoint will
/// serve the file as.
pub(crate) fn entry_record(name: &OsStr, meta: io::Result<fs::Metadata>) -> Option<DirEntry> {
    let meta = meta.ok()?;
    let is_dir = meta.is_dir();
    let mime = if is_dir {
        None
    } else {
        mime_guess::from_path(Path::new(name))
            .first()
            .map(|m| m.to_string())
    };
    let is_image = mime.as_deref().is_some_and(|m| m.starts_with("image/"));
    let mtime = meta
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    Some(DirEntry {
        name: name.to_string_lossy().into_owned(),
        is_dir,
        size: meta.len(),
        is_image,
        mime,
        mtime,
    })
}

/// Canonical parent of `path`, but only while it stays inside `root`.
/// `None` marks the root boundary for the UI.
pub fn parent_within(path: &Path, root: &Path) -> Option<PathBuf> {
    let parent = path.parent()?;
    if is_within(parent, root) {
        Some(parent.to_path_buf())
    } else {
        None
    }
}
