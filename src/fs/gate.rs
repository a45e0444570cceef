use crate::errors::AppError;
use crate::fs::resolve::{containment, resolve, Containment};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Byte cap for inline text previews.
pub const MAX_PREVIEW_BYTES: usize = 512 * 1024;

/// Shared precondition for every browsing endpoint: the root must be a real
/// directory and the resolved target must stay inside it.
pub fn validate_target(root: &Path, requested: &str) -> Result<PathBuf, AppError> {
    if !root.is_dir() {
        return Err(AppError::InvalidRoot);
    }
    let target = resolve(requested, root).map_err(|err| AppError::Resolution(err.to_string()))?;
    match containment(&target, root) {
        Containment::Contained => Ok(target),
        // Unresolvable fails closed, same as a plain escape.
        Containment::Outside | Containment::Unresolvable => Err(AppError::OutsideRoot),
    }
}

/// File endpoints additionally require an explicit, non-empty path.
pub fn validate_file_target(root: &Path, requested: Option<&str>) -> Result<PathBuf, AppError> {
    let requested = requested
        .filter(|p| !p.is_empty())
        .ok_or(AppError::MissingPath)?;
    validate_target(root, requested)
}

/// Confirm the target is a regular file and re-verify containment at the
/// moment of access. The earlier check ran against a best-effort resolution;
/// by now the file exists, so a strict canonicalization closes the window in
/// which a symlink could have appeared underneath us.
pub fn open_file_target(target: &Path, root: &Path) -> Result<PathBuf, AppError> {
    let meta = fs::metadata(target).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => AppError::NotFound,
        io::ErrorKind::PermissionDenied => AppError::PermissionDenied,
        _ => AppError::Internal(err.to_string()),
    })?;
    if !meta.is_file() {
        return Err(AppError::NotAFile);
    }
    let real = dunce::canonicalize(target).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => AppError::NotFound,
        _ => AppError::Resolution(err.to_string()),
    })?;
    match containment(&real, root) {
        Containment::Contained => Ok(real),
        Containment::Outside | Containment::Unresolvable => Err(AppError::OutsideRoot),
    }
}

#[derive(Debug, Serialize)]
pub struct Preview {
    pub path: PathBuf,
    pub content: String,
    pub encoding: &'static str,
    pub truncated: bool,
    pub max_bytes: usize,
}

/// Bounded text preview. Reads one byte past the cap to detect truncation
/// without pulling in the whole file, then decodes lossily so bad encodings
/// still produce text.
pub fn read_preview(path: &Path) -> Result<Preview, AppError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => AppError::NotFound,
        io::ErrorKind::PermissionDenied => AppError::PermissionDenied,
        _ => AppError::ReadError(err.to_string()),
    })?;
    let mut raw = Vec::new();
    file.take(MAX_PREVIEW_BYTES as u64 + 1)
        .read_to_end(&mut raw)
        .map_err(|err| AppError::ReadError(err.to_string()))?;
    let truncated = raw.len() > MAX_PREVIEW_BYTES;
    if truncated {
        raw.truncate(MAX_PREVIEW_BYTES);
    }
    Ok(Preview {
        path: path.to_path_buf(),
        content: String::from_utf8_lossy(&raw).into_owned(),
        encoding: "utf-8",
        truncated,
        max_bytes: MAX_PREVIEW_BYTES,
    })
}
