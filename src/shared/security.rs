use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum seed or token file size (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// Uses `symlink_metadata()` so the link itself is inspected rather than its target.
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "seed file", "token file")
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file is larger than [`MAX_FILE_SIZE`]
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read {} metadata for {}: {}",
            file_description,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Rejects identifiers that could escape their URL path segment.
///
/// Identifiers are percent-encoded before use, but separators and dot
/// segments are refused outright so a record id can never address a
/// different resource.
pub fn validate_path_segment(segment: &str, segment_type: &str) -> Result<()> {
    if segment.is_empty() {
        anyhow::bail!("{} must not be empty", segment_type);
    }

    if segment.contains('/') || segment.contains('\\') {
        anyhow::bail!(
            "Security: {} contains path separators which are not allowed",
            segment_type
        );
    }

    if segment == "." || segment.contains("..") {
        anyhow::bail!("Security: {} contains '..' which is not allowed", segment_type);
    }

    if segment.contains('#') || segment.contains('?') || segment.contains('@') {
        anyhow::bail!("Security: {} contains URL-unsafe characters", segment_type);
    }

    Ok(())
}
