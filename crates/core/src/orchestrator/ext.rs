//! Artifact filename extension derivation.

use crate::task::TaskKind;

/// Derive the local file extension for a downloaded artifact.
///
/// Preference order: declared content type, then the suffix of the URL
/// path, then the modality default. Candidates that are empty or longer
/// than the modality's plausible suffix length are rejected, so the
/// result is always a non-empty, bounded extension with a leading dot.
pub fn derive_extension(kind: TaskKind, content_type: Option<&str>, url: &str) -> String {
    if let Some(ext) = content_type.and_then(extension_for_content_type) {
        if plausible(kind, ext) {
            return ext.to_string();
        }
    }

    if let Some(ext) = url_extension(url) {
        if plausible(kind, &ext) {
            return ext;
        }
    }

    kind.default_extension().to_string()
}

/// A suffix is plausible when it has at least one character after the dot
/// and stays within the modality bound (dot included).
fn plausible(kind: TaskKind, ext: &str) -> bool {
    ext.len() > 1 && ext.len() <= kind.max_extension_len()
}

/// Known content types for generated media. jpeg maps straight to `.jpg`
/// rather than the `.jpe` some mime tables guess.
fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some(".png"),
        "image/jpeg" => Some(".jpg"),
        "image/webp" => Some(".webp"),
        "image/gif" => Some(".gif"),
        "image/bmp" => Some(".bmp"),
        "video/mp4" => Some(".mp4"),
        "video/webm" => Some(".webm"),
        "video/quicktime" => Some(".mov"),
        "video/x-matroska" => Some(".mkv"),
        _ => None,
    }
}

/// Extract the suffix of a URL's last path segment, query and fragment
/// stripped. Only plain alphanumeric suffixes count.
fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next()?;
    let dot = segment.rfind('.')?;
    let ext = &segment[dot..];

    if ext.len() > 1 && ext[1..].chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_ascii_lowercase())
    } else {
        None
    }
}
