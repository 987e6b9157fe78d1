//! Local input validation — extension sniffing and watch-URL checks.
//!
//! Rejection here is cheap and final: no network call is attempted for an
//! input that fails these checks.

use std::path::Path;

use crate::errors::ValidationError;

/// Extensions accepted when the media type is not recognisably video.
/// Matching is case-insensitive on the substring after the final `.`.
const ALLOWED_VIDEO_EXTENSIONS: &[&str] =
    &["mp4", "mov", "avi", "mkv", "webm", "flv", "mpeg", "mpg"];

/// Accept a file when its guessed media type is `video/*` or its extension
/// is in the allow-list.
pub fn validate_video_file(path: &Path) -> Result<(), ValidationError> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or(ValidationError::UnreadableFileName)?;

    let is_video_mime = mime_guess::from_path(path)
        .first()
        .is_some_and(|mime| mime.type_() == mime_guess::mime::VIDEO);
    if is_video_mime {
        return Ok(());
    }

    let allowed_ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .is_some_and(|ext| ALLOWED_VIDEO_EXTENSIONS.contains(&ext.as_str()));
    if allowed_ext {
        return Ok(());
    }

    Err(ValidationError::UnsupportedFileType {
        filename: filename.to_string(),
    })
}

/// Accept a URL when it is non-empty and points at a known watch page.
pub fn validate_watch_url(url: &str) -> Result<(), ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if url.contains("youtube.com/") || url.contains("youtu.be/") {
        Ok(())
    } else {
        Err(ValidationError::NotAWatchUrl {
            url: url.to_string(),
        })
    }
}
