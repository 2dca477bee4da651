//! Source media references.
//!
//! A source is an opaque string. `file://` URIs and bare paths resolve to
//! local files; anything else with a scheme (`content://`, `https://`, ...)
//! is handed to the external tool untouched.

use std::io::ErrorKind;
use std::path::PathBuf;

use cliptrim_common::error::{CliptrimError, CliptrimResult};

/// Local filesystem path for a source reference, if it has one.
pub fn local_path(uri: &str) -> Option<PathBuf> {
    if let Some(path) = uri.strip_prefix("file://") {
        return Some(PathBuf::from(path));
    }
    if uri.contains("://") {
        return None;
    }
    Some(PathBuf::from(uri))
}

/// The argument an external tool should receive for this source.
pub fn tool_input(uri: &str) -> String {
    match local_path(uri) {
        Some(path) => path.display().to_string(),
        None => uri.to_string(),
    }
}

/// Check that a local source exists and can be opened for reading.
///
/// Non-local sources are not checked. Denied access is a permission error,
/// a missing file is [`CliptrimError::FileNotFound`], and any other failure
/// is a processing error.
pub async fn check_source_access(uri: &str) -> CliptrimResult<()> {
    let Some(path) = local_path(uri) else {
        return Ok(());
    };
    match tokio::fs::File::open(&path).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(CliptrimError::permission(
            format!("cannot read source {}: {e}", path.display()),
        )),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(CliptrimError::FileNotFound { path }),
        Err(e) => Err(CliptrimError::processing(format!(
            "cannot open source {}: {e}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_path_resolution() {
        assert_eq!(
            local_path("file:///videos/a.mp4"),
            Some(PathBuf::from("/videos/a.mp4"))
        );
        assert_eq!(local_path("/videos/a.mp4"), Some(PathBuf::from("/videos/a.mp4")));
        assert_eq!(local_path("clips/a.mp4"), Some(PathBuf::from("clips/a.mp4")));
        assert_eq!(local_path("content://media/external/video/42"), None);
        assert_eq!(
            tool_input("https://example.com/a.mp4"),
            "https://example.com/a.mp4"
        );
    }

    #[tokio::test]
    async fn test_missing_source_is_not_found() {
        let path = std::env::temp_dir().join("cliptrim_test_missing_source.mp4");
        let _ = std::fs::remove_file(&path);
        let err = check_source_access(&path.display().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, CliptrimError::FileNotFound { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_source_is_a_permission_error() {
        use std::os::unix::fs::PermissionsExt;

        let path = std::env::temp_dir().join(format!(
            "cliptrim_test_unreadable_{}.mp4",
            std::process::id()
        ));
        std::fs::write(&path, b"video").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes.
        if std::fs::File::open(&path).is_ok() {
            let _ = std::fs::remove_file(&path);
            return;
        }

        let err = check_source_access(&path.display().to_string())
            .await
            .unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, CliptrimError::Permission { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_source_under_a_file_is_a_processing_error() {
        let parent = std::env::temp_dir().join(format!(
            "cliptrim_test_not_a_dir_{}",
            std::process::id()
        ));
        std::fs::write(&parent, b"plain file").unwrap();

        let err = check_source_access(&parent.join("a.mp4").display().to_string())
            .await
            .unwrap_err();
        let _ = std::fs::remove_file(&parent);
        assert!(err.is_processing());
    }

    #[tokio::test]
    async fn test_remote_sources_are_not_checked() {
        assert!(check_source_access("content://media/video/1").await.is_ok());
    }
}
