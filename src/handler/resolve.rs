//! Request path resolution
//!
//! Turns the URI path into a list of file system segments below the root.
//! `..` is applied lexically and may never climb above the root; whatever
//! symlinks do afterwards is checked by [`confine`] once the path exists.

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::ServeError;

/// Decoded and normalized request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    /// Normalized segments, never containing `""`, `.` or `..`
    pub segments: Vec<String>,
    /// Whether the raw path ended with `/`
    pub trailing_slash: bool,
    /// Decoded path used for display, e.g. in listing titles
    pub display: String,
}

impl RequestPath {
    /// Parse the path component of a request URI (query already stripped)
    pub fn parse(raw: &str) -> Result<Self, ServeError> {
        let decoded = percent_decode_str(raw)
            .decode_utf8()
            .map_err(|_| ServeError::BadRequest(raw.to_string()))?;

        if decoded.contains('\0') {
            return Err(ServeError::BadRequest(raw.to_string()));
        }

        let mut segments: Vec<String> = Vec::new();
        for segment in decoded.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(ServeError::Forbidden(raw.to_string()));
                    }
                }
                s if has_foreign_separator(s) => {
                    return Err(ServeError::BadRequest(raw.to_string()));
                }
                s => segments.push(s.to_string()),
            }
        }

        Ok(Self {
            segments,
            trailing_slash: raw.ends_with('/'),
            display: decoded.into_owned(),
        })
    }

    /// Join the segments onto `root`
    pub fn to_fs_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(&self.segments);
        path
    }
}

/// Segments that the platform would interpret as more than one component
#[cfg(windows)]
fn has_foreign_separator(segment: &str) -> bool {
    segment.contains('\\') || segment.contains(':')
}

#[cfg(not(windows))]
const fn has_foreign_separator(_segment: &str) -> bool {
    false
}

/// Canonicalize `path` and ensure it still lies under `root`
///
/// `root` must already be canonical.
pub async fn confine(path: &Path, root: &Path, request_path: &str) -> Result<PathBuf, ServeError> {
    let canonical = fs::canonicalize(path)
        .await
        .map_err(|e| ServeError::from_io(path, request_path, e))?;

    if canonical.starts_with(root) {
        Ok(canonical)
    } else {
        crate::logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        Err(ServeError::Forbidden(request_path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(raw: &str) -> Vec<String> {
        RequestPath::parse(raw).unwrap().segments
    }

    #[test]
    fn test_simple_paths() {
        assert!(segments("/").is_empty());
        assert_eq!(segments("/index.html"), vec!["index.html"]);
        assert_eq!(segments("//js///app.js"), vec!["js", "app.js"]);
        assert_eq!(segments("/./js/./app.js"), vec!["js", "app.js"]);
    }

    #[test]
    fn test_percent_decoding() {
        let path = RequestPath::parse("/my%20file.txt").unwrap();
        assert_eq!(path.segments, vec!["my file.txt"]);
        assert_eq!(path.display, "/my file.txt");
        // Encoded slash splits like a literal one
        assert_eq!(segments("/js%2Fapp.js"), vec!["js", "app.js"]);
    }

    #[test]
    fn test_trailing_slash() {
        assert!(RequestPath::parse("/").unwrap().trailing_slash);
        assert!(RequestPath::parse("/docs/").unwrap().trailing_slash);
        assert!(!RequestPath::parse("/docs").unwrap().trailing_slash);
    }

    #[test]
    fn test_dot_dot_inside_root() {
        assert_eq!(segments("/a/b/../c"), vec!["a", "c"]);
        assert!(segments("/a/..").is_empty());
    }

    #[test]
    fn test_dot_dot_escaping_root() {
        for raw in ["/..", "/../../etc/passwd", "/a/../../b", "/%2e%2e/secret", "/..%2fsecret"] {
            let err = RequestPath::parse(raw).unwrap_err();
            assert!(matches!(err, ServeError::Forbidden(_)), "{raw} -> {err:?}");
        }
    }

    #[test]
    fn test_malformed_paths() {
        assert!(matches!(
            RequestPath::parse("/%ff%fe"),
            Err(ServeError::BadRequest(_))
        ));
        assert!(matches!(
            RequestPath::parse("/a%00b"),
            Err(ServeError::BadRequest(_))
        ));
    }

    #[test]
    fn test_to_fs_path() {
        let path = RequestPath::parse("/js/app.js").unwrap();
        assert_eq!(
            path.to_fs_path(Path::new("/srv/web")),
            PathBuf::from("/srv/web/js/app.js")
        );
    }

    #[tokio::test]
    async fn test_confine_allows_inside() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::write(root.join("a.txt"), "a").unwrap();

        let confined = confine(&root.join("a.txt"), &root, "/a.txt").await.unwrap();
        assert_eq!(confined, root.join("a.txt"));
    }

    #[tokio::test]
    async fn test_confine_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();

        let err = confine(&root.join("nope"), &root, "/nope").await.unwrap_err();
        assert!(matches!(err, ServeError::NotFound(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_confine_blocks_symlink_escape() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.txt"), "secret").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::os::unix::fs::symlink(outside.path().join("secret.txt"), root.join("link.txt"))
            .unwrap();

        let err = confine(&root.join("link.txt"), &root, "/link.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, ServeError::Forbidden(_)));
    }
}
