//! Static file serving module
//!
//! Maps a resolved request path to a file, an index file, a directory listing,
//! or an error.

use crate::config::AppState;
use crate::error::ServeError;
use crate::handler::listing;
use crate::handler::resolve::{confine, RequestPath};
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fs::Metadata;
use std::path::Path;
use tokio::fs;

/// Serve whatever the request path names under the root directory
pub async fn serve_path(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let request_path = RequestPath::parse(ctx.path)?;
    let target = request_path.to_fs_path(&state.root);
    let canonical = confine(&target, &state.root, ctx.path).await?;
    let metadata = fs::metadata(&canonical)
        .await
        .map_err(|e| ServeError::from_io(&canonical, ctx.path, e))?;

    if metadata.is_dir() {
        return serve_directory(ctx, state, &request_path, &canonical).await;
    }

    // A file addressed like a directory does not exist
    if request_path.trailing_slash {
        return Err(ServeError::NotFound(ctx.path.to_string()));
    }

    serve_file(ctx, &target, &canonical, &metadata).await
}

/// Serve a directory: redirect to the slash form, then index file, then listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    request_path: &RequestPath,
    dir: &Path,
) -> Result<Response<Full<Bytes>>, ServeError> {
    if !request_path.trailing_slash {
        let location = slash_redirect_location(ctx.path, ctx.query);
        return Ok(http::build_redirect_response(&location));
    }

    for index_file in &state.config.http.index_files {
        let index_path = dir.join(index_file);
        match fs::metadata(&index_path).await {
            Ok(metadata) if metadata.is_file() => {
                let canonical = confine(&index_path, &state.root, ctx.path).await?;
                return serve_file(ctx, &index_path, &canonical, &metadata).await;
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(ServeError::from_io(index_path, ctx.path, e)),
        }
    }

    if !state.config.http.directory_listing {
        return Err(ServeError::ListingDisabled(ctx.path.to_string()));
    }

    let html = listing::render_listing(dir, &request_path.display)
        .await
        .map_err(|e| ServeError::from_io(dir, ctx.path, e))?;
    Ok(http::build_html_response(html, ctx.is_head))
}

/// Location for the trailing-slash redirect of a directory request
///
/// Leading slashes collapse to one so the redirect never becomes a
/// protocol-relative URL pointing at another host.
fn slash_redirect_location(path: &str, query: Option<&str>) -> String {
    let path = path.trim_start_matches(['/', '\\']);
    match query {
        Some(query) => format!("/{path}/?{query}"),
        None => format!("/{path}/"),
    }
}

/// Serve a single regular file
///
/// `named` is the path as addressed (its extension picks the Content-Type),
/// `canonical` the confined location actually read.
async fn serve_file(
    ctx: &RequestContext<'_>,
    named: &Path,
    canonical: &Path,
    metadata: &Metadata,
) -> Result<Response<Full<Bytes>>, ServeError> {
    // Sockets, FIFOs and devices are never served
    if !metadata.is_file() {
        return Err(ServeError::NotFound(ctx.path.to_string()));
    }

    let modified = metadata.modified().ok();
    if let Some(modified) = modified {
        if cache::is_not_modified(ctx.if_modified_since, ctx.has_if_none_match, modified) {
            return Ok(http::build_304_response(modified));
        }
    }

    let content = fs::read(canonical)
        .await
        .map_err(|e| ServeError::from_io(canonical, ctx.path, e))?;

    Ok(http::build_file_response(
        Bytes::from(content),
        mime::content_type_for(named),
        modified,
        ctx.is_head,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_redirect_location() {
        assert_eq!(slash_redirect_location("/js", None), "/js/");
        assert_eq!(slash_redirect_location("/a/b", Some("v=1")), "/a/b/?v=1");
    }

    #[test]
    fn test_slash_redirect_stays_same_origin() {
        assert_eq!(slash_redirect_location("//evil.example", None), "/evil.example/");
        assert_eq!(slash_redirect_location("///js", Some("x=1")), "/js/?x=1");
        assert_eq!(slash_redirect_location("/\\evil.example", None), "/evil.example/");
    }
}
