//! MIME type detection module
//!
//! Best-effort Content-Type lookup from the file extension.

use std::path::Path;

/// Content-Type for `path`, falling back to `application/octet-stream`
///
/// Extension matching is case-insensitive.
///
/// # Examples
/// ```
/// use nocache_serve::http::mime::content_type_for;
/// use std::path::Path;
/// assert_eq!(content_type_for(Path::new("index.html")), "text/html; charset=utf-8");
/// assert_eq!(content_type_for(Path::new("engine.WASM")), "application/wasm");
/// assert_eq!(content_type_for(Path::new("LICENSE")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    get_content_type(ext.as_deref())
}

/// Content-Type for a lower-case extension
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("csv") => "text/csv; charset=utf-8",
        Some("xml") => "application/xml",

        // Scripts and modules; wasm must be exact for streaming compilation
        Some("js" | "mjs" | "cjs") => "text/javascript; charset=utf-8",
        Some("json" | "map") => "application/json",
        Some("webmanifest") => "application/manifest+json",
        Some("wasm") => "application/wasm",

        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",

        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("ogv") => "video/ogg",
        Some("mp3") => "audio/mpeg",
        Some("ogg" | "oga") => "audio/ogg",
        Some("wav") => "audio/wav",

        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",
        Some("tar") => "application/x-tar",

        _ => "application/octet-stream",
    }
}
