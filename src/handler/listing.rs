//! Generated directory listing

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::io;
use std::path::Path;
use tokio::fs;

/// Characters escaped in a listing href (a single relative path segment)
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'/')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

#[derive(Debug)]
struct Entry {
    name: String,
    is_dir: bool,
    is_symlink: bool,
}

impl Entry {
    fn label(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    fn href(&self) -> String {
        let encoded = utf8_percent_encode(&self.name, SEGMENT).to_string();
        if self.is_dir {
            encoded + "/"
        } else {
            encoded
        }
    }
}

/// Render an HTML listing of `dir`, titled with the decoded request path
///
/// Entries are sorted case-insensitively. Directories (symlinked ones
/// included) link with a trailing slash; symlinks are labelled with `@`.
pub async fn render_listing(dir: &Path, display_path: &str) -> io::Result<String> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        // Entries removed mid-scan are skipped
        let Ok(file_type) = entry.file_type().await else {
            continue;
        };
        let is_symlink = file_type.is_symlink();
        // Follows symlinks; dangling links list as plain entries
        let is_dir = fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }
    entries.sort_by_cached_key(|e| e.name.to_lowercase());

    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut html = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );
    for entry in &entries {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            entry.href(),
            escape_html(&entry.label())
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");

    Ok(html)
}

/// Escape text for HTML element content and quoted attributes
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
