// SPDX-License-Identifier: MPL-2.0
//! View rendering: pure functions from state to a full HTML document.
//!
//! Every page is self-contained: previews are inlined as base64 `data:`
//! URIs and the only outbound channel is the typed intent posted over the
//! webview IPC bridge. All file-derived text is escaped before embedding.

use crate::event::Intent;
use crate::exiftool::{self, ExifTool, ToolOutcome};
use crate::fields::{date_time, FieldRegistry};
use crate::listing::Listing;
use crate::picture;
use std::path::Path;

/// Shown in the listing when a picture has no capture-timestamp field.
pub const MISSING_DATE_PLACEHOLDER: &str = "##############";

/// Everything a page render needs besides the path.
pub struct PageContext<'a> {
    pub tool: &'a ExifTool,
    pub registry: &'a FieldRegistry,
    /// Bounding box for listing thumbnails.
    pub listing_bound: u32,
    /// Bounding box for the detail preview.
    pub detail_bound: u32,
}

/// Client-side half of the intent channel. `onUpdate` scans the fixed
/// naming convention `<fieldId>_0`, `<fieldId>_1`, ... in ascending index
/// order until an id is missing, then posts the collected values prefixed
/// by the field identifier.
const PAGE_SCRIPT: &str = r#"
function post(intent) {
  window.ipc.postMessage(JSON.stringify(intent));
}
function onUpdate(key) {
  let items = [key];
  let count = 0;
  while (true) {
    let node = document.getElementById(key + "_" + count.toString());
    if (node === null) {
      break;
    }
    items.push(node.value);
    count += 1;
  }
  post({ kind: "submit_update", payload: items });
}
"#;

const PAGE_STYLE: &str = r#"
body { display: flex; font-family: sans-serif; margin: 0; }
.tree { min-width: 220px; padding: 8px; border-right: 1px solid #ccc; }
.content { flex: 1; padding: 8px; overflow: auto; }
a { text-decoration: none; }
td { padding: 2px 8px; vertical-align: top; }
"#;

/// Escapes text for safe embedding in HTML element or attribute content.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Serializes an intent into an `onclick` attribute value. The JSON is
/// attribute-escaped; the browser decodes the entities before the script
/// runs.
fn intent_onclick(intent: &Intent) -> String {
    let json = serde_json::to_string(intent).unwrap_or_default();
    format!("post({}); return false;", escape_html(&json))
}

fn intent_link(intent: &Intent, label: &str) -> String {
    format!(
        "<a href=\"#\" onclick=\"{}\">{}</a>",
        intent_onclick(intent),
        label
    )
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Wraps a body in the full document scaffold.
fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n\
         <style>{PAGE_STYLE}</style>\n<script>{PAGE_SCRIPT}</script>\n</head>\n\
         <body>\n{body}</body>\n</html>\n"
    )
}

/// The tree pane: clickable ancestors of the current location, then the
/// child directories of the deepest directory, indented one level further.
fn tree_pane(location: &Path) -> String {
    let mut out = String::from("<div class=\"tree\">\n");

    let mut ancestors: Vec<&Path> = location.ancestors().collect();
    ancestors.reverse();
    for (depth, ancestor) in ancestors.iter().enumerate() {
        let label = escape_html(&file_label(ancestor));
        let link = intent_link(
            &Intent::SelectTree {
                path: ancestor.to_path_buf(),
            },
            &label,
        );
        out.push_str(&format!(
            "<div style=\"margin-left:{}px\">{}</div>\n",
            depth * 12,
            link
        ));
    }

    let deepest = if location.is_dir() {
        location
    } else {
        location.parent().unwrap_or(location)
    };
    if let Ok(listing) = Listing::scan(deepest) {
        let indent = ancestors.len() * 12;
        for child in listing.directories() {
            let label = escape_html(&file_label(child));
            let link = intent_link(
                &Intent::SelectTree {
                    path: child.clone(),
                },
                &label,
            );
            out.push_str(&format!(
                "<div style=\"margin-left:{}px\">{}</div>\n",
                indent, link
            ));
        }
    }

    out.push_str("</div>\n");
    out
}

/// Renders the directory listing view.
///
/// Subdirectories come first as enter-directory links, alphabetically;
/// image files follow alphabetically, each with an inline thumbnail and the
/// capture-timestamp annotation. A directory that can no longer be read
/// degrades to an unrecognized-entry rendering.
pub fn directory_page(dir: &Path, ctx: &PageContext) -> String {
    let mut body = tree_pane(dir);
    body.push_str("<div class=\"content\">\n");

    if dir.parent().is_some() {
        body.push_str(&intent_link(&Intent::GoUp, "Back up"));
        body.push_str("<br>\n");
    }

    match Listing::scan(dir) {
        Ok(listing) => {
            let dir_links: Vec<String> = listing
                .directories()
                .iter()
                .map(|path| {
                    intent_link(
                        &Intent::EnterDir { path: path.clone() },
                        &escape_html(&file_label(path)),
                    )
                })
                .collect();
            body.push_str(&dir_links.join("\n<br>\n"));
            body.push_str("<br><br>\n<table>\n");
            for pic in listing.pictures() {
                body.push_str(&picture_row(pic, ctx));
            }
            body.push_str("</table>\n");
        }
        Err(_) => {
            body.push_str(&format!(
                "{}<br>\n========== UNRECOGNISED ENTRY ==========\n",
                escape_html(&dir.display().to_string())
            ));
        }
    }

    body.push_str("</div>\n");
    page(&body)
}

fn picture_row(path: &Path, ctx: &PageContext) -> String {
    let label = escape_html(&file_label(path));
    let cell = match picture::thumbnail_data_uri(path, ctx.listing_bound) {
        Ok(uri) => format!("<img src=\"{}\" alt=\"{}\"/>", uri, label),
        Err(_) => label.clone(),
    };
    let annotation = match ctx.tool.read_fields(path) {
        Ok(fields) if fields.contains_key(date_time::CAPTURE_FIELD) => {
            escape_html(&exiftool::raw_field(&fields, date_time::CAPTURE_FIELD))
        }
        _ => MISSING_DATE_PLACEHOLDER.to_string(),
    };
    format!(
        "<tr><td>{}</td><td>{}</td></tr>\n",
        intent_link(&Intent::OpenEntry {
            path: path.to_path_buf()
        }, &cell),
        annotation
    )
}

/// Renders the picture detail view: the editable field table, then the
/// bounded preview. An unreadable image degrades to the unrecognized
/// banner; the field table is rendered either way.
pub fn picture_page(path: &Path, ctx: &PageContext) -> String {
    let mut body = tree_pane(path);
    body.push_str("<div class=\"content\">\n");
    body.push_str(&format!(
        "<b>{}</b><br>\n",
        escape_html(&path.display().to_string())
    ));
    body.push_str(&field_table(path, ctx));

    match picture::thumbnail_data_uri(path, ctx.detail_bound) {
        Ok(uri) => {
            let label = escape_html(&file_label(path));
            let img = format!("<img src=\"{}\" alt=\"{}\"/>", uri, label);
            body.push_str(&intent_link(&Intent::GoUp, &img));
            body.push('\n');
        }
        Err(_) => {
            body.push_str(&intent_link(&Intent::GoUp, "Back up"));
            body.push_str("<br>\n========== UNRECOGNISED IMAGE ==========\n");
        }
    }

    body.push_str("</div>\n");
    page(&body)
}

/// One row per registered field, sorted by identifier. A failed metadata
/// read still renders the table with every field shown as missing, plus the
/// read error itself.
fn field_table(path: &Path, ctx: &PageContext) -> String {
    let read = ctx.tool.read_fields(path);
    let mut out = String::new();
    if let Err(err) = &read {
        out.push_str(&format!("<p>{}</p>\n", escape_html(&err.to_string())));
    }
    let fields = read.unwrap_or_default();

    out.push_str("<table>\n");
    for id in ctx.registry.field_ids() {
        let raw = exiftool::raw_field(&fields, id);
        if let Some(editor) = ctx.registry.editor(id, &raw) {
            out.push_str(&format!(
                "<tr><td>{id}</td><td id=\"{id}\">{}</td>\
                 <td><button onclick=\"onUpdate('{id}')\">Update</button></td></tr>\n",
                editor.render_fragment()
            ));
        }
    }
    out.push_str("</table>\n");
    out
}

/// Renders the captured output of a failed tool invocation.
pub fn tool_failure_page(outcome: &ToolOutcome) -> String {
    page(&format!(
        "<h1>STDOUT</h1><pre>{}</pre><h1>STDERR</h1><pre>{}</pre>\n",
        escape_html(&outcome.stdout),
        escape_html(&outcome.stderr)
    ))
}

/// Renders an inline parameter error for a malformed update payload.
pub fn parameter_error_page(payload: &[String]) -> String {
    page(&format!(
        "<h1>ERROR in parameters {}</h1>\n",
        escape_html(&format!("{:?}", payload))
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;
    use tempfile::tempdir;

    fn write_test_image(dir: &Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let img = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));
        img.save(&path).expect("failed to write test image");
        path
    }

    fn test_ctx<'a>(tool: &'a ExifTool, registry: &'a FieldRegistry) -> PageContext<'a> {
        PageContext {
            tool,
            registry,
            listing_bound: 20,
            detail_bound: 40,
        }
    }

    #[test]
    fn escape_html_escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn directory_page_lists_directories_before_pictures() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::create_dir(temp_dir.path().join("zz_album")).expect("failed to create dir");
        write_test_image(temp_dir.path(), "aa.png");

        let tool = ExifTool::new("/nonexistent/no-such-tool");
        let registry = FieldRegistry::with_defaults();
        let html = directory_page(temp_dir.path(), &test_ctx(&tool, &registry));

        // The content pane mentions the directory before the picture even
        // though the picture sorts first alphabetically.
        let content = html.split("class=\"content\"").nth(1).expect("no content pane");
        let dir_pos = content.find("zz_album").expect("directory missing");
        let pic_pos = content.find("aa.png").expect("picture missing");
        assert!(dir_pos < pic_pos);
    }

    #[test]
    fn directory_page_uses_placeholder_when_tool_unavailable() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        write_test_image(temp_dir.path(), "a.png");

        let tool = ExifTool::new("/nonexistent/no-such-tool");
        let registry = FieldRegistry::with_defaults();
        let html = directory_page(temp_dir.path(), &test_ctx(&tool, &registry));
        assert!(html.contains(MISSING_DATE_PLACEHOLDER));
    }

    #[test]
    fn directory_page_has_back_link_below_root() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let tool = ExifTool::new("/nonexistent/no-such-tool");
        let registry = FieldRegistry::with_defaults();
        let html = directory_page(temp_dir.path(), &test_ctx(&tool, &registry));
        assert!(html.contains("Back up"));
    }

    #[test]
    fn directory_page_degrades_when_directory_vanished() {
        let tool = ExifTool::new("/nonexistent/no-such-tool");
        let registry = FieldRegistry::with_defaults();
        let html = directory_page(
            Path::new("/nonexistent/never-here"),
            &test_ctx(&tool, &registry),
        );
        assert!(html.contains("UNRECOGNISED ENTRY"));
    }

    #[test]
    fn directory_page_escapes_file_names() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::create_dir(temp_dir.path().join("a&b")).expect("failed to create dir");

        let tool = ExifTool::new("/nonexistent/no-such-tool");
        let registry = FieldRegistry::with_defaults();
        let html = directory_page(temp_dir.path(), &test_ctx(&tool, &registry));
        assert!(html.contains("a&amp;b"));
    }

    #[test]
    fn picture_page_embeds_inline_preview_and_field_table() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let img = write_test_image(temp_dir.path(), "photo.png");

        let tool = ExifTool::new("/nonexistent/no-such-tool");
        let registry = FieldRegistry::with_defaults();
        let html = picture_page(&img, &test_ctx(&tool, &registry));

        assert!(html.contains("data:image/"));
        assert!(html.contains("DateTimeOriginal"));
        assert!(html.contains("onUpdate('DateTimeOriginal')"));
        assert!(html.contains("DateTimeOriginal_0"));
        assert!(html.contains("DateTimeOriginal_1"));
    }

    #[test]
    fn picture_page_shows_banner_for_unreadable_image() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "plain text").expect("failed to write file");

        let tool = ExifTool::new("/nonexistent/no-such-tool");
        let registry = FieldRegistry::with_defaults();
        let html = picture_page(&path, &test_ctx(&tool, &registry));
        assert!(html.contains("UNRECOGNISED IMAGE"));
        assert!(html.contains("Back up"));
    }

    #[test]
    fn tool_failure_page_escapes_captured_streams() {
        let outcome = ToolOutcome {
            success: false,
            stdout: "<out>".into(),
            stderr: "<err>".into(),
        };
        let html = tool_failure_page(&outcome);
        assert!(html.contains("STDOUT"));
        assert!(html.contains("&lt;out&gt;"));
        assert!(html.contains("&lt;err&gt;"));
        assert!(!html.contains("<out>"));
    }

    #[test]
    fn parameter_error_page_shows_payload() {
        let payload = vec!["DateTimeOriginal".to_string(), "not-a-date".to_string()];
        let html = parameter_error_page(&payload);
        assert!(html.contains("ERROR in parameters"));
        assert!(html.contains("not-a-date"));
    }

    #[test]
    fn pages_carry_the_intent_script() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let tool = ExifTool::new("/nonexistent/no-such-tool");
        let registry = FieldRegistry::with_defaults();
        let html = directory_page(temp_dir.path(), &test_ctx(&tool, &registry));
        assert!(html.contains("window.ipc.postMessage"));
        assert!(html.contains("submit_update"));
    }
}
