// SPDX-License-Identifier: MPL-2.0
//! The capture-timestamp field editor (`DateTimeOriginal`).
//!
//! EXIF stores the capture timestamp as `YYYY:MM:DD HH:MM:SS`. The editor
//! parses and classifies the raw value, renders a date control and a time
//! text control, and re-serializes edited values back into the EXIF form
//! for the external tool.

use super::{Classification, FieldEditor, UpdatePayload};
use crate::render::escape_html;
use chrono::{Local, NaiveDateTime};

/// Identifier of the capture-timestamp field.
pub const CAPTURE_FIELD: &str = "DateTimeOriginal";

/// Textual form the external tool reads and writes.
const EXIF_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
/// Textual form the two edit controls submit, joined with one space.
const INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Editor for one capture-timestamp value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeEditor {
    id: String,
    raw: String,
    parsed: Option<NaiveDateTime>,
}

impl DateTimeEditor {
    /// Builds an editor from the raw value reported by the external tool,
    /// classifying it in the process.
    pub fn new(id: &str, raw: &str) -> Self {
        let parsed = if matches_exif_pattern(raw) {
            NaiveDateTime::parse_from_str(raw, EXIF_FORMAT).ok()
        } else {
            None
        };
        Self {
            id: id.to_string(),
            raw: raw.to_string(),
            parsed,
        }
    }

    /// Builds a new editor from an update payload.
    ///
    /// The payload must be exactly `[field_id, "YYYY-MM-DD", "HH:MM:SS"]`.
    /// Date and time are joined with a single space and parsed; on success
    /// the value is re-serialized into the EXIF form as the new raw value.
    /// Any arity or parse failure yields `None`.
    pub fn from_update(payload: &UpdatePayload) -> Option<Self> {
        let parts = payload.as_slice();
        if parts.len() != 3 {
            return None;
        }
        let text = format!("{} {}", parts[1], parts[2]);
        let date_time = NaiveDateTime::parse_from_str(&text, INPUT_FORMAT).ok()?;
        Some(Self::new(
            &parts[0],
            &date_time.format(EXIF_FORMAT).to_string(),
        ))
    }

    /// The parsed timestamp when the raw value is valid.
    pub fn parsed(&self) -> Option<NaiveDateTime> {
        self.parsed
    }

    fn render_controls(&self, date_time: NaiveDateTime) -> String {
        let pic_date = date_time.format("%Y-%m-%d");
        let pic_time = date_time.format("%H:%M:%S");
        format!(
            "<input type=\"date\" id=\"{id}_0\" value=\"{pic_date}\"/>\
             &nbsp;&nbsp;&nbsp;\
             <input type=\"text\" id=\"{id}_1\" value=\"{pic_time}\"/>",
            id = self.id,
        )
    }
}

impl FieldEditor for DateTimeEditor {
    fn id(&self) -> &str {
        &self.id
    }

    fn raw(&self) -> &str {
        &self.raw
    }

    fn classification(&self) -> Classification {
        match self.parsed {
            Some(_) => Classification::Valid,
            None if self.raw.is_empty() => Classification::Missing,
            None => Classification::Corrupt(self.raw.clone()),
        }
    }

    /// Valid values pre-fill the controls; missing and corrupt values
    /// pre-fill from the current moment so the user always has a sane
    /// starting point. Corrupt additionally shows the offending text.
    fn render_fragment(&self) -> String {
        match self.parsed {
            Some(date_time) => self.render_controls(date_time),
            None => {
                let mut out = if self.raw.is_empty() {
                    "--- MISSING VALUE ---&nbsp;&nbsp;".to_string()
                } else {
                    format!(
                        "!!! CORRUPT VALUE: &quot;{}&quot; !!!&nbsp;&nbsp;",
                        escape_html(&self.raw)
                    )
                };
                out.push_str(&self.render_controls(Local::now().naive_local()));
                out
            }
        }
    }

    /// The tool sets all date tags in one pass, as `-AllDates` covers the
    /// related create/modify timestamps too.
    fn tool_args(&self) -> Vec<String> {
        vec![format!("-AllDates={}", self.raw)]
    }
}

/// Strict shape check for `YYYY:MM:DD HH:MM:SS`: four-digit year, two-digit
/// components, colon and space delimiters, nothing else.
fn matches_exif_pattern(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.len() != 19 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, &c)| match i {
        4 | 7 | 13 | 16 => c == b':',
        10 => c == b' ',
        _ => c.is_ascii_digit(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(parts: &[&str]) -> UpdatePayload {
        UpdatePayload::new(parts.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn valid_raw_value_parses() {
        let editor = DateTimeEditor::new(CAPTURE_FIELD, "2024:03:05 14:30:00");
        assert_eq!(editor.classification(), Classification::Valid);
        let parsed = editor.parsed().expect("should parse");
        assert_eq!(parsed.format(EXIF_FORMAT).to_string(), "2024:03:05 14:30:00");
    }

    #[test]
    fn parse_then_serialize_is_identity() {
        for raw in [
            "2024:03:05 14:30:00",
            "1999:12:31 23:59:59",
            "2000:01:01 00:00:00",
        ] {
            let editor = DateTimeEditor::new(CAPTURE_FIELD, raw);
            let parsed = editor.parsed().expect("should parse");
            assert_eq!(parsed.format(EXIF_FORMAT).to_string(), raw);
        }
    }

    #[test]
    fn empty_raw_value_is_missing_never_corrupt() {
        let editor = DateTimeEditor::new(CAPTURE_FIELD, "");
        assert_eq!(editor.classification(), Classification::Missing);
    }

    #[test]
    fn non_matching_raw_value_is_corrupt() {
        for raw in ["not-a-date", "2024-01-01", "2024:01:01", "2024:13:01 00:00:00"] {
            let editor = DateTimeEditor::new(CAPTURE_FIELD, raw);
            assert_eq!(
                editor.classification(),
                Classification::Corrupt(raw.to_string()),
                "expected corrupt for {:?}",
                raw
            );
        }
    }

    #[test]
    fn corrupt_fragment_shows_escaped_original_text() {
        let editor = DateTimeEditor::new(CAPTURE_FIELD, "<script>bad</script>");
        let fragment = editor.render_fragment();
        assert!(fragment.contains("CORRUPT VALUE"));
        assert!(fragment.contains("&lt;script&gt;bad&lt;/script&gt;"));
        assert!(!fragment.contains("<script>"));
    }

    #[test]
    fn missing_fragment_shows_marker_and_controls() {
        let editor = DateTimeEditor::new(CAPTURE_FIELD, "");
        let fragment = editor.render_fragment();
        assert!(fragment.contains("MISSING VALUE"));
        assert!(fragment.contains("DateTimeOriginal_0"));
        assert!(fragment.contains("DateTimeOriginal_1"));
    }

    #[test]
    fn valid_fragment_prefills_controls() {
        let editor = DateTimeEditor::new(CAPTURE_FIELD, "2024:03:05 14:30:00");
        let fragment = editor.render_fragment();
        assert!(fragment.contains("value=\"2024-03-05\""));
        assert!(fragment.contains("value=\"14:30:00\""));
        assert!(!fragment.contains("MISSING"));
        assert!(!fragment.contains("CORRUPT"));
    }

    #[test]
    fn from_update_builds_new_raw_value() {
        let editor =
            DateTimeEditor::from_update(&payload(&[CAPTURE_FIELD, "2024-03-05", "14:30:00"]))
                .expect("update should parse");
        assert_eq!(editor.raw(), "2024:03:05 14:30:00");
        assert_eq!(editor.classification(), Classification::Valid);
    }

    #[test]
    fn from_update_rejects_unparsable_values() {
        assert!(DateTimeEditor::from_update(&payload(&[CAPTURE_FIELD, "not-a-date", "xx"]))
            .is_none());
    }

    #[test]
    fn from_update_rejects_wrong_arity() {
        assert!(DateTimeEditor::from_update(&payload(&[CAPTURE_FIELD, "2024-03-05"])).is_none());
        assert!(DateTimeEditor::from_update(&payload(&[
            CAPTURE_FIELD,
            "2024-03-05",
            "14:30:00",
            "extra"
        ]))
        .is_none());
    }

    #[test]
    fn from_update_rejects_invalid_calendar_date() {
        assert!(
            DateTimeEditor::from_update(&payload(&[CAPTURE_FIELD, "2024-02-30", "12:00:00"]))
                .is_none()
        );
    }

    #[test]
    fn tool_args_set_all_dates() {
        let editor = DateTimeEditor::new(CAPTURE_FIELD, "2024:03:05 14:30:00");
        assert_eq!(editor.tool_args(), ["-AllDates=2024:03:05 14:30:00"]);
    }

    #[test]
    fn pattern_requires_exact_shape() {
        assert!(matches_exif_pattern("2024:03:05 14:30:00"));
        assert!(!matches_exif_pattern("2024:03:05 14:30:00 "));
        assert!(!matches_exif_pattern("24:03:05 14:30:00"));
        assert!(!matches_exif_pattern("2024-03-05 14:30:00"));
        assert!(!matches_exif_pattern("2024:03:05T14:30:00"));
    }
}
