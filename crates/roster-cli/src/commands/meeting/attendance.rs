use std::io::Read;

use anyhow::{Context, bail};
use roster_db::repos::meeting::AttendanceInput;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn update(
    meeting_id: i64,
    file: Option<&str>,
    marks: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut entries = match file {
        Some(path) => parse_entries(&read_input(path)?)?,
        None => Vec::new(),
    };
    for mark in marks {
        entries.push(parse_mark(mark)?);
    }
    if entries.is_empty() {
        bail!("no attendance given: pass --file or at least one --mark");
    }

    let result = ctx.service.update_attendance(meeting_id, &entries).await?;
    if result.skipped > 0 {
        tracing::warn!(
            skipped = result.skipped,
            "some attendance entries were skipped"
        );
    }
    output(&result, flags.format)
}

fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read attendance from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read attendance file {path}"))
}

/// Entries arrive as a JSON array; malformed items are left for the service
/// to skip and count. A field of the wrong type is dropped on its own.
fn parse_entries(raw: &str) -> anyhow::Result<Vec<AttendanceInput>> {
    let values: Vec<Value> =
        serde_json::from_str(raw).context("attendance input must be a JSON array")?;
    Ok(values.iter().map(entry_from_value).collect())
}

fn entry_from_value(value: &Value) -> AttendanceInput {
    let text = |key: &str| value.get(key).and_then(Value::as_str).map(String::from);
    AttendanceInput {
        student_id: value.get("student_id").and_then(Value::as_i64),
        status: text("status"),
        note: text("note"),
    }
}

/// `STUDENT_ID=STATUS`
fn parse_mark(raw: &str) -> anyhow::Result<AttendanceInput> {
    let Some((id, status)) = raw.split_once('=') else {
        bail!("invalid --mark '{raw}': expected STUDENT_ID=STATUS");
    };
    let student_id = id
        .trim()
        .parse::<i64>()
        .with_context(|| format!("invalid student id in --mark '{raw}'"))?;
    Ok(AttendanceInput {
        student_id: Some(student_id),
        status: Some(status.trim().to_string()),
        note: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_parse_into_entries() {
        let entry = parse_mark("42=present").expect("mark");
        assert_eq!(entry.student_id, Some(42));
        assert_eq!(entry.status.as_deref(), Some("present"));
    }

    #[test]
    fn malformed_marks_are_rejected() {
        assert!(parse_mark("present").is_err());
        assert!(parse_mark("jane=present").is_err());
    }

    #[test]
    fn json_items_with_wrong_shape_become_empty_entries() {
        let entries = parse_entries(
            r#"[{"student_id": 1, "status": "absent", "note": "sick"}, {"student_id": "x"}, 7]"#,
        )
        .expect("array");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].note.as_deref(), Some("sick"));
        assert_eq!(entries[1].student_id, None);
        assert_eq!(entries[2].status, None);
    }

    #[test]
    fn mistyped_field_drops_only_that_field() {
        let entries = parse_entries(
            r#"[{"student_id": 1, "status": "present", "note": 5}, {"student_id": 2, "status": 3}]"#,
        )
        .expect("array");
        assert_eq!(entries[0].student_id, Some(1));
        assert_eq!(entries[0].status.as_deref(), Some("present"));
        assert_eq!(entries[0].note, None);
        assert_eq!(entries[1].student_id, Some(2));
        assert_eq!(entries[1].status, None);
    }

    #[test]
    fn non_array_input_is_an_error() {
        assert!(parse_entries(r#"{"student_id": 1}"#).is_err());
    }
}
