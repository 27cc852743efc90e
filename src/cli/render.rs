//! Table and JSON rendering of command results.

use crate::error::Result;
use crate::management::{ExtensionImage, ReplicationStatus};
use std::io::Write;

/// Renders rows as a padded text table with a header rule.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_uppercase()).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        if i > 0 {
            line.push_str(" | ");
        }
        line.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat_n(' ', pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}

/// `list-versions` table.
pub fn versions_table(images: &[ExtensionImage]) -> String {
    let rows: Vec<Vec<String>> = images
        .iter()
        .map(|image| {
            vec![
                image.namespace.clone(),
                image.name.clone(),
                image.version.clone(),
                yes_no(image.replication_completed),
                yes_no(image.is_internal),
                image.regions.clone().unwrap_or_default(),
            ]
        })
        .collect();
    table(
        &["Namespace", "Type", "Version", "Replicated?", "Internal?", "Regions"],
        &rows,
    )
}

/// `replication-status` table.
pub fn replication_table(statuses: &[ReplicationStatus]) -> String {
    let rows: Vec<Vec<String>> = statuses
        .iter()
        .map(|s| vec![s.location.clone(), s.status.clone()])
        .collect();
    table(&["Location", "Status"], &rows)
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<T: serde::Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_columns_to_widest_cell() {
        let out = table(
            &["Location", "Status"],
            &[
                vec!["West US".to_string(), "Completed".to_string()],
                vec!["Southeast Asia".to_string(), "InProgress".to_string()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "LOCATION       | STATUS");
        assert_eq!(lines[1], "-------------- | ----------");
        assert_eq!(lines[2], "West US        | Completed");
        assert_eq!(lines[3], "Southeast Asia | InProgress");
    }

    #[test]
    fn empty_table_still_has_header() {
        let out = replication_table(&[]);
        assert_eq!(out, "LOCATION | STATUS\n-------- | ------\n");
    }

    #[test]
    fn versions_table_shows_flags() {
        let image = ExtensionImage {
            namespace: "Foo.Bar".to_string(),
            name: "Ext".to_string(),
            version: "1.0.0".to_string(),
            is_internal: true,
            replication_completed: false,
            regions: Some("West US".to_string()),
            ..Default::default()
        };
        let out = versions_table(&[image]);
        let row = out.lines().nth(2).unwrap();
        assert_eq!(row, "Foo.Bar   | Ext  | 1.0.0   | no          | yes       | West US");
    }

    #[test]
    fn replication_json_uses_service_field_names() {
        let mut buf = Vec::new();
        write_json(
            &mut buf,
            &[ReplicationStatus {
                location: "West US".to_string(),
                status: "Completed".to_string(),
            }],
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["Location"], "West US");
        assert_eq!(value[0]["Status"], "Completed");
    }
}
