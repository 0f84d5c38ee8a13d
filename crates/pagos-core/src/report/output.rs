//! Tab-separated output.

use crate::models::report::{ROW_HEADER, Row};

/// Render rows as tab-separated lines, optionally preceded by the header line.
///
/// Tabs and line breaks inside values are flattened to spaces so every row
/// stays on one line with exactly six columns.
pub fn format_tsv(rows: &[Row], include_header: bool) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);

    if include_header {
        lines.push(ROW_HEADER.join("\t"));
    }
    for row in rows {
        let fields: Vec<String> = row.fields().iter().map(|f| flatten(f)).collect();
        lines.push(fields.join("\t"));
    }

    lines.join("\n")
}

fn flatten(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ")
}
