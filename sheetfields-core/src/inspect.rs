//! Sheet/field inspection: row previews, column headers and field name lists

use crate::config::SheetFieldsConfig;
use crate::reader::{Sheet, Workbook};

/// Everything the inspector prints for one workbook
#[derive(Debug, Clone, PartialEq)]
pub struct InspectReport {
    pub sheet_names: Vec<String>,
    pub sheets: Vec<SheetReport>,
}

/// Inspection result for a single sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetReport {
    pub name: String,
    /// Rendered table of the first rows
    pub preview: String,
    pub columns: Vec<String>,
    /// Present only when the sheet has a field name column
    pub field_names: Option<Vec<String>>,
}

pub fn inspect_workbook(workbook: &Workbook, config: &SheetFieldsConfig) -> InspectReport {
    InspectReport {
        sheet_names: workbook
            .sheet_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        sheets: workbook
            .sheets
            .iter()
            .map(|sheet| inspect_sheet(sheet, config))
            .collect(),
    }
}

pub fn inspect_sheet(sheet: &Sheet, config: &SheetFieldsConfig) -> SheetReport {
    SheetReport {
        name: sheet.name.clone(),
        preview: render_preview(sheet, config.preview_rows),
        columns: sheet.columns.clone(),
        field_names: field_names(sheet, &config.field_name_column),
    }
}

/// Non-missing values of the field name column, coerced to strings
pub fn field_names(sheet: &Sheet, column: &str) -> Option<Vec<String>> {
    let values = sheet.column_values(column)?;
    Some(values.filter_map(|v| v.to_opt_string()).collect())
}

/// Render the first `rows` data rows as a right-aligned table with a row index
pub fn render_preview(sheet: &Sheet, rows: usize) -> String {
    if sheet.columns.is_empty() {
        return "Empty sheet".to_string();
    }

    let head = sheet.head(rows);
    let index: Vec<String> = (0..head.len()).map(|i| i.to_string()).collect();
    let index_width = index.iter().map(|s| s.len()).max().unwrap_or(0);

    let cells: Vec<Vec<String>> = head
        .iter()
        .map(|row| {
            (0..sheet.columns.len())
                .map(|col| row.get(col).map(|c| c.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = sheet
        .columns
        .iter()
        .enumerate()
        .map(|(col, name)| {
            cells
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(head.len() + 1);
    lines.push(render_line(
        &" ".repeat(index_width),
        &sheet.columns,
        &widths,
    ));
    for (i, row) in cells.iter().enumerate() {
        lines.push(render_line(
            &format!("{:<width$}", index[i], width = index_width),
            row,
            &widths,
        ));
    }

    lines.join("\n")
}

fn render_line(index: &str, values: &[String], widths: &[usize]) -> String {
    let mut line = index.to_string();
    for (value, width) in values.iter().zip(widths) {
        let pad = width.saturating_sub(value.chars().count());
        line.push_str("  ");
        line.push_str(&" ".repeat(pad));
        line.push_str(value);
    }
    line.trim_end().to_string()
}

/// Render a list as `['a', 'b']`
pub fn render_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote(s.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

/// Single-quote an item, or double-quote it when it holds a `'` and no `"`
fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(ch),
        }
    }
    out.push(delim);
    out
}
