//! Minimal XLSX fixtures built by hand with `zip`
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// A sheet fixture: name plus rows of cell text, `""` leaves the cell blank
pub type SheetFixture<'a> = (&'a str, &'a [&'a [&'a str]]);

/// A typed cell for fixtures that need more than text
#[derive(Debug, Clone)]
pub enum MockCell {
    Blank,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Error code such as `#N/A`
    Error(String),
}

pub fn t(s: &str) -> MockCell {
    MockCell::Text(s.to_string())
}

/// Write a valid XLSX with inline-string cells
pub fn create_mock_xlsx(path: &Path, sheets: &[SheetFixture]) -> anyhow::Result<()> {
    let typed: Vec<(&str, Vec<Vec<MockCell>>)> = sheets
        .iter()
        .map(|(name, rows)| (*name, text_rows(rows)))
        .collect();
    create_typed_xlsx(path, &typed)
}

fn text_rows(rows: &[&[&str]]) -> Vec<Vec<MockCell>> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|v| if v.is_empty() { MockCell::Blank } else { t(v) })
                .collect()
        })
        .collect()
}

/// Write a valid XLSX with typed cells
pub fn create_typed_xlsx(path: &Path, sheets: &[(&str, Vec<Vec<MockCell>>)]) -> anyhow::Result<()> {
    let names: Vec<&str> = sheets.iter().map(|(name, _)| *name).collect();
    let parts: Vec<Option<String>> = sheets.iter().map(|(_, rows)| Some(sheet_xml(rows))).collect();
    write_package(path, &names, &parts)
}

/// Write an XLSX whose last sheet is declared in the workbook but has no worksheet part
pub fn create_xlsx_with_missing_sheet(
    path: &Path,
    sheets: &[SheetFixture],
    missing: &str,
) -> anyhow::Result<()> {
    let mut names: Vec<&str> = sheets.iter().map(|(name, _)| *name).collect();
    let mut parts: Vec<Option<String>> = sheets
        .iter()
        .map(|(_, rows)| Some(sheet_xml(&text_rows(rows))))
        .collect();
    names.push(missing);
    parts.push(None);
    write_package(path, &names, &parts)
}

fn write_package(path: &Path, sheets: &[&str], parts: &[Option<String>]) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    // 1. [Content_Types].xml
    zip.start_file("[Content_Types].xml", options)?;
    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
"#,
    );
    for (i, _) in sheets.iter().enumerate() {
        content_types.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            i + 1
        ));
    }
    content_types.push_str("</Types>");
    zip.write_all(content_types.as_bytes())?;

    // 2. _rels/.rels
    zip.start_file("_rels/.rels", options)?;
    zip.write_all(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#.as_bytes())?;

    // 3. xl/workbook.xml
    zip.start_file("xl/workbook.xml", options)?;
    let mut workbook_xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
"#,
    );
    for (i, name) in sheets.iter().enumerate() {
        workbook_xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape(name),
            i + 1,
            i + 1
        ));
    }
    workbook_xml.push_str("</sheets></workbook>");
    zip.write_all(workbook_xml.as_bytes())?;

    // 4. xl/_rels/workbook.xml.rels
    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for (i, _) in sheets.iter().enumerate() {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }
    rels.push_str("</Relationships>");
    zip.write_all(rels.as_bytes())?;

    // 5. xl/worksheets/sheetN.xml
    for (i, part) in parts.iter().enumerate() {
        let Some(xml) = part else {
            continue;
        };
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)?;
        zip.write_all(xml.as_bytes())?;
    }

    zip.finish()?;
    Ok(())
}

fn sheet_xml(rows: &[Vec<MockCell>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            let cell_ref = format!("{}{}", column_letter(c), r + 1);
            let cell_xml = match cell {
                MockCell::Blank => continue,
                MockCell::Text(s) => format!(
                    r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    cell_ref,
                    escape(s)
                ),
                MockCell::Number(n) => format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, n),
                MockCell::Bool(b) => {
                    format!(r#"<c r="{}" t="b"><v>{}</v></c>"#, cell_ref, u8::from(*b))
                }
                MockCell::Error(code) => {
                    format!(r#"<c r="{}" t="e"><v>{}</v></c>"#, cell_ref, escape(code))
                }
            };
            xml.push_str(&cell_xml);
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// The two-sheet workbook used across tests: one sheet with field and type
/// columns, one without
pub fn write_fields_workbook(path: &Path) -> anyhow::Result<()> {
    create_mock_xlsx(
        path,
        &[
            (
                "General",
                &[
                    &["Field Name", "Data Type", "Description"],
                    &["projectId", "Int", "Primary key"],
                    &["projectName", "String", ""],
                    &["", "String", "orphan type"],
                    &["remarks", "", "no type"],
                    &["projectName", "Text", "duplicate"],
                ],
            ),
            ("Lookup", &[&["A", "B"], &["1", "2"]]),
        ],
    )
}
