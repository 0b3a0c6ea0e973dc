//! Excel/ODS file reader using calamine

use crate::error::{Result, SheetFieldsError};
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod workbook;

pub use workbook::{CellValue, Sheet, Workbook};

/// An open workbook whose sheets are parsed one at a time
pub struct WorkbookReader {
    path: PathBuf,
    excel: Sheets<BufReader<File>>,
    sheet_names: Vec<String>,
}

impl WorkbookReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let excel = open_workbook_auto(path).map_err(|source| SheetFieldsError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let sheet_names = excel.sheet_names();
        debug!(path = %path.display(), sheets = sheet_names.len(), "opened workbook");

        Ok(Self {
            path: path.to_path_buf(),
            excel,
            sheet_names,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Read and parse a single sheet
    pub fn read_sheet(&mut self, name: &str) -> Result<Sheet> {
        let range = self
            .excel
            .worksheet_range(name)
            .map_err(|source| SheetFieldsError::Sheet {
                sheet: name.to_string(),
                source,
            })?;
        let sheet = parse_sheet(name, &range);
        debug!(
            sheet = %sheet.name,
            columns = sheet.columns.len(),
            rows = sheet.rows.len(),
            "parsed sheet"
        );
        Ok(sheet)
    }
}

/// Read a workbook from a file path
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let mut reader = WorkbookReader::open(path)?;

    let names = reader.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(names.len());
    for name in &names {
        sheets.push(reader.read_sheet(name)?);
    }

    Ok(Workbook {
        path: reader.path,
        sheets,
    })
}

/// Split a used range into a header row and data rows
pub fn parse_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let mut rows = range.rows();

    let Some(header) = rows.next() else {
        return Sheet {
            name: name.to_string(),
            ..Default::default()
        };
    };

    let header: Vec<CellValue> = header.iter().map(parse_cell_value).collect();
    let columns = column_names(&header);

    // Fully blank rows inside the used range are not data
    let rows = rows
        .map(|row| row.iter().map(parse_cell_value).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .collect();

    Sheet {
        name: name.to_string(),
        columns,
        rows,
    }
}

/// Build unique column names from header cells.
///
/// Blank headers become `Unnamed: <index>`; repeats get `.1`, `.2`, ... suffixes.
pub fn column_names(header: &[CellValue]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(header.len());

    for (index, cell) in header.iter().enumerate() {
        let base = match cell {
            CellValue::Empty => format!("Unnamed: {}", index),
            other => other.to_string(),
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        seen.insert(name.clone());
        columns.push(name);
    }

    columns
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        // Error cells (#N/A, #DIV/0!, ...) count as missing
        Data::Error(_) | Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::DateTime(naive.to_string()),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::DateTime(s.clone()),
        Data::DurationIso(s) => CellValue::DateTime(s.clone()),
    }
}
