//! Field type extraction: field name to declared data type, per sheet

use crate::config::SheetFieldsConfig;
use crate::reader::{Sheet, Workbook};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A field name with its declared type, `None` when the type cell is blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub data_type: Option<String>,
}

/// Field descriptors of one sheet, in first-appearance order.
///
/// Inserting an existing name replaces its type in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTypes {
    entries: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
}

impl FieldTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field, returning the type it replaced
    pub fn insert(&mut self, name: String, data_type: Option<String>) -> Option<Option<String>> {
        match self.index.get(&name) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].data_type, data_type)),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push(FieldDescriptor { name, data_type });
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Option<String>> {
        self.index.get(name).map(|&pos| &self.entries[pos].data_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.entries.iter()
    }
}

impl Serialize for FieldTypes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for field in &self.entries {
            map.serialize_entry(&field.name, &field.data_type)?;
        }
        map.end()
    }
}

/// What the extractor produced for one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetTypes {
    Fields(FieldTypes),
    /// The sheet lacks a field name or data type column
    Fallback { key: String, columns: Vec<String> },
}

impl Serialize for SheetTypes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SheetTypes::Fields(fields) => fields.serialize(serializer),
            SheetTypes::Fallback { key, columns } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(key, columns)?;
                map.end()
            }
        }
    }
}

/// Sheet name to extraction result, in workbook order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeReport {
    pub sheets: Vec<(String, SheetTypes)>,
}

impl TypeReport {
    pub fn get(&self, sheet: &str) -> Option<&SheetTypes> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, types)| types)
    }

    /// Indented JSON, two spaces per level, pure ASCII
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self).map(|json| escape_non_ascii(&json))
    }
}

/// Replace every non-ASCII char with `\uXXXX` UTF-16 escapes.
///
/// JSON punctuation is ASCII, so non-ASCII only ever occurs inside strings.
fn escape_non_ascii(json: &str) -> String {
    if json.is_ascii() {
        return json.to_string();
    }

    let mut out = String::with_capacity(json.len() + 16);
    let mut units = [0u16; 2];
    for ch in json.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}

impl Serialize for TypeReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sheets.len()))?;
        for (name, types) in &self.sheets {
            map.serialize_entry(name, types)?;
        }
        map.end()
    }
}

pub fn extract_types(workbook: &Workbook, config: &SheetFieldsConfig) -> TypeReport {
    TypeReport {
        sheets: workbook
            .sheets
            .iter()
            .map(|sheet| (sheet.name.clone(), extract_sheet_types(sheet, config)))
            .collect(),
    }
}

pub fn extract_sheet_types(sheet: &Sheet, config: &SheetFieldsConfig) -> SheetTypes {
    let (Some(name_col), Some(type_col)) = (
        sheet.column_index(&config.field_name_column),
        sheet.column_index(&config.data_type_column),
    ) else {
        debug!(sheet = %sheet.name, "expected columns missing, using column list");
        return SheetTypes::Fallback {
            key: config.fallback_key.clone(),
            columns: sheet.columns.clone(),
        };
    };

    let mut fields = FieldTypes::new();
    for row in 0..sheet.rows.len() {
        // Only non-blank text cells name a field
        let Some(name) = sheet.cell(row, name_col).as_text() else {
            continue;
        };
        if name.trim().is_empty() {
            continue;
        }

        let data_type = sheet.cell(row, type_col).to_opt_string();
        if let Some(previous) = fields.insert(name.to_string(), data_type) {
            warn!(
                sheet = %sheet.name,
                field = name,
                previous = ?previous,
                "duplicate field name, keeping the later row"
            );
        }
    }

    debug!(sheet = %sheet.name, fields = fields.len(), "extracted field types");
    SheetTypes::Fields(fields)
}
