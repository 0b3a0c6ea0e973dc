//! Field-column schema: the first-column values of every sheet

use crate::error::Result;
use crate::reader::Workbook;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Sheet name to the field names listed in its first column, in workbook order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSchema {
    pub sheets: Vec<(String, Vec<String>)>,
}

impl FieldSchema {
    /// Collect first-column values below the header of each non-empty sheet
    pub fn from_workbook(workbook: &Workbook) -> Self {
        let mut sheets = Vec::new();

        for sheet in &workbook.sheets {
            if sheet.is_empty() {
                debug!(sheet = %sheet.name, "skipping empty sheet");
                continue;
            }

            let fields: Vec<String> = (0..sheet.rows.len())
                .filter_map(|row| sheet.cell(row, 0).to_opt_string())
                .filter(|name| !name.is_empty())
                .collect();

            debug!(sheet = %sheet.name, fields = fields.len(), "collected field column");
            sheets.push((sheet.name.clone(), fields));
        }

        Self { sheets }
    }

    pub fn get(&self, sheet: &str) -> Option<&[String]> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, fields)| fields.as_slice())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for FieldSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sheets.len()))?;
        for (name, fields) in &self.sheets {
            map.serialize_entry(name, fields)?;
        }
        map.end()
    }
}

// A plain map would lose sheet order, so entries are read in document order.
impl<'de> Deserialize<'de> for FieldSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = FieldSchema;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of sheet names to lists of field names")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<FieldSchema, A::Error> {
                let mut sheets: Vec<(String, Vec<String>)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, fields)) =
                    access.next_entry::<String, Vec<FieldValue>>()?
                {
                    let fields = fields.into_iter().filter_map(FieldValue::into_name).collect();
                    match sheets.iter_mut().find(|(existing, _)| *existing == name) {
                        Some(entry) => entry.1 = fields,
                        None => sheets.push((name, fields)),
                    }
                }
                Ok(FieldSchema { sheets })
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}

/// Schema files written by other tools may hold numbers or nulls as field names
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Null(()),
}

impl FieldValue {
    fn into_name(self) -> Option<String> {
        match self {
            FieldValue::Text(s) if !s.is_empty() => Some(s),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}
