//! Configuration for workbook location, expected columns and schema naming

use crate::error::{Result, SheetFieldsError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "sheetfields.toml";

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetFieldsConfig {
    /// Workbook read when no path is given on the command line
    pub workbook: PathBuf,
    /// Header of the column holding field names
    pub field_name_column: String,
    /// Header of the column holding declared data types
    pub data_type_column: String,
    /// Number of data rows shown in a sheet preview
    pub preview_rows: usize,
    /// Key of the fallback entry for sheets without the expected columns
    pub fallback_key: String,
    pub schema: SchemaConfig,
}

impl SheetFieldsConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: SheetFieldsConfig =
            toml::from_str(&content).map_err(|source| SheetFieldsError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config)
    }

    /// Load an explicit config file, else `sheetfields.toml` from the
    /// working directory if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.field_name_column.trim().is_empty() {
            return Err(SheetFieldsError::InvalidConfig(
                "field_name_column must not be empty".to_string(),
            ));
        }
        if self.data_type_column.trim().is_empty() {
            return Err(SheetFieldsError::InvalidConfig(
                "data_type_column must not be empty".to_string(),
            ));
        }
        if self.preview_rows == 0 {
            return Err(SheetFieldsError::InvalidConfig(
                "preview_rows must be at least 1".to_string(),
            ));
        }
        if self.fallback_key.is_empty() {
            return Err(SheetFieldsError::InvalidConfig(
                "fallback_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SheetFieldsConfig {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from("MahaRERA_Fields.xlsx"),
            field_name_column: "Field Name".to_string(),
            data_type_column: "Data Type".to_string(),
            preview_rows: 5,
            fallback_key: "__columns__".to_string(),
            schema: SchemaConfig::default(),
        }
    }
}

/// Naming used by the Prisma generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Prefix of mapped table names
    pub table_prefix: String,
    /// Prefix of generated model names
    pub model_prefix: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            table_prefix: "rera_".to_string(),
            model_prefix: "Rera".to_string(),
        }
    }
}
