//! sheetfields-core: read field names and declared data types from spreadsheets
//!
//! Workbooks are read once through calamine into an owned [`Workbook`] model.
//! [`inspect`] renders per-sheet previews and field lists, [`types`] builds the
//! field name to data type mapping, and [`schema`] with [`prisma`] turn
//! first-column field lists into database models.

pub mod config;
pub mod error;
pub mod inspect;
pub mod prisma;
pub mod reader;
pub mod schema;
pub mod types;

pub use config::{SchemaConfig, SheetFieldsConfig};
pub use error::{Result, SheetFieldsError};
pub use reader::{CellValue, Sheet, Workbook, WorkbookReader, read_workbook};
pub use schema::FieldSchema;
pub use types::{FieldDescriptor, FieldTypes, SheetTypes, TypeReport};
