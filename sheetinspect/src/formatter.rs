//! Console output for inspection reports

use colored::*;
use sheetfields_core::inspect::{SheetReport, render_list};

pub fn print_sheet_names(names: &[String]) {
    println!("Sheet Names: {}", render_list(names));
}

/// Print one sheet block: banner, preview, columns and field names
pub fn print_sheet(sheet: &SheetReport) {
    println!();
    println!("{}", format!("--- Sheet: {} ---", sheet.name).cyan().bold());
    println!("{}", sheet.preview);
    println!();
    println!("{} {}", "Columns:".bold(), render_list(&sheet.columns));

    if let Some(fields) = &sheet.field_names {
        println!();
        println!("{}", "Field Names:".bold());
        println!("{}", render_list(fields));
    }
}
