use sheetfields_core::reader::CellValue;
use sheetfields_core::reader::read_workbook;
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: dump_cells <file>");
        return;
    }
    let path = &args[1];
    let workbook = read_workbook(path).unwrap();

    for sheet in workbook.sheets {
        println!("Sheet: {}", sheet.name);
        println!("  Columns: {:?}", sheet.columns);
        for (row, cells) in sheet.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    CellValue::Text(t) => println!("  ({}, {}) [TEXT]: {}", row, col, t),
                    CellValue::Int(i) => println!("  ({}, {}) [INT]: {}", row, col, i),
                    CellValue::Float(n) => println!("  ({}, {}) [NUMBER]: {}", row, col, n),
                    CellValue::Boolean(b) => println!("  ({}, {}) [BOOL]: {}", row, col, b),
                    CellValue::DateTime(d) => println!("  ({}, {}) [DATETIME]: {}", row, col, d),
                    CellValue::Empty => println!("  ({}, {}) [EMPTY]", row, col),
                }
            }
        }
    }
}
