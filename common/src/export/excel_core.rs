//! Excel生成（共通ライブラリ）
//!
//! layout.rs の列定義を使用して結果シート・テンプレートを生成

use crate::layout::{
    column_widths, RESULT_COLUMNS, RESULTS_SHEET_NAME,
    TEMPLATE_COLUMN_WIDTH, TEMPLATE_SHEET_NAME, TEMPLATE_TAX_CODES,
};
use crate::types::{ResultRow, MST_COLUMN};
use rust_xlsxwriter::*;

/// 結果シートをバッファに生成
///
/// 1行目がヘッダ、以降は結果行を入力順に書き出す。
pub fn generate_results_buffer(results: &[ResultRow]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(RESULTS_SHEET_NAME)
        .map_err(|e| format!("Lỗi đặt tên sheet: {}", e))?;

    for (col, column) in RESULT_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, column.header(), &header_format)
            .map_err(|e| format!("Lỗi ghi tiêu đề: {}", e))?;
    }

    for (index, row) in results.iter().enumerate() {
        let excel_row = (index + 1) as u32;
        for (col, column) in RESULT_COLUMNS.iter().enumerate() {
            worksheet.write_string(excel_row, col as u16, column.value(row))
                .map_err(|e| format!("Lỗi ghi dữ liệu: {}", e))?;
        }
    }

    for (col, width) in column_widths(results).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)
            .map_err(|e| format!("Lỗi đặt độ rộng cột: {}", e))?;
    }

    workbook.save_to_buffer()
        .map_err(|e| format!("Lỗi lưu Excel: {}", e))
}

/// テンプレート（MST列＋例示3行）をバッファに生成
pub fn generate_template_buffer() -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(TEMPLATE_SHEET_NAME)
        .map_err(|e| format!("Lỗi đặt tên sheet: {}", e))?;

    worksheet.write_string(0, 0, MST_COLUMN)
        .map_err(|e| format!("Lỗi ghi tiêu đề: {}", e))?;
    for (index, tax_code) in TEMPLATE_TAX_CODES.iter().enumerate() {
        // 先頭の0を保持するため文字列で書く
        worksheet.write_string((index + 1) as u32, 0, *tax_code)
            .map_err(|e| format!("Lỗi ghi dữ liệu: {}", e))?;
    }

    worksheet.set_column_width(0, TEMPLATE_COLUMN_WIDTH)
        .map_err(|e| format!("Lỗi đặt độ rộng cột: {}", e))?;

    workbook.save_to_buffer()
        .map_err(|e| format!("Lỗi lưu Excel: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_buffer_is_zip() {
        let rows = vec![ResultRow::skipped()];
        let buffer = generate_results_buffer(&rows).unwrap();
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_template_buffer_is_zip() {
        let buffer = generate_template_buffer().unwrap();
        assert!(buffer.starts_with(b"PK"));
    }
}
