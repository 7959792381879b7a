//! 結果シートの列定義
//!
//! 列順は固定: MST, 社名, 住所, 状態

use crate::types::ResultRow;

/// 列幅の余白（文字数）
pub const COLUMN_PADDING: usize = 2;

/// テンプレートのMST列幅
pub const TEMPLATE_COLUMN_WIDTH: f64 = 20.0;

pub const RESULTS_SHEET_NAME: &str = "KetQuaTraCuu";
pub const TEMPLATE_SHEET_NAME: &str = "Data";

/// テンプレートの例示値
pub const TEMPLATE_TAX_CODES: [&str; 3] = ["0300588569", "0100109106", "0100112158"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultColumn {
    TaxCode,
    CompanyName,
    Address,
    Status,
}

pub const RESULT_COLUMNS: [ResultColumn; 4] = [
    ResultColumn::TaxCode,
    ResultColumn::CompanyName,
    ResultColumn::Address,
    ResultColumn::Status,
];

impl ResultColumn {
    pub fn header(&self) -> &'static str {
        match self {
            ResultColumn::TaxCode => "MST",
            ResultColumn::CompanyName => "Tên công ty",
            ResultColumn::Address => "Địa chỉ",
            ResultColumn::Status => "Trạng thái",
        }
    }

    pub fn value<'a>(&self, row: &'a ResultRow) -> &'a str {
        match self {
            ResultColumn::TaxCode => &row.tax_code,
            ResultColumn::CompanyName => &row.company_name,
            ResultColumn::Address => row.address.as_deref().unwrap_or(""),
            ResultColumn::Status => &row.status,
        }
    }
}

/// 列幅 = max(ヘッダ文字数, 最長セル文字数) + 余白
pub fn column_widths(rows: &[ResultRow]) -> [usize; 4] {
    RESULT_COLUMNS.map(|column| {
        rows.iter()
            .map(|row| column.value(row).chars().count())
            .fold(column.header().chars().count(), usize::max)
            + COLUMN_PADDING
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_header_only() {
        assert_eq!(column_widths(&[]), [5, 13, 9, 12]);
    }

    #[test]
    fn test_widths_longest_cell() {
        let rows = vec![
            ResultRow {
                tax_code: "0300588569".into(),
                company_name: "CÔNG TY TNHH MỘT THÀNH VIÊN".into(),
                address: None,
                status: "OK".into(),
                ..Default::default()
            },
            ResultRow {
                tax_code: "1".into(),
                company_name: "A".into(),
                address: Some("Hà Nội".into()),
                status: "Đang hoạt động (đã được cấp GCN ĐKT)".into(),
                ..Default::default()
            },
        ];
        let widths = column_widths(&rows);
        assert_eq!(widths[0], 12);
        assert_eq!(widths[1], "CÔNG TY TNHH MỘT THÀNH VIÊN".chars().count() + 2);
        assert_eq!(widths[2], 9);
        assert_eq!(widths[3], "Đang hoạt động (đã được cấp GCN ĐKT)".chars().count() + 2);
    }
}
