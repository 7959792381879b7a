//! 入力Excelの読み込み
//!
//! 先頭シートのみ、1行目をヘッダとして各行を InputRecord に変換する

use crate::error::{LookupError, Result};
use calamine::{Data, Reader, Xlsx};
use mst_lookup_common::{InputRecord, MST_COLUMN};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

const EXCEL_EXTENSION: &str = "xlsx";

/// セル値を文字列化（整数値の小数は ".0" を付けない）
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.as_f64().to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

pub fn read_records(path: &Path) -> Result<Vec<InputRecord>> {
    let is_xlsx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(EXCEL_EXTENSION))
        .unwrap_or(false);
    if !is_xlsx {
        return Err(LookupError::InvalidFileType(path.display().to_string()));
    }

    let bytes = std::fs::read(path).map_err(|source| LookupError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "input file loaded");

    read_records_from_bytes(bytes)
}

pub fn read_records_from_bytes(bytes: Vec<u8>) -> Result<Vec<InputRecord>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| LookupError::ExcelRead(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LookupError::ExcelRead("file không có sheet nào".into()))?
        .map_err(|e| LookupError::ExcelRead(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.iter().map(cell_to_string).collect();

    let records: Vec<InputRecord> = rows
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        // 空行はスキップ
        .filter(|cells| cells.iter().any(|c| !c.is_empty()))
        .map(|cells| {
            headers
                .iter()
                .zip(cells)
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, value)| (header.clone(), value))
                .collect()
        })
        .collect();

    debug!(columns = headers.len(), rows = records.len(), "worksheet parsed");
    Ok(records)
}

/// 行が1件以上あり、MST列が存在すること
pub fn validate_records(records: &[InputRecord]) -> Result<()> {
    match records.first() {
        Some(first) if first.contains_column(MST_COLUMN) => Ok(()),
        _ => Err(LookupError::MissingColumn),
    }
}
