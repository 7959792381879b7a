//! Excel出力（CLI版）
//!
//! バッファ生成は mst_lookup_common、ここではファイルへの書き出しのみ

use super::ExportOutcome;
use crate::error::{LookupError, Result};
use mst_lookup_common::export::excel_core::{generate_results_buffer, generate_template_buffer};
use mst_lookup_common::ResultRow;
use std::path::Path;
use tracing::{debug, info};

/// 結果をExcelに書き出す。結果が空なら何もしない。
///
/// 失敗してもメモリ上の結果には影響しない。
pub fn export_results(results: &[ResultRow], output_path: &Path) -> Result<ExportOutcome> {
    if results.is_empty() {
        info!("no results, skipping export");
        return Ok(ExportOutcome::NothingToExport);
    }

    let buffer = generate_results_buffer(results).map_err(LookupError::Export)?;
    write_buffer(&buffer, output_path)?;
    debug!(path = %output_path.display(), bytes = buffer.len(), "results written");

    Ok(ExportOutcome::Written {
        path: output_path.display().to_string(),
        rows: results.len(),
    })
}

/// テンプレート（MST列＋例示3行）を書き出す
pub fn export_template(output_path: &Path) -> Result<ExportOutcome> {
    let buffer = generate_template_buffer().map_err(LookupError::Export)?;
    write_buffer(&buffer, output_path)?;

    Ok(ExportOutcome::Written {
        path: output_path.display().to_string(),
        rows: mst_lookup_common::layout::TEMPLATE_TAX_CODES.len(),
    })
}

fn write_buffer(buffer: &[u8], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| LookupError::Export(format!("{}: {}", parent.display(), e)))?;
    }
    std::fs::write(output_path, buffer)
        .map_err(|e| LookupError::Export(format!("{}: {}", output_path.display(), e)))
}
