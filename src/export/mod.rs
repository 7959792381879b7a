pub mod excel;

use crate::error::{LookupError, Result};
use mst_lookup_common::ResultRow;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// エクスポートの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: String, rows: usize },
    /// 結果が空のためファイルを作成しなかった
    NothingToExport,
}

impl ExportOutcome {
    pub fn message(&self) -> String {
        match self {
            ExportOutcome::Written { path, .. } => mst_lookup_common::messages::exported(path),
            ExportOutcome::NothingToExport => mst_lookup_common::messages::NOTHING_TO_EXPORT.to_string(),
        }
    }
}

pub use excel::{export_results, export_template};

/// 結果をJSONで保存（後から export で再出力できる）
pub fn save_results_json(results: &[ResultRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, results)?;
    Ok(())
}

pub fn load_results_json(path: &Path) -> Result<Vec<ResultRow>> {
    let file = File::open(path).map_err(|source| LookupError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    let results = serde_json::from_reader(BufReader::new(file))?;
    Ok(results)
}
