//! 実行データの型定義
//!
//! - InputRecord: 入力シートの1行
//! - ResultRow: 1行分の照会結果（追記のみ）
//! - RunStatus / RunPhase / RunSnapshot: 実行中の公開状態

use crate::messages;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 税コード列のヘッダ名（大文字小文字を含め完全一致）
pub const MST_COLUMN: &str = "MST";

/// 入力シートの1行（列名 → セル文字列）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRecord {
    cells: BTreeMap<String, String>,
}

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// MST列のみを持つレコード
    pub fn with_tax_code(value: impl Into<String>) -> Self {
        let mut record = Self::new();
        record.insert(MST_COLUMN, value);
        record
    }

    /// 同名の列が既にある場合は最初の値を残す
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.entry(column.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// 前後の空白を除いた税コード（列がなければ空文字）
    pub fn tax_code(&self) -> String {
        self.get(MST_COLUMN).map(str::trim).unwrap_or_default().to_string()
    }
}

impl<K, V> FromIterator<(K, V)> for InputRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// 行の処理結果の区分（エクスポート対象外）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowOutcome {
    #[default]
    Success,
    /// 税コードが空で照会しなかった
    Skipped,
    /// APIが成功以外のコードを返した
    Rejected,
    /// 通信失敗・タイムアウト・不正なレスポンス
    NetworkFailure,
}

impl RowOutcome {
    pub fn is_error(&self) -> bool {
        !matches!(self, RowOutcome::Success)
    }
}

/// 照会結果の1行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub tax_code: String,

    pub company_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    pub status: String,

    #[serde(default)]
    pub outcome: RowOutcome,
}

impl ResultRow {
    /// 税コードが空の行
    pub fn skipped() -> Self {
        Self {
            tax_code: messages::EMPTY_TAX_CODE.to_string(),
            company_name: messages::NO_TAX_CODE.to_string(),
            address: None,
            status: messages::SKIPPED_STATUS.to_string(),
            outcome: RowOutcome::Skipped,
        }
    }

    /// 通信失敗の行
    pub fn network_failure(tax_code: &str, cause: &str) -> Self {
        Self {
            tax_code: tax_code.to_string(),
            company_name: messages::FAILURE_NAME.to_string(),
            address: None,
            status: messages::network_failure_status(cause),
            outcome: RowOutcome::NetworkFailure,
        }
    }

    /// APIが照会を拒否した行
    pub fn rejected(tax_code: &str, desc: Option<&str>) -> Self {
        Self {
            tax_code: tax_code.to_string(),
            company_name: messages::NOT_FOUND_NAME.to_string(),
            address: None,
            status: messages::rejected_status(desc),
            outcome: RowOutcome::Rejected,
        }
    }
}

/// 実行状態の状態機械
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    /// stop-on-error で途中停止
    Halted,
    Completed,
}

/// 進捗と件数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatus {
    pub message: String,
    /// 0〜100
    pub progress: f64,
    pub success_count: usize,
    pub error_count: usize,
    pub total: usize,
}

impl Default for RunStatus {
    fn default() -> Self {
        Self {
            message: messages::INITIAL.to_string(),
            progress: 0.0,
            success_count: 0,
            error_count: 0,
            total: 0,
        }
    }
}

impl RunStatus {
    pub fn processed(&self) -> usize {
        self.success_count + self.error_count
    }
}

/// 公開される実行状態（1行ごとに更新）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSnapshot {
    pub phase: RunPhase,
    pub status: RunStatus,
    pub results: Vec<ResultRow>,
}

impl RunSnapshot {
    /// 新しい実行の開始状態
    pub fn started(total: usize) -> Self {
        Self {
            phase: RunPhase::Running,
            status: RunStatus {
                message: messages::READING.to_string(),
                total,
                ..RunStatus::default()
            },
            results: Vec::new(),
        }
    }

    /// 結果を追記して件数と進捗を更新
    pub fn record(&mut self, row: ResultRow) {
        if row.outcome.is_error() {
            self.status.error_count += 1;
        } else {
            self.status.success_count += 1;
        }
        self.results.push(row);

        let total = self.status.total;
        self.status.progress = if total == 0 {
            0.0
        } else {
            100.0 * self.results.len() as f64 / total as f64
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_code_trimmed() {
        let record = InputRecord::with_tax_code("  0300588569 \t");
        assert_eq!(record.tax_code(), "0300588569");
    }

    #[test]
    fn test_tax_code_missing_column() {
        let record: InputRecord = [("Tên", "ABC")].into_iter().collect();
        assert!(!record.contains_column(MST_COLUMN));
        assert_eq!(record.tax_code(), "");
    }

    #[test]
    fn test_insert_keeps_first_duplicate() {
        let record: InputRecord = [("MST", "111"), ("MST", "222")].into_iter().collect();
        assert_eq!(record.get("MST"), Some("111"));
    }

    #[test]
    fn test_record_counts_and_progress() {
        let mut snapshot = RunSnapshot::started(4);
        snapshot.record(ResultRow { tax_code: "1".into(), ..Default::default() });
        snapshot.record(ResultRow::skipped());

        assert_eq!(snapshot.status.success_count, 1);
        assert_eq!(snapshot.status.error_count, 1);
        assert_eq!(snapshot.status.processed(), snapshot.results.len());
        assert!((snapshot.status.progress - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_skipped_row_markers() {
        let row = ResultRow::skipped();
        assert_eq!(row.tax_code, "(trống)");
        assert_eq!(row.company_name, "Không có MST");
        assert_eq!(row.status, "❌ Bỏ qua");
        assert!(row.outcome.is_error());
    }

    #[test]
    fn test_result_row_json_is_camel_case() {
        let row = ResultRow::network_failure("0100109106", "timeout");
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"taxCode\":\"0100109106\""));
        assert!(json.contains("\"companyName\":\"Lỗi\""));
        assert!(!json.contains("address"));
    }
}
