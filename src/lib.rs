//! Excelの税コード(MST)一覧から事業者情報を一括照会する
//!
//! - reader: 入力Excelの読み込みと検証
//! - client: 照会APIクライアント
//! - driver: 逐次照会ループ（待機・停止・世代管理）
//! - export: 結果/テンプレートのExcel出力

pub mod cli;
pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod export;
pub mod logging;
pub mod reader;
