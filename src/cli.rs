use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_RESULTS_FILE: &str = "ket_qua_tra_cuu_mst.xlsx";
pub const DEFAULT_TEMPLATE_FILE: &str = "mau_tra_cuu_mst.xlsx";

#[derive(Parser)]
#[command(name = "mst-lookup")]
#[command(about = "Công cụ tra cứu Mã Số Thuế hàng loạt từ file Excel", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Excelの MST 列を順番に照会し、結果をExcelに出力
    Run {
        /// 入力Excelファイル（.xlsx、1行目がヘッダ）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力Excelファイル
        #[arg(short, long, default_value = DEFAULT_RESULTS_FILE)]
        output: PathBuf,

        /// 最初のエラーで停止
        #[arg(long)]
        stop_on_error: bool,

        /// リクエスト間隔（ミリ秒、省略時は設定値）
        #[arg(long)]
        delay_ms: Option<u64>,

        /// リクエストのタイムアウト（秒、省略時は設定値）
        #[arg(long)]
        timeout: Option<u64>,

        /// 結果JSONの保存先
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// 保存済みの結果JSONからExcelを生成
    Export {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力Excelファイル
        #[arg(short, long, default_value = DEFAULT_RESULTS_FILE)]
        output: PathBuf,
    },

    /// 入力用のテンプレートExcelを生成
    Template {
        /// 出力Excelファイル
        #[arg(short, long, default_value = DEFAULT_TEMPLATE_FILE)]
        output: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 照会APIのエンドポイント
        #[arg(long)]
        set_endpoint: Option<String>,

        /// リクエスト間隔（ミリ秒）
        #[arg(long)]
        set_delay_ms: Option<u64>,

        /// タイムアウト（秒）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

impl Commands {
    /// 設定ファイルを読む必要があるサブコマンドか
    pub fn needs_config(&self) -> bool {
        matches!(self, Commands::Run { .. } | Commands::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::parse_from(["mst-lookup", "run", "ds.xlsx"]);
        match cli.command {
            Commands::Run { input, output, stop_on_error, delay_ms, timeout, json } => {
                assert_eq!(input, PathBuf::from("ds.xlsx"));
                assert_eq!(output, PathBuf::from(DEFAULT_RESULTS_FILE));
                assert!(!stop_on_error);
                assert!(delay_ms.is_none());
                assert!(timeout.is_none());
                assert!(json.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::parse_from([
            "mst-lookup", "-v", "run", "ds.xlsx", "--stop-on-error", "--delay-ms", "500", "-o", "out.xlsx",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Run { output, stop_on_error, delay_ms, .. } => {
                assert_eq!(output, PathBuf::from("out.xlsx"));
                assert!(stop_on_error);
                assert_eq!(delay_ms, Some(500));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_template_default_output() {
        let cli = Cli::parse_from(["mst-lookup", "template"]);
        match cli.command {
            Commands::Template { output } => assert_eq!(output, PathBuf::from(DEFAULT_TEMPLATE_FILE)),
            _ => panic!("expected template"),
        }
    }

    #[test]
    fn test_only_run_and_config_read_config() {
        let needs = |args: &[&str]| Cli::parse_from(args.iter().copied()).command.needs_config();
        assert!(needs(&["mst-lookup", "run", "ds.xlsx"]));
        assert!(needs(&["mst-lookup", "config", "--show"]));
        assert!(!needs(&["mst-lookup", "template"]));
        assert!(!needs(&["mst-lookup", "export", "ket_qua.json"]));
    }
}
