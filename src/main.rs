use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mst_lookup::{cli, client, config, driver, export, logging, reader};
use mst_lookup_common::{messages, ResultRow, RunSnapshot};
use cli::{Cli, Commands};
use client::VietQrClient;
use config::Config;
use driver::{BatchDriver, DriverOptions, RunOutcome};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    // template / export は設定を使わない（壊れた設定ファイルで止めない）
    let config = if cli.command.needs_config() {
        load_config()?
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Run { input, output, stop_on_error, delay_ms, timeout, json } => {
            println!("🚀 mst-lookup - Tra cứu MST hàng loạt\n");

            // 1. 入力読み込み
            println!("{}", messages::READING);
            let records = reader::read_records(&input)?;

            // 2. 逐次照会
            let options = DriverOptions {
                delay: delay_ms.map(Duration::from_millis).unwrap_or_else(|| config.delay()),
                request_timeout: timeout.map(Duration::from_secs).unwrap_or_else(|| config.timeout()),
            };
            let endpoint = config.endpoint();
            let client = VietQrClient::new(&endpoint, options.request_timeout)?;
            let driver = BatchDriver::new(client, options);

            if cli.verbose {
                println!("  API: {}", endpoint);
                println!("  Giãn cách: {} ms, dừng khi lỗi: {}", options.delay.as_millis(), stop_on_error);
            }

            let bar = ProgressBar::new(records.len() as u64);
            bar.set_style(
                ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            let mut printed = 0usize;
            let on_snapshot = |snapshot: &RunSnapshot| {
                for row in &snapshot.results[printed..] {
                    bar.println(format_row(row));
                }
                printed = snapshot.results.len();
                bar.set_position(printed as u64);
                bar.set_message(snapshot.status.message.clone());
            };

            let outcome = tokio::select! {
                outcome = driver.run(&records, stop_on_error, on_snapshot) => outcome,
                _ = tokio::signal::ctrl_c() => {
                    driver.reset();
                    bar.abandon_with_message("⏹ Đã hủy, kết quả không được lưu.");
                    return Ok(());
                }
            };

            let report = match outcome {
                Ok(RunOutcome::Finished(report)) => report,
                Ok(RunOutcome::AlreadyRunning) | Ok(RunOutcome::Discarded) => {
                    bar.abandon();
                    return Ok(());
                }
                Err(e) => {
                    bar.finish_and_clear();
                    return Err(e.into());
                }
            };
            bar.finish_and_clear();

            println!("{}", report.status.message);
            println!(
                "  Thành công: {} | Lỗi: {} | Tổng: {}\n",
                report.status.success_count, report.status.error_count, report.status.total
            );

            // 3. 保存
            if let Some(json_path) = json {
                export::save_results_json(&report.results, &json_path)
                    .with_context(|| format!("Không lưu được JSON: {}", json_path.display()))?;
                println!("✔ JSON: {}", json_path.display());
            }

            write_results(&report.results, &output);
        }

        Commands::Export { input, output } => {
            println!("📄 mst-lookup - Xuất Excel\n");
            let results = export::load_results_json(&input)?;
            write_results(&results, &output);
        }

        Commands::Template { output } => {
            let outcome = export::export_template(&output)?;
            println!("{}", outcome.message());
        }

        Commands::Config { set_endpoint, set_delay_ms, set_timeout, show } => {
            let mut config = config;
            let changed = set_endpoint.is_some() || set_delay_ms.is_some() || set_timeout.is_some();

            if let Some(url) = set_endpoint {
                config.set_endpoint(url)?;
            }
            if let Some(ms) = set_delay_ms {
                config.delay_ms = ms;
            }
            if let Some(seconds) = set_timeout {
                config.set_timeout_seconds(seconds)?;
            }
            if changed {
                config.save()?;
                println!("✔ Đã lưu cấu hình: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Cấu hình:");
                println!("  API: {}", config.endpoint());
                println!("  Giãn cách: {} ms", config.delay_ms);
                println!("  Thời gian chờ: {} giây", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

fn load_config() -> anyhow::Result<Config> {
    Config::load().context("Không đọc được file cấu hình")
}

/// エクスポート失敗は表示のみ（結果は保持したまま）
fn write_results(results: &[ResultRow], output: &std::path::Path) {
    if !results.is_empty() {
        println!("{}", messages::EXPORTING);
    }
    match export::export_results(results, output) {
        Ok(outcome) => println!("{}", outcome.message()),
        Err(e) => println!("{}", messages::failure(&e)),
    }
}

fn format_row(row: &ResultRow) -> String {
    match &row.address {
        Some(address) => format!("  {} | {} | {} | {}", row.tax_code, row.company_name, address, row.status),
        None => format!("  {} | {} | {}", row.tax_code, row.company_name, row.status),
    }
}
