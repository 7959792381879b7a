//! 一括照会ドライバ
//!
//! 入力レコードを順番に1件ずつ照会し、1行ごとにスナップショットを公開する。
//!
//! - 同時に実行できるのは1回のみ（実行中の再呼び出しは何もしない）
//! - 状態は `RunPhase` の状態機械で、遷移はドライバだけが行う
//! - `reset()` で世代番号が進み、古い実行の結果は以後コミットされない
//! - 各リクエストにタイムアウト、リクエスト間に固定の待機を入れる

use crate::client::BusinessLookup;
use crate::error::{LookupError, Result};
use crate::reader::validate_records;
use mst_lookup_common::{messages, InputRecord, ResultRow, RunPhase, RunSnapshot, RunStatus};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy)]
pub struct DriverOptions {
    /// リクエスト間の待機（最後の行の後は待たない）
    pub delay: Duration,
    pub request_timeout: Duration,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(2000),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// 実行の最終結果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub phase: RunPhase,
    pub status: RunStatus,
    pub results: Vec<ResultRow>,
}

impl RunReport {
    pub fn halted(&self) -> bool {
        self.phase == RunPhase::Halted
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Finished(RunReport),
    /// 別の実行が進行中だった
    AlreadyRunning,
    /// 実行中に reset された
    Discarded,
}

struct DriverState {
    phase: RunPhase,
    generation: u64,
    snapshot: RunSnapshot,
}

/// 実行中の future が途中で破棄された場合に Running を解除する
struct RunGuard<'a> {
    state: &'a Mutex<DriverState>,
    generation: u64,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation == self.generation && state.phase == RunPhase::Running {
            debug!(generation = self.generation, "run dropped before completion");
            state.phase = RunPhase::Idle;
            state.snapshot.phase = RunPhase::Idle;
        }
    }
}

pub struct BatchDriver<L> {
    lookup: L,
    options: DriverOptions,
    state: Mutex<DriverState>,
}

impl<L: BusinessLookup> BatchDriver<L> {
    pub fn new(lookup: L, options: DriverOptions) -> Self {
        Self {
            lookup,
            options,
            state: Mutex::new(DriverState {
                phase: RunPhase::Idle,
                generation: 0,
                snapshot: RunSnapshot::default(),
            }),
        }
    }

    pub fn lookup_client(&self) -> &L {
        &self.lookup
    }

    pub fn phase(&self) -> RunPhase {
        self.state().phase
    }

    /// 最後にコミットされた状態
    pub fn snapshot(&self) -> RunSnapshot {
        self.state().snapshot.clone()
    }

    /// 初期状態に戻す。進行中の実行は次のコミット時点で破棄される。
    pub fn reset(&self) {
        let mut state = self.state();
        state.generation += 1;
        state.phase = RunPhase::Idle;
        state.snapshot = RunSnapshot::default();
        debug!(generation = state.generation, "driver reset");
    }

    /// 全レコードを照会する
    ///
    /// `on_snapshot` はコミットのたびに同期的に呼ばれる
    /// （各照会の直前、各行の追記後、終了時）。
    pub async fn run<F>(
        &self,
        records: &[InputRecord],
        stop_on_error: bool,
        mut on_snapshot: F,
    ) -> Result<RunOutcome>
    where
        F: FnMut(&RunSnapshot),
    {
        let generation = match self.begin(records) {
            Ok(Some(generation)) => generation,
            Ok(None) => {
                warn!("run already in progress, ignoring");
                return Ok(RunOutcome::AlreadyRunning);
            }
            Err(e) => {
                on_snapshot(&self.snapshot());
                return Err(e);
            }
        };
        let _guard = RunGuard {
            state: &self.state,
            generation,
        };

        let total = records.len();
        info!(total, stop_on_error, generation, "run started");

        let mut snapshot = RunSnapshot::started(total);
        if !self.commit(generation, &snapshot, &mut on_snapshot) {
            return Ok(RunOutcome::Discarded);
        }

        let mut halt_message = None;

        for (index, record) in records.iter().enumerate() {
            let tax_code = record.tax_code();

            snapshot.status.message = messages::looking_up(index, total, &tax_code);
            if !self.commit(generation, &snapshot, &mut on_snapshot) {
                return Ok(RunOutcome::Discarded);
            }

            let failed = if tax_code.is_empty() {
                snapshot.record(ResultRow::skipped());
                true
            } else {
                let row = self.lookup_row(&tax_code).await;
                let failed = row.outcome.is_error();
                snapshot.record(row);
                failed
            };

            if !self.commit(generation, &snapshot, &mut on_snapshot) {
                return Ok(RunOutcome::Discarded);
            }

            if failed && stop_on_error {
                halt_message = Some(if tax_code.is_empty() {
                    // ヘッダ行の分 +1
                    messages::halted_missing_tax_code(index + 2)
                } else {
                    messages::halted_on_error(&tax_code)
                });
                break;
            }

            // 空のMSTは照会していないので待たない
            if !tax_code.is_empty() && index + 1 < total {
                self.throttle().await;
            }
        }

        snapshot.phase = if halt_message.is_some() {
            RunPhase::Halted
        } else {
            RunPhase::Completed
        };
        snapshot.status.message = halt_message.unwrap_or_else(|| {
            messages::completed(snapshot.status.success_count, snapshot.status.error_count)
        });

        if !self.commit(generation, &snapshot, &mut on_snapshot) {
            return Ok(RunOutcome::Discarded);
        }

        info!(
            phase = ?snapshot.phase,
            success = snapshot.status.success_count,
            error = snapshot.status.error_count,
            "run finished"
        );

        Ok(RunOutcome::Finished(RunReport {
            phase: snapshot.phase,
            status: snapshot.status,
            results: snapshot.results,
        }))
    }

    fn state(&self) -> MutexGuard<'_, DriverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Running へ遷移して世代番号を返す。実行中なら None。
    fn begin(&self, records: &[InputRecord]) -> Result<Option<u64>> {
        let mut state = self.state();
        if state.phase == RunPhase::Running {
            return Ok(None);
        }

        state.generation += 1;

        if let Err(e) = validate_records(records) {
            state.phase = RunPhase::Idle;
            state.snapshot = RunSnapshot {
                phase: RunPhase::Idle,
                status: RunStatus {
                    message: messages::failure(&e),
                    ..RunStatus::default()
                },
                results: Vec::new(),
            };
            return Err(e);
        }

        state.phase = RunPhase::Running;
        state.snapshot = RunSnapshot::started(records.len());
        Ok(Some(state.generation))
    }

    /// 世代が一致する場合のみ状態を更新して通知する
    fn commit<F>(&self, generation: u64, snapshot: &RunSnapshot, on_snapshot: &mut F) -> bool
    where
        F: FnMut(&RunSnapshot),
    {
        {
            let mut state = self.state();
            if state.generation != generation {
                debug!(generation, current = state.generation, "stale run, discarding");
                return false;
            }
            state.phase = snapshot.phase;
            state.snapshot = snapshot.clone();
        }
        on_snapshot(snapshot);
        true
    }

    async fn lookup_row(&self, tax_code: &str) -> ResultRow {
        let timeout = self.options.request_timeout;

        match tokio::time::timeout(timeout, self.lookup.lookup(tax_code)).await {
            Ok(Ok(response)) => {
                let row = ResultRow::from_response(tax_code, &response);
                if row.outcome.is_error() {
                    warn!(tax_code, status = %row.status, "lookup rejected");
                } else {
                    debug!(tax_code, name = %row.company_name, "lookup ok");
                }
                row
            }
            Ok(Err(e)) => {
                warn!(tax_code, error = %e, "lookup failed");
                let cause = match e {
                    LookupError::Network(cause) => cause,
                    other => other.to_string(),
                };
                ResultRow::network_failure(tax_code, &cause)
            }
            Err(_) => {
                warn!(tax_code, ?timeout, "lookup timed out");
                ResultRow::network_failure(
                    tax_code,
                    &format!("hết thời gian chờ ({} ms)", timeout.as_millis()),
                )
            }
        }
    }

    async fn throttle(&self) {
        if !self.options.delay.is_zero() {
            tokio::time::sleep(self.options.delay).await;
        }
    }
}
