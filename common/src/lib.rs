//! MST Lookup Common Library
//!
//! CLIとテストで共有される型とユーティリティ（I/Oなし）

pub mod types;
pub mod layout;
pub mod error;
pub mod lookup;
pub mod messages;
pub mod export;

pub use types::{InputRecord, ResultRow, RowOutcome, RunPhase, RunSnapshot, RunStatus, MST_COLUMN};
pub use layout::{ResultColumn, RESULT_COLUMNS, column_widths};
pub use error::{Error, Result};
pub use lookup::{BusinessData, LookupResponse, parse_lookup_response};
