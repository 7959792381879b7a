//! 事業者照会APIレスポンスの型とパース
//!
//! `{ code, desc?, data?: { id, name, address, status } }`
//! 成功判定は `code == "00"`（文字列）のみ

use crate::error::Result;
use crate::types::{ResultRow, RowOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const SUCCESS_CODE: &str = "00";

/// 照会APIレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupResponse {
    /// 型が不定なので Value で受ける
    #[serde(default)]
    pub code: Option<Value>,

    #[serde(default)]
    pub desc: Option<String>,

    #[serde(default)]
    pub data: Option<BusinessData>,
}

/// 事業者情報
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessData {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

impl LookupResponse {
    pub fn is_success(&self) -> bool {
        matches!(&self.code, Some(Value::String(code)) if code == SUCCESS_CODE)
    }

    /// 成功レスポンス（テスト・モック用）
    pub fn success(data: BusinessData) -> Self {
        Self {
            code: Some(Value::String(SUCCESS_CODE.to_string())),
            desc: None,
            data: Some(data),
        }
    }

    /// 失敗レスポンス（テスト・モック用）
    pub fn failure(code: &str, desc: Option<&str>) -> Self {
        Self {
            code: Some(Value::String(code.to_string())),
            desc: desc.map(str::to_string),
            data: None,
        }
    }
}

/// レスポンス本文をパース
pub fn parse_lookup_response(body: &str) -> Result<LookupResponse> {
    Ok(serde_json::from_str(body)?)
}

impl ResultRow {
    /// レスポンスを結果行に変換
    ///
    /// 成功コードで data がない場合は不正なレスポンスとして通信失敗扱い
    pub fn from_response(queried: &str, response: &LookupResponse) -> Self {
        if !response.is_success() {
            return Self::rejected(queried, response.desc.as_deref());
        }

        match &response.data {
            Some(data) => Self {
                tax_code: if data.id.is_empty() { queried.to_string() } else { data.id.clone() },
                company_name: data.name.clone(),
                address: data.address.clone(),
                status: data.status.clone().unwrap_or_default(),
                outcome: RowOutcome::Success,
            },
            None => Self::network_failure(queried, "phản hồi không có dữ liệu"),
        }
    }
}
