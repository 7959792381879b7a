//! 事業者照会APIクライアント
//!
//! `GET {endpoint}/{tax_code}`。認証・クエリ・独自ヘッダなし。

use crate::error::{LookupError, Result};
use mst_lookup_common::{parse_lookup_response, LookupResponse};
use std::time::Duration;
use tracing::debug;

/// 税コード1件を照会する
///
/// ドライバとネットワークの境界。テストではモックに差し替える。
#[allow(async_fn_in_trait)]
pub trait BusinessLookup {
    /// 通信失敗・非2xx・不正な本文は `LookupError::Network`
    async fn lookup(&self, tax_code: &str) -> Result<LookupResponse>;
}

pub struct VietQrClient {
    http: reqwest::Client,
    endpoint: String,
}

impl VietQrClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Config(format!("Không tạo được HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, tax_code: &str) -> String {
        format!("{}/{}", self.endpoint, tax_code)
    }
}

impl BusinessLookup for VietQrClient {
    async fn lookup(&self, tax_code: &str) -> Result<LookupResponse> {
        let url = self.url_for(tax_code);
        debug!(%url, "lookup request");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Network(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        parse_lookup_response(&body).map_err(|e| LookupError::Network(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let client = VietQrClient::new("https://api.vietqr.io/v2/business/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.url_for("0300588569"), "https://api.vietqr.io/v2/business/0300588569");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // ポート1は通常リッスンされていない
        let client = VietQrClient::new("http://127.0.0.1:1/v2/business", Duration::from_secs(2)).unwrap();
        let result = client.lookup("0300588569").await;
        assert!(matches!(result, Err(LookupError::Network(_))));
    }
}
