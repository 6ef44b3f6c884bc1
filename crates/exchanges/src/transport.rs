use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};

use interface::ExchangeError;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 서명된 요청을 실제로 보내는 계층.
///
/// 헤더(서명 포함)는 호출자가 만들어서 넘기고, 구현체는 응답 body 를 그대로 돌려준다.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: &str,
        headers: &[(&'static str, String)],
    ) -> Result<String, ExchangeError>;
}

/// reqwest 기반 구현체
#[derive(Clone)]
pub struct ReqwestTransport {
    pub(crate) http: Client,
}

impl ReqwestTransport {
    /// 연결 풀 10, 요청 타임아웃 30초
    pub fn new() -> Result<Self, ExchangeError> {
        let http = Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ExchangeError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http })
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: &str,
        headers: &[(&'static str, String)],
    ) -> Result<String, ExchangeError> {
        let mut request = self.http.request(method, url);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        if !body.is_empty() {
            request = request.body(body.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ExchangeError::Transport(format!("HTTP error: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| ExchangeError::Transport(format!("HTTP error: {}", e)))?;

        if !status.is_success() {
            return Err(ExchangeError::Transport(format!(
                "status {}, response: {}",
                status,
                response_text.chars().take(200).collect::<String>()
            )));
        }

        Ok(response_text)
    }
}
