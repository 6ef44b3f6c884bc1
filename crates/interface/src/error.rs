use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExchangeError {
    /// 네트워크 오류 또는 2xx 가 아닌 HTTP 응답
    #[error("transport error: {0}")]
    Transport(String),

    /// 응답 JSON 이 기대한 형태가 아님
    #[error("decode error: {0}")]
    Decode(String),

    /// 거래소 응답 envelope 에 담긴 에러. code/message 는 거래소 값 그대로.
    #[error("{code}:{message}")]
    Exchange { code: String, message: String },

    /// 이 거래소가 제공하지 않는 기능. 네트워크 호출 없이 반환된다.
    #[error("{0} is not supported")]
    Unsupported(&'static str),

    #[error("{0}")]
    Other(String),
}

impl ExchangeError {
    pub fn exchange(code: impl ToString, message: impl Into<String>) -> Self {
        Self::Exchange {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
