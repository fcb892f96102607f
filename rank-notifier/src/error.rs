use reqwest::header::InvalidHeaderValue;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid URL {0:?}: {1}")]
    InvalidUrl(String, String),
    #[error("Invalid api-key header value")]
    InvalidHeader(#[source] InvalidHeaderValue),
    #[error(transparent)]
    ReqwestError(reqwest::Error),
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> NotifyError {
        NotifyError::ReqwestError(err)
    }
}

impl From<InvalidHeaderValue> for NotifyError {
    fn from(err: InvalidHeaderValue) -> NotifyError {
        NotifyError::InvalidHeader(err)
    }
}

impl NotifyError {
    /// Display of the error followed by its whole source chain.
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
