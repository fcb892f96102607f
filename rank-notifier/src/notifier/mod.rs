use std::fmt;

use reqwest::StatusCode;

use crate::agent::backend::BackendClient;
use crate::error::NotifyError;
use crate::option::NotifierOpt;

/// Result of one notification attempt. Both arms are terminal.
#[derive(Debug)]
pub enum Outcome {
    Sent(StatusCode),
    Failed(NotifyError),
}

impl Outcome {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Outcome::Sent(status) => Some(*status),
            Outcome::Failed(_) => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Sent(status) => write!(f, "Request sent, status: {}", status.as_u16()),
            Outcome::Failed(err) => write!(f, "Error sending request: {}", err.describe()),
        }
    }
}

/// Send exactly one update-rank request. Never retries and never fails:
/// every error is folded into `Outcome::Failed`.
pub async fn notify(opt: &NotifierOpt) -> Outcome {
    match dispatch(opt).await {
        Ok(status) => {
            log::debug!("Update rank request answered with {}", status);
            Outcome::Sent(status)
        }
        Err(e) => {
            log::error!("Update rank request failed: {}", e.describe());
            Outcome::Failed(e)
        }
    }
}

async fn dispatch(opt: &NotifierOpt) -> Result<StatusCode, NotifyError> {
    BackendClient::new(opt)?.update_rank().await
}

/// `notify` plus the console line on stdout.
pub async fn notify_and_report(opt: &NotifierOpt) -> Outcome {
    let outcome = notify(opt).await;
    println!("{}", outcome);
    outcome
}
