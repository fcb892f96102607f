use reqwest::StatusCode;

use super::http::HttpClient;
use crate::error::NotifyError;
use crate::option::NotifierOpt;

pub const UPDATE_RANK_PATH: &str = "/api/accounts/update-rank";

pub struct BackendClient {
    client: HttpClient,
}

impl BackendClient {
    pub fn new(opt: &NotifierOpt) -> Result<Self, NotifyError> {
        Ok(Self {
            client: HttpClient::new(
                opt.base_url.clone(),
                opt.api_key.as_deref(),
                opt.request_timeout,
            )?,
        })
    }

    pub async fn update_rank(&self) -> Result<StatusCode, NotifyError> {
        update_rank(&self.client).await
    }
}

// Any status counts as delivered, the body is never read.
async fn update_rank(client: &HttpClient) -> Result<StatusCode, NotifyError> {
    let response = client.post(UPDATE_RANK_PATH)?.send().await?;
    log::debug!("Update rank response: {:?}", response);
    Ok(response.status())
}
