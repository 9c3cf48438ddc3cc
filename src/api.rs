//! HTTP client for the marketplace backend.
//!
//! Every call carries the session token as a bearer credential. Response
//! bodies go through [`Envelope`] so both `{ "data": ... }` and bare payloads
//! decode to the same types.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use sellerdesk_access::StoreUserSource;
use sellerdesk_shared::store::StoreUser;
use sellerdesk_shared::subscription::{PlanState, RenewalReceipt, RenewalRequest};
use sellerdesk_shared::wallet::WalletBalance;
use sellerdesk_shared::{ApiError, Envelope};
use sellerdesk_subscription::SubscriptionApi;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::{ApiConfig, EndpointConfig};
use crate::error::AppError;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    endpoints: EndpointConfig,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let mut base = config.base_url.trim().to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| AppError::ConfigError(format!("invalid api.base_url: {e}")))?;

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("sellerdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::ConfigError(format!("http client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            endpoints: config.endpoints.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> sellerdesk_shared::Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Transport(format!("bad endpoint {path}: {e}")))
    }

    async fn get<T: DeserializeOwned>(&self, token: &str, path: &str) -> sellerdesk_shared::Result<T> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        let body = checked(response).await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        Ok(envelope.into_inner())
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// Returns the body of a 2xx response; anything else becomes an
/// [`ApiError`] carrying the backend's `message` when it sent one.
async fn checked(response: Response) -> sellerdesk_shared::Result<Vec<u8>> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport)?;

    if status.is_success() {
        return Ok(body.to_vec());
    }

    if status == StatusCode::UNAUTHORIZED {
        warn!("Backend rejected the session token");
        return Err(ApiError::Unauthorized);
    }

    let message = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());

    warn!(status = status.as_u16(), message = ?message, "Request failed");
    Err(ApiError::Http {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl StoreUserSource for ApiClient {
    #[instrument(skip_all)]
    async fn store_users(&self, token: &str) -> sellerdesk_shared::Result<Vec<StoreUser>> {
        self.get(token, &self.endpoints.store_users).await
    }
}

#[async_trait]
impl SubscriptionApi for ApiClient {
    #[instrument(skip_all)]
    async fn plan(&self, token: &str) -> sellerdesk_shared::Result<PlanState> {
        self.get(token, &self.endpoints.plan).await
    }

    #[instrument(skip_all)]
    async fn balance(&self, token: &str) -> sellerdesk_shared::Result<WalletBalance> {
        self.get(token, &self.endpoints.balance).await
    }

    #[instrument(skip_all, fields(plan_id = %request.plan_id, method = %request.payment_method))]
    async fn renew(
        &self,
        token: &str,
        request: &RenewalRequest,
    ) -> sellerdesk_shared::Result<RenewalReceipt> {
        let url = self.endpoint(&self.endpoints.renew)?;
        debug!(%url, "POST");

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let body = checked(response).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(RenewalReceipt::default());
        }
        Ok(serde_json::from_slice(&body)?)
    }
}
