//! Reqwest implementation of the dossier backend API
//!
//! Plain JSON over HTTP with a per-request timeout and a monotonic
//! request counter for log correlation. No retry/backoff: failures
//! surface once and the caller decides whether to retry.

use async_trait::async_trait;
use caravela_core::{
    config::BackendConfig,
    models::{
        AccommodationSeason, InvoiceConfig, PaymentTerms, RoomRate, TarificationEntries,
    },
    traits::DossierBackend,
    AppError, AppResult,
};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// Client for the dossier backend REST API
pub struct DossierBackendClient {
    http_client: Client,
    base_url: String,
    api_token: Option<String>,
    timeout_ms: u64,
    request_id: AtomicU64,
}

impl DossierBackendClient {
    /// Create a client from backend configuration
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| AppError::Backend(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            timeout_ms: config.timeout_ms,
            request_id: AtomicU64::new(1),
        })
    }

    /// Next request id for log correlation
    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Full URL for a backend path
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http_client.request(method, self.url(path));
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request and decode a JSON response body
    #[instrument(skip(self, builder))]
    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> AppResult<T> {
        let request_id = self.next_id();
        debug!(request_id, "backend request");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                error!(request_id, "backend timeout on {}", path);
                AppError::BackendTimeout {
                    ms: self.timeout_ms,
                }
            } else {
                error!(request_id, "backend connection error: {}", e);
                AppError::Backend(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(request_id, %status, "backend rejected {}", path);
            return Err(AppError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            // Decode "null" so unit responses still parse
            return serde_json::from_str("null")
                .map_err(|e| AppError::Serialization(e.to_string()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Serialization(e.to_string()))
    }

    /// Send a request, ignoring any response body
    async fn send_unit(&self, builder: RequestBuilder, path: &str) -> AppResult<()> {
        let request_id = self.next_id();
        debug!(request_id, "backend request");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::BackendTimeout {
                    ms: self.timeout_ms,
                }
            } else {
                AppError::Backend(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(request_id, %status, "backend rejected {}", path);
            return Err(AppError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.send_json(self.request(Method::GET, path), path).await
    }

    async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.send_json(self.request(Method::PATCH, path).json(body), path)
            .await
    }

    async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<()> {
        self.send_unit(self.request(Method::PUT, path).json(body), path)
            .await
    }
}

#[async_trait]
impl DossierBackend for DossierBackendClient {
    async fn get_invoice_config(&self) -> AppResult<InvoiceConfig> {
        self.get("/tenants/current/invoice-config").await
    }

    async fn patch_invoice_config(&self, config: &InvoiceConfig) -> AppResult<InvoiceConfig> {
        self.patch("/tenants/current/invoice-config", config).await
    }

    async fn fetch_seasons(&self, accommodation_id: i64) -> AppResult<Vec<AccommodationSeason>> {
        self.get(&format!("/accommodations/{}/seasons", accommodation_id))
            .await
    }

    async fn fetch_room_rates(&self, accommodation_id: i64) -> AppResult<Vec<RoomRate>> {
        self.get(&format!("/accommodations/{}/room-rates", accommodation_id))
            .await
    }

    async fn save_tarification(
        &self,
        cotation_id: Uuid,
        entries: &TarificationEntries,
    ) -> AppResult<()> {
        self.put(&format!("/cotations/{}/tarification", cotation_id), entries)
            .await
    }

    async fn save_payment_terms(&self, cotation_id: Uuid, terms: &PaymentTerms) -> AppResult<()> {
        self.put(&format!("/cotations/{}/payment-terms", cotation_id), terms)
            .await
    }
}
