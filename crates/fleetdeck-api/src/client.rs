// Hand-crafted async HTTP client for the Fleetdeck backend REST API.
//
// Base path: /api/
// Auth: Bearer token, hot-swapped after login so in-flight clones keep
// working without a rebuild.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types;

// ── Error response shapes from the backend ───────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Fleetdeck backend.
///
/// Cheap to clone; the bearer token is shared across clones and applied
/// per request.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Arc<ArcSwapOption<SecretString>>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (used by tests).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            token: Arc::new(ArcSwapOption::empty()),
        })
    }

    /// Build the base URL ending in `/api/` so relative joins work.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }
        Ok(url)
    }

    // ── Auth token ───────────────────────────────────────────────────

    /// Install the bearer token used for all subsequent requests.
    pub fn set_token(&self, token: SecretString) {
        self.token.store(Some(Arc::new(token)));
    }

    /// Drop the bearer token (logout).
    pub fn clear_token(&self) {
        self.token.store(None);
    }

    /// Whether a bearer token is currently installed.
    pub fn has_token(&self) -> bool {
        self.token.load().is_some()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"vehicles"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.token.load_full() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        builder
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.request(Method::GET, url).send().await?;
        self.handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.request(Method::GET, url).query(params).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.request(Method::POST, url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.request(Method::PUT, url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn patch_empty(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self.request(Method::PATCH, url).send().await?;
        self.handle_empty(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.request(Method::DELETE, url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                // Char-based so truncation never lands mid UTF-8 sequence.
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// Extract a best-effort human-readable message from a failure body:
    /// structured `{message}` or `{error}` JSON first, then plain text.
    /// The status table lives in `fleetdeck-core` -- an empty message
    /// here means "nothing useful in the body".
    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Unauthorized;
        }

        let raw = resp.text().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            Error::Api {
                status: status.as_u16(),
                message: err.message.or(err.error).unwrap_or_default(),
                code: err.code,
            }
        } else {
            Error::Api {
                status: status.as_u16(),
                message: raw,
                code: None,
            }
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Vehicles ─────────────────────────────────────────────────────

    pub async fn list_vehicles(&self) -> Result<Vec<types::VehicleDto>, Error> {
        self.get("vehicles").await
    }

    pub async fn get_vehicle(&self, id: &str) -> Result<types::VehicleDto, Error> {
        self.get(&format!("vehicles/{id}")).await
    }

    pub async fn create_vehicle(
        &self,
        body: &types::CreateVehicleDto,
    ) -> Result<types::VehicleDto, Error> {
        self.post("vehicles", body).await
    }

    pub async fn update_vehicle(
        &self,
        id: &str,
        body: &types::UpdateVehicleDto,
    ) -> Result<types::VehicleDto, Error> {
        self.put(&format!("vehicles/{id}"), body).await
    }

    pub async fn delete_vehicle(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("vehicles/{id}")).await
    }

    // ── Drivers ──────────────────────────────────────────────────────

    pub async fn list_drivers(&self) -> Result<Vec<types::DriverDto>, Error> {
        self.get("drivers").await
    }

    pub async fn get_driver(&self, id: &str) -> Result<types::DriverDto, Error> {
        self.get(&format!("drivers/{id}")).await
    }

    pub async fn create_driver(
        &self,
        body: &types::CreateDriverDto,
    ) -> Result<types::DriverDto, Error> {
        self.post("drivers", body).await
    }

    pub async fn update_driver(
        &self,
        id: &str,
        body: &types::UpdateDriverDto,
    ) -> Result<types::DriverDto, Error> {
        self.put(&format!("drivers/{id}"), body).await
    }

    pub async fn delete_driver(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("drivers/{id}")).await
    }

    pub async fn list_assignments_for_driver(
        &self,
        driver_id: &str,
    ) -> Result<Vec<types::AssignmentDto>, Error> {
        self.get(&format!("assignments/driver/{driver_id}")).await
    }

    // ── Assignments ──────────────────────────────────────────────────

    pub async fn list_assignments(&self) -> Result<Vec<types::AssignmentDto>, Error> {
        self.get("assignments").await
    }

    pub async fn create_assignment(
        &self,
        body: &types::CreateAssignmentDto,
    ) -> Result<types::AssignmentDto, Error> {
        self.post("assignments", body).await
    }

    pub async fn update_assignment(
        &self,
        id: &str,
        body: &types::UpdateAssignmentDto,
    ) -> Result<types::AssignmentDto, Error> {
        self.put(&format!("assignments/{id}"), body).await
    }

    // ── Maintenance ──────────────────────────────────────────────────

    pub async fn list_alerts(&self) -> Result<Vec<types::AlertDto>, Error> {
        self.get("maintenance/alerts").await
    }

    pub async fn create_alert(&self, body: &types::CreateAlertDto) -> Result<types::AlertDto, Error> {
        self.post("maintenance/alerts", body).await
    }

    pub async fn resolve_alert(&self, id: &str) -> Result<(), Error> {
        self.patch_empty(&format!("maintenance/alerts/{id}/resolve"))
            .await
    }

    pub async fn create_maintenance_record(
        &self,
        body: &types::CreateMaintenanceRecordDto,
    ) -> Result<types::MaintenanceRecordDto, Error> {
        self.post("maintenance/records", body).await
    }

    pub async fn list_maintenance_records(
        &self,
        vehicle_id: &str,
    ) -> Result<Vec<types::MaintenanceRecordDto>, Error> {
        self.get(&format!("maintenance/records/vehicle/{vehicle_id}"))
            .await
    }

    // ── Financial ────────────────────────────────────────────────────

    pub async fn financial_summary(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<types::MonthlySummaryDto>, Error> {
        let params = date_range_params(start_date, end_date);
        if params.is_empty() {
            self.get("financial/summary").await
        } else {
            self.get_with_params("financial/summary", &params).await
        }
    }

    pub async fn vehicle_profitability(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<types::VehicleProfitabilityDto>, Error> {
        let params = date_range_params(start_date, end_date);
        if params.is_empty() {
            self.get("financial/vehicle-profitability").await
        } else {
            self.get_with_params("financial/vehicle-profitability", &params)
                .await
        }
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// Login. Does NOT install the token -- the caller decides whether
    /// to adopt the new session (see `fleetdeck_core::AuthService`).
    pub async fn login(&self, body: &types::LoginRequest) -> Result<types::LoginResponse, Error> {
        match self.post("auth/login", body).await {
            Err(Error::Unauthorized) => Err(Error::Authentication {
                message: "invalid email or password".into(),
            }),
            other => other,
        }
    }

    pub async fn register(&self, body: &types::RegisterRequest) -> Result<types::UserDto, Error> {
        self.post("auth/register", body).await
    }

    pub async fn me(&self) -> Result<types::UserDto, Error> {
        self.get("auth/me").await
    }

    // ── Settings & users ─────────────────────────────────────────────

    pub async fn get_settings(&self) -> Result<types::AppSettingsDto, Error> {
        self.get("settings").await
    }

    /// Settings are replaced wholesale -- a full-object PUT, never a patch.
    pub async fn update_settings(
        &self,
        body: &types::UpdateAppSettingsDto,
    ) -> Result<types::AppSettingsDto, Error> {
        self.put("settings", body).await
    }

    pub async fn list_users(&self) -> Result<Vec<types::UserDto>, Error> {
        self.get("users").await
    }

    pub async fn create_user(&self, body: &types::CreateUserDto) -> Result<types::UserDto, Error> {
        self.post("users", body).await
    }

    pub async fn update_user(
        &self,
        id: &str,
        body: &types::UpdateUserDto,
    ) -> Result<types::UserDto, Error> {
        self.put(&format!("users/{id}"), body).await
    }

    // ── Logistics ────────────────────────────────────────────────────

    pub async fn list_customers(&self) -> Result<Vec<types::CustomerDto>, Error> {
        self.get("logistics/customers").await
    }

    pub async fn get_customer(&self, id: &str) -> Result<types::CustomerDto, Error> {
        self.get(&format!("logistics/customers/{id}")).await
    }

    pub async fn create_customer(
        &self,
        body: &types::CreateCustomerDto,
    ) -> Result<types::CustomerDto, Error> {
        self.post("logistics/customers", body).await
    }

    pub async fn list_jobs(&self) -> Result<Vec<types::TransportJobDto>, Error> {
        self.get("logistics/jobs").await
    }

    pub async fn create_job(
        &self,
        body: &types::CreateTransportJobDto,
    ) -> Result<types::TransportJobDto, Error> {
        self.post("logistics/jobs", body).await
    }

    pub async fn get_route_for_job(&self, job_id: &str) -> Result<Option<types::RouteDto>, Error> {
        self.get(&format!("logistics/routes/job/{job_id}")).await
    }

    pub async fn create_route(&self, body: &types::CreateRouteDto) -> Result<types::RouteDto, Error> {
        self.post("logistics/routes", body).await
    }

    pub async fn list_shipments_for_job(
        &self,
        job_id: &str,
    ) -> Result<Vec<types::ShipmentDto>, Error> {
        self.get(&format!("logistics/shipments/job/{job_id}")).await
    }

    pub async fn create_shipment(
        &self,
        body: &types::CreateShipmentDto,
    ) -> Result<types::ShipmentDto, Error> {
        self.post("logistics/shipments", body).await
    }
}

fn date_range_params(
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(start) = start_date {
        params.push(("start_date", start.to_owned()));
    }
    if let Some(end) = end_date {
        params.push(("end_date", end.to_owned()));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_api_suffix() {
        let client = ApiClient::from_reqwest("http://localhost:3000", reqwest::Client::new())
            .expect("valid url");
        assert_eq!(client.base_url.as_str(), "http://localhost:3000/api/");
    }

    #[test]
    fn base_url_keeps_existing_api_suffix() {
        let client = ApiClient::from_reqwest("http://localhost:3000/api", reqwest::Client::new())
            .expect("valid url");
        assert_eq!(client.base_url.as_str(), "http://localhost:3000/api/");
    }

    #[test]
    fn token_roundtrip() {
        let client = ApiClient::from_reqwest("http://localhost:3000", reqwest::Client::new())
            .expect("valid url");
        assert!(!client.has_token());
        client.set_token(SecretString::from("abc123"));
        assert!(client.has_token());
        client.clear_token();
        assert!(!client.has_token());
    }
}
