//! HTTP client for the external planner service.
//!
//! The service classifies interactions and builds dosing plans with richer
//! data than the local table. `PlannerBackend` is the seam the session talks
//! to; `ApiClient` is the reqwest implementation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ClientConfig;
use crate::models::{
    Finding, InteractionsResponse, LabelSection, Medication, NormalizedName, Patient, Plan,
};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Planner service is not reachable at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("API error {status}: {body}")]
    Service { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

/// Operations offered by the planner service.
pub trait PlannerBackend {
    fn check_interactions(
        &self,
        meds: &[Medication],
        patient: &Patient,
    ) -> Result<Vec<Finding>, ClientError>;

    fn build_plan(&self, meds: &[Medication], patient: &Patient) -> Result<Plan, ClientError>;

    fn normalize(&self, names: &[String]) -> Result<Vec<NormalizedName>, ClientError>;

    fn label_sections(&self, names: &[String]) -> Result<Vec<LabelSection>, ClientError>;

    fn health(&self) -> Result<bool, ClientError>;
}

/// Blocking reqwest client bound to one service base URL.
pub struct ApiClient {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct HealthResponse {
    ok: bool,
}

#[derive(Serialize)]
struct RegimenBody<'a> {
    meds: &'a [Medication],
    patient: &'a Patient,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Http(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "POST planner service");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| self.map_transport(e))?;

        Self::parse(response)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "GET planner service");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.map_transport(e))?;

        Self::parse(response)
    }

    fn map_transport(&self, e: reqwest::Error) -> ClientError {
        if e.is_connect() {
            ClientError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ClientError::Timeout(self.timeout_secs)
        } else {
            ClientError::Http(e.to_string())
        }
    }

    fn parse<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Planner service returned an error");
            return Err(ClientError::Service {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .map_err(|e| ClientError::ResponseParsing(e.to_string()))
    }
}

impl PlannerBackend for ApiClient {
    fn check_interactions(
        &self,
        meds: &[Medication],
        patient: &Patient,
    ) -> Result<Vec<Finding>, ClientError> {
        let parsed: InteractionsResponse =
            self.post("/api/interactions", &RegimenBody { meds, patient })?;
        tracing::info!(
            medications = meds.len(),
            findings = parsed.findings.len(),
            "Fetched interaction findings"
        );
        Ok(parsed.findings)
    }

    fn build_plan(&self, meds: &[Medication], patient: &Patient) -> Result<Plan, ClientError> {
        let plan: Plan = self.post("/api/plan", &RegimenBody { meds, patient })?;
        tracing::info!(items = plan.items.len(), "Fetched dosing plan");
        Ok(plan)
    }

    fn normalize(&self, names: &[String]) -> Result<Vec<NormalizedName>, ClientError> {
        self.post("/api/normalize", names)
    }

    fn label_sections(&self, names: &[String]) -> Result<Vec<LabelSection>, ClientError> {
        self.post("/api/label_sections", names)
    }

    fn health(&self) -> Result<bool, ClientError> {
        let parsed: HealthResponse = self.get("/healthz")?;
        Ok(parsed.ok)
    }
}


#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::extract::Json;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::Router;

    use super::*;
    use crate::models::{Frequency, Severity};

    /// Serve `router` on an ephemeral port from a background runtime.
    fn spawn_stub(router: Router) -> SocketAddr {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, router).await.unwrap();
            });
        });

        addr
    }

    fn client_for(addr: SocketAddr) -> ApiClient {
        ApiClient::new(&ClientConfig::new(&format!("http://{addr}/"), 5)).unwrap()
    }

    async fn echo_interactions(Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
        let meds = body["meds"].as_array().cloned().unwrap_or_default();
        let names: Vec<String> = meds
            .iter()
            .filter_map(|m| m["name"].as_str().map(String::from))
            .collect();
        let findings = crate::interactions::scan_names(names.iter().map(String::as_str));
        Json(serde_json::json!({ "findings": findings }))
    }

    #[test]
    fn constructor_trims_trailing_slash() {
        let client = ApiClient::new(&ClientConfig::new("http://localhost:8000///", 3)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.timeout_secs, 3);
    }

    #[test]
    fn interactions_round_trip_through_service() {
        let addr = spawn_stub(Router::new().route("/api/interactions", post(echo_interactions)));
        let client = client_for(addr);

        let meds = [
            Medication::named("Warfarin", "5", Frequency::Qd),
            Medication::named("Ibuprofen", "200", Frequency::Tid),
        ];
        let findings = client
            .check_interactions(&meds, &Patient::default())
            .unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Caution);
        assert_eq!(findings[0].a, "Warfarin");
    }

    #[test]
    fn plan_parses_service_payload() {
        let router = Router::new().route(
            "/api/plan",
            post(|| async {
                Json(serde_json::json!({
                    "items": [{
                        "med_id": "abc",
                        "med_name": "Metformin",
                        "slots": [{"time": "08:00", "with_food": true, "notes": []}]
                    }],
                    "caveats": ["Educational tool only"]
                }))
            }),
        );
        let client = client_for(spawn_stub(router));

        let plan = client
            .build_plan(
                &[Medication::named("Metformin", "500", Frequency::Qd)],
                &Patient::default(),
            )
            .unwrap();
        assert_eq!(plan.items[0].med_name, "Metformin");
        assert_eq!(plan.caveats, ["Educational tool only"]);
    }

    #[test]
    fn non_success_status_surfaces_body() {
        let router = Router::new().route(
            "/api/plan",
            post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "bad frequency") }),
        );
        let client = client_for(spawn_stub(router));

        let err = client.build_plan(&[], &Patient::default()).unwrap_err();
        match &err {
            ClientError::Service { status, body } => {
                assert_eq!(*status, 422);
                assert_eq!(body, "bad frequency");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "API error 422: bad frequency");
    }

    #[test]
    fn malformed_body_is_parse_error() {
        let router = Router::new().route("/api/interactions", post(|| async { "not json" }));
        let client = client_for(spawn_stub(router));

        let err = client
            .check_interactions(&[], &Patient::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::ResponseParsing(_)));
    }

    #[test]
    fn normalize_and_label_sections_post_name_lists() {
        let router = Router::new()
            .route(
                "/api/normalize",
                post(|Json(names): Json<Vec<String>>| async move {
                    let out: Vec<serde_json::Value> = names
                        .iter()
                        .map(|n| serde_json::json!({"name": n, "rxcui": "5640"}))
                        .collect();
                    Json(out)
                }),
            )
            .route(
                "/api/label_sections",
                post(|Json(names): Json<Vec<String>>| async move {
                    Json(serde_json::json!([{
                        "name": names[0],
                        "setid": null,
                        "hints": {"with_food_hint": true}
                    }]))
                }),
            )
            .route("/healthz", get(|| async { Json(serde_json::json!({"ok": true})) }));
        let client = client_for(spawn_stub(router));

        let names = vec!["ibuprofen".to_string()];
        let normalized = client.normalize(&names).unwrap();
        assert_eq!(normalized[0].rxcui.as_deref(), Some("5640"));

        let sections = client.label_sections(&names).unwrap();
        assert_eq!(sections[0].name, "ibuprofen");
        assert!(sections[0].setid.is_none());
        assert!(sections[0].hints.with_food_hint);

        assert!(client.health().unwrap());
    }

    #[test]
    fn unreachable_service_is_connection_error() {
        // Bind then drop to get a port nothing listens on.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let client = client_for(addr);

        let err = client.health().unwrap_err();
        assert!(matches!(err, ClientError::Connection(_)), "{err:?}");
    }
}
