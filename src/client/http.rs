//! REST 报表后端
//!
//! `GET/POST <base>/api/casino-reports` and
//! `GET/PUT/DELETE <base>/api/casino-reports/{id}`. Failures are non-2xx
//! responses with a `{ "error": "..." }` body.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};
use ureq::Agent;
use ureq::http::Response;

use super::ReportStore;
use super::guard::SaveFlag;
use crate::errors::ReportError;
use crate::report::CasinoReport;

const REPORTS_PATH: &str = "/api/casino-reports";

const LOAD_FAILED: &str = "Failed to load reports";
const SAVE_FAILED: &str = "Failed to save report";
const DELETE_FAILED: &str = "Failed to delete report";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Extract the server's `error` field, or fall back to a generic message
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

pub struct HttpReportStore {
    agent: Agent,
    base_url: String,
    token: Option<String>,
    save_flag: SaveFlag,
}

impl HttpReportStore {
    pub fn new(base_url: &str, token: Option<String>, timeout_secs: u64) -> Result<Self, ReportError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ReportError::config(format!(
                "API base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        // 非 2xx 也需要读取响应体中的 error 字段
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs.max(1))))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            agent,
            base_url,
            token: token.filter(|t| !t.is_empty()),
            save_flag: SaveFlag::new(),
        })
    }

    pub(crate) fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, REPORTS_PATH)
    }

    pub(crate) fn item_url(&self, id: i64) -> String {
        format!("{}{}/{}", self.base_url, REPORTS_PATH, id)
    }

    fn authorize<B>(&self, request: ureq::RequestBuilder<B>) -> ureq::RequestBuilder<B> {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Turn a response into `T`, or into an error carrying the server message
    fn read_response<T: serde::de::DeserializeOwned>(
        response: Response<ureq::Body>,
        fallback: &str,
    ) -> Result<T, ReportError> {
        let status = response.status();
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| ReportError::http(format!("{}: {}", fallback, e)))?;

        if !status.is_success() {
            let message = error_message(&body, fallback);
            warn!("Report API returned {}: {}", status.as_u16(), message);
            return Err(ReportError::server(status.as_u16(), message));
        }

        serde_json::from_str(&body).map_err(|e| {
            ReportError::serialization(format!("{}: invalid response body: {}", fallback, e))
        })
    }

    fn send_failed(fallback: &str, err: ureq::Error) -> ReportError {
        warn!("Report API request failed: {}", err);
        ReportError::http(format!("{}: {}", fallback, err))
    }
}

impl ReportStore for HttpReportStore {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    fn fetch_reports(&self) -> Result<Vec<CasinoReport>, ReportError> {
        let url = self.collection_url();
        debug!("GET {}", url);
        let response = self
            .authorize(self.agent.get(&url))
            .call()
            .map_err(|e| Self::send_failed(LOAD_FAILED, e))?;
        let reports: Vec<CasinoReport> = Self::read_response(response, LOAD_FAILED)?;
        debug!("Fetched {} reports", reports.len());
        Ok(reports)
    }

    fn get_report(&self, id: i64) -> Result<CasinoReport, ReportError> {
        let url = self.item_url(id);
        debug!("GET {}", url);
        let response = self
            .authorize(self.agent.get(&url))
            .call()
            .map_err(|e| Self::send_failed(LOAD_FAILED, e))?;
        if response.status().as_u16() == 404 {
            return Err(ReportError::not_found(format!("Report {} not found", id)));
        }
        Self::read_response(response, LOAD_FAILED)
    }

    fn save_report(&self, report: &CasinoReport) -> Result<CasinoReport, ReportError> {
        self.save_flag.run(|| {
            let mut payload = report.clone();
            payload.apply_template_defaults();

            let response = match payload.id {
                Some(id) => {
                    let url = self.item_url(id);
                    debug!("PUT {}", url);
                    self.authorize(self.agent.put(&url)).send_json(&payload)
                }
                None => {
                    let url = self.collection_url();
                    debug!("POST {}", url);
                    self.authorize(self.agent.post(&url)).send_json(&payload)
                }
            }
            .map_err(|e| Self::send_failed(SAVE_FAILED, e))?;

            let saved: CasinoReport = Self::read_response(response, SAVE_FAILED)?;
            info!(
                "Report saved: id={:?} period={}",
                saved.id,
                saved.period_label()
            );
            Ok(saved)
        })
    }

    fn delete_report(&self, id: i64) -> Result<(), ReportError> {
        let url = self.item_url(id);
        debug!("DELETE {}", url);
        let response = self
            .authorize(self.agent.delete(&url))
            .call()
            .map_err(|e| Self::send_failed(DELETE_FAILED, e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.into_body().read_to_string().unwrap_or_default();
            let message = error_message(&body, DELETE_FAILED);
            warn!("Report API returned {}: {}", status.as_u16(), message);
            return Err(ReportError::server(status.as_u16(), message));
        }
        info!("Report deleted: id={}", id);
        Ok(())
    }
}
