//! HTTP client for the remote readmission prediction service.

use serde::Deserialize;
use thiserror::Error;

use crate::config;
use crate::models::HospitalUtilizationRecord;

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Cannot reach prediction service at {0}. Is it running?")]
    Connection(String),

    #[error("Prediction request timed out after {0}s")]
    Timeout(u64),

    #[error("Prediction service error (HTTP {status}): {body}")]
    Service { status: u16, body: String },

    #[error("Malformed prediction response: {0}")]
    ResponseParsing(String),
}

/// Raw wire response from the prediction endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
    pub confidence: String,
}

/// Remote prediction boundary (allows mocking for tests).
pub trait PredictionService {
    fn predict(
        &self,
        record: &HospitalUtilizationRecord,
    ) -> Result<PredictionResponse, PredictionError>;
}

/// Blocking HTTP client for the prediction service's /predict endpoint.
pub struct HttpPredictionClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpPredictionClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, PredictionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PredictionError::ResponseParsing(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    /// Client for the configured deployment URL with the default timeout.
    pub fn from_config() -> Result<Self, PredictionError> {
        Self::new(
            &config::prediction_service_url(),
            config::PREDICTION_TIMEOUT_SECS,
        )
    }
}

impl PredictionService for HttpPredictionClient {
    fn predict(
        &self,
        record: &HospitalUtilizationRecord,
    ) -> Result<PredictionResponse, PredictionError> {
        let url = format!("{}/predict", self.base_url);

        let response = self.client.post(&url).json(record).send().map_err(|e| {
            if e.is_connect() {
                PredictionError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                PredictionError::Timeout(self.timeout_secs)
            } else {
                PredictionError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PredictionError::Service {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<PredictionResponse>()
            .map_err(|e| PredictionError::ResponseParsing(e.to_string()))
    }
}

/// Mock prediction service for testing — returns a configurable outcome.
pub struct MockPredictionService {
    outcome: Result<PredictionResponse, fn() -> PredictionError>,
}

impl MockPredictionService {
    pub fn answering(prediction: &str, confidence: &str) -> Self {
        Self {
            outcome: Ok(PredictionResponse {
                prediction: prediction.to_string(),
                confidence: confidence.to_string(),
            }),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            outcome: Err(|| PredictionError::Connection("http://localhost:5000".to_string())),
        }
    }
}

impl PredictionService for MockPredictionService {
    fn predict(
        &self,
        _record: &HospitalUtilizationRecord,
    ) -> Result<PredictionResponse, PredictionError> {
        match &self.outcome {
            Ok(response) => Ok(response.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}
