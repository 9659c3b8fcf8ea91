use crate::bundle::EvidenceBundle;
use async_trait::async_trait;
use proctor_core::{ProctorError, ProctorResult};
use proctor_session::Identity;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outbound delivery of the evidence package.
///
/// Delivery is best-effort: callers convert any error into a degraded
/// outcome rather than failing the session.
#[async_trait]
pub trait Exporter: Send + Sync {
    fn name(&self) -> &str;
    async fn deliver(&self, bundle: &EvidenceBundle, identity: &Identity) -> ProctorResult<()>;
}

/// Transport configuration for [`HttpExporter`]. Absent credentials are a
/// normal, expected condition, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
}

// ── Delivery wire types ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct DeliveryRequest<'a> {
    student: &'a str,
    student_id: &'a str,
    recipient: Option<&'a str>,
    bundle: &'a EvidenceBundle,
}

#[derive(Debug, Deserialize)]
struct DeliveryResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Delivers the evidence bundle to a configured HTTP endpoint with bearer
/// auth. The endpoint owns archiving and mail fan-out.
pub struct HttpExporter {
    endpoint: String,
    auth_token: String,
    recipient: Option<String>,
    client: reqwest::Client,
}

impl HttpExporter {
    pub fn new(endpoint: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_token: auth_token.into(),
            recipient: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// Build from config. Returns `None` when endpoint or token is missing;
    /// the caller records a degraded outcome instead of failing.
    pub fn from_config(config: &ExportConfig) -> Option<Self> {
        match (&config.endpoint, &config.auth_token) {
            (Some(endpoint), Some(token)) if !endpoint.is_empty() && !token.is_empty() => {
                let mut exporter = Self::new(endpoint.as_str(), token.as_str());
                exporter.recipient = config.recipient.clone();
                Some(exporter)
            }
            _ => None,
        }
    }
}

#[async_trait]
impl Exporter for HttpExporter {
    fn name(&self) -> &str {
        "http"
    }

    async fn deliver(&self, bundle: &EvidenceBundle, identity: &Identity) -> ProctorResult<()> {
        let student = format!("{} {}", identity.name, identity.surname);
        let payload = DeliveryRequest {
            student: &student,
            student_id: &identity.student_id,
            recipient: self.recipient.as_deref(),
            bundle,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.auth_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProctorError::Export(format!("delivery send error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProctorError::Export(format!(
                "delivery rejected with status {status}"
            )));
        }

        let body: DeliveryResponse = response
            .json()
            .await
            .map_err(|e| ProctorError::Export(format!("delivery parse error: {e}")))?;

        if !body.ok {
            return Err(ProctorError::Export(format!(
                "delivery failed: {}",
                body.error.unwrap_or_default()
            )));
        }

        info!(entries = bundle.entries.len(), "Evidence bundle delivered");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn from_config_requires_endpoint_and_token() {
        assert!(HttpExporter::from_config(&ExportConfig::default()).is_none());

        let partial = ExportConfig {
            endpoint: Some("https://example.test/export".into()),
            auth_token: None,
            recipient: None,
        };
        assert!(HttpExporter::from_config(&partial).is_none());

        let empty_token = ExportConfig {
            endpoint: Some("https://example.test/export".into()),
            auth_token: Some(String::new()),
            recipient: None,
        };
        assert!(HttpExporter::from_config(&empty_token).is_none());

        let full = ExportConfig {
            endpoint: Some("https://example.test/export".into()),
            auth_token: Some("tok".into()),
            recipient: Some("prof@example.test".into()),
        };
        assert!(HttpExporter::from_config(&full).is_some());
    }
}
