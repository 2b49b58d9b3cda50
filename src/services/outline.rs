use crate::config::Config;
use crate::schema::DocumentMetadata;
use serde::Deserialize;

/// Looks up document details in Outline.
///
/// Lookups never fail: any error degrades to [`DocumentMetadata::unknown`].
#[async_trait::async_trait]
pub trait DocumentLookup: Send + Sync {
    async fn fetch(&self, document_id: &str) -> DocumentMetadata;
}

pub struct OutlineClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct DocumentInfoResponse {
    data: DocumentMetadata,
}

impl OutlineClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.outline_url.clone(),
            api_key: config.outline_api_key.clone(),
        })
    }

    async fn document_info(&self, document_id: &str) -> anyhow::Result<DocumentMetadata> {
        let response = self
            .client
            .post(format!("{}/api/documents.info", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({ "id": document_id }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Outline returned {status}: {body}");
        }

        let info: DocumentInfoResponse = response.json().await?;
        Ok(info.data)
    }
}

#[async_trait::async_trait]
impl DocumentLookup for OutlineClient {
    async fn fetch(&self, document_id: &str) -> DocumentMetadata {
        match self.document_info(document_id).await {
            Ok(document) => {
                tracing::debug!(
                    document_id,
                    collection_id = ?document.collection_id,
                    "outline: fetched document info"
                );
                document
            }
            Err(e) => {
                tracing::warn!(document_id, error = %e, "outline: document lookup failed");
                DocumentMetadata::unknown()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use axum::Json;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;

    async fn documents_info(
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer ol_api_test");
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "ok": false })),
            );
        }
        match body["id"].as_str() {
            Some("d1") => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "data": { "id": "d1", "title": "Spec", "url": "/doc/spec-abc", "collectionId": "col1" }
                })),
            ),
            Some("garbled") => (StatusCode::OK, Json(serde_json::json!({ "unexpected": true }))),
            _ => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "ok": false, "error": "not_found" })),
            ),
        }
    }

    async fn spawn_outline() -> String {
        let app = axum::Router::new().route("/api/documents.info", post(documents_info));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn fetches_document_metadata() {
        let base = spawn_outline().await;
        let client = OutlineClient::new(&test_config(&base, "")).unwrap();

        let document = client.fetch("d1").await;
        assert_eq!(document.title, "Spec");
        assert_eq!(document.url, "/doc/spec-abc");
        assert_eq!(document.collection_id.as_deref(), Some("col1"));
    }

    #[tokio::test]
    async fn error_status_yields_placeholder() {
        let base = spawn_outline().await;
        let client = OutlineClient::new(&test_config(&base, "")).unwrap();

        assert_eq!(client.fetch("missing").await, DocumentMetadata::unknown());
    }

    #[tokio::test]
    async fn malformed_body_yields_placeholder() {
        let base = spawn_outline().await;
        let client = OutlineClient::new(&test_config(&base, "")).unwrap();

        assert_eq!(client.fetch("garbled").await, DocumentMetadata::unknown());
    }

    #[tokio::test]
    async fn unreachable_origin_yields_placeholder() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OutlineClient::new(&test_config(&format!("http://{addr}"), "")).unwrap();
        let document = client.fetch("d1").await;
        assert_eq!(document.title, "Unknown Document");
        assert_eq!(document.url, "#");
        assert!(document.collection_id.is_none());
    }
}
