//! HTTP client and addressing for the Firestore REST API.

use serde::Deserialize;

use crate::error::FirestoreError;
use crate::value::Document;

/// Where and how to reach the Firestore project.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Cloud project id.
    pub project_id: String,
    /// Database id; every project starts with `(default)`.
    pub database: String,
    /// API root, overridable for the emulator.
    pub base_url: String,
    /// Bearer token added to every request when present.
    pub auth_token: Option<String>,
}

impl Config {
    /// Configuration for a project with the default database and API root.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: "(default)".to_string(),
            base_url: "https://firestore.googleapis.com/v1".to_string(),
            auth_token: None,
        }
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Root of the documents resource.
    #[must_use]
    pub fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            self.base_url, self.project_id, self.database
        )
    }
}

/// One entry in a `runQuery` response stream; entries without a `document`
/// carry only read metadata and are skipped.
#[derive(Debug, Deserialize)]
struct QueryResult {
    document: Option<Document>,
}

/// Thin wrapper around `reqwest` that speaks document paths.
#[derive(Debug)]
pub struct FirestoreClient {
    http: reqwest::Client,
    config: Config,
}

impl FirestoreClient {
    /// Create a client for the configured project.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn document_url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.documents_root())
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Fetch a document by path, `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`FirestoreError`] on transport failures or non-success
    /// statuses other than 404.
    pub async fn get_document(&self, path: &str) -> Result<Option<Document>, FirestoreError> {
        let response = self
            .authorize(self.http.get(self.document_url(path)))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check_status(response).await?;
        Ok(Some(response.json().await?))
    }

    /// Create or replace the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FirestoreError`] on transport failures or non-success
    /// statuses.
    pub async fn set_document(
        &self,
        path: &str,
        document: &Document,
    ) -> Result<Document, FirestoreError> {
        let response = self
            .authorize(self.http.patch(self.document_url(path)))
            .json(document)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Append a document to a collection, letting the server pick the id.
    ///
    /// # Errors
    ///
    /// Returns [`FirestoreError`] on transport failures or non-success
    /// statuses.
    pub async fn create_document(
        &self,
        collection: &str,
        document: &Document,
    ) -> Result<Document, FirestoreError> {
        let response = self
            .authorize(self.http.post(self.document_url(collection)))
            .json(document)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Run a structured query against the documents root.
    ///
    /// # Errors
    ///
    /// Returns [`FirestoreError`] on transport failures or non-success
    /// statuses.
    pub async fn run_query(
        &self,
        body: &serde_json::Value,
    ) -> Result<Vec<Document>, FirestoreError> {
        let url = format!("{}:runQuery", self.config.documents_root());
        let response = self.authorize(self.http.post(url)).json(body).send().await?;
        let response = Self::check_status(response).await?;

        let results: Vec<QueryResult> = response.json().await?;
        Ok(results
            .into_iter()
            .filter_map(|result| result.document)
            .collect())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, FirestoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), %message, "firestore request failed");
        Err(FirestoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_documents_root_from_config() {
        let config = Config::new("leafy-project");
        assert_eq!(
            config.documents_root(),
            "https://firestore.googleapis.com/v1/projects/leafy-project/databases/(default)/documents"
        );
    }

    #[test]
    fn should_build_document_url_with_path() {
        let client = FirestoreClient::new(Config::new("leafy-project"));
        assert_eq!(
            client.document_url("plant_profiles/main_plant"),
            "https://firestore.googleapis.com/v1/projects/leafy-project/databases/(default)/documents/plant_profiles/main_plant"
        );
    }

    #[test]
    fn should_keep_token_out_of_config_by_default() {
        let config = Config::new("leafy-project");
        assert!(config.auth_token.is_none());
        let config = config.with_auth_token("secret");
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
    }

    #[test]
    fn should_skip_results_without_documents() {
        let body = serde_json::json!([
            {"readTime": "2024-01-15T10:30:00Z"},
            {"document": {"name": "projects/p/databases/(default)/documents/watering_history/abc", "fields": {}}}
        ]);
        let results: Vec<QueryResult> = serde_json::from_value(body).unwrap();
        let documents: Vec<Document> = results.into_iter().filter_map(|r| r.document).collect();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].doc_id(), Some("abc"));
    }
}
