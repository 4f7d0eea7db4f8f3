//! HTTP client for the generic REST backend.
//!
//! The backend exposes plain resource collections (`users`, `categories`,
//! `vocabs`, `results`) with GET/POST/PUT/PATCH/DELETE semantics and
//! query-param filtering. No auth token is sent; login is a filtered GET by
//! contract of the backend (see DESIGN.md on the plaintext credential flag).

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use vocab_core::{Category, NewCategory, NewUser, NewVocab, QuizResult, User, Vocab};

/// Transport-level API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Client for one backend base URL.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    // === categories ===

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let resp = self
            .client
            .get(self.url("categories"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(resp).await
    }

    pub async fn create_category(&self, payload: &NewCategory) -> Result<Category, ApiError> {
        self.post_json("categories", payload).await
    }

    /// Full replace; the id travels in the path, not the body.
    pub async fn update_category(&self, id: i64, payload: &NewCategory) -> Result<Category, ApiError> {
        self.put_json(&format!("categories/{id}"), payload).await
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("categories/{id}")).await
    }

    // === vocabs ===

    pub async fn list_vocabs(&self) -> Result<Vec<Vocab>, ApiError> {
        let resp = self
            .client
            .get(self.url("vocabs"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(resp).await
    }

    pub async fn create_vocab(&self, payload: &NewVocab) -> Result<Vocab, ApiError> {
        self.post_json("vocabs", payload).await
    }

    pub async fn update_vocab(&self, id: i64, payload: &NewVocab) -> Result<Vocab, ApiError> {
        self.put_json(&format!("vocabs/{id}"), payload).await
    }

    pub async fn delete_vocab(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("vocabs/{id}")).await
    }

    /// Partial update; the only PATCH in the protocol.
    pub async fn mark_vocab_learned(&self, id: i64) -> Result<Vocab, ApiError> {
        let resp = self
            .client
            .patch(self.url(&format!("vocabs/{id}")))
            .json(&json!({ "isLearned": true }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(resp).await
    }

    // === results ===

    pub async fn list_results(&self) -> Result<Vec<QuizResult>, ApiError> {
        let resp = self
            .client
            .get(self.url("results"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(resp).await
    }

    pub async fn create_result(&self, payload: &QuizResult) -> Result<QuizResult, ApiError> {
        self.post_json("results", payload).await
    }

    // === users ===

    pub async fn create_user(&self, payload: &NewUser) -> Result<User, ApiError> {
        self.post_json("users", payload).await
    }

    /// Filtered GET used for login: matching users for email + password.
    pub async fn find_users(&self, email: &str, password: &str) -> Result<Vec<User>, ApiError> {
        let resp = self
            .client
            .get(self.url("users"))
            .query(&[("email", email), ("password", password)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(resp).await
    }

    // === private helpers ===

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(resp).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Backend { status, message });
        }
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let message = resp.text().await.unwrap_or_default();
        return Err(ApiError::Backend { status, message });
    }
    resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
}
