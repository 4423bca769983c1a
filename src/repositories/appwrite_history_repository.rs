// src/repositories/appwrite_history_repository.rs
//
// History entries stored as documents in a remote Appwrite collection.
//
// Collection attributes: device_id (string), movie_id (integer),
// user_id (string), is_saved (boolean), movie (string, JSON snapshot).
// Uniqueness of the key is left to the lookup-then-create flow in
// HistoryService; Appwrite itself does not enforce it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::config::AppwriteConfig;
use crate::domain::{DeviceId, HistoryEntry, HistoryKey, Movie, MovieId, UserId};
use crate::error::{AppError, AppResult};
use crate::repositories::HistoryRepository;

const LIST_LIMIT: u32 = 100;

#[derive(Debug, Serialize)]
struct DocumentData<'a> {
    device_id: &'a str,
    movie_id: u64,
    user_id: &'a str,
    is_saved: bool,
    movie: String,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "$createdAt")]
    created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    updated_at: DateTime<Utc>,
    device_id: String,
    movie_id: u64,
    user_id: String,
    is_saved: bool,
    movie: String,
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct AppwriteErrorBody {
    message: Option<String>,
}

pub struct AppwriteHistoryRepository {
    http_client: Client,
    config: AppwriteConfig,
}

impl AppwriteHistoryRepository {
    pub fn new(config: AppwriteConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint.trim_end_matches('/'),
            self.config.database_id,
            self.config.collection_id
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Appwrite-Project", &self.config.project_id)
            .header("X-Appwrite-Key", &self.config.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| AppError::Other(format!("Appwrite request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound);
        }
        if !status.is_success() {
            let message = response
                .json::<AppwriteErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_default();
            return Err(AppError::Other(format!(
                "Appwrite returned status {}: {}",
                status, message
            )));
        }

        Ok(response)
    }

    async fn list(&self, queries: Vec<String>) -> AppResult<Vec<HistoryEntry>> {
        let params: Vec<(&str, String)> = queries.into_iter().map(|q| ("queries[]", q)).collect();

        let response = self
            .send(self.http_client.get(self.documents_url()).query(&params))
            .await?;

        let list: DocumentList = response
            .json()
            .await
            .map_err(|e| AppError::Other(format!("Failed to parse Appwrite documents: {}", e)))?;

        list.documents.into_iter().map(document_to_entry).collect()
    }
}

fn equal_query(attribute: &str, value: serde_json::Value) -> String {
    json!({"method": "equal", "attribute": attribute, "values": [value]}).to_string()
}

fn document_data(entry: &HistoryEntry) -> AppResult<DocumentData<'_>> {
    Ok(DocumentData {
        device_id: entry.key.device_id.as_str(),
        movie_id: entry.key.movie_id.0,
        user_id: entry.key.user_id.as_str(),
        is_saved: entry.is_saved,
        movie: serde_json::to_string(&entry.movie)?,
    })
}

fn document_to_entry(document: Document) -> AppResult<HistoryEntry> {
    let movie: Movie = serde_json::from_str(&document.movie)?;

    Ok(HistoryEntry {
        id: document.id,
        key: HistoryKey {
            device_id: DeviceId::new(document.device_id),
            movie_id: MovieId(document.movie_id),
            user_id: UserId::new(document.user_id),
        },
        is_saved: document.is_saved,
        movie,
        created_at: document.created_at,
        updated_at: document.updated_at,
    })
}

#[async_trait]
impl HistoryRepository for AppwriteHistoryRepository {
    async fn get(&self, key: &HistoryKey) -> AppResult<Option<HistoryEntry>> {
        let entries = self
            .list(vec![
                equal_query("device_id", json!(key.device_id.as_str())),
                equal_query("movie_id", json!(key.movie_id.0)),
                equal_query("user_id", json!(key.user_id.as_str())),
                json!({"method": "limit", "values": [1]}).to_string(),
            ])
            .await?;

        Ok(entries.into_iter().next())
    }

    async fn create(&self, entry: &HistoryEntry) -> AppResult<()> {
        let body = json!({
            "documentId": entry.id,
            "data": document_data(entry)?,
        });

        self.send(self.http_client.post(self.documents_url()).json(&body))
            .await?;

        log::debug!("Created Appwrite document {}", entry.id);
        Ok(())
    }

    async fn update(&self, entry: &HistoryEntry) -> AppResult<()> {
        let url = format!("{}/{}", self.documents_url(), entry.id);
        let body = json!({ "data": document_data(entry)? });

        self.send(self.http_client.patch(url).json(&body)).await?;

        log::debug!("Updated Appwrite document {}", entry.id);
        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> AppResult<Vec<HistoryEntry>> {
        self.list(vec![
            equal_query("user_id", json!(user_id.as_str())),
            json!({"method": "orderDesc", "attribute": "$updatedAt"}).to_string(),
            json!({"method": "limit", "values": [LIST_LIMIT]}).to_string(),
        ])
        .await
    }
}
