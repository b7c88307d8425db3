//! Firestore via REST API (no SDK dependency)
//!
//! Documents live at `projects/{project}/databases/(default)/documents/{collection}/{id}`
//! with fields `name`, `imageUrl`, `category` and a server-stamped `createdAt`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use shared::{DishCreate, DishRecord};

use super::{DishStore, StoreError};

const FIRESTORE_API: &str = "https://firestore.googleapis.com/v1";

/// Request timeout for every store call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Error bodies are cut to this many characters in messages
const MAX_ERROR_BODY: usize = 300;

/// Firestore-backed [`DishStore`]
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    http: reqwest::Client,
    project_id: String,
    api_key: String,
    collection: String,
}

impl FirestoreStore {
    pub fn new(
        project_id: impl Into<String>,
        api_key: impl Into<String>,
        collection: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            project_id: project_id.into(),
            api_key: api_key.into(),
            collection: collection.into(),
        })
    }

    /// Resource path of the documents root
    fn database_path(&self) -> String {
        format!("projects/{}/databases/(default)/documents", self.project_id)
    }

    fn documents_url(&self) -> String {
        format!("{FIRESTORE_API}/{}", self.database_path())
    }

    fn document_path(&self, id: &str) -> String {
        format!("{}/{}/{id}", self.database_path(), self.collection)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

#[async_trait]
impl DishStore for FirestoreStore {
    async fn list(&self) -> Result<Vec<DishRecord>, StoreError> {
        let response = self
            .http
            .post(format!("{}:runQuery", self.documents_url()))
            .query(&[("key", &self.api_key)])
            .json(&list_query(&self.collection))
            .send()
            .await?;
        let rows: Value = Self::check(response).await?.json().await?;
        let dishes = decode_query_rows(&rows)?;
        tracing::debug!(count = dishes.len(), "Dish list fetched");
        Ok(dishes)
    }

    async fn create(&self, dish: DishCreate) -> Result<String, StoreError> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let body = create_write(&self.document_path(&id), &dish);
        let response = self
            .http
            .post(format!("{}:commit", self.documents_url()))
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;
        tracing::info!(dish_id = %id, name = %dish.name, "Dish document created");
        Ok(id)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(format!("{FIRESTORE_API}/{}", self.document_path(id)))
            .query(&[("key", &self.api_key)])
            .send()
            .await?;
        Self::check(response).await?;
        tracing::info!(dish_id = %id, "Dish document deleted");
        Ok(())
    }
}

/// Structured query: whole collection, newest first
fn list_query(collection: &str) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "orderBy": [{
                "field": { "fieldPath": "createdAt" },
                "direction": "DESCENDING"
            }]
        }
    })
}

/// Commit body creating one document with a server-side `createdAt`
fn create_write(document_path: &str, dish: &DishCreate) -> Value {
    let category = match &dish.category {
        Some(category) => json!({ "stringValue": category }),
        None => json!({ "nullValue": null }),
    };
    json!({
        "writes": [{
            "update": {
                "name": document_path,
                "fields": {
                    "name": { "stringValue": dish.name },
                    "imageUrl": { "stringValue": dish.image_url },
                    "category": category
                }
            },
            "updateTransforms": [{
                "fieldPath": "createdAt",
                "setToServerValue": "REQUEST_TIME"
            }],
            "currentDocument": { "exists": false }
        }]
    })
}

/// `runQuery` answers with one row per document; an empty result is a
/// single row carrying only `readTime`.
fn decode_query_rows(rows: &Value) -> Result<Vec<DishRecord>, StoreError> {
    let rows = rows
        .as_array()
        .ok_or_else(|| StoreError::Decode("runQuery response is not an array".into()))?;
    rows.iter()
        .filter_map(|row| row.get("document"))
        .map(decode_document)
        .collect()
}

fn decode_document(doc: &Value) -> Result<DishRecord, StoreError> {
    let path = doc["name"]
        .as_str()
        .ok_or_else(|| StoreError::Decode("document without name".into()))?;
    let id = path.rsplit('/').next().unwrap_or(path).to_string();
    let fields = &doc["fields"];

    let created_at = timestamp(&fields["createdAt"]["timestampValue"])
        .or_else(|| timestamp(&doc["createTime"]))
        .ok_or_else(|| StoreError::Decode(format!("document {id} has no timestamp")))?;

    Ok(DishRecord {
        name: string_field(fields, "name").unwrap_or_default(),
        image_url: string_field(fields, "imageUrl").unwrap_or_default(),
        category: string_field(fields, "category").filter(|c| !c.trim().is_empty()),
        created_at,
        id,
    })
}

/// `None` for missing, null or non-string values
fn string_field(fields: &Value, key: &str) -> Option<String> {
    fields[key]["stringValue"].as_str().map(str::to_string)
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?;
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Pull `error.message` out of a Google API error body
fn error_message(body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string());
    message.chars().take(MAX_ERROR_BODY).collect()
}
