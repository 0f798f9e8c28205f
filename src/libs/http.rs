//! HTTP client for the tasklane REST API.
//!
//! Used by the command-line client. Every non-2xx response becomes an error
//! that carries the server's `error` message, plus the field details of a
//! validation failure. Requests are never retried.

use super::messages::Message;
use super::task::{Task, TaskWithRelations};
use crate::db::categories::{Category, CategoryWithCount};
use crate::db::tags::{Tag, TagWithCount};
use crate::libs::form::TaskPayload;
use crate::msg_error_anyhow;
use anyhow::Result;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    details: Vec<FieldDetail>,
}

#[derive(Debug, Deserialize)]
struct FieldDetail {
    field: String,
    message: String,
}

/// Body for creating or editing a category or tag.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LabelBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone)]
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

    pub async fn list_tasks(&self) -> Result<Vec<TaskWithRelations>> {
        self.send_json(self.request(Method::GET, "/tasks")).await
    }

    pub async fn get_task(&self, id: i64) -> Result<TaskWithRelations> {
        self.send_json(self.request(Method::GET, &format!("/tasks/{}", id))).await
    }

    pub async fn create_task(&self, payload: &TaskPayload) -> Result<Task> {
        self.send_json(self.request(Method::POST, "/tasks").json(payload)).await
    }

    pub async fn update_task(&self, id: i64, payload: &TaskPayload) -> Result<Task> {
        self.send_json(self.request(Method::PUT, &format!("/tasks/{}", id)).json(payload)).await
    }

    pub async fn toggle_task(&self, id: i64) -> Result<Task> {
        self.send_json(self.request(Method::POST, &format!("/tasks/{}/toggle", id))).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("/tasks/{}", id))).await?;
        Ok(())
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryWithCount>> {
        self.send_json(self.request(Method::GET, "/categories")).await
    }

    pub async fn get_category(&self, id: i64) -> Result<Category> {
        self.send_json(self.request(Method::GET, &format!("/categories/{}", id))).await
    }

    pub async fn create_category(&self, body: &LabelBody) -> Result<Category> {
        self.send_json(self.request(Method::POST, "/categories").json(body)).await
    }

    pub async fn update_category(&self, id: i64, body: &LabelBody) -> Result<Category> {
        self.send_json(self.request(Method::PUT, &format!("/categories/{}", id)).json(body)).await
    }

    pub async fn delete_category(&self, id: i64) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("/categories/{}", id))).await?;
        Ok(())
    }

    pub async fn list_tags(&self) -> Result<Vec<TagWithCount>> {
        self.send_json(self.request(Method::GET, "/tags")).await
    }

    pub async fn get_tag(&self, id: i64) -> Result<Tag> {
        self.send_json(self.request(Method::GET, &format!("/tags/{}", id))).await
    }

    pub async fn create_tag(&self, body: &LabelBody) -> Result<Tag> {
        self.send_json(self.request(Method::POST, "/tags").json(body)).await
    }

    pub async fn update_tag(&self, id: i64, body: &LabelBody) -> Result<Tag> {
        self.send_json(self.request(Method::PUT, &format!("/tags/{}", id)).json(body)).await
    }

    pub async fn delete_tag(&self, id: i64) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("/tags/{}", id))).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(error) if error.is_connect() => {
                return Err(msg_error_anyhow!(Message::ApiUnreachable(self.base_url.clone())));
            }
            Err(error) => return Err(error.into()),
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(msg_error_anyhow!(Message::ApiRequestFailed(status.as_u16(), error_message(&body))))
    }
}

/// The server message of an error body, with field details appended.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(response) if response.details.is_empty() => response.error,
        Ok(response) => {
            let details = response
                .details
                .iter()
                .map(|detail| format!("{}: {}", detail.field, detail.message))
                .collect::<Vec<_>>()
                .join("; ");
            format!("{} ({})", response.error, details)
        }
        Err(_) if body.is_empty() => "no response body".to_string(),
        Err(_) => body.to_string(),
    }
}
