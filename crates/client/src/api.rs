//! REST client for the `/todos` endpoints.
//!
//! Every call except [`TodoClient::upload_file`] sends the caller's bearer
//! token; the upload goes straight to the presigned storage URL.

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::pager::Pager;
use crate::types::{
    AttachmentEnvelope, CreateTodoRequest, ItemEnvelope, ListParams, Todo, TodoPage,
    UpdateTodoRequest, UploadUrlEnvelope,
};

/// Errors from the client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        status: u16,
        body: String,
    },

    /// A page size the pager does not offer.
    #[error("Unsupported page size {0}")]
    InvalidPageSize(u32),
}

/// Authenticated client for one API deployment.
#[derive(Clone)]
pub struct TodoClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl TodoClient {
    /// * `base_url` - API root, e.g. `http://localhost:8080`.
    /// * `token` - bearer token identifying the caller.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, token)
    }

    /// Reuse an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// `GET /todos` with the given paging parameters.
    pub async fn get_todos(&self, params: &ListParams) -> Result<TodoPage, ClientError> {
        tracing::debug!(limit = params.limit, has_key = params.next_key.is_some(), "Fetching todos");
        let response = self
            .client
            .get(self.url("/todos"))
            .bearer_auth(&self.token)
            .query(params)
            .send()
            .await?;

        let page: TodoPage = Self::parse_response(response).await?;
        tracing::debug!(count = page.items.len(), "Fetched todos");
        Ok(page)
    }

    /// Fetch the page the pager currently points at and record its `nextKey`.
    pub async fn fetch_page(&self, pager: &mut Pager) -> Result<Vec<Todo>, ClientError> {
        let page = self.get_todos(&pager.params()).await?;
        pager.record(page.next_key);
        Ok(page.items)
    }

    /// `GET /todos/{todo_id}`.
    pub async fn get_todo(&self, todo_id: Uuid) -> Result<Todo, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/todos/{todo_id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let envelope: ItemEnvelope<Todo> = Self::parse_response(response).await?;
        Ok(envelope.item)
    }

    /// `POST /todos`. Returns the stored item.
    pub async fn create_todo(&self, request: &CreateTodoRequest) -> Result<Todo, ClientError> {
        let response = self
            .client
            .post(self.url("/todos"))
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        let envelope: ItemEnvelope<Todo> = Self::parse_response(response).await?;
        tracing::debug!(todo_id = %envelope.item.todo_id, "Created todo");
        Ok(envelope.item)
    }

    /// `PATCH /todos/{todo_id}`. `None` if the item no longer exists.
    pub async fn patch_todo(
        &self,
        todo_id: Uuid,
        request: &UpdateTodoRequest,
    ) -> Result<Option<Todo>, ClientError> {
        let response = self
            .client
            .patch(self.url(&format!("/todos/{todo_id}")))
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        let envelope: ItemEnvelope<Option<Todo>> = Self::parse_response(response).await?;
        Ok(envelope.item)
    }

    /// `DELETE /todos/{todo_id}`.
    pub async fn delete_todo(&self, todo_id: Uuid) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/todos/{todo_id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// `POST /todos/{todo_id}/attachment`. Returns the presigned upload URL.
    pub async fn get_upload_url(&self, todo_id: Uuid) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/todos/{todo_id}/attachment")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let envelope: UploadUrlEnvelope = Self::parse_response(response).await?;
        Ok(envelope.upload_url)
    }

    /// `PUT` the file body to a presigned URL. No API token is sent.
    pub async fn upload_file(&self, upload_url: &str, file: Vec<u8>) -> Result<(), ClientError> {
        tracing::debug!(bytes = file.len(), "Uploading attachment");
        let response = self.client.put(upload_url).body(file).send().await?;
        Self::check_status(response).await
    }

    /// `PUT /todos/{todo_id}/attachment`. Returns the recorded attachment URL.
    pub async fn update_todo_with_attachment_url(
        &self,
        todo_id: Uuid,
    ) -> Result<String, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/todos/{todo_id}/attachment")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let envelope: AttachmentEnvelope = Self::parse_response(response).await?;
        Ok(envelope.attachment_url)
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Return the response unchanged on success, or [`ClientError::Api`]
    /// carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
