use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    db::models::{Medicine, NewMedicine},
    store::MedicineTable,
};

const TABLE: &str = "medicines";

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    /// The service answered with a non-success status. `message` is what the
    /// service put in its error object.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },
    #[error("Insert into medicines returned no rows")]
    EmptyInsert,
}

/// Error object returned by the REST endpoint on failure.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl RemoteError {
    fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let (message, code, details, hint) = match parsed {
            Some(ErrorBody {
                message: Some(message),
                code,
                details,
                hint,
            }) => (message, code, details, hint),
            _ if !body.trim().is_empty() => (body.trim().to_string(), None, None, None),
            _ => (
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
                None,
                None,
                None,
            ),
        };

        RemoteError::Api {
            status: status.as_u16(),
            code,
            message,
            details,
            hint,
        }
    }
}

/// [`MedicineTable`] backed by the hosted REST API.
#[derive(Clone)]
pub struct RestMedicineTable {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestMedicineTable {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(header::ACCEPT, "application/json")
    }

    async fn rows(response: reqwest::Response) -> Result<Vec<Medicine>, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::from_response(status, &body));
        }

        Ok(response.json::<Vec<Medicine>>().await?)
    }
}

#[async_trait]
impl MedicineTable for RestMedicineTable {
    type Error = RemoteError;

    async fn list_medicines_ordered_by_name(&self) -> Result<Vec<Medicine>, Self::Error> {
        let response = self
            .request(reqwest::Method::GET)
            .query(&[("select", "*"), ("order", "name.asc")])
            .send()
            .await?;

        Self::rows(response).await
    }

    async fn insert_medicine(&self, draft: &NewMedicine) -> Result<Medicine, Self::Error> {
        let response = self
            .request(reqwest::Method::POST)
            .header("Prefer", "return=representation")
            .json(&[draft])
            .send()
            .await?;

        Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or(RemoteError::EmptyInsert)
    }
}
