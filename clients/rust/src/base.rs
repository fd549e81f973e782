use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

pub const OWNER_HEADER: &str = "nuntius-owner";
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
pub(crate) struct BaseClient {
    client: Client,
    address: String,
    owner: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    UnexpectedStatusCode,
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    /// Status code of the response, when there was one
    pub status: Option<StatusCode>,
    pub message: String,
}

pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            client: Client::new(),
            address,
            owner: None,
            api_key: None,
        }
    }

    pub fn set_owner(&mut self, owner: String) {
        self.owner = Some(owner);
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    fn request(&self, method: Method, path: String) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}/{}", self.address, path));
        if let Some(owner) = &self.owner {
            builder = builder.header(OWNER_HEADER, owner);
        }
        if let Some(api_key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, api_key);
        }
        builder
    }

    async fn handle_api_response<T: DeserializeOwned>(
        &self,
        res: Result<reqwest::Response, reqwest::Error>,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = res.map_err(|e| APIError {
            variant: APIErrorVariant::Network,
            status: None,
            message: e.to_string(),
        })?;

        let status = res.status();
        if status != expected_status_code {
            return Err(APIError {
                variant: APIErrorVariant::UnexpectedStatusCode,
                status: Some(status),
                message: res.text().await.unwrap_or_default(),
            });
        }

        res.json::<T>().await.map_err(|e| APIError {
            variant: APIErrorVariant::MalformedResponse,
            status: Some(status),
            message: e.to_string(),
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.request(Method::GET, path).send().await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.request(Method::DELETE, path).send().await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        body: impl Serialize,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.request(Method::POST, path).json(&body).send().await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        body: impl Serialize,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.request(Method::PUT, path).json(&body).send().await;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.request(Method::PATCH, path).send().await;
        self.handle_api_response(res, expected_status_code).await
    }
}
