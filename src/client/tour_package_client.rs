use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use super::Session;
use crate::features::tour_packages::dtos::{
    CreateTourPackageDto, TourPackageResponseDto, UpdateTourPackageDto,
};
use crate::shared::types::{ApiResponse, DeletedDto};
use crate::shared::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        status: StatusCode,
        message: String,
        field_errors: FieldErrors,
    },

    #[error("Response envelope carried no data")]
    EmptyBody,
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// Tour-package operations as seen by a client
#[async_trait]
pub trait TourPackageApi: Send + Sync {
    async fn create(&self, input: &CreateTourPackageDto) -> Result<TourPackageResponseDto, ClientError>;

    async fn get(&self, id: Uuid) -> Result<TourPackageResponseDto, ClientError>;

    async fn list(&self) -> Result<Vec<TourPackageResponseDto>, ClientError>;

    async fn update(
        &self,
        id: Uuid,
        input: &UpdateTourPackageDto,
    ) -> Result<TourPackageResponseDto, ClientError>;

    async fn delete(&self, id: Uuid) -> Result<(), ClientError>;
}

/// HTTP implementation over `reqwest`
pub struct TourPackageClient {
    http: Client,
    session: Session,
}

impl TourPackageClient {
    pub fn new(session: Session) -> Self {
        Self::with_http(Client::new(), session)
    }

    pub fn with_http(http: Client, session: Session) -> Self {
        Self { http, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    fn collection_url(&self) -> String {
        self.session.url("/api/tour-packages")
    }

    fn item_url(&self, id: Uuid) -> String {
        self.session.url(&format!("/api/tour-packages/{}", id))
    }

    /// Send with the session's bearer token and unwrap the envelope's `data`
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let request = match self.session.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let (message, field_errors) =
                match response.json::<ApiResponse<serde_json::Value>>().await {
                    Ok(body) => (
                        body.message.unwrap_or_else(|| status.to_string()),
                        body.field_errors.unwrap_or_default(),
                    ),
                    Err(_) => (status.to_string(), FieldErrors::new()),
                };
            tracing::debug!(%status, %message, "Tour package request rejected");

            return Err(ClientError::Api {
                status,
                message,
                field_errors,
            });
        }

        let body: ApiResponse<T> = response.json().await?;
        body.data.ok_or(ClientError::EmptyBody)
    }
}

#[async_trait]
impl TourPackageApi for TourPackageClient {
    async fn create(&self, input: &CreateTourPackageDto) -> Result<TourPackageResponseDto, ClientError> {
        self.send(self.http.post(self.collection_url()).json(input))
            .await
    }

    async fn get(&self, id: Uuid) -> Result<TourPackageResponseDto, ClientError> {
        self.send(self.http.get(self.item_url(id))).await
    }

    async fn list(&self) -> Result<Vec<TourPackageResponseDto>, ClientError> {
        self.send(self.http.get(self.collection_url())).await
    }

    async fn update(
        &self,
        id: Uuid,
        input: &UpdateTourPackageDto,
    ) -> Result<TourPackageResponseDto, ClientError> {
        self.send(self.http.put(self.item_url(id)).json(input)).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let _: DeletedDto = self.send(self.http.delete(self.item_url(id))).await?;
        Ok(())
    }
}
