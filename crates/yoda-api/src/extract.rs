//! Request body extraction

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};

use crate::error::ApiError;

/// Raw metadata document carried in the request body.
///
/// Oversized and non-UTF-8 bodies are rejected as JSON `ApiError`s.
#[derive(Debug, Clone)]
pub struct MetadataDocument(pub String);

#[async_trait]
impl<S> FromRequest<S> for MetadataDocument
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        Ok(Self(String::from_utf8(bytes.to_vec())?))
    }
}
