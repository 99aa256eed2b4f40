use async_trait::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::errors::BridgeError;

/// [`Path`] whose rejection is a [`BridgeError`], so a malformed URL segment
/// still answers with a wire envelope.
pub struct WdPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for WdPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = BridgeError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}
