use axum::{
	extract::{FromRequest, FromRequestParts, Request},
	http::request,
};
use serde::de;

use crate::error::Error;

/// Extractor that deserializes path parameters.
///
/// A parameter that does not parse means the route does not exist, so
/// the rejection is [`Error::NotFound`] rather than a bad request.
///
/// ```rust
/// async fn route(Path(post_id): Path<i64>) {
///   // `/post/abc` never gets here
/// }
/// ```
pub struct Path<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
	T: de::DeserializeOwned + Send,
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let result = axum::extract::Path::<T>::from_request_parts(parts, state)
			.await
			.map_err(|rejection| {
				tracing::debug!(%rejection, "unmatched path parameter");
				Error::NotFound
			})?
			.0;

		Ok(Self(result))
	}
}

/// Extractor that deserializes a urlencoded form body.
///
/// Validation is left to the handler, since an invalid submission is
/// rendered back to the user instead of being rejected.
pub struct Form<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for Form<T>
where
	T: de::DeserializeOwned,
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let result = axum::extract::Form::<T>::from_request(req, state).await?.0;

		Ok(Self(result))
	}
}
