use std::convert::Infallible;

use axum::{
	extract::{FromRef, FromRequestParts},
	http::request,
	response::{IntoResponseParts, ResponseParts},
};
use cookie::Key;
use serde::{Deserialize, Serialize};

use crate::jar;

pub const COOKIE_NAME: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
	Info,
	Error,
}

impl Level {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Info => "info",
			Self::Error => "error",
		}
	}
}

/// A one-shot notice shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
	pub level: Level,
	pub message: String,
}

/// Flash notices carried across a redirect in a signed cookie.
///
/// Extracting a [`Flash`] reads the notices left by the previous response.
/// Returning it as part of a response either stores the newly queued
/// notices or, if nothing was queued, clears the ones that were read.
///
/// ```rust
/// async fn route(flash: Flash) -> (Flash, Redirect) {
///   (flash.info("saved"), Redirect::to("/"))
/// }
/// ```
pub struct Flash {
	key: Key,
	incoming: Vec<Message>,
	outgoing: Vec<Message>,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Flash
where
	Key: FromRef<S>,
	S: Send + Sync,
{
	type Rejection = Infallible;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let key = Key::from_ref(state);
		let incoming = jar::signed_value(&parts.headers, &key, COOKIE_NAME)
			.and_then(|value| serde_json::from_str(&value).ok())
			.unwrap_or_default();

		Ok(Self {
			key,
			incoming,
			outgoing: Vec::new(),
		})
	}
}

impl Flash {
	/// The notices left by the previous response.
	pub fn messages(&self) -> &[Message] {
		&self.incoming
	}

	pub fn info(self, message: impl Into<String>) -> Self {
		self.push(Level::Info, message.into())
	}

	pub fn error(self, message: impl Into<String>) -> Self {
		self.push(Level::Error, message.into())
	}

	fn push(mut self, level: Level, message: String) -> Self {
		self.outgoing.push(Message { level, message });
		self
	}
}

impl IntoResponseParts for Flash {
	type Error = Infallible;

	fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
		if !self.outgoing.is_empty() {
			match serde_json::to_string(&self.outgoing) {
				Ok(value) => {
					jar::append_signed(res.headers_mut(), &self.key, jar::build(COOKIE_NAME, value));
				}
				Err(error) => tracing::warn!(%error, "failed to encode flash messages"),
			}
		} else if !self.incoming.is_empty() {
			jar::append(res.headers_mut(), &jar::removal(COOKIE_NAME));
		}

		Ok(res)
	}
}
