use std::{convert::Infallible, sync::Arc};

use axum::{
	extract::{FromRef, FromRequestParts},
	http::request,
	response::{IntoResponseParts, ResponseParts},
};
use cookie::Key;
use uuid::Uuid;

use crate::{config::Config, jar};

pub const COOKIE_NAME: &str = "csrf_token";
/// Name of the hidden form field that echoes the token.
pub const FIELD_NAME: &str = "csrf_token";

/// The anti-forgery token bound to the current client.
///
/// The token lives in a signed cookie and must be echoed back in the
/// `csrf_token` form field. A fresh token is issued, and its cookie set
/// when this is returned as part of the response, if the client has none.
pub struct CsrfToken {
	key: Key,
	token: String,
	issued: bool,
	enabled: bool,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CsrfToken
where
	Key: FromRef<S>,
	Arc<Config>: FromRef<S>,
	S: Send + Sync,
{
	type Rejection = Infallible;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let key = Key::from_ref(state);
		let enabled = Arc::<Config>::from_ref(state).csrf_enabled;

		let (token, issued) = match jar::signed_value(&parts.headers, &key, COOKIE_NAME) {
			Some(token) => (token, false),
			None => (Uuid::new_v4().simple().to_string(), true),
		};

		Ok(Self {
			key,
			token,
			issued,
			enabled,
		})
	}
}

impl CsrfToken {
	pub fn token(&self) -> &str {
		&self.token
	}

	/// Checks a submitted token against the one stored in the cookie.
	///
	/// Always passes when protection is disabled. Fails when the client had
	/// no token cookie, since nothing was rendered for it to echo back.
	pub fn verify(&self, submitted: &str) -> bool {
		if !self.enabled {
			return true;
		}

		!self.issued && constant_time_eq(submitted.as_bytes(), self.token.as_bytes())
	}
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
	a.len() == b.len() && a.iter().zip(b).fold(0, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl IntoResponseParts for CsrfToken {
	type Error = Infallible;

	fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
		if self.issued {
			jar::append_signed(res.headers_mut(), &self.key, jar::build(COOKIE_NAME, self.token));
		}

		Ok(res)
	}
}
