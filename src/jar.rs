use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{Cookie, CookieJar, Key, SameSite};

/// Collects the cookies sent with a request into a jar.
///
/// Cookies that fail to parse are skipped.
pub fn from_headers(headers: &HeaderMap) -> CookieJar {
	let mut jar = CookieJar::new();

	headers
		.get_all(header::COOKIE)
		.into_iter()
		.filter_map(|value| value.to_str().ok())
		.flat_map(Cookie::split_parse_encoded)
		.filter_map(Result::ok)
		.for_each(|cookie| jar.add_original(cookie.into_owned()));

	jar
}

/// Returns the value of a signed cookie if its signature checks out.
pub fn signed_value(headers: &HeaderMap, key: &Key, name: &str) -> Option<String> {
	from_headers(headers)
		.signed(key)
		.get(name)
		.map(|cookie| cookie.value().to_string())
}

/// Creates a site-wide cookie that is not visible to scripts.
pub fn build(name: &'static str, value: String) -> Cookie<'static> {
	Cookie::build((name, value))
		.path("/")
		.http_only(true)
		.same_site(SameSite::Lax)
		.into()
}

/// Creates an empty cookie used to invalidate a previous one.
pub fn removal(name: &'static str) -> Cookie<'static> {
	Cookie::build(name)
		.path("/")
		.http_only(true)
		.max_age(cookie::time::Duration::ZERO)
		.into()
}

/// Signs `cookie` and appends it as a `Set-Cookie` header.
pub fn append_signed(headers: &mut HeaderMap, key: &Key, cookie: Cookie<'static>) {
	let mut jar = CookieJar::new();

	jar.signed_mut(key).add(cookie);
	jar.delta().for_each(|cookie| append(headers, cookie));
}

/// Appends `cookie` as a `Set-Cookie` header without signing it.
pub fn append(headers: &mut HeaderMap, cookie: &Cookie<'_>) {
	match HeaderValue::from_str(&cookie.encoded().to_string()) {
		Ok(value) => {
			headers.append(header::SET_COOKIE, value);
		}
		Err(error) => tracing::warn!(%error, name = cookie.name(), "dropping unencodable cookie"),
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_signed_round_trip() {
		let key = Key::generate();
		let mut response = HeaderMap::new();

		append_signed(&mut response, &key, build("flash", "hello; world".into()));

		let set_cookie = response[header::SET_COOKIE].to_str().unwrap();
		let pair = set_cookie.split(';').next().unwrap();

		let mut request = HeaderMap::new();
		request.insert(header::COOKIE, HeaderValue::from_str(pair).unwrap());

		assert_eq!(
			signed_value(&request, &key, "flash").as_deref(),
			Some("hello; world")
		);
		assert_eq!(signed_value(&request, &Key::generate(), "flash"), None);
	}

	#[test]
	fn test_unsigned_cookie_is_ignored() {
		let mut request = HeaderMap::new();
		request.insert(header::COOKIE, HeaderValue::from_static("flash=forged"));

		assert_eq!(signed_value(&request, &Key::generate(), "flash"), None);
	}

	#[test]
	fn test_removal_expires_immediately() {
		let cookie = removal("flash");

		assert_eq!(cookie.value(), "");
		assert_eq!(cookie.max_age(), Some(cookie::time::Duration::ZERO));
	}
}
