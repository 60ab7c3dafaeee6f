use std::{env, fmt::Display, str::FromStr};

use tracing::Level;

/// Minimum secret length accepted by [`cookie::Key::derive_from`].
pub const MIN_SECRET_LENGTH: usize = 32;

/// An error that can occur while reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid value {value:?} for {key}: {reason}")]
	Invalid {
		key: &'static str,
		value: String,
		reason: String,
	},
	#[error("SECRET_KEY must be at least {MIN_SECRET_LENGTH} bytes long")]
	SecretTooShort,
	#[error("POSTS_PER_PAGE must be at least 1")]
	EmptyPage,
}

/// Settings supplied externally at startup.
#[derive(Debug, Clone)]
pub struct Config {
	pub database_url: String,
	/// Signing secret for flash and CSRF cookies. A random key is
	/// generated per process when this is not set.
	pub secret_key: Option<String>,
	pub posts_per_page: u32,
	pub host: String,
	pub port: u16,
	pub csrf_enabled: bool,
	pub log_level: Level,
	pub otlp_endpoint: Option<String>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			database_url: "sqlite://blog.db".into(),
			secret_key: None,
			posts_per_page: 10,
			host: "127.0.0.1".into(),
			port: 3000,
			csrf_enabled: true,
			log_level: Level::INFO,
			otlp_endpoint: None,
		}
	}
}

impl Config {
	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, Error> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Reads the configuration through `lookup`, falling back to the
	/// defaults for keys that are not set.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
	where
		F: Fn(&str) -> Option<String>,
	{
		let defaults = Self::default();
		let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

		let secret_key = lookup("SECRET_KEY");

		if secret_key
			.as_ref()
			.is_some_and(|secret| secret.len() < MIN_SECRET_LENGTH)
		{
			return Err(Error::SecretTooShort);
		}

		let posts_per_page = parse(&lookup, "POSTS_PER_PAGE", defaults.posts_per_page)?;

		if posts_per_page == 0 {
			return Err(Error::EmptyPage);
		}

		Ok(Self {
			database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
			secret_key,
			posts_per_page,
			host: lookup("HOST").unwrap_or(defaults.host),
			port: parse(&lookup, "PORT", defaults.port)?,
			csrf_enabled: parse_bool(&lookup, "CSRF_ENABLED", defaults.csrf_enabled)?,
			log_level: parse(&lookup, "LOG_LEVEL", defaults.log_level)?,
			otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT"),
		})
	}
}

fn parse<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, Error>
where
	T: FromStr,
	T::Err: Display,
	F: Fn(&str) -> Option<String>,
{
	let Some(value) = lookup(key) else {
		return Ok(default);
	};

	value.trim().parse().map_err(|e: T::Err| Error::Invalid {
		key,
		reason: e.to_string(),
		value,
	})
}

fn parse_bool<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, Error>
where
	F: Fn(&str) -> Option<String>,
{
	let Some(value) = lookup(key) else {
		return Ok(default);
	};

	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		_ => Err(Error::Invalid {
			key,
			value,
			reason: "expected a boolean".into(),
		}),
	}
}
