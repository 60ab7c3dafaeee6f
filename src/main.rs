#![warn(clippy::pedantic)]

mod config;
mod csrf;
mod error;
mod extract;
mod flash;
mod jar;
mod model;
mod query;
mod route;
mod trace;
mod view;

use std::{str::FromStr, sync::Arc};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use config::Config;
pub use error::Error;

pub type Database = sqlx::Pool<sqlx::Sqlite>;
pub type AppState = State;

/// The shared application state.
///
/// Built once at startup and handed to the router; handlers pull out the
/// parts they need through [`axum::extract::FromRef`].
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub database: Database,
	pub config: Arc<Config>,
	/// Signs the flash and CSRF cookies.
	pub key: cookie::Key,
}

impl State {
	pub fn new(database: Database, config: Config) -> Self {
		let key = match &config.secret_key {
			Some(secret) => cookie::Key::derive_from(secret.as_bytes()),
			None => {
				tracing::warn!("SECRET_KEY is not set, cookies will not survive a restart");
				cookie::Key::generate()
			}
		};

		Self {
			database,
			config: Arc::new(config),
			key,
		}
	}
}

/// Opens the connection pool, creating the database file if needed.
async fn connect(url: &str) -> Result<Database, sqlx::Error> {
	let options = SqliteConnectOptions::from_str(url)?
		.create_if_missing(true)
		.foreign_keys(true);

	SqlitePoolOptions::new().connect_with(options).await
}

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();

	let config = Config::from_env().expect("invalid configuration");
	let _guard = trace::init_tracing_subscriber(&config);

	let database = connect(&config.database_url)
		.await
		.expect("failed to connect to database");

	sqlx::migrate!()
		.run(&database)
		.await
		.expect("failed to run migrations");

	let address = (config.host.clone(), config.port);
	let state = State::new(database, config);
	let app = route::app(state);

	let listener = tokio::net::TcpListener::bind(&address)
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on {}:{}", address.0, address.1);

	axum::serve(listener, app)
		.await
		.expect("server error");
}
