use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
	compression::CompressionLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};

use crate::{AppState, Error};

pub mod home;
pub mod model;
pub mod post;
pub mod tag;
pub mod user;

pub fn routes() -> Router<AppState> {
	Router::new()
		.route("/", get(home::home))
		.route("/:page", get(home::home_page))
		.merge(post::routes())
		.route("/posts_by_tag/:tag_name", get(tag::posts_by_tag))
		.route("/posts_by_user/:username", get(user::posts_by_user))
		.fallback(not_found)
}

/// Builds the full application with its middleware stack.
pub fn app(state: AppState) -> Router {
	routes()
		.layer(
			ServiceBuilder::new()
				.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
				.layer(TraceLayer::new_for_http())
				.layer(PropagateRequestIdLayer::x_request_id())
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

async fn not_found() -> Error {
	Error::NotFound
}
