use std::sync::Arc;

use axum::extract::State;
use maud::Markup;

use crate::{
	extract::Path, flash::Flash, query, route::model::Paginate, view, Config, Database, Error,
};

async fn render(
	database: &Database,
	config: &Config,
	page: u32,
	flash: &Flash,
) -> Result<Markup, Error> {
	let paginate = Paginate::new(page, config.posts_per_page);
	let posts = query::paginate_posts(database, paginate).await?;
	let sidebar = query::sidebar(database).await?;

	Ok(view::home(&posts, &sidebar, flash.messages()))
}

/// Returns the first page of posts, newest first.
pub async fn home(
	State(database): State<Database>,
	State(config): State<Arc<Config>>,
	flash: Flash,
) -> Result<(Flash, Markup), Error> {
	let page = render(&database, &config, 1, &flash).await?;

	Ok((flash, page))
}

/// Returns a page of posts, newest first. A page past the end is empty.
pub async fn home_page(
	State(database): State<Database>,
	State(config): State<Arc<Config>>,
	Path(page): Path<u32>,
	flash: Flash,
) -> Result<(Flash, Markup), Error> {
	let page = render(&database, &config, page, &flash).await?;

	Ok((flash, page))
}

#[cfg(test)]
mod test {
	use crate::test::*;

	fn titles(html: &str) -> Vec<u32> {
		html.match_indices("<h2><a href=\"/post/")
			.map(|(index, _)| {
				let rest = &html[index + "<h2><a href=\"/post/".len()..];
				rest[..rest.find('"').unwrap()].parse().unwrap()
			})
			.collect()
	}

	#[sqlx::test]
	async fn test_first_page(pool: Database) {
		seed(&pool).await;
		let app = app(pool);

		let response = app.get("/").await;

		assert_eq!(response.status_code(), 200);

		// newest first, capped at the page size
		let ids = titles(&response.text());
		assert_eq!(ids, (3..=12).rev().collect::<Vec<_>>());
		assert!(response.text().contains("Older »"));
	}

	#[sqlx::test]
	async fn test_second_page(pool: Database) {
		seed(&pool).await;
		let app = app(pool);

		let response = app.get("/2").await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(titles(&response.text()), [2, 1]);
		assert!(response.text().contains("« Newer"));
	}

	#[sqlx::test]
	async fn test_page_past_end_is_empty(pool: Database) {
		seed(&pool).await;
		let app = app(pool);

		let response = app.get("/9").await;

		assert_eq!(response.status_code(), 200);
		assert!(titles(&response.text()).is_empty());
		assert!(response.text().contains("No posts on this page."));
	}

	#[sqlx::test]
	async fn test_page_zero_is_first_page(pool: Database) {
		seed(&pool).await;
		let app = app(pool);

		let zero = app.get("/0").await;
		let one = app.get("/1").await;

		assert_eq!(zero.status_code(), 200);
		assert_eq!(titles(&zero.text()), titles(&one.text()));
	}

	#[sqlx::test]
	async fn test_non_integer_page(pool: Database) {
		let app = app(pool);

		assert_eq!(app.get("/abc").await.status_code(), 404);
		assert_eq!(app.get("/-1").await.status_code(), 404);
	}

	#[sqlx::test]
	async fn test_page_size_is_configurable(pool: Database) {
		seed(&pool).await;
		let app = app_with(
			pool,
			Config {
				posts_per_page: 5,
				..test_config()
			},
		);

		let response = app.get("/").await;

		assert_eq!(titles(&response.text()), [12, 11, 10, 9, 8]);
	}

	#[sqlx::test]
	async fn test_sidebar(pool: Database) {
		seed(&pool).await;
		let app = app(pool);

		let html = app.get("/").await.text();

		assert!(html.contains("Recent Posts"));
		assert!(html.contains(r#"<a href="/posts_by_tag/rust">rust</a> (6)"#));
		assert!(html.contains(r#"<a href="/posts_by_tag/python">python</a> (4)"#));
		assert!(!html.contains("/posts_by_tag/empty"));
	}

	#[sqlx::test]
	async fn test_empty_blog(pool: Database) {
		let app = app(pool);

		let response = app.get("/").await;

		assert_eq!(response.status_code(), 200);
		assert!(titles(&response.text()).is_empty());
	}
}
