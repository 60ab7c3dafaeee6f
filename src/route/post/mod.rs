use axum::{routing::get, Router};

use crate::AppState;

pub mod model;
pub mod route;

pub fn routes() -> Router<AppState> {
	use route::*;

	Router::new().route("/post/:post_id", get(get_post).post(create_comment))
}

#[cfg(test)]
mod test {
	use axum::http::StatusCode;
	use serde_json::json;

	use crate::test::*;

	fn csrf_token(html: &str) -> String {
		let marker = r#"name="csrf_token" value=""#;
		let start = html.find(marker).unwrap() + marker.len();

		html[start..start + html[start..].find('"').unwrap()].to_string()
	}

	#[sqlx::test]
	async fn test_get_post(pool: Database) {
		seed(&pool).await;
		add_comment(&pool, 6, "older comment", at(20)).await;
		add_comment(&pool, 6, "newer comment", at(30)).await;
		let app = app(pool);

		let response = app.get("/post/6").await;
		let html = response.text();

		assert_eq!(response.status_code(), 200);
		assert!(html.contains("<h1>Post 6</h1>"));
		assert!(html.contains("Body of post 6"));
		assert!(html.contains(r#"<a href="/posts_by_user/bob">bob</a>"#));
		assert!(html.contains(r#"<a href="/posts_by_tag/python">python</a>"#));
		assert!(html.contains("Comments (2)"));
		assert!(html.find("newer comment").unwrap() < html.find("older comment").unwrap());
		assert!(html.contains(r#"<form method="post" action="/post/6">"#));
	}

	#[sqlx::test]
	async fn test_get_missing_post(pool: Database) {
		seed(&pool).await;
		let app = app(pool);

		assert_eq!(app.get("/post/999").await.status_code(), 404);
		assert_eq!(app.get("/post/abc").await.status_code(), 404);
	}

	#[sqlx::test]
	async fn test_add_comment(pool: Database) {
		seed(&pool).await;
		let before = chrono::Utc::now().naive_utc();
		let app = app(pool.clone());

		let response = app
			.post("/post/3")
			.form(&json!({ "name": "carol", "text": "Great post!" }))
			.await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert_eq!(response.header("location"), "/post/3");
		assert_eq!(comment_count(&pool, 3).await, 1);

		let date = sqlx::query_scalar::<_, chrono::NaiveDateTime>(
			"SELECT date FROM comment WHERE post_id = 3",
		)
		.fetch_one(&pool)
		.await
		.unwrap();

		assert!(date >= before);

		// the notice is shown once, after the redirect
		let html = app.get("/post/3").await.text();

		assert!(html.contains("Comment added"));
		assert!(html.contains("Great post!"));
		assert!(!app.get("/post/3").await.text().contains("Comment added"));
	}

	#[sqlx::test]
	async fn test_invalid_comment_is_rendered_back(pool: Database) {
		seed(&pool).await;
		let app = app(pool.clone());

		let response = app
			.post("/post/3")
			.form(&json!({ "name": "", "text": "no name given" }))
			.await;

		assert_eq!(response.status_code(), 200);
		assert!(response.text().contains("This field is required."));
		// the submitted text is kept
		assert!(response.text().contains("no name given"));
		assert_eq!(comment_count(&pool, 3).await, 0);

		let response = app
			.post("/post/3")
			.form(&json!({ "name": "carol" }))
			.await;

		assert_eq!(response.status_code(), 200);
		assert!(response.text().contains("This field is required."));
		assert_eq!(comment_count(&pool, 3).await, 0);
	}

	#[sqlx::test]
	async fn test_name_too_long(pool: Database) {
		seed(&pool).await;
		let app = app(pool.clone());

		let response = app
			.post("/post/3")
			.form(&json!({ "name": "a".repeat(256), "text": "hello" }))
			.await;

		assert_eq!(response.status_code(), 200);
		assert!(response
			.text()
			.contains("Field cannot be longer than 255 characters."));
		assert_eq!(comment_count(&pool, 3).await, 0);
	}

	#[sqlx::test]
	async fn test_comment_on_missing_post(pool: Database) {
		seed(&pool).await;
		let app = app(pool.clone());

		let response = app
			.post("/post/999")
			.form(&json!({ "name": "carol", "text": "hello?" }))
			.await;

		assert_eq!(response.status_code(), 404);

		let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comment")
			.fetch_one(&pool)
			.await
			.unwrap();

		assert_eq!(total, 0);
	}

	#[sqlx::test]
	async fn test_failed_insert_is_reported(pool: Database) {
		seed(&pool).await;
		sqlx::query(
			r#"
				CREATE TRIGGER comments_closed BEFORE INSERT ON comment
				BEGIN
					SELECT RAISE(ABORT, 'comments are closed');
				END
			"#,
		)
		.execute(&pool)
		.await
		.unwrap();

		let app = app(pool.clone());

		let response = app
			.post("/post/3")
			.form(&json!({ "name": "carol", "text": "hello" }))
			.await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert_eq!(comment_count(&pool, 3).await, 0);

		let html = app.get("/post/3").await.text();

		assert!(html.contains("Error adding your comment"));
		assert!(html.contains("comments are closed"));
		assert!(html.contains(r#"class="flash flash-error""#));
	}

	#[sqlx::test]
	async fn test_csrf_token_required(pool: Database) {
		seed(&pool).await;
		let app = app_with(pool.clone(), Config::default());

		// no token at all
		let response = app
			.post("/post/3")
			.form(&json!({ "name": "carol", "text": "hello" }))
			.await;

		assert_eq!(response.status_code(), 200);
		assert!(response
			.text()
			.contains("The CSRF token is missing or invalid."));
		assert_eq!(comment_count(&pool, 3).await, 0);

		// the token from the rendered form is accepted
		let token = csrf_token(&app.get("/post/3").await.text());

		let response = app
			.post("/post/3")
			.form(&json!({ "name": "carol", "text": "hello", "csrf_token": token }))
			.await;

		assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
		assert_eq!(comment_count(&pool, 3).await, 1);

		// a wrong token is not
		let response = app
			.post("/post/3")
			.form(&json!({ "name": "carol", "text": "again", "csrf_token": "nope" }))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(comment_count(&pool, 3).await, 1);
	}
}
