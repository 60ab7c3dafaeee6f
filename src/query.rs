//! Explicit queries for every page.
//!
//! Timestamp orderings fall back to `id DESC` so ties come out in a
//! stable order.

use sqlx::SqliteConnection;

use crate::{
	model::{Comment, Post, Sidebar, Tag, TagCount, User},
	route::model::{Paginate, Pagination},
	Database,
};

/// Number of entries in each sidebar list.
pub const SIDEBAR_LIMIT: i64 = 5;

const SELECT_POST: &str = r#"
	SELECT post.id, post.title, post.text, post.publish_date, post.user_id,
		"user".username AS author
	FROM post
	LEFT JOIN "user" ON "user".id = post.user_id
"#;

/// Returns the most recently published posts, newest first.
pub async fn recent_posts(database: &Database, limit: i64) -> Result<Vec<Post>, sqlx::Error> {
	sqlx::query_as::<_, Post>(&format!(
		"{SELECT_POST} ORDER BY post.publish_date DESC, post.id DESC LIMIT ?"
	))
	.bind(limit)
	.fetch_all(database)
	.await
}

/// Returns the tags attached to the most posts, paired with their post
/// count and ordered by that count. Tags without posts are left out.
pub async fn top_tags(database: &Database, limit: i64) -> Result<Vec<TagCount>, sqlx::Error> {
	sqlx::query_as::<_, TagCount>(
		r#"
			SELECT tag.id, tag.title, COUNT(post_tags.post_id) AS total
			FROM tag
			JOIN post_tags ON post_tags.tag_id = tag.id
			GROUP BY tag.id, tag.title
			ORDER BY total DESC, tag.id
			LIMIT ?
		"#,
	)
	.bind(limit)
	.fetch_all(database)
	.await
}

pub async fn sidebar(database: &Database) -> Result<Sidebar, sqlx::Error> {
	Ok(Sidebar {
		recent: recent_posts(database, SIDEBAR_LIMIT).await?,
		top_tags: top_tags(database, SIDEBAR_LIMIT).await?,
	})
}

/// Returns one page of posts, newest first.
pub async fn paginate_posts(
	database: &Database,
	paginate: Paginate,
) -> Result<Pagination<Post>, sqlx::Error> {
	let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post")
		.fetch_one(database)
		.await?;

	let items = sqlx::query_as::<_, Post>(&format!(
		"{SELECT_POST} ORDER BY post.publish_date DESC, post.id DESC LIMIT ? OFFSET ?"
	))
	.bind(paginate.limit())
	.bind(paginate.offset())
	.fetch_all(database)
	.await?;

	Ok(Pagination {
		items,
		page: paginate.page,
		per_page: paginate.size,
		total,
	})
}

pub async fn find_post(database: &Database, id: i64) -> Result<Option<Post>, sqlx::Error> {
	sqlx::query_as::<_, Post>(&format!("{SELECT_POST} WHERE post.id = ?"))
		.bind(id)
		.fetch_optional(database)
		.await
}

pub async fn post_exists(database: &Database, id: i64) -> Result<bool, sqlx::Error> {
	let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post WHERE id = ?")
		.bind(id)
		.fetch_one(database)
		.await?;

	Ok(count > 0)
}

pub async fn tags_for_post(database: &Database, post_id: i64) -> Result<Vec<Tag>, sqlx::Error> {
	sqlx::query_as::<_, Tag>(
		r#"
			SELECT tag.id, tag.title
			FROM tag
			JOIN post_tags ON post_tags.tag_id = tag.id
			WHERE post_tags.post_id = ?
			ORDER BY tag.title
		"#,
	)
	.bind(post_id)
	.fetch_all(database)
	.await
}

/// Returns the comments on a post, newest first.
pub async fn comments_for_post(
	database: &Database,
	post_id: i64,
) -> Result<Vec<Comment>, sqlx::Error> {
	sqlx::query_as::<_, Comment>(
		r#"
			SELECT id, name, text, date, post_id
			FROM comment
			WHERE post_id = ?
			ORDER BY date DESC, id DESC
		"#,
	)
	.bind(post_id)
	.fetch_all(database)
	.await
}

pub async fn find_tag_by_title(database: &Database, title: &str) -> Result<Option<Tag>, sqlx::Error> {
	sqlx::query_as::<_, Tag>("SELECT id, title FROM tag WHERE title = ?")
		.bind(title)
		.fetch_optional(database)
		.await
}

/// Returns every post attached to a tag, newest first.
pub async fn posts_for_tag(database: &Database, tag_id: i64) -> Result<Vec<Post>, sqlx::Error> {
	sqlx::query_as::<_, Post>(&format!(
		r#"
			{SELECT_POST}
			JOIN post_tags ON post_tags.post_id = post.id
			WHERE post_tags.tag_id = ?
			ORDER BY post.publish_date DESC, post.id DESC
		"#
	))
	.bind(tag_id)
	.fetch_all(database)
	.await
}

pub async fn find_user_by_username(
	database: &Database,
	username: &str,
) -> Result<Option<User>, sqlx::Error> {
	sqlx::query_as::<_, User>(r#"SELECT id, username, password FROM "user" WHERE username = ?"#)
		.bind(username)
		.fetch_optional(database)
		.await
}

/// Returns every post owned by a user, newest first.
pub async fn posts_for_user(database: &Database, user_id: i64) -> Result<Vec<Post>, sqlx::Error> {
	sqlx::query_as::<_, Post>(&format!(
		"{SELECT_POST} WHERE post.user_id = ? ORDER BY post.publish_date DESC, post.id DESC"
	))
	.bind(user_id)
	.fetch_all(database)
	.await
}

/// Fields of a comment that is about to be inserted.
#[derive(Debug)]
pub struct NewComment<'a> {
	pub post_id: i64,
	pub name: &'a str,
	pub text: &'a str,
	pub date: chrono::NaiveDateTime,
}

/// Inserts a comment on the given connection, usually inside a transaction.
pub async fn insert_comment(
	connection: &mut SqliteConnection,
	comment: NewComment<'_>,
) -> Result<Comment, sqlx::Error> {
	sqlx::query_as::<_, Comment>(
		r#"
			INSERT INTO comment (name, text, date, post_id)
			VALUES (?, ?, ?, ?)
			RETURNING id, name, text, date, post_id
		"#,
	)
	.bind(comment.name)
	.bind(comment.text)
	.bind(comment.date)
	.bind(comment.post_id)
	.fetch_one(connection)
	.await
}
