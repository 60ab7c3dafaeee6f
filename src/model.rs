use chrono::NaiveDateTime;

/// A model representing a single user.
///
/// The `password` field is stored but never read by any page.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
	pub id: i64,
	pub username: String,
	#[allow(dead_code)]
	pub password: Option<String>,
}

/// A published post, joined with its author's username.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
	pub id: i64,
	pub title: String,
	pub text: Option<String>,
	/// UTC publish time.
	pub publish_date: NaiveDateTime,
	pub user_id: Option<i64>,
	pub author: Option<String>,
}

/// Length of the body preview shown in post listings.
pub const EXCERPT_LENGTH: usize = 255;

impl Post {
	/// Returns the first [`EXCERPT_LENGTH`] characters of the body,
	/// followed by an ellipsis if anything was cut off.
	pub fn excerpt(&self) -> String {
		let text = self.text.as_deref().unwrap_or_default();

		match text.char_indices().nth(EXCERPT_LENGTH) {
			Some((end, _)) => format!("{}...", text[..end].trim_end()),
			None => text.to_string(),
		}
	}
}

/// A comment left on a post.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
	pub id: i64,
	pub name: String,
	pub text: String,
	/// UTC creation time.
	pub date: NaiveDateTime,
	#[allow(dead_code)]
	pub post_id: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Tag {
	pub id: i64,
	pub title: String,
}

/// A tag paired with the number of posts it is attached to.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TagCount {
	pub id: i64,
	pub title: String,
	pub total: i64,
}

/// Data shown in the sidebar of every page.
#[derive(Debug, Default)]
pub struct Sidebar {
	pub recent: Vec<Post>,
	pub top_tags: Vec<TagCount>,
}

#[cfg(test)]
mod test {
	use chrono::NaiveDate;

	use super::*;

	fn post(text: Option<&str>) -> Post {
		Post {
			id: 1,
			title: "title".into(),
			text: text.map(Into::into),
			publish_date: NaiveDate::from_ymd_opt(2024, 1, 1)
				.unwrap()
				.and_hms_opt(0, 0, 0)
				.unwrap(),
			user_id: None,
			author: None,
		}
	}

	#[test]
	fn test_excerpt_short_text() {
		assert_eq!(post(Some("hello")).excerpt(), "hello");
		assert_eq!(post(None).excerpt(), "");
	}

	#[test]
	fn test_excerpt_truncates() {
		let text = "é".repeat(EXCERPT_LENGTH + 10);
		let excerpt = post(Some(&text)).excerpt();

		assert!(excerpt.ends_with("..."));
		assert_eq!(excerpt.chars().count(), EXCERPT_LENGTH + 3);
	}
}
