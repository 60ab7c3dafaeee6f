//! Server-rendered HTML.
//!
//! All dynamic content is escaped by maud.

mod page;

pub use page::{home, post, posts_by_tag, posts_by_user, PostPage};

use axum::http::StatusCode;
use chrono::NaiveDateTime;
use maud::{html, Markup, DOCTYPE};

use crate::{
	flash,
	model::{Post, Sidebar},
};

pub const SITE_TITLE: &str = "Blog";

pub fn post_url(id: i64) -> String {
	format!("/post/{id}")
}

pub fn tag_url(title: &str) -> String {
	format!("/posts_by_tag/{}", urlencoding::encode(title))
}

pub fn user_url(username: &str) -> String {
	format!("/posts_by_user/{}", urlencoding::encode(username))
}

fn date(value: &NaiveDateTime) -> Markup {
	html! {
		time datetime=(value.format("%Y-%m-%dT%H:%M:%SZ").to_string()) {
			(value.format("%B %-d, %Y %H:%M").to_string())
		}
	}
}

/// Wraps page content in the shared document, notices and sidebar.
fn layout(title: &str, flashes: &[flash::Message], sidebar: &Sidebar, content: Markup) -> Markup {
	html! {
		(DOCTYPE)
		html lang="en" {
			head {
				meta charset="utf-8";
				meta name="viewport" content="width=device-width, initial-scale=1";
				title { (title) " | " (SITE_TITLE) }
			}
			body {
				header {
					h1 { a href="/" { (SITE_TITLE) } }
				}
				@for message in flashes {
					div class={ "flash flash-" (message.level.as_str()) } role="alert" {
						(message.message)
					}
				}
				div.container {
					main { (content) }
					aside.sidebar { (sidebar_panel(sidebar)) }
				}
			}
		}
	}
}

fn sidebar_panel(sidebar: &Sidebar) -> Markup {
	html! {
		section.recent {
			h3 { "Recent Posts" }
			ul {
				@for post in &sidebar.recent {
					li { a href=(post_url(post.id)) { (post.title) } }
				}
			}
		}
		section.top-tags {
			h3 { "Popular Tags" }
			ul {
				@for tag in &sidebar.top_tags {
					li {
						a href=(tag_url(&tag.title)) { (tag.title) }
						" (" (tag.total) ")"
					}
				}
			}
		}
	}
}

/// Title, byline and excerpt of a post in a listing.
fn post_summary(post: &Post) -> Markup {
	html! {
		article.post-summary {
			h2 { a href=(post_url(post.id)) { (post.title) } }
			(byline(post))
			p.excerpt { (post.excerpt()) }
			a.read-more href=(post_url(post.id)) { "Read more" }
		}
	}
}

fn byline(post: &Post) -> Markup {
	html! {
		p.byline {
			"Posted "
			@if let Some(author) = &post.author {
				"by " a href=(user_url(author)) { (author) } " "
			}
			"on " (date(&post.publish_date))
		}
	}
}

fn post_list(posts: &[Post]) -> Markup {
	html! {
		@if posts.is_empty() {
			p.empty { "No posts yet." }
		}
		@for post in posts {
			(post_summary(post))
		}
	}
}

/// A bare page for error responses.
///
/// Rendered without the sidebar, since the database may be what failed.
pub fn error_page(status: StatusCode) -> Markup {
	let reason = status.canonical_reason().unwrap_or("Error");
	let detail = match status {
		StatusCode::NOT_FOUND => "The page you are looking for does not exist.",
		StatusCode::BAD_REQUEST => "The request could not be understood.",
		_ => "Something went wrong. Please try again later.",
	};

	html! {
		(DOCTYPE)
		html lang="en" {
			head {
				meta charset="utf-8";
				title { (reason) " | " (SITE_TITLE) }
			}
			body {
				h1 { (status.as_u16()) " " (reason) }
				p { (detail) }
				p { a href="/" { "Back to the front page" } }
			}
		}
	}
}
