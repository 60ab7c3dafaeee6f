use maud::{html, Markup};
use validator::ValidationErrors;

use super::{byline, date, layout, post_list, post_summary, tag_url, user_url};
use crate::{
	csrf, flash,
	model::{Comment, Post, Sidebar, Tag, User},
	route::{model::Pagination, post::model::CommentForm},
};

pub fn home(posts: &Pagination<Post>, sidebar: &Sidebar, flashes: &[flash::Message]) -> Markup {
	let content = html! {
		@if posts.items.is_empty() {
			p.empty { "No posts on this page." }
		}
		@for post in &posts.items {
			(post_summary(post))
		}
		(pagination(posts))
	};

	layout("Home", flashes, sidebar, content)
}

fn page_url(page: u32) -> String {
	format!("/{page}")
}

fn pagination(posts: &Pagination<Post>) -> Markup {
	html! {
		nav.pagination aria-label="Pages" {
			@if let Some(prev) = posts.prev_num() {
				a.prev href=(page_url(prev)) { "« Newer" }
			}
			@for number in posts.iter_pages() {
				@if let Some(number) = number {
					@if number == posts.page {
						span.current aria-current="page" { (number) }
					} @else {
						a href=(page_url(number)) { (number) }
					}
				} @else {
					span.gap { "…" }
				}
			}
			@if let Some(next) = posts.next_num() {
				a.next href=(page_url(next)) { "Older »" }
			}
		}
	}
}

/// Everything shown on a single post's page.
pub struct PostPage<'a> {
	pub post: &'a Post,
	pub tags: &'a [Tag],
	pub comments: &'a [Comment],
	pub form: &'a CommentForm,
	pub errors: Option<&'a ValidationErrors>,
	pub csrf_token: &'a str,
}

pub fn post(page: &PostPage<'_>, sidebar: &Sidebar, flashes: &[flash::Message]) -> Markup {
	let post = page.post;
	let content = html! {
		article.post {
			h1 { (post.title) }
			(byline(post))
			@if !page.tags.is_empty() {
				ul.tags {
					@for tag in page.tags {
						li { a href=(tag_url(&tag.title)) { (tag.title) } }
					}
				}
			}
			@if let Some(text) = &post.text {
				div.body { (text) }
			}
		}
		section.comments {
			h2 { "Comments (" (page.comments.len()) ")" }
			@for comment in page.comments {
				div.comment {
					p.comment-meta {
						strong { (comment.name) } " on " (date(&comment.date))
					}
					p { (comment.text) }
				}
			}
		}
		(comment_form(page))
	};

	layout(&post.title, flashes, sidebar, content)
}

fn comment_form(page: &PostPage<'_>) -> Markup {
	html! {
		section.new-comment {
			h3 { "New Comment" }
			(field_errors(page.errors, csrf::FIELD_NAME))
			form method="post" action=(super::post_url(page.post.id)) {
				input type="hidden" name=(csrf::FIELD_NAME) value=(page.csrf_token);
				div.field {
					label for="name" { "Name" }
					input #name type="text" name="name" maxlength="255" value=(page.form.name);
					(field_errors(page.errors, "name"))
				}
				div.field {
					label for="text" { "Comment" }
					textarea #text name="text" rows="5" { (page.form.text) }
					(field_errors(page.errors, "text"))
				}
				button type="submit" { "Add Comment" }
			}
		}
	}
}

fn field_errors(errors: Option<&ValidationErrors>, field: &str) -> Markup {
	let messages = errors
		.and_then(|errors| {
			errors.field_errors().get(field).map(|list| {
				list.iter()
					.map(|error| match &error.message {
						Some(message) => message.to_string(),
						None => error.code.to_string(),
					})
					.collect::<Vec<_>>()
			})
		})
		.unwrap_or_default();

	html! {
		@if !messages.is_empty() {
			ul.errors {
				@for message in &messages {
					li { (message) }
				}
			}
		}
	}
}

pub fn posts_by_tag(tag: &Tag, posts: &[Post], sidebar: &Sidebar) -> Markup {
	let title = format!("Posts tagged {}", tag.title);
	let content = html! {
		h1 { "Posts tagged " em { (tag.title) } }
		(post_list(posts))
	};

	layout(&title, &[], sidebar, content)
}

pub fn posts_by_user(user: &User, posts: &[Post], sidebar: &Sidebar) -> Markup {
	let title = format!("Posts by {}", user.username);
	let content = html! {
		h1 { "Posts by " a href=(user_url(&user.username)) { (user.username) } }
		(post_list(posts))
	};

	layout(&title, &[], sidebar, content)
}
