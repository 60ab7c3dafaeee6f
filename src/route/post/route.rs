use axum::{
	extract::State,
	response::{IntoResponse, Redirect, Response},
};
use maud::Markup;
use validator::ValidationErrors;

use crate::{
	csrf::CsrfToken,
	extract::{Form, Path},
	flash::Flash,
	model::Comment,
	query::{self, NewComment},
	view, Database, Error,
};

use super::model::CommentForm;

/// Renders a post with its tags, comments and the comment form.
async fn render(
	database: &Database,
	post_id: i64,
	form: &CommentForm,
	errors: Option<&ValidationErrors>,
	flash: &Flash,
	csrf: &CsrfToken,
) -> Result<Markup, Error> {
	let post = query::find_post(database, post_id)
		.await?
		.ok_or(Error::NotFound)?;

	let tags = query::tags_for_post(database, post_id).await?;
	let comments = query::comments_for_post(database, post_id).await?;
	let sidebar = query::sidebar(database).await?;

	let page = view::PostPage {
		post: &post,
		tags: &tags,
		comments: &comments,
		form,
		errors,
		csrf_token: csrf.token(),
	};

	Ok(view::post(&page, &sidebar, flash.messages()))
}

/// Get single post
/// Returns a post by its id, newest comments first.
pub async fn get_post(
	State(database): State<Database>,
	Path(post_id): Path<i64>,
	flash: Flash,
	csrf: CsrfToken,
) -> Result<impl IntoResponse, Error> {
	let page = render(
		&database,
		post_id,
		&CommentForm::default(),
		None,
		&flash,
		&csrf,
	)
	.await?;

	Ok((flash, csrf, page))
}

/// Create comment
/// Adds a comment to a post, then redirects back to it. An invalid
/// submission is rendered back with its errors instead.
pub async fn create_comment(
	State(database): State<Database>,
	Path(post_id): Path<i64>,
	flash: Flash,
	csrf: CsrfToken,
	Form(form): Form<CommentForm>,
) -> Result<Response, Error> {
	if let Err(errors) = form.check(&csrf) {
		let page = render(&database, post_id, &form, Some(&errors), &flash, &csrf).await?;

		return Ok((flash, csrf, page).into_response());
	}

	if !query::post_exists(&database, post_id).await? {
		return Err(Error::NotFound);
	}

	let flash = match save_comment(&database, post_id, &form).await {
		Ok(comment) => {
			tracing::info!(post_id, comment_id = comment.id, "comment added");
			flash.info("Comment added")
		}
		Err(error) => {
			tracing::error!(post_id, %error, "failed to add comment");
			flash.error(format!("Error adding your comment: {error}"))
		}
	};

	Ok((flash, Redirect::to(&view::post_url(post_id))).into_response())
}

/// Inserts the comment in its own transaction.
///
/// The transaction is rolled back explicitly on failure so the pooled
/// connection goes back clean.
async fn save_comment(
	database: &Database,
	post_id: i64,
	form: &CommentForm,
) -> Result<Comment, sqlx::Error> {
	let mut tx = database.begin().await?;

	let comment = NewComment {
		post_id,
		name: &form.name,
		text: &form.text,
		date: chrono::Utc::now().naive_utc(),
	};

	match query::insert_comment(&mut tx, comment).await {
		Ok(comment) => {
			tx.commit().await?;
			Ok(comment)
		}
		Err(error) => {
			if let Err(rollback) = tx.rollback().await {
				tracing::warn!(%rollback, "failed to roll back comment insert");
			}

			Err(error)
		}
	}
}
