use axum::extract::State;
use maud::Markup;

use crate::{extract::Path, query, view, Database, Error};

/// Returns every post written by the given user, newest first.
pub async fn posts_by_user(
	State(database): State<Database>,
	Path(username): Path<String>,
) -> Result<Markup, Error> {
	let user = query::find_user_by_username(&database, &username)
		.await?
		.ok_or(Error::NotFound)?;

	let posts = query::posts_for_user(&database, user.id).await?;
	let sidebar = query::sidebar(&database).await?;

	Ok(view::posts_by_user(&user, &posts, &sidebar))
}
