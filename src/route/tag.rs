use axum::extract::State;
use maud::Markup;

use crate::{extract::Path, query, view, Database, Error};

/// Returns every post with the given tag, newest first.
pub async fn posts_by_tag(
	State(database): State<Database>,
	Path(tag_name): Path<String>,
) -> Result<Markup, Error> {
	let tag = query::find_tag_by_title(&database, &tag_name)
		.await?
		.ok_or(Error::NotFound)?;

	let posts = query::posts_for_tag(&database, tag.id).await?;
	let sidebar = query::sidebar(&database).await?;

	Ok(view::posts_by_tag(&tag, &posts, &sidebar))
}
