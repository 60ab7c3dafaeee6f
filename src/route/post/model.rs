use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::csrf::{self, CsrfToken};

fn not_blank(value: &str) -> Result<(), ValidationError> {
	if value.trim().is_empty() {
		let mut error = ValidationError::new("required");
		error.message = Some(Cow::Borrowed("This field is required."));

		return Err(error);
	}

	Ok(())
}

/// A comment submitted through the form on a post's page.
///
/// Missing fields deserialize as empty strings so that they are reported
/// as validation errors instead of rejecting the request.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CommentForm {
	#[serde(default)]
	#[validate(
		custom(function = "not_blank"),
		length(max = 255, message = "Field cannot be longer than 255 characters.")
	)]
	pub name: String,
	#[serde(default)]
	#[validate(custom(function = "not_blank"))]
	pub text: String,
	#[serde(default)]
	pub csrf_token: String,
}

impl CommentForm {
	/// Validates the fields and the anti-forgery token together.
	pub fn check(&self, csrf: &CsrfToken) -> Result<(), ValidationErrors> {
		let mut errors = match self.validate() {
			Ok(()) => ValidationErrors::new(),
			Err(errors) => errors,
		};

		if !csrf.verify(&self.csrf_token) {
			let mut error = ValidationError::new("csrf");
			error.message = Some(Cow::Borrowed("The CSRF token is missing or invalid."));

			errors.add(csrf::FIELD_NAME, error);
		}

		if errors.is_empty() {
			Ok(())
		} else {
			Err(errors)
		}
	}
}
