//! Value validators for form fields
//!
//! Reusable validators that integrate with the field validation pipeline.

use crate::field::{FieldError, FieldResult};
use regex::Regex;
use std::sync::LazyLock;

// Email pattern.
//
// Validates addresses with:
// - A non-empty local part without whitespace or extra '@'
// - A domain of dot-separated labels (no leading/trailing hyphens)
// - A final label of at least two letters
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^[^\s@]+@[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9\-]*[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}$",
	)
	.expect("EMAIL_REGEX: invalid regex pattern")
});

/// Validates that a string value is a plausibly-formed email address.
///
/// The validator checks:
/// - Exactly one `@` separating a non-empty local part from the domain
/// - Domain labels must not start or end with a hyphen
/// - The top-level label must be at least two letters
///
/// # Examples
///
/// ```
/// use formcast::validators::EmailValidator;
///
/// let validator = EmailValidator::new();
/// assert!(validator.validate("a@b.com").is_ok());
/// assert!(validator.validate("alice@mail.example.org").is_ok());
/// assert!(validator.validate("not-an-email").is_err());
/// assert!(validator.validate("two@@example.com").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct EmailValidator {
	/// Optional custom error message shown on validation failure
	message: Option<String>,
}

impl EmailValidator {
	/// Creates a new `EmailValidator` with default settings.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::validators::EmailValidator;
	///
	/// let validator = EmailValidator::new();
	/// assert!(validator.validate("user@example.com").is_ok());
	/// ```
	pub fn new() -> Self {
		Self { message: None }
	}

	/// Sets a custom error message returned on validation failure.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::validators::EmailValidator;
	///
	/// let validator = EmailValidator::new().with_message("Please enter a valid email");
	/// assert!(validator.validate("bad").is_err());
	/// ```
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	/// Validates the given string slice as an email address.
	///
	/// Returns `Ok(())` when the address is valid, or a
	/// [`FieldError::Validation`] containing an error message when it is not.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::validators::EmailValidator;
	///
	/// let validator = EmailValidator::new();
	/// assert!(validator.validate("a@b.co").is_ok());
	/// assert!(validator.validate("@example.com").is_err());
	/// ```
	pub fn validate(&self, value: &str) -> FieldResult<()> {
		if EMAIL_REGEX.is_match(value) {
			Ok(())
		} else {
			let msg = self
				.message
				.as_deref()
				.unwrap_or("Enter a valid email address");
			Err(FieldError::Validation(msg.to_string()))
		}
	}
}

impl Default for EmailValidator {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("a@b.com")]
	#[case("first.last@example.org")]
	#[case("user+tag@mail.example.co")]
	fn test_valid_emails(#[case] email: &str) {
		assert!(EmailValidator::new().validate(email).is_ok());
	}

	#[rstest]
	#[case("")]
	#[case("plain")]
	#[case("@example.com")]
	#[case("user@")]
	#[case("user@@example.com")]
	#[case("user@-bad.com")]
	#[case("user@example")]
	fn test_invalid_emails(#[case] email: &str) {
		assert!(EmailValidator::new().validate(email).is_err());
	}

	#[rstest]
	fn test_custom_message() {
		let validator = EmailValidator::new().with_message("nope");
		let err = validator.validate("bad").unwrap_err();
		assert_eq!(err.to_string(), "nope");
	}
}
