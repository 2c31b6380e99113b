//! Email field for email input

use crate::field::{FieldError, FieldResult, FormField, Widget};
use crate::validators::EmailValidator;

/// Email field validating the address format
#[derive(Debug, Clone)]
pub struct EmailField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Widget,
	pub initial: Option<serde_json::Value>,
	validator: EmailValidator,
}

impl EmailField {
	/// Create a new EmailField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use formcast::fields::EmailField;
	/// use formcast::field::{FormField, Widget};
	///
	/// let field = EmailField::new("email".to_string());
	/// assert_eq!(field.name, "email");
	/// assert!(matches!(field.widget(), Widget::EmailInput));
	/// ```
	pub fn new(name: String) -> Self {
		Self {
			name,
			label: None,
			required: false,
			help_text: None,
			widget: Widget::EmailInput,
			initial: None,
			validator: EmailValidator::new(),
		}
	}

	/// Set the field as required
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Set the label for the field
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Set the help text for the field
	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	/// Set a custom error message for format failures
	///
	/// # Examples
	///
	/// ```
	/// use formcast::fields::EmailField;
	/// use formcast::field::FormField;
	/// use serde_json::json;
	///
	/// let field = EmailField::new("email".to_string()).with_message("Bad address");
	/// let err = field.clean(Some(&json!("nope"))).unwrap_err();
	/// assert_eq!(err.to_string(), "Bad address");
	/// ```
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.validator = EmailValidator::new().with_message(message);
		self
	}
}

impl FormField for EmailField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn help_text(&self) -> Option<&str> {
		self.help_text.as_deref()
	}

	fn widget(&self) -> &Widget {
		&self.widget
	}

	fn initial(&self) -> Option<&serde_json::Value> {
		self.initial.as_ref()
	}

	fn clean(&self, value: Option<&serde_json::Value>) -> FieldResult<serde_json::Value> {
		let str_value = match value {
			Some(v) if !v.is_null() => v
				.as_str()
				.ok_or_else(|| FieldError::Validation("Value must be a string".to_string()))?,
			_ => {
				if self.required {
					return Err(FieldError::Required(self.name.clone()));
				}
				return Ok(serde_json::Value::String(String::new()));
			}
		};

		let trimmed = str_value.trim();
		if trimmed.is_empty() {
			if self.required {
				return Err(FieldError::Required(self.name.clone()));
			}
			return Ok(serde_json::Value::String(String::new()));
		}

		self.validator.validate(trimmed)?;
		Ok(serde_json::Value::String(trimmed.to_string()))
	}
}
