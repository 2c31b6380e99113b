//! Field abstractions shared by all concrete field types

use std::fmt;

/// Errors produced by individual field validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
	#[error("The field '{0}' is required")]
	Required(String),
	#[error("Invalid value: {0}")]
	Invalid(String),
	#[error("{0}")]
	Validation(String),
}

impl FieldError {
	/// Build a `Required` error, falling back to a generic field name.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::field::FieldError;
	///
	/// let err = FieldError::required(Some("username"));
	/// assert_eq!(err.to_string(), "The field 'username' is required");
	/// ```
	pub fn required(name: Option<&str>) -> Self {
		Self::Required(name.unwrap_or("field").to_string())
	}
}

pub type FieldResult<T> = Result<T, FieldError>;

/// How many values a field accepts per submission.
///
/// This is the explicit capability query the coercion routine consults to
/// decide between taking the first submitted value and taking all of them.
/// Fields declare it directly instead of the caller inspecting the shape of
/// their cleaned output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
	/// One scalar value (string or file); extra submissions are ignored
	Single,
	/// A sequence of values collected from every entry sharing the name
	Multi,
}

/// HTML widget used to render a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
	TextInput,
	EmailInput,
	PasswordInput,
	FileInput,
	/// Radio buttons, one per choice, all sharing the field name
	RadioSelect,
}

impl Widget {
	/// The `type` attribute for scalar `<input>` widgets.
	///
	/// `RadioSelect` renders one input per choice and is handled by
	/// [`crate::bound_field::BoundField`] instead.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::field::Widget;
	///
	/// assert_eq!(Widget::TextInput.input_type(), "text");
	/// assert_eq!(Widget::PasswordInput.input_type(), "password");
	/// assert_eq!(Widget::RadioSelect.input_type(), "radio");
	/// ```
	pub fn input_type(&self) -> &'static str {
		match self {
			Widget::TextInput => "text",
			Widget::EmailInput => "email",
			Widget::PasswordInput => "password",
			Widget::FileInput => "file",
			Widget::RadioSelect => "radio",
		}
	}
}

impl fmt::Display for Widget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.input_type())
	}
}

/// Escape a string for use inside an HTML attribute value.
///
/// # Examples
///
/// ```
/// use formcast::field::escape_attribute;
///
/// assert_eq!(escape_attribute("a\"b"), "a&quot;b");
/// assert_eq!(escape_attribute("<x>"), "&lt;x&gt;");
/// ```
pub fn escape_attribute(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#x27;"),
			_ => out.push(c),
		}
	}
	out
}

/// Common interface for form fields
///
/// A field carries its declaration (name, label, widget, requiredness) and
/// knows how to clean a bound JSON value into its validated form. The
/// [`ValueKind`] returned by `value_kind` drives the single/multi-value
/// branch of the coercion routine.
pub trait FormField: Send + Sync {
	fn name(&self) -> &str;

	fn label(&self) -> Option<&str>;

	fn required(&self) -> bool;

	fn help_text(&self) -> Option<&str>;

	fn widget(&self) -> &Widget;

	fn initial(&self) -> Option<&serde_json::Value>;

	/// How many values this field accepts per submission
	fn value_kind(&self) -> ValueKind {
		ValueKind::Single
	}

	/// Choices for choice-based widgets, as `(value, label)` pairs
	fn choices(&self) -> &[(String, String)] {
		&[]
	}

	/// Validate and normalize a bound value.
	///
	/// `None` means the field was absent from the submission.
	fn clean(&self, value: Option<&serde_json::Value>) -> FieldResult<serde_json::Value>;
}
