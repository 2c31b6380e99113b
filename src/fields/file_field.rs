//! File field for file upload

use crate::field::{FieldError, FieldResult, FormField, Widget};

/// FileField for file upload.
///
/// The bound value is the JSON object form of
/// [`crate::form_data::UploadedFile`]: `{"filename", "content_type", "size"}`.
/// The file is treated as an opaque handle; no content inspection happens
/// here.
#[derive(Debug, Clone)]
pub struct FileField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Widget,
	pub initial: Option<serde_json::Value>,
	pub max_filename_length: Option<usize>,
	pub allow_empty_file: bool,
}

impl FileField {
	/// Create a new FileField
	///
	/// # Examples
	///
	/// ```
	/// use formcast::fields::FileField;
	///
	/// let field = FileField::new("avatar".to_string());
	/// assert_eq!(field.name, "avatar");
	/// assert!(field.required);
	/// ```
	pub fn new(name: String) -> Self {
		Self {
			name,
			label: None,
			required: true,
			help_text: None,
			widget: Widget::FileInput,
			initial: None,
			max_filename_length: None,
			allow_empty_file: false,
		}
	}

	/// Mark the field as optional
	pub fn optional(mut self) -> Self {
		self.required = false;
		self
	}

	/// Set the label for the field
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Set the maximum accepted filename length
	pub fn with_max_filename_length(mut self, max: usize) -> Self {
		self.max_filename_length = Some(max);
		self
	}

	/// Accept zero-byte files
	///
	/// # Examples
	///
	/// ```
	/// use formcast::fields::FileField;
	/// use formcast::field::FormField;
	/// use serde_json::json;
	///
	/// let field = FileField::new("avatar".to_string()).allow_empty();
	/// let file = json!({"filename": "a.png", "size": 0});
	/// assert!(field.clean(Some(&file)).is_ok());
	/// ```
	pub fn allow_empty(mut self) -> Self {
		self.allow_empty_file = true;
		self
	}
}

impl FormField for FileField {
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
		match value {
			None if self.required => Err(FieldError::Required(self.name.clone())),
			None => Ok(serde_json::Value::Null),
			Some(v) => {
				// Expect the UploadedFile object form
				let obj = v
					.as_object()
					.ok_or_else(|| FieldError::Invalid("Expected a file".to_string()))?;

				let filename = obj
					.get("filename")
					.and_then(|f| f.as_str())
					.ok_or_else(|| FieldError::Invalid("Missing filename".to_string()))?;

				if filename.is_empty() {
					if self.required {
						return Err(FieldError::Required(self.name.clone()));
					}
					return Ok(serde_json::Value::Null);
				}

				if let Some(max) = self.max_filename_length
					&& filename.chars().count() > max
				{
					return Err(FieldError::Validation(format!(
						"Filename is too long (max {} characters)",
						max
					)));
				}

				if !self.allow_empty_file
					&& let Some(size) = obj.get("size").and_then(|s| s.as_u64())
					&& size == 0
				{
					return Err(FieldError::Validation(
						"The submitted file is empty".to_string(),
					));
				}

				Ok(v.clone())
			}
		}
	}
}
