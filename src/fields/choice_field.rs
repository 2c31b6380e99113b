//! Choice fields backed by a fixed set of allowed values

use crate::field::{FieldError, FieldResult, FormField, ValueKind, Widget};

/// A multi-value field accepting any subset of its declared choices.
///
/// The bound value is a JSON array of strings collected from every
/// submission entry sharing the field name. An absent field binds to an
/// empty array, which is valid unless the field is `required`.
#[derive(Debug, Clone)]
pub struct MultipleChoiceField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Widget,
	pub initial: Option<serde_json::Value>,
	choices: Vec<(String, String)>,
}

impl MultipleChoiceField {
	/// Create a new MultipleChoiceField with no choices
	///
	/// # Examples
	///
	/// ```
	/// use formcast::fields::MultipleChoiceField;
	/// use formcast::field::{FormField, ValueKind};
	///
	/// let field = MultipleChoiceField::new("preferences".to_string());
	/// assert_eq!(field.value_kind(), ValueKind::Multi);
	/// assert!(field.choices().is_empty());
	/// ```
	pub fn new(name: String) -> Self {
		Self {
			name,
			label: None,
			required: false,
			help_text: None,
			widget: Widget::RadioSelect,
			initial: None,
			choices: vec![],
		}
	}

	/// Require at least one selected value
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Set the label for the field
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Add a single `(value, label)` choice
	///
	/// # Examples
	///
	/// ```
	/// use formcast::fields::MultipleChoiceField;
	/// use formcast::field::FormField;
	///
	/// let field = MultipleChoiceField::new("preferences".to_string())
	///     .with_choice("theme.dark", "Dark");
	/// assert_eq!(field.choices().len(), 1);
	/// ```
	pub fn with_choice(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
		self.choices.push((value.into(), label.into()));
		self
	}

	/// Replace all choices at once
	pub fn with_choices(mut self, choices: Vec<(String, String)>) -> Self {
		self.choices = choices;
		self
	}

	fn is_valid_choice(&self, value: &str) -> bool {
		self.choices.iter().any(|(v, _)| v == value)
	}
}

impl FormField for MultipleChoiceField {
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

	fn value_kind(&self) -> ValueKind {
		ValueKind::Multi
	}

	fn choices(&self) -> &[(String, String)] {
		&self.choices
	}

	fn clean(&self, value: Option<&serde_json::Value>) -> FieldResult<serde_json::Value> {
		let items: Vec<&serde_json::Value> = match value {
			None => vec![],
			Some(v) if v.is_null() => vec![],
			Some(v) => v
				.as_array()
				.ok_or_else(|| {
					FieldError::Validation("Value must be a list of choices".to_string())
				})?
				.iter()
				.collect(),
		};

		if items.is_empty() {
			if self.required {
				return Err(FieldError::Required(self.name.clone()));
			}
			return Ok(serde_json::Value::Array(vec![]));
		}

		let mut selected = Vec::with_capacity(items.len());
		for item in items {
			let choice = item.as_str().ok_or_else(|| {
				FieldError::Validation("Choices must be strings".to_string())
			})?;
			if !self.is_valid_choice(choice) {
				return Err(FieldError::Validation(format!(
					"'{}' is not one of the available choices",
					choice
				)));
			}
			selected.push(serde_json::Value::String(choice.to_string()));
		}

		Ok(serde_json::Value::Array(selected))
	}
}
