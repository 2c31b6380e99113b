use crate::field::{FormField, Widget, escape_attribute};

/// BoundField represents a field bound to form data
pub struct BoundField<'a> {
	field: &'a dyn FormField,
	data: Option<&'a serde_json::Value>,
	errors: &'a [String],
	prefix: &'a str,
}

impl<'a> BoundField<'a> {
	/// Join a field with its bound value and errors.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::{BoundField, CharField, FormField};
	///
	/// let field: Box<dyn FormField> = Box::new(CharField::new("name".to_string()));
	/// let data = serde_json::json!("John");
	///
	/// let bound = BoundField::new(field.as_ref(), Some(&data), &[], "");
	/// assert_eq!(bound.name(), "name");
	/// assert_eq!(bound.value(), Some(&data));
	/// ```
	pub fn new(
		field: &'a dyn FormField,
		data: Option<&'a serde_json::Value>,
		errors: &'a [String],
		prefix: &'a str,
	) -> Self {
		Self {
			field,
			data,
			errors,
			prefix,
		}
	}

	pub fn name(&self) -> &str {
		self.field.name()
	}

	/// The HTML name attribute (with prefix)
	///
	/// # Examples
	///
	/// ```
	/// use formcast::{BoundField, CharField, FormField};
	///
	/// let field: Box<dyn FormField> = Box::new(CharField::new("email".to_string()));
	///
	/// let bound = BoundField::new(field.as_ref(), None, &[], "");
	/// assert_eq!(bound.html_name(), "email");
	///
	/// let prefixed = BoundField::new(field.as_ref(), None, &[], "user");
	/// assert_eq!(prefixed.html_name(), "user-email");
	/// ```
	pub fn html_name(&self) -> String {
		if self.prefix.is_empty() {
			self.field.name().to_string()
		} else {
			format!("{}-{}", self.prefix, self.field.name())
		}
	}

	/// The HTML id attribute
	///
	/// # Examples
	///
	/// ```
	/// use formcast::{BoundField, CharField, FormField};
	///
	/// let field: Box<dyn FormField> = Box::new(CharField::new("username".to_string()));
	/// let bound = BoundField::new(field.as_ref(), None, &[], "profile");
	///
	/// assert_eq!(bound.id_for_label(), "id_profile-username");
	/// ```
	pub fn id_for_label(&self) -> String {
		format!("id_{}", self.html_name())
	}

	pub fn label(&self) -> Option<&str> {
		self.field.label()
	}

	/// The bound value, falling back to the field's initial value
	pub fn value(&self) -> Option<&serde_json::Value> {
		self.data.or_else(|| self.field.initial())
	}

	pub fn errors(&self) -> &[String] {
		self.errors
	}

	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	pub fn widget(&self) -> &Widget {
		self.field.widget()
	}

	pub fn help_text(&self) -> Option<&str> {
		self.field.help_text()
	}

	pub fn is_required(&self) -> bool {
		self.field.required()
	}

	/// Render the field as HTML: a `<label>` followed by its widget.
	///
	/// Radio widgets render one `<input type="radio">` per declared choice;
	/// every other widget renders a single `<input>`. All attribute values
	/// are escaped.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::{BoundField, CharField, FormField};
	///
	/// let field: Box<dyn FormField> =
	///     Box::new(CharField::new("username".to_string()).with_label("Username"));
	/// let bound = BoundField::new(field.as_ref(), None, &[], "");
	///
	/// let html = bound.render();
	/// assert!(html.contains("<label for=\"id_username\">Username</label>"));
	/// assert!(html.contains("type=\"text\""));
	/// ```
	pub fn render(&self) -> String {
		match self.widget() {
			Widget::RadioSelect => self.render_radio_group(),
			_ => {
				let mut html = String::new();
				if let Some(label) = self.label() {
					html.push_str(&format!(
						"<label for=\"{}\">{}</label>",
						escape_attribute(&self.id_for_label()),
						escape_attribute(label)
					));
				}
				html.push_str(&self.render_input());
				html
			}
		}
	}

	fn render_input(&self) -> String {
		let mut attrs = format!(
			"type=\"{}\" name=\"{}\" id=\"{}\"",
			self.widget().input_type(),
			escape_attribute(&self.html_name()),
			escape_attribute(&self.id_for_label())
		);

		// File and password inputs never echo a value back
		if !matches!(self.widget(), Widget::FileInput | Widget::PasswordInput)
			&& let Some(value) = self.value().and_then(|v| v.as_str())
		{
			attrs.push_str(&format!(" value=\"{}\"", escape_attribute(value)));
		}

		if self.is_required() {
			attrs.push_str(" required");
		}

		format!("<input {} />", attrs)
	}

	fn render_radio_group(&self) -> String {
		let selected: Vec<&str> = self
			.value()
			.and_then(|v| v.as_array())
			.map(|items| items.iter().filter_map(|i| i.as_str()).collect())
			.unwrap_or_default();

		let mut html = String::new();
		for (index, (value, label)) in self.field.choices().iter().enumerate() {
			let id = format!("{}_{}", self.id_for_label(), index);
			let mut attrs = format!(
				"type=\"radio\" name=\"{}\" id=\"{}\" value=\"{}\"",
				escape_attribute(&self.html_name()),
				escape_attribute(&id),
				escape_attribute(value)
			);
			if selected.contains(&value.as_str()) {
				attrs.push_str(" checked");
			}
			html.push_str(&format!(
				"<label for=\"{}\"><input {} />{}</label>",
				escape_attribute(&id),
				attrs,
				escape_attribute(label)
			));
		}
		html
	}
}
