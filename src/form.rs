use crate::bound_field::BoundField;
use crate::field::{FormField, ValueKind};
use crate::form_data::FormData;
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

/// Special key for form-level (non-field-specific) errors.
pub const ALL_FIELDS_KEY: &str = "_all";

/// Per-field validation failures collected over one validation pass.
///
/// Validation is all-or-nothing: either every declared constraint holds and
/// the cleaned record is returned, or every violation is reported here at
/// once. Field order of the map is unspecified; messages within a field
/// keep the order they were raised in.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ValidationErrors {
	errors: HashMap<String, Vec<String>>,
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
	/// Create an empty error collection.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::form::ValidationErrors;
	///
	/// let errors = ValidationErrors::new();
	/// assert!(errors.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a failure message for a field.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::form::ValidationErrors;
	///
	/// let mut errors = ValidationErrors::new();
	/// errors.add("email", "Enter a valid email address");
	/// assert!(errors.contains("email"));
	/// assert_eq!(errors.get("email"), &["Enter a valid email address".to_string()]);
	/// ```
	pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
		self.errors
			.entry(field.into())
			.or_default()
			.push(message.into());
	}

	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn contains(&self, field: &str) -> bool {
		self.errors.contains_key(field)
	}

	/// Messages recorded for `field`, empty if the field passed
	pub fn get(&self, field: &str) -> &[String] {
		self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Iterate over `(field, messages)` pairs
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.errors.iter().map(|(f, m)| (f.as_str(), m.as_slice()))
	}

	/// Number of fields that failed
	pub fn field_count(&self) -> usize {
		self.errors.len()
	}
}

impl fmt::Display for ValidationErrors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "validation failed for {} field(s):", self.errors.len())?;
		// Sort for a stable message
		let mut fields: Vec<_> = self.errors.keys().collect();
		fields.sort();
		for field in fields {
			write!(f, " {}: [{}]", field, self.errors[field.as_str()].join("; "))?;
		}
		Ok(())
	}
}

/// A declared set of form fields together with bound data and errors.
///
/// The form doubles as the field-shape schema of the coercion routine:
/// each declared field reports its [`ValueKind`], and
/// [`Form::cast_form_data`] uses that declaration to decide whether a
/// submitted name binds to its first value or to all of them.
pub struct Form {
	fields: Vec<Box<dyn FormField>>,
	data: HashMap<String, serde_json::Value>,
	errors: HashMap<String, Vec<String>>,
	is_bound: bool,
	prefix: String,
}

impl Form {
	/// Create a new empty form
	///
	/// # Examples
	///
	/// ```
	/// use formcast::Form;
	///
	/// let form = Form::new();
	/// assert!(!form.is_bound());
	/// assert!(form.fields().is_empty());
	/// ```
	pub fn new() -> Self {
		Self {
			fields: vec![],
			data: HashMap::new(),
			errors: HashMap::new(),
			is_bound: false,
			prefix: String::new(),
		}
	}

	/// Create a new form with a field prefix
	///
	/// # Examples
	///
	/// ```
	/// use formcast::Form;
	///
	/// let form = Form::with_prefix("profile".to_string());
	/// assert_eq!(form.prefix(), "profile");
	/// assert_eq!(form.add_prefix_to_field_name("email"), "profile-email");
	/// ```
	pub fn with_prefix(prefix: String) -> Self {
		Self {
			fields: vec![],
			data: HashMap::new(),
			errors: HashMap::new(),
			is_bound: false,
			prefix,
		}
	}

	/// Add a field to the form
	///
	/// # Examples
	///
	/// ```
	/// use formcast::{CharField, Form};
	///
	/// let mut form = Form::new();
	/// form.add_field(Box::new(CharField::new("username".to_string())));
	/// assert_eq!(form.field_count(), 1);
	/// ```
	pub fn add_field(&mut self, field: Box<dyn FormField>) {
		self.fields.push(field);
	}

	/// Bind an already-coerced record for validation
	///
	/// # Examples
	///
	/// ```
	/// use formcast::Form;
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let mut form = Form::new();
	/// let mut data = HashMap::new();
	/// data.insert("username".to_string(), json!("john"));
	///
	/// form.bind(data);
	/// assert!(form.is_bound());
	/// ```
	pub fn bind(&mut self, data: HashMap<String, serde_json::Value>) {
		self.data = data;
		self.is_bound = true;
	}

	/// Coerce a raw multi-valued submission and validate it atomically.
	///
	/// The routine:
	/// 1. Walks unique submitted names in order of first appearance.
	/// 2. Classifies each name via the declared field's [`ValueKind`]:
	///    `Single` names bind to their first submitted value, `Multi` names
	///    to the full list of values in submission order.
	/// 3. Binds declared `Multi` fields absent from the submission to an
	///    empty list.
	/// 4. Runs one validation pass over every declared field, collecting
	///    every violation.
	///
	/// A submitted name with no declared field is reported as a validation
	/// error on that name, never a panic. On success the cleaned record is
	/// returned; on failure [`ValidationErrors`] captures all violated
	/// constraints at once.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::form_data::FormData;
	/// use formcast::{CharField, Form};
	///
	/// let mut form = Form::new();
	/// form.add_field(Box::new(CharField::new("username".to_string()).required()));
	///
	/// let mut data = FormData::new();
	/// data.append("username", "alice");
	///
	/// let record = form.cast_form_data(&data).unwrap();
	/// assert_eq!(record["username"], serde_json::json!("alice"));
	/// ```
	pub fn cast_form_data(
		&mut self,
		data: &FormData,
	) -> Result<HashMap<String, serde_json::Value>, ValidationErrors> {
		let mut record = HashMap::new();
		let mut unknown = ValidationErrors::new();

		for key in data.keys() {
			let Some(field) = self.get_field(key) else {
				unknown.add(key, format!("Unknown field '{}'", key));
				continue;
			};

			let value = match field.value_kind() {
				ValueKind::Single => data
					.get(key)
					.map(|v| v.to_json())
					.unwrap_or(serde_json::Value::Null),
				ValueKind::Multi => serde_json::Value::Array(
					data.get_all(key).into_iter().map(|v| v.to_json()).collect(),
				),
			};
			record.insert(key.to_string(), value);
		}

		// Declared multi-value fields with no submitted entries bind to an
		// empty list so the schema still sees them.
		for field in &self.fields {
			if field.value_kind() == ValueKind::Multi && !record.contains_key(field.name()) {
				record.insert(field.name().to_string(), serde_json::Value::Array(vec![]));
			}
		}

		self.bind(record);
		let valid = self.is_valid();

		let mut all_errors = unknown;
		if !valid {
			for (field, messages) in &self.errors {
				for message in messages {
					all_errors.add(field.clone(), message.clone());
				}
			}
		}

		if all_errors.is_empty() {
			Ok(self.data.clone())
		} else {
			Err(all_errors)
		}
	}

	/// Validate the bound record and return true if all fields are valid
	///
	/// # Examples
	///
	/// ```
	/// use formcast::{CharField, Form};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let mut form = Form::new();
	/// form.add_field(Box::new(CharField::new("username".to_string())));
	///
	/// let mut data = HashMap::new();
	/// data.insert("username".to_string(), json!("john"));
	/// form.bind(data);
	///
	/// assert!(form.is_valid());
	/// assert!(form.errors().is_empty());
	/// assert_eq!(form.cleaned_data().get("username"), Some(&json!("john")));
	/// ```
	pub fn is_valid(&mut self) -> bool {
		if !self.is_bound {
			return false;
		}

		self.errors.clear();

		let mut cleaned = Vec::with_capacity(self.fields.len());
		for field in &self.fields {
			let value = self.data.get(field.name());

			match field.clean(value) {
				Ok(value) => cleaned.push((field.name().to_string(), value)),
				Err(e) => {
					self.errors
						.entry(field.name().to_string())
						.or_default()
						.push(e.to_string());
				}
			}
		}

		for (name, value) in cleaned {
			self.data.insert(name, value);
		}

		self.errors.is_empty()
	}

	pub fn cleaned_data(&self) -> &HashMap<String, serde_json::Value> {
		&self.data
	}

	pub fn errors(&self) -> &HashMap<String, Vec<String>> {
		&self.errors
	}

	pub fn is_bound(&self) -> bool {
		self.is_bound
	}

	pub fn fields(&self) -> &[Box<dyn FormField>] {
		&self.fields
	}

	pub fn get_field(&self, name: &str) -> Option<&dyn FormField> {
		self.fields
			.iter()
			.find(|f| f.name() == name)
			.map(|f| f.as_ref())
	}

	pub fn remove_field(&mut self, name: &str) -> Option<Box<dyn FormField>> {
		let pos = self.fields.iter().position(|f| f.name() == name)?;
		Some(self.fields.remove(pos))
	}

	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn add_prefix_to_field_name(&self, field_name: &str) -> String {
		if self.prefix.is_empty() {
			field_name.to_string()
		} else {
			format!("{}-{}", self.prefix, field_name)
		}
	}

	pub fn get_bound_field<'a>(&'a self, name: &str) -> Option<BoundField<'a>> {
		let field = self.get_field(name)?;
		let data = self.data.get(name);
		let errors = self.errors.get(name).map(|e| e.as_slice()).unwrap_or(&[]);

		Some(BoundField::new(field, data, errors, &self.prefix))
	}

	/// Render every field as labeled HTML inputs, in declaration order.
	///
	/// Purely presentational; the output carries no error markup.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::{CharField, Form};
	///
	/// let mut form = Form::new();
	/// form.add_field(Box::new(
	///     CharField::new("username".to_string()).with_label("Username"),
	/// ));
	///
	/// let html = form.render();
	/// assert!(html.contains("<label for=\"id_username\">Username</label>"));
	/// assert!(html.contains("name=\"username\""));
	/// ```
	pub fn render(&self) -> String {
		let mut html = String::new();
		for field in &self.fields {
			let bound = BoundField::new(
				field.as_ref(),
				self.data.get(field.name()),
				&[],
				&self.prefix,
			);
			html.push_str(&bound.render());
			html.push('\n');
		}
		html
	}
}

impl Default for Form {
	fn default() -> Self {
		Self::new()
	}
}

/// Safe field access by name.
///
/// Returns `None` if the field is not found instead of panicking.
///
/// # Examples
///
/// ```
/// use formcast::{CharField, Form};
///
/// let mut form = Form::new();
/// form.add_field(Box::new(CharField::new("name".to_string())));
///
/// assert!(form.get("name").is_some());
/// assert!(form.get("nonexistent").is_none());
/// ```
impl Form {
	// Allow borrowed_box because Index trait impl requires &Box<dyn FormField>
	#[allow(clippy::borrowed_box)]
	pub fn get(&self, name: &str) -> Option<&Box<dyn FormField>> {
		self.fields.iter().find(|f| f.name() == name)
	}
}

impl Index<&str> for Form {
	type Output = Box<dyn FormField>;

	fn index(&self, name: &str) -> &Self::Output {
		self.get(name)
			.unwrap_or_else(|| panic!("Field '{}' not found", name))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::{CharField, MultipleChoiceField};
	use crate::form_data::FormData;
	use serde_json::json;

	fn sample_form() -> Form {
		let mut form = Form::new();
		form.add_field(Box::new(CharField::new("username".to_string()).required()));
		form.add_field(Box::new(
			MultipleChoiceField::new("preferences".to_string())
				.with_choice("theme.dark", "Dark")
				.with_choice("theme.light", "Light")
				.with_choice("notifications.daily", "Daily"),
		));
		form
	}

	#[test]
	fn test_cast_single_value_takes_first() {
		let mut form = sample_form();

		let mut data = FormData::new();
		data.append("username", "alice");
		data.append("username", "bob");

		let record = form.cast_form_data(&data).unwrap();
		assert_eq!(record["username"], json!("alice"));
	}

	#[test]
	fn test_cast_multi_value_collects_all_in_order() {
		let mut form = sample_form();

		let mut data = FormData::new();
		data.append("username", "alice");
		data.append("preferences", "theme.dark");
		data.append("preferences", "notifications.daily");

		let record = form.cast_form_data(&data).unwrap();
		assert_eq!(
			record["preferences"],
			json!(["theme.dark", "notifications.daily"])
		);
	}

	#[test]
	fn test_cast_absent_multi_field_binds_empty_list() {
		let mut form = sample_form();

		let mut data = FormData::new();
		data.append("username", "alice");

		let record = form.cast_form_data(&data).unwrap();
		assert_eq!(record["preferences"], json!([]));
	}

	#[test]
	fn test_cast_unknown_field_is_an_error_not_a_panic() {
		let mut form = sample_form();

		let mut data = FormData::new();
		data.append("username", "alice");
		data.append("surprise", "boo");

		let errors = form.cast_form_data(&data).unwrap_err();
		assert!(errors.contains("surprise"));
		assert_eq!(errors.get("surprise"), &["Unknown field 'surprise'".to_string()]);
	}

	#[test]
	fn test_cast_collects_all_violations_atomically() {
		let mut form = sample_form();

		let mut data = FormData::new();
		data.append("username", "");
		data.append("preferences", "theme.sepia");
		data.append("extra", "x");

		let errors = form.cast_form_data(&data).unwrap_err();
		assert!(errors.contains("username"));
		assert!(errors.contains("preferences"));
		assert!(errors.contains("extra"));
		assert_eq!(errors.field_count(), 3);
	}

	#[test]
	fn test_cast_is_idempotent() {
		let mut data = FormData::new();
		data.append("username", "alice");
		data.append("preferences", "theme.dark");

		let first = sample_form().cast_form_data(&data).unwrap();
		let second = sample_form().cast_form_data(&data).unwrap();
		assert_eq!(first, second);

		// Re-casting through the same form as well
		let mut form = sample_form();
		let a = form.cast_form_data(&data).unwrap();
		let b = form.cast_form_data(&data).unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn test_form_validation() {
		let mut form = Form::new();

		let mut name_field = CharField::new("name".to_string());
		name_field.max_length = Some(50);
		form.add_field(Box::new(name_field));

		let mut data = HashMap::new();
		data.insert("name".to_string(), json!("John Doe"));

		form.bind(data);
		assert!(form.is_valid());
		assert!(form.errors().is_empty());
	}

	#[test]
	fn test_form_validation_error() {
		let mut form = Form::new();

		let mut name_field = CharField::new("name".to_string());
		name_field.max_length = Some(5);
		form.add_field(Box::new(name_field));

		let mut data = HashMap::new();
		data.insert("name".to_string(), json!("Very Long Name"));

		form.bind(data);
		assert!(!form.is_valid());
		assert!(!form.errors().is_empty());
	}

	#[test]
	fn test_form_missing_required_fields() {
		let mut form = Form::new();
		form.add_field(Box::new(CharField::new("username".to_string()).required()));
		form.add_field(Box::new(CharField::new("email".to_string()).required()));

		form.bind(HashMap::new());

		assert!(form.is_bound());
		assert!(!form.is_valid());
		assert!(form.errors().contains_key("username"));
		assert!(form.errors().contains_key("email"));
	}

	#[test]
	fn test_form_optional_fields() {
		let mut form = Form::new();
		form.add_field(Box::new(CharField::new("username".to_string())));

		let mut bio_field = CharField::new("bio".to_string());
		bio_field.required = false;
		form.add_field(Box::new(bio_field));

		let mut data = HashMap::new();
		data.insert("username".to_string(), json!("john"));
		// bio is omitted

		form.bind(data);

		assert!(form.is_valid());
		assert!(form.errors().is_empty());
	}

	#[test]
	fn test_form_unbound() {
		let mut form = Form::new();
		form.add_field(Box::new(CharField::new("name".to_string())));

		assert!(!form.is_bound());
		assert!(!form.is_valid()); // Unbound forms are not valid
	}

	#[test]
	fn test_form_index_access() {
		let mut form = Form::new();
		form.add_field(Box::new(CharField::new("name".to_string())));

		let field = &form["name"];
		assert_eq!(field.name(), "name");
	}

	#[test]
	#[should_panic(expected = "Field 'nonexistent' not found")]
	fn test_form_index_access_nonexistent() {
		let form = Form::new();
		let _ = &form["nonexistent"];
	}

	#[test]
	fn test_form_remove_field() {
		let mut form = Form::new();
		form.add_field(Box::new(CharField::new("name".to_string())));

		assert_eq!(form.field_count(), 1);
		assert!(form.remove_field("name").is_some());
		assert_eq!(form.field_count(), 0);
		assert!(form.remove_field("nonexistent").is_none());
	}

	#[test]
	fn test_validation_errors_display_is_stable() {
		let mut errors = ValidationErrors::new();
		errors.add("b", "second");
		errors.add("a", "first");

		let message = errors.to_string();
		assert_eq!(
			message,
			"validation failed for 2 field(s): a: [first] b: [second]"
		);
	}
}
