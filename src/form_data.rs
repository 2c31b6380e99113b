//! Raw form submission data
//!
//! [`FormData`] mirrors the multi-map a browser builds from a submitted
//! form: an ordered list of `(name, value)` entries where the same name may
//! appear any number of times. Repeated names are how multi-value fields
//! (radio/checkbox groups sharing a name) arrive on the wire.

use serde::{Deserialize, Serialize};

/// An uploaded file, carried as an opaque handle.
///
/// Only metadata travels with the submission; no file content is inspected
/// at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
	pub filename: String,
	pub content_type: Option<String>,
	pub size: u64,
}

impl UploadedFile {
	/// Create a new file handle.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::form_data::UploadedFile;
	///
	/// let file = UploadedFile::new("avatar.png", Some("image/png"), 2048);
	/// assert_eq!(file.filename, "avatar.png");
	/// assert_eq!(file.size, 2048);
	/// ```
	pub fn new(filename: impl Into<String>, content_type: Option<&str>, size: u64) -> Self {
		Self {
			filename: filename.into(),
			content_type: content_type.map(str::to_string),
			size,
		}
	}
}

/// A single submitted value: text or a file handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
	Text(String),
	File(UploadedFile),
}

impl FormValue {
	/// Convert the raw value into the JSON representation fields clean.
	///
	/// Text becomes a JSON string; files become the object form
	/// `{"filename": .., "content_type": .., "size": ..}`.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			FormValue::Text(s) => serde_json::Value::String(s.clone()),
			FormValue::File(f) => serde_json::json!({
				"filename": f.filename,
				"content_type": f.content_type,
				"size": f.size,
			}),
		}
	}
}

impl From<&str> for FormValue {
	fn from(value: &str) -> Self {
		FormValue::Text(value.to_string())
	}
}

impl From<String> for FormValue {
	fn from(value: String) -> Self {
		FormValue::Text(value)
	}
}

impl From<UploadedFile> for FormValue {
	fn from(value: UploadedFile) -> Self {
		FormValue::File(value)
	}
}

/// Ordered multi-map of submitted form entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
	entries: Vec<(String, FormValue)>,
}

impl FormData {
	/// Create an empty submission.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::form_data::FormData;
	///
	/// let data = FormData::new();
	/// assert!(data.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Append an entry, keeping submission order.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::form_data::FormData;
	///
	/// let mut data = FormData::new();
	/// data.append("preferences", "theme.dark");
	/// data.append("preferences", "notifications.daily");
	/// assert_eq!(data.get_all("preferences").len(), 2);
	/// ```
	pub fn append(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
		self.entries.push((name.into(), value.into()));
	}

	/// The first value submitted under `name`, if any.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::form_data::{FormData, FormValue};
	///
	/// let mut data = FormData::new();
	/// data.append("username", "alice");
	/// data.append("username", "bob");
	/// assert_eq!(data.get("username"), Some(&FormValue::Text("alice".to_string())));
	/// assert_eq!(data.get("missing"), None);
	/// ```
	pub fn get(&self, name: &str) -> Option<&FormValue> {
		self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
	}

	/// Every value submitted under `name`, in submission order.
	pub fn get_all(&self, name: &str) -> Vec<&FormValue> {
		self.entries
			.iter()
			.filter(|(n, _)| n == name)
			.map(|(_, v)| v)
			.collect()
	}

	/// Unique submitted names, in order of first appearance.
	///
	/// # Examples
	///
	/// ```
	/// use formcast::form_data::FormData;
	///
	/// let mut data = FormData::new();
	/// data.append("a", "1");
	/// data.append("b", "2");
	/// data.append("a", "3");
	/// assert_eq!(data.keys(), vec!["a", "b"]);
	/// ```
	pub fn keys(&self) -> Vec<&str> {
		let mut seen = Vec::new();
		for (name, _) in &self.entries {
			if !seen.contains(&name.as_str()) {
				seen.push(name.as_str());
			}
		}
		seen
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.iter().any(|(n, _)| n == name)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate over every `(name, value)` entry in submission order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
		self.entries.iter().map(|(n, v)| (n.as_str(), v))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_keys_dedupe_preserves_first_appearance_order() {
		let mut data = FormData::new();
		data.append("username", "alice");
		data.append("preferences", "theme.dark");
		data.append("email", "a@b.com");
		data.append("preferences", "notifications.daily");

		assert_eq!(data.keys(), vec!["username", "preferences", "email"]);
	}

	#[rstest]
	fn test_get_returns_first_value() {
		let mut data = FormData::new();
		data.append("x", "first");
		data.append("x", "second");

		assert_eq!(data.get("x"), Some(&FormValue::Text("first".to_string())));
	}

	#[rstest]
	fn test_get_all_preserves_submission_order() {
		let mut data = FormData::new();
		data.append("preferences", "theme.dark");
		data.append("other", "x");
		data.append("preferences", "notifications.weekly");

		let values: Vec<_> = data
			.get_all("preferences")
			.into_iter()
			.map(FormValue::to_json)
			.collect();
		assert_eq!(
			values,
			vec![
				serde_json::json!("theme.dark"),
				serde_json::json!("notifications.weekly")
			]
		);
	}

	#[rstest]
	fn test_file_value_to_json() {
		let file = UploadedFile::new("avatar.png", Some("image/png"), 512);
		let value = FormValue::from(file).to_json();

		assert_eq!(value["filename"], "avatar.png");
		assert_eq!(value["content_type"], "image/png");
		assert_eq!(value["size"], 512);
	}

	#[rstest]
	fn test_get_all_missing_name_is_empty() {
		let data = FormData::new();
		assert!(data.get_all("nothing").is_empty());
	}
}
