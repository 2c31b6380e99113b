//! The profile registration form
//!
//! Declares the registration schema (username, email, password, avatar,
//! preferences), the static preference groups rendered as radio fieldsets,
//! the typed [`Profile`] record, and the submit handler that runs the
//! coercion routine and logs the outcome.

use crate::field::{Widget, escape_attribute};
use crate::fields::{CharField, EmailField, FileField, MultipleChoiceField};
use crate::form::{ALL_FIELDS_KEY, Form, ValidationErrors};
use crate::form_data::{FormData, UploadedFile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A group of mutually-exclusive preference options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceGroup {
	pub name: &'static str,
	pub label: &'static str,
	pub options: &'static [&'static str],
}

/// Process-wide preference configuration, fixed for the program's lifetime
pub const PREFERENCE_GROUPS: &[PreferenceGroup] = &[
	PreferenceGroup {
		name: "theme",
		label: "Theme",
		options: &["Dark", "Light", "System"],
	},
	PreferenceGroup {
		name: "notifications",
		label: "Notifications",
		options: &["None", "Daily", "Weekly", "Monthly"],
	},
];

/// The compound submission value for a preference option:
/// `"<group>.<option-lowercased>"`.
///
/// # Examples
///
/// ```
/// use formcast::profile::preference_value;
///
/// assert_eq!(preference_value("theme", "Dark"), "theme.dark");
/// assert_eq!(preference_value("notifications", "Daily"), "notifications.daily");
/// ```
pub fn preference_value(group: &str, option: &str) -> String {
	format!("{}.{}", group, option.to_lowercase())
}

/// Every valid preference choice as `(value, label)` pairs, across all groups
pub fn preference_choices() -> Vec<(String, String)> {
	PREFERENCE_GROUPS
		.iter()
		.flat_map(|group| {
			group
				.options
				.iter()
				.map(|option| (preference_value(group.name, option), option.to_string()))
		})
		.collect()
}

/// Declare the registration form schema.
///
/// All radio inputs share the `preferences` name and carry compound
/// `group.option` values, so every selection lands in the one declared
/// multi-value field regardless of which group it came from.
///
/// # Examples
///
/// ```
/// use formcast::field::ValueKind;
/// use formcast::profile::registration_form;
///
/// let form = registration_form();
/// assert_eq!(form.field_count(), 5);
/// assert_eq!(
///     form.get_field("preferences").unwrap().value_kind(),
///     ValueKind::Multi
/// );
/// ```
pub fn registration_form() -> Form {
	let mut form = Form::new();
	form.add_field(Box::new(
		CharField::new("username".to_string())
			.required()
			.with_label("Username")
			.with_max_length(150),
	));
	form.add_field(Box::new(
		EmailField::new("email".to_string())
			.required()
			.with_label("Email"),
	));
	form.add_field(Box::new(
		CharField::new("password".to_string())
			.required()
			.with_label("Password")
			.with_widget(Widget::PasswordInput),
	));
	form.add_field(Box::new(
		FileField::new("avatar".to_string()).with_label("Avatar"),
	));
	form.add_field(Box::new(
		MultipleChoiceField::new("preferences".to_string())
			.with_label("Preferences")
			.with_choices(preference_choices()),
	));
	form
}

/// A validated registration profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
	pub username: String,
	pub email: String,
	pub password: String,
	pub avatar: UploadedFile,
	pub preferences: Vec<String>,
}

impl Profile {
	/// Build a typed profile from a cleaned record.
	///
	/// The record must have passed validation; a shape mismatch here means
	/// the schema and this struct have drifted apart.
	pub fn from_record(
		record: &HashMap<String, serde_json::Value>,
	) -> Result<Self, serde_json::Error> {
		serde_json::from_value(serde_json::to_value(record)?)
	}
}

/// Handle one registration submission.
///
/// Runs the coercion routine against the registration schema and logs the
/// outcome: the validated profile on success, the structured validation
/// error otherwise. The result is also returned so callers can do more
/// than log.
///
/// # Examples
///
/// ```
/// use formcast::form_data::{FormData, UploadedFile};
/// use formcast::profile::handle_submit;
///
/// let mut data = FormData::new();
/// data.append("username", "alice");
/// data.append("email", "a@b.com");
/// data.append("password", "secret");
/// data.append("avatar", UploadedFile::new("me.png", Some("image/png"), 2048));
/// data.append("preferences", "theme.dark");
/// data.append("preferences", "notifications.daily");
///
/// let profile = handle_submit(&data).unwrap();
/// assert_eq!(profile.username, "alice");
/// assert_eq!(profile.preferences, vec!["theme.dark", "notifications.daily"]);
/// ```
pub fn handle_submit(data: &FormData) -> Result<Profile, ValidationErrors> {
	let mut form = registration_form();
	let record = match form.cast_form_data(data) {
		Ok(record) => record,
		Err(errors) => {
			tracing::warn!(error = %errors, "registration submission rejected");
			return Err(errors);
		}
	};

	match Profile::from_record(&record) {
		Ok(profile) => {
			tracing::info!(
				username = %profile.username,
				email = %profile.email,
				avatar = %profile.avatar.filename,
				preferences = ?profile.preferences,
				"registration submission validated"
			);
			Ok(profile)
		}
		Err(e) => {
			// Schema/struct drift; report it as a form-level error
			let mut errors = ValidationErrors::new();
			errors.add(ALL_FIELDS_KEY, e.to_string());
			tracing::warn!(error = %errors, "validated record did not match profile shape");
			Err(errors)
		}
	}
}

/// Render the registration page body: labeled inputs in declaration order,
/// with one radio `<fieldset>` per preference group.
///
/// # Examples
///
/// ```
/// use formcast::profile::{registration_form, render_registration_page};
///
/// let html = render_registration_page(&registration_form());
/// assert!(html.contains("<legend>Theme</legend>"));
/// assert!(html.contains("name=\"preferences\" id=\"id_preferences_theme_0\" value=\"theme.dark\""));
/// assert!(html.contains("type=\"password\""));
/// ```
pub fn render_registration_page(form: &Form) -> String {
	let mut html = String::from("<form method=\"post\" enctype=\"multipart/form-data\">\n");

	for name in ["username", "email", "password", "avatar"] {
		if let Some(bound) = form.get_bound_field(name) {
			html.push_str(&bound.render());
			html.push('\n');
		}
	}

	for group in PREFERENCE_GROUPS {
		html.push_str("<fieldset>");
		html.push_str(&format!("<legend>{}</legend>", escape_attribute(group.label)));
		for (index, option) in group.options.iter().enumerate() {
			let value = preference_value(group.name, option);
			let id = format!("id_preferences_{}_{}", group.name, index);
			html.push_str(&format!(
				"<label for=\"{id}\"><input type=\"radio\" name=\"preferences\" id=\"{id}\" value=\"{}\" />{}</label>",
				escape_attribute(&value),
				escape_attribute(option),
			));
		}
		html.push_str("</fieldset>\n");
	}

	html.push_str("<button type=\"submit\">Register</button>\n</form>\n");
	html
}
