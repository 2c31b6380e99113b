//! Registration form tests
//!
//! End-to-end tests of the coercion routine through the public API.

use formcast::form_data::{FormData, UploadedFile};
use formcast::profile::{handle_submit, registration_form};
use rstest::rstest;
use serde_json::json;

fn avatar() -> UploadedFile {
	UploadedFile::new("avatar.png", Some("image/png"), 2048)
}

fn valid_submission() -> FormData {
	let mut data = FormData::new();
	data.append("username", "alice");
	data.append("email", "a@b.com");
	data.append("password", "secret");
	data.append("avatar", avatar());
	data.append("preferences", "theme.dark");
	data.append("preferences", "notifications.daily");
	data
}

#[rstest]
fn test_valid_submission_round_trips_values() {
	let mut form = registration_form();

	let record = form.cast_form_data(&valid_submission()).unwrap();

	assert_eq!(record["username"], json!("alice"));
	assert_eq!(record["email"], json!("a@b.com"));
	assert_eq!(record["password"], json!("secret"));
	assert_eq!(record["avatar"]["filename"], json!("avatar.png"));
	assert_eq!(
		record["preferences"],
		json!(["theme.dark", "notifications.daily"])
	);
}

#[rstest]
fn test_handle_submit_returns_typed_profile() {
	let profile = handle_submit(&valid_submission()).unwrap();

	assert_eq!(profile.username, "alice");
	assert_eq!(profile.avatar.size, 2048);
	assert_eq!(
		profile.preferences,
		vec!["theme.dark".to_string(), "notifications.daily".to_string()]
	);
}

#[rstest]
fn test_missing_email_is_named_in_the_error() {
	let mut data = FormData::new();
	data.append("username", "alice");
	data.append("password", "secret");
	data.append("avatar", avatar());
	data.append("preferences", "theme.light");

	let errors = handle_submit(&data).unwrap_err();

	assert!(errors.contains("email"));
	assert!(errors.to_string().contains("email"));
}

#[rstest]
#[case("username")]
#[case("password")]
fn test_empty_required_text_field_is_named(#[case] field: &str) {
	let mut data = FormData::new();
	for name in ["username", "password"] {
		data.append(name, if name == field { "" } else { "value" });
	}
	data.append("email", "a@b.com");
	data.append("avatar", avatar());

	let errors = handle_submit(&data).unwrap_err();

	assert!(errors.contains(field));
	assert_eq!(errors.field_count(), 1);
}

#[rstest]
fn test_invalid_email_format_is_rejected() {
	let mut data = FormData::new();
	data.append("username", "alice");
	data.append("email", "not-an-email");
	data.append("password", "secret");
	data.append("avatar", avatar());

	let errors = handle_submit(&data).unwrap_err();

	assert!(errors.contains("email"));
}

#[rstest]
fn test_missing_avatar_is_rejected() {
	let mut data = FormData::new();
	data.append("username", "alice");
	data.append("email", "a@b.com");
	data.append("password", "secret");

	let errors = handle_submit(&data).unwrap_err();

	assert!(errors.contains("avatar"));
}

#[rstest]
fn test_no_preferences_yields_empty_list() {
	let mut data = FormData::new();
	data.append("username", "alice");
	data.append("email", "a@b.com");
	data.append("password", "secret");
	data.append("avatar", avatar());

	let mut form = registration_form();
	let record = form.cast_form_data(&data).unwrap();

	assert_eq!(record["preferences"], json!([]));
}

#[rstest]
#[case(&["theme.dark"])]
#[case(&["notifications.weekly", "theme.system"])]
#[case(&["theme.light", "notifications.none", "notifications.monthly"])]
fn test_n_preferences_yield_n_values_in_order(#[case] preferences: &[&str]) {
	let mut data = FormData::new();
	data.append("username", "alice");
	data.append("email", "a@b.com");
	data.append("password", "secret");
	data.append("avatar", avatar());
	for preference in preferences {
		data.append("preferences", *preference);
	}

	let profile = handle_submit(&data).unwrap();

	assert_eq!(profile.preferences, preferences.to_vec());
}

#[rstest]
fn test_unknown_field_is_a_validation_error() {
	let mut data = valid_submission();
	data.append("csrf_token", "abc123");

	let errors = handle_submit(&data).unwrap_err();

	assert!(errors.contains("csrf_token"));
	assert_eq!(errors.get("csrf_token"), &["Unknown field 'csrf_token'".to_string()]);
}

#[rstest]
fn test_all_violations_are_reported_together() {
	let mut data = FormData::new();
	data.append("username", "");
	data.append("email", "broken");
	data.append("preferences", "theme.sepia");
	data.append("mystery", "x");

	let errors = handle_submit(&data).unwrap_err();

	for field in ["username", "email", "password", "avatar", "preferences", "mystery"] {
		assert!(errors.contains(field), "expected an error for '{}'", field);
	}
}

#[rstest]
fn test_submission_is_coerced_identically_twice() {
	let data = valid_submission();

	let first = handle_submit(&data).unwrap();
	let second = handle_submit(&data).unwrap();

	assert_eq!(first, second);
}
