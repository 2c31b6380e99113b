//! Typed coercion and validation of multi-valued form submissions
//!
//! This crate turns the raw multi-map a browser produces from a submitted
//! form into a schema-validated record:
//! - [`form_data::FormData`] carries the ordered, possibly-repeating
//!   `(name, value)` entries of one submission
//! - a [`Form`] declares the expected fields, each reporting whether it is
//!   single- or multi-valued
//! - [`Form::cast_form_data`] coerces the submission against that
//!   declaration and validates it in one atomic pass, returning the cleaned
//!   record or every violated constraint at once
//!
//! The [`profile`] module ships the registration form built on top of
//! these pieces: username, email, password, avatar upload, and radio-group
//! preference selectors encoded as compound `group.option` values.

pub mod bound_field;
pub mod field;
pub mod fields;
pub mod form;
pub mod form_data;
pub mod profile;
pub mod validators;

pub use bound_field::BoundField;
pub use field::{FieldError, FieldResult, FormField, ValueKind, Widget};
pub use fields::{CharField, EmailField, FileField, MultipleChoiceField};
pub use form::{ALL_FIELDS_KEY, Form, ValidationErrors};
pub use form_data::{FormData, FormValue, UploadedFile};
pub use profile::{Profile, handle_submit, registration_form};
pub use validators::EmailValidator;
