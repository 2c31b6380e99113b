// Basic fields
pub mod char_field;
pub mod email_field;

// Upload and choice fields
pub mod choice_field;
pub mod file_field;

pub use char_field::CharField;
pub use choice_field::MultipleChoiceField;
pub use email_field::EmailField;
pub use file_field::FileField;
