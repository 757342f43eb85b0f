//! Programmatic HTML form construction
//!
//! This crate builds labeled form fields on top of the `formsmith-dom`
//! element tree, validates their values, and submits forms as JSON.
//!
//! ## Modules
//!
//! - [`fields`]: builders and `create_*` factories for every field kind
//! - [`form`]: form containers, field attachment and removal, submit handlers
//! - [`validators`]: pure validators and the serializable [`ValidationRule`]
//! - [`wiring`]: valid/invalid classes and inline error messages
//! - [`submission`]: serialization, transports and the submission pipeline
//! - [`formatting`]: phone, name and date input formatters
//! - [`settings`]: endpoints, status texts, colors and class names
//!
//! ## Example
//!
//! ```
//! use formsmith_dom::Document;
//! use formsmith_forms::*;
//!
//! let document = Document::new();
//! let form = create_form("signup", "/submit", Method::POST);
//! document.body().append_child(form.element()).unwrap();
//!
//! let name = create_text_input("name", Some("Name:"), "Enter your name", "");
//! set_required_true(name.wrapper()).unwrap();
//! add_form_field(&form, &name).unwrap();
//!
//! let password = create_password_input("password", Some("Password:"), "Enter your password");
//! bind_validator(&password, ValidationRule::PasswordStrength { min_length: 8 }, None);
//! add_field_to_form(&document, "signup", &password).unwrap();
//!
//! assert_eq!(form.fields().len(), 2);
//! ```

pub mod error;
pub mod field;
pub mod fields;
pub mod form;
pub mod formatting;
pub mod settings;
pub mod status;
pub mod submission;
pub mod validators;
pub mod wiring;

pub use error::{FormError, FormResult, SubmitError, ValidationError, WiringError};
pub use field::{
	ERROR_MESSAGE_CLASS, FieldFragment, FieldKind, INVALID_CLASS, SelectOption, VALID_CLASS,
};
pub use fields::{
	CheckboxField, DateField, DropdownField, FileField, PasswordField, RadioField, TextField,
	TextareaField, create_checkbox_input, create_date_input, create_dropdown, create_file_input,
	create_password_input, create_radio_input, create_text_input, create_textarea,
	set_required_true,
};
pub use form::{
	FormContainer, add_field_to_form, add_form_field, add_submit_event_listener, create_form,
	remove_field_from,
};
pub use formatting::{
	Formatter, attach_formatter, capitalize_name, format_date, format_phone_number,
};
pub use reqwest::Method;
pub use settings::{FieldClasses, FormSettings, SettingsError, StatusColors, StatusMessages};
pub use status::StatusMessage;
pub use submission::{
	ReqwestTransport, ServerResponse, SubmissionPayload, SubmissionPipeline, SubmitOutcome,
	SubmitState, Transport, TransportResponse, serialize_form,
};
pub use validators::{
	ValidationResult, ValidationRule, try_validate_with_regex, validate_date_format,
	validate_email, validate_password_strength, validate_required_field, validate_with_regex,
};
pub use wiring::{
	add_input_validation_listener, add_input_validation_listener_with, apply_validation_result,
	bind_validator, bind_validator_with, clear_error, clear_error_with, display_error,
	display_error_with,
};
