//! # Formsmith
//!
//! Declarative HTML form construction for Rust.
//!
//! Formsmith builds labeled form fields programmatically, validates their
//! values, gives visual feedback next to each field, and submits forms to a
//! server as JSON.
//!
//! ## Crates
//!
//! - [`dom`] (`formsmith-dom`): the in-memory element tree forms are built in
//! - [`forms`] (`formsmith-forms`): field factories, form assembly,
//!   validators, validation wiring, submission and formatting
//!
//! ## Quick Start
//!
//! ```
//! use formsmith::prelude::*;
//!
//! let document = Document::new();
//! let status = document.create_element("div");
//! status.set_id("responseMessage");
//! document.body().append_child(&status).unwrap();
//!
//! let form = create_form("signup", "/submit", Method::POST);
//! document.body().append_child(form.element()).unwrap();
//!
//! let email = create_text_input("email", Some("Email:"), "you@example.com", "");
//! add_form_field(&form, &email).unwrap();
//! let password = create_password_input("password", Some("Password:"), "Enter your password");
//! bind_validator(&password, ValidationRule::PasswordStrength { min_length: 8 }, None);
//! add_form_field(&form, &password).unwrap();
//! form.add_submit_button("Sign up");
//!
//! let settings = FormSettings::from_env();
//! let status = StatusMessage::from_document(&document, &settings).unwrap();
//! let pipeline = SubmissionPipeline::new(ReqwestTransport::new().unwrap(), status, settings);
//! pipeline.wire(&form);
//!
//! assert_eq!(form.fields().len(), 2);
//! ```
//!
//! ## Logging
//!
//! Lookup failures, transport errors and rejected submissions are reported
//! through `tracing`. Formsmith never installs a subscriber; applications
//! choose their own.

pub use formsmith_dom as dom;
pub use formsmith_forms as forms;

pub use formsmith_dom::{Document, DomError, Element, Event, EventType};
pub use formsmith_forms::*;

/// Everything needed to build, validate and submit a form.
pub mod prelude {
	pub use formsmith_dom::{Document, Element, EventType};
	pub use formsmith_forms::{
		FieldFragment, FieldKind, FormContainer, FormError, FormSettings, Formatter, Method,
		ReqwestTransport, StatusMessage, SubmissionPipeline, SubmitError, SubmitOutcome,
		SubmitState, ValidationResult, ValidationRule, add_field_to_form, add_form_field,
		add_input_validation_listener, add_submit_event_listener, attach_formatter,
		bind_validator, clear_error, create_checkbox_input, create_date_input, create_dropdown,
		create_file_input, create_form, create_password_input, create_radio_input,
		create_text_input, create_textarea, display_error, remove_field_from, serialize_form,
		set_required_true, validate_date_format, validate_email, validate_password_strength,
		validate_required_field, validate_with_regex,
	};
}
