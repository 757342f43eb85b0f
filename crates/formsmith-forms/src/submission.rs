//! Submission pipeline
//!
//! Serializes a form into a flat JSON object, posts it through a
//! [`Transport`], maps the response to a [`SubmitOutcome`] and renders that
//! outcome in a [`StatusMessage`].
//!
//! Each form moves through [`SubmitState::Idle`], [`SubmitState::Submitting`]
//! and [`SubmitState::Resolved`]. A form that is already submitting rejects a
//! second attempt with [`SubmitError::InFlight`].

use crate::error::SubmitError;
use crate::field::is_input_like;
use crate::form::{FormContainer, add_submit_event_listener};
use crate::settings::FormSettings;
use crate::status::StatusMessage;
use async_trait::async_trait;
use formsmith_dom::Element;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Field name to value, in document order.
pub type SubmissionPayload = IndexMap<String, String>;

/// Input types that never contribute a value.
const NON_SUBMITTING_INPUT_TYPES: &[&str] = &["button", "submit", "reset", "image"];

/// Collects the named, enabled controls of `form` into a payload.
///
/// Checkboxes and radios contribute only when checked, with `on` as their
/// default value. A repeated name keeps its first position and its last
/// value.
///
/// # Examples
///
/// ```
/// use formsmith_forms::{
/// 	add_form_field, create_checkbox_input, create_form, create_text_input, serialize_form,
/// };
/// use reqwest::Method;
///
/// let form = create_form("signup", "/submit", Method::POST);
/// add_form_field(&form, &create_text_input("name", None, "", "Ada")).unwrap();
/// add_form_field(&form, &create_checkbox_input("terms", None, true)).unwrap();
///
/// let payload = serialize_form(form.element());
/// assert_eq!(payload["name"], "Ada");
/// assert_eq!(payload["terms"], "on");
/// ```
pub fn serialize_form(form: &Element) -> SubmissionPayload {
	let mut payload = SubmissionPayload::new();
	for control in form.find_all(is_input_like) {
		let Some(name) = control.name().filter(|n| !n.is_empty()) else {
			continue;
		};
		if control.has_attribute("disabled") {
			continue;
		}
		if control.is("input") {
			let input_type = control
				.get_attribute("type")
				.unwrap_or_default()
				.to_ascii_lowercase();
			if NON_SUBMITTING_INPUT_TYPES.contains(&input_type.as_str()) {
				continue;
			}
			if matches!(input_type.as_str(), "checkbox" | "radio") {
				if !control.has_attribute("checked") {
					continue;
				}
				let value = control.get_attribute("value").unwrap_or_else(|| "on".to_string());
				payload.insert(name, value);
				continue;
			}
		}
		payload.insert(name, control.value());
	}
	payload
}

/// Raw response of a transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
	pub status: u16,
	pub body: String,
}

impl TransportResponse {
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Sends JSON payloads to a server.
#[async_trait(?Send)]
pub trait Transport {
	async fn post_json(
		&self,
		url: &str,
		payload: &SubmissionPayload,
	) -> Result<TransportResponse, SubmitError>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
	client: reqwest::Client,
	base_url: Option<reqwest::Url>,
}

impl ReqwestTransport {
	pub fn new() -> Result<Self, SubmitError> {
		let client = reqwest::Client::builder()
			.build()
			.map_err(|e| SubmitError::Transport(format!("Failed to create client: {}", e)))?;
		Ok(Self::with_client(client))
	}

	pub fn with_client(client: reqwest::Client) -> Self {
		Self {
			client,
			base_url: None,
		}
	}

	/// Resolves relative submit URLs such as `/submit` against `base_url`.
	pub fn with_base_url(mut self, base_url: reqwest::Url) -> Self {
		self.base_url = Some(base_url);
		self
	}

	fn resolve(&self, url: &str) -> Result<reqwest::Url, SubmitError> {
		let resolved = match &self.base_url {
			Some(base) => base.join(url),
			None => reqwest::Url::parse(url),
		};
		resolved.map_err(|e| SubmitError::Transport(format!("Invalid URL '{}': {}", url, e)))
	}
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
	async fn post_json(
		&self,
		url: &str,
		payload: &SubmissionPayload,
	) -> Result<TransportResponse, SubmitError> {
		let url = self.resolve(url)?;

		let response = self
			.client
			.post(url)
			.header(reqwest::header::CONTENT_TYPE, "application/json")
			.json(payload)
			.send()
			.await
			.map_err(|e| {
				// Builder errors here come from serializing the payload.
				if e.is_builder() {
					SubmitError::Encode(e.to_string())
				} else {
					SubmitError::Transport(format!("Request failed: {}", e))
				}
			})?;

		let status = response.status().as_u16();
		let body = response
			.text()
			.await
			.map_err(|e| SubmitError::Transport(format!("Failed to read response: {}", e)))?;
		Ok(TransportResponse { status, body })
	}
}

/// JSON body returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerResponse {
	pub success: bool,
	pub message: Option<String>,
}

impl ServerResponse {
	pub fn failure(message: impl Into<String>) -> Self {
		Self {
			success: false,
			message: Some(message.into()),
		}
	}
}

/// Resolved result of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
	pub success: bool,
	pub message: String,
}

/// Per-form submission state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitState {
	#[default]
	Idle,
	Submitting,
	Resolved(SubmitOutcome),
}

impl SubmitState {
	pub fn is_submitting(&self) -> bool {
		matches!(self, SubmitState::Submitting)
	}

	pub fn outcome(&self) -> Option<&SubmitOutcome> {
		match self {
			SubmitState::Resolved(outcome) => Some(outcome),
			_ => None,
		}
	}
}

struct PipelineInner {
	transport: Rc<dyn Transport>,
	status: StatusMessage,
	settings: FormSettings,
}

/// Drives submissions and renders their status.
///
/// Cloning yields another handle to the same pipeline.
#[derive(Clone)]
pub struct SubmissionPipeline {
	inner: Rc<PipelineInner>,
}

impl std::fmt::Debug for SubmissionPipeline {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SubmissionPipeline")
			.field("status", &self.inner.status)
			.field("settings", &self.inner.settings)
			.finish()
	}
}

impl SubmissionPipeline {
	pub fn new(
		transport: impl Transport + 'static,
		status: StatusMessage,
		settings: FormSettings,
	) -> Self {
		Self {
			inner: Rc::new(PipelineInner {
				transport: Rc::new(transport),
				status,
				settings,
			}),
		}
	}

	pub fn status(&self) -> &StatusMessage {
		&self.inner.status
	}

	pub fn settings(&self) -> &FormSettings {
		&self.inner.settings
	}

	/// Serializes `form`, posts it to `url` and renders the outcome.
	///
	/// Transport, status and decoding failures become a failed outcome; the
	/// only error returned is [`SubmitError::InFlight`].
	pub async fn submit_form_async(
		&self,
		form: &FormContainer,
		url: &str,
	) -> Result<SubmitOutcome, SubmitError> {
		let Some(guard) = form.begin_submission() else {
			let err = SubmitError::InFlight(form.id());
			tracing::warn!("{}", err);
			return Err(err);
		};

		let payload = serialize_form(form.element());
		tracing::debug!(form = %form.id(), url, fields = payload.len(), "submitting form");

		let response = match self.send(url, &payload).await {
			Ok(response) => response,
			Err(err) => {
				tracing::error!(form = %form.id(), "Form submission failed: {}", err);
				ServerResponse::failure(err.to_string())
			}
		};

		let outcome = self.handle_response(&response);
		guard.finish(outcome.clone());
		Ok(outcome)
	}

	async fn send(
		&self,
		url: &str,
		payload: &SubmissionPayload,
	) -> Result<ServerResponse, SubmitError> {
		let response = self.inner.transport.post_json(url, payload).await?;
		if !response.is_success() {
			return Err(SubmitError::Status(response.status));
		}
		serde_json::from_str(&response.body).map_err(|e| SubmitError::Decode(e.to_string()))
	}

	/// Renders a server response in the status element.
	///
	/// A missing or empty message falls back to the configured default for
	/// success or failure.
	pub fn handle_response(&self, response: &ServerResponse) -> SubmitOutcome {
		let settings = &self.inner.settings;
		let (default_message, color) = if response.success {
			(&settings.messages.success, &settings.colors.success)
		} else {
			(&settings.messages.failure, &settings.colors.failure)
		};
		let message = response
			.message
			.clone()
			.filter(|m| !m.is_empty())
			.unwrap_or_else(|| default_message.clone());

		self.inner.status.show(&message, color);
		SubmitOutcome {
			success: response.success,
			message,
		}
	}

	/// Full submit flow: shows the pending status, submits to the
	/// configured URL, and hides the status again after a success.
	///
	/// A failed outcome stays visible.
	pub async fn handle_form_submission(
		&self,
		form: &FormContainer,
	) -> Result<SubmitOutcome, SubmitError> {
		if form.submit_state().is_submitting() {
			let err = SubmitError::InFlight(form.id());
			tracing::warn!("{}", err);
			return Err(err);
		}

		let settings = &self.inner.settings;
		self.inner
			.status
			.show(&settings.messages.submitting, &settings.colors.pending);

		let outcome = self.submit_form_async(form, &settings.submit_url).await?;
		if outcome.success {
			self.inner.status.hide();
		}
		Ok(outcome)
	}

	/// Installs [`Self::handle_form_submission`] as a submit handler of `form`.
	pub fn wire(&self, form: &FormContainer) {
		let pipeline = self.clone();
		add_submit_event_listener(form, move |form| {
			let pipeline = pipeline.clone();
			async move {
				// Errors are already logged by the pipeline.
				let _ = pipeline.handle_form_submission(&form).await;
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::{
		create_checkbox_input, create_dropdown, create_radio_input, create_text_input,
		create_textarea,
	};
	use crate::form::{add_form_field, create_form};
	use futures::FutureExt;
	use reqwest::Method;
	use rstest::rstest;
	use std::cell::RefCell;

	/// Transport returning canned responses and recording payloads.
	struct StubTransport {
		response: Result<TransportResponse, SubmitError>,
		calls: Rc<RefCell<Vec<(String, SubmissionPayload)>>>,
	}

	impl StubTransport {
		fn replying(status: u16, body: &str) -> Self {
			Self {
				response: Ok(TransportResponse {
					status,
					body: body.to_string(),
				}),
				calls: Rc::default(),
			}
		}
	}

	#[async_trait(?Send)]
	impl Transport for StubTransport {
		async fn post_json(
			&self,
			url: &str,
			payload: &SubmissionPayload,
		) -> Result<TransportResponse, SubmitError> {
			self.calls
				.borrow_mut()
				.push((url.to_string(), payload.clone()));
			self.response.clone()
		}
	}

	/// Transport whose requests never complete.
	struct PendingTransport;

	#[async_trait(?Send)]
	impl Transport for PendingTransport {
		async fn post_json(
			&self,
			_url: &str,
			_payload: &SubmissionPayload,
		) -> Result<TransportResponse, SubmitError> {
			std::future::pending().await
		}
	}

	fn pipeline(transport: impl Transport + 'static) -> SubmissionPipeline {
		let status = StatusMessage::new(Element::new("div"));
		SubmissionPipeline::new(transport, status, FormSettings::default())
	}

	#[rstest]
	fn test_serialize_form_rules() {
		// Arrange
		let form = create_form("profile", "/submit", Method::POST);
		add_form_field(&form, &create_text_input("name", None, "", "Ada")).unwrap();
		add_form_field(&form, &create_textarea("bio", None, "", "Hi")).unwrap();
		add_form_field(
			&form,
			&create_dropdown("country", [("us", "United States"), ("ca", "Canada")], None),
		)
		.unwrap();
		add_form_field(&form, &create_checkbox_input("terms", None, false)).unwrap();
		add_form_field(&form, &create_radio_input("gender", "male", None, false)).unwrap();
		add_form_field(&form, &create_radio_input("gender", "female", None, true)).unwrap();
		let disabled = create_text_input("internal", None, "", "x");
		disabled.control().set_bool_attribute("disabled", true);
		add_form_field(&form, &disabled).unwrap();
		let unnamed = Element::new("input");
		unnamed.set_attribute("value", "ignored");
		form.element().append_child(&unnamed).unwrap();
		form.add_submit_button("Submit");

		// Act
		let payload = serialize_form(form.element());

		// Assert
		let keys: Vec<_> = payload.keys().map(String::as_str).collect();
		assert_eq!(keys, vec!["name", "bio", "country", "gender"]);
		assert_eq!(payload["bio"], "Hi");
		assert_eq!(payload["country"], "us");
		assert_eq!(payload["gender"], "female");
	}

	#[rstest]
	fn test_serialize_duplicate_names_keep_first_position() {
		// Arrange
		let form = create_form("tags", "/submit", Method::POST);
		add_form_field(&form, &create_text_input("tag", None, "", "first")).unwrap();
		add_form_field(&form, &create_text_input("other", None, "", "x")).unwrap();
		add_form_field(&form, &create_text_input("tag", None, "", "last")).unwrap();

		// Act
		let payload = serialize_form(form.element());

		// Assert
		assert_eq!(payload.get_index(0), Some((&"tag".to_string(), &"last".to_string())));
		assert_eq!(payload.len(), 2);
	}

	#[rstest]
	#[case(ServerResponse { success: true, message: None }, true, "Form submitted successfully!", "green")]
	#[case(ServerResponse { success: true, message: Some(String::new()) }, true, "Form submitted successfully!", "green")]
	#[case(ServerResponse { success: false, message: None }, false, "An error occurred while submitting the form.", "red")]
	#[case(ServerResponse::failure("Email taken"), false, "Email taken", "red")]
	fn test_handle_response(
		#[case] response: ServerResponse,
		#[case] success: bool,
		#[case] message: &str,
		#[case] color: &str,
	) {
		// Arrange
		let pipeline = pipeline(StubTransport::replying(200, "{}"));

		// Act
		let outcome = pipeline.handle_response(&response);

		// Assert
		assert_eq!(outcome.success, success);
		assert_eq!(outcome.message, message);
		assert_eq!(pipeline.status().text(), message);
		assert_eq!(pipeline.status().color().as_deref(), Some(color));
		assert!(pipeline.status().is_visible());
	}

	#[rstest]
	fn test_server_response_defaults() {
		let response: ServerResponse = serde_json::from_str("{}").unwrap();

		assert_eq!(response, ServerResponse::default());
		assert!(!response.success);
	}

	#[tokio::test]
	async fn test_submit_posts_payload_and_resolves() {
		// Arrange
		let transport = StubTransport::replying(200, r#"{"success":true,"message":"Saved"}"#);
		let calls = transport.calls.clone();
		let pipeline = pipeline(transport);
		let form = create_form("contact", "/api/contact", Method::POST);
		add_form_field(&form, &create_text_input("email", None, "", "a@b.co")).unwrap();

		// Act
		let outcome = pipeline.submit_form_async(&form, "/api/contact").await.unwrap();

		// Assert
		assert!(outcome.success);
		assert_eq!(outcome.message, "Saved");
		assert_eq!(form.submit_state(), SubmitState::Resolved(outcome));
		let calls = calls.borrow();
		assert_eq!(calls.len(), 1);
		assert_eq!(calls[0].0, "/api/contact");
		assert_eq!(calls[0].1["email"], "a@b.co");
	}

	#[tokio::test]
	async fn test_transport_error_becomes_failure_outcome() {
		// Arrange
		let transport = StubTransport {
			response: Err(SubmitError::Transport("connection refused".to_string())),
			calls: Rc::default(),
		};
		let pipeline = pipeline(transport);
		let form = create_form("contact", "/submit", Method::POST);

		// Act
		let outcome = pipeline.submit_form_async(&form, "/submit").await.unwrap();

		// Assert
		assert!(!outcome.success);
		assert_eq!(outcome.message, "connection refused");
		assert_eq!(pipeline.status().color().as_deref(), Some("red"));
	}

	#[tokio::test]
	async fn test_undecodable_body_is_failure() {
		let pipeline = pipeline(StubTransport::replying(200, "<html>"));
		let form = create_form("contact", "/submit", Method::POST);

		let outcome = pipeline.submit_form_async(&form, "/submit").await.unwrap();

		assert!(!outcome.success);
		assert!(outcome.message.starts_with("Invalid response body"));
	}

	#[tokio::test]
	async fn test_second_submission_while_in_flight_is_rejected() {
		// Arrange
		let pipeline = pipeline(StubTransport::replying(200, r#"{"success":true}"#));
		let form = create_form("contact", "/submit", Method::POST);
		let _pending = form.begin_submission().unwrap();

		// Act
		let direct = pipeline.submit_form_async(&form, "/submit").await;
		let handled = pipeline.handle_form_submission(&form).await;

		// Assert
		assert_eq!(direct, Err(SubmitError::InFlight("contact".to_string())));
		assert_eq!(handled, Err(SubmitError::InFlight("contact".to_string())));
		assert_eq!(pipeline.status().text(), "");
		assert_eq!(form.submit_state(), SubmitState::Submitting);
	}

	#[tokio::test]
	async fn test_abandoned_submission_releases_form() {
		// Arrange
		let stalled = pipeline(PendingTransport);
		let ok = pipeline(StubTransport::replying(200, r#"{"success":true}"#));
		let form = create_form("contact", "/submit", Method::POST);

		// Act
		let first = stalled.handle_form_submission(&form).now_or_never();
		let state_after_drop = form.submit_state();
		let retry = ok.handle_form_submission(&form).await;

		// Assert
		assert!(first.is_none());
		assert_eq!(state_after_drop, SubmitState::Idle);
		assert!(retry.unwrap().success);
		assert!(form.submit_state().outcome().unwrap().success);
	}

	#[tokio::test]
	async fn test_handle_form_submission_hides_only_on_success() {
		// Arrange
		let ok = pipeline(StubTransport::replying(200, r#"{"success":true}"#));
		let failing = pipeline(StubTransport::replying(500, r#"{"success":true}"#));
		let form = create_form("contact", "/submit", Method::POST);

		// Act
		let ok_outcome = ok.handle_form_submission(&form).await.unwrap();
		let failed_outcome = failing.handle_form_submission(&form).await.unwrap();

		// Assert
		assert!(ok_outcome.success);
		assert!(!ok.status().is_visible());
		assert_eq!(ok.status().text(), "Form submitted successfully!");
		assert!(!failed_outcome.success);
		assert_eq!(failed_outcome.message, "HTTP error! Status: 500");
		assert!(failing.status().is_visible());
	}
}
