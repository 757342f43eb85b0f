//! Form containers and assembly
//!
//! A [`FormContainer`] owns a `form` element plus everything that is not
//! part of the markup: the HTTP method, async submit handlers and the
//! submission state. Fields live in the element tree, so the tree stays
//! the single source of truth for which fields a form holds.

use crate::error::{FormError, FormResult};
use crate::field::FieldFragment;
use crate::submission::{SubmitOutcome, SubmitState};
use formsmith_dom::{Document, Element, Event, EventType};
use reqwest::Method;
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

type SubmitFuture = Pin<Box<dyn Future<Output = ()>>>;
type SubmitHandler = Rc<dyn Fn(FormContainer) -> SubmitFuture>;

struct FormInner {
	element: Element,
	action: String,
	method: Method,
	handlers: RefCell<Vec<SubmitHandler>>,
	state: RefCell<SubmitState>,
}

/// Handle to a form and its submission state.
///
/// Cloning yields another handle to the same form.
#[derive(Clone)]
pub struct FormContainer {
	inner: Rc<FormInner>,
}

impl std::fmt::Debug for FormContainer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormContainer")
			.field("element", &self.inner.element)
			.field("action", &self.inner.action)
			.field("method", &self.inner.method)
			.field("handlers_count", &self.inner.handlers.borrow().len())
			.field("state", &self.inner.state.borrow())
			.finish()
	}
}

/// Creates an empty form.
///
/// # Examples
///
/// ```
/// use formsmith_forms::create_form;
/// use reqwest::Method;
///
/// let form = create_form("signup", "/submit", Method::POST);
/// assert_eq!(
/// 	form.element().render_to_string(),
/// 	r#"<form id="signup" action="/submit" method="POST"></form>"#
/// );
/// ```
pub fn create_form(id: &str, action: &str, method: Method) -> FormContainer {
	let element = Element::new("form");
	element.set_id(id);
	element.set_attribute("action", action);
	element.set_attribute("method", method.as_str());
	FormContainer {
		inner: Rc::new(FormInner {
			element,
			action: action.to_string(),
			method,
			handlers: RefCell::new(Vec::new()),
			state: RefCell::new(SubmitState::Idle),
		}),
	}
}

/// Appends `field` as the last child of `form`.
pub fn add_form_field(form: &FormContainer, field: &FieldFragment) -> FormResult<()> {
	form.add_field(field)
}

/// Appends `field` to the form with the given id in `document`.
///
/// Does nothing and returns [`FormError::FormNotFound`] when no such form
/// exists.
pub fn add_field_to_form(
	document: &Document,
	form_id: &str,
	field: &FieldFragment,
) -> FormResult<()> {
	let form = lookup_form(document, form_id)?;
	form.append_child(field.wrapper())?;
	Ok(())
}

/// Removes the wrapper of the first control named `field_name` from the form
/// with the given id.
///
/// The lookup matches the control, but the whole wrapper (label, control and
/// error element) is removed.
pub fn remove_field_from(document: &Document, form_id: &str, field_name: &str) -> FormResult<()> {
	let form = lookup_form(document, form_id)?;
	remove_wrapper(&form, field_name)?;
	Ok(())
}

/// Registers an async handler run on every submit of `form`.
///
/// # Examples
///
/// ```
/// use formsmith_forms::{add_submit_event_listener, create_form};
/// use reqwest::Method;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let form = create_form("contact", "/submit", Method::POST);
/// let submitted = Rc::new(Cell::new(0));
/// let counter = submitted.clone();
/// add_submit_event_listener(&form, move |_form| {
/// 	let counter = counter.clone();
/// 	async move { counter.set(counter.get() + 1) }
/// });
///
/// let event = futures::executor::block_on(form.dispatch_submit());
/// assert!(event.default_prevented());
/// assert_eq!(submitted.get(), 1);
/// ```
pub fn add_submit_event_listener<F, Fut>(form: &FormContainer, handler: F)
where
	F: Fn(FormContainer) -> Fut + 'static,
	Fut: Future<Output = ()> + 'static,
{
	form.on_submit(handler);
}

fn lookup_form(document: &Document, form_id: &str) -> FormResult<Element> {
	document
		.get_element_by_id(form_id)
		.filter(|e| e.is("form"))
		.ok_or_else(|| {
			let err = FormError::FormNotFound(form_id.to_string());
			tracing::error!("{}", err);
			err
		})
}

fn find_wrapper(form: &Element, field_name: &str) -> FormResult<Element> {
	form.find_by_name(field_name)
		.and_then(|control| control.parent())
		.ok_or_else(|| field_not_found(field_name))
}

fn field_not_found(field_name: &str) -> FormError {
	let err = FormError::FieldNotFound(field_name.to_string());
	tracing::error!("{}", err);
	err
}

fn detach_wrapper(form: &Element, wrapper: &Element, field_name: &str) -> FormResult<()> {
	form.remove_child(wrapper).map_err(|err| {
		tracing::error!(field = field_name, "{}", err);
		FormError::from(err)
	})
}

fn remove_wrapper(form: &Element, field_name: &str) -> FormResult<Element> {
	let wrapper = find_wrapper(form, field_name)?;
	detach_wrapper(form, &wrapper, field_name)?;
	Ok(wrapper)
}

impl FormContainer {
	pub fn element(&self) -> &Element {
		&self.inner.element
	}

	pub fn id(&self) -> String {
		self.inner.element.id().unwrap_or_default()
	}

	pub fn action(&self) -> &str {
		&self.inner.action
	}

	pub fn method(&self) -> &Method {
		&self.inner.method
	}

	pub fn add_field(&self, field: &FieldFragment) -> FormResult<()> {
		self.inner.element.append_child(field.wrapper())?;
		Ok(())
	}

	/// Removes the wrapper of the first control named `name` and returns it
	/// as a fragment.
	///
	/// A wrapper that does not hold a form control is left in place.
	pub fn remove_field(&self, name: &str) -> FormResult<FieldFragment> {
		let element = &self.inner.element;
		let wrapper = find_wrapper(element, name)?;
		let fragment = FieldFragment::from_wrapper(&wrapper).ok_or_else(|| field_not_found(name))?;
		detach_wrapper(element, &wrapper, name)?;
		Ok(fragment)
	}

	/// Field fragments in document order.
	pub fn fields(&self) -> Vec<FieldFragment> {
		self.inner
			.element
			.children()
			.iter()
			.filter_map(FieldFragment::from_wrapper)
			.collect()
	}

	/// The first field whose control is named `name`.
	pub fn field(&self, name: &str) -> Option<FieldFragment> {
		self.fields().into_iter().find(|f| f.name() == name)
	}

	/// Appends a `button type="submit"` and returns it.
	pub fn add_submit_button(&self, text: &str) -> Element {
		let button = Element::new("button");
		button.set_attribute("type", "submit");
		button.set_text_content(text);
		// A fresh button cannot contain the form.
		let _ = self.inner.element.append_child(&button);
		button
	}

	pub fn on_submit<F, Fut>(&self, handler: F)
	where
		F: Fn(FormContainer) -> Fut + 'static,
		Fut: Future<Output = ()> + 'static,
	{
		let handler: SubmitHandler = Rc::new(move |form| -> SubmitFuture { Box::pin(handler(form)) });
		self.inner.handlers.borrow_mut().push(handler);
	}

	/// Dispatches a submit event on the form element, then awaits every
	/// registered handler in registration order.
	///
	/// The default action is prevented whenever a handler is registered.
	pub async fn dispatch_submit(&self) -> Event {
		let mut event = self.inner.element.dispatch_event(EventType::Submit);
		let handlers = self.inner.handlers.borrow().clone();
		if !handlers.is_empty() {
			event.prevent_default();
		}
		for handler in handlers {
			handler(self.clone()).await;
		}
		event
	}

	pub fn submit_state(&self) -> SubmitState {
		self.inner.state.borrow().clone()
	}

	/// Moves to `Submitting`; `None` if a submission is already in flight.
	///
	/// Dropping the returned guard without [`SubmissionGuard::finish`] moves
	/// the form back to `Idle`.
	pub(crate) fn begin_submission(&self) -> Option<SubmissionGuard> {
		let mut state = self.inner.state.borrow_mut();
		if state.is_submitting() {
			return None;
		}
		*state = SubmitState::Submitting;
		Some(SubmissionGuard {
			form: self.clone(),
			finished: false,
		})
	}
}

/// Holds a form in `Submitting` until finished or dropped.
pub(crate) struct SubmissionGuard {
	form: FormContainer,
	finished: bool,
}

impl SubmissionGuard {
	pub(crate) fn finish(mut self, outcome: SubmitOutcome) {
		self.finished = true;
		*self.form.inner.state.borrow_mut() = SubmitState::Resolved(outcome);
	}
}

impl Drop for SubmissionGuard {
	fn drop(&mut self) {
		if self.finished {
			return;
		}
		tracing::warn!(form = %self.form.id(), "submission cancelled before completion");
		*self.form.inner.state.borrow_mut() = SubmitState::Idle;
	}
}
