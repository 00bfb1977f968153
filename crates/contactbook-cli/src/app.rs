//! Application state container and event dispatcher.
//!
//! Network calls run on spawned tasks and report back through a channel as
//! [`ApiEvent`]s, so the UI keeps responding while a request is in flight.
//! Events are applied in arrival order; nothing is cancelled.

use std::{
  sync::Arc,
  time::{Duration, Instant},
};

use contactbook_core::contact::Contact;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::{
  client::{ApiClient, CreateOutcome},
  form::{ContactForm, FormErrors, FormField},
};

pub const SUCCESS_MESSAGE: &str = "Contact saved successfully!";
/// How long [`SUCCESS_MESSAGE`] stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(3);
pub const SAVE_FAILED: &str = "Failed to save contact";
pub const NETWORK_ERROR: &str = "Network error. Please check your internet connection.";

// ─── Focus ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  Field(FormField),
  Submit,
}

impl Focus {
  fn next(self) -> Self {
    match self {
      Focus::Field(FormField::Name) => Focus::Field(FormField::Email),
      Focus::Field(FormField::Email) => Focus::Field(FormField::Phone),
      Focus::Field(FormField::Phone) => Focus::Field(FormField::Message),
      Focus::Field(FormField::Message) => Focus::Submit,
      Focus::Submit => Focus::Field(FormField::Name),
    }
  }

  fn prev(self) -> Self {
    match self {
      Focus::Field(FormField::Name) => Focus::Submit,
      Focus::Field(FormField::Email) => Focus::Field(FormField::Name),
      Focus::Field(FormField::Phone) => Focus::Field(FormField::Email),
      Focus::Field(FormField::Message) => Focus::Field(FormField::Phone),
      Focus::Submit => Focus::Field(FormField::Message),
    }
  }
}

// ─── Events ───────────────────────────────────────────────────────────────────

/// A completed network call.
#[derive(Debug)]
pub enum ApiEvent {
  ContactsLoaded(anyhow::Result<Vec<Contact>>),
  Submitted(Result<CreateOutcome, reqwest::Error>),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Which input (or the submit button) receives keystrokes.
  pub focus: Focus,

  pub form: ContactForm,

  /// Inline validation messages.
  pub errors: FormErrors,

  /// Most recently fetched contacts, newest first.
  pub contacts: Vec<Contact>,

  /// Transient message shown after a successful submit.
  pub submit_status: String,
  status_expires_at: Option<Instant>,

  /// Pending blocking alert. While set, all input except dismissal is
  /// ignored.
  pub alert: Option<String>,

  /// Index of the first contact shown in the list pane.
  pub list_scroll: usize,

  pub client: Arc<ApiClient>,

  events_tx: mpsc::UnboundedSender<ApiEvent>,
  events_rx: mpsc::UnboundedReceiver<ApiEvent>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    Self {
      focus: Focus::Field(FormField::Name),
      form: ContactForm::default(),
      errors: FormErrors::new(),
      contacts: Vec::new(),
      submit_status: String::new(),
      status_expires_at: None,
      alert: None,
      list_scroll: 0,
      client: Arc::new(client),
      events_tx,
      events_rx,
    }
  }

  // ── Network ───────────────────────────────────────────────────────────────

  /// Start fetching the contact list. The result arrives as
  /// [`ApiEvent::ContactsLoaded`].
  pub fn load_contacts(&self) {
    let client = Arc::clone(&self.client);
    let tx = self.events_tx.clone();
    tokio::spawn(async move {
      let result = client.list_contacts().await;
      let _ = tx.send(ApiEvent::ContactsLoaded(result));
    });
  }

  /// Validate the form, replacing the error map wholesale, and POST it when
  /// there are no errors. Returns `true` if a request was started.
  pub fn submit(&mut self) -> bool {
    self.errors = self.form.validate();
    if !self.errors.is_empty() {
      return false;
    }

    let client = Arc::clone(&self.client);
    let tx = self.events_tx.clone();
    let body = self.form.to_new_contact();
    tokio::spawn(async move {
      let result = client.create_contact(&body).await;
      let _ = tx.send(ApiEvent::Submitted(result));
    });
    true
  }

  /// Wait for the next completed network call.
  #[cfg(test)]
  pub async fn next_event(&mut self) -> Option<ApiEvent> { self.events_rx.recv().await }

  /// A completed network call, if one is ready.
  pub fn try_next_event(&mut self) -> Option<ApiEvent> { self.events_rx.try_recv().ok() }

  /// Fold a completed network call into the state. `now` anchors the status
  /// message timer.
  pub fn apply(&mut self, event: ApiEvent, now: Instant) {
    match event {
      ApiEvent::ContactsLoaded(Ok(contacts)) => {
        self.contacts = contacts;
        self.list_scroll = self.list_scroll.min(self.contacts.len().saturating_sub(1));
      }
      ApiEvent::ContactsLoaded(Err(e)) => {
        tracing::warn!(error = %e, "Failed to fetch contacts");
      }
      ApiEvent::Submitted(Ok(CreateOutcome::Created)) => {
        self.form.clear();
        self.submit_status = SUCCESS_MESSAGE.to_owned();
        self.status_expires_at = Some(now + STATUS_TTL);
        self.load_contacts();
      }
      ApiEvent::Submitted(Ok(CreateOutcome::Rejected { status, error })) => {
        tracing::info!(%status, ?error, "contact rejected by server");
        let message = error.as_deref().unwrap_or(SAVE_FAILED);
        self.notify(format!("Error: {message}"));
      }
      ApiEvent::Submitted(Err(e)) => {
        tracing::warn!(error = %e, "submit failed");
        self.notify(NETWORK_ERROR.to_owned());
      }
    }
  }

  /// Expire the status message once its time is up.
  pub fn tick(&mut self, now: Instant) {
    if self.status_expires_at.is_some_and(|at| now >= at) {
      self.submit_status.clear();
      self.status_expires_at = None;
    }
  }

  /// Tell the user something synchronously: shown as a modal that must be
  /// dismissed before anything else can happen.
  pub fn notify(&mut self, message: String) { self.alert = Some(message); }

  // ── Form ──────────────────────────────────────────────────────────────────

  /// Replace a field's value.
  pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
    self.edit_field(field, |v| *v = value.into());
  }

  /// Mutate a field and drop its error, if any. The field is not
  /// re-validated.
  fn edit_field(&mut self, field: FormField, edit: impl FnOnce(&mut String)) {
    edit(self.form.value_mut(field));
    self.errors.remove(&field);
  }

  pub fn can_submit(&self) -> bool { self.form.is_submittable() }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global: Ctrl-C quits from anywhere.
    if ctrl && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.alert.is_some() {
      if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
        self.alert = None;
      }
      return true;
    }

    match key.code {
      KeyCode::Esc => return false,

      KeyCode::Char('s') if ctrl => {
        self.submit();
      }

      // Focus
      KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
      KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),

      // List scrolling
      KeyCode::PageDown => {
        if self.list_scroll + 1 < self.contacts.len() {
          self.list_scroll += 1;
        }
      }
      KeyCode::PageUp => self.list_scroll = self.list_scroll.saturating_sub(1),

      KeyCode::Enter => match self.focus {
        Focus::Submit => {
          if self.can_submit() {
            self.submit();
          }
        }
        Focus::Field(FormField::Message) => {
          self.edit_field(FormField::Message, |v| v.push('\n'));
        }
        Focus::Field(_) => self.focus = self.focus.next(),
      },

      KeyCode::Backspace => {
        if let Focus::Field(field) = self.focus {
          self.edit_field(field, |v| {
            v.pop();
          });
        }
      }

      KeyCode::Char(c) if !ctrl => {
        if let Focus::Field(field) = self.focus {
          self.edit_field(field, |v| v.push(c));
        }
      }

      _ => {}
    }
    true
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
  };
  use contactbook_store_sqlite::SqliteStore;
  use serde_json::json;

  use crate::client::ApiConfig;

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn ctrl(c: char) -> KeyEvent { KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL) }

  fn app_at(base_url: String) -> App {
    App::new(ApiClient::new(ApiConfig { base_url }).unwrap())
  }

  /// An app whose server is never contacted.
  fn offline_app() -> App { app_at("http://127.0.0.1:9".into()) }

  /// Serve `router` on an ephemeral local port and return its origin.
  async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}")
  }

  async fn real_backend() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    Router::new().nest("/api", contactbook_api::api_router(Arc::new(store)))
  }

  fn fill_valid(app: &mut App) {
    app.set_field(FormField::Name, "Ann");
    app.set_field(FormField::Email, "ann@x.com");
    app.set_field(FormField::Phone, "555");
    app.set_field(FormField::Message, "hello");
  }

  // ── Form state ───────────────────────────────────────────────────────────────

  #[test]
  fn submit_button_enabled_once_name_is_filled() {
    let mut app = offline_app();
    app.set_field(FormField::Email, "a@b.com");
    app.set_field(FormField::Phone, "1");
    assert!(!app.can_submit());

    app.set_field(FormField::Name, "Ann");
    assert!(app.can_submit());
  }

  #[test]
  fn typing_edits_the_focused_field() {
    let mut app = offline_app();
    for c in "Ann".chars() {
      app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Tab));
    for c in "a@b".chars() {
      app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Backspace));

    assert_eq!(app.form.name, "Ann");
    assert_eq!(app.form.email, "a@");
    assert_eq!(app.focus, Focus::Field(FormField::Email));
  }

  #[test]
  fn enter_in_message_inserts_newline() {
    let mut app = offline_app();
    app.focus = Focus::Field(FormField::Message);
    app.handle_key(key(KeyCode::Char('a')));
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Char('b')));
    assert_eq!(app.form.message, "a\nb");
  }

  #[test]
  fn focus_wraps_around() {
    let mut app = offline_app();
    app.handle_key(key(KeyCode::BackTab));
    assert_eq!(app.focus, Focus::Submit);
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Field(FormField::Name));
  }

  #[tokio::test]
  async fn editing_a_field_clears_only_its_error() {
    let mut app = offline_app();
    assert!(!app.submit());
    assert_eq!(app.errors.len(), 3);

    app.handle_key(key(KeyCode::Char('x')));
    assert!(!app.errors.contains_key(&FormField::Name));
    assert!(app.errors.contains_key(&FormField::Email));
    assert!(app.errors.contains_key(&FormField::Phone));
  }

  #[tokio::test]
  async fn submit_with_errors_sends_nothing() {
    let mut app = offline_app();
    app.set_field(FormField::Name, "Ann");
    app.set_field(FormField::Email, "nope");

    assert!(!app.submit());
    assert_eq!(
      app.errors.get(&FormField::Email).map(String::as_str),
      Some("Please enter a valid email")
    );
    assert_eq!(
      app.errors.get(&FormField::Phone).map(String::as_str),
      Some("Phone is required")
    );
    tokio::task::yield_now().await;
    assert!(app.try_next_event().is_none());
  }

  #[test]
  fn enter_on_disabled_submit_does_nothing() {
    let mut app = offline_app();
    app.focus = Focus::Submit;
    app.handle_key(key(KeyCode::Enter));
    assert!(app.errors.is_empty());
    assert!(app.try_next_event().is_none());
  }

  #[tokio::test]
  async fn ctrl_s_validates_even_when_disabled() {
    let mut app = offline_app();
    app.handle_key(ctrl('s'));
    assert_eq!(app.errors.len(), 3);
    assert!(app.form.name.is_empty(), "ctrl-s must not type an 's'");
  }

  // ── Alerts ───────────────────────────────────────────────────────────────────

  #[test]
  fn alert_blocks_input_until_dismissed() {
    let mut app = offline_app();
    app.notify("Error: boom".into());

    assert!(app.handle_key(key(KeyCode::Char('x'))));
    assert!(app.form.name.is_empty());
    assert!(app.alert.is_some());

    app.handle_key(key(KeyCode::Enter));
    assert!(app.alert.is_none());

    app.handle_key(key(KeyCode::Char('x')));
    assert_eq!(app.form.name, "x");
  }

  #[test]
  fn esc_quits_but_first_dismisses_alert() {
    let mut app = offline_app();
    app.notify("hi".into());
    assert!(app.handle_key(key(KeyCode::Esc)));
    assert!(!app.handle_key(key(KeyCode::Esc)));
  }

  // ── Against a server ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn successful_submit_resets_form_and_refreshes_list() {
    let mut app = app_at(serve(real_backend().await).await);
    fill_valid(&mut app);

    assert!(app.submit());
    let event = app.next_event().await.unwrap();
    let now = Instant::now();
    app.apply(event, now);

    assert_eq!(app.form, ContactForm::default());
    assert_eq!(app.submit_status, SUCCESS_MESSAGE);
    assert!(app.alert.is_none());

    app.tick(now + Duration::from_secs(2));
    assert_eq!(app.submit_status, SUCCESS_MESSAGE);
    app.tick(now + STATUS_TTL);
    assert!(app.submit_status.is_empty());

    // The success path triggers a list refresh.
    let event = app.next_event().await.unwrap();
    app.apply(event, Instant::now());
    assert_eq!(app.contacts.len(), 1);
    assert_eq!(app.contacts[0].name, "Ann");
    assert_eq!(app.contacts[0].message, "hello");
  }

  #[tokio::test]
  async fn initial_load_populates_list_newest_first() {
    use contactbook_core::{contact::NewContact, store::ContactStore as _};

    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    store.create(NewContact::new("Old", "o@x.com", "1")).await.unwrap();
    store.create(NewContact::new("New", "n@x.com", "2")).await.unwrap();
    let router = Router::new().nest("/api", contactbook_api::api_router(store));

    let mut app = app_at(serve(router).await);
    app.load_contacts();
    let event = app.next_event().await.unwrap();
    app.apply(event, Instant::now());

    let names: Vec<_> = app.contacts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["New", "Old"]);
  }

  #[tokio::test]
  async fn server_rejection_raises_alert_with_its_message() {
    let router = Router::new().route(
      "/api/contacts",
      post(|| async {
        (
          StatusCode::BAD_REQUEST,
          Json(json!({ "error": "Please enter a valid email" })),
        )
      }),
    );
    let mut app = app_at(serve(router).await);
    fill_valid(&mut app);

    assert!(app.submit());
    let event = app.next_event().await.unwrap();
    app.apply(event, Instant::now());

    assert_eq!(app.alert.as_deref(), Some("Error: Please enter a valid email"));
    assert_eq!(app.form.name, "Ann", "form must be kept on failure");
    assert!(app.submit_status.is_empty());
  }

  #[tokio::test]
  async fn rejection_without_error_body_uses_fallback() {
    let router = Router::new().route(
      "/api/contacts",
      post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "oops") }),
    );
    let mut app = app_at(serve(router).await);
    fill_valid(&mut app);

    assert!(app.submit());
    let event = app.next_event().await.unwrap();
    app.apply(event, Instant::now());

    assert_eq!(app.alert.as_deref(), Some("Error: Failed to save contact"));
  }

  #[tokio::test]
  async fn network_failure_raises_connectivity_alert() {
    // Reserve a port, then free it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut app = app_at(format!("http://{addr}"));
    fill_valid(&mut app);

    assert!(app.submit());
    let event = app.next_event().await.unwrap();
    app.apply(event, Instant::now());

    assert_eq!(app.alert.as_deref(), Some(NETWORK_ERROR));
    assert_eq!(app.form.phone, "555");
  }

  #[tokio::test]
  async fn failed_list_fetch_is_silent() {
    let router = Router::new().route(
      "/api/contacts",
      get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down") }),
    );
    let mut app = app_at(serve(router).await);

    app.load_contacts();
    let event = app.next_event().await.unwrap();
    app.apply(event, Instant::now());

    assert!(app.contacts.is_empty());
    assert!(app.alert.is_none());
  }
}
