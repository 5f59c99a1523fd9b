//! In-memory onboarding flow sessions with debounced autosave.
//!
//! One session exists per email while a user works through the flow. The
//! session owns the authoritative flow state and accumulated form data;
//! the database record trails it via explicit saves on page transitions
//! and a debounced autosave on value changes.
//!
//! Autosave is a cancellable scheduled task: every value change
//! (re)schedules a single pending write and cancels the prior one, so a
//! burst of edits produces one write after the quiet period. Explicit
//! saves (`next`/`submit`) bypass the debounce, cancel any pending write,
//! and persist inline. A failed explicit save leaves the session exactly
//! as it was so the user can retry without re-entering data; a failed
//! autosave is logged and dropped (the next edit or transition will write
//! again). Concurrent writers for the same email are not coordinated:
//! last write wins.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use onboard_core::error::CoreError;
use onboard_core::field::{max_page, FieldDefinition};
use onboard_core::flow::{self, FlowError, FlowState};
use onboard_core::form::is_welcome_page;
use onboard_core::progress::ProgressStatus;

use super::store::ProgressStore;

/// Why a flow action failed: a refused transition (structured data the
/// handler turns into a user-facing message) or an error from below.
#[derive(Debug, thiserror::Error)]
pub enum FlowActionError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Snapshot of a session returned to the client after every action.
#[derive(Debug, Clone, Serialize)]
pub struct FlowSnapshot {
    pub email: String,
    /// Current page, absent once submitted.
    pub current_page: Option<i32>,
    pub submitted: bool,
    pub max_page: i32,
    /// Percent of the flow behind the user, 0..=100.
    pub progress_percent: i32,
    /// True when the current page renders as the static welcome screen
    /// (page 1 with no fields assigned).
    pub welcome_screen: bool,
    pub form_data: Value,
    /// True on the first response after resuming with saved data.
    pub welcome_back: bool,
}

struct FlowSession {
    state: FlowState,
    form_data: Value,
    pending_save: Option<CancellationToken>,
}

impl FlowSession {
    /// Cancel the pending autosave, if one is scheduled.
    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending_save.take() {
            token.cancel();
        }
    }
}

/// Manages all active onboarding flow sessions, keyed by email.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct FlowManager {
    store: Arc<dyn ProgressStore>,
    debounce: Duration,
    sessions: RwLock<HashMap<String, FlowSession>>,
}

impl FlowManager {
    pub fn new(store: Arc<dyn ProgressStore>, debounce: Duration) -> Self {
        Self {
            store,
            debounce,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start (or restart) a session for an email.
    ///
    /// Loads stored progress -- an email that never saved gets the
    /// zero-value record -- and seeds the in-memory session from it. The
    /// returned snapshot carries `welcome_back = true` exactly once, when
    /// resumed form data was found.
    pub async fn mount(
        &self,
        email: &str,
        catalog: &[FieldDefinition],
    ) -> Result<FlowSnapshot, CoreError> {
        let stored = self.store.load(email).await?;

        let (state, form_data) = match stored {
            Some(rec) if rec.completed => (FlowState::Submitted, rec.form_data),
            Some(rec) => (
                FlowState::from_page(rec.current_page, max_page(catalog)),
                rec.form_data,
            ),
            None => (
                FlowState::from_page(1, max_page(catalog)),
                Value::Object(Default::default()),
            ),
        };

        let welcome_back = form_data.as_object().is_some_and(|o| !o.is_empty());

        let mut sessions = self.sessions.write().await;
        if let Some(mut previous) = sessions.insert(
            email.to_string(),
            FlowSession {
                state,
                form_data,
                pending_save: None,
            },
        ) {
            previous.cancel_pending();
        }
        let session = &sessions[email];

        tracing::info!(email, page = ?session.state.page(), welcome_back, "Flow session mounted");

        Ok(make_snapshot(email, session, catalog, welcome_back))
    }

    /// Current snapshot of a mounted session.
    pub async fn snapshot(
        &self,
        email: &str,
        catalog: &[FieldDefinition],
    ) -> Result<FlowSnapshot, CoreError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(email).ok_or_else(|| session_not_found(email))?;
        Ok(make_snapshot(email, session, catalog, false))
    }

    /// Record a field value change and (re)schedule the debounced autosave.
    ///
    /// No validation runs here and `completed` is never touched; invalid
    /// values only block page transitions, not persistence of everything
    /// else the user already typed.
    pub async fn set_value(
        &self,
        email: &str,
        label: &str,
        value: Value,
    ) -> Result<(), CoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(email)
            .ok_or_else(|| session_not_found(email))?;

        let Some(page) = session.state.page() else {
            return Err(CoreError::Validation(
                "Onboarding has already been submitted".to_string(),
            ));
        };

        if !session.form_data.is_object() {
            session.form_data = Value::Object(Default::default());
        }
        if let Value::Object(map) = &mut session.form_data {
            map.insert(label.to_string(), value);
        }

        session.cancel_pending();
        let token = CancellationToken::new();
        session.pending_save = Some(token.clone());

        let store = Arc::clone(&self.store);
        let debounce = self.debounce;
        let email = email.to_string();
        let form_data = session.form_data.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(debounce) => {
                    match store
                        .save(&email, page, &form_data, false, ProgressStatus::InProgress)
                        .await
                    {
                        Ok(()) => tracing::debug!(email = %email, page, "Autosaved progress"),
                        Err(e) => tracing::error!(email = %email, error = %e, "Autosave failed"),
                    }
                }
            }
        });

        Ok(())
    }

    /// Advance one page: validate, persist immediately, then transition.
    pub async fn next(
        &self,
        email: &str,
        catalog: &[FieldDefinition],
    ) -> Result<FlowSnapshot, FlowActionError> {
        let (new_state, persist, form_data) = {
            let mut sessions = self.sessions.write().await;
            let session = sessions
                .get_mut(email)
                .ok_or_else(|| session_not_found(email))?;

            let (new_state, persist) = flow::next(session.state, catalog, &session.form_data)?;
            session.cancel_pending();
            (new_state, persist, session.form_data.clone())
        };

        // Persist outside the lock; the session is only advanced once the
        // write succeeded, so a storage failure loses nothing.
        self.store
            .save(
                email,
                persist.page,
                &form_data,
                persist.completed,
                ProgressStatus::InProgress,
            )
            .await?;

        self.commit_state(email, new_state, catalog, "Flow advanced").await
    }

    /// Go back one page. No validation, nothing persisted.
    pub async fn previous(
        &self,
        email: &str,
        catalog: &[FieldDefinition],
    ) -> Result<FlowSnapshot, FlowActionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(email)
            .ok_or_else(|| session_not_found(email))?;

        session.state = flow::previous(session.state)?;
        tracing::debug!(email, page = ?session.state.page(), "Flow went back");
        Ok(make_snapshot(email, session, catalog, false))
    }

    /// Submit from the final page: validate, persist as completed, then
    /// enter the terminal state.
    pub async fn submit(
        &self,
        email: &str,
        catalog: &[FieldDefinition],
    ) -> Result<FlowSnapshot, FlowActionError> {
        let (new_state, persist, form_data) = {
            let mut sessions = self.sessions.write().await;
            let session = sessions
                .get_mut(email)
                .ok_or_else(|| session_not_found(email))?;

            let (new_state, persist) = flow::submit(session.state, catalog, &session.form_data)?;
            session.cancel_pending();
            (new_state, persist, session.form_data.clone())
        };

        self.store
            .save(
                email,
                persist.page,
                &form_data,
                persist.completed,
                ProgressStatus::Completed,
            )
            .await?;

        self.commit_state(email, new_state, catalog, "Flow submitted").await
    }

    /// Drop a session, cancelling any pending autosave.
    ///
    /// Returns whether a session existed. Navigating away stops autosave
    /// timers; it does not delete the stored record.
    pub async fn unmount(&self, email: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.remove(email) {
            Some(mut session) => {
                session.cancel_pending();
                tracing::info!(email, "Flow session unmounted");
                true
            }
            None => false,
        }
    }

    /// Cancel every pending autosave. Called during graceful shutdown.
    pub async fn shutdown(&self) {
        let mut sessions = self.sessions.write().await;
        for session in sessions.values_mut() {
            session.cancel_pending();
        }
        tracing::info!(count = sessions.len(), "Flow sessions drained");
    }

    /// Store the post-persist state and return the resulting snapshot.
    async fn commit_state(
        &self,
        email: &str,
        new_state: FlowState,
        catalog: &[FieldDefinition],
        log_msg: &'static str,
    ) -> Result<FlowSnapshot, FlowActionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(email)
            .ok_or_else(|| session_not_found(email))?;
        session.state = new_state;
        tracing::info!(email, page = ?new_state.page(), "{log_msg}");
        Ok(make_snapshot(email, session, catalog, false))
    }
}

fn session_not_found(email: &str) -> CoreError {
    CoreError::NotFound {
        entity: "FlowSession",
        id: email.to_string(),
    }
}

fn make_snapshot(
    email: &str,
    session: &FlowSession,
    catalog: &[FieldDefinition],
    welcome_back: bool,
) -> FlowSnapshot {
    let max = max_page(catalog);
    let (current_page, submitted, progress_percent) = match session.state {
        FlowState::Page(n) => (Some(n), false, ((n - 1) * 100) / max.max(1)),
        FlowState::Submitted => (None, true, 100),
    };
    FlowSnapshot {
        email: email.to_string(),
        current_page,
        submitted,
        max_page: max,
        progress_percent,
        welcome_screen: current_page.is_some_and(|n| is_welcome_page(catalog, n)),
        form_data: session.form_data.clone(),
        welcome_back,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
