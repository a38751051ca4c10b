//! Application shell: one store, one transport, and the session flows that
//! span several operations.

use std::sync::Arc;
use std::time::Duration;

use crate::api::{ApiError, ApiTransport, HttpApiClient};
use crate::config::ClientConfig;
use crate::forms::LoginInput;
use crate::modal;
use crate::models::Role;
use crate::operations::{OpResult, Operations};
use crate::routing::{dashboard_for, guard, GuardDecision, GuardInput, Route};
use crate::store::{Action, MessageSlice, ModalData, ModalType, Store};

/// What the startup fetches produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Role of the restored session, if any.
    pub role: Option<Role>,
    pub signed_in: bool,
    pub doctors: usize,
    /// A patient with missing profile fields was shown the profile form.
    pub profile_prompt: bool,
}

pub struct App<A> {
    config: ClientConfig,
    store: Arc<Store>,
    ops: Operations<A>,
}

impl App<HttpApiClient> {
    /// Build the app against the configured backend.
    pub fn connect(config: ClientConfig) -> Result<Self, ApiError> {
        let api = HttpApiClient::from_config(&config)?;
        Ok(Self::new(api, config))
    }
}

impl<A: ApiTransport> App<A> {
    pub fn new(api: A, config: ClientConfig) -> Self {
        let store = Arc::new(Store::new(config.stale_policy));
        let ops = Operations::new(Arc::new(api), Arc::clone(&store));
        Self { config, store, ops }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn ops(&self) -> &Operations<A> {
        &self.ops
    }

    /// Startup: restore the session and prefetch the doctor directory.
    ///
    /// Neither failure is fatal; a failed session check leaves the app
    /// logged out.
    pub async fn bootstrap(&self) -> BootstrapReport {
        let (session, doctors) = tokio::join!(self.ops.check_session(), self.ops.list_doctors());

        if let Err(e) = &session {
            tracing::info!(reason = %e, "No active session");
        }
        if let Err(e) = &doctors {
            tracing::warn!(error = %e, "Doctor directory prefetch failed");
        }

        let profile_prompt = self.store.select(|s| {
            s.auth.role == Some(Role::Patient)
                && s.auth.user.as_ref().is_some_and(|u| !u.is_profile_complete())
        });
        if profile_prompt {
            self.open_modal(ModalType::CompleteProfile, None);
        }

        let report = BootstrapReport {
            role: self.store.select(|s| s.auth.role),
            signed_in: self.store.select(|s| s.auth.is_authenticated()),
            doctors: self.store.select(|s| s.dashboard.doctors.len()),
            profile_prompt,
        };
        tracing::info!(
            signed_in = report.signed_in,
            role = report.role.map(|r| r.as_str()),
            doctors = report.doctors,
            profile_prompt,
            "Bootstrap complete"
        );
        report
    }

    /// Log in, then re-check the session so the role is known. Returns the
    /// page to land on.
    pub async fn sign_in(&self, input: &LoginInput) -> OpResult<Route> {
        self.ops.login(input).await?;
        self.ops.check_session().await?;
        let landing = self
            .store
            .select(|s| s.auth.role)
            .map(dashboard_for)
            .unwrap_or(Route::Home);
        Ok(landing)
    }

    /// Fetch what the role's dashboard shows.
    pub async fn load_dashboard(&self, role: Role) {
        let results = match role {
            Role::Patient => {
                let (a, c) = tokio::join!(
                    self.ops.list_my_appointments(),
                    self.ops.list_my_case_histories()
                );
                vec![a.err(), c.err()]
            }
            Role::Doctor => vec![self.ops.list_doctor_appointments().await.err()],
            Role::Staff => {
                let (p, d) = tokio::join!(self.ops.list_patients(), self.ops.list_doctors());
                vec![p.err(), d.err()]
            }
        };
        let failed = results.iter().flatten().count();
        if failed > 0 {
            tracing::warn!(role = role.as_str(), failed, "Dashboard loaded with errors");
        }
    }

    pub fn dispatch(&self, action: Action) -> bool {
        self.store.dispatch(action)
    }

    pub fn open_modal(&self, modal_type: ModalType, data: Option<ModalData>) {
        match data {
            Some(data) => {
                for action in modal::open_with(modal_type, data) {
                    self.store.dispatch(action);
                }
            }
            None => {
                self.store.dispatch(modal::open(modal_type));
            }
        }
    }

    pub fn close_modal(&self) {
        self.store.dispatch(modal::close());
    }

    /// Clear a slice's messages after the configured delay.
    pub fn expire_messages(&self, slice: MessageSlice) -> tokio::task::JoinHandle<()> {
        self.store
            .schedule_clear(slice, Duration::from_secs(self.config.message_ttl_secs))
    }

    /// Guard decision for a location from the current session.
    pub fn navigate(&self, location: &str) -> GuardDecision {
        let input = self.store.select(|s| GuardInput::from_session(&s.auth));
        match Route::from_path(location) {
            // Keep the full location (query included) for the login return.
            Some(route) => match route.allowed_roles() {
                Some(allowed) => guard(&input, allowed, location),
                None => GuardDecision::Render,
            },
            None => GuardDecision::RedirectHome,
        }
    }
}
