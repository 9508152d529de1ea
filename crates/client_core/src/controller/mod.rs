//! Screen controllers: form state plus the submit flows that drive the API.

use std::sync::Arc;

use shared::error::RequestError;

use crate::{
    alert::{Alert, AlertSink},
    error::ValidationError,
    navigation::{Navigator, Route},
    session::SessionStore,
    FreelaApi,
};

pub mod registration;
pub mod sign_in;

/// Shown when a failed request carries no usable server message.
pub const REQUEST_FAILED_FALLBACK: &str = "Não foi possível concluir a requisição.";

/// Collaborators shared by every screen.
#[derive(Clone)]
pub struct ScreenContext {
    pub api: Arc<dyn FreelaApi>,
    pub session: Arc<dyn SessionStore>,
    pub alerts: Arc<dyn AlertSink>,
    pub navigator: Arc<dyn Navigator>,
}

impl ScreenContext {
    pub fn new(
        api: Arc<dyn FreelaApi>,
        session: Arc<dyn SessionStore>,
        alerts: Arc<dyn AlertSink>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            session,
            alerts,
            navigator,
        }
    }

    fn report_failure(&self, err: &RequestError) {
        self.alerts
            .show(Alert::error(err.display_text(REQUEST_FAILED_FALLBACK)));
    }

    fn redirect(&self, route: Route) -> MountOutcome {
        self.navigator.navigate(route);
        MountOutcome::Redirected(route)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    Ready,
    Redirected(Route),
    ClientsUnavailable(RequestError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No signed-in session; nothing was sent.
    NoSession,
    Invalid(ValidationError),
    Completed,
    Failed(RequestError),
}

impl SubmitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed)
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
