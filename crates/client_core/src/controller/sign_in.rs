//! The "Login" screen.

use shared::protocol::Credentials;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{alert::Alert, error::FormError, forms::FormRecord, navigation::Route};

use super::{MountOutcome, ScreenContext, SubmitOutcome};

pub const MISSING_CREDENTIALS: &str = "Preencha todos os campos corretamente.";
pub const SIGNED_IN: &str = "Login efetuado com sucesso.";

pub struct SignInController {
    ctx: ScreenContext,
    credentials: Credentials,
    loading: watch::Sender<bool>,
}

impl SignInController {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            credentials: Credentials::default(),
            loading: watch::Sender::new(false),
        }
    }

    /// Users who are already signed in go straight home.
    pub fn mount(&self) -> MountOutcome {
        if self.ctx.session.active().is_some() {
            return self.ctx.redirect(Route::Home);
        }
        MountOutcome::Ready
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// True while a sign-in request is in flight; the submit action should be disabled.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Follows the loading flag from outside while `submit` holds the controller.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn update_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.credentials.set_named(name, value)
    }

    pub fn go_to_sign_up(&self) {
        self.ctx.navigator.navigate(Route::SignUp);
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        self.ctx.alerts.clear();

        if let Err(err) = self.credentials.validate() {
            debug!(error = %err, "sign-in form incomplete");
            self.ctx.alerts.show(Alert::warning(MISSING_CREDENTIALS));
            return SubmitOutcome::Invalid(err);
        }

        self.loading.send_replace(true);
        let result = self.ctx.api.sign_in(&self.credentials).await;
        self.loading.send_replace(false);

        match result {
            Ok(session) => {
                info!(user_id = %session.id, "signed in");
                self.ctx.alerts.show(Alert::success(SIGNED_IN));
                self.ctx.session.set(session);
                self.ctx.navigator.navigate(Route::Home);
                SubmitOutcome::Completed
            }
            Err(err) => {
                warn!(error = %err, email = %self.credentials.email, "sign-in failed");
                self.ctx.report_failure(&err);
                self.credentials.password.clear();
                SubmitOutcome::Failed(err)
            }
        }
    }
}
