//! The "Cadastrar" screen: register a project or a client.

use shared::{
    domain::{ClientId, TabSelection},
    error::RequestError,
    protocol::{ClientListEntry, ClientRecord, ProjectRecord},
};
use tracing::{debug, info, warn};

use crate::{
    alert::Alert,
    error::FormError,
    forms::{parse_client_id, FormRecord},
    navigation::Route,
};

use super::{MountOutcome, ScreenContext, SubmitOutcome};

pub const MISSING_FIELDS: &str = "Preencha todos os campos.";
pub const PROJECT_CREATED: &str = "Projeto cadastrado com sucesso!";
pub const CLIENT_CREATED: &str = "Cliente cadastrado com sucesso!";

pub struct RegistrationController {
    ctx: ScreenContext,
    tab: TabSelection,
    project: ProjectRecord,
    client: ClientRecord,
    selected_client: String,
    clients: Vec<ClientListEntry>,
}

impl RegistrationController {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            tab: TabSelection::default(),
            project: ProjectRecord::default(),
            client: ClientRecord::default(),
            selected_client: String::new(),
            clients: Vec::new(),
        }
    }

    /// Sends signed-out users to sign-in, otherwise loads the client list.
    pub async fn mount(&mut self) -> MountOutcome {
        let Some(session) = self.ctx.session.active() else {
            info!("registration opened without a session");
            return self.ctx.redirect(Route::SignIn);
        };

        match self.ctx.api.fetch_clients(&session.token, session.id).await {
            Ok(clients) => {
                debug!(count = clients.len(), "client list loaded");
                self.clients = clients;
                MountOutcome::Ready
            }
            Err(err) => {
                warn!(error = %err, "failed to load client list");
                self.ctx.report_failure(&err);
                MountOutcome::ClientsUnavailable(err)
            }
        }
    }

    pub fn tab(&self) -> TabSelection {
        self.tab
    }

    pub fn select_tab(&mut self, tab: TabSelection) {
        self.tab = tab;
    }

    pub fn project(&self) -> &ProjectRecord {
        &self.project
    }

    pub fn client(&self) -> &ClientRecord {
        &self.client
    }

    pub fn clients(&self) -> &[ClientListEntry] {
        &self.clients
    }

    /// Value currently shown by the client selection control.
    pub fn selected_client(&self) -> &str {
        &self.selected_client
    }

    pub fn client_options(&self) -> impl Iterator<Item = (ClientId, &str)> + '_ {
        self.clients
            .iter()
            .map(|entry| (entry.client.id, entry.client.name.as_str()))
    }

    pub fn update_project_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.project.set_named(name, value)
    }

    pub fn update_client_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.client.set_named(name, value)
    }

    pub fn select_client(&mut self, value: &str) -> Result<(), FormError> {
        let client_id = parse_client_id(value)?;
        self.selected_client = value.to_string();
        self.project.client_id = client_id;
        Ok(())
    }

    pub async fn submit_project(&mut self) -> SubmitOutcome {
        let Some(session) = self.ctx.session.active() else {
            debug!("project submit ignored without a session");
            return SubmitOutcome::NoSession;
        };

        if let Err(err) = self.project.validate() {
            debug!(error = %err, "project form incomplete");
            self.ctx.alerts.show(Alert::warning(MISSING_FIELDS));
            return SubmitOutcome::Invalid(err);
        }

        let result = self
            .ctx
            .api
            .create_project(&self.project, &session.token, session.id)
            .await;
        self.finish("project", result, PROJECT_CREATED)
    }

    pub async fn submit_client(&mut self) -> SubmitOutcome {
        let Some(session) = self.ctx.session.active() else {
            debug!("client submit ignored without a session");
            return SubmitOutcome::NoSession;
        };

        if let Err(err) = self.client.validate() {
            debug!(error = %err, "client form incomplete");
            self.ctx.alerts.show(Alert::warning(MISSING_FIELDS));
            return SubmitOutcome::Invalid(err);
        }

        let result = self
            .ctx
            .api
            .create_client(&self.client, &session.token, session.id)
            .await;
        self.finish("client", result, CLIENT_CREATED)
    }

    fn finish(
        &self,
        what: &'static str,
        result: Result<(), RequestError>,
        success_text: &str,
    ) -> SubmitOutcome {
        match result {
            Ok(()) => {
                info!(record = what, "registration saved");
                self.ctx.alerts.show(Alert::success(success_text));
                self.ctx.navigator.navigate(Route::Home);
                SubmitOutcome::Completed
            }
            Err(err) => {
                warn!(record = what, error = %err, "registration failed");
                self.ctx.report_failure(&err);
                SubmitOutcome::Failed(err)
            }
        }
    }
}
