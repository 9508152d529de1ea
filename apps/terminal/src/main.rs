use std::{
    process::ExitCode,
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::load_settings, AlertKind, AlertSlot, FileSessionStore, HttpApiClient, MountOutcome,
    Navigator, RegistrationController, Route, ScreenContext, SessionStore, SignInController,
};
use shared::domain::TabSelection;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "freela", about = "Sign in and register projects and clients")]
struct Args {
    /// Overrides the api url from client.toml / APP__API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    SignOut,
    /// List the clients available for new projects.
    Clients,
    AddClient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    AddProject {
        #[arg(long)]
        title: String,
        #[arg(long)]
        resume: String,
        #[arg(long)]
        important_infos: String,
        #[arg(long)]
        start_date: String,
        #[arg(long)]
        limit_date: String,
        #[arg(long)]
        client_id: String,
        /// Accepts `500,00` or `500.00`.
        #[arg(long, default_value = "")]
        value: String,
    },
}

#[derive(Default)]
struct TerminalNavigator {
    last: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    fn last(&self) -> Option<Route> {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        info!(%route, "navigate");
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }
}

fn flush_alert(alerts: &AlertSlot) {
    let Some(alert) = alerts.take() else {
        return;
    };
    match alert.kind {
        AlertKind::Success => println!("{}", alert.text),
        AlertKind::Warning => eprintln!("warning: {}", alert.text),
        AlertKind::Error => eprintln!("error: {}", alert.text),
    }
}

/// Mounts the registration screen; `None` when the user must sign in first.
async fn open_registration(
    ctx: ScreenContext,
    alerts: &AlertSlot,
) -> Option<(RegistrationController, MountOutcome)> {
    let mut screen = RegistrationController::new(ctx);
    let outcome = screen.mount().await;
    flush_alert(alerts);
    if let MountOutcome::Redirected(_) = outcome {
        eprintln!("not signed in; run `freela sign-in` first");
        return None;
    }
    Some((screen, outcome))
}

/// Prints the client list; a list that failed to load is not an empty one.
fn list_clients(screen: &RegistrationController, outcome: &MountOutcome) -> bool {
    match outcome {
        MountOutcome::Ready if screen.clients().is_empty() => {
            println!("no clients registered yet");
            true
        }
        MountOutcome::Ready => {
            for (id, name) in screen.client_options() {
                println!("{id}\t{name}");
            }
            true
        }
        MountOutcome::ClientsUnavailable(_) | MountOutcome::Redirected(_) => false,
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    let api = HttpApiClient::new(settings.api_base_url()?);
    let session = Arc::new(
        FileSessionStore::open(&settings.session_file).context("failed to load session")?,
    );
    let alerts = Arc::new(AlertSlot::default());
    let navigator = Arc::new(TerminalNavigator::default());
    let ctx = ScreenContext::new(
        Arc::new(api),
        session.clone(),
        alerts.clone(),
        navigator.clone(),
    );

    let completed = match args.command {
        Command::SignIn { email, password } => {
            let mut screen = SignInController::new(ctx);
            if let MountOutcome::Redirected(_) = screen.mount() {
                println!("already signed in; run `freela sign-out` to switch accounts");
                true
            } else {
                screen.update_field("email", &email)?;
                screen.update_field("password", &password)?;
                screen.submit().await.is_completed()
            }
        }
        Command::SignOut => {
            session.clear();
            println!("signed out");
            true
        }
        Command::Clients => match open_registration(ctx, &alerts).await {
            Some((screen, outcome)) => list_clients(&screen, &outcome),
            None => false,
        },
        Command::AddClient { name, email, phone } => {
            match open_registration(ctx, &alerts).await {
                Some((mut screen, _)) => {
                    screen.select_tab(TabSelection::Client);
                    screen.update_client_field("name", &name)?;
                    screen.update_client_field("email", &email)?;
                    screen.update_client_field("phone", &phone)?;
                    screen.submit_client().await.is_completed()
                }
                None => false,
            }
        }
        Command::AddProject {
            title,
            resume,
            important_infos,
            start_date,
            limit_date,
            client_id,
            value,
        } => match open_registration(ctx, &alerts).await {
            Some((mut screen, _)) => {
                screen.select_tab(TabSelection::Project);
                screen.update_project_field("title", &title)?;
                screen.update_project_field("resume", &resume)?;
                screen.update_project_field("importantInfos", &important_infos)?;
                screen.update_project_field("startDate", &start_date)?;
                screen.update_project_field("limitDate", &limit_date)?;
                screen.update_project_field("value", &value)?;
                screen.select_client(&client_id)?;
                screen.submit_project().await.is_completed()
            }
            None => false,
        },
    };

    flush_alert(&alerts);
    if let Some(route) = navigator.last() {
        info!(%route, "finished on route");
    }

    Ok(if completed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
