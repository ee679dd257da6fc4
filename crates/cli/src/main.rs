//! `crm` -- command-line front end for the CRM client session.
//!
//! Persists the session under a data directory between invocations, so
//! `crm login` followed by `crm whoami` behaves like a page reload.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                                   | Description                        |
//! |------------------------|----------|-------------------------------------------|------------------------------------|
//! | `CRM_API_URL`          | no       | `https://crm-backend-ebpg.onrender.com/api` | Backend base URL                 |
//! | `CRM_APP_ORIGIN`       | no       | `http://localhost:5173`                   | Client origin; `https` marks the token cookie secure |
//! | `CRM_DATA_DIR`         | no       | `.crm`                                    | Where cookies and local items live |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`                                      | Per-request timeout                |
//! | `LOG_FORMAT`           | no       | --                                        | `json` for JSON log lines          |
//! | `CRM_PASSWORD`         | no       | --                                        | Password when `--password` is omitted |

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crm_api::{ApiClient, ClientConfig};
use crm_core::auth::{LoginRequest, RegisterRequest};
use crm_core::routes::nav_links;
use crm_core::{Role, Route, SessionState};
use crm_session::{flow, AuthFlowError, Navigator, SessionStore, TokenStore, View};
use crm_storage::{FileCookieJar, FileLocalStorage};

/// crm: sign in to the CRM backend and inspect what the session may open
#[derive(Parser)]
#[command(name = "crm")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "CRM_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and log in with it
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "CRM_PASSWORD", hide_env_values = true)]
        password: String,

        /// Role of the new account (admin, user)
        #[arg(short, long, default_value = "user", value_parser = Role::from_str_value)]
        role: Role,
    },

    /// Forget the stored session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Resolve a path the way the router would
    Open {
        /// Path such as `/leads/42` or `/admin`
        path: String,
    },

    /// List the navigation links for the current session
    Links,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays pipeable.
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crm_cli=info,crm_session=info".into()),
        )
        .with(json_logs.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("Invalid configuration")?;

    tracing::debug!(
        api_url = %config.api_url,
        data_dir = %config.data_dir.display(),
        "Starting crm",
    );

    let (api, mut session) = open_session(&config)?;

    match cli.command {
        Commands::Login { email, password } => {
            let request = LoginRequest { email, password };
            let next = flow::sign_in(&api, &mut session, &request)
                .await
                .map_err(report)?;
            print_session(&session.state());
            println!("-> {next}");
        }
        Commands::Register {
            name,
            email,
            password,
            role,
        } => {
            let request = RegisterRequest {
                name,
                email,
                password,
                role,
            };
            let next = flow::sign_up(&api, &mut session, &request)
                .await
                .map_err(report)?;
            print_session(&session.state());
            println!("-> {next}");
        }
        Commands::Logout => {
            session.logout();
            println!("Logged out");
        }
        Commands::Whoami => print_session(&session.state()),
        Commands::Open { path } => {
            let mut navigator = Navigator::default();
            match navigator.navigate(&path, &session.state()) {
                View::Loading => println!("Loading..."),
                View::Page(route) if route.path() == Route::parse(&path).path() => {
                    println!("{route}");
                }
                View::Page(route) => println!("{path} -> {route}"),
            }
        }
        Commands::Links => {
            for link in nav_links(&session.state()) {
                println!("{:<10} {}", link.label, link.route);
            }
        }
    }

    Ok(())
}

/// Build the request client and a hydrated session over the data directory.
fn open_session(config: &ClientConfig) -> Result<(ApiClient, SessionStore)> {
    let jar = FileCookieJar::open(&config.data_dir).context("Failed to open cookie jar")?;
    let local = FileLocalStorage::open(&config.data_dir).context("Failed to open local storage")?;
    let (api, writer) = ApiClient::new(config).context("Failed to build HTTP client")?;

    let tokens = TokenStore::new(jar, writer, config.secure_origin());
    let mut session = SessionStore::new(tokens, local);
    session.hydrate();

    Ok((api, session))
}

/// Print the user-facing message of a failed flow and pass it on.
fn report(err: AuthFlowError) -> anyhow::Error {
    eprintln!("{}", err.display_message());
    if let Some(route) = err.redirect() {
        eprintln!("-> {route}");
    }
    anyhow::Error::new(err)
}

fn print_session(state: &SessionState) {
    match (state.is_authenticated(), state.user()) {
        (false, _) => println!("Not logged in"),
        (true, Some(user)) => println!("{} <{}> ({})", user.name, user.email, user.role),
        (true, None) => println!("Logged in (profile unavailable)"),
    }
}
