//! Command-line front end for the qldp client core.
//!
//! # Responsibility
//! - Verify `qldp_core` linkage and print the action registry.
//! - Replay recorded raw actions and check route access offline.

use clap::{Parser, Subcommand};
use log::info;
use qldp_core::{
    init_logging, init_stderr_logging, parse_role, registry, AuthSession, ClientConfig,
    DispatchOutcome, Landing, LoginSuccess, Navigator, Role, RouteTable, Store,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "qldp")]
#[command(about = "qldp client state and routing tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write rolling log files to this absolute directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// JSON client configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print core ping and version
    Ping,

    /// List registered action types as domain, operation, constant
    Registry,

    /// Dispatch a JSON array of raw actions and print the final state
    Replay {
        /// File holding `[{"type": ..., ...}, ...]`
        actions: PathBuf,
    },

    /// Navigate the side-nav routes and print where the navigation lands
    Route {
        /// Path to navigate, optionally with a query string
        path: String,

        /// Navigate with an authenticated session
        #[arg(long)]
        authenticated: bool,

        /// Role held by the session; repeatable, implies --authenticated
        #[arg(long = "role", value_parser = parse_role)]
        roles: Vec<Role>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path).map_err(|err| err.to_string())?,
        None => ClientConfig::default(),
    };
    if cli.log_level.is_some() {
        config.log_level = cli.log_level.clone();
    }
    if cli.log_dir.is_some() {
        config.log_dir = cli.log_dir.clone();
    }
    start_logging(&config)?;

    match cli.command {
        Commands::Ping => {
            println!("qldp_core ping={}", qldp_core::ping());
            println!("qldp_core version={}", qldp_core::core_version());
            Ok(())
        }
        Commands::Registry => {
            for (domain, operations) in registry() {
                for (operation, constant) in operations {
                    println!("{domain}\t{operation}\t{constant}");
                }
            }
            Ok(())
        }
        Commands::Replay { actions } => replay(&actions),
        Commands::Route {
            path,
            authenticated,
            roles,
        } => {
            let table = RouteTable::side_nav(config.router).map_err(|err| err.to_string())?;
            let session = session_for(authenticated, roles);
            let navigation = Navigator::new(&table).navigate(&path, &session);
            println!("visited={}", navigation.visited.join(" -> "));
            println!("location={}", navigation.location);
            println!("outcome={}", describe_landing(&navigation.landing));
            Ok(())
        }
    }
}

fn start_logging(config: &ClientConfig) -> Result<(), String> {
    let level = config.effective_log_level();
    match &config.log_dir {
        Some(dir) => {
            let dir = dir
                .to_str()
                .ok_or_else(|| format!("log dir is not valid UTF-8: {}", dir.display()))?;
            init_logging(level, dir)
        }
        None => init_stderr_logging(level),
    }
}

fn replay(path: &Path) -> Result<(), String> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
    let actions = parse_actions(&text)?;

    let mut store = Store::new();
    info!(
        "event=replay_start module=cli status=ok session={} actions={}",
        store.session_id(),
        actions.len()
    );
    for (index, raw) in actions.iter().enumerate() {
        let outcome = store.dispatch_raw(raw);
        eprintln!("#{index} {}", describe_outcome(&outcome));
    }

    let state = serde_json::to_string_pretty(store.state())
        .map_err(|err| format!("failed to serialize state: {err}"))?;
    println!("{state}");
    Ok(())
}

fn parse_actions(text: &str) -> Result<Vec<Value>, String> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(actions)) => Ok(actions),
        Ok(_) => Err("replay file must hold a JSON array of actions".to_string()),
        Err(err) => Err(format!("invalid replay JSON: {err}")),
    }
}

fn session_for(authenticated: bool, roles: Vec<Role>) -> AuthSession {
    if !authenticated && roles.is_empty() {
        return AuthSession::default();
    }
    AuthSession::signed_in(&LoginSuccess::new("cli", roles))
}

fn describe_outcome(outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Applied {
            action_type,
            changed,
        } => {
            let changed = changed
                .iter()
                .map(|key| key.as_str())
                .collect::<Vec<_>>()
                .join(",");
            format!("applied type={action_type} changed=[{changed}]")
        }
        DispatchOutcome::Ignored => "ignored".to_string(),
        DispatchOutcome::Rejected(err) => format!("rejected error={err}"),
        DispatchOutcome::Stale(ticket) => {
            format!("stale slice={} seq={}", ticket.slice, ticket.sequence)
        }
        DispatchOutcome::Misrouted {
            ticket,
            action_type,
        } => format!("misrouted type={action_type} slice={}", ticket.slice),
    }
}

fn describe_landing(landing: &Landing) -> String {
    match landing {
        Landing::Page { page, props } => match props.role {
            Some(role) => format!("render page={page} role={role}"),
            None => format!("render page={page}"),
        },
        Landing::Blocked { cause } => format!("blocked cause={cause}"),
        Landing::RedirectLoop => "redirect_loop".to_string(),
    }
}
