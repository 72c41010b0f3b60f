//! Casekit Demo CLI
//!
//! Diagnostic tooling for the manufacturer-API contracts: payload signing,
//! session ID validation, correlation tokens, and QR flows.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod ui;

/// Signing secrets observed in the captured staging exchanges; override for
/// any other environment.
const DEFAULT_SYSTEM_NAME: &str = "mobileShell";
const DEFAULT_FIXED_KEY: &str = "shfoa3sfwoehnf3290rqefiz4efd";
const DEFAULT_FRONTEND: &str = "https://pimpmycase.shop";

#[derive(Parser)]
#[command(name = "casekit-demo")]
#[command(about = "Casekit Demo CLI - Diagnose manufacturer API signing and ID contracts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a JSON payload (inline JSON or @file)
    Sign {
        /// The payload to sign
        payload: String,

        /// System name appended to the canonical string
        #[arg(long, default_value = DEFAULT_SYSTEM_NAME)]
        system_name: String,

        /// Fixed key appended after the system name
        #[arg(long, default_value = DEFAULT_FIXED_KEY)]
        fixed_key: String,
    },

    /// Session ID operations
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Payment/order correlation token operations
    ThirdId {
        #[command(subcommand)]
        action: ThirdIdAction,
    },

    /// QR code operations
    Qr {
        #[command(subcommand)]
        action: QrAction,
    },

    /// Show the manufacturer endpoint catalogue
    Endpoints {
        /// Print absolute URLs against this API origin
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Walk a full vending flow through the mock store
    Rehearse {
        /// Machine to issue the session from
        #[arg(long, default_value = "10HKNTDOH2BA")]
        machine_id: String,

        /// Payment amount
        #[arg(long, default_value = "19.99")]
        amount: String,

        /// Frontend origin embedded in the QR URL
        #[arg(long, default_value = DEFAULT_FRONTEND)]
        frontend: String,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Mint a fresh session ID
    Generate {
        /// Machine ID (alphanumerics and hyphens, no underscores)
        machine_id: String,
    },

    /// Validate a candidate session ID
    Validate {
        /// The candidate string
        session_id: String,
    },

    /// Decompose a session ID into its segments
    Inspect {
        /// The session ID
        session_id: String,
    },
}

#[derive(Subcommand)]
enum ThirdIdAction {
    /// Mint a correlation token
    Generate {
        /// Token kind: payment or order
        #[arg(long, default_value = "payment")]
        kind: String,
    },

    /// Validate and decompose a correlation token
    Inspect {
        /// The token
        token: String,
    },
}

#[derive(Subcommand)]
enum QrAction {
    /// Display the QR code for a vending session
    Session {
        /// Existing session ID to wrap
        session_id: Option<String>,

        /// Mint a fresh session for this machine instead
        #[arg(long)]
        machine_id: Option<String>,

        /// Frontend origin the QR points at
        #[arg(long, default_value = DEFAULT_FRONTEND)]
        frontend: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("casekit_demo_cli=debug,casekit_lib=debug,casekit_demo_core=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("casekit_demo_cli=info,casekit_lib=warn,casekit_demo_core=warn")
            .init();
    }

    match cli.command {
        Commands::Sign {
            payload,
            system_name,
            fixed_key,
        } => {
            commands::sign::run(&payload, &system_name, &fixed_key, cli.verbose)?;
        }
        Commands::Session { action } => match action {
            SessionAction::Generate { machine_id } => {
                commands::session::generate(&machine_id)?;
            }
            SessionAction::Validate { session_id } => {
                commands::session::validate(&session_id)?;
            }
            SessionAction::Inspect { session_id } => {
                commands::session::inspect(&session_id)?;
            }
        },
        Commands::ThirdId { action } => match action {
            ThirdIdAction::Generate { kind } => {
                commands::third_id::generate(&kind)?;
            }
            ThirdIdAction::Inspect { token } => {
                commands::third_id::inspect(&token)?;
            }
        },
        Commands::Qr { action } => match action {
            QrAction::Session {
                session_id,
                machine_id,
                frontend,
            } => {
                commands::qr::session(session_id.as_deref(), machine_id.as_deref(), &frontend)?;
            }
        },
        Commands::Endpoints { base_url } => {
            commands::endpoints::list(base_url.as_deref())?;
        }
        Commands::Rehearse {
            machine_id,
            amount,
            frontend,
        } => {
            commands::rehearse::run(&machine_id, &amount, &frontend)?;
        }
    }

    Ok(())
}
