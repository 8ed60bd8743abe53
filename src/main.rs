//! CLI entry point for gpg-encrypt-dialog
//!
//! Without a subcommand, lists the keys and opens the encryption settings
//! dialog. `list` and `select` provide the same data without a display.
//!
//! Exit status is 0 when settings were confirmed (and printed), 1 on
//! cancel or any failure.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use gpg_encrypt_dialog::config::{Settings, DEFAULT_GPG_PROGRAM, GPG_PROGRAM_ENV, LOG_ENV};
use gpg_encrypt_dialog::core::{EncryptionSettings, Event, Keyring, Mode, Signer};
use gpg_encrypt_dialog::gpg::{load_keyring, GpgCli, KeySource};
use gpg_encrypt_dialog::ui::Controller;
use std::io::Write;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(feature = "gui")]
const GPG_ERROR_TITLE: &str = "GPG Error";
const GPG_ERROR_DETAIL: &str =
    "Failed to retrieve GPG keys. Please ensure GPG is installed and configured correctly.";

#[derive(Parser)]
#[command(name = "gpg-encrypt-dialog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// GPG executable used to list keys
    #[arg(long, env = GPG_PROGRAM_ENV, default_value = DEFAULT_GPG_PROGRAM, global = true)]
    gpg: String,

    /// GnuPG home directory passed to gpg as --homedir
    #[arg(long, global = true)]
    homedir: Option<String>,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List keys offered by the dialog
    List {
        /// List secret (signing) keys instead of public keys
        #[arg(long)]
        secret: bool,
    },

    /// Choose settings without the dialog and print them
    Select {
        /// Passphrase-only encryption
        #[arg(long)]
        symmetric: bool,

        /// Recipient key, by full or short id (repeatable)
        #[arg(short, long = "recipient", value_name = "KEY_ID")]
        recipients: Vec<String>,

        /// Signing key by full or short id, or "none"
        #[arg(short, long, value_name = "KEY_ID")]
        signer: Option<String>,
    },
}

/// How a run ended, when it didn't fail
enum Outcome {
    /// Settings confirmed; print the contract
    Confirmed(EncryptionSettings),
    /// User backed out
    Cancelled,
    /// Diagnostic command finished
    Done,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(Outcome::Confirmed(settings)) => match print_settings(&settings) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{} Failed to write settings: {}", "✗".red().bold(), e);
                ExitCode::FAILURE
            }
        },
        Ok(Outcome::Cancelled) => {
            info!("Cancelled, no settings printed");
            ExitCode::FAILURE
        }
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Routes logs to stderr; stdout is reserved for the settings contract
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let settings = Settings::resolve(&cli.gpg, cli.homedir.as_deref())?;
    let source = GpgCli::from_settings(&settings);

    match cli.command {
        None => run_dialog(&source),
        Some(Commands::List { secret }) => list_keys(&source, secret),
        Some(Commands::Select {
            symmetric,
            recipients,
            signer,
        }) => select(&source, symmetric, &recipients, signer.as_deref()),
    }
}

/// Default flow: load keys, then let the user choose
fn run_dialog(source: &impl KeySource) -> anyhow::Result<Outcome> {
    let keyring = load_keyring(source)
        .inspect_err(|_| report_load_failure())
        .context(GPG_ERROR_DETAIL)?;

    // Nothing to choose from: passphrase-only without asking
    if keyring.is_empty() {
        info!("No keys found, using passphrase-only encryption");
        return Ok(Outcome::Confirmed(EncryptionSettings::symmetric()));
    }

    interactive(keyring)
}

#[cfg(feature = "gui")]
fn interactive(keyring: Keyring) -> anyhow::Result<Outcome> {
    use gpg_encrypt_dialog::ui::App;

    Ok(match App::new(keyring).run() {
        Some(settings) => Outcome::Confirmed(settings),
        None => Outcome::Cancelled,
    })
}

#[cfg(not(feature = "gui"))]
fn interactive(_keyring: Keyring) -> anyhow::Result<Outcome> {
    Err(anyhow::anyhow!(
        "built without the \"gui\" feature; use the select command instead"
    ))
}

#[cfg(feature = "gui")]
fn report_load_failure() {
    gpg_encrypt_dialog::ui::App::show_error(GPG_ERROR_TITLE, GPG_ERROR_DETAIL);
}

/// Without a display the error is only reported once, by `main`
#[cfg(not(feature = "gui"))]
fn report_load_failure() {}

/// Non-interactive selection through the same state machine as the dialog
fn select(
    source: &impl KeySource,
    symmetric: bool,
    recipients: &[String],
    signer: Option<&str>,
) -> anyhow::Result<Outcome> {
    let keyring = load_keyring(source)?;

    if keyring.is_empty() {
        info!("No keys found, using passphrase-only encryption");
        return Ok(Outcome::Confirmed(EncryptionSettings::symmetric()));
    }

    let controller = Controller::new(keyring);

    if symmetric {
        controller.dispatch(Event::ModeChanged(Mode::Symmetric))?;
    }

    for query in recipients {
        let full_id = controller
            .keyring()
            .public
            .resolve(query)
            .map(|record| record.full_id().to_string())
            .context("Invalid recipient")?;

        // Toggling twice would deselect
        if !controller.is_selected(&full_id) {
            controller.dispatch(Event::KeyToggled(full_id))?;
        }
    }

    if let Some(query) = signer {
        let signer = if query.eq_ignore_ascii_case("none") {
            Signer::None
        } else {
            controller
                .keyring()
                .secret
                .resolve(query)
                .map(|record| Signer::Key(record.full_id().to_string()))
                .context("Invalid signer")?
        };
        controller.dispatch(Event::SignerChanged(signer))?;
    }

    Ok(Outcome::Confirmed(controller.confirm()?))
}

/// List keys of one kind, deduplicated as the dialog shows them
fn list_keys(source: &impl KeySource, secret: bool) -> anyhow::Result<Outcome> {
    let keyring = load_keyring(source)?;
    let (label, registry) = if secret {
        ("Secret", &keyring.secret)
    } else {
        ("Public", &keyring.public)
    };

    println!("{}", format!("{} keys:\n", label).bold());

    for record in registry.iter() {
        let marker = if record.is_secret() {
            "sec".green()
        } else {
            "pub".dimmed()
        };

        println!(
            "{} {} {} {}",
            marker,
            record.short_id().cyan().bold(),
            record.full_id().dimmed(),
            record.uid()
        );
    }

    println!("\n{} Total: {} keys", "✓".green(), registry.len());

    Ok(Outcome::Done)
}

fn print_settings(settings: &EncryptionSettings) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", settings)?;
    stdout.flush()
}
