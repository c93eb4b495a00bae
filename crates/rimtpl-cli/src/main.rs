use clap::{CommandFactory, Parser};
use color_eyre::eyre::Result;
use rimtpl_core::RimTplError;
use rimtpl_services::{check_install_root, generate_templates, GenerateOptions};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::Layer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[macro_use]
mod ui;
mod progress;

/// Exit status for usage errors and a wrong installation folder.
const EXIT_USAGE: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "rimtpl",
    version,
    about = "RimWorld Translation Template tool",
    long_about = "Copies all Defs from the RimWorld Core mod folder and creates DefInjected templates for them."
)]
struct Cli {
    /// RimWorld installation folder
    install_root: Option<PathBuf>,
    /// Folder for templates (DefInjected is rebuilt inside it)
    template_root: Option<PathBuf>,
}

fn init_tracing() -> WorkerGuard {
    let file_appender = rolling::daily("logs", "rimtpl.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // stdout belongs to the progress bar
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}

fn print_banner(install_root: &std::path::Path, template_root: &std::path::Path) {
    println!("--------------------------------------------------------------------");
    println!("RimWorld Translation Template tool");
    println!();
    println!("RimWorld installation folder is \"{}\"", install_root.display());
    println!("Templates will be created in folder \"{}\"", template_root.display());
    println!("--------------------------------------------------------------------");
    println!();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let (install_root, template_root) = match (cli.install_root, cli.template_root) {
        (Some(install), Some(templates)) => (install, templates),
        (None, _) => {
            Cli::command().print_help()?;
            std::process::exit(EXIT_USAGE);
        }
        (Some(_), None) => {
            ui_err!("Incorrect arguments.");
            eprintln!("Usage: rimtpl <RimWorld installation folder> <Folder for templates>");
            std::process::exit(EXIT_USAGE);
        }
    };

    let _guard = init_tracing();
    tracing::debug!(event = "args", install_root = ?install_root, template_root = ?template_root);

    let cfg = rimtpl_config::load_config()?;
    let opts = GenerateOptions::from_config(&install_root, &template_root, &cfg);

    print_banner(&install_root, &template_root);

    if let Err(e) = check_install_root(&opts) {
        if let Some(RimTplError::InvalidInstallRoot(path)) = e.downcast_ref::<RimTplError>() {
            tracing::error!(event = "invalid_install_root", path = %path.display());
            ui_err!("Invalid RimWorld installation folder.");
            std::process::exit(EXIT_USAGE);
        }
        return Err(e);
    }
    println!("Valid installation folder.");
    println!();

    let bar = progress::collecting_bar()?;
    let summary = generate_templates(&opts, |current, total| {
        progress::advance(&bar, current, total)
    });
    bar.finish();
    let summary = summary?;

    println!();
    println!();
    ui_info!(
        "{} of {} files produced templates ({} entries).",
        summary.files_written,
        summary.files_total,
        summary.entries_written
    );
    ui_ok!("Successfully processed all files.");
    Ok(())
}
