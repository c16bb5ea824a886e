//! Configurator CLI
//!
//! Resolves layered configuration files from the command line and prints
//! the result, the load plan, the named directories or the environment.

use anyhow::Result;
use clap::Parser;
use layered_configurator::cli::show::ShowArgs;
use layered_configurator::cli::{Cli, Command, PathsArgs};
use layered_configurator::config::Configurator;
use layered_configurator::context::Context;
use layered_configurator::format::{format_config, format_paths, format_plan};
use std::fs::OpenOptions;
use std::io::Write;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {}
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    // Snapshot directories and environment once; every command reads from it.
    let context = Context::from_process()?;
    debug!(
        env = %context.env(),
        root = %context.paths().root().display(),
        "Context initialized"
    );

    match cli.command {
        Command::Show(args) => run_show(&context, args)?,
        Command::Plan(args) => {
            let settings = args.to_settings()?;
            let resolved = Configurator::new(&context).resolve(&settings)?;
            print!("{}", format_plan(&resolved.plan));
        }
        Command::Paths(PathsArgs { format }) => {
            print!("{}", format_paths(context.paths(), format)?);
        }
        Command::Env => println!("{}", context.env()),
    }

    Ok(())
}

fn run_show(context: &Context, args: ShowArgs) -> Result<()> {
    let settings = args.settings.to_settings()?;
    let config = Configurator::new(context).configure(&settings)?;
    let rendered = format_config(&config, args.format)?;

    match args.output {
        Some(path) => {
            let mut file = std::fs::File::create(&path)?;
            file.write_all(rendered.as_bytes())?;
            debug!(path = %path.display(), "Configuration written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
