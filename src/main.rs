use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use meridiem_field::app::{self, Application};
use meridiem_field::cli::{Cli, Commands};
use meridiem_field::config::{Config, FieldConfig};
use meridiem_field::field::MeridiemTimeField;
use meridiem_field::time_value::SystemClock;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with custom format
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.field.apply(&mut config.field);

    let field_config = FieldConfig::from_settings(&config.field, &SystemClock)
        .context("Invalid field configuration")?;
    info!("Using display format '{}'", field_config.format);

    match cli.command {
        Some(Commands::Check { text, meridiem, json }) => {
            let report = app::check(field_config, &text, meridiem, SystemClock);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{} {}", report.display, report.meridiem);
                if let Some(submit) = &report.submit_value {
                    println!("submit: {}", submit);
                }
                for error in &report.errors {
                    println!("error: {}", error);
                }
            }
            if !report.valid {
                std::process::exit(1);
            }
            Ok(())
        }
        None => {
            let field = MeridiemTimeField::new(field_config);
            Application::new(field, config.shell).run()
        }
    }
}
