use crate::ConfigAction;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use vellum_infrastructure::ConfigService;

pub fn run<W: Write>(action: ConfigAction, service: &ConfigService, out: &mut W) -> Result<()> {
    match action {
        ConfigAction::Path => writeln!(out, "{}", service.path().display())?,
        ConfigAction::Show => show(service, out)?,
        ConfigAction::Init => init(service, out)?,
    }
    Ok(())
}

fn show<W: Write>(service: &ConfigService, out: &mut W) -> Result<()> {
    let config = service
        .load_effective()
        .with_context(|| format!("Failed to load {}", service.path().display()))?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
    write!(out, "{rendered}")?;
    Ok(())
}

fn init<W: Write>(service: &ConfigService, out: &mut W) -> Result<()> {
    if service.init()? {
        writeln!(
            out,
            "{} {}",
            "Created".green().bold(),
            service.path().display()
        )?;
    } else {
        writeln!(
            out,
            "{} {}",
            "Already exists:".yellow(),
            service.path().display()
        )?;
    }
    Ok(())
}
