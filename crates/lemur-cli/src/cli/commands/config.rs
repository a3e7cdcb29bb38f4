//! `lemur config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn mask(secret: Option<&str>) -> String {
    secret.map_or_else(
        || "(not set)".dimmed().to_string(),
        |s| {
            let chars: Vec<char> = s.chars().collect();
            if chars.len() > 8 {
                let head: String = chars[..4].iter().collect();
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("{head}...{tail}")
            } else {
                "****".to_string()
            }
        },
    )
}

fn show_config(ctx: &Context) -> Result<()> {
    let mut config = Config::load()?;

    if ctx.output_format != OutputFormat::Pretty {
        // Secrets stay out of machine-readable output
        config.token = config.token.map(|t| mask(Some(&t)));
        config.jks_passphrase = config.jks_passphrase.map(|_| "****".to_string());
        if let Some(rendered) = ctx.output_format.render(&config)? {
            println!("{rendered}");
        }
        return Ok(());
    }

    let unset = || "(not set)".dimmed().to_string();

    println!("{}", "Current Configuration:".bold());
    println!();
    println!(
        "  {} {}",
        "host:".bold(),
        config.host.clone().unwrap_or_else(unset)
    );
    println!(
        "  {} {}",
        "username:".bold(),
        config.username.clone().unwrap_or_else(unset)
    );
    println!("  {} {}", "token:".bold(), mask(config.token.as_deref()));
    println!(
        "  {} {}",
        "jks_passphrase:".bold(),
        config
            .jks_passphrase
            .as_ref()
            .map_or_else(unset, |_| "****".to_string())
    );
    println!(
        "  {} {}",
        "timeout_secs:".bold(),
        config
            .timeout_secs
            .map_or_else(|| "30 (default)".to_string(), |t| t.to_string())
    );
    println!(
        "  {} {}",
        "output_format:".bold(),
        config.output_format.unwrap_or_default()
    );

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    println!("{} {} set.", "Success:".green().bold(), key.cyan());
    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_shows_only_edges_of_long_secrets() {
        assert_eq!(mask(Some("abcd1234wxyz")), "abcd...wxyz");
        assert_eq!(mask(Some("short")), "****");
        assert!(mask(None).contains("not set"));
    }
}
