use std::path::PathBuf;

use clap::{Parser, Subcommand};
use logifly::Severity;

#[derive(Parser, Debug)]
#[command(name = "logifly", version, about = "Broadcast notifications to Discord and webhooks")]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, env = "LOGIFLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Exit with status 2 when any member of a broadcast fails
    #[arg(long, global = true)]
    pub fail_on_error: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a plain text message to a group
    Send {
        group: String,
        message: String,
        /// Override the sender name
        #[arg(long)]
        username: Option<String>,
        /// Override the sender avatar
        #[arg(long)]
        avatar_url: Option<String>,
    },

    /// Send an embed to a group
    Embed {
        group: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Embed color, e.g. 0x3498db or 3447003
        #[arg(long, value_parser = parse_color)]
        color: Option<u32>,
    },

    /// Send a severity-styled embed (success, error, warning, info)
    Notify {
        group: String,
        #[arg(value_parser = parse_severity)]
        severity: Severity,
        title: String,
        description: String,
    },

    /// Test the connection of every member (all groups when none is given)
    Test { group: Option<String> },

    /// List configured groups
    Groups,

    /// List the members of a group
    Clients { group: String },
}

fn parse_color(input: &str) -> Result<u32, String> {
    let trimmed = input.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix('#'))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => trimmed.parse::<u32>(),
    };
    match parsed {
        Ok(color) if color <= 0xffffff => Ok(color),
        Ok(_) => Err(format!("color out of range: {}", input)),
        Err(e) => Err(format!("invalid color '{}': {}", input, e)),
    }
}

fn parse_severity(input: &str) -> Result<Severity, String> {
    input.parse::<Severity>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("0x3498db"), Ok(0x3498db));
        assert_eq!(parse_color("#ff0000"), Ok(0xff0000));
        assert_eq!(parse_color("65280"), Ok(0x00ff00));
        assert!(parse_color("0x1000000").is_err());
        assert!(parse_color("green").is_err());
    }

    #[test]
    fn test_parse_notify_command() {
        let args = Args::parse_from([
            "logifly", "notify", "alerts", "warn", "Disk", "90% full", "-v",
        ]);
        assert!(args.verbose);
        match args.command {
            Commands::Notify {
                group, severity, ..
            } => {
                assert_eq!(group, "alerts");
                assert_eq!(severity, Severity::Warning);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
