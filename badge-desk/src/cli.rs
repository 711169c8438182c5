use std::path::PathBuf;

use badge_client::{DateLocale, GenerationTarget};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "badge-desk", version, about = "Issue employee ID badges")]
pub struct Cli {
    /// API root of the badge server
    #[arg(long, env = "BADGE_API_URL", default_value = badge_client::config::DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Host serving employee photos and barcode images
    #[arg(
        long,
        env = "BADGE_ASSET_URL",
        default_value = badge_client::config::DEFAULT_ASSET_BASE_URL
    )]
    pub asset_url: String,

    /// Session, badge and log storage (defaults to the platform data dir)
    #[arg(long, env = "BADGE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Open generated badges in the system browser
    #[arg(long, env = "BADGE_OPEN_BROWSER", default_value_t = false)]
    pub open_browser: bool,

    /// Request timeout in seconds (unbounded when omitted)
    #[arg(long, env = "BADGE_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Date locale for profiles: ar-SY or en
    #[arg(long, env = "BADGE_DATE_LOCALE", default_value = "ar-SY", value_parser = parse_locale)]
    pub date_locale: DateLocale,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in as an operator
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// End the operator session
    Logout,
    /// Show the logged-in operator
    Whoami,
    /// List employees
    Employees,
    /// Generate badge surfaces for an employee
    Generate {
        employee_id: String,
        #[arg(long, default_value = "both", value_parser = parse_target)]
        side: GenerationTarget,
    },
    /// Show the public profile of an employee
    Profile { employee_id: String },
    /// Resolve a path through the route guard
    Navigate { path: String },
}

fn parse_target(s: &str) -> Result<GenerationTarget, String> {
    s.parse()
}

fn parse_locale(s: &str) -> Result<DateLocale, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults_to_both() {
        let cli = Cli::try_parse_from(["badge-desk", "generate", "7"]).unwrap();
        match cli.command {
            Command::Generate { employee_id, side } => {
                assert_eq!(employee_id, "7");
                assert_eq!(side, GenerationTarget::Both);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_side() {
        assert!(Cli::try_parse_from(["badge-desk", "generate", "7", "--side", "top"]).is_err());
    }

    #[test]
    fn test_login_flags() {
        let cli = Cli::try_parse_from([
            "badge-desk",
            "--date-locale",
            "en",
            "login",
            "-u",
            "amal",
            "-p",
            "secret",
        ])
        .unwrap();
        assert_eq!(cli.date_locale, DateLocale::En);
        assert!(matches!(cli.command, Command::Login { ref username, .. } if username == "amal"));
    }
}
