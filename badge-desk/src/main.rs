//! badge-desk: operator console for the ID badge service
//!
//! Logs the operator in, lists employees, generates badge surfaces and
//! renders public employee profiles.

mod cli;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, bail};
use badge_client::{BadgeApp, ClientConfig, ProfilePhase, Route, decide};
use clap::Parser;

use cli::{Cli, Command};

const APP_DIR: &str = "awqaf-badge";

fn data_dir(cli: &Cli) -> PathBuf {
    cli.data_dir.clone().unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let data_dir = data_dir(&cli);
    let _log_guard = logging::init(&data_dir)?;

    let mut config = ClientConfig::new(&cli.api_url)
        .with_asset_base_url(&cli.asset_url)
        .with_date_locale(cli.date_locale);
    if let Some(seconds) = cli.timeout {
        config = config.with_timeout(seconds);
    }

    let app = BadgeApp::builder(config)
        .data_dir(&data_dir)
        .open_viewer(cli.open_browser)
        .build()
        .context("failed to initialize badge client")?;

    tracing::info!(api = %cli.api_url, data_dir = %data_dir.display(), "badge-desk starting");

    run(&app, cli.command).await
}

async fn run(app: &BadgeApp, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => {
            app.navigate("/login");
            match app.login_flow().submit(&username, &password).await {
                Ok(user) => println!("مرحباً، {}", user.username),
                Err(e) => bail!(e.user_message()),
            }
        }

        Command::Logout => {
            app.badge_workflow().logout();
            println!("{}", app.navigator().current());
        }

        Command::Whoami => {
            require_generator(app)?;
            if let Some(name) = app.badge_workflow().operator_name() {
                println!("{}", name);
            }
        }

        Command::Employees => {
            require_generator(app)?;
            let workflow = app.badge_workflow();
            let employees = workflow.enter().await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
            for employee in employees {
                println!("{}\t{}", employee.id, employee.full_name);
            }
        }

        Command::Generate { employee_id, side } => {
            require_generator(app)?;
            let workflow = app.badge_workflow();
            workflow.select_employee(Some(employee_id));
            let handles = workflow
                .generate(side)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            for handle in handles {
                match &handle.location {
                    Some(path) => println!("{}", path.display()),
                    None => println!("{}", handle.id),
                }
            }
        }

        Command::Profile { employee_id } => {
            let route = app.navigator().navigate(Route::Employee(employee_id));
            match app.profile_workflow().mount(&route).await {
                ProfilePhase::Ready(view) => println!("{}", view),
                ProfilePhase::Error(message) => bail!(message),
                ProfilePhase::Loading => {}
            }
        }

        Command::Navigate { path } => {
            let target = Route::parse(&path);
            let decision = decide(&target, app.session().has_session());
            let landed = app.navigator().navigate(target);
            println!("{:?} -> {}", decision, landed);
        }
    }
    Ok(())
}

/// Protected commands land on the generator surface or fail with a login hint
fn require_generator(app: &BadgeApp) -> anyhow::Result<()> {
    let landed = app.navigate("/generator");
    if landed != Route::Generator {
        bail!("login required (redirected to {})", landed);
    }
    Ok(())
}
