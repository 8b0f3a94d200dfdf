#![allow(clippy::print_stdout)]

mod handlers;
mod models;
mod services;

use crate::handlers::{admin, player};
use crate::models::args::{AppCommands, Cli};
use anyhow::{Context, Result};
use boxdraft::domain::config::AppConfig;
use boxdraft::kernel::config::load_config;
use boxdraft_logger::Logger;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config: AppConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;

    let _logger = Logger::builder().name(env!("CARGO_PKG_NAME")).apply(&config.logging)?.init()?;

    let app = boxdraft::init(&config).await.context("Failed to open the box draft storage")?;

    match cli.command {
        AppCommands::Show {} => player::show(&app),
        AppCommands::Register { answers, join } => player::register(&app, answers, join).await?,
        AppCommands::Join { player, box_id } => player::join(&app, &player, &box_id).await?,
        AppCommands::Teammates { player } => player::teammates(&app, &player)?,
        AppCommands::Admin { password, action } => {
            admin::handle_admin_command(&app, &password, action).await?;
        },
    }

    Ok(())
}
