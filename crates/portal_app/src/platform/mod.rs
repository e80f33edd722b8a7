mod app;
mod cli;
mod effects;
mod logging;
mod notifier;
mod portal;
mod prompt;
mod storage;
#[cfg(test)]
mod testing;
mod ui;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use portal_core::Page;
use portal_engine::{ApiSettings, ApplicationFilters, JobFilters, ReqwestApiClient};
use portal_logging::portal_info;

use cli::{AdminCommand, Cli, Command, JobsCommand};
use notifier::Notifier;
use portal::Portal;
use prompt::TerminalPrompter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log);
    portal_info!("portal starting; api={}", cli.api_base_url);

    let client = ReqwestApiClient::new(ApiSettings::with_base_url(cli.api_base_url.clone()))
        .context("failed to build HTTP client")?;
    let mut portal = Portal::new(
        client,
        &cli.data_dir,
        Notifier::terminal(),
        Box::new(TerminalPrompter),
        Box::new(io::stdout()),
    )?;

    match cli.command.unwrap_or(Command::Apply) {
        Command::Apply => portal.open(Page::Application),
        Command::Jobs(JobsCommand::List(args)) => {
            let filters = JobFilters {
                category: args.category,
                location: args.location,
                job_type: args.job_type,
            };
            let page = if args.all { Page::Jobs } else { Page::Home };
            portal.list_jobs(&filters, page)
        }
        Command::Jobs(JobsCommand::Search { keyword }) => portal.search_jobs(&keyword),
        Command::Jobs(JobsCommand::Show { id }) => portal.show_job(&id),
        Command::Jobs(JobsCommand::Apply { id }) => portal.apply_to_job(&id),
        Command::Login => portal.open(Page::Login),
        Command::Signup => portal.open_signup(),
        Command::Logout => portal.logout(),
        Command::Whoami => portal.whoami(),
        Command::Contact => portal.open(Page::Contact),
        Command::Health => portal.health(),
        Command::Admin(AdminCommand::Applications { job_title, email }) => {
            portal.admin_applications(&ApplicationFilters { job_title, email })
        }
        Command::Admin(AdminCommand::Application { id }) => portal.admin_application(&id),
        Command::Admin(AdminCommand::Contacts) => portal.admin_contacts(),
        Command::Admin(AdminCommand::CreateJob { file }) => portal.admin_create_job(&file),
    }
}
