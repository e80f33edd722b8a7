use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use portal_engine::DEFAULT_API_BASE_URL;

#[derive(Debug, Parser)]
#[command(name = "portal", version, about = "Browse jobs and apply from the terminal")]
pub struct Cli {
    /// Base URL of the portal API.
    #[arg(long, global = true, env = "PORTAL_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Directory holding the local session store.
    #[arg(long, global = true, default_value = ".")]
    pub data_dir: PathBuf,

    /// Where log output goes.
    #[arg(long, global = true, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fill in and submit the job application form.
    Apply,
    /// Browse job listings.
    #[command(subcommand)]
    Jobs(JobsCommand),
    /// Sign in to an existing account.
    Login,
    /// Create an account.
    Signup,
    /// Sign out and forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Send a message to the portal team.
    Contact,
    /// Check that the API is reachable.
    Health,
    /// Review applications and messages, publish jobs.
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// List jobs; the first few unless `--all` is given.
    List(JobListArgs),
    /// Search jobs by keyword.
    Search { keyword: String },
    /// Show one job.
    Show { id: String },
    /// Pick a job and open the application form for it.
    Apply { id: String },
}

#[derive(Debug, Args)]
pub struct JobListArgs {
    #[arg(long)]
    pub all: bool,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long = "job-type")]
    pub job_type: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List submitted applications.
    Applications {
        #[arg(long = "job-title")]
        job_title: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Show one application.
    Application { id: String },
    /// List contact messages.
    Contacts,
    /// Publish a job described by a JSON file.
    CreateJob { file: PathBuf },
}
