use clap::{Parser, Subcommand};

use crate::config::AppData;
use crate::jobs;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an internal job
    #[command(subcommand)]
    Job(JobCommand),
}

#[derive(Debug, Subcommand)]
pub enum JobCommand {
    /// Polls the mod listing once and refreshes the persisted index
    SyncIndex,
}

pub async fn run(data: &AppData) -> anyhow::Result<()> {
    let cli = Args::parse();

    // running with no subcommand is a sync run; it's what this tool is for
    let job = match cli.command {
        Some(Commands::Job(JobCommand::SyncIndex)) | None => "sync_index",
    };

    if let Err(e) = jobs::start_job(job, data).await {
        anyhow::bail!("Job {} failed: {}", job, e);
    }
    log::info!("Job {} completed", job);
    Ok(())
}
