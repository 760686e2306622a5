use env_logger::Env;

mod cli;
mod config;
mod events;
mod gamebanana;
mod jobs;
mod mod_zip;
mod reconcile;
mod resolver;
mod store;
mod types;
mod webhook;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let data = config::build_config()?;
    cli::run(&data).await
}
