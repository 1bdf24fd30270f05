use quizrun::config::Config;
use tokio::runtime::Runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse environment variables
    let config = Config::from_env()?;
    log::info!("using {} question sources", config.sources.len());

    let runtime = Runtime::new()?;
    runtime.block_on(quizrun::app::run(config))
}
