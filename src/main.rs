use tracing_subscriber::EnvFilter;

use elion::config::GameConfig;

fn main() -> Result<(), elion::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("elion=info")),
        )
        .init();

    elion::app::run(GameConfig::default())
}
