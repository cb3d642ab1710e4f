use aura_configuration::{load_config, setup_logging};
use aura_setup::build_and_run;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    setup_logging(&config.logging);
    build_and_run(config).await?;
    Ok(())
}
