use goalflow::config::AppConfig;
use tracing_subscriber::EnvFilter;

use std::error::Error;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let figment = rocket::Config::figment();
    let config = AppConfig::from_figment(&figment)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    goalflow::rocket_from_config(figment, &config)?
        .launch()
        .await?;

    Ok(())
}
