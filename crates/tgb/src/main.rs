use tgb_client::Bot;
use tgb_core::config::Config;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), tgb_core::Error> {
    tgb_core::logging::init("tgb")?;

    let cfg = Config::load()?;
    let bot = Bot::from_config(&cfg)?;

    match &cfg.webhook_url {
        Some(url) => {
            let resp = bot.set_webhook(url).await?;
            info!(%url, response = %resp, "webhook registration response");
        }
        None => {
            warn!("WEBHOOK_URL is not set; nothing to register");
        }
    }

    Ok(())
}
