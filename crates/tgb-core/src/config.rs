use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

/// Typed process configuration.
///
/// Holds only what the client needs: the bot credential, the optional
/// webhook target, and the transport timeout.
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub webhook_url: Option<String>,
    pub http_timeout: Duration,
}

impl Config {
    /// Load from the environment, reading an optional `.env` first.
    ///
    /// Fails fast with `MissingCredential` when `TELEGRAM_BOT_TOKEN` is
    /// absent or blank; no network call is ever attempted without a token.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(env_str)
    }

    /// Build from any key lookup. `load` feeds it the process environment;
    /// tests feed it a plain map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = lookup("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if bot_token.trim().is_empty() {
            return Err(Error::MissingCredential(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let webhook_url = lookup("WEBHOOK_URL").and_then(non_empty);
        let http_timeout = Duration::from_millis(
            lookup("HTTP_TIMEOUT_MS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(10_000),
        );

        Ok(Self {
            bot_token,
            webhook_url,
            http_timeout,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
