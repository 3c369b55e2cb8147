//! HTTP adapter for the Telegram Bot API.
//!
//! Implements the `tgb-core` `MessageActions` port with plain `reqwest`
//! calls against `https://api.telegram.org/bot<token>/<method>`.

mod bot;
mod keyboard;
mod sent;

pub use bot::{Bot, SendOptions, DEFAULT_API_URL};
pub use keyboard::{callback_button, url_button, InlineButton, InlineKeyboardMarkup};
pub use sent::SentMessage;
