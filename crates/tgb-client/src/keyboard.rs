use serde::Serialize;

/// One inline-keyboard button. Exactly one of `callback_data` / `url` is
/// set, depending on which constructor built it.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct InlineButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Rows of buttons, serialized as `{"inline_keyboard": [[...]]}`.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }
}

/// Button that reports `callback_data` back through a `callback_query`
/// update when pressed. Pure data, no network call.
pub fn callback_button(text: impl Into<String>, callback_data: impl Into<String>) -> InlineButton {
    InlineButton {
        text: text.into(),
        callback_data: Some(callback_data.into()),
        url: None,
    }
}

/// Button that opens `url` when pressed. Pure data, no network call.
pub fn url_button(text: impl Into<String>, url: impl Into<String>) -> InlineButton {
    InlineButton {
        text: text.into(),
        callback_data: None,
        url: Some(url.into()),
    }
}
