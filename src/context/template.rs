//! Role/turn formatting for transcripts.

use serde::{Deserialize, Serialize};

/// Chat template used to open and close role turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatTemplate {
    /// `<|im_start|>role\n ... <|im_end|>\n`
    #[default]
    ChatMl,
    /// `role: ... \n`
    Plain,
}

impl ChatTemplate {
    pub fn role_start(&self, role: &str) -> String {
        match self {
            ChatTemplate::ChatMl => format!("<|im_start|>{}\n", role),
            ChatTemplate::Plain => format!("{}: ", role),
        }
    }

    pub fn role_end(&self, _role: &str) -> String {
        match self {
            ChatTemplate::ChatMl => "<|im_end|>\n".to_string(),
            ChatTemplate::Plain => "\n".to_string(),
        }
    }
}
