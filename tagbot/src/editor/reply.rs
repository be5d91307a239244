//! Outbound reply payload and the fixed reply texts

use serde::{Deserialize, Serialize};

/// Reply payload returned to the transport for every inbound event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    /// Keyboard of selectable labels, row-major
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyboard: Option<Vec<Vec<String>>>,
    /// Path of a finished file for the transport to deliver (and delete
    /// after sending)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            document: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Vec<Vec<String>>) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
            document: None,
        }
    }

    pub fn with_document(text: impl Into<String>, document: String) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            document: Some(document),
        }
    }
}

// Fixed reply texts. The idle guidance doubles as the answer to any event
// arriving without a session.
pub const DEFAULT_MESSAGE: &str =
    "Send or forward me an audio track and I'll help you edit its tags. I'm waiting...";
pub const GREETING: &str =
    "Hello there! Let's get started. Just send me a music file and see what I can do!";
pub const HELP_MESSAGE: &str =
    "It's simple! Send or forward me an audio track, then pick the tags you want to change. \
     When you're happy, hit Done and I'll send the file back with the new tags.";
pub const ABOUT_MESSAGE: &str = concat!(
    "tagbot ",
    env!("CARGO_PKG_VERSION"),
    " - a little assistant for fixing the tags of your music files."
);
pub const START_OVER: &str =
    "Alright, starting over. Send me the next audio file whenever you're ready.";
pub const ASK_WHICH_TAG: &str = "Which tag do you want to edit?";
pub const SELECT_FIELD_FIRST: &str = "Please select the tag you want to edit first!";
pub const VALUE_SAVED: &str = "Done! Click Preview to see the result, or Done to finish.";
pub const NUMERIC_ADVISORY: &str =
    "Note: that doesn't look like a number, but I saved it anyway.";
pub const COVER_STAGED: &str =
    "Album art changed. Click Preview to see the result, or Done to finish.";
pub const PREVIEW_HINT: &str = "If you're finished, hit Done.";
pub const COMMIT_DONE: &str = "Here you go! Your file is ready with the new tags.";

pub const ERR_FETCH: &str = "Couldn't download your file. Please send it again.";
pub const ERR_DECODE: &str =
    "Couldn't read the tags of this file. Make sure it's a valid audio file and try again.";
pub const ERR_UNSUPPORTED_IMAGE: &str =
    "That doesn't look like a PNG or JPEG image. Please try a different one.";
pub const ERR_MISSING_FILE: &str =
    "Oops! Your audio file is gone from my side - please send it again.";
pub const ERR_COMMIT: &str = "Couldn't save the new tags. Hit Done again to retry.";
pub const ERR_TOO_LARGE: &str =
    "This file is too large for me to handle. Please send a smaller one.";
pub const ERR_INTERNAL: &str = "Something went wrong on my side. Please try again.";
