use serde::Serialize;

use crate::error::Result;

/// Human-readable rendering of a command result.
pub(crate) trait PlainText {
    fn plain_text(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Output {
    Plain,
    Json,
}

impl Output {
    pub(crate) fn render<T: Serialize + PlainText>(self, value: &T) -> Result<String> {
        match self {
            Self::Plain => Ok(value.plain_text()),
            Self::Json => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    pub(crate) fn emit<T: Serialize + PlainText>(self, value: &T) -> Result<()> {
        println!("{}", self.render(value)?);
        Ok(())
    }
}
