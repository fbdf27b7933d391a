//! One-shot messages carried across a redirect.
//!
//! Form handlers push a message before redirecting; the next page load drains
//! every queued message so each one is shown exactly once.

use crate::domain::Error;

use super::session::SessionContext;

const FLASH_KEY: &str = "flash";

fn read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read flash messages: {error}"))
}

impl SessionContext {
    /// Queue `message` for the next page load.
    pub fn flash(&self, message: impl Into<String>) -> Result<(), Error> {
        let session = self.inner();
        let mut queued = session
            .get::<Vec<String>>(FLASH_KEY)
            .map_err(read_error)?
            .unwrap_or_default();
        queued.push(message.into());
        session
            .insert(FLASH_KEY, queued)
            .map_err(|error| Error::internal(format!("failed to store flash message: {error}")))
    }

    /// Remove and return every queued message, oldest first.
    pub fn take_flashes(&self) -> Result<Vec<String>, Error> {
        match self.inner().remove_as::<Vec<String>>(FLASH_KEY) {
            None => Ok(Vec::new()),
            Some(Ok(messages)) => Ok(messages),
            Some(Err(raw)) => Err(read_error(raw)),
        }
    }
}
