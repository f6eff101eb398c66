//! Process environment controller: fatal error handling and version reporting

use std::sync::Arc;

use anyhow::Result;

use crate::{context::Context, logging::Logger};

pub struct Env {
    logger: Arc<dyn Logger>,
    cancel: Box<dyn Fn() + Send + Sync>,
}

impl Env {
    pub fn new<F>(logger: Arc<dyn Logger>, cancel: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Env {
            logger,
            cancel: Box::new(cancel),
        }
    }

    /// Logs the error and cancels, if there is an error
    pub fn fatal_on_error<E: Into<anyhow::Error>>(&self, result: Result<(), E>) {
        if let Err(error) = result {
            self.logger.error(&error.into());
            (self.cancel)();
        }
    }

    /// Logs `"<program> version: <version>"`, or the error returned by `version_fn`. Never cancels.
    pub fn print_version<F>(&self, ctx: &Context, program: &str, version_fn: F)
    where
        F: FnOnce(&Context) -> Result<String>,
    {
        match version_fn(ctx) {
            Ok(version) => self.logger.info(&format!("{program} version: {version}")),
            Err(error) => self.logger.error(&error),
        }
    }
}
