// Ctrl-C handling outside the prompt. The handler only raises a flag; the
// loop polls it between steps and ends the session with the farewell
// message. A request that is already in flight runs to completion or to
// its timeout first.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "Ctrl-C was pressed" flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the process SIGINT behaviour with raising this flag.
    /// Can be called once per process.
    pub fn install() -> Result<Self> {
        let flag = Self::new();
        let handle = flag.clone();
        ctrlc::set_handler(move || handle.trigger()).context("Failed to install Ctrl-C handler")?;
        Ok(flag)
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
