use log::{error, warn, Level};

use crate::Probe;

/// Everything an update produced besides style mutations on the surface.
#[derive(Debug)]
pub struct Output<E> {
    /// Clicks whose default browser action (jump to anchor) must be suppressed.
    pub prevented: Vec<E>,
    /// Image probes issued to loader.
    pub probes: Vec<Probe>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl<E> Output<E> {
    pub fn new() -> Self {
        Self {
            prevented: vec![],
            probes: vec![],
            diagnostics: vec![],
        }
    }

    pub(crate) fn warn(&mut self, message: String) {
        warn!("{message}");
        self.diagnostics.push(Diagnostic {
            level: Level::Warn,
            message,
        });
    }

    pub(crate) fn error(&mut self, message: String) {
        error!("{message}");
        self.diagnostics.push(Diagnostic {
            level: Level::Error,
            message,
        });
    }
}

impl<E> Default for Output<E> {
    fn default() -> Self {
        Self::new()
    }
}
