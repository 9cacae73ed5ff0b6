use crate::result::MetaVarError;

/// Sink for the diagnostics produced while solving metavariables.
pub trait Reporter {
    fn report(&mut self, err: MetaVarError);
}

/// Collects all reported errors.
impl Reporter for Vec<MetaVarError> {
    fn report(&mut self, err: MetaVarError) {
        self.push(err);
    }
}

/// Emits reported errors as warnings through `log`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, err: MetaVarError) {
        log::warn!("{err}");
    }
}
