use matrixel_history::HistoryLog;
use matrixel_math::{CoefficientKey, Preset, TransformState};

/// Owns the current transform and its history. Every edit goes through
/// [`MatrixEditor::commit`], so the active history entry always equals
/// [`MatrixEditor::state`].
#[derive(Debug, Clone)]
pub struct MatrixEditor {
    state: TransformState,
    history: HistoryLog<TransformState>,
    revision: u64,
}

impl Default for MatrixEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixEditor {
    pub fn new() -> Self {
        Self {
            state: TransformState::DEFAULT,
            history: HistoryLog::new(TransformState::DEFAULT),
            revision: 0,
        }
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Bumped whenever the state is replaced. States holding `NaN` never
    /// compare equal to themselves, so callers watch this instead.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history(&self) -> &HistoryLog<TransformState> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn css(&self) -> String {
        self.state.to_css()
    }

    pub fn set_coefficient(&mut self, key: CoefficientKey, raw: &str) {
        log::debug!("Set {} to {:?}", key.name(), raw);
        self.commit(self.state.update(key, raw));
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        log::debug!("Set rotation to {}", degrees);
        self.commit(self.state.set_rotation(degrees));
    }

    /// Sets both offsets as a single edit.
    pub fn set_translation(&mut self, x: f64, y: f64) {
        log::debug!("Set translation to ({}, {})", x, y);
        self.commit(self.state.with_translation(x, y));
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        log::debug!("Apply preset {}", preset.name());
        self.commit(self.state.apply_preset(preset));
    }

    /// Returns whether the state changed.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        self.state = *self.history.undo();
        self.revision += 1;
        log::debug!("Undo to entry {}", self.history.cursor());
        true
    }

    /// Returns whether the state changed.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        self.state = *self.history.redo();
        self.revision += 1;
        log::debug!("Redo to entry {}", self.history.cursor());
        true
    }

    /// Restores the default transform and forgets all history.
    pub fn reset(&mut self) {
        self.state = TransformState::reset();
        self.history.clear(self.state);
        self.revision += 1;
        log::debug!("Reset to default");
    }

    fn commit(&mut self, state: TransformState) {
        self.state = state;
        self.history.record(state);
        self.revision += 1;
    }
}
