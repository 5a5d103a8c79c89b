use std::path::Path;

use iced::keyboard::{self, key};
use matrixel_actions::{ActionFunctionCollection, shell::ActionShell};
use matrixel_input::{
    action::{ActionCollection, ActionManifest},
    key::KeyboardState,
};

pub struct InputManager {
    pub actions: ActionFunctionCollection,

    keyboard_state: KeyboardState,
}

impl InputManager {
    pub fn new(actions: ActionFunctionCollection) -> Self {
        Self {
            actions,
            keyboard_state: KeyboardState::default(),
        }
    }

    /// Loads keybindings from `dir`. Without them every action is still
    /// reachable through buttons.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let manifests = ActionManifest::load_dir(dir).unwrap_or_else(|e| {
            log::error!("Failed to load keybindings: {}", e);
            Vec::new()
        });
        Self::new(ActionFunctionCollection::with_defaults(
            ActionCollection::new(manifests),
        ))
    }

    /// `captured` events were already handled by a focused widget, so they
    /// only update which keys are held.
    pub fn on_keyboard_event(
        &mut self,
        event: keyboard::Event,
        captured: bool,
        shell: &mut ActionShell,
    ) {
        match event {
            keyboard::Event::KeyPressed {
                physical_key,
                repeat,
                ..
            } => match physical_key {
                key::Physical::Code(code) => {
                    self.keyboard_state.press(code);
                    if !repeat && !captured {
                        self.trigger_held(shell);
                    }
                }
                key::Physical::Unidentified(native_code) => {
                    log::error!("Unidentified key pressed: {:?}", native_code);
                }
            },
            keyboard::Event::KeyReleased { physical_key, .. } => match physical_key {
                key::Physical::Code(code) => {
                    self.keyboard_state.release(code);
                }
                key::Physical::Unidentified(native_code) => {
                    log::error!("Unidentified key released: {:?}", native_code);
                }
            },
            _ => {}
        }
    }

    /// Forgets held keys. Releases that happen while the window is unfocused
    /// never arrive.
    pub fn release_all(&mut self) {
        self.keyboard_state = KeyboardState::default();
    }

    fn trigger_held(&self, shell: &mut ActionShell) -> bool {
        match self.keyboard_state.get_sequence() {
            Ok(keys) => self.actions.trigger(keys, shell),
            Err(e) => {
                log::trace!("No shortcut for held keys: {}", e);
                false
            }
        }
    }

    #[cfg(test)]
    fn press(&mut self, code: key::Code, shell: &mut ActionShell) -> bool {
        self.keyboard_state.press(code);
        self.trigger_held(shell)
    }

    #[cfg(test)]
    fn release(&mut self, code: key::Code) {
        self.keyboard_state.release(code);
    }
}

#[cfg(test)]
mod tests {
    use matrixel_actions::preset::preset_action_id;
    use matrixel_editor::MatrixEditor;
    use matrixel_math::{CoefficientKey, Preset, TransformState};

    use super::*;

    fn manager() -> InputManager {
        InputManager::load(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
    }

    #[test]
    fn default_bindings_undo_and_redo() {
        let mut input = manager();
        let mut editor = MatrixEditor::new();
        editor.set_coefficient(CoefficientKey::D, "-1");
        let mut shell = ActionShell::new(&mut editor);

        input.press(key::Code::ControlLeft, &mut shell);
        assert!(input.press(key::Code::KeyZ, &mut shell));
        assert_eq!(*shell.editor().state(), TransformState::DEFAULT);

        input.release(key::Code::KeyZ);
        input.press(key::Code::ShiftLeft, &mut shell);
        assert!(input.press(key::Code::KeyZ, &mut shell));
        assert_eq!(shell.editor().state().d.value(), -1.0);
    }

    #[test]
    fn default_bindings_apply_presets() {
        let mut input = manager();
        let mut editor = MatrixEditor::new();
        let mut shell = ActionShell::new(&mut editor);

        input.press(key::Code::AltLeft, &mut shell);
        assert!(input.press(key::Code::Digit4, &mut shell));
        assert_eq!(*shell.editor().state(), Preset::Rotate90.state());
    }

    #[test]
    fn release_all_drops_modifiers() {
        let mut input = manager();
        let mut editor = MatrixEditor::new();
        editor.set_coefficient(CoefficientKey::X, "5");
        let mut shell = ActionShell::new(&mut editor);

        input.press(key::Code::ControlLeft, &mut shell);
        input.release_all();
        assert!(!input.press(key::Code::KeyZ, &mut shell));
        assert_eq!(shell.editor().state().x.value(), 5.0);
    }

    #[test]
    fn missing_bindings_still_run() {
        let input = InputManager::load("does/not/exist");
        let mut editor = MatrixEditor::new();
        let mut shell = ActionShell::new(&mut editor);
        let id = preset_action_id(Preset::Mirror);
        assert_eq!(input.actions.shortcut_of(id), None);
        assert!(input.actions.trigger_id(id, &mut shell));
    }
}
