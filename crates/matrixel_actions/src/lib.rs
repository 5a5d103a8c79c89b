use std::collections::HashMap;

use matrixel_id::Id;
use matrixel_input::{
    action::{Action, ActionCollection},
    key::KeySequence,
};

use crate::shell::ActionShell;

pub mod clipboard;
pub mod history;
pub mod preset;
pub mod shell;

pub trait ActionFunction: Send + Sync + 'static {
    fn id(&self) -> Id<Action>;
    fn trigger(&self, shell: &mut ActionShell);
}

/// Actions known by a fixed name, so buttons and keybinding files can refer to
/// the same action.
pub trait NamedAction {
    const NAME: &'static str;

    fn action_id() -> Id<Action> {
        Id::from_str(Self::NAME)
    }
}

pub struct ActionFunctionCollection {
    actions: ActionCollection,
    functions: HashMap<Id<Action>, Box<dyn ActionFunction>>,
}

impl ActionFunctionCollection {
    pub fn new(actions: ActionCollection) -> Self {
        Self {
            actions,
            functions: HashMap::new(),
        }
    }

    /// A collection with every editor action registered.
    pub fn with_defaults(actions: ActionCollection) -> Self {
        let mut collection = Self::new(actions);
        collection.register::<history::UndoAction>();
        collection.register::<history::RedoAction>();
        collection.register::<history::ResetAction>();
        collection.register::<clipboard::CopyCssAction>();
        preset::register_preset_actions(&mut collection);
        collection
    }

    pub fn register<A: ActionFunction + Default>(&mut self) {
        let action = A::default();
        self.functions.insert(action.id(), Box::new(action));
    }

    /// Runs the action bound to `keys`. Returns whether one ran.
    pub fn trigger(&self, keys: KeySequence, shell: &mut ActionShell) -> bool {
        let Some(id) = self.actions.get_action_id(keys) else {
            return false;
        };
        log::debug!("{} triggered {:?}", keys, id);
        self.trigger_id(id, shell)
    }

    /// Runs the action registered under `id`. Returns whether one ran.
    pub fn trigger_id(&self, id: Id<Action>, shell: &mut ActionShell) -> bool {
        match self.functions.get(&id) {
            Some(action) => {
                action.trigger(shell);
                true
            }
            None => {
                log::warn!("No function registered for action {:?}", id);
                false
            }
        }
    }

    pub fn shortcut_of(&self, id: Id<Action>) -> Option<KeySequence> {
        self.actions.shortcut_of(id)
    }
}

#[cfg(test)]
mod tests {
    use matrixel_editor::MatrixEditor;
    use matrixel_input::{action::ActionManifest, key::KeyModifiers};
    use matrixel_math::{CoefficientKey, Preset, TransformState};

    use super::*;
    use crate::{
        history::{RedoAction, UndoAction},
        preset::preset_action_id,
        shell::ShellRequest,
    };

    const MANIFEST: &str = r#"
[undo_action]
shortcut = ["Ctrl+Z"]

[redo_action]
shortcut = ["Ctrl+Y"]

[copy_css_action]
shortcut = ["Ctrl+Shift+C"]

[preset_mirror_action]
shortcut = ["Alt+5"]
"#;

    fn collection() -> ActionFunctionCollection {
        let manifest = ActionManifest::from_toml_str(MANIFEST).unwrap();
        ActionFunctionCollection::with_defaults(ActionCollection::new([manifest]))
    }

    fn keys(text: &str) -> KeySequence {
        text.parse().unwrap()
    }

    #[test]
    fn shortcut_triggers_undo_and_redo() {
        let actions = collection();
        let mut editor = MatrixEditor::new();
        editor.set_coefficient(CoefficientKey::A, "2");

        let mut shell = ActionShell::new(&mut editor);
        assert!(actions.trigger(keys("Ctrl+Z"), &mut shell));
        assert_eq!(*shell.editor().state(), TransformState::DEFAULT);
        assert!(actions.trigger(keys("Ctrl+Y"), &mut shell));
        assert_eq!(shell.editor().state().a.value(), 2.0);
    }

    #[test]
    fn unbound_shortcut_does_nothing() {
        let actions = collection();
        let mut editor = MatrixEditor::new();
        let mut shell = ActionShell::new(&mut editor);
        assert!(!actions.trigger(keys("Ctrl+Q"), &mut shell));
        assert!(shell.destruct().requests.is_empty());
    }

    #[test]
    fn preset_shortcut_applies_preset() {
        let actions = collection();
        let mut editor = MatrixEditor::new();
        let mut shell = ActionShell::new(&mut editor);
        let modifiers = keys("Alt+5").modifiers;
        assert_eq!(modifiers, KeyModifiers::ALT);
        assert!(actions.trigger(keys("Alt+5"), &mut shell));
        drop(shell);
        assert_eq!(*editor.state(), Preset::Mirror.state());
    }

    #[test]
    fn buttons_trigger_by_id_without_bindings() {
        let actions = ActionFunctionCollection::with_defaults(ActionCollection::default());
        let mut editor = MatrixEditor::new();
        let mut shell = ActionShell::new(&mut editor);

        assert!(actions.trigger_id(preset_action_id(Preset::Rotate90), &mut shell));
        assert!(actions.trigger_id(UndoAction::action_id(), &mut shell));
        assert!(actions.trigger_id(RedoAction::action_id(), &mut shell));
        assert_eq!(*shell.editor().state(), Preset::Rotate90.state());
        assert!(!actions.trigger_id(Id::from_str("unknown_action"), &mut shell));
    }

    #[test]
    fn copy_shortcut_requests_css() {
        let actions = collection();
        let mut editor = MatrixEditor::new();
        editor.set_rotation(90.0);
        let css = editor.css();

        let mut shell = ActionShell::new(&mut editor);
        assert!(actions.trigger(keys("Ctrl+Shift+C"), &mut shell));
        assert_eq!(shell.destruct().requests, vec![ShellRequest::CopyText(css)]);
    }

    #[test]
    fn shortcut_lookup_for_tooltips() {
        let actions = collection();
        assert_eq!(actions.shortcut_of(UndoAction::action_id()), Some(keys("Ctrl+Z")));
        assert_eq!(actions.shortcut_of(preset_action_id(Preset::Rotate45)), None);
    }
}
