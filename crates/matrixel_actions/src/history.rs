use matrixel_id::Id;
use matrixel_input::action::Action;

use crate::{ActionFunction, NamedAction, shell::ActionShell};

macro_rules! editor_action {
    ($name:ident, $action:literal, |$shell:ident| $body:expr) => {
        #[derive(Default)]
        pub struct $name;

        impl NamedAction for $name {
            const NAME: &'static str = $action;
        }

        impl ActionFunction for $name {
            fn id(&self) -> Id<Action> {
                Self::action_id()
            }

            fn trigger(&self, $shell: &mut ActionShell) {
                $body;
            }
        }
    };
}

editor_action!(UndoAction, "undo_action", |shell| {
    if !shell.editor_mut().undo() {
        log::debug!("Nothing to undo");
    }
});
editor_action!(RedoAction, "redo_action", |shell| {
    if !shell.editor_mut().redo() {
        log::debug!("Nothing to redo");
    }
});
editor_action!(ResetAction, "reset_action", |shell| shell.editor_mut().reset());

#[cfg(test)]
mod tests {
    use matrixel_editor::MatrixEditor;
    use matrixel_math::{CoefficientKey, TransformState};

    use super::*;

    #[test]
    fn ids_follow_names() {
        assert_eq!(UndoAction.id(), Id::from_str("undo_action"));
        assert_eq!(RedoAction.id(), Id::from_str("redo_action"));
        assert_eq!(ResetAction.id(), Id::from_str("reset_action"));
    }

    #[test]
    fn reset_clears_history() {
        let mut editor = MatrixEditor::new();
        editor.set_coefficient(CoefficientKey::Y, "12");
        editor.set_coefficient(CoefficientKey::Y, "24");

        let mut shell = ActionShell::new(&mut editor);
        ResetAction.trigger(&mut shell);
        UndoAction.trigger(&mut shell);
        assert_eq!(*shell.editor().state(), TransformState::DEFAULT);
        assert_eq!(shell.editor().history().len(), 1);
    }

    #[test]
    fn undo_at_start_keeps_state() {
        let mut editor = MatrixEditor::new();
        let mut shell = ActionShell::new(&mut editor);
        UndoAction.trigger(&mut shell);
        RedoAction.trigger(&mut shell);
        assert_eq!(*shell.editor().state(), TransformState::DEFAULT);
    }
}
