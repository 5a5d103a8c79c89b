use futures::future::BoxFuture;
use matrixel_id::Id;
use matrixel_input::action::Action;

use crate::{
    ActionFunction, NamedAction,
    shell::{ActionShell, ShellRequest},
};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard not available: {0}")]
    Unavailable(String),
    #[error("Failed to write to clipboard: {0}")]
    Write(String),
}

/// Somewhere text can be copied to. Writes may finish later, so the result
/// comes back as a future.
pub trait ClipboardWriter: Send + Sync + 'static {
    fn write_text(&self, text: String) -> BoxFuture<'static, Result<(), ClipboardError>>;
}

/// Asks the shell to copy the current CSS block.
#[derive(Default)]
pub struct CopyCssAction;

impl NamedAction for CopyCssAction {
    const NAME: &'static str = "copy_css_action";
}

impl ActionFunction for CopyCssAction {
    fn id(&self) -> Id<Action> {
        Self::action_id()
    }

    fn trigger(&self, shell: &mut ActionShell) {
        let css = shell.editor().css();
        shell.request(ShellRequest::CopyText(css));
    }
}

/// Performs a shell request against `clipboard`.
pub fn copy_requested(
    request: &ShellRequest,
    clipboard: &dyn ClipboardWriter,
) -> BoxFuture<'static, Result<(), ClipboardError>> {
    match request {
        ShellRequest::CopyText(text) => clipboard.write_text(text.clone()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::{FutureExt, executor::block_on};
    use matrixel_editor::MatrixEditor;
    use matrixel_math::Preset;
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct MemoryClipboard {
        text: Arc<Mutex<Option<String>>>,
    }

    impl ClipboardWriter for MemoryClipboard {
        fn write_text(&self, text: String) -> BoxFuture<'static, Result<(), ClipboardError>> {
            let slot = self.text.clone();
            async move {
                *slot.lock() = Some(text);
                Ok(())
            }
            .boxed()
        }
    }

    struct BrokenClipboard;

    impl ClipboardWriter for BrokenClipboard {
        fn write_text(&self, _text: String) -> BoxFuture<'static, Result<(), ClipboardError>> {
            async { Err(ClipboardError::Unavailable("no display".to_string())) }.boxed()
        }
    }

    fn copy_request(editor: &mut MatrixEditor) -> ShellRequest {
        let mut shell = ActionShell::new(editor);
        CopyCssAction.trigger(&mut shell);
        let mut requests = shell.destruct().requests;
        assert_eq!(requests.len(), 1);
        requests.remove(0)
    }

    #[test]
    fn copies_current_css() {
        let mut editor = MatrixEditor::new();
        editor.apply_preset(Preset::FlipVertical);
        let request = copy_request(&mut editor);

        let clipboard = MemoryClipboard::default();
        assert_eq!(block_on(copy_requested(&request, &clipboard)), Ok(()));
        assert_eq!(clipboard.text.lock().as_deref(), Some(editor.css().as_str()));
        assert!(editor.css().contains("transform:matrix(1, 0, 0, -1, 0,0);"));
    }

    #[test]
    fn copy_does_not_touch_history() {
        let mut editor = MatrixEditor::new();
        copy_request(&mut editor);
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn failure_is_reported() {
        let mut editor = MatrixEditor::new();
        let request = copy_request(&mut editor);
        let err = block_on(copy_requested(&request, &BrokenClipboard)).unwrap_err();
        assert_eq!(err.to_string(), "Clipboard not available: no display");
    }
}
