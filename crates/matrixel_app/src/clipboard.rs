use std::sync::Arc;

use futures::{FutureExt, future::BoxFuture};
use matrixel_actions::clipboard::{ClipboardError, ClipboardWriter};
use parking_lot::Mutex;

/// The OS clipboard. The handle is opened on first use and kept, since some
/// platforms drop the contents together with the handle.
#[derive(Default, Clone)]
pub struct SystemClipboard {
    handle: Arc<Mutex<Option<arboard::Clipboard>>>,
}

impl SystemClipboard {
    fn set_text(
        handle: &Mutex<Option<arboard::Clipboard>>,
        text: String,
    ) -> Result<(), ClipboardError> {
        let mut handle = handle.lock();
        let clipboard = match handle.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?,
        };
        handle
            .insert(clipboard)
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: String) -> BoxFuture<'static, Result<(), ClipboardError>> {
        let handle = self.handle.clone();
        async move { Self::set_text(&handle, text) }.boxed()
    }
}
