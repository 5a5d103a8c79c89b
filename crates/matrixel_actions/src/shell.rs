use matrixel_editor::MatrixEditor;

/// Side effects an action asks for but can't perform synchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellRequest {
    CopyText(String),
}

pub struct DestructedShell {
    pub requests: Vec<ShellRequest>,
}

/// What actions get to touch while they run.
pub struct ActionShell<'a> {
    editor: &'a mut MatrixEditor,
    requests: Vec<ShellRequest>,
}

impl<'a> ActionShell<'a> {
    pub fn new(editor: &'a mut MatrixEditor) -> Self {
        Self {
            editor,
            requests: Vec::new(),
        }
    }

    pub fn editor(&self) -> &MatrixEditor {
        self.editor
    }

    pub fn editor_mut(&mut self) -> &mut MatrixEditor {
        self.editor
    }

    pub fn request(&mut self, request: ShellRequest) {
        self.requests.push(request);
    }

    pub fn destruct(self) -> DestructedShell {
        DestructedShell {
            requests: self.requests,
        }
    }
}
