use std::sync::Arc;

use iced::{
    Alignment, Element, Font, Length, Subscription, Task, event,
    keyboard,
    widget::{
        button, column, container, row, scrollable, slider, text, text_editor, text_input,
        tooltip,
    },
    window,
};
use matrixel_actions::{
    NamedAction,
    clipboard::{ClipboardError, ClipboardWriter, CopyCssAction, copy_requested},
    history::{RedoAction, ResetAction, UndoAction},
    preset::preset_action_id,
    shell::{ActionShell, DestructedShell},
};
use matrixel_editor::MatrixEditor;
use matrixel_id::Id;
use matrixel_input::action::Action;
use matrixel_math::{CoefficientKey, ControlClass, Preset, number::coerce_number};
use matrixel_widgets::preview::TransformPreview;

use crate::{clipboard::SystemClipboard, input_manager::InputManager};

const ASSETS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

/// Slider groups in display order, each as its `X` and `Y` coefficient.
const GROUPS: [(ControlClass, [CoefficientKey; 2]); 3] = [
    (ControlClass::Scale, [CoefficientKey::A, CoefficientKey::D]),
    (ControlClass::Skew, [CoefficientKey::C, CoefficientKey::B]),
    (
        ControlClass::Translation,
        [CoefficientKey::X, CoefficientKey::Y],
    ),
];

pub struct MainView {
    editor: MatrixEditor,
    input_manager: InputManager,
    clipboard: Arc<dyn ClipboardWriter>,

    css: text_editor::Content,
    drafts: [String; 6],
    rotation_draft: String,
    notice: Option<String>,
}

#[derive(Debug, Clone)]
pub enum MainViewMessage {
    KeyboardEvent(keyboard::Event, event::Status),
    WindowUnfocused,
    CoefficientSlid(CoefficientKey, f64),
    RotationSlid(f64),
    DraftChanged(CoefficientKey, String),
    DraftSubmitted(CoefficientKey),
    RotationDraftChanged(String),
    RotationDraftSubmitted,
    Translated(f64, f64),
    TriggerAction(Id<Action>),
    CssAction(text_editor::Action),
    CopyFinished(Result<(), ClipboardError>),
}

impl MainView {
    pub fn new() -> Self {
        Self::with_parts(
            InputManager::load(ASSETS_DIR),
            Arc::new(SystemClipboard::default()),
        )
    }

    fn with_parts(input_manager: InputManager, clipboard: Arc<dyn ClipboardWriter>) -> Self {
        let editor = MatrixEditor::new();
        let mut view = Self {
            css: text_editor::Content::new(),
            drafts: Default::default(),
            rotation_draft: String::new(),
            notice: None,
            editor,
            input_manager,
            clipboard,
        };
        view.refresh();
        view
    }

    pub fn update(&mut self, message: MainViewMessage) -> Task<MainViewMessage> {
        let revision = self.editor.revision();
        let submitted = matches!(
            message,
            MainViewMessage::DraftSubmitted(_) | MainViewMessage::RotationDraftSubmitted
        );
        let mut shell = ActionShell::new(&mut self.editor);

        match message {
            MainViewMessage::KeyboardEvent(event, status) => {
                let captured = status == event::Status::Captured;
                self.input_manager
                    .on_keyboard_event(event, captured, &mut shell);
            }
            MainViewMessage::WindowUnfocused => self.input_manager.release_all(),
            MainViewMessage::CoefficientSlid(key, value) => {
                let raw = key.control_class().value_text(value);
                shell.editor_mut().set_coefficient(key, &raw);
            }
            MainViewMessage::RotationSlid(degrees) => {
                shell
                    .editor_mut()
                    .set_rotation(ControlClass::Rotation.snap(degrees));
            }
            MainViewMessage::DraftChanged(key, draft) => {
                self.drafts[key_index(key)] = draft;
            }
            MainViewMessage::DraftSubmitted(key) => {
                let raw = self.drafts[key_index(key)].clone();
                shell.editor_mut().set_coefficient(key, &raw);
            }
            MainViewMessage::RotationDraftChanged(draft) => self.rotation_draft = draft,
            MainViewMessage::RotationDraftSubmitted => {
                let degrees = coerce_number(&self.rotation_draft);
                shell.editor_mut().set_rotation(degrees);
            }
            MainViewMessage::Translated(x, y) => shell.editor_mut().set_translation(x, y),
            MainViewMessage::TriggerAction(id) => {
                self.input_manager.actions.trigger_id(id, &mut shell);
            }
            MainViewMessage::CssAction(action) => {
                if !action.is_edit() {
                    self.css.perform(action);
                }
            }
            MainViewMessage::CopyFinished(Ok(())) => {
                log::info!("Copied CSS to clipboard");
                self.notice = Some("Copied to clipboard".to_string());
            }
            MainViewMessage::CopyFinished(Err(e)) => {
                log::error!("{}", e);
            }
        }

        let shell = shell.destruct();
        let task = self.apply_shell(shell);
        if submitted || self.editor.revision() != revision {
            self.refresh();
        }
        task
    }

    pub fn subscription(&self) -> Subscription<MainViewMessage> {
        event::listen_with(|event, status, _window| match event {
            iced::Event::Keyboard(event) => Some(MainViewMessage::KeyboardEvent(event, status)),
            iced::Event::Window(window::Event::Unfocused) => {
                Some(MainViewMessage::WindowUnfocused)
            }
            _ => None,
        })
    }

    pub fn view(&self) -> Element<'_, MainViewMessage> {
        let preview = container(
            TransformPreview::new(*self.editor.state()).on_translate(MainViewMessage::Translated),
        )
        .center(Length::FillPortion(2));

        let mut controls = column![].spacing(12).padding(12);
        for (class, keys) in GROUPS {
            controls = controls.push(self.control_group(class, keys));
        }
        controls = controls
            .push(self.rotation_group())
            .push(self.history_buttons())
            .push(self.preset_buttons())
            .push(self.css_block())
            .push(self.matrix_description());

        row![preview, scrollable(controls).width(Length::FillPortion(3))].into()
    }

    fn control_group(
        &self,
        class: ControlClass,
        keys: [CoefficientKey; 2],
    ) -> Element<'_, MainViewMessage> {
        let mut group = column![text(format!("{}:", class.title()))].spacing(6);
        for key in keys {
            let coefficient = self.editor.state().get(key);
            group = group.push(
                row![
                    text(format!("{}: {}", key.axis_label(), coefficient)).width(120),
                    slider(
                        class.range(),
                        slider_position(class, coefficient.value()),
                        move |value| MainViewMessage::CoefficientSlid(key, value),
                    )
                    .step(class.step()),
                    text_input(key.name(), &self.drafts[key_index(key)])
                        .on_input(move |draft| MainViewMessage::DraftChanged(key, draft))
                        .on_submit(MainViewMessage::DraftSubmitted(key))
                        .width(90),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            );
        }
        group.into()
    }

    fn rotation_group(&self) -> Element<'_, MainViewMessage> {
        let class = ControlClass::Rotation;
        let rotation = self.editor.state().rotation;
        column![
            text(format!("{}:", class.title())),
            row![
                text(format!("{}°", self.editor.state().rotation_text())).width(120),
                slider(
                    class.range(),
                    slider_position(class, rotation),
                    MainViewMessage::RotationSlid
                )
                .step(class.step()),
                text_input("deg", &self.rotation_draft)
                    .on_input(MainViewMessage::RotationDraftChanged)
                    .on_submit(MainViewMessage::RotationDraftSubmitted)
                    .width(90),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        ]
        .spacing(6)
        .into()
    }

    fn history_buttons(&self) -> Element<'_, MainViewMessage> {
        row![
            self.action_button("Undo", UndoAction::action_id(), self.editor.can_undo()),
            self.action_button("Redo", RedoAction::action_id(), self.editor.can_redo()),
            self.action_button("Reset Default", ResetAction::action_id(), true),
        ]
        .spacing(8)
        .into()
    }

    fn preset_buttons(&self) -> Element<'_, MainViewMessage> {
        let mut presets = row![].spacing(8);
        for preset in Preset::ALL {
            presets =
                presets.push(self.action_button(preset.label(), preset_action_id(preset), true));
        }
        column![text("Presets:"), presets].spacing(6).into()
    }

    fn css_block(&self) -> Element<'_, MainViewMessage> {
        let mut copy = row![self.action_button("Copy", CopyCssAction::action_id(), true)]
            .spacing(8)
            .align_y(Alignment::Center);
        if let Some(notice) = &self.notice {
            copy = copy.push(text(notice));
        }

        column![
            text_editor(&self.css)
                .on_action(MainViewMessage::CssAction)
                .font(Font::MONOSPACE)
                .height(90),
            copy,
        ]
        .spacing(6)
        .into()
    }

    fn matrix_description(&self) -> Element<'_, MainViewMessage> {
        let layout = column![
            text("Position of the values on a matrix"),
            text("a c tx"),
            text("b d ty"),
            text("0 0 1"),
        ];
        let values = self
            .editor
            .state()
            .matrix_rows()
            .into_iter()
            .fold(column![text("Current values")], |col, cells| {
                col.push(text(cells.join(" ")).font(Font::MONOSPACE))
            });

        column![
            text("Transform matrix(a,b,c,d,tx,ty)"),
            row![layout, values].spacing(32),
        ]
        .spacing(6)
        .into()
    }

    fn action_button<'a>(
        &self,
        label: &'a str,
        id: Id<Action>,
        enabled: bool,
    ) -> Element<'a, MainViewMessage> {
        let pressable = button(text(label))
            .on_press_maybe(enabled.then_some(MainViewMessage::TriggerAction(id)));
        match self.input_manager.actions.shortcut_of(id) {
            Some(keys) => {
                tooltip(pressable, text(keys.to_string()), tooltip::Position::Bottom).into()
            }
            None => pressable.into(),
        }
    }

    fn apply_shell(&self, shell: DestructedShell) -> Task<MainViewMessage> {
        Task::batch(shell.requests.iter().map(|request| {
            Task::perform(
                copy_requested(request, self.clipboard.as_ref()),
                MainViewMessage::CopyFinished,
            )
        }))
    }

    /// Rebuilds everything derived from the editor state.
    fn refresh(&mut self) {
        let state = self.editor.state();
        self.css = text_editor::Content::with_text(&state.to_css());
        for key in CoefficientKey::ALL {
            self.drafts[key_index(key)] = state.get(key).to_string();
        }
        self.rotation_draft = state.rotation_text();
        self.notice = None;
    }
}

fn key_index(key: CoefficientKey) -> usize {
    key as usize
}

/// Where a slider's thumb sits for `value`. Values the slider can't show are
/// pinned to the nearest end, or to zero when not a number.
fn slider_position(class: ControlClass, value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(class.min(), class.max())
    }
}
