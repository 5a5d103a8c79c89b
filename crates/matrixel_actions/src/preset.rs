use std::marker::PhantomData;

use matrixel_id::Id;
use matrixel_input::action::Action;
use matrixel_math::Preset;

use crate::{ActionFunction, ActionFunctionCollection, NamedAction, shell::ActionShell};

pub trait PresetAction: NamedAction + Send + Sync + 'static {
    const PRESET: Preset;
}

macro_rules! preset_action {
    ($name:ident, $action:literal, $preset:expr) => {
        pub struct $name;
        impl NamedAction for $name {
            const NAME: &'static str = $action;
        }
        impl PresetAction for $name {
            const PRESET: Preset = $preset;
        }
    };
}
preset_action!(FlipHorizontalAction, "preset_flip_horizontal_action", Preset::FlipHorizontal);
preset_action!(FlipVerticalAction, "preset_flip_vertical_action", Preset::FlipVertical);
preset_action!(Rotate45Action, "preset_rotate_45_action", Preset::Rotate45);
preset_action!(Rotate90Action, "preset_rotate_90_action", Preset::Rotate90);
preset_action!(MirrorAction, "preset_mirror_action", Preset::Mirror);
preset_action!(SkewDiamondAction, "preset_skew_diamond_action", Preset::SkewDiamond);

pub struct ApplyPreset<T: PresetAction> {
    _marker: PhantomData<T>,
}

impl<T: PresetAction> Default for ApplyPreset<T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: PresetAction> ActionFunction for ApplyPreset<T> {
    fn id(&self) -> Id<Action> {
        T::action_id()
    }

    fn trigger(&self, shell: &mut ActionShell) {
        shell.editor_mut().apply_preset(T::PRESET);
    }
}

/// Id of the action that applies `preset`.
pub fn preset_action_id(preset: Preset) -> Id<Action> {
    let name = match preset {
        Preset::FlipHorizontal => FlipHorizontalAction::NAME,
        Preset::FlipVertical => FlipVerticalAction::NAME,
        Preset::Rotate45 => Rotate45Action::NAME,
        Preset::Rotate90 => Rotate90Action::NAME,
        Preset::Mirror => MirrorAction::NAME,
        Preset::SkewDiamond => SkewDiamondAction::NAME,
    };
    Id::from_str(name)
}

pub fn register_preset_actions(collection: &mut ActionFunctionCollection) {
    collection.register::<ApplyPreset<FlipHorizontalAction>>();
    collection.register::<ApplyPreset<FlipVerticalAction>>();
    collection.register::<ApplyPreset<Rotate45Action>>();
    collection.register::<ApplyPreset<Rotate90Action>>();
    collection.register::<ApplyPreset<MirrorAction>>();
    collection.register::<ApplyPreset<SkewDiamondAction>>();
}
