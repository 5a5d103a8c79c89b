use std::{
    collections::{BTreeMap, HashMap},
    io::Read,
    path::{Path, PathBuf},
    sync::Arc,
};

use matrixel_id::Id;
use serde::{Deserialize, Serialize};

use crate::key::KeySequence;

/// File extension of keybinding manifests.
pub const MANIFEST_EXTENSION: &str = "actions";

#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub name: Arc<str>,
    pub shortcut: Vec<KeySequence>,
    pub priority: u8,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionManifest {
    pub actions: Vec<Action>,
}

#[derive(Serialize, Deserialize)]
pub struct SerializableAction {
    #[serde(default)]
    pub shortcut: Vec<KeySequence>,
    #[serde(default)]
    pub priority: Option<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ActionManifestError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("Error loading manifest {0}: {1}")]
    File(PathBuf, Box<ActionManifestError>),
}

impl ActionManifest {
    pub fn from_toml_str(text: &str) -> Result<Self, ActionManifestError> {
        // Sorted by name so manifests load the same way every time.
        let actions = toml::from_str::<BTreeMap<String, SerializableAction>>(text)?
            .into_iter()
            .map(|(name, a)| Action {
                name: Arc::from(name),
                shortcut: a.shortcut,
                priority: a.priority.unwrap_or(0),
            })
            .collect();
        Ok(Self { actions })
    }

    pub fn read(reader: &mut dyn Read) -> Result<Self, ActionManifestError> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Self::from_toml_str(&buf)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ActionManifestError> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path).map_err(|e| {
            ActionManifestError::File(path.to_path_buf(), Box::new(ActionManifestError::Io(e)))
        })?;
        Self::read(&mut file)
            .map_err(|e| ActionManifestError::File(path.to_path_buf(), Box::new(e)))
    }

    /// Loads every `*.actions` file under `root`. Files that fail to load are
    /// logged and skipped.
    pub fn load_dir(root: impl AsRef<Path>) -> Result<Vec<Self>, ActionManifestError> {
        let root = root.as_ref();
        let mut manifests = Vec::new();
        load_folder(root, &mut manifests)?;
        log::info!(
            "Loaded {} action manifests from {}",
            manifests.len(),
            root.display()
        );
        Ok(manifests)
    }
}

fn load_folder(
    path: &Path,
    manifests: &mut Vec<ActionManifest>,
) -> Result<(), ActionManifestError> {
    let mut entries = std::fs::read_dir(path)?
        .filter_map(|entry| match entry {
            Ok(e) => Some(e.path()),
            Err(e) => {
                log::error!("Error reading directory entry in {}: {}", path.display(), e);
                None
            }
        })
        .collect::<Vec<_>>();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if let Err(e) = load_folder(&path, manifests) {
                log::error!("Error loading directory {}: {}", path.display(), e);
            }
        } else if path.extension().and_then(|s| s.to_str()) == Some(MANIFEST_EXTENSION) {
            match ActionManifest::load(&path) {
                Ok(m) => {
                    log::info!("Loaded file: {}", path.display());
                    manifests.push(m);
                }
                Err(e) => log::error!("{}", e),
            }
        } else {
            log::debug!("Skipping {}", path.display());
        }
    }

    Ok(())
}

/// Shortcut lookup over all loaded manifests.
#[derive(Debug, Default)]
pub struct ActionCollection {
    shortcuts: HashMap<KeySequence, Vec<Id<Action>>>,
    actions: HashMap<Id<Action>, Arc<Action>>,
}

impl ActionCollection {
    pub fn new(manifests: impl IntoIterator<Item = ActionManifest>) -> Self {
        let actions = manifests
            .into_iter()
            .flat_map(|manifest| manifest.actions)
            .map(|action| (Id::from_str(&action.name), Arc::new(action)))
            .collect::<HashMap<_, _>>();
        let mut shortcuts = actions.iter().fold(
            HashMap::<KeySequence, Vec<Id<Action>>>::default(),
            |mut acc, (id, a)| {
                for shortcut in &a.shortcut {
                    acc.entry(*shortcut).or_default().push(*id);
                }
                acc
            },
        );

        for ids in shortcuts.values_mut() {
            if ids.len() > 1 {
                ids.sort_by_key(|id| {
                    actions
                        .get(id)
                        .map(|a| (a.priority, a.name.clone()))
                        .unwrap_or((u8::MAX, Arc::from("")))
                });
            }
        }

        Self { shortcuts, actions }
    }

    pub fn get_action_id(&self, shortcut: KeySequence) -> Option<Id<Action>> {
        let ids = self.shortcuts.get(&shortcut)?;
        ids.first().cloned()
    }

    pub fn get_all_action_ids(&self, shortcut: KeySequence) -> Option<Vec<Id<Action>>> {
        self.shortcuts.get(&shortcut).cloned()
    }

    /// First shortcut bound to `id`, for button tooltips.
    pub fn shortcut_of(&self, id: Id<Action>) -> Option<KeySequence> {
        self.actions.get(&id)?.shortcut.first().copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use iced_core::keyboard::key::Code;

    use super::*;
    use crate::key::KeyModifiers;

    const MANIFEST: &str = r#"
[undo_action]
shortcut = ["Ctrl+Z"]

[redo_action]
shortcut = ["Ctrl+Y", "Ctrl+Shift+Z"]

[other_undo]
shortcut = ["Ctrl+Z"]
priority = 5
"#;

    fn ctrl(key: Code) -> KeySequence {
        KeySequence::new(KeyModifiers::CTRL, key)
    }

    #[test]
    fn parses_manifest() {
        let manifest = ActionManifest::from_toml_str(MANIFEST).unwrap();
        assert_eq!(manifest.actions.len(), 3);
        let redo = manifest
            .actions
            .iter()
            .find(|a| &*a.name == "redo_action")
            .unwrap();
        assert_eq!(redo.shortcut.len(), 2);
        assert_eq!(redo.priority, 0);
    }

    #[test]
    fn lower_priority_wins() {
        let collection = ActionCollection::new([ActionManifest::from_toml_str(MANIFEST).unwrap()]);
        assert_eq!(
            collection.get_action_id(ctrl(Code::KeyZ)),
            Some(Id::from_str("undo_action"))
        );
        assert_eq!(
            collection.get_all_action_ids(ctrl(Code::KeyZ)).map(|ids| ids.len()),
            Some(2)
        );
        assert_eq!(
            collection.get_action_id(KeySequence::new(
                KeyModifiers::CTRL | KeyModifiers::SHIFT,
                Code::KeyZ
            )),
            Some(Id::from_str("redo_action"))
        );
        assert_eq!(collection.get_action_id(ctrl(Code::KeyQ)), None);
    }

    #[test]
    fn shortcut_of_returns_first_binding() {
        let collection = ActionCollection::new([ActionManifest::from_toml_str(MANIFEST).unwrap()]);
        assert_eq!(
            collection.shortcut_of(Id::from_str("redo_action")),
            Some(ctrl(Code::KeyY))
        );
    }

    #[test]
    fn bad_shortcut_is_a_toml_error() {
        let err = ActionManifest::from_toml_str("[a]\nshortcut = [\"Ctrl+Nope\"]").unwrap_err();
        assert!(matches!(err, ActionManifestError::Toml(_)));
    }

    #[test]
    fn loads_manifests_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();

        std::fs::File::create(dir.path().join("default.actions"))
            .unwrap()
            .write_all(MANIFEST.as_bytes())
            .unwrap();
        std::fs::File::create(nested.join("extra.actions"))
            .unwrap()
            .write_all(b"[copy_css_action]\nshortcut = [\"Ctrl+Shift+C\"]\n")
            .unwrap();
        std::fs::File::create(dir.path().join("broken.actions"))
            .unwrap()
            .write_all(b"not toml at all [")
            .unwrap();
        std::fs::File::create(dir.path().join("readme.txt"))
            .unwrap()
            .write_all(b"ignored")
            .unwrap();

        let manifests = ActionManifest::load_dir(dir.path()).unwrap();
        assert_eq!(manifests.len(), 2);

        let collection = ActionCollection::new(manifests);
        assert_eq!(collection.len(), 4);
        assert_eq!(
            collection.get_action_id(KeySequence::new(
                KeyModifiers::CTRL | KeyModifiers::SHIFT,
                Code::KeyC
            )),
            Some(Id::from_str("copy_css_action"))
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ActionManifest::load("does/not/exist.actions").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.actions"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(ActionManifest::load_dir("does/not/exist").is_err());
    }
}
