//! # Hotkey Table
//!
//! Maps canonical key strings to actions. Built once from configuration at
//! startup; after that, dispatch is an exact-match lookup on the canonical
//! spelling of the live press. Actions are a closed enum, so a typo in the
//! configuration is caught while the table is built, not when the key is
//! pressed.

use log::warn;

use crate::core::keys;

/// Everything a hotkey can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateFile,
    ReadFile,
    AppendFile,
    DeleteFile,
    ListFiles,
    SearchFiles,
    OpenInEditor,
    ChangeDirectory,
    GoBackDirectory,
    JumpToDefault,
    AddBookmark,
    CycleBookmarks,
    MoveFile,
    CopyFile,
    FileInfo,
    CopyFilePath,
    CreateFromTemplate,
    AppendSnippet,
    Exit,
}

impl Action {
    /// Resolve a configuration action name. Names are exact; there is no
    /// fuzzy matching.
    pub fn from_name(name: &str) -> Option<Action> {
        match name {
            "CreateFile" => Some(Action::CreateFile),
            "ReadFile" => Some(Action::ReadFile),
            "AppendFile" => Some(Action::AppendFile),
            "DeleteFile" => Some(Action::DeleteFile),
            "ListFiles" => Some(Action::ListFiles),
            "SearchFiles" => Some(Action::SearchFiles),
            "OpenInEditor" => Some(Action::OpenInEditor),
            "ChangeDirectory" => Some(Action::ChangeDirectory),
            "GoBackDirectory" => Some(Action::GoBackDirectory),
            "JumpToDefault" => Some(Action::JumpToDefault),
            "AddBookmark" => Some(Action::AddBookmark),
            "CycleBookmarks" => Some(Action::CycleBookmarks),
            "MoveFile" => Some(Action::MoveFile),
            "CopyFile" => Some(Action::CopyFile),
            "FileInfo" => Some(Action::FileInfo),
            "CopyFilePath" => Some(Action::CopyFilePath),
            "CreateFromTemplate" => Some(Action::CreateFromTemplate),
            "AppendSnippet" => Some(Action::AppendSnippet),
            "Exit" => Some(Action::Exit),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::CreateFile => "CreateFile",
            Action::ReadFile => "ReadFile",
            Action::AppendFile => "AppendFile",
            Action::DeleteFile => "DeleteFile",
            Action::ListFiles => "ListFiles",
            Action::SearchFiles => "SearchFiles",
            Action::OpenInEditor => "OpenInEditor",
            Action::ChangeDirectory => "ChangeDirectory",
            Action::GoBackDirectory => "GoBackDirectory",
            Action::JumpToDefault => "JumpToDefault",
            Action::AddBookmark => "AddBookmark",
            Action::CycleBookmarks => "CycleBookmarks",
            Action::MoveFile => "MoveFile",
            Action::CopyFile => "CopyFile",
            Action::FileInfo => "FileInfo",
            Action::CopyFilePath => "CopyFilePath",
            Action::CreateFromTemplate => "CreateFromTemplate",
            Action::AppendSnippet => "AppendSnippet",
            Action::Exit => "Exit",
        }
    }
}

/// Canonical key string → action, in configuration order.
#[derive(Debug, Default)]
pub struct Keymap {
    bindings: Vec<(String, Action)>,
}

impl Keymap {
    /// Build the table from `(action name, key expression)` pairs.
    ///
    /// Pairs with an empty side are skipped. Unknown action names are
    /// warned about and skipped. When two expressions canonicalize to the
    /// same key, the later pair wins and the override is warned about.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut bindings: Vec<(String, Action)> = Vec::new();
        for (name, expr) in pairs {
            let name = name.trim();
            let canonical = keys::normalize_expr(expr);
            if name.is_empty() || canonical.is_empty() {
                continue;
            }
            let Some(action) = Action::from_name(name) else {
                warn!("Unknown action in hotkey config: {name}");
                continue;
            };
            match bindings.iter_mut().find(|(key, _)| *key == canonical) {
                Some(slot) => {
                    warn!(
                        "Hotkey {canonical} rebound from {} to {}",
                        slot.1.name(),
                        action.name()
                    );
                    slot.1 = action;
                }
                None => bindings.push((canonical, action)),
            }
        }
        Self { bindings }
    }

    /// Exact-match lookup on a canonical key string.
    pub fn lookup(&self, canonical: &str) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(key, _)| key == canonical)
            .map(|(_, action)| *action)
    }

    /// Bindings in insertion order, for the hotkey pane.
    pub fn bindings(&self) -> &[(String, Action)] {
        &self.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
