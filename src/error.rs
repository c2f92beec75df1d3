/// Error types for shortcut, pattern and manifest handling

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShortcutError {
    #[error("shortcut is empty")]
    Empty,

    #[error("shortcut has an empty token: {0:?}")]
    EmptyToken(String),

    #[error("unknown modifier: {0}")]
    UnknownModifier(String),

    #[error("modifier {0} is only available on macOS")]
    MacOnlyModifier(String),

    #[error("modifier {0} appears more than once")]
    DuplicateModifier(String),

    #[error("unknown key: {0}")]
    UnknownKey(String),

    #[error("shortcut needs Ctrl, Alt or Command: {0}")]
    MissingModifier(String),

    #[error("Ctrl+Alt combinations are not allowed: {0}")]
    CtrlAlt(String),

    #[error("media keys take no modifiers: {0}")]
    ModifiedMediaKey(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatternError {
    #[error("missing scheme separator in {0:?}")]
    MissingScheme(String),

    #[error("unsupported scheme {0:?}")]
    InvalidScheme(String),

    #[error("invalid host {0:?}")]
    InvalidHost(String),

    #[error("missing path in {0:?}")]
    MissingPath(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ManifestError {
    #[error("manifest version {0} is not supported, expected 3")]
    UnsupportedVersion(u8),

    #[error("popup must be an html document: {0:?}")]
    InvalidPopup(String),

    #[error("host permission {pattern:?} is invalid: {source}")]
    InvalidHostPattern {
        pattern: String,
        source: PatternError,
    },

    #[error("command {0:?} is not declared")]
    MissingCommand(String),

    #[error("command {0:?} has no description")]
    MissingDescription(String),

    #[error("command {command:?} has an invalid shortcut: {source}")]
    InvalidShortcut {
        command: String,
        source: ShortcutError,
    },

    #[error("{0} commands suggest a shortcut, at most 4 are allowed")]
    TooManyShortcuts(usize),

    #[error("shortcut {0} is suggested by more than one command")]
    DuplicateShortcut(String),

    #[error("manifest json error: {0}")]
    Json(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistrationError {
    #[error("command listener is already registered")]
    AlreadyRegistered,
}
