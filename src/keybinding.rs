/// Keyboard shortcut parsing for manifest `suggested_key` entries
///
/// Shortcuts are written as `+`-separated tokens with the key last, e.g.
/// `Ctrl+Shift+E` or `Command+Shift+E`. The rules follow what the browser
/// accepts when it loads the manifest:
/// - tokens are case-sensitive and each modifier may appear once
/// - a regular key needs `Ctrl`, `Alt`, or on macOS `Command`/`MacCtrl`
/// - `Ctrl+Alt` is rejected (it collides with AltGr)
/// - media keys stand alone
use crate::error::ShortcutError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    Mac,
    Windows,
    Linux,
    ChromeOs,
    #[default]
    Other,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Other,
        Platform::Windows,
        Platform::Linux,
        Platform::ChromeOs,
        Platform::Mac,
    ];

    pub fn from_user_agent(user_agent: &str) -> Platform {
        if user_agent.contains("Macintosh") || user_agent.contains("Mac OS X") {
            Platform::Mac
        } else if user_agent.contains("CrOS") {
            Platform::ChromeOs
        } else if user_agent.contains("Windows") {
            Platform::Windows
        } else if user_agent.contains("Linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Letter(char),
    Digit(char),
    Comma,
    Period,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
    Insert,
    Delete,
    Up,
    Down,
    Left,
    Right,
    MediaNextTrack,
    MediaPlayPause,
    MediaPrevTrack,
    MediaStop,
}

const NAMED_KEYS: &[(&str, Key)] = &[
    ("Comma", Key::Comma),
    ("Period", Key::Period),
    ("Home", Key::Home),
    ("End", Key::End),
    ("PageUp", Key::PageUp),
    ("PageDown", Key::PageDown),
    ("Space", Key::Space),
    ("Insert", Key::Insert),
    ("Delete", Key::Delete),
    ("Up", Key::Up),
    ("Down", Key::Down),
    ("Left", Key::Left),
    ("Right", Key::Right),
    ("MediaNextTrack", Key::MediaNextTrack),
    ("MediaPlayPause", Key::MediaPlayPause),
    ("MediaPrevTrack", Key::MediaPrevTrack),
    ("MediaStop", Key::MediaStop),
];

impl Key {
    fn parse(token: &str) -> Option<Key> {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return match c {
                'A'..='Z' => Some(Key::Letter(c)),
                '0'..='9' => Some(Key::Digit(c)),
                _ => None,
            };
        }

        NAMED_KEYS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, key)| *key)
    }

    pub fn is_media(&self) -> bool {
        matches!(
            self,
            Key::MediaNextTrack | Key::MediaPlayPause | Key::MediaPrevTrack | Key::MediaStop
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Letter(c) | Key::Digit(c) => write!(f, "{}", c),
            named => {
                let name = NAMED_KEYS
                    .iter()
                    .find(|(_, key)| key == named)
                    .map(|(name, _)| *name)
                    .unwrap_or_default();
                f.write_str(name)
            }
        }
    }
}

/// A validated shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub command: bool,
    pub mac_ctrl: bool,
    pub key: Key,
}

impl Shortcut {
    pub fn parse(text: &str, platform: Platform) -> Result<Shortcut, ShortcutError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ShortcutError::Empty);
        }

        let tokens: Vec<&str> = text.split('+').map(str::trim).collect();
        if tokens.iter().any(|t| t.is_empty()) {
            return Err(ShortcutError::EmptyToken(text.to_string()));
        }

        let (key_token, modifier_tokens) = tokens.split_last().ok_or(ShortcutError::Empty)?;
        let key = Key::parse(key_token).ok_or_else(|| ShortcutError::UnknownKey(key_token.to_string()))?;

        let mut shortcut = Shortcut {
            ctrl: false,
            alt: false,
            shift: false,
            command: false,
            mac_ctrl: false,
            key,
        };

        for token in modifier_tokens {
            let slot = match *token {
                "Ctrl" => &mut shortcut.ctrl,
                "Alt" => &mut shortcut.alt,
                "Shift" => &mut shortcut.shift,
                "Command" | "MacCtrl" if platform != Platform::Mac => {
                    return Err(ShortcutError::MacOnlyModifier(token.to_string()));
                }
                "Command" => &mut shortcut.command,
                "MacCtrl" => &mut shortcut.mac_ctrl,
                other => return Err(ShortcutError::UnknownModifier(other.to_string())),
            };
            if *slot {
                return Err(ShortcutError::DuplicateModifier(token.to_string()));
            }
            *slot = true;
        }

        if key.is_media() {
            if !modifier_tokens.is_empty() {
                return Err(ShortcutError::ModifiedMediaKey(text.to_string()));
            }
            return Ok(shortcut);
        }

        if shortcut.ctrl && shortcut.alt {
            return Err(ShortcutError::CtrlAlt(text.to_string()));
        }
        if !(shortcut.ctrl || shortcut.alt || shortcut.command || shortcut.mac_ctrl) {
            return Err(ShortcutError::MissingModifier(text.to_string()));
        }

        Ok(shortcut)
    }

    /// The shortcut as the browser binds it on `platform`; macOS maps `Ctrl` to `Command`
    pub fn normalized(&self, platform: Platform) -> Shortcut {
        let mut shortcut = *self;
        if platform == Platform::Mac && shortcut.ctrl {
            shortcut.ctrl = false;
            shortcut.command = true;
        }
        shortcut
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = [
            (self.ctrl, "Ctrl"),
            (self.mac_ctrl, "MacCtrl"),
            (self.command, "Command"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
        ];
        for (_, name) in modifiers.iter().filter(|(on, _)| *on) {
            write!(f, "{}+", name)?;
        }
        write!(f, "{}", self.key)
    }
}

/// Manifest `suggested_key` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuggestedKey {
    pub default: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linux: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chromeos: Option<String>,
}

impl SuggestedKey {
    pub fn new(default: impl Into<String>) -> SuggestedKey {
        SuggestedKey {
            default: default.into(),
            mac: None,
            windows: None,
            linux: None,
            chromeos: None,
        }
    }

    pub fn for_platform(&self, platform: Platform) -> &str {
        let specific = match platform {
            Platform::Mac => self.mac.as_deref(),
            Platform::Windows => self.windows.as_deref(),
            Platform::Linux => self.linux.as_deref(),
            Platform::ChromeOs => self.chromeos.as_deref(),
            Platform::Other => None,
        };
        specific.unwrap_or(&self.default)
    }

    pub fn parse_for(&self, platform: Platform) -> Result<Shortcut, ShortcutError> {
        Shortcut::parse(self.for_platform(platform), platform)
    }
}
