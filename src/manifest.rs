/// Extension manifest: the static configuration the browser reads at load time

use crate::command::TOGGLE_POPUP;
use crate::error::ManifestError;
use crate::keybinding::{Platform, SuggestedKey};
use crate::match_pattern::MatchPattern;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const EXTENSION_NAME: &str = "Find Tab";
pub const BACKGROUND_SCRIPT: &str = "background.js";
pub const POPUP_DOCUMENT: &str = "popup.html";

/// Browsers cap the number of commands that may ship a suggested key
const MAX_SUGGESTED_SHORTCUTS: usize = 4;

/// The two configuration variants the extension ships in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// `tabs` on every URL
    #[default]
    AllUrls,
    /// `tabs` and `sessions`, web pages only
    Sessions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    Tabs,
    Sessions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest_version: u8,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub host_permissions: Vec<String>,
    pub background: Background,
    pub action: Action,
    #[serde(default)]
    pub commands: BTreeMap<String, Command>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_security_policy: Option<ContentSecurityPolicy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_worker: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub default_popup: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_key: Option<SuggestedKey>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSecurityPolicy {
    pub extension_pages: String,
}

impl Manifest {
    pub fn for_profile(profile: Profile) -> Manifest {
        let (permissions, host_permissions) = match profile {
            Profile::AllUrls => (vec![Permission::Tabs], vec!["<all_urls>".to_string()]),
            Profile::Sessions => (
                vec![Permission::Tabs, Permission::Sessions],
                vec!["*://*/*".to_string()],
            ),
        };

        let mut commands = BTreeMap::new();
        commands.insert(
            TOGGLE_POPUP.to_string(),
            Command {
                suggested_key: Some(SuggestedKey {
                    mac: Some("Command+Shift+E".to_string()),
                    ..SuggestedKey::new("Ctrl+Shift+E")
                }),
                description: "Opens the popup".to_string(),
            },
        );

        Manifest {
            manifest_version: 3,
            name: EXTENSION_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: env!("CARGO_PKG_DESCRIPTION").to_string(),
            permissions,
            host_permissions,
            // Chrome reads service_worker, Firefox reads scripts
            background: Background {
                service_worker: Some(BACKGROUND_SCRIPT.to_string()),
                scripts: vec![BACKGROUND_SCRIPT.to_string()],
                kind: Some("module".to_string()),
            },
            action: Action {
                default_popup: POPUP_DOCUMENT.to_string(),
                default_title: EXTENSION_NAME.to_string(),
            },
            commands,
            content_security_policy: Some(ContentSecurityPolicy {
                extension_pages: "script-src 'self' 'wasm-unsafe-eval'; object-src 'self'".to_string(),
            }),
        }
    }

    pub fn from_json(json: &str) -> Result<Manifest, ManifestError> {
        serde_json::from_str(json).map_err(|e| ManifestError::Json(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ManifestError> {
        serde_json::to_string_pretty(self).map_err(|e| ManifestError::Json(e.to_string()))
    }

    pub fn suggested_key(&self, command: &str) -> Option<&SuggestedKey> {
        self.commands.get(command).and_then(|c| c.suggested_key.as_ref())
    }

    /// Check the manifest against the rules the browser enforces on load
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.manifest_version != 3 {
            return Err(ManifestError::UnsupportedVersion(self.manifest_version));
        }

        if self.action.default_popup.is_empty() || !self.action.default_popup.ends_with(".html") {
            return Err(ManifestError::InvalidPopup(self.action.default_popup.clone()));
        }

        for pattern in &self.host_permissions {
            MatchPattern::parse(pattern).map_err(|source| ManifestError::InvalidHostPattern {
                pattern: pattern.clone(),
                source,
            })?;
        }

        if !self.commands.contains_key(TOGGLE_POPUP) {
            return Err(ManifestError::MissingCommand(TOGGLE_POPUP.to_string()));
        }

        let mut seen: HashMap<(Platform, String), &str> = HashMap::new();
        let mut suggested = 0;

        for (name, command) in &self.commands {
            // _execute_action and friends get their description from the browser
            if !name.starts_with("_execute_") && command.description.trim().is_empty() {
                return Err(ManifestError::MissingDescription(name.clone()));
            }

            let Some(key) = &command.suggested_key else {
                continue;
            };
            suggested += 1;

            for platform in Platform::ALL {
                let shortcut = key.parse_for(platform).map_err(|source| ManifestError::InvalidShortcut {
                    command: name.clone(),
                    source,
                })?;
                let canonical = shortcut.normalized(platform).to_string();
                if seen.insert((platform, canonical.clone()), name).is_some() {
                    return Err(ManifestError::DuplicateShortcut(canonical));
                }
            }
        }

        if suggested > MAX_SUGGESTED_SHORTCUTS {
            return Err(ManifestError::TooManyShortcuts(suggested));
        }

        Ok(())
    }
}
