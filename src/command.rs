/// Command dispatch: maps a fired shortcut command to the popup action

use serde::{Deserialize, Serialize};

/// Identifier of the command declared in the manifest for opening the popup
pub const TOGGLE_POPUP: &str = "togglePopup";

/// The host's popup control surface
pub trait PopupHost {
    /// Ask the host to show the extension popup. Fire-and-forget.
    fn open_popup(&self);
}

/// What a single command event resulted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    OpenedPopup,
    Ignored,
}

/// Routes command identifiers to the popup host
pub struct CommandDispatcher<H> {
    host: H,
    toggle_command: String,
}

impl<H: PopupHost> CommandDispatcher<H> {
    pub fn new(host: H) -> Self {
        Self::with_toggle_command(host, TOGGLE_POPUP)
    }

    pub fn with_toggle_command(host: H, toggle_command: impl Into<String>) -> Self {
        CommandDispatcher {
            host,
            toggle_command: toggle_command.into(),
        }
    }

    pub fn toggle_command(&self) -> &str {
        &self.toggle_command
    }

    /// Handle one command event. Exact, case-sensitive match only.
    pub fn handle(&self, command: &str) -> Dispatch {
        if command == self.toggle_command {
            self.host.open_popup();
            Dispatch::OpenedPopup
        } else {
            Dispatch::Ignored
        }
    }
}

/// A command as reported by `chrome.commands.getAll()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredCommand {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub shortcut: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The shortcut currently bound to `name`, if the user (or the manifest) assigned one
pub fn assigned_shortcut(commands: &[RegisteredCommand], name: &str) -> Option<String> {
    commands
        .iter()
        .find(|command| command.name.as_deref() == Some(name))
        .and_then(|command| command.shortcut.clone())
        .filter(|shortcut| !shortcut.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingHost {
        opened: Rc<Cell<usize>>,
    }

    impl PopupHost for RecordingHost {
        fn open_popup(&self) {
            self.opened.set(self.opened.get() + 1);
        }
    }

    fn registered(name: &str, shortcut: &str) -> RegisteredCommand {
        RegisteredCommand {
            name: Some(name.to_string()),
            shortcut: Some(shortcut.to_string()),
            description: None,
        }
    }

    #[test]
    fn test_toggle_popup_opens_once() {
        let host = RecordingHost::default();
        let dispatcher = CommandDispatcher::new(host.clone());

        assert_eq!(dispatcher.handle("togglePopup"), Dispatch::OpenedPopup);
        assert_eq!(host.opened.get(), 1);
    }

    #[test]
    fn test_other_command_is_ignored() {
        let host = RecordingHost::default();
        let dispatcher = CommandDispatcher::new(host.clone());

        assert_eq!(dispatcher.handle("someOtherCommand"), Dispatch::Ignored);
        assert_eq!(host.opened.get(), 0);
    }

    #[test]
    fn test_near_misses_are_ignored() {
        let host = RecordingHost::default();
        let dispatcher = CommandDispatcher::new(host.clone());

        for command in ["", "togglepopup", "TogglePopup", " togglePopup", "togglePopup ", "_execute_action"] {
            assert_eq!(dispatcher.handle(command), Dispatch::Ignored, "{command:?}");
        }
        assert_eq!(host.opened.get(), 0);
    }

    #[test]
    fn test_consecutive_toggles_are_not_debounced() {
        let host = RecordingHost::default();
        let dispatcher = CommandDispatcher::new(host.clone());

        dispatcher.handle("togglePopup");
        dispatcher.handle("togglePopup");

        assert_eq!(host.opened.get(), 2);
    }

    #[test]
    fn test_interleaved_commands() {
        let host = RecordingHost::default();
        let dispatcher = CommandDispatcher::new(host.clone());

        for command in ["togglePopup", "other", "togglePopup", "other", "other"] {
            dispatcher.handle(command);
        }

        assert_eq!(host.opened.get(), 2);
    }

    #[test]
    fn test_custom_toggle_command() {
        let host = RecordingHost::default();
        let dispatcher = CommandDispatcher::with_toggle_command(host.clone(), "show");

        assert_eq!(dispatcher.toggle_command(), "show");
        assert_eq!(dispatcher.handle("togglePopup"), Dispatch::Ignored);
        assert_eq!(dispatcher.handle("show"), Dispatch::OpenedPopup);
        assert_eq!(host.opened.get(), 1);
    }

    #[test]
    fn test_assigned_shortcut() {
        let commands = vec![
            registered("_execute_action", ""),
            registered("togglePopup", "Ctrl+Shift+E"),
        ];

        assert_eq!(assigned_shortcut(&commands, TOGGLE_POPUP), Some("Ctrl+Shift+E".to_string()));
        assert_eq!(assigned_shortcut(&commands, "_execute_action"), None);
        assert_eq!(assigned_shortcut(&commands, "missing"), None);
    }

    #[test]
    fn test_registered_command_from_host_json() {
        let json = r#"[{"name":"togglePopup","shortcut":"⇧⌘E","description":"Opens the popup"},{"name":"_execute_action"}]"#;
        let commands: Vec<RegisteredCommand> = serde_json::from_str(json).unwrap();

        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1].shortcut, None);
        assert_eq!(assigned_shortcut(&commands, TOGGLE_POPUP), Some("⇧⌘E".to_string()));
    }
}
