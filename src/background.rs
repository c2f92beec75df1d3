/// Background entry: wires the host command events into the dispatcher

use crate::command::{CommandDispatcher, Dispatch, PopupHost};
use crate::error::RegistrationError;
use crate::host::{ChromeCommands, ChromePopup};
use std::cell::Cell;

/// A host event channel that delivers command identifiers
pub trait CommandSource {
    fn add_listener(&self, listener: Box<dyn FnMut(String)>);
}

/// Guards the one-listener-per-process rule
#[derive(Debug, Default)]
pub struct Listener {
    installed: Cell<bool>,
}

impl Listener {
    pub fn new() -> Self {
        Listener {
            installed: Cell::new(false),
        }
    }

    pub fn is_installed(&self) -> bool {
        self.installed.get()
    }

    pub fn install<S, H>(&self, source: &S, dispatcher: CommandDispatcher<H>) -> Result<(), RegistrationError>
    where
        S: CommandSource,
        H: PopupHost + 'static,
    {
        if self.installed.replace(true) {
            log::warn!("Ignoring duplicate command listener registration");
            return Err(RegistrationError::AlreadyRegistered);
        }

        log::info!("Listening for command {:?}", dispatcher.toggle_command());
        source.add_listener(Box::new(move |command: String| {
            match dispatcher.handle(&command) {
                Dispatch::OpenedPopup => log::debug!("Command {:?} opened the popup", command),
                Dispatch::Ignored => log::debug!("Command {:?} ignored", command),
            }
        }));

        Ok(())
    }
}

thread_local! {
    static BACKGROUND: Listener = Listener::new();
}

/// Register the process-wide listener against `chrome.commands.onCommand`
pub fn start() -> Result<(), RegistrationError> {
    start_with(&ChromeCommands, ChromePopup)
}

/// Install the process-wide listener on `source`, dispatching to `host`
pub fn start_with<S, H>(source: &S, host: H) -> Result<(), RegistrationError>
where
    S: CommandSource,
    H: PopupHost + 'static,
{
    BACKGROUND.with(|listener| listener.install(source, CommandDispatcher::new(host)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeCommands {
        listeners: RefCell<Vec<Box<dyn FnMut(String)>>>,
    }

    impl FakeCommands {
        fn fire(&self, command: &str) {
            for listener in self.listeners.borrow_mut().iter_mut() {
                listener(command.to_string());
            }
        }

        fn listener_count(&self) -> usize {
            self.listeners.borrow().len()
        }
    }

    impl CommandSource for FakeCommands {
        fn add_listener(&self, listener: Box<dyn FnMut(String)>) {
            self.listeners.borrow_mut().push(listener);
        }
    }

    /// Holds commands that arrive before a listener is attached, like the JS bridge
    #[derive(Default)]
    struct QueuedCommands {
        pending: RefCell<Vec<String>>,
        listener: RefCell<Option<Box<dyn FnMut(String)>>>,
    }

    impl QueuedCommands {
        fn fire(&self, command: &str) {
            match self.listener.borrow_mut().as_mut() {
                Some(listener) => listener(command.to_string()),
                None => self.pending.borrow_mut().push(command.to_string()),
            }
        }
    }

    impl CommandSource for QueuedCommands {
        fn add_listener(&self, mut listener: Box<dyn FnMut(String)>) {
            for command in self.pending.borrow_mut().drain(..) {
                listener(command);
            }
            *self.listener.borrow_mut() = Some(listener);
        }
    }

    #[derive(Clone, Default)]
    struct CountingPopup {
        opened: Rc<Cell<usize>>,
    }

    impl PopupHost for CountingPopup {
        fn open_popup(&self) {
            self.opened.set(self.opened.get() + 1);
        }
    }

    #[test]
    fn test_install_registers_one_listener() {
        let source = FakeCommands::default();
        let listener = Listener::new();

        assert!(!listener.is_installed());
        listener
            .install(&source, CommandDispatcher::new(CountingPopup::default()))
            .unwrap();

        assert!(listener.is_installed());
        assert_eq!(source.listener_count(), 1);
    }

    #[test]
    fn test_second_install_is_rejected() {
        let source = FakeCommands::default();
        let popup = CountingPopup::default();
        let listener = Listener::new();

        listener.install(&source, CommandDispatcher::new(popup.clone())).unwrap();
        let second = listener.install(&source, CommandDispatcher::new(popup.clone()));

        assert_eq!(second, Err(RegistrationError::AlreadyRegistered));
        assert_eq!(source.listener_count(), 1);

        // A duplicate listener would open the popup twice per event
        source.fire("togglePopup");
        assert_eq!(popup.opened.get(), 1);
    }

    #[test]
    fn test_events_flow_through_to_popup() {
        let source = FakeCommands::default();
        let popup = CountingPopup::default();
        let listener = Listener::new();
        listener.install(&source, CommandDispatcher::new(popup.clone())).unwrap();

        source.fire("someOtherCommand");
        assert_eq!(popup.opened.get(), 0);

        source.fire("togglePopup");
        source.fire("togglePopup");
        assert_eq!(popup.opened.get(), 2);
    }

    #[test]
    fn test_command_before_install_is_dispatched_once() {
        let source = QueuedCommands::default();
        let popup = CountingPopup::default();
        let listener = Listener::new();

        // The command that woke the worker arrives before wasm is ready
        source.fire("togglePopup");
        assert_eq!(popup.opened.get(), 0);

        listener.install(&source, CommandDispatcher::new(popup.clone())).unwrap();
        assert_eq!(popup.opened.get(), 1);

        source.fire("togglePopup");
        assert_eq!(popup.opened.get(), 2);
    }

    #[test]
    fn test_start_with_registers_once_per_thread() {
        let source = FakeCommands::default();
        let popup = CountingPopup::default();

        assert_eq!(start_with(&source, popup.clone()), Ok(()));
        assert_eq!(
            start_with(&source, popup.clone()),
            Err(RegistrationError::AlreadyRegistered)
        );
        assert_eq!(source.listener_count(), 1);

        source.fire("togglePopup");
        assert_eq!(popup.opened.get(), 1);
    }
}
