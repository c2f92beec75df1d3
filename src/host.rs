/// Bindings to the extension host APIs (chrome.commands, chrome.action)

use crate::background::CommandSource;
use crate::command::{PopupHost, RegisteredCommand};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};

// Import JS bridge functions
#[wasm_bindgen(module = "/js/commands.js")]
extern "C" {
    fn addCommandListener(listener: &js_sys::Function);

    fn openPopup() -> js_sys::Promise;

    #[wasm_bindgen(catch)]
    async fn getAllCommands() -> Result<JsValue, JsValue>;
}

/// `chrome.commands.onCommand`
pub struct ChromeCommands;

impl CommandSource for ChromeCommands {
    fn add_listener(&self, listener: Box<dyn FnMut(String)>) {
        let callback = Closure::wrap(listener);
        addCommandListener(callback.as_ref().unchecked_ref());
        // Lives until the background process shuts down
        callback.forget();
    }
}

/// `chrome.action.openPopup()`
pub struct ChromePopup;

impl PopupHost for ChromePopup {
    fn open_popup(&self) {
        // Called synchronously from the command handler; the host drops popup
        // requests made after the shortcut's user gesture has ended.
        let request = JsFuture::from(openPopup());
        spawn_local(async move {
            if let Err(e) = request.await {
                log::debug!("openPopup rejected: {:?}", e);
            }
        });
    }
}

/// Commands and their current bindings, as the host reports them
pub async fn registered_commands() -> Result<Vec<RegisteredCommand>, String> {
    match getAllCommands().await {
        Ok(commands_js) => {
            let commands: Vec<RegisteredCommand> = serde_wasm_bindgen::from_value(commands_js)
                .map_err(|e| format!("Failed to parse commands: {:?}", e))?;
            Ok(commands)
        }
        Err(e) => Err(format!("Failed to get commands: {:?}", e)),
    }
}
