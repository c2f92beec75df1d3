/// Popup UI for Find Tab

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use crate::command::{assigned_shortcut, TOGGLE_POPUP};
use crate::host::registered_commands;
use crate::keybinding::Platform;
use crate::manifest::{Manifest, Profile, EXTENSION_NAME};

#[derive(Clone, PartialEq)]
enum ShortcutState {
    Loading,
    Assigned(String),
    Unassigned,
    // Host query failed, showing the manifest's suggestion instead
    Suggested(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let shortcut = use_state(|| ShortcutState::Loading);

    // Look up the live binding on mount; users can rebind it in the browser
    {
        let shortcut = shortcut.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match registered_commands().await {
                    Ok(commands) => match assigned_shortcut(&commands, TOGGLE_POPUP) {
                        Some(keys) => shortcut.set(ShortcutState::Assigned(keys)),
                        None => shortcut.set(ShortcutState::Unassigned),
                    },
                    Err(e) => {
                        log::warn!("{}", e);
                        shortcut.set(ShortcutState::Suggested(suggested_shortcut(current_platform())));
                    }
                }
            });
            || ()
        });
    }

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{EXTENSION_NAME}</h1>

            {match &*shortcut {
                ShortcutState::Loading => html! {
                    <Spinner />
                },
                ShortcutState::Assigned(keys) => html! {
                    <Alert r#type={AlertType::Info} title={assigned_message(keys)} inline={true}>
                    </Alert>
                },
                ShortcutState::Suggested(keys) => html! {
                    <p>
                        {"Default shortcut: "}
                        <span class="shortcut">{keys}</span>
                        {" (the current binding could not be read)"}
                    </p>
                },
                ShortcutState::Unassigned => html! {
                    <Alert r#type={AlertType::Warning} title={"No shortcut assigned. Set one on the browser's extension shortcuts page."} inline={true}>
                    </Alert>
                },
            }}

            <p class="footer-popup">
                {format!("{} v{}", EXTENSION_NAME, env!("CARGO_PKG_VERSION"))}
            </p>
        </div>
    }
}

fn assigned_message(keys: &str) -> String {
    format!("Press {} to open this popup.", keys)
}

fn current_platform() -> Platform {
    web_sys::window()
        .and_then(|window| window.navigator().user_agent().ok())
        .map(|user_agent| Platform::from_user_agent(&user_agent))
        .unwrap_or_default()
}

fn suggested_shortcut(platform: Platform) -> String {
    Manifest::for_profile(Profile::default())
        .suggested_key(TOGGLE_POPUP)
        .map(|key| key.for_platform(platform).to_string())
        .unwrap_or_default()
}
