use yew::html::Scope;
use yew::prelude::*;

use super::super::{App, Msg};

pub fn render_theme_toggle(theme: &str, link: &Scope<App>) -> Html {
    let (icon, title) = if theme == "light" {
        ("fa-solid fa-moon", "Switch to Dark Mode")
    } else {
        ("fa-solid fa-sun", "Switch to Light Mode")
    };

    html! {
        <div class="top-right">
            <button
                id="theme-toggle"
                class="theme-toggle"
                onclick={link.callback(|_| Msg::ToggleTheme)}
                title={title}
            >
                <i class={icon}></i>
            </button>
        </div>
    }
}
