use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use super::super::{App, Phase};

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// One line per failure message; batched validation errors keep their
/// per-entry lines.
pub fn render_error_message(model: &App) -> Html {
    let lines = match &model.phase {
        Phase::Failed(error) => error.lines(),
        _ => return html! {},
    };

    html! {
        <div class="error-message">
            <i class="fa-solid fa-circle-exclamation"></i>
            { for lines.iter().map(|line| html! { <p>{ line }</p> }) }
        </div>
    }
}
