use yew::prelude::*;

/// Shown while a submission is in flight.
pub fn render_loading() -> Html {
    html! {
        <div class="loading-container">
            <i class="fa-solid fa-spinner fa-spin"></i>
            <span class="loading-text">{"Processing..."}</span>
        </div>
    }
}
