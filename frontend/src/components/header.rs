use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-ribbon"></i> {" Breast Cancer Prediction"}</h1>
            <p class="subtitle">{"Upload ultrasound, mammogram or MRI data for analysis"}</p>
        </header>
    }
}

pub fn render_footer() -> Html {
    html! {
        <footer class="app-footer">
            <p>{"Breast Cancer Prediction | Fullstack Rust WASM"}</p>
        </footer>
    }
}
