use yew::prelude::*;

use super::super::{App, Msg};
use super::utils::debounce;

pub fn render_history(model: &App, ctx: &Context<App>) -> Html {
    let link = ctx.link().clone();

    html! {
        <div class="history-container">
            <div class="history-header">
                <h2>{"Prediction History"}</h2>
                <button
                    class="analyze-btn"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::RefreshHistory)
                    })}
                >
                    <i class="fa-solid fa-rotate"></i>{" Refresh"}
                </button>
            </div>
            {
                if let Some(message) = &model.history_error {
                    html! { <p class="history-error">{ message }</p> }
                } else {
                    html! {}
                }
            }
            {
                if let Some(at) = &model.history_refreshed_at {
                    html! { <p class="history-refreshed">{ format!("Last refreshed at {at}") }</p> }
                } else {
                    html! {}
                }
            }
            {
                if model.history.is_empty() {
                    html! { <p class="history-empty">{"No predictions recorded yet."}</p> }
                } else {
                    render_table(model)
                }
            }
        </div>
    }
}

fn render_table(model: &App) -> Html {
    html! {
        <table class="history-table">
            <thead>
                <tr>
                    <th>{"ID"}</th>
                    <th>{"Modality"}</th>
                    <th>{"File"}</th>
                    <th>{"Probability"}</th>
                    <th>{"Class"}</th>
                    <th>{"Timestamp"}</th>
                </tr>
            </thead>
            <tbody>
                { for model.history.iter().map(|row| html! {
                    <tr key={row.id.to_string()}>
                        <td>{ row.id }</td>
                        <td>{ &row.modality }</td>
                        <td>{ &row.file_name }</td>
                        <td>{ format!("{:.6}", row.probability) }</td>
                        <td>{ format!("{} ({})", row.class_value, row.class_label) }</td>
                        <td>{ &row.timestamp }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    }
}
