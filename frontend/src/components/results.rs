use shared::ResultBlock;
use yew::prelude::*;

use super::super::{App, Phase};

pub fn render_results(model: &App) -> Html {
    let blocks = match &model.phase {
        Phase::Success(blocks) => blocks,
        _ => return html! {},
    };

    html! {
        <div class="results-container">
            <h2 class="results-title">{"Prediction Results"}</h2>
            { for blocks.iter().map(render_block) }
        </div>
    }
}

fn render_block(block: &ResultBlock) -> Html {
    html! {
        <div class={classes!("result-item", block.combined.then_some("combined-result"))}>
            <h3 class="subtitle">{ &block.title }</h3>
            { for block.lines.iter().map(|line| html! {
                <p class="result-text">{ line }</p>
            }) }
        </div>
    }
}
