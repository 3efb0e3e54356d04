use gloo_file::File as GlooFile;
use shared::{Modality, SlotSpec, required_slots};
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::super::{App, Msg, Phase};

pub fn render_modality_select(model: &App, ctx: &Context<App>) -> Html {
    let on_change = ctx.link().batch_callback(|e: Event| {
        let select = e.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())?;
        let modality = select.value().parse().ok()?;
        Some(Msg::SelectModality(modality))
    });

    html! {
        <select class="modality-select" onchange={on_change}>
            { for Modality::iter().map(|modality| html! {
                <option
                    value={modality.to_string()}
                    selected={model.modality == modality}
                >
                    { modality.selector_caption() }
                </option>
            }) }
        </select>
    }
}

pub fn render_upload_form(model: &App, ctx: &Context<App>) -> Html {
    let onsubmit = ctx.link().callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });
    let submitting = model.phase == Phase::Submitting;

    html! {
        <form class="upload-section" onsubmit={onsubmit}>
            <h2>{ model.modality.form_title() }</h2>
            { for required_slots(model.modality).iter().map(|slot| render_slot_input(model, ctx, slot)) }
            <button type="submit" class="analyze-btn" disabled={submitting}>
                {
                    if submitting {
                        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Predicting..."}</> }
                    } else {
                        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Predict"}</> }
                    }
                }
            </button>
        </form>
    }
}

fn render_slot_input(model: &App, ctx: &Context<App>, slot: &'static SlotSpec) -> Html {
    let name = slot.name;
    let on_change = ctx.link().callback(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().and_then(|list| list.item(0)).map(GlooFile::from);
        Msg::FileChosen(name, file)
    });
    let chosen = model.files.get(name).map(|file| file.name());

    html! {
        // Keyed per modality so the browser drops stale file selections when
        // slot names repeat across modalities.
        <label class="slot-label" key={format!("{}-{}", model.modality, name)}>
            { slot.label }
            <input
                type="file"
                name={name}
                accept={slot.accept}
                required={slot.required}
                onchange={on_change}
            />
            {
                if let Some(file_name) = chosen {
                    html! { <span class="chosen-file">{ file_name }</span> }
                } else {
                    html! {}
                }
            }
        </label>
    }
}
