use std::collections::HashMap;

use gloo_file::File as GlooFile;
use gloo_storage::{LocalStorage, Storage};
use shared::{HistoryEntry, Modality, ResultBlock};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod api;
mod components;
mod config;

use api::PredictError;
use components::header::{render_footer, render_header};
use components::history::render_history;
use components::loading::render_loading;
use components::results::render_results;
use components::theme_toggle::render_theme_toggle;
use components::upload_form::{render_modality_select, render_upload_form};
use components::utils::render_error_message;

/// Lifecycle of the current submission attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Idle,
    Submitting,
    Success(Vec<ResultBlock>),
    Failed(PredictError),
}

// Yew msg components
pub enum Msg {
    // Form state
    SelectModality(Modality),
    FileChosen(&'static str, Option<GlooFile>),

    // Submission lifecycle
    Submit,
    Settled(Result<Vec<ResultBlock>, PredictError>),

    // History
    RefreshHistory,
    HistoryFetched(Result<Vec<HistoryEntry>, String>),

    // UI states
    ToggleTheme,
}

// Main component
pub struct App {
    pub modality: Modality,
    pub files: HashMap<String, GlooFile>,
    pub phase: Phase,
    pub history: Vec<HistoryEntry>,
    pub history_error: Option<String>,
    pub history_refreshed_at: Option<String>,
    pub theme: String,
}

// Yew component implementation
impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let theme: String = LocalStorage::get("theme").unwrap_or_else(|_| "light".to_string());
        if theme == "dark" {
            let body = web_sys::window().unwrap().document().unwrap().body().unwrap();
            body.class_list().add_1("dark-mode").unwrap();
        }

        Self::refresh_history(ctx);

        Self {
            modality: Modality::Ultrasound,
            files: HashMap::new(),
            phase: Phase::Idle,
            history: Vec::new(),
            history_error: None,
            history_refreshed_at: None,
            theme,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Form state
            Msg::SelectModality(modality) => self.handle_select_modality(modality),
            Msg::FileChosen(slot, file) => self.handle_file_chosen(slot, file),

            // Submission lifecycle
            Msg::Submit => self.handle_submit(ctx),
            Msg::Settled(outcome) => self.handle_settled(ctx, outcome),

            // History
            Msg::RefreshHistory => {
                Self::refresh_history(ctx);
                false
            }
            Msg::HistoryFetched(outcome) => self.handle_history_fetched(outcome),

            // UI states
            Msg::ToggleTheme => self.handle_toggle_theme(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }
                { render_theme_toggle(&self.theme, ctx.link()) }

                <main class="main-content">
                    { render_modality_select(self, ctx) }
                    { render_upload_form(self, ctx) }
                    { if self.phase == Phase::Submitting { render_loading() } else { html! {} } }
                    { render_error_message(self) }
                    { render_results(self) }
                    { render_history(self, ctx) }
                </main>

                { render_footer() }
            </div>
        }
    }
}

// Handler methods
impl App {
    fn handle_select_modality(&mut self, modality: Modality) -> bool {
        self.modality = modality;
        self.files.clear();
        self.phase = Phase::Idle;
        true
    }

    fn handle_file_chosen(&mut self, slot: &'static str, file: Option<GlooFile>) -> bool {
        match file {
            Some(file) => {
                self.files.insert(slot.to_string(), file);
            }
            None => {
                self.files.remove(slot);
            }
        }
        true
    }

    fn handle_submit(&mut self, ctx: &Context<Self>) -> bool {
        if self.phase == Phase::Submitting {
            return false;
        }

        // The browser's `required` attributes gate interactive submits; this
        // covers programmatic ones.
        let missing: Vec<String> = shared::required_slots(self.modality)
            .iter()
            .filter(|slot| slot.required && !self.files.contains_key(slot.name))
            .map(|slot| format!("Missing required file: {}", slot.label.trim_end_matches(':')))
            .collect();
        if !missing.is_empty() {
            self.phase = Phase::Failed(PredictError::Validation(missing));
            return true;
        }

        self.phase = Phase::Submitting;

        let modality = self.modality;
        let slots: Vec<(&'static str, GlooFile)> = shared::present_slots(modality, &self.files)
            .into_iter()
            .map(|(name, file)| (name, file.clone()))
            .collect();

        let link = ctx.link().clone();
        spawn_local(async move {
            let outcome = api::submit_prediction(modality, slots).await;
            link.send_message(Msg::Settled(outcome));
        });

        true
    }

    fn handle_settled(
        &mut self,
        ctx: &Context<Self>,
        outcome: Result<Vec<ResultBlock>, PredictError>,
    ) -> bool {
        match outcome {
            Ok(blocks) => {
                self.phase = Phase::Success(blocks);
                // Best-effort refresh; a failure lands in history_error and
                // leaves the Success phase untouched.
                Self::refresh_history(ctx);
            }
            Err(error) => {
                log::error!("Prediction failed: {error}");
                self.phase = Phase::Failed(error);
            }
        }
        true
    }

    fn handle_history_fetched(&mut self, outcome: Result<Vec<HistoryEntry>, String>) -> bool {
        match outcome {
            Ok(rows) => {
                self.history = rows;
                self.history_error = None;
                self.history_refreshed_at =
                    Some(String::from(js_sys::Date::new_0().to_locale_time_string("en-US")));
            }
            Err(message) => {
                log::warn!("History refresh failed: {message}");
                self.history_error = Some(message);
            }
        }
        true
    }

    fn handle_toggle_theme(&mut self) -> bool {
        let body = web_sys::window().unwrap().document().unwrap().body().unwrap();

        if self.theme == "light" {
            self.theme = "dark".to_string();
            body.class_list().add_1("dark-mode").unwrap();
        } else {
            self.theme = "light".to_string();
            body.class_list().remove_1("dark-mode").unwrap();
        }
        let _ = LocalStorage::set("theme", self.theme.clone());

        true
    }

    fn refresh_history(ctx: &Context<Self>) {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::HistoryFetched(api::fetch_history().await));
        });
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<App>::new().render();
}
