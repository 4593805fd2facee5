pub mod config;
pub mod controller;
pub mod error;
pub mod get_data;
pub mod logger;
pub mod model;
pub mod ranking;
pub mod score;
pub mod view;

pub use config::Config;
pub use controller::{ScorecardController, ScorecardForm, SelectOptions};
pub use error::Error;
pub use get_data::{FetchError, HttpBackend, ScorecardBackend};
pub use model::{HoleScore, Round, Scorecard, ScorecardId};
pub use ranking::{rank, ResultLimit};
pub use score::{classify, ScoreCategory};
pub use view::{HoleScoresView, ResultsView};

use std::fmt::Display;

use wasm_bindgen::prelude::*;

fn js_error(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// `level` is one of `off`, `error`, `warn`, `info`, `debug`, `trace`.
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) -> Result<(), JsValue> {
    let level = match level {
        Some(level) => config::parse_level(&level).map_err(js_error)?,
        None => Config::default().log_level,
    };
    logger::init(level);
    Ok(())
}

/// Style class for a hole played in `strokes` on a hole of `par`.
#[wasm_bindgen]
pub fn classify_score(strokes: i32, par: i32) -> String {
    classify(strokes, par).css_class().to_string()
}

#[wasm_bindgen]
pub fn score_label(strokes: i32, par: i32) -> String {
    classify(strokes, par).label().to_string()
}

/// Rank plain scorecard objects. `limit` is a number or `"all"`.
#[wasm_bindgen]
pub fn rank_scorecards(scorecards: JsValue, limit: JsValue) -> Result<JsValue, JsValue> {
    let scorecards: Vec<Scorecard> = serde_wasm_bindgen::from_value(scorecards)?;
    let limit: ResultLimit = serde_wasm_bindgen::from_value(limit)?;
    to_js(&rank(scorecards, limit))
}

#[wasm_bindgen]
pub struct ScorecardApp {
    controller: ScorecardController<HttpBackend>,
    last_results: Option<ResultsView>,
}

#[wasm_bindgen]
impl ScorecardApp {
    /// `config` is an optional `{ base_url, default_limit, log_level }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ScorecardApp, JsValue> {
        let config: Config = if config.is_undefined() || config.is_null() {
            Config::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let config = config.validate().map_err(js_error)?;
        logger::init(config.log_level);
        let backend = HttpBackend::new(&config.base_url).map_err(js_error)?;
        log::info!("Scorecard app talking to {}", backend.base_url());
        Ok(ScorecardApp {
            controller: ScorecardController::new(backend, config.default_limit),
            last_results: None,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn form(&self) -> Result<JsValue, JsValue> {
        to_js(self.controller.form())
    }

    #[wasm_bindgen(getter)]
    pub fn players(&self) -> Result<JsValue, JsValue> {
        to_js(&self.controller.form().players)
    }

    #[wasm_bindgen(getter)]
    pub fn courses(&self) -> Result<JsValue, JsValue> {
        to_js(&self.controller.form().courses)
    }

    #[wasm_bindgen(getter)]
    pub fn layouts(&self) -> Result<JsValue, JsValue> {
        to_js(&self.controller.form().layouts)
    }

    #[wasm_bindgen]
    pub fn set_player_options(&mut self, players: JsValue) -> Result<JsValue, JsValue> {
        let players: Vec<String> = serde_wasm_bindgen::from_value(players)?;
        self.controller.set_player_options(players);
        self.players()
    }

    #[wasm_bindgen]
    pub fn set_limit(&mut self, limit: String) -> Result<(), JsValue> {
        self.controller.set_limit(&limit).map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen]
    pub async fn load_courses(&mut self) -> Result<JsValue, JsValue> {
        let courses = self.controller.load_courses().await.map_err(js_error)?;
        to_js(courses)
    }

    #[wasm_bindgen]
    pub async fn select_course(&mut self, course: String) -> Result<JsValue, JsValue> {
        let layouts = self
            .controller
            .select_course(&course)
            .await
            .map_err(js_error)?;
        to_js(layouts)
    }

    #[wasm_bindgen]
    pub async fn select_layout(&mut self, layout: String) -> Result<JsValue, JsValue> {
        let players = self
            .controller
            .select_layout(&layout)
            .await
            .map_err(js_error)?;
        to_js(players)
    }

    #[wasm_bindgen]
    pub async fn select_player(&mut self, player: String) -> Result<JsValue, JsValue> {
        let courses = self
            .controller
            .select_player(&player)
            .await
            .map_err(js_error)?;
        to_js(courses)
    }

    /// Fetch, rank and return the results table for the current form.
    #[wasm_bindgen]
    pub async fn submit(&mut self) -> Result<JsValue, JsValue> {
        let view = self.controller.submit().await.map_err(js_error)?;
        let js = to_js(&view)?;
        self.last_results = Some(view);
        Ok(js)
    }

    #[wasm_bindgen]
    pub async fn hole_scores(&self, scorecard_id: i32) -> Result<JsValue, JsValue> {
        let id = ScorecardId::from(scorecard_id);
        let scorecard = self
            .last_results
            .as_ref()
            .and_then(|results| results.scorecard(id));
        let view = self
            .controller
            .hole_scores(id, scorecard)
            .await
            .map_err(js_error)?;
        to_js(&view)
    }
}
