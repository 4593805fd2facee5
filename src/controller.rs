use std::future::Future;

use log::{debug, info, warn};
use serde::Serialize;

use crate::error::Error;
use crate::get_data::{FetchError, ScorecardBackend};
use crate::model::{Round, Scorecard, ScorecardId};
use crate::ranking::{rank, ResultLimit};
use crate::view::{HoleScoresView, ResultsView};

/// Options of one select input and which one is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOptions {
    field: &'static str,
    placeholder: String,
    options: Vec<String>,
    selected: Option<usize>,
}

impl SelectOptions {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            placeholder: format!("Select a {}", capitalise(field)),
            options: vec![],
            selected: None,
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// Swap in a fresh list. The current pick survives if it is still on
    /// the list, otherwise the first option is picked.
    pub fn replace(&mut self, options: Vec<String>) {
        let keep = self
            .selected()
            .and_then(|current| options.iter().position(|o| o == current));
        self.selected = keep.or(if options.is_empty() { None } else { Some(0) });
        self.options = options;
    }

    pub fn clear(&mut self) {
        self.options.clear();
        self.selected = None;
    }

    pub fn select(&mut self, value: &str) -> Result<(), Error> {
        self.selected = Some(self.position(value)?);
        Ok(())
    }

    fn position(&self, value: &str) -> Result<usize, Error> {
        self.options
            .iter()
            .position(|option| option == value)
            .ok_or_else(|| Error::UnknownOption {
                field: self.field,
                value: value.to_string(),
            })
    }

    fn require(&self) -> Result<&str, Error> {
        self.selected()
            .ok_or(Error::IncompleteForm { field: self.field })
    }
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorecardForm {
    pub players: SelectOptions,
    pub courses: SelectOptions,
    pub layouts: SelectOptions,
    pub limit: ResultLimit,
}

impl ScorecardForm {
    pub fn new(limit: ResultLimit) -> Self {
        Self {
            players: SelectOptions::new("player"),
            courses: SelectOptions::new("course"),
            layouts: SelectOptions::new("layout"),
            limit,
        }
    }
}

impl Default for ScorecardForm {
    fn default() -> Self {
        Self::new(ResultLimit::default())
    }
}

/// Drives the scorecard form against a backend.
///
/// Every step fetches first and only then touches the form, so a failed
/// request leaves the selects as they were.
pub struct ScorecardController<B: ScorecardBackend> {
    backend: B,
    form: ScorecardForm,
}

impl<B: ScorecardBackend> ScorecardController<B> {
    pub fn new(backend: B, limit: ResultLimit) -> Self {
        Self {
            backend,
            form: ScorecardForm::new(limit),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn form(&self) -> &ScorecardForm {
        &self.form
    }

    /// Seed the player select, e.g. from names the page already rendered.
    pub fn set_player_options(&mut self, players: Vec<String>) {
        self.form.players.replace(players);
    }

    pub fn set_limit(&mut self, limit: &str) -> Result<ResultLimit, Error> {
        self.form.limit = limit.parse()?;
        Ok(self.form.limit)
    }

    pub async fn load_courses(&mut self) -> Result<&SelectOptions, Error> {
        let courses = self.fetch(self.backend.courses_for_all_players()).await?;
        info!("Loaded {} courses", courses.len());
        self.form.courses.replace(courses);
        Ok(&self.form.courses)
    }

    /// Pick a course and load its layouts.
    pub async fn select_course(&mut self, course: &str) -> Result<&SelectOptions, Error> {
        let index = self.form.courses.position(course)?;
        let layouts = self.fetch(self.backend.layouts_for_course(course)).await?;
        debug!("{} layouts for {}", layouts.len(), course);
        self.form.courses.selected = Some(index);
        self.form.layouts.replace(layouts);
        Ok(&self.form.layouts)
    }

    /// Pick a layout and load the players who have played it.
    pub async fn select_layout(&mut self, layout: &str) -> Result<&SelectOptions, Error> {
        let course = self.form.courses.require()?;
        let index = self.form.layouts.position(layout)?;
        let players = self
            .fetch(self.backend.players_for_course_and_layout(course, layout))
            .await?;
        debug!("{} players for {} / {}", players.len(), course, layout);
        self.form.layouts.selected = Some(index);
        self.form.players.replace(players);
        Ok(&self.form.players)
    }

    /// Pick a player and load the courses they have played, plus the layouts
    /// of whichever course ends up selected.
    pub async fn select_player(&mut self, player: &str) -> Result<&SelectOptions, Error> {
        let index = self.form.players.position(player)?;
        let courses = self.fetch(self.backend.courses_for_player(player)).await?;

        let mut next_courses = self.form.courses.clone();
        next_courses.replace(courses);
        let layouts = match next_courses.selected() {
            Some(course) => Some(self.fetch(self.backend.layouts_for_course(course)).await?),
            None => None,
        };

        self.form.players.selected = Some(index);
        self.form.courses = next_courses;
        match layouts {
            Some(layouts) => self.form.layouts.replace(layouts),
            None => self.form.layouts.clear(),
        }
        Ok(&self.form.courses)
    }

    pub async fn submit(&self) -> Result<ResultsView, Error> {
        let player = self.form.players.require()?;
        let course = self.form.courses.require()?;
        let layout = self.form.layouts.require()?;
        let limit = self.form.limit;

        let scorecards = self
            .fetch(self.backend.scorecard_data(player, course, layout, limit))
            .await?;
        info!(
            "Ranking {} scorecards for {} at {} / {} (limit {})",
            scorecards.len(),
            player,
            course,
            layout,
            limit
        );
        Ok(ResultsView::new(
            player,
            course,
            layout,
            limit,
            rank(scorecards, limit),
        ))
    }

    /// Per-hole breakdown of one scorecard. Pass the scorecard itself when at
    /// hand so the hole totals can be checked against it.
    pub async fn hole_scores(
        &self,
        id: ScorecardId,
        scorecard: Option<&Scorecard>,
    ) -> Result<HoleScoresView, Error> {
        let holes = self.fetch(self.backend.hole_scores(id)).await?;
        let round = Round::new(holes);
        let view = HoleScoresView::new(id, &round, scorecard);
        if view.consistent == Some(false) {
            warn!(
                "Scorecard {} reports {:?} but its holes add up to {:?}",
                id,
                scorecard.map(|card| card.score_difference),
                view.score_difference
            );
        }
        Ok(view)
    }

    async fn fetch<T>(
        &self,
        request: impl Future<Output = Result<T, FetchError>>,
    ) -> Result<T, Error> {
        request.await.map_err(|e| {
            warn!("There has been a problem with the request: {}", e);
            Error::from(e)
        })
    }
}
