//! What the page renders after a submit or a scorecard drill-down.
//!
//! Both views are built once from a backend response and never change
//! afterwards. A new request builds a new view.

use serde::Serialize;

use crate::model::{HoleScore, Round, Scorecard, ScorecardId};
use crate::ranking::ResultLimit;
use crate::score::format_score_difference;

pub const RESULT_HEADERS: [&str; 5] = ["Player", "Course", "Layout", "Total Score", "+/-"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsQuery {
    pub player: String,
    pub course: String,
    pub layout: String,
    pub limit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub id: ScorecardId,
    pub player_name: String,
    pub course_name: String,
    pub layout_name: String,
    pub total_score: i32,
    pub score_difference: i32,
    pub score_difference_text: String,
    /// Better than par. The page highlights these.
    pub negative: bool,
    pub date: String,
}

impl ResultRow {
    /// The scorecard route only sends ids and scores, so names the card
    /// lacks come from the query that fetched it.
    fn with_query_names(mut self, query: &ResultsQuery) -> Self {
        fill(&mut self.player_name, &query.player);
        fill(&mut self.course_name, &query.course);
        fill(&mut self.layout_name, &query.layout);
        self
    }
}

fn fill(name: &mut String, fallback: &str) {
    if name.is_empty() {
        *name = fallback.to_string();
    }
}

impl From<&Scorecard> for ResultRow {
    fn from(card: &Scorecard) -> Self {
        Self {
            id: card.id,
            player_name: card.player_name.clone(),
            course_name: card.course_name.clone(),
            layout_name: card.layout_name.clone(),
            total_score: card.total_score,
            score_difference: card.score_difference,
            score_difference_text: format_score_difference(card.score_difference),
            negative: card.score_difference < 0,
            date: card.date.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub query: ResultsQuery,
    pub headers: [&'static str; 5],
    pub rows: Vec<ResultRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip)]
    scorecards: Vec<Scorecard>,
}

impl ResultsView {
    /// `ranked` must already be ordered and truncated.
    pub fn new(
        player: &str,
        course: &str,
        layout: &str,
        limit: ResultLimit,
        ranked: Vec<Scorecard>,
    ) -> Self {
        let message = ranked
            .is_empty()
            .then(|| format!("No scores found for {} at {}", player, course));
        let query = ResultsQuery {
            player: player.to_string(),
            course: course.to_string(),
            layout: layout.to_string(),
            limit: limit.to_string(),
        };
        let rows = ranked
            .iter()
            .map(|card| ResultRow::from(card).with_query_names(&query))
            .collect();
        Self {
            query,
            headers: RESULT_HEADERS,
            rows,
            message,
            scorecards: ranked,
        }
    }

    pub fn scorecards(&self) -> &[Scorecard] {
        &self.scorecards
    }

    pub fn scorecard(&self, id: ScorecardId) -> Option<&Scorecard> {
        self.scorecards.iter().find(|card| card.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoleRow {
    pub hole_number: u8,
    pub strokes: i32,
    pub par: Option<i32>,
    /// Style class for the stroke cell, absent without a par.
    pub class: Option<&'static str>,
    pub label: Option<&'static str>,
}

impl From<&HoleScore> for HoleRow {
    fn from(hole: &HoleScore) -> Self {
        let category = hole.category();
        Self {
            hole_number: hole.hole_number,
            strokes: hole.strokes,
            par: hole.par,
            class: category.map(|c| c.css_class()),
            label: category.map(|c| c.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoleScoresView {
    pub scorecard_id: ScorecardId,
    pub course_name: Option<String>,
    pub layout_name: Option<String>,
    pub rows: Vec<HoleRow>,
    pub total_strokes: i32,
    pub total_par: Option<i32>,
    pub score_difference: Option<i32>,
    /// Whether the holes add up to the scorecard's reported difference.
    pub consistent: Option<bool>,
}

impl HoleScoresView {
    pub fn new(scorecard_id: ScorecardId, round: &Round, scorecard: Option<&Scorecard>) -> Self {
        let first = round.holes().first();
        Self {
            scorecard_id,
            course_name: first
                .and_then(|hole| hole.course_name.clone())
                .or_else(|| scorecard.map(|card| card.course_name.clone()))
                .filter(|name| !name.is_empty()),
            layout_name: first
                .and_then(|hole| hole.layout_name.clone())
                .or_else(|| scorecard.map(|card| card.layout_name.clone()))
                .filter(|name| !name.is_empty()),
            rows: round.holes().iter().map(HoleRow::from).collect(),
            total_strokes: round.total_strokes(),
            total_par: round.total_par(),
            score_difference: round.score_difference(),
            consistent: scorecard.and_then(|card| round.matches(card)),
        }
    }
}
