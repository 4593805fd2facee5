use serde::{Deserialize, Serialize};

use crate::score::ScoreCategory;

pub type ScorecardId = i64;

/// One player's finished round, as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub id: ScorecardId,
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub layout_name: String,
    pub total_score: i32,
    /// Total minus par. Negative is better than par.
    pub score_difference: i32,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleScore {
    pub hole_number: u8,
    pub strokes: i32,
    #[serde(default)]
    pub par: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
}

impl HoleScore {
    pub fn new(hole_number: u8, strokes: i32, par: i32) -> Self {
        Self {
            hole_number,
            strokes,
            par: Some(par),
            layout_name: None,
            course_name: None,
        }
    }

    /// `None` when the backend did not send a par for this hole.
    pub fn category(&self) -> Option<ScoreCategory> {
        self.par.map(|par| ScoreCategory::new(self.strokes, par))
    }

    pub fn par_score(&self) -> Option<i32> {
        self.par.map(|par| self.strokes - par)
    }
}

/// Hole scores of one scorecard, ordered by hole number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    holes: Vec<HoleScore>,
}

impl Round {
    pub fn new(mut holes: Vec<HoleScore>) -> Self {
        holes.sort_by_key(|hole| hole.hole_number);
        Self { holes }
    }

    pub fn holes(&self) -> &[HoleScore] {
        &self.holes
    }

    pub fn into_holes(self) -> Vec<HoleScore> {
        self.holes
    }

    pub fn total_strokes(&self) -> i32 {
        self.holes.iter().map(|hole| hole.strokes).sum()
    }

    /// Sum of par, if every hole has one.
    pub fn total_par(&self) -> Option<i32> {
        self.holes.iter().map(|hole| hole.par).sum()
    }

    pub fn score_difference(&self) -> Option<i32> {
        self.holes.iter().map(HoleScore::par_score).sum()
    }

    /// Whether the hole scores add up to the scorecard's reported difference.
    /// `None` when par is missing on any hole.
    pub fn matches(&self, scorecard: &Scorecard) -> Option<bool> {
        self.score_difference()
            .map(|difference| difference == scorecard.score_difference)
    }
}

impl From<Vec<HoleScore>> for Round {
    fn from(holes: Vec<HoleScore>) -> Self {
        Self::new(holes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorecard(score_difference: i32) -> Scorecard {
        Scorecard {
            id: 7,
            player_name: "Par".to_string(),
            course_name: "Tali".to_string(),
            layout_name: "Main".to_string(),
            total_score: 54 + score_difference,
            score_difference,
            date: String::new(),
        }
    }

    #[test]
    fn decodes_backend_field_names() {
        let json = r#"{
            "id": 12,
            "player_name": "Aino",
            "course_name": "Tali",
            "layout_name": "Main",
            "total_score": 57,
            "score_difference": 3,
            "date": "Sat, 03 Jun 2023 14:05:00 GMT"
        }"#;
        let card: Scorecard = serde_json::from_str(json).unwrap();
        assert_eq!(card.id, 12);
        assert_eq!(card.player_name, "Aino");
        assert_eq!(card.score_difference, 3);
        assert_eq!(card.date, "Sat, 03 Jun 2023 14:05:00 GMT");
    }

    #[test]
    fn hole_score_without_par() {
        let json = r#"{"hole_number": 4, "strokes": 3, "layout_name": "Main", "course_name": "Tali"}"#;
        let hole: HoleScore = serde_json::from_str(json).unwrap();
        assert_eq!(hole.par, None);
        assert_eq!(hole.category(), None);
        assert_eq!(hole.layout_name.as_deref(), Some("Main"));
    }

    #[test]
    fn round_is_ordered_and_summed() {
        let round = Round::new(vec![
            HoleScore::new(3, 4, 3),
            HoleScore::new(1, 2, 3),
            HoleScore::new(2, 3, 3),
        ]);
        let numbers: Vec<u8> = round.holes().iter().map(|h| h.hole_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(round.total_strokes(), 9);
        assert_eq!(round.total_par(), Some(9));
        assert_eq!(round.score_difference(), Some(0));
        assert_eq!(round.matches(&scorecard(0)), Some(true));
        assert_eq!(round.matches(&scorecard(2)), Some(false));
    }

    #[test]
    fn missing_par_leaves_difference_unknown() {
        let mut hole = HoleScore::new(2, 3, 3);
        hole.par = None;
        let round = Round::new(vec![HoleScore::new(1, 3, 3), hole]);
        assert_eq!(round.total_par(), None);
        assert_eq!(round.matches(&scorecard(0)), None);
    }
}
