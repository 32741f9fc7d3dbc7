//! Game payloads and the derived views built from them: status, per-goal
//! reports, symbol tallies and attribute totals.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::MAX_ATTR;
use crate::engine::{Evaluation, evaluate_with_trace};
use crate::symbol::{Move, decode_accept};
use crate::tag::decode_formula;
use crate::types::GoalError;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Current state of one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameDetails {
    /// Moves reviewed so far (accepted and rejected).
    #[serde(default)]
    pub count: u32,

    /// Moves accepted so far.
    #[serde(default)]
    pub accepted: u32,

    /// Symbol index of the pending move.
    #[serde(default)]
    pub next: u32,

    /// Attribute vector the goals are evaluated against.
    #[serde(default)]
    pub attrs: Vec<f64>,

    /// Rule set identifier.
    #[serde(default, rename = "type")]
    pub game_type: i64,

    /// Present and `true` once the game has ended.
    #[serde(default)]
    pub finished: bool,

    /// Whether every goal held when the game ended.
    #[serde(default)]
    pub won: bool,
}

impl GameDetails {
    /// Moves reviewed but not accepted.
    pub fn rejected(&self) -> u32 {
        self.count.saturating_sub(self.accepted)
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::from_flags(self.finished, self.won)
    }
}

/// Rule set parameters: attribute distribution and goal formulas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameParams {
    #[serde(default, rename = "type")]
    pub game_type: i64,

    /// Marginal probability of each attribute.
    #[serde(default)]
    pub p: Vec<f64>,

    /// Row-major attribute correlation matrix.
    #[serde(default, rename = "Q")]
    pub q: Vec<f64>,

    /// One raw formula per goal.
    #[serde(default)]
    pub goals: Vec<Vec<u32>>,
}

/// Recorded move history of one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolHistory {
    #[serde(default)]
    pub count: u32,

    #[serde(default)]
    pub symbols: Vec<u8>,
}

impl SymbolHistory {
    pub fn moves(&self) -> Vec<Move> {
        decode_moves(&self.symbols)
    }
}

// ---------------------------------------------------------------------------
// Status and limits
// ---------------------------------------------------------------------------

/// Lifecycle state shown for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Running,
    Completed,
    Failed,
}

impl GameStatus {
    pub fn from_flags(finished: bool, won: bool) -> Self {
        match (finished, won) {
            (false, _) => Self::Running,
            (true, true) => Self::Completed,
            (true, false) => Self::Failed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_accepted_limit() -> u32 {
    1000
}

fn default_loss_limit() -> u32 {
    21000
}

/// Limits after which a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    /// The game ends once this many moves were accepted.
    #[serde(default = "default_accepted_limit", rename = "accepted-limit")]
    pub accepted_limit: u32,

    /// The game ends once this many moves were reviewed.
    #[serde(default = "default_loss_limit", rename = "loss-limit")]
    pub loss_limit: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            accepted_limit: default_accepted_limit(),
            loss_limit: default_loss_limit(),
        }
    }
}

impl GameRules {
    /// Whether a game with these counts has ended.
    pub fn is_finished(&self, accepted: u32, count: u32) -> bool {
        accepted >= self.accepted_limit || count >= self.loss_limit
    }
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

/// Outcome of evaluating one goal of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalReport {
    /// Position of the goal in the rule set.
    pub index: usize,
    /// The goal as received.
    pub formula: Vec<u32>,
    /// The evaluation, or the error that rejected this goal.
    pub outcome: Result<Evaluation, GoalError>,
}

impl GoalReport {
    /// `Some(result)` if the goal evaluated.
    pub fn result(&self) -> Option<bool> {
        self.outcome.as_ref().ok().map(|e| e.result)
    }

    pub fn is_satisfied(&self) -> bool {
        self.result() == Some(true)
    }
}

/// Decode and evaluate one raw goal.
pub fn evaluate_goal(raws: &[u32], attrs: &[f64]) -> Result<Evaluation, GoalError> {
    let formula = decode_formula(raws)?;
    evaluate_with_trace(&formula, attrs)
}

/// Evaluate every goal independently. A goal that fails to decode or reduce
/// carries its error; the others are unaffected.
pub fn evaluate_goals(goals: &[Vec<u32>], attrs: &[f64]) -> Vec<GoalReport> {
    goals
        .iter()
        .enumerate()
        .map(|(index, raws)| {
            let outcome = evaluate_goal(raws, attrs);
            match &outcome {
                Ok(eval) => debug!(goal = index, result = eval.result, "goal evaluated"),
                Err(e) => warn!(goal = index, error = %e, "goal rejected"),
            }
            GoalReport {
                index,
                formula: raws.clone(),
                outcome,
            }
        })
        .collect()
}

/// Whether every goal holds. A rejected goal counts as not holding.
pub fn goals_satisfied(reports: &[GoalReport]) -> bool {
    reports.iter().all(GoalReport::is_satisfied)
}

// ---------------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------------

/// Decode a raw symbol stream.
pub fn decode_moves(raws: &[u8]) -> Vec<Move> {
    raws.iter().copied().map(decode_accept).collect()
}

/// Seen/accepted counts for one symbol index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SymbolStats {
    pub seen: u32,
    pub accepted: u32,
}

impl SymbolStats {
    pub fn rejected(&self) -> u32 {
        self.seen - self.accepted
    }
}

/// Count-by-key summary of a move history, grouped by symbol index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTally {
    by_index: BTreeMap<u8, SymbolStats>,
}

impl SymbolTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one move.
    pub fn record(&mut self, mv: Move) {
        let stats = self.by_index.entry(mv.index).or_default();
        stats.seen += 1;
        if mv.accepted {
            stats.accepted += 1;
        }
    }

    pub fn get(&self, index: u8) -> Option<SymbolStats> {
        self.by_index.get(&index).copied()
    }

    /// Distinct symbols seen, ordered by index.
    pub fn iter(&self) -> impl Iterator<Item = (u8, SymbolStats)> + '_ {
        self.by_index.iter().map(|(i, s)| (*i, *s))
    }

    /// Number of distinct symbols seen.
    pub fn distinct(&self) -> usize {
        self.by_index.len()
    }

    /// Total moves counted.
    pub fn seen(&self) -> u32 {
        self.by_index.values().map(|s| s.seen).sum()
    }

    /// Total accepted moves counted.
    pub fn accepted(&self) -> u32 {
        self.by_index.values().map(|s| s.accepted).sum()
    }
}

impl FromIterator<Move> for SymbolTally {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut tally = Self::new();
        for mv in iter {
            tally.record(mv);
        }
        tally
    }
}

/// Number of moves carrying each attribute.
pub fn attribute_totals(moves: &[Move]) -> [u32; MAX_ATTR] {
    let mut totals = [0; MAX_ATTR];
    for mv in moves {
        for i in mv.attrs().iter() {
            totals[i] += 1;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ATTR_BIT, OP_BIT};
    use pretty_assertions::assert_eq;

    #[test]
    fn details_from_service_json() {
        let json = r#"{"count":12,"accepted":5,"next":3,"attrs":[1,2,3,4,5,6,7],"type":2}"#;
        let details: GameDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.rejected(), 7);
        assert_eq!(details.game_type, 2);
        assert_eq!(details.attrs.len(), 7);
        assert_eq!(details.status(), GameStatus::Running);
    }

    #[test]
    fn finished_details_status() {
        let json = r#"{"count":21000,"accepted":400,"next":0,"attrs":[],"type":0,"finished":true,"won":false}"#;
        let details: GameDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.status(), GameStatus::Failed);
        assert_eq!(GameStatus::from_flags(true, true).to_string(), "completed");
    }

    #[test]
    fn params_from_service_json() {
        let json = r#"{"type":1,"p":[0.5,0.25],"Q":[1.0,0.1,0.1,1.0],"goals":[[8196,4096,5],[8197,4097,100]]}"#;
        let params: GameParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.goals.len(), 2);
        assert_eq!(params.q.len(), 4);
    }

    #[test]
    fn rules_limits() {
        let rules = GameRules::default();
        assert!(!rules.is_finished(999, 20999));
        assert!(rules.is_finished(1000, 1000));
        assert!(rules.is_finished(10, 21000));
    }

    #[test]
    fn one_bad_goal_does_not_affect_siblings() {
        let goals = vec![
            vec![OP_BIT | 4, ATTR_BIT, 5],
            vec![OP_BIT | ATTR_BIT, 1, 2],
            vec![OP_BIT | 5, ATTR_BIT | 9, 1],
            vec![OP_BIT | 5, ATTR_BIT | 1, 1],
        ];
        let reports = evaluate_goals(&goals, &[3.0, 8.0]);
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].result(), Some(true));
        assert!(matches!(
            reports[1].outcome,
            Err(GoalError::MalformedFormula { position: 0, .. })
        ));
        assert!(matches!(
            reports[2].outcome,
            Err(GoalError::AttributeIndexOutOfRange { index: 9, .. })
        ));
        assert_eq!(reports[3].result(), Some(true));
        assert!(!goals_satisfied(&reports));
        assert!(goals_satisfied(&[reports[0].clone(), reports[3].clone()]));
    }

    #[test]
    fn tally_groups_by_index() {
        let history = SymbolHistory {
            count: 5,
            symbols: vec![0x85, 0x05, 0x85, 0x01, 0x81],
        };
        let tally: SymbolTally = history.moves().into_iter().collect();
        assert_eq!(tally.distinct(), 2);
        assert_eq!(tally.get(5), Some(SymbolStats { seen: 3, accepted: 2 }));
        assert_eq!(tally.get(1).map(|s| s.rejected()), Some(1));
        assert_eq!(tally.seen(), 5);
        assert_eq!(tally.accepted(), 3);
        let order: Vec<u8> = tally.iter().map(|(i, _)| i).collect();
        assert_eq!(order, vec![1, 5]);
    }

    #[test]
    fn attribute_totals_count_every_move() {
        let moves = decode_moves(&[0x85, 0x05, 0x02]);
        assert_eq!(attribute_totals(&moves), [2, 1, 2, 0, 0, 0, 0]);
    }
}
