//! Autopilot report generation.

use crate::simulation::Collision;
use serde::Serialize;

/// Outcome of one autopilot round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundStats {
    pub score: u32,
    pub frames: u64,
    pub pipes_spawned: u64,
    /// `None` when the round hit the frame cap.
    pub collision: Option<Collision>,
}

impl RoundStats {
    pub fn timed_out(&self) -> bool {
        self.collision.is_none()
    }
}

/// Aggregated results from a batch of rounds.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub rounds: u32,
    pub mean_score: f64,
    pub min_score: u32,
    pub max_score: u32,
    pub mean_frames: f64,
    pub boundary_crashes: u32,
    pub pipe_crashes: u32,
    pub timeouts: u32,
    pub scores: Vec<u32>,
}

impl BatchReport {
    pub fn from_rounds(rounds: &[RoundStats]) -> Self {
        if rounds.is_empty() {
            return Self::default();
        }
        let n = rounds.len() as f64;
        let scores: Vec<u32> = rounds.iter().map(|r| r.score).collect();
        Self {
            rounds: rounds.len() as u32,
            mean_score: scores.iter().map(|&s| f64::from(s)).sum::<f64>() / n,
            min_score: scores.iter().copied().min().unwrap_or(0),
            max_score: scores.iter().copied().max().unwrap_or(0),
            mean_frames: rounds.iter().map(|r| r.frames as f64).sum::<f64>() / n,
            boundary_crashes: rounds
                .iter()
                .filter(|r| r.collision == Some(Collision::Boundary))
                .count() as u32,
            pipe_crashes: rounds
                .iter()
                .filter(|r| matches!(r.collision, Some(Collision::Pipe { .. })))
                .count() as u32,
            timeouts: rounds.iter().filter(|r| r.timed_out()).count() as u32,
            scores,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Results:\n");
        out.push_str(&format!("  Rounds:           {}\n", self.rounds));
        out.push_str(&format!("  Mean score:       {:.2}\n", self.mean_score));
        out.push_str(&format!(
            "  Score range:      {} - {}\n",
            self.min_score, self.max_score
        ));
        out.push_str(&format!("  Mean frames:      {:.0}\n", self.mean_frames));
        out.push_str(&format!("  Pipe crashes:     {}\n", self.pipe_crashes));
        out.push_str(&format!("  Boundary crashes: {}\n", self.boundary_crashes));
        out.push_str(&format!("  Timed out:        {}\n", self.timeouts));
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(score: u32, collision: Option<Collision>) -> RoundStats {
        RoundStats {
            score,
            frames: 100,
            pipes_spawned: u64::from(score) + 1,
            collision,
        }
    }

    #[test]
    fn test_empty_report() {
        let report = BatchReport::from_rounds(&[]);
        assert_eq!(report.rounds, 0);
        assert!(report.scores.is_empty());
    }

    #[test]
    fn test_aggregates() {
        let report = BatchReport::from_rounds(&[
            round(2, Some(Collision::Boundary)),
            round(6, Some(Collision::Pipe { index: 0 })),
            round(10, None),
        ]);
        assert_eq!(report.rounds, 3);
        assert!((report.mean_score - 6.0).abs() < f64::EPSILON);
        assert_eq!(report.min_score, 2);
        assert_eq!(report.max_score, 10);
        assert_eq!(report.boundary_crashes, 1);
        assert_eq!(report.pipe_crashes, 1);
        assert_eq!(report.timeouts, 1);
        assert!(report.to_text().contains("Timed out:        1"));
    }

    #[test]
    fn test_json_has_scores() {
        let report = BatchReport::from_rounds(&[round(4, Some(Collision::Boundary))]);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"scores\""));
        assert!(json.contains("\"max_score\": 4"));
    }
}
