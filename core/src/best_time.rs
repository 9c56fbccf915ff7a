use serde::{Deserialize, Serialize};

/// On-disk shape of the personal best: `{"best_time": 12.34}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BestTimeRecord {
    #[serde(default)]
    pub best_time: Option<f64>,
}

impl BestTimeRecord {
    pub fn new(best_time: f64) -> Self {
        Self {
            best_time: Some(best_time),
        }
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<Self>(bytes).map(Self::sanitized)
    }

    /// Drops times that could not have come from a finished session.
    pub fn sanitized(self) -> Self {
        Self {
            best_time: self.best_time.filter(|t| t.is_finite() && *t >= 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    NewBest { elapsed: f64, previous: Option<f64> },
    NotBeaten { elapsed: f64, best: f64 },
}

impl Verdict {
    pub fn should_save(&self) -> bool {
        matches!(self, Verdict::NewBest { .. })
    }

    /// The best time after this session, whether or not it was beaten.
    pub fn best(&self) -> f64 {
        match *self {
            Verdict::NewBest { elapsed, .. } => elapsed,
            Verdict::NotBeaten { best, .. } => best,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Verdict::NewBest { .. } => "New Personal Best!",
            Verdict::NotBeaten { .. } => "Info",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Verdict::NewBest { elapsed, .. } => {
                format!("Congratulations!\nNew Personal Best Time: {:.2}s", elapsed)
            }
            Verdict::NotBeaten { elapsed, best } => {
                format!("Your Time: {:.2}s\nPersonal Best: {:.2}s", elapsed, best)
            }
        }
    }
}

/// Only a strictly faster time replaces an existing record.
pub fn judge(previous: Option<f64>, elapsed_secs: f64) -> Verdict {
    match previous {
        Some(best) if elapsed_secs >= best => Verdict::NotBeaten {
            elapsed: elapsed_secs,
            best,
        },
        _ => Verdict::NewBest {
            elapsed: elapsed_secs,
            previous,
        },
    }
}
