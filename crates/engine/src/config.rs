use std::{env, str::FromStr};

/// What the conflict checker does when the holiday service cannot be reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Treat the range as conflict-free and let the commit step validate it.
    #[default]
    FailOpen,
    /// Block the commit.
    FailClosed,
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" | "fail-open" | "fail_open" => Ok(ConflictPolicy::FailOpen),
            "closed" | "fail-closed" | "fail_closed" => Ok(ConflictPolicy::FailClosed),
            other => Err(format!("unknown conflict policy: {other}")),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Behaviour when the holiday lookup fails (default: fail open)
    pub conflict_policy: ConflictPolicy,
    /// Cells per calendar row for the computed fallback (default: 7)
    pub columns_per_row: usize,
    /// Cell height used when the grid has no measurable cell (default: 120)
    pub fallback_cell_height: f64,
    /// Horizontal gap between pointer and floating label (default: 10)
    pub label_offset: f64,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LEAVECAL_CONFLICT_POLICY` - `open` or `closed` (default: `open`)
    /// - `LEAVECAL_COLUMNS_PER_ROW` - Cells per row (default: 7)
    /// - `LEAVECAL_FALLBACK_CELL_HEIGHT` - Fallback cell height (default: 120)
    /// - `LEAVECAL_LABEL_OFFSET` - Floating label offset (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            conflict_policy: env::var("LEAVECAL_CONFLICT_POLICY")
                .ok()
                .and_then(|v| match v.parse() {
                    Ok(policy) => Some(policy),
                    Err(err) => {
                        tracing::warn!(error = %err, "Ignoring LEAVECAL_CONFLICT_POLICY");
                        None
                    }
                })
                .unwrap_or(defaults.conflict_policy),
            columns_per_row: env::var("LEAVECAL_COLUMNS_PER_ROW")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|columns| *columns > 0)
                .unwrap_or(defaults.columns_per_row),
            fallback_cell_height: env::var("LEAVECAL_FALLBACK_CELL_HEIGHT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fallback_cell_height),
            label_offset: env::var("LEAVECAL_LABEL_OFFSET")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.label_offset),
        }
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            conflict_policy: ConflictPolicy::FailOpen,
            columns_per_row: 7,
            fallback_cell_height: 120.0,
            label_offset: 10.0,
        }
    }
}
