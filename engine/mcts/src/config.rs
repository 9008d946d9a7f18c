//! MCTS configuration parameters.

use std::str::FromStr;

/// How selection breaks ties between children with equal UCT scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Scan children in order; a later child whose score equals the current
    /// best replaces it on a fair coin flip. Early children in a large tie
    /// are picked less often than later ones.
    #[default]
    CoinFlip,

    /// Draw uniformly among all children sharing the best score.
    Uniform,
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "coin_flip" | "coinflip" | "coin-flip" => Ok(TieBreak::CoinFlip),
            "uniform" => Ok(TieBreak::Uniform),
            other => Err(format!(
                "unknown tie break '{}', expected 'coin_flip' or 'uniform'",
                other
            )),
        }
    }
}

/// How selection treats children that have never been simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unvisited {
    /// Leave them out of the UCT comparison. They are only reached when no
    /// sibling has been visited, through a uniform draw over all children.
    #[default]
    Skip,

    /// Pick an unvisited child (uniformly) before comparing any scores,
    /// as textbook UCT does by giving them an infinite score.
    Prefer,
}

impl FromStr for Unvisited {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(Unvisited::Skip),
            "prefer" => Ok(Unvisited::Prefer),
            other => Err(format!(
                "unknown unvisited policy '{}', expected 'skip' or 'prefer'",
                other
            )),
        }
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Exploration constant `C` in the UCT formula.
    /// sqrt(2) balances exploration for win rates in [0, 1].
    pub exploration_constant: f64,

    /// Tie-breaking policy used during selection.
    pub tie_break: TieBreak,

    /// Treatment of never-simulated children during selection.
    pub unvisited: Unvisited,

    /// Number of `explore` calls performed by `MctsSearch::run`.
    pub iterations: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            tie_break: TieBreak::CoinFlip,
            unvisited: Unvisited::Skip,
            iterations: 1000,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 50,
            ..Self::default()
        }
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the tie-breaking policy.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Builder pattern: set the unvisited-children policy.
    pub fn with_unvisited(mut self, unvisited: Unvisited) -> Self {
        self.unvisited = unvisited;
        self
    }

    /// Builder pattern: set number of iterations for `run`.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }
}
