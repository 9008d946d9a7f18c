//! One game of tic-tac-toe between the MCTS engine and a random opponent

use anyhow::{anyhow, Result};
use games_tictactoe::{Board, Player, TicTacToe};
use mcts::{MctsConfig, MctsSearch};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

/// How a game ended, from the engine's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    EngineWon,
    OpponentWon,
    Draw,
    /// The ply limit was reached before the game finished
    Unfinished,
}

/// Final position and result of a game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub board: Board,
    pub plies: u32,
}

/// Game driver. The engine plays `engine_side`; the opponent picks uniformly
/// among legal moves. Both moves go through `commit_move`, so the engine's
/// tree follows the game and statistics are reused between turns.
pub struct Match {
    search: MctsSearch<TicTacToe>,
    engine_side: Player,
    opponent_rng: ChaCha20Rng,
    board: Board,
    max_plies: u32,
    top_moves: usize,
}

fn rng_from(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}

impl Match {
    pub fn new(
        config: MctsConfig,
        engine_side: Player,
        engine_seed: Option<u64>,
        opponent_seed: Option<u64>,
    ) -> Self {
        let board = Board::new();
        Self {
            search: MctsSearch::new(
                TicTacToe,
                board,
                engine_side,
                config,
                rng_from(engine_seed),
            ),
            engine_side,
            opponent_rng: rng_from(opponent_seed),
            board,
            max_plies: 9,
            top_moves: 3,
        }
    }

    pub fn with_max_plies(mut self, max_plies: u32) -> Self {
        self.max_plies = max_plies;
        self
    }

    pub fn with_top_moves(mut self, top_moves: usize) -> Self {
        self.top_moves = top_moves;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Play until the game ends or the ply limit is reached.
    pub fn play(&mut self) -> Result<GameRecord> {
        let mut plies = 0;

        while !self.board.is_done() && plies < self.max_plies {
            let next = if self.board.to_move() == self.engine_side {
                self.engine_move()?
            } else {
                self.opponent_move()?
            };

            self.search.commit_move(&next)?;
            self.board = next;
            plies += 1;

            debug!(ply = plies, board = %self.board.to_string().replace('\n', "/"), "Move played");
        }

        let outcome = match self.board.winner() {
            Some(player) if player == self.engine_side => Outcome::EngineWon,
            Some(_) => Outcome::OpponentWon,
            None if self.board.is_full() => Outcome::Draw,
            None => Outcome::Unfinished,
        };

        Ok(GameRecord {
            outcome,
            board: self.board,
            plies,
        })
    }

    /// Search from the current root and return the most simulated move.
    fn engine_move(&mut self) -> Result<Board> {
        let result = self.search.run()?;

        for (rank, mv) in self.search.ranked_moves().iter().take(self.top_moves).enumerate() {
            info!(
                rank = rank + 1,
                position = self.board.move_to(&mv.state),
                simulations = mv.simulations,
                wins = mv.wins,
                win_rate = %format!("{:.3}", mv.win_rate),
                "Candidate move"
            );
        }

        let stats = self.search.tree().stats();
        info!(
            nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            root_simulations = stats.root_simulations,
            root_win_rate = %format!("{:.3}", stats.root_win_rate),
            "Search complete"
        );

        result
            .best_move
            .ok_or_else(|| anyhow!("engine found no move from a live position"))
    }

    /// Pick a random legal move for the opponent.
    fn opponent_move(&mut self) -> Result<Board> {
        // The root has to be expanded before the move can be committed
        if self.search.root().is_leaf() {
            self.search.explore()?;
        }

        let legal = self.board.legal_moves();
        let position = *legal
            .choose(&mut self.opponent_rng)
            .ok_or_else(|| anyhow!("opponent has no legal move"))?;

        info!(position, player = %self.engine_side.opponent(), "Opponent move");
        Ok(self.board.place(position)?)
    }
}
