use alloc::collections::VecDeque;
use alloc::string::String;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineState {
    InProgress,
    /// Either monochrome or out of moves; hosts tell the two apart with
    /// [`FloodEngine::check_win`].
    Finished,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloodEngine {
    config: GameConfig,
    board: Board,
    steps: StepCount,
    max_steps: StepCount,
    seed: String,
}

impl FloodEngine {
    /// Starts a fresh game from a newly drawn seed.
    #[cfg(feature = "std")]
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, random_seed())
    }

    /// Starts a fresh game whose board is fully determined by `seed`.
    pub fn with_seed(config: GameConfig, seed: impl Into<String>) -> Result<Self> {
        config.validate()?;
        let seed = seed.into();
        let board = SeededBoardGenerator::new(&seed).generate(config);
        Ok(Self::from_parts(config, board, 0, seed))
    }

    /// Rebuilds a game in progress. The move budget is recomputed from `config`.
    pub fn restore(
        board: Board,
        config: GameConfig,
        steps: StepCount,
        seed: impl Into<String>,
    ) -> Result<Self> {
        config.validate()?;
        if board.size() != config.size {
            return Err(GameError::InvalidBoardShape);
        }
        if !board.fits_colors(config.num_colors) {
            return Err(GameError::InvalidColor);
        }
        if steps > config.max_steps() {
            return Err(GameError::StateMismatch);
        }
        Ok(Self::from_parts(config, board, steps, seed.into()))
    }

    fn from_parts(config: GameConfig, board: Board, steps: StepCount, seed: String) -> Self {
        Self {
            config,
            board,
            steps,
            max_steps: config.max_steps(),
            seed,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn num_colors(&self) -> Color {
        self.config.num_colors
    }

    pub fn steps(&self) -> StepCount {
        self.steps
    }

    pub fn max_steps(&self) -> StepCount {
        self.max_steps
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Independent copy of the board; changes to it never reach the engine.
    pub fn board(&self) -> Board {
        self.board.clone()
    }

    pub fn color_at(&self, coords: Coord2) -> Result<Color> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.board[coords])
    }

    pub fn anchor_color(&self) -> Color {
        self.board.anchor_color()
    }

    pub fn check_win(&self) -> bool {
        self.board.is_monochrome()
    }

    pub fn is_out_of_moves(&self) -> bool {
        self.steps >= self.max_steps
    }

    pub fn is_finished(&self) -> bool {
        self.check_win() || self.is_out_of_moves()
    }

    pub fn state(&self) -> EngineState {
        if self.is_finished() {
            EngineState::Finished
        } else {
            EngineState::InProgress
        }
    }

    /// Repaints the region connected to the anchor cell with `color`.
    ///
    /// Picking the current anchor color, or flooding a finished game, changes nothing and costs
    /// no move.
    pub fn flood(&mut self, color: Color) -> Result<FloodOutcome> {
        if !self.config.contains_color(color) {
            return Err(GameError::InvalidColor);
        }

        let original = self.board.anchor_color();
        if color == original {
            return Ok(FloodOutcome::NoChange);
        }
        if self.is_finished() {
            log::debug!("Ignoring flood with {color}, game already finished");
            return Ok(FloodOutcome::NoChange);
        }

        let recolored = self.board.fill_anchor_region(color);
        self.steps += 1;
        log::debug!(
            "Flooded {recolored} cells {original} -> {color}, step {}/{}",
            self.steps,
            self.max_steps
        );

        Ok(FloodOutcome::Flooded(recolored))
    }
}

impl Board {
    /// Breadth-first fill from the anchor. Cells are recolored as they are queued, so each one is
    /// visited exactly once without a separate visited set.
    pub(crate) fn fill_anchor_region(&mut self, color: Color) -> CellCount {
        let original = self.anchor_color();
        if original == color {
            return 0;
        }

        let mut to_visit = VecDeque::from([ANCHOR]);
        self[ANCHOR] = color;
        let mut recolored: CellCount = 1;

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.iter_neighbors(visit_coords) {
                if self[pos] == original {
                    self[pos] = color;
                    recolored += 1;
                    to_visit.push_back(pos);
                }
            }
        }

        recolored
    }
}
