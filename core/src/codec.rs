use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Restorable snapshot of a game in progress.
///
/// Board size and color count are not stored. The host supplies its current settings on restore
/// and the snapshot is rejected when it does not fit them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub board: Vec<Vec<Color>>,
    pub steps: StepCount,
    pub seed: String,
}

impl SavedGame {
    pub fn from_engine(engine: &FloodEngine) -> Self {
        Self {
            board: engine.board().to_rows(),
            steps: engine.steps(),
            seed: engine.seed().into(),
        }
    }

    pub fn restore(self, config: GameConfig) -> Result<FloodEngine> {
        let board = Board::from_rows(&self.board).map_err(|err| {
            log::warn!("Discarding saved game, unusable board: {err}");
            GameError::CorruptState
        })?;
        restore_board(board, config, self.steps, self.seed)
    }
}

fn restore_board(
    board: Board,
    config: GameConfig,
    steps: StepCount,
    seed: impl Into<String>,
) -> Result<FloodEngine> {
    FloodEngine::restore(board, config, steps, seed).map_err(|err| match err {
        GameError::BoardTooSmall | GameError::TooFewColors => err,
        _ => {
            log::warn!("Discarding saved game, does not fit {config:?}: {err}");
            GameError::StateMismatch
        }
    })
}

/// Text form of a board as stored by hosts: JSON nested rows.
pub fn encode_board(board: &Board) -> serde_json::Result<String> {
    serde_json::to_string(board)
}

pub fn decode_board(text: &str) -> Result<Board> {
    let rows: Option<Vec<Vec<Color>>> = serde_json::from_str(text).map_err(|err| {
        log::warn!("Saved board is not valid JSON rows: {err}");
        GameError::CorruptState
    })?;

    let Some(rows) = rows else {
        return Err(GameError::NoSavedState);
    };

    Board::from_rows(&rows).map_err(|err| {
        log::warn!("Saved board has an unusable shape: {err}");
        GameError::CorruptState
    })
}

/// Rebuilds a game from the independently stored grid, step and seed fields.
///
/// A missing grid or seed means there is nothing to resume; hosts are expected to start a new
/// game on any error for which [`GameError::is_restore_failure`] holds.
pub fn restore_from_parts(
    board: Option<&str>,
    steps: StepCount,
    seed: Option<&str>,
    config: GameConfig,
) -> Result<FloodEngine> {
    let (Some(board), Some(seed)) = (board, seed) else {
        return Err(GameError::NoSavedState);
    };

    restore_board(decode_board(board)?, config, steps, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn config(size: Coord, num_colors: Color) -> GameConfig {
        GameConfig::new(size, num_colors).unwrap()
    }

    #[test]
    fn round_trip_preserves_board_steps_and_seed() {
        let config = config(8, 4);
        let mut engine = FloodEngine::with_seed(config, "suspend").unwrap();
        for color in [1, 2, 3, 0] {
            engine.flood(color).unwrap();
        }

        let restored = SavedGame::from_engine(&engine).restore(config).unwrap();

        assert_eq!(restored.board(), engine.board());
        assert_eq!(restored.steps(), engine.steps());
        assert_eq!(restored.seed(), engine.seed());
        assert_eq!(restored.max_steps(), engine.max_steps());
    }

    #[test]
    fn saved_game_serializes_as_plain_fields() {
        let config = config(2, 2);
        let board = Board::from_rows(&[vec![0, 1], vec![1, 1]]).unwrap();
        let engine = FloodEngine::restore(board, config, 1, "abc").unwrap();

        let json = serde_json::to_string(&SavedGame::from_engine(&engine)).unwrap();

        assert_eq!(json, r#"{"board":[[0,1],[1,1]],"steps":1,"seed":"abc"}"#);
    }

    #[test]
    fn stored_parts_round_trip() {
        let config = config(6, 3);
        let mut engine = FloodEngine::with_seed(config, "parts").unwrap();
        let color = (engine.anchor_color() + 1) % 3;
        engine.flood(color).unwrap();

        let text = encode_board(&engine.board()).unwrap();
        let restored =
            restore_from_parts(Some(&text), engine.steps(), Some(engine.seed()), config).unwrap();

        assert_eq!(restored, engine);
    }

    #[test]
    fn boards_encode_as_nested_rows() {
        let board = Board::from_rows(&[vec![0, 1], vec![1, 0]]).unwrap();

        let text = encode_board(&board).unwrap();

        assert_eq!(text, "[[0,1],[1,0]]");
        assert_eq!(decode_board(&text), Ok(board));
    }

    #[test]
    fn missing_fields_mean_nothing_to_restore() {
        let config = config(2, 2);

        assert_eq!(
            restore_from_parts(None, 0, Some("seed"), config).unwrap_err(),
            GameError::NoSavedState
        );
        assert_eq!(
            restore_from_parts(Some("[[0,1],[1,0]]"), 0, None, config).unwrap_err(),
            GameError::NoSavedState
        );
        assert_eq!(decode_board("null").unwrap_err(), GameError::NoSavedState);
    }

    #[test]
    fn malformed_grids_are_corrupt() {
        for text in ["", "not json", "[]", "[[0,1],[1]]", "[[0,1,0],[1,0,1]]", "[[-1,0],[0,0]]"] {
            assert_eq!(decode_board(text).unwrap_err(), GameError::CorruptState, "{text}");
        }

        let saved = SavedGame {
            board: vec![],
            steps: 0,
            seed: "empty".into(),
        };
        assert_eq!(saved.restore(config(2, 2)).unwrap_err(), GameError::CorruptState);
    }

    #[test]
    fn grids_that_do_not_fit_the_settings_are_mismatched() {
        let text = "[[0,1,2],[2,1,0],[0,0,0]]";

        let smaller = restore_from_parts(Some(text), 0, Some("s"), config(2, 3));
        assert_eq!(smaller.unwrap_err(), GameError::StateMismatch);

        let fewer_colors = restore_from_parts(Some(text), 0, Some("s"), config(3, 2));
        assert_eq!(fewer_colors.unwrap_err(), GameError::StateMismatch);

        let over_budget = restore_from_parts(Some(text), 100, Some("s"), config(3, 3));
        assert_eq!(over_budget.unwrap_err(), GameError::StateMismatch);

        assert!(restore_from_parts(Some(text), 2, Some("s"), config(3, 3)).is_ok());
    }

    #[test]
    fn every_restore_error_is_recoverable() {
        for err in [
            GameError::NoSavedState,
            GameError::CorruptState,
            GameError::StateMismatch,
        ] {
            assert!(err.is_restore_failure());
        }
        assert!(!GameError::InvalidColor.is_restore_failure());
    }
}
