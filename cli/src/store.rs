use anyhow::{Context, Result};
use floodit_core::{FloodEngine, GameConfig, StepCount, encode_board, restore_from_parts};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Saved game as four independent fields, the way a key/value preference store holds it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateStore {
    pub state_saved: bool,
    pub state_board: Option<String>,
    pub state_steps: StepCount,
    pub state_seed: Option<String>,
}

impl StateStore {
    /// Reads the store; a missing or unreadable file is treated as "nothing saved".
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                log::debug!("No saved state at {}: {err}", path.display());
                return Self::default();
            }
        };

        serde_json::from_str(&text).unwrap_or_else(|err| {
            log::warn!("Ignoring unreadable state file {}: {err}", path.display());
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("encoding saved state")?;
        fs::write(path, text).with_context(|| format!("writing saved state to {}", path.display()))
    }

    pub fn suspend(engine: &FloodEngine) -> Result<Self> {
        let board = encode_board(&engine.board()).context("encoding board")?;
        Ok(Self {
            state_saved: true,
            state_board: Some(board),
            state_steps: engine.steps(),
            state_seed: Some(engine.seed().into()),
        })
    }

    /// Resumes the saved game, or starts a new one when nothing usable is stored.
    pub fn resume_or_new(&self, config: GameConfig) -> Result<FloodEngine> {
        if self.state_saved {
            match restore_from_parts(
                self.state_board.as_deref(),
                self.state_steps,
                self.state_seed.as_deref(),
                config,
            ) {
                Ok(engine) => return Ok(engine),
                Err(err) if err.is_restore_failure() => {
                    log::info!("Starting a new game, saved one not restorable: {err}");
                }
                Err(err) => return Err(err).context("restoring saved game"),
            }
        }

        FloodEngine::new(config).context("starting a new game")
    }
}
