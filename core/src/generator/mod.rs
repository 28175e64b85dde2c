use crate::*;
pub use seeded::*;

mod seeded;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Board;
}
