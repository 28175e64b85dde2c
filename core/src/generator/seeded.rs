use alloc::string::String;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::*;

/// Length of the seeds handed out for fresh games.
pub const SEED_LEN: usize = 8;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Stable 64-bit digest of a seed string (FNV-1a over its UTF-8 bytes).
pub fn seed_digest(seed: &str) -> u64 {
    seed.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Draws a fresh alphanumeric seed from `rng`.
pub fn random_seed_with<R: Rng>(rng: &mut R) -> String {
    (0..SEED_LEN)
        .map(|_| char::from(rng.sample(rand::distr::Alphanumeric)))
        .collect()
}

/// Draws a fresh alphanumeric seed from the thread-local entropy source.
#[cfg(feature = "std")]
pub fn random_seed() -> String {
    random_seed_with(&mut rand::rng())
}

/// Generates a board from a freshly drawn seed, returning the seed alongside it so the game can
/// be replayed or shared later.
#[cfg(feature = "std")]
pub fn generate_random(config: GameConfig) -> (String, Board) {
    let seed = random_seed();
    let board = SeededBoardGenerator::new(&seed).generate(config);
    (seed, board)
}

/// Purely random boards where every cell is an independent uniform pick, reproducible from the
/// seed string on every platform.
#[derive(Clone, Debug, PartialEq)]
pub struct SeededBoardGenerator {
    digest: u64,
}

impl SeededBoardGenerator {
    pub fn new(seed: &str) -> Self {
        Self {
            digest: seed_digest(seed),
        }
    }
}

impl BoardGenerator for SeededBoardGenerator {
    /// Unchecked: `config` must already satisfy [`GameConfig::validate`].
    fn generate(self, config: GameConfig) -> Board {
        debug_assert!(
            config.validate().is_ok(),
            "generating from invalid config {config:?}"
        );
        let size = usize::from(config.size);
        log::debug!(
            "Generating {size}x{size} board with {} colors, digest {:016x}",
            config.num_colors,
            self.digest
        );

        let mut rng = ChaCha8Rng::seed_from_u64(self.digest);
        // logical order is row-major, which fixes the draw order for a given seed
        let cells = Array2::from_shape_simple_fn((size, size), || {
            rng.random_range(0..config.num_colors)
        });

        // square by construction
        Board { cells }
    }
}
