use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniform placement by rejection sampling: draw a random cell, retry if it
/// already holds a mine.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> Array2<bool> {
        let (height, width) = config.size;
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());

        let total_cells = config.total_cells();
        if config.mines > total_cells {
            log::warn!(
                "Cannot place {} mines on {} cells, filling the board",
                config.mines,
                total_cells
            );
            mines.fill(true);
            return mines;
        }

        let mut draws: u32 = 0;
        for _ in 0..config.mines {
            loop {
                draws += 1;
                let coords = (
                    self.rng.random_range(0..height),
                    self.rng.random_range(0..width),
                );
                let cell = &mut mines[coords.to_nd_index()];
                if !*cell {
                    *cell = true;
                    break;
                }
            }
        }

        log::debug!(
            "Placed {} mines on a {}x{} board in {} draws",
            config.mines,
            height,
            width,
            draws
        );
        mines
    }
}
