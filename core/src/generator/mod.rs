use ndarray::Array2;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Produces the mine mask for a new round.
///
/// The mask is indexed `[row, col]` and must have the configured size. The
/// board checks the shape and mine count before using it.
pub trait MinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> Array2<bool>;
}

impl<G: MinefieldGenerator + ?Sized> MinefieldGenerator for Box<G> {
    fn generate(&mut self, config: GameConfig) -> Array2<bool> {
        (**self).generate(config)
    }
}
