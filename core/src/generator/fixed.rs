use super::*;

/// Places mines at a fixed list of coordinates, every round.
///
/// Useful for reproducing a known layout. Coordinates outside the configured
/// size are ignored with a warning, so the board will reject the resulting
/// mask if the count no longer matches.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    mines: Vec<Coord2>,
}

impl FixedMinefieldGenerator {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> Array2<bool> {
        let mut mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for &coords in &self.mines {
            match mask.get_mut(coords.to_nd_index()) {
                Some(cell) => *cell = true,
                None => log::warn!("Ignoring mine at {:?} outside {:?}", coords, config.size),
            }
        }
        mask
    }
}
