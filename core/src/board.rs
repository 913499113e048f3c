use std::collections::{BTreeSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
/// - any -> InProgress, through `initialize` or `reset`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl RoundState {
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Sole owner of the cells of a round, and of the rules for guessing them.
#[derive(Clone, Debug)]
pub struct Board<G = RandomMinefieldGenerator> {
    limits: BoardLimits,
    generator: G,
    config: Option<GameConfig>,
    cells: Array2<Cell>,
    mines_flagged: CellCount,
    revealed_count: CellCount,
    state: RoundState,
}

impl Board<RandomMinefieldGenerator> {
    /// Board whose layouts are seeded from the operating system.
    pub fn new(limits: BoardLimits) -> Self {
        Self::with_generator(limits, RandomMinefieldGenerator::from_entropy())
    }

    /// Board whose sequence of layouts is fully determined by `seed`.
    pub fn with_seed(limits: BoardLimits, seed: u64) -> Self {
        Self::with_generator(limits, RandomMinefieldGenerator::new(seed))
    }
}

impl<G: MinefieldGenerator> Board<G> {
    pub fn with_generator(limits: BoardLimits, generator: G) -> Self {
        Self {
            limits,
            generator,
            config: None,
            cells: Array2::default((0, 0)),
            mines_flagged: 0,
            revealed_count: 0,
            state: RoundState::default(),
        }
    }

    /// Starts a new round. On error the board is left exactly as it was.
    pub fn initialize(&mut self, config: GameConfig) -> Result<()> {
        let config = config.validate(&self.limits)?;
        let cells = self.build_cells(config)?;

        self.cells = cells;
        self.config = Some(config);
        self.mines_flagged = 0;
        self.revealed_count = 0;
        self.state = RoundState::InProgress;

        log::debug!(
            "Round started on a {}x{} board with {} mines",
            config.height(),
            config.width(),
            config.mines
        );
        Ok(())
    }

    /// Starts a new round with the last configuration and a fresh layout.
    pub fn reset(&mut self) -> Result<()> {
        let config = self.config.ok_or(GameError::NoPriorConfiguration)?;
        self.initialize(config)
    }

    pub fn guess(&mut self, coords: Coord2, asserted_mine: bool) -> Result<GuessOutcome> {
        use GuessOutcome::*;

        self.check_in_progress()?;
        let coords = self.validate_coords(coords)?;

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed() {
            return Ok(AlreadyGuessed);
        }
        cell.reveal();
        let cell = *cell;

        if asserted_mine != cell.is_mine() {
            log::debug!(
                "Guess at {:?} asserted mine={} but cell holds {:?}",
                coords,
                asserted_mine,
                cell.contents()
            );
            self.state = RoundState::Lost;
            return Ok(Lost);
        }

        if cell.is_mine() {
            self.mines_flagged += 1;
            if self.mines_flagged == self.mine_count() {
                self.state = RoundState::Won;
                return Ok(Won);
            }
            return Ok(MineFound);
        }

        self.revealed_count += 1;
        if cell.adjacent_count() == 0 {
            Ok(Revealed(self.cascade_from(coords)))
        } else {
            Ok(Revealed(BTreeSet::from([coords])))
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_in_progress(&self) -> bool {
        self.state.is_in_progress()
    }

    pub fn limits(&self) -> &BoardLimits {
        &self.limits
    }

    /// Configuration of the current or most recent round.
    pub fn config(&self) -> Option<GameConfig> {
        self.config
    }

    /// `(height, width)` of the current grid; `(0, 0)` before the first round.
    pub fn dimensions(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.map_or(0, |config| config.mines)
    }

    pub fn mines_flagged(&self) -> CellCount {
        self.mines_flagged
    }

    /// Safe cells revealed so far, by guess or cascade.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// What the player may see at `coords`.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        self.cell_at(coords).map(|cell| cell.view())
    }

    /// True contents of `coords`, regardless of whether it was revealed.
    pub fn cell_contents(&self, coords: Coord2) -> Result<CellContents> {
        self.cell_at(coords).map(|cell| cell.contents())
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    fn build_cells(&mut self, config: GameConfig) -> Result<Array2<Cell>> {
        let mask = self.generator.generate(config);

        let expected = (usize::from(config.height()), usize::from(config.width()));
        if mask.dim() != expected {
            log::warn!(
                "Generated mask has shape {:?}, expected {:?}",
                mask.dim(),
                expected
            );
            return Err(GameError::InvalidLayout);
        }

        // double check mine count
        let placed = mask.iter().filter(|&&mine| mine).count();
        if placed != usize::from(config.mines) {
            log::warn!(
                "Generated mask count mismatch, actual: {}, requested: {}",
                placed,
                config.mines
            );
            return Err(GameError::InvalidLayout);
        }

        let mut cells = mask.map(|&mine| {
            let mut cell = Cell::new();
            if mine {
                cell.place_mine();
            }
            cell
        });

        for ((row, col), cell) in cells.indexed_iter_mut() {
            if cell.is_mine() {
                continue;
            }
            // shape was checked against `config.size`, both axes fit in `Coord`
            let coords = (row as Coord, col as Coord);
            let adjacent = mask.iter_neighbor_cells(coords).filter(|&mine| mine).count();
            cell.set_adjacent_count(adjacent as u8)?;
        }

        Ok(cells)
    }

    /// Reveals the connected zero region around an already revealed zero
    /// cell, plus its numbered border. Returns every cell that became visible,
    /// `start` included.
    fn cascade_from(&mut self, start: Coord2) -> BTreeSet<Coord2> {
        let mut revealed = BTreeSet::from([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(center) = to_visit.pop_front() {
            for pos in self.cells.iter_neighbors(center) {
                let cell = &mut self.cells[pos.to_nd_index()];
                if cell.is_revealed() || cell.is_mine() {
                    continue;
                }

                cell.reveal();
                self.revealed_count += 1;
                revealed.insert(pos);

                if cell.adjacent_count() == 0 {
                    to_visit.push_back(pos);
                }
            }
        }

        log::trace!("Cascade from {:?} revealed {} cells", start, revealed.len());
        revealed
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.dimensions();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds { coords, size })
        }
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_in_progress() {
            Ok(())
        } else {
            Err(GameError::NoActiveGame)
        }
    }
}


#[cfg(test)]
mod properties {
    use proptest::prelude::*;
    use proptest::sample::Index;

    use super::*;

    fn coords_of(cells: &Array2<Cell>) -> impl Iterator<Item = Coord2> + '_ {
        cells
            .indexed_iter()
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    /// Valid default-limit configuration plus a seed.
    fn seeded_round() -> impl Strategy<Value = (GameConfig, u64)> {
        (8u8..=26, 8u8..=60, any::<Index>(), any::<u64>()).prop_map(
            |(height, width, mines, seed)| {
                let range = BoardLimits::default().mine_range((height, width));
                let span = usize::from(range.end() - range.start()) + 1;
                let mines = range.start() + mines.index(span) as CellCount;
                (GameConfig::new((height, width), mines), seed)
            },
        )
    }

    fn started((config, seed): (GameConfig, u64)) -> Board {
        let mut board = Board::with_seed(BoardLimits::default(), seed);
        board.initialize(config).unwrap();
        board
    }

    /// Recursive flood fill visiting neighbours in reverse order, used as an
    /// independent reference for the worklist cascade.
    fn reference_fill(board: &Board, coords: Coord2, acc: &mut BTreeSet<Coord2>) {
        if !acc.insert(coords) {
            return;
        }
        if board.cell_contents(coords).unwrap() != CellContents::Clear(0) {
            return;
        }
        let neighbors: Vec<_> = board.cells.iter_neighbors(coords).collect();
        for pos in neighbors.into_iter().rev() {
            if board.cell_contents(pos).unwrap() != CellContents::Mine {
                reference_fill(board, pos, acc);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn exact_mine_count(round in seeded_round()) {
            let board = started(round);
            let mines = board.cells.iter().filter(|cell| cell.is_mine()).count();
            prop_assert_eq!(mines, usize::from(round.0.mines));
        }

        #[test]
        fn adjacency_matches_neighbors(round in seeded_round()) {
            let board = started(round);
            for coords in coords_of(&board.cells) {
                if let CellContents::Clear(count) = board.cell_contents(coords).unwrap() {
                    let expected = board
                        .cells
                        .iter_neighbors(coords)
                        .filter(|&pos| board.cells[pos.to_nd_index()].is_mine())
                        .count();
                    prop_assert_eq!(usize::from(count), expected);
                }
            }
        }

        #[test]
        fn cascade_is_order_independent_fixpoint(round in seeded_round()) {
            let mut board = started(round);
            let zero = coords_of(&board.cells)
                .find(|&coords| board.cell_contents(coords).unwrap() == CellContents::Clear(0));
            prop_assume!(zero.is_some());
            let zero = zero.unwrap();

            let mut expected = BTreeSet::new();
            reference_fill(&board, zero, &mut expected);

            let outcome = board.guess(zero, false).unwrap();
            prop_assert_eq!(outcome, GuessOutcome::Revealed(expected));

            for coords in coords_of(&board.cells) {
                let cell = board.cells[coords.to_nd_index()];
                if !cell.is_revealed() {
                    continue;
                }
                prop_assert!(!cell.is_mine());
                if cell.adjacent_count() == 0 {
                    for pos in board.cells.iter_neighbors(coords) {
                        prop_assert!(board.cells[pos.to_nd_index()].is_revealed());
                    }
                }
            }
        }

        #[test]
        fn naming_every_mine_wins(round in seeded_round()) {
            let mut board = started(round);
            let mines: Vec<_> = coords_of(&board.cells)
                .filter(|&coords| board.cells[coords.to_nd_index()].is_mine())
                .collect();

            let (last, rest) = mines.split_last().unwrap();
            for &coords in rest {
                prop_assert_eq!(board.guess(coords, true).unwrap(), GuessOutcome::MineFound);
            }
            prop_assert_eq!(board.guess(*last, true).unwrap(), GuessOutcome::Won);
            prop_assert_eq!(board.mines_flagged(), round.0.mines);
        }

        #[test]
        fn safe_claim_on_mine_always_loses(round in seeded_round(), found in any::<Index>()) {
            let mut board = started(round);
            let mines: Vec<_> = coords_of(&board.cells)
                .filter(|&coords| board.cells[coords.to_nd_index()].is_mine())
                .collect();

            let already_found = found.index(mines.len());
            for &coords in &mines[..already_found] {
                board.guess(coords, true).unwrap();
            }
            prop_assert_eq!(
                board.guess(mines[already_found], false).unwrap(),
                GuessOutcome::Lost
            );
            prop_assert_eq!(board.state(), RoundState::Lost);
        }
    }
}
