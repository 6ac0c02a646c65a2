use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves change the board anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Owns one board from the first move to the end of the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardEngine {
    layout: MineLayout,
    board: Array2<CellState>,
    revealed_safe: CellCount,
    flagged: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl BoardEngine {
    pub fn new(layout: MineLayout) -> Self {
        let size = layout.size();
        Self {
            layout,
            board: Array2::default(size.to_nd_index()),
            revealed_safe: 0,
            flagged: 0,
            status: Default::default(),
            triggered_mine: None,
        }
    }

    /// Starts a game on a freshly randomized `rows x cols` board.
    pub fn initialize(rows: Coord, cols: Coord, mine_count: CellCount) -> Result<Self> {
        let config = GameConfig::new((rows, cols), mine_count)?;
        Self::generate(config, RandomLayoutGenerator::from_entropy())
    }

    pub fn generate(config: GameConfig, generator: impl LayoutGenerator) -> Result<Self> {
        let engine = Self::new(generator.generate(config)?);
        log::debug!("Started game on {:?} board with {} mines", engine.size(), engine.total_mines());
        Ok(engine)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn total_mines(&self) -> CellCount {
        self.layout.mine_count()
    }

    /// Mines minus flags; goes negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.layout.mine_count()) - i32::from(self.flagged)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.view(coords))
    }

    /// Every cell in row-major order, as a renderer should draw it.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, CellView)> {
        positions(self.size()).map(move |coords| (coords, self.view(coords)))
    }

    fn view(&self, coords: Coord2) -> CellView {
        match (self.board[coords.to_nd_index()], self.layout[coords]) {
            (CellState::Hidden, _) => CellView::Hidden,
            (CellState::Flagged, _) => CellView::Flagged,
            (CellState::Revealed, false) => CellView::Open(self.layout.adjacent_mine_count(coords)),
            (CellState::Revealed, true) if self.triggered_mine == Some(coords) => {
                CellView::Exploded
            }
            (CellState::Revealed, true) => CellView::Mine,
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.layout.validate_coords(coords)?;
        if self.is_finished() {
            return Ok(FlagOutcome::NoChange);
        }

        let cell = &mut self.board[coords.to_nd_index()];
        Ok(match *cell {
            CellState::Hidden => {
                *cell = CellState::Flagged;
                self.flagged += 1;
                FlagOutcome::Flagged
            }
            CellState::Flagged => {
                *cell = CellState::Hidden;
                self.flagged -= 1;
                FlagOutcome::Unflagged
            }
            CellState::Revealed => FlagOutcome::NoChange,
        })
    }

    /// Reveals a hidden cell, flooding outward from blank cells.
    ///
    /// Finished games and cells that are already revealed or flagged are left alone.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;
        if self.is_finished() || !self.board[coords.to_nd_index()].is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.layout.contains_mine(coords) {
            self.board[coords.to_nd_index()] = CellState::Revealed;
            self.triggered_mine = Some(coords);
            self.end_game(GameStatus::Lost);
            return Ok(RevealOutcome::Lost);
        }

        let opened = self.flood_reveal(coords);
        log::debug!("Revealed {opened} cells starting at {coords:?}");

        if self.revealed_safe == self.layout.safe_cell_count() {
            self.end_game(GameStatus::Won);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Continue)
        }
    }

    /// Shows every mine for the end-of-game board. Only acts on a lost game.
    ///
    /// Flagged mines are revealed too, which gives their flags back to the budget.
    pub fn reveal_all_mines(&mut self) {
        if self.status != GameStatus::Lost {
            log::warn!("Ignoring mine reveal while game is {:?}", self.status);
            return;
        }

        for coords in self.layout.mine_positions() {
            let cell = &mut self.board[coords.to_nd_index()];
            if *cell == CellState::Flagged {
                self.flagged -= 1;
            }
            *cell = CellState::Revealed;
        }
    }

    /// Worklist flood fill, `start` must be a hidden safe cell.
    ///
    /// Only neighbors of blank cells are queued, and those are never mines. Flagged cells are
    /// skipped so a flag stops the flood.
    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut pending = vec![start];
        let mut opened: CellCount = 0;

        while let Some(coords) = pending.pop() {
            let cell = &mut self.board[coords.to_nd_index()];
            if !cell.is_hidden() {
                continue;
            }
            *cell = CellState::Revealed;
            opened += 1;

            let count = self.layout.adjacent_mine_count(coords);
            log::trace!("Flood opened cell at {coords:?}, mine count: {count}");
            if count == 0 {
                let board = &self.board;
                pending.extend(
                    self.layout
                        .neighbors(coords)
                        .filter(|&pos| board[pos.to_nd_index()].is_hidden()),
                );
            }
        }

        self.revealed_safe += opened;
        opened
    }

    fn end_game(&mut self, status: GameStatus) {
        debug_assert!(status.is_finished());
        log::debug!("Game ended: {status:?}");
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, mines: &[Coord2]) -> MineLayout {
        MineLayout::from_mine_coords(size, mines).unwrap()
    }

    fn unrevealed_safe_cells(engine: &BoardEngine) -> usize {
        positions(engine.size())
            .filter(|&c| !engine.layout().contains_mine(c))
            .filter(|&c| !engine.cell_state(c).unwrap().is_revealed())
            .count()
    }

    #[test]
    fn corner_mine_flood_wins_without_touching_mine() {
        let mut engine = BoardEngine::new(layout((3, 3), &[(0, 0)]));

        let outcome = engine.reveal((2, 2)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(engine.status(), GameStatus::Won);
        assert_eq!(engine.cell_at((0, 0)).unwrap(), CellView::Hidden);
        assert_eq!(engine.cell_at((1, 1)).unwrap(), CellView::Open(1));
        assert_eq!(engine.cell_at((0, 2)).unwrap(), CellView::Open(0));
        assert_eq!(engine.revealed_count(), 8);
    }

    #[test]
    fn reveal_mine_loses_and_leaves_other_cells() {
        let mut engine = BoardEngine::new(layout((3, 3), &[(0, 0), (2, 2)]));
        engine.toggle_flag((1, 1)).unwrap();
        let before = engine.clone();

        let outcome = engine.reveal((2, 2)).unwrap();

        assert_eq!(outcome, RevealOutcome::Lost);
        assert_eq!(engine.status(), GameStatus::Lost);
        assert_eq!(engine.triggered_mine(), Some((2, 2)));
        assert_eq!(engine.cell_at((2, 2)).unwrap(), CellView::Exploded);
        for coords in positions((3, 3)).filter(|&c| c != (2, 2)) {
            assert_eq!(engine.cell_state(coords), before.cell_state(coords));
        }
    }

    #[test]
    fn finished_game_ignores_moves() {
        let mut engine = BoardEngine::new(layout((2, 2), &[(0, 0)]));
        engine.reveal((0, 0)).unwrap();
        let after_loss = engine.clone();

        assert_eq!(engine.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine.toggle_flag((0, 1)).unwrap(), FlagOutcome::NoChange);
        assert_eq!(engine, after_loss);
    }

    #[test]
    fn flag_blocks_flood() {
        let mut engine = BoardEngine::new(layout((1, 5), &[(0, 4)]));
        engine.toggle_flag((0, 1)).unwrap();

        assert_eq!(engine.reveal((0, 0)).unwrap(), RevealOutcome::Continue);
        assert_eq!(engine.cell_state((0, 1)).unwrap(), CellState::Flagged);
        assert_eq!(engine.cell_state((0, 2)).unwrap(), CellState::Hidden);
        assert_eq!(engine.revealed_count(), 1);

        assert_eq!(engine.reveal((0, 1)).unwrap(), RevealOutcome::NoChange);
        engine.toggle_flag((0, 1)).unwrap();
        assert_eq!(engine.reveal((0, 2)).unwrap(), RevealOutcome::Won);
        assert_eq!(engine.cell_at((0, 3)).unwrap(), CellView::Open(1));
        assert_eq!(engine.cell_at((0, 4)).unwrap(), CellView::Hidden);
    }

    #[test]
    fn numbered_cell_does_not_flood() {
        let mut engine = BoardEngine::new(layout((3, 3), &[(0, 0)]));

        assert_eq!(engine.reveal((1, 1)).unwrap(), RevealOutcome::Continue);
        assert_eq!(engine.revealed_count(), 1);
        assert_eq!(engine.cell_state((2, 2)).unwrap(), CellState::Hidden);
    }

    #[test]
    fn won_only_after_last_safe_cell() {
        let mut engine = BoardEngine::new(layout((2, 2), &[(0, 0)]));

        assert_eq!(engine.reveal((0, 1)).unwrap(), RevealOutcome::Continue);
        assert_eq!(engine.reveal((1, 0)).unwrap(), RevealOutcome::Continue);
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(unrevealed_safe_cells(&engine), 1);

        assert_eq!(engine.reveal((1, 1)).unwrap(), RevealOutcome::Won);
        assert_eq!(engine.status(), GameStatus::Won);
        assert_eq!(unrevealed_safe_cells(&engine), 0);
    }

    #[test]
    fn flagged_mines_do_not_block_win() {
        let mut engine = BoardEngine::new(layout((2, 2), &[(0, 0)]));
        engine.toggle_flag((0, 0)).unwrap();

        engine.reveal((0, 1)).unwrap();
        engine.reveal((1, 0)).unwrap();

        assert_eq!(engine.reveal((1, 1)).unwrap(), RevealOutcome::Won);
        assert_eq!(engine.cell_at((0, 0)).unwrap(), CellView::Flagged);
    }

    #[test]
    fn reveal_twice_is_same_as_once() {
        let mut engine = BoardEngine::new(layout((4, 4), &[(3, 3), (0, 3)]));

        engine.reveal((0, 0)).unwrap();
        let once = engine.clone();

        assert_eq!(engine.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(engine, once);
    }

    #[test]
    fn flag_round_trip_restores_cell_and_budget() {
        let mut engine = BoardEngine::new(layout((3, 3), &[(0, 0), (2, 2)]));
        let before = engine.clone();

        assert_eq!(engine.toggle_flag((1, 2)).unwrap(), FlagOutcome::Flagged);
        assert_eq!(engine.mines_left(), 1);
        assert_eq!(engine.cell_at((1, 2)).unwrap(), CellView::Flagged);

        assert_eq!(engine.toggle_flag((1, 2)).unwrap(), FlagOutcome::Unflagged);
        assert_eq!(engine.mines_left(), 2);
        assert_eq!(engine, before);
    }

    #[test]
    fn revealed_cell_cannot_be_flagged() {
        let mut engine = BoardEngine::new(layout((3, 3), &[(0, 0)]));
        engine.reveal((1, 1)).unwrap();

        assert_eq!(engine.toggle_flag((1, 1)).unwrap(), FlagOutcome::NoChange);
        assert_eq!(engine.cell_state((1, 1)).unwrap(), CellState::Revealed);
    }

    #[test]
    fn over_flagging_goes_negative() {
        let mut engine = BoardEngine::new(layout((2, 2), &[(0, 0)]));

        for coords in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            engine.toggle_flag(coords).unwrap();
        }

        assert_eq!(engine.mines_left(), -3);
    }

    #[test]
    fn out_of_range_coords_are_errors() {
        let mut engine = BoardEngine::new(layout((3, 3), &[(0, 0)]));
        let err = GameError::OutOfRange {
            coords: (3, 0),
            size: (3, 3),
        };

        assert_eq!(engine.reveal((3, 0)), Err(err));
        assert_eq!(engine.toggle_flag((3, 0)), Err(err));
        assert_eq!(engine.cell_at((3, 0)), Err(err));
        assert!(matches!(engine.reveal((0, 3)), Err(GameError::OutOfRange { .. })));
        assert_eq!(engine.revealed_count(), 0);
    }

    #[test]
    fn reveal_all_mines_after_loss() {
        let mines = [(0, 0), (2, 2), (0, 2)];
        let mut engine = BoardEngine::new(layout((3, 3), &mines));
        engine.toggle_flag((0, 2)).unwrap();
        engine.reveal((1, 0)).unwrap();
        engine.reveal((2, 2)).unwrap();

        engine.reveal_all_mines();

        assert_eq!(engine.status(), GameStatus::Lost);
        assert_eq!(engine.cell_at((0, 0)).unwrap(), CellView::Mine);
        assert_eq!(engine.cell_at((0, 2)).unwrap(), CellView::Mine);
        assert_eq!(engine.cell_at((2, 2)).unwrap(), CellView::Exploded);
        assert_eq!(engine.cell_at((1, 0)).unwrap(), CellView::Open(1));
        assert_eq!(engine.cell_at((1, 1)).unwrap(), CellView::Hidden);
        assert_eq!(engine.flagged_count(), 0);
        assert_eq!(engine.mines_left(), 3);
    }

    #[test]
    fn reveal_all_mines_is_ignored_while_playing() {
        let mut engine = BoardEngine::new(layout((3, 3), &[(0, 0)]));
        let before = engine.clone();

        engine.reveal_all_mines();

        assert_eq!(engine, before);
    }

    #[test]
    fn initialize_rejects_bad_config() {
        assert_eq!(
            BoardEngine::initialize(3, 3, 9),
            Err(GameError::Config(ConfigError::TooManyMines { mines: 9, cells: 9 }))
        );
        assert_eq!(
            BoardEngine::initialize(0, 3, 1),
            Err(GameError::Config(ConfigError::EmptyBoard))
        );
    }

    #[test]
    fn initialize_starts_hidden_and_in_progress() {
        let engine = BoardEngine::initialize(10, 10, 10).unwrap();

        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.total_mines(), 10);
        assert_eq!(engine.mines_left(), 10);
        assert!(engine.cells().all(|(_, view)| view == CellView::Hidden));
        assert_eq!(engine.cells().count(), 100);
    }

    #[test]
    fn flood_reveals_blank_region_and_border_on_random_boards() {
        for seed in 0..32 {
            let config = GameConfig::new((12, 9), 14).unwrap();
            let mut engine =
                BoardEngine::generate(config, RandomLayoutGenerator::new(seed)).unwrap();
            let Some(start) = positions(engine.size()).find(|&c| {
                !engine.layout().contains_mine(c) && engine.layout().adjacent_mine_count(c) == 0
            }) else {
                continue;
            };

            engine.reveal(start).unwrap();

            for (coords, view) in engine.cells() {
                let neighbors = || engine.layout().neighbors(coords);
                match view {
                    CellView::Open(0) => {
                        assert!(neighbors().all(|n| !engine.cell_at(n).unwrap().is_closed()));
                    }
                    CellView::Open(_) => {
                        assert!(neighbors().any(|n| engine.cell_at(n).unwrap() == CellView::Open(0)));
                    }
                    CellView::Hidden => {}
                    other => panic!("unexpected {other:?} at {coords:?} for seed {seed}"),
                }
            }
            let won = unrevealed_safe_cells(&engine) == 0;
            assert_eq!(engine.status() == GameStatus::Won, won, "seed {seed}");
        }
    }
}
