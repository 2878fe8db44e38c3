//! Puzzle engine - one board, one gesture at a time
//!
//! [`PuzzleEngine`] is the whole contract a presentation layer sees. Input
//! goes in through the `on_*` methods; everything else is pulled: tiles,
//! the busy flag, the last committed shift, and the current match groups.
//! Every call runs to completion before returning, so a caller never sees a
//! half-shifted board.

use chuzzle_board_core::{
    BoardSnapshot, GenerationHeuristic, GridModel, MatchDetector, MatchGroup, SimpleRng,
};
use chuzzle_board_types::{
    BoardConfig, BoardError, Cell, ConfigError, Direction, DragDelta, Shift, Tile, MAX_BOARD_SIDE,
};

use crate::gesture::{GestureController, GestureError, Resolution};

#[derive(Debug, Clone)]
pub struct PuzzleEngine {
    config: BoardConfig,
    grid: GridModel,
    detector: MatchDetector,
    gestures: GestureController,
    last_shift: Option<Shift>,
}

impl PuzzleEngine {
    /// Validate `config` and deal a board from `seed`
    pub fn new(config: BoardConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SimpleRng::new(seed);
        let grid = GenerationHeuristic::from_config(&config)
            .generate(config.rows, config.columns, &mut rng)
            .map_err(|_| dimensions_error(&config))?;
        Ok(Self::assemble(config, grid))
    }

    /// Wrap an existing board; its dimensions replace the configured ones
    ///
    /// Every tile must use one of the configured `palette_size` colors.
    pub fn with_grid(config: BoardConfig, grid: GridModel) -> Result<Self, ConfigError> {
        let config = config.with_dimensions(grid.rows(), grid.columns());
        config.validate()?;
        grid.check_palette(config.palette_size)?;
        Ok(Self::assemble(config, grid))
    }

    fn assemble(config: BoardConfig, grid: GridModel) -> Self {
        Self {
            detector: MatchDetector::new(config.min_match_count),
            gestures: GestureController::from_config(&config),
            config,
            grid,
            last_shift: None,
        }
    }

    pub fn on_press_start(&mut self, cell: Cell) -> Result<(), GestureError> {
        self.gestures.on_press(&self.grid, cell)
    }

    pub fn on_drag_delta(&mut self, delta: DragDelta) -> Result<(), GestureError> {
        self.gestures.on_drag(delta)
    }

    pub fn on_release(&mut self) -> Result<Resolution, GestureError> {
        let resolution = self.gestures.on_release(&mut self.grid, &self.detector)?;
        if let Resolution::Committed(shift) = resolution {
            self.last_shift = Some(shift);
        }
        Ok(resolution)
    }

    pub fn on_cancel(&mut self) -> Result<(), GestureError> {
        self.gestures.on_cancel()
    }

    pub fn tile_at(&self, row: usize, col: usize) -> Result<Tile, BoardError> {
        self.grid.get(row, col)
    }

    pub fn is_busy(&self) -> bool {
        self.gestures.is_busy()
    }

    /// The most recent shift that stayed applied
    pub fn last_committed_shift(&self) -> Option<Shift> {
        self.last_shift
    }

    pub fn current_match_groups(&self) -> Vec<MatchGroup> {
        self.detector.find_all_match_groups(&self.grid)
    }

    /// Locked direction and step count of the drag in progress
    pub fn drag_preview(&self) -> Option<(Direction, i32)> {
        self.gestures.preview()
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn detector(&self) -> &MatchDetector {
        &self.detector
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        self.grid.snapshot_into(out);
        out.busy = self.is_busy();
        out.last_shift = self.last_shift;
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut out = BoardSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}

fn dimensions_error(config: &BoardConfig) -> ConfigError {
    ConfigError::Dimensions {
        rows: config.rows,
        columns: config.columns,
        max: MAX_BOARD_SIDE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chuzzle_board_types::{Axis, GenerationPolicy};

    fn engine(text: &str) -> PuzzleEngine {
        PuzzleEngine::with_grid(BoardConfig::default(), GridModel::parse(text).unwrap()).unwrap()
    }

    #[test]
    fn test_new_validates_config() {
        let bad = BoardConfig::default().with_palette_size(2);
        assert_eq!(
            PuzzleEngine::new(bad, 1).unwrap_err(),
            ConfigError::PaletteSize(2)
        );

        let bad = BoardConfig::default().with_dimensions(0, 6);
        assert!(matches!(
            PuzzleEngine::new(bad, 1),
            Err(ConfigError::Dimensions { .. })
        ));
    }

    #[test]
    fn test_new_deals_configured_board() {
        let config = BoardConfig::default()
            .with_dimensions(5, 8)
            .with_palette_size(4)
            .with_generation(GenerationPolicy::Strict);
        let engine = PuzzleEngine::new(config, 77).unwrap();
        assert_eq!(engine.grid().rows(), 5);
        assert_eq!(engine.grid().columns(), 8);
        assert!(engine.current_match_groups().is_empty());
        assert!(!engine.is_busy());
        assert_eq!(engine.last_committed_shift(), None);
    }

    #[test]
    fn test_with_grid_takes_grid_dimensions() {
        let engine = engine("bgo\nprw");
        assert_eq!(engine.config().rows, 2);
        assert_eq!(engine.config().columns, 3);
        assert_eq!(engine.tile_at(1, 2).unwrap().color.symbol(), 'w');
        assert!(engine.tile_at(2, 0).is_err());
    }

    #[test]
    fn test_with_grid_rejects_colors_outside_palette() {
        // 'n' is the tenth color; the default palette deals seven.
        let grid = GridModel::parse("bgn\nprw").unwrap();
        assert_eq!(
            PuzzleEngine::with_grid(BoardConfig::default(), grid.clone()).unwrap_err(),
            ConfigError::Board(BoardError::ColorOutOfPalette {
                color: 9,
                palette_size: 7
            })
        );

        let config = BoardConfig::default().with_palette_size(10);
        assert!(PuzzleEngine::with_grid(config, grid).is_ok());
    }

    #[test]
    fn test_busy_during_drag_only() {
        let mut engine = engine("bgo\nprw");
        engine.on_press_start(Cell::new(0, 0)).unwrap();
        assert!(engine.is_busy());
        assert_eq!(
            engine.on_press_start(Cell::new(1, 1)),
            Err(GestureError::AlreadyDragging)
        );
        engine.on_cancel().unwrap();
        assert!(!engine.is_busy());
    }

    #[test]
    fn test_commit_records_last_shift() {
        let mut engine = engine(
            "rrgb\n\
             bopr",
        );
        engine.on_press_start(Cell::new(1, 3)).unwrap();
        engine.on_drag_delta(DragDelta::new(0.0, -0.5)).unwrap();
        engine.on_drag_delta(DragDelta::new(0.0, -0.7)).unwrap();
        assert_eq!(engine.drag_preview(), Some((Direction::Down, -1)));

        // The red lands beside the green: no match, rolled back.
        let resolution = engine.on_release().unwrap();
        assert_eq!(resolution, Resolution::RolledBack(Shift::new(Axis::Column, 3, -1)));
        assert_eq!(engine.last_committed_shift(), None);

        engine.on_press_start(Cell::new(0, 2)).unwrap();
        engine.on_drag_delta(DragDelta::new(0.0, 1.2)).unwrap();
        let resolution = engine.on_release().unwrap();
        assert_eq!(resolution, Resolution::RolledBack(Shift::new(Axis::Column, 2, 1)));

        // Row 1 right by one wraps its red under the red pair.
        engine.on_press_start(Cell::new(1, 0)).unwrap();
        engine.on_drag_delta(DragDelta::new(1.2, 0.0)).unwrap();
        let resolution = engine.on_release().unwrap();
        let shift = Shift::new(Axis::Row, 1, 1);
        assert_eq!(resolution, Resolution::Committed(shift));
        assert_eq!(engine.last_committed_shift(), Some(shift));
        assert_eq!(engine.grid().to_string(), "rrgb\nrbop\n");
    }

    #[test]
    fn test_snapshot_carries_engine_state() {
        let mut engine = engine("bgo\nprw");
        engine.on_press_start(Cell::new(0, 0)).unwrap();

        let mut snap = BoardSnapshot::default();
        engine.snapshot_into(&mut snap);
        assert!(snap.busy);
        assert_eq!(snap.rows, 2);
        assert_eq!(snap.tiles.len(), 6);
        assert_eq!(snap.last_shift, None);
    }
}
