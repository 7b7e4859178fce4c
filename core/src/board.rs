use alloc::vec::Vec;
use core::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::matching::{all_matches, run_through};
use crate::*;

/// What a renderer needs to place and texture one tile.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub id: TileId,
    pub index: CellIndex,
    pub coords: Coord2,
    pub category: Category,
    pub position: Point,
}

/// Fixed-size grid of tiles plus the swap currently in flight, if any.
///
/// Tiles live in an array of shape `(height, width)`, so slot `i` of the flat storage
/// always holds the tile whose [`Tile::index`] is `i`. A board starts out empty and
/// every operation except [`Board::generate`] fails with [`GameError::NotGenerated`]
/// until it has been populated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    config: BoardConfig,
    layout: Layout,
    tiles: Option<Array2<Tile>>,
    active: Option<SwapSequence>,
    next_id: u32,
}

/// Serialized form of a [`Board`], checked before it becomes one.
#[derive(Deserialize)]
struct BoardSnapshot {
    config: BoardConfig,
    tiles: Option<Array2<Tile>>,
    active: Option<SwapSequence>,
    next_id: u32,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = GameError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self> {
        let BoardSnapshot {
            config,
            tiles,
            active,
            next_id,
        } = snapshot;
        let mut board = Self::new(config)?;
        board.next_id = next_id;

        if let Some(tiles) = &tiles {
            let (width, height) = board.size();
            if tiles.dim() != (height.into(), width.into()) {
                return Err(GameError::InvalidBoardShape);
            }
            for (slot, tile) in tiles.iter().enumerate() {
                let index = tile.index();
                if usize::from(index) != slot
                    || tile.coords() != coords_of(index, width)
                    || tile.id().0 >= next_id
                {
                    return Err(GameError::InvalidSnapshot);
                }
            }
        }
        board.tiles = tiles;

        if let Some(sequence) = &active {
            board.tiles()?;
            let SwapRequest { index, target } = sequence.request();
            board.validate_index(index)?;
            board.validate_index(target)?;
        }
        board.active = active;
        Ok(board)
    }
}

impl Board {
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            layout: Layout::new(config.size),
            config,
            tiles: None,
            active: None,
            next_id: 0,
        })
    }

    /// Builds a populated board from rows of category characters (see
    /// [`Category::to_char`]). The size is taken from the text. No dedup pass runs,
    /// so the board may contain runs.
    pub fn from_rows(rows: &[&str], config: BoardConfig) -> Result<Self> {
        let height = Coord::try_from(rows.len()).map_err(|_| GameError::InvalidBoardShape)?;
        let width = rows.first().map_or(0, |row| row.chars().count());
        let width = Coord::try_from(width).map_err(|_| GameError::InvalidBoardShape)?;

        let mut board = Self::new(BoardConfig {
            size: (width, height),
            ..config
        })?;

        let mut tiles = Vec::with_capacity(board.total_tiles().into());
        for row in rows {
            if row.chars().count() != usize::from(width) {
                return Err(GameError::InvalidBoardShape);
            }
            for c in row.chars() {
                let index = tiles.len() as CellIndex;
                let id = board.fresh_id()?;
                let category = Category::from_char(c)?;
                tiles.push(Tile::with_category(id, index, coords_of(index, width), category));
            }
        }
        board.tiles = Some(board.shape_tiles(tiles)?);
        Ok(board)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn total_tiles(&self) -> CellIndex {
        self.config.total_tiles()
    }

    pub fn is_generated(&self) -> bool {
        self.tiles.is_some()
    }

    /// True while a swap sequence holds the board.
    pub fn is_locked(&self) -> bool {
        self.active.is_some()
    }

    pub fn phase(&self) -> SwapPhase {
        self.active
            .as_ref()
            .map_or(SwapPhase::Idle, SwapSequence::phase)
    }

    pub fn active_swap(&self) -> Option<&SwapSequence> {
        self.active.as_ref()
    }

    /// Motions the renderer should follow this tick; empty when idle.
    pub fn motions(&self) -> &[Motion] {
        match &self.active {
            Some(sequence) => sequence.motions(),
            None => &[],
        }
    }

    /// Throws away every tile and builds a new board from `source`, then rerolls
    /// tiles until no run of [`MATCH_LENGTH`] or more remains.
    ///
    /// Each tile is rerolled until neither its row nor its column run through it is
    /// a match, and tiles are only ever changed while they are being processed, so no
    /// run survives the processing of its last member.
    pub fn generate<S>(&mut self, source: &mut S) -> Result<()>
    where
        S: CategorySource + ?Sized,
    {
        if self.is_locked() {
            return Err(GameError::Locked);
        }

        if let Some(old) = self.tiles.take() {
            log::debug!("Discarding {} tiles before generating", old.len());
        }

        let (width, _) = self.size();
        let mut tiles = Vec::with_capacity(self.total_tiles().into());
        for index in 0..self.total_tiles() {
            let id = self.fresh_id()?;
            tiles.push(Tile::new(id, index, coords_of(index, width), source));
        }
        let mut tiles = self.shape_tiles(tiles)?;

        let mut total_rerolls = 0;
        for index in 0..self.total_tiles() {
            let coords = coords_of(index, width);
            let mut rerolls = 0;
            while Orientation::BOTH
                .into_iter()
                .any(|orientation| run_through(&tiles, coords, orientation).is_match())
            {
                if rerolls >= self.config.max_rerolls {
                    log::warn!(
                        "Gave up on tile {} after {} rerolls, category source looks degenerate",
                        index,
                        rerolls
                    );
                    return Err(GameError::GenerationStalled { index });
                }
                tiles[coords.to_nd_index()].reroll_category(source);
                rerolls += 1;
            }
            total_rerolls += rerolls;
        }

        log::debug!(
            "Generated {}x{} board with {} rerolls",
            self.width(),
            self.height(),
            total_rerolls
        );
        self.tiles = Some(tiles);
        Ok(())
    }

    /// [`Board::generate`] with a uniform, seeded source.
    pub fn generate_seeded(&mut self, seed: u64) -> Result<()> {
        self.generate(&mut RandomCategories::new(seed))
    }

    pub fn tile(&self, index: CellIndex) -> Result<&Tile> {
        let coords = self.validate_index(index)?;
        Ok(&self.tiles()?[coords.to_nd_index()])
    }

    pub fn category_at(&self, index: CellIndex) -> Result<Category> {
        self.tile(index).map(Tile::category)
    }

    /// Overwrites one tile's category. Not allowed while a swap is in flight.
    pub fn set_category(&mut self, index: CellIndex, category: Category) -> Result<()> {
        let coords = self.validate_index(index)?;
        if self.is_locked() {
            return Err(GameError::Locked);
        }
        self.tiles_mut()?[coords.to_nd_index()].set_category(category);
        Ok(())
    }

    /// All tiles in linear index order.
    pub fn iter_tiles(&self) -> Result<impl Iterator<Item = &Tile>> {
        Ok(self.tiles()?.iter())
    }

    /// Placement data for every tile, at rest in its slot.
    pub fn tile_views(&self) -> Result<Vec<TileView>> {
        Ok(self
            .iter_tiles()?
            .map(|tile| TileView {
                id: tile.id(),
                index: tile.index(),
                coords: tile.coords(),
                category: tile.category(),
                position: self.layout.slot_point(tile.coords()),
            })
            .collect())
    }

    /// Longest run of the tile's category through `index` along `orientation`. The
    /// tile alone counts as a run of one.
    pub fn detect_run(&self, index: CellIndex, orientation: Orientation) -> Result<Run> {
        let coords = self.validate_index(index)?;
        Ok(run_through(self.tiles()?, coords, orientation))
    }

    /// Every maximal run of at least [`MATCH_LENGTH`] tiles on the board.
    pub fn find_matches(&self) -> Result<Vec<Run>> {
        Ok(all_matches(self.tiles()?))
    }

    pub fn has_matches(&self) -> Result<bool> {
        Ok(!self.find_matches()?.is_empty())
    }

    /// Starts swapping the tile at `index` with its neighbour in `direction`.
    ///
    /// Rejections leave the board untouched. On success the board is locked until
    /// [`Board::tick`] reports [`SwapProgress::Finished`] or the swap is cancelled.
    pub fn request_swap(&mut self, index: CellIndex, direction: Direction) -> Result<SwapRequest> {
        self.tiles()?;
        self.validate_index(index)?;
        if self.is_locked() {
            log::debug!("Swap from {} rejected, board is locked", index);
            return Err(GameError::Locked);
        }

        let delta = self.config.direction_mode.delta(direction, self.width());
        let target = CellIndex::try_from(i32::from(index) + delta)
            .ok()
            .filter(|&target| target < self.total_tiles())
            .ok_or(GameError::OutOfRange)?;

        if self.config.direction_mode == DirectionMode::Corrected
            && matches!(direction, Direction::Left | Direction::Right)
            && coords_of(index, self.width()).1 != coords_of(target, self.width()).1
        {
            return Err(GameError::NotAdjacent);
        }

        let request = SwapRequest { index, target };
        log::debug!("Swap {:?} accepted ({:?})", request, direction);
        let motions = self.crossing_motions(request)?;
        self.active = Some(SwapSequence::new(request, motions));
        Ok(request)
    }

    /// Resumes the swap in flight by one scheduler tick of `dt` seconds.
    pub fn tick(&mut self, animator: &mut impl Animator, dt: f32) -> Result<SwapProgress> {
        let Some(mut sequence) = self.active.take() else {
            return Ok(SwapProgress::Idle);
        };
        let progress = self.advance(&mut sequence, animator, dt);
        if progress.is_err() || sequence.phase() != SwapPhase::Idle {
            self.active = Some(sequence);
        }
        progress
    }

    /// Ticks until the swap in flight is over. Returns `None` when nothing was running.
    pub fn run_to_completion(
        &mut self,
        animator: &mut impl Animator,
        dt: f32,
    ) -> Result<Option<SwapOutcome>> {
        if !self.is_locked() {
            return Ok(None);
        }
        loop {
            if let SwapProgress::Finished(outcome) = self.tick(animator, dt)? {
                return Ok(Some(outcome));
            }
        }
    }

    /// Aborts the swap in flight, putting both tiles back in their original slots and
    /// releasing the lock. Returns whether a swap was running.
    pub fn cancel_swap(&mut self) -> Result<bool> {
        let Some(sequence) = self.active.take() else {
            return Ok(false);
        };
        if sequence.is_applied() {
            if let Err(err) = self.apply_swap(sequence.request()) {
                self.active = Some(sequence);
                return Err(err);
            }
        }
        log::debug!(
            "Swap {:?} cancelled during {:?}",
            sequence.request(),
            sequence.phase()
        );
        Ok(true)
    }

    fn advance(
        &mut self,
        sequence: &mut SwapSequence,
        animator: &mut impl Animator,
        dt: f32,
    ) -> Result<SwapProgress> {
        use SwapPhase::*;

        let request = sequence.request();
        match sequence.phase() {
            SwappingOut => {
                if !sequence.animate(animator, dt, self.config.max_ticks_per_phase) {
                    return Ok(SwapProgress::Moving(SwappingOut));
                }
                self.apply_swap(request)?;
                sequence.toggle_applied();
                sequence.enter(Validating, Vec::new());
                Ok(SwapProgress::Committed(request))
            }
            Validating => {
                if self.config.match_policy == MatchPolicy::KeepMatches {
                    let runs = self.runs_through(&[request.index, request.target])?;
                    if !runs.is_empty() {
                        log::debug!("Swap {:?} kept, {} runs", request, runs.len());
                        sequence.enter(Idle, Vec::new());
                        return Ok(SwapProgress::Finished(SwapOutcome::Kept { runs }));
                    }
                }
                sequence.enter(SwappingBack, self.crossing_motions(request)?);
                Ok(SwapProgress::Moving(SwappingBack))
            }
            SwappingBack => {
                if !sequence.animate(animator, dt, self.config.max_ticks_per_phase) {
                    return Ok(SwapProgress::Moving(SwappingBack));
                }
                self.apply_swap(request)?;
                sequence.toggle_applied();
                sequence.enter(Idle, Vec::new());
                Ok(SwapProgress::Finished(SwapOutcome::Reverted))
            }
            Idle => Ok(SwapProgress::Idle),
        }
    }

    /// Motions carrying the tile in each slot of `request` to the other slot.
    fn crossing_motions(&self, request: SwapRequest) -> Result<Vec<Motion>> {
        let from = self.tile(request.index)?;
        let to = self.tile(request.target)?;
        let from_point = self.layout.slot_point(from.coords());
        let to_point = self.layout.slot_point(to.coords());
        Ok(alloc::vec![
            Motion {
                tile: from.id(),
                current: from_point,
                target: to_point,
            },
            Motion {
                tile: to.id(),
                current: to_point,
                target: from_point,
            },
        ])
    }

    /// Exchanges the positions of the two tiles and moves them into each other's slot.
    fn apply_swap(&mut self, SwapRequest { index, target }: SwapRequest) -> Result<()> {
        let a = self.validate_index(index)?.to_nd_index();
        let b = self.validate_index(target)?.to_nd_index();
        let tiles = self.tiles_mut()?;

        let mut first = tiles[a].clone();
        let mut second = tiles[b].clone();
        first.swap_position_with(&mut second);
        tiles[a] = second;
        tiles[b] = first;
        Ok(())
    }

    /// Matches through any of `indices`, each run reported once.
    fn runs_through(&self, indices: &[CellIndex]) -> Result<Vec<Run>> {
        let mut runs: Vec<Run> = Vec::new();
        for &index in indices {
            for orientation in Orientation::BOTH {
                let run = self.detect_run(index, orientation)?;
                if run.is_match() && !runs.contains(&run) {
                    runs.push(run);
                }
            }
        }
        Ok(runs)
    }

    fn validate_index(&self, index: CellIndex) -> Result<Coord2> {
        if index < self.total_tiles() {
            Ok(coords_of(index, self.width()))
        } else {
            Err(GameError::OutOfRange)
        }
    }

    fn tiles(&self) -> Result<&Array2<Tile>> {
        self.tiles.as_ref().ok_or(GameError::NotGenerated)
    }

    fn tiles_mut(&mut self) -> Result<&mut Array2<Tile>> {
        self.tiles.as_mut().ok_or(GameError::NotGenerated)
    }

    /// Ids are never reused over the lifetime of a board, regenerations included.
    fn fresh_id(&mut self) -> Result<TileId> {
        let id = TileId(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(GameError::IdsExhausted)?;
        Ok(id)
    }

    fn shape_tiles(&self, tiles: Vec<Tile>) -> Result<Array2<Tile>> {
        let (width, height) = self.size();
        Array2::from_shape_vec((height.into(), width.into()), tiles)
            .map_err(|_| GameError::InvalidBoardShape)
    }
}

impl fmt::Display for Board {
    /// One line per row of category characters, `-` for every slot of an
    /// ungenerated board.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.size();
        for y in 0..height {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..width {
                let c = match &self.tiles {
                    Some(tiles) => tiles[(x, y).to_nd_index()].category().to_char(),
                    None => '-',
                };
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;
    use Category::*;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows, BoardConfig::default()).unwrap()
    }

    fn snapshot(board: &Board) -> Vec<Tile> {
        board.iter_tiles().unwrap().cloned().collect()
    }

    const PLAIN: [&str; 3] = ["MAN", "IRS", "GMA"];

    #[test]
    fn operations_fail_before_generation() {
        let mut board = Board::new(BoardConfig::default()).unwrap();

        assert!(!board.is_generated());
        assert_eq!(board.tile(0), Err(GameError::NotGenerated));
        assert_eq!(
            board.detect_run(0, Orientation::Horizontal),
            Err(GameError::NotGenerated)
        );
        assert_eq!(board.find_matches(), Err(GameError::NotGenerated));
        assert_eq!(
            board.request_swap(7, Direction::Right),
            Err(GameError::NotGenerated)
        );
        assert_eq!(board.set_category(0, Pig), Err(GameError::NotGenerated));
        assert!(!board.is_locked());
    }

    #[test]
    fn zero_sized_config_is_rejected() {
        let config = BoardConfig::new_unchecked((0, 6));
        assert_eq!(Board::new(config), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn generate_places_every_tile() {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        board.generate_seeded(42).unwrap();

        for (i, tile) in board.iter_tiles().unwrap().enumerate() {
            let index = i as CellIndex;
            assert_eq!(tile.index(), index);
            assert_eq!(tile.coords(), coords_of(index, 6), "{}", tile);
        }
    }

    #[test]
    fn generate_leaves_no_matches() {
        for seed in 0..200 {
            let mut board = Board::new(BoardConfig::default()).unwrap();
            board.generate_seeded(seed).unwrap();
            let matches = board.find_matches().unwrap();
            assert!(matches.is_empty(), "seed {}\n{}", seed, board);
        }
    }

    #[test]
    fn generate_handles_non_square_boards() {
        let mut board = Board::new(BoardConfig::new((8, 3))).unwrap();
        board.generate_seeded(9).unwrap();

        assert!(!board.has_matches().unwrap());
        let last = board.tile(23).unwrap();
        assert_eq!(last.coords(), (7, 2));
    }

    #[test]
    fn generate_is_a_hard_reset() {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        board.generate_seeded(1).unwrap();
        let first_ids: Vec<_> = board.iter_tiles().unwrap().map(Tile::id).collect();

        board.generate_seeded(1).unwrap();
        let second_ids: Vec<_> = board.iter_tiles().unwrap().map(Tile::id).collect();

        assert!(first_ids.iter().all(|id| !second_ids.contains(id)));
    }

    #[test]
    fn constant_source_stalls_generation() {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        let mut source = || Monkey;

        assert_eq!(
            board.generate(&mut source),
            Err(GameError::GenerationStalled { index: 0 })
        );
        assert!(!board.is_generated());
    }

    #[test]
    fn generate_rejected_while_locked() {
        let mut board = board(&PLAIN);
        board.request_swap(4, Direction::Right).unwrap();

        assert_eq!(board.generate_seeded(3), Err(GameError::Locked));
    }

    #[test]
    fn from_rows_checks_shape() {
        assert_eq!(
            Board::from_rows(&["MA", "M"], BoardConfig::default()),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            Board::from_rows(&["MX"], BoardConfig::default()),
            Err(GameError::InvalidCategory('X'))
        );
        assert_eq!(
            Board::from_rows(&[], BoardConfig::default()),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn display_prints_rows() {
        assert_eq!(board(&PLAIN).to_string(), "MAN\nIRS\nGMA");
        let empty = Board::new(BoardConfig::new((2, 2))).unwrap();
        assert_eq!(format!("{}", empty), "--\n--");
    }

    #[test]
    fn detect_run_stops_at_first_mismatch() {
        let board = board(&["MMMAM"]);

        let run = board.detect_run(0, Orientation::Horizontal).unwrap();
        assert_eq!(run.indices, [0, 1, 2]);
        assert_eq!(run.category, Monkey);

        assert_eq!(board.detect_run(4, Orientation::Horizontal).unwrap().len(), 1);
        assert_eq!(board.detect_run(3, Orientation::Vertical).unwrap().indices, [3]);
        assert_eq!(
            board.detect_run(5, Orientation::Vertical),
            Err(GameError::OutOfRange)
        );
    }

    #[test]
    fn detect_run_in_column() {
        let board = board(&["MA", "NA", "IA", "RS"]);

        let run = board.detect_run(3, Orientation::Vertical).unwrap();
        assert_eq!(run.indices, [1, 3, 5]);
        assert!(run.is_match());
        assert_eq!(board.find_matches().unwrap(), [run]);
    }

    #[test]
    fn set_category_overwrites() {
        let mut board = board(&PLAIN);
        board.set_category(4, Giraffe).unwrap();
        assert_eq!(board.category_at(4), Ok(Giraffe));
        assert_eq!(board.set_category(9, Giraffe), Err(GameError::OutOfRange));
    }

    #[test]
    fn out_of_range_target_is_rejected_without_change() {
        let config = BoardConfig::default().with_direction_mode(DirectionMode::Aliased);
        let mut board = Board::from_rows(&PLAIN, config).unwrap();
        let before = snapshot(&board);

        assert_eq!(board.request_swap(0, Direction::Left), Err(GameError::OutOfRange));
        assert_eq!(board.request_swap(0, Direction::Up), Err(GameError::OutOfRange));
        assert_eq!(board.request_swap(2, Direction::Down), Err(GameError::OutOfRange));
        assert_eq!(board.request_swap(9, Direction::Up), Err(GameError::OutOfRange));

        assert!(!board.is_locked());
        assert_eq!(snapshot(&board), before);
    }

    #[test]
    fn aliased_mode_wraps_rows() {
        let config = BoardConfig::default().with_direction_mode(DirectionMode::Aliased);
        let mut board = Board::from_rows(&PLAIN, config).unwrap();

        let request = board.request_swap(3, Direction::Right).unwrap();
        assert_eq!(request, SwapRequest { index: 3, target: 2 });
    }

    #[test]
    fn corrected_mode_rejects_row_wrap() {
        let mut board = board(&PLAIN);

        assert_eq!(board.request_swap(2, Direction::Right), Err(GameError::NotAdjacent));
        assert_eq!(board.request_swap(3, Direction::Left), Err(GameError::NotAdjacent));
        assert_eq!(board.request_swap(7, Direction::Down), Err(GameError::OutOfRange));

        let request = board.request_swap(1, Direction::Down).unwrap();
        assert_eq!(request, SwapRequest { index: 1, target: 4 });
    }

    #[test]
    fn locked_board_rejects_second_request() {
        let mut board = board(&PLAIN);
        board.request_swap(4, Direction::Left).unwrap();
        let before = snapshot(&board);

        assert!(board.is_locked());
        assert_eq!(board.phase(), SwapPhase::SwappingOut);
        assert_eq!(board.request_swap(0, Direction::Right), Err(GameError::Locked));
        assert_eq!(board.set_category(0, Pig), Err(GameError::Locked));
        assert_eq!(snapshot(&board), before);
    }

    #[test]
    fn swap_sequence_reverts_under_reference_policy() {
        let mut board = board(&PLAIN);
        let before = snapshot(&board);
        let request = board.request_swap(4, Direction::Right).unwrap();
        let mut animator = InstantAnimator;

        assert_eq!(
            board.tick(&mut animator, 0.0).unwrap(),
            SwapProgress::Committed(request)
        );
        // mid-sequence the tiles really are swapped
        assert_eq!(board.category_at(4), Ok(Snake));
        assert_eq!(board.category_at(5), Ok(Rabbit));
        assert_eq!(board.tile(5).unwrap().id(), before[4].id());
        assert_eq!(board.phase(), SwapPhase::Validating);

        assert_eq!(
            board.tick(&mut animator, 0.0).unwrap(),
            SwapProgress::Moving(SwapPhase::SwappingBack)
        );
        assert_eq!(
            board.tick(&mut animator, 0.0).unwrap(),
            SwapProgress::Finished(SwapOutcome::Reverted)
        );

        assert!(!board.is_locked());
        assert_eq!(snapshot(&board), before);
        assert_eq!(board.tick(&mut animator, 0.0).unwrap(), SwapProgress::Idle);
    }

    #[test]
    fn motions_cross_between_slots() {
        let mut board = board(&PLAIN);
        board.request_swap(0, Direction::Right).unwrap();

        let motions = board.motions();
        assert_eq!(motions.len(), 2);
        assert_eq!(motions[0].current, board.layout().slot_point((0, 0)));
        assert_eq!(motions[0].target, board.layout().slot_point((1, 0)));
        assert_eq!(motions[1].current, motions[0].target);
        assert_eq!(motions[1].target, motions[0].current);

        let mut animator = LinearAnimator::new(5.0);
        assert_eq!(
            board.tick(&mut animator, 0.1).unwrap(),
            SwapProgress::Moving(SwapPhase::SwappingOut)
        );
        let start = board.layout().slot_point((0, 0));
        assert_eq!(board.motions()[0].current, Point::new(start.x + 0.5, start.y));
    }

    #[test]
    fn keep_matches_commits_a_matching_swap() {
        let config = BoardConfig::default().with_match_policy(MatchPolicy::KeepMatches);
        let mut board = Board::from_rows(&["MMAM", "NIRS"], config).unwrap();

        board.request_swap(2, Direction::Right).unwrap();
        let outcome = board.run_to_completion(&mut InstantAnimator, 0.0).unwrap();

        let Some(SwapOutcome::Kept { runs }) = outcome else {
            panic!("expected the swap to be kept, got {:?}", outcome);
        };
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].indices, [0, 1, 2]);
        assert_eq!(board.to_string(), "MMMA\nNIRS");
        assert!(!board.is_locked());
    }

    #[test]
    fn keep_matches_reverts_without_a_match() {
        let config = BoardConfig::default().with_match_policy(MatchPolicy::KeepMatches);
        let mut board = Board::from_rows(&PLAIN, config).unwrap();

        board.request_swap(0, Direction::Down).unwrap();
        let outcome = board.run_to_completion(&mut InstantAnimator, 0.0).unwrap();

        assert_eq!(outcome, Some(SwapOutcome::Reverted));
        assert_eq!(board.to_string(), "MAN\nIRS\nGMA");
    }

    #[test]
    fn cancel_restores_tiles_and_unlocks() {
        let mut board = board(&PLAIN);
        let before = snapshot(&board);
        assert_eq!(board.cancel_swap(), Ok(false));

        board.request_swap(4, Direction::Up).unwrap();
        board.tick(&mut InstantAnimator, 0.0).unwrap();
        assert_eq!(board.phase(), SwapPhase::Validating);

        assert_eq!(board.cancel_swap(), Ok(true));
        assert!(!board.is_locked());
        assert!(board.motions().is_empty());
        assert_eq!(snapshot(&board), before);
        board.request_swap(4, Direction::Up).unwrap();
    }

    #[test]
    fn tile_ids_are_never_reused() {
        let mut board = Board::new(BoardConfig::new((2, 2))).unwrap();
        board.next_id = u32::MAX - 2;

        assert_eq!(board.generate_seeded(1), Err(GameError::IdsExhausted));
        assert!(!board.is_generated());
    }

    #[test]
    fn failed_tick_keeps_the_lock() {
        let mut board = board(&PLAIN);
        board.request_swap(4, Direction::Right).unwrap();
        board.tick(&mut InstantAnimator, 0.0).unwrap();
        let tiles = board.tiles.take();

        assert_eq!(
            board.tick(&mut InstantAnimator, 0.0),
            Err(GameError::NotGenerated)
        );
        assert_eq!(board.cancel_swap(), Err(GameError::NotGenerated));
        assert!(board.is_locked());

        board.tiles = tiles;
        assert_eq!(board.cancel_swap(), Ok(true));
        assert_eq!(board.to_string(), "MAN\nIRS\nGMA");
    }

    #[test]
    fn tile_views_follow_layout() {
        let board = board(&PLAIN);
        let views = board.tile_views().unwrap();

        assert_eq!(views.len(), 9);
        assert_eq!(views[5].coords, (2, 1));
        assert_eq!(views[5].category, Snake);
        assert_eq!(views[5].position, board.layout().slot_point((2, 1)));
    }
}
