use serde::{Deserialize, Serialize};

use crate::{
    Board, CellCount, Coord2, Difficulty, GameConfig, MineGenerator, RandomMineGenerator,
};

/// Ceiling of the elapsed-time counter. Reaching it stops the clock without
/// ending the session.
pub const MAX_ELAPSED_SECS: u16 = 999;

/// Valid transitions: Playing -> Won and Playing -> Lost. Both ends are
/// terminal; only a reset produces a Playing session again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Playing
    }
}

/// Outcome of a left-click.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl ClickOutcome {
    /// Whether this outcome could have caused an update to the board.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of a right-click.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the board.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// One game session from fresh board to terminal state.
///
/// The board starts empty and mine-free; mines are committed on the first
/// left-click so the clicked 3x3 neighborhood is always safe. All invalid
/// interactions are silent no-ops.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    difficulty: Difficulty,
    board: Board,
    first_click_taken: bool,
    flag_count: CellCount,
    elapsed_secs: u16,
    timer_running: bool,
    status: GameStatus,
    seed: u64,
}

impl Game {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let config = difficulty.config();
        Self {
            difficulty,
            board: Board::empty(config.rows, config.cols),
            first_click_taken: false,
            flag_count: 0,
            elapsed_secs: 0,
            timer_running: false,
            status: GameStatus::default(),
            seed,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> GameConfig {
        self.difficulty.config()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config().mines
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines have not been flagged yet. Negative when the player
    /// over-flags.
    pub fn mines_left(&self) -> isize {
        self.total_mines() as isize - self.flag_count as isize
    }

    pub fn elapsed_secs(&self) -> u16 {
        self.elapsed_secs
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn first_click_taken(&self) -> bool {
        self.first_click_taken
    }

    /// Snapshot of one cell. `coords` must be in bounds.
    pub fn cell_at(&self, coords: Coord2) -> crate::Cell {
        self.board[coords]
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Reveals a cell, placing mines first if this is the opening click.
    pub fn left_click(&mut self, coords: Coord2) -> ClickOutcome {
        let mut generator = RandomMineGenerator::new(self.seed);
        self.left_click_with(coords, &mut generator)
    }

    /// [`Game::left_click`] with an explicit placement strategy.
    pub fn left_click_with(
        &mut self,
        coords: Coord2,
        generator: &mut dyn MineGenerator,
    ) -> ClickOutcome {
        if !self.status.is_playing() || !self.board.in_bounds(coords) {
            return ClickOutcome::NoChange;
        }

        if !self.first_click_taken {
            let forbidden = self.board.forbidden_around(coords);
            let config = self.config();
            let mut board = Board::empty(config.rows, config.cols);
            generator.place(&mut board, config.mines, &forbidden);
            self.board = board;
            self.first_click_taken = true;
            self.elapsed_secs = 0;
            self.timer_running = true;
            log::debug!("first click at {:?}, mines committed", coords);
        }

        let cell = self.board[coords];
        if !cell.can_reveal() {
            // the freshly committed board, if any, stays
            return ClickOutcome::NoChange;
        }

        if cell.is_mine {
            self.board.reveal_all_mines(true);
            self.finish(false);
            return ClickOutcome::Exploded;
        }

        self.board[coords].is_revealed = true;
        if self.board[coords].adjacent_mines == 0 {
            self.board.flood_reveal(coords);
        }
        log::debug!(
            "revealed {:?}, adjacent mines: {}",
            coords,
            cell.adjacent_mines
        );

        if self.board.is_cleared() {
            self.board.reveal_all_mines(false);
            self.finish(true);
            ClickOutcome::Won
        } else {
            ClickOutcome::Revealed
        }
    }

    /// Toggles a flag. No-op before the first left-click, on revealed cells,
    /// and once the session is over.
    pub fn right_click(&mut self, coords: Coord2) -> FlagOutcome {
        if !self.status.is_playing() || !self.first_click_taken {
            return FlagOutcome::NoChange;
        }
        if !self.board.in_bounds(coords) || self.board[coords].is_revealed {
            return FlagOutcome::NoChange;
        }

        let flagged = !self.board[coords].is_flagged;
        self.board[coords].is_flagged = flagged;
        if flagged {
            self.flag_count += 1;
        } else {
            self.flag_count = self.flag_count.saturating_sub(1);
        }

        // win re-check after every toggle; flagging alone never reveals a cell
        if self.board.is_cleared() {
            self.board.reveal_all_mines(false);
            self.finish(true);
        }

        if flagged {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::Unflagged
        }
    }

    /// One 1-second timer tick. Returns whether the displayed time changed.
    pub fn tick(&mut self) -> bool {
        if !self.timer_running {
            return false;
        }
        self.elapsed_secs += 1;
        if self.elapsed_secs >= MAX_ELAPSED_SECS {
            self.elapsed_secs = MAX_ELAPSED_SECS;
            self.timer_running = false;
        }
        true
    }

    /// Discards the session: fresh empty board, flags and time cleared,
    /// first click re-armed.
    pub fn reset(&mut self, seed: u64) {
        log::debug!("reset, difficulty {:?}", self.difficulty);
        *self = Self::new(self.difficulty, seed);
    }

    /// Like [`Game::reset`], but switching to a new preset.
    pub fn set_difficulty(&mut self, difficulty: Difficulty, seed: u64) {
        log::debug!("difficulty change to {:?}", difficulty);
        *self = Self::new(difficulty, seed);
    }

    fn finish(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }
        self.timer_running = false;
        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        log::debug!("game over: {:?}", self.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedMineGenerator;

    /// Easy board with a wall of mines down column 2 (8 mines). The first
    /// click at (4, 5) floods columns 3..=9; columns 0 and 1 stay hidden.
    fn wall_generator() -> FixedMineGenerator {
        FixedMineGenerator::new((0..8).map(|row| (row, 2)).collect())
    }

    fn walled_game() -> Game {
        let mut game = Game::new(Difficulty::Easy, 0);
        let outcome = game.left_click_with((4, 5), &mut wall_generator());
        assert_eq!(outcome, ClickOutcome::Revealed);
        game
    }

    #[test]
    fn presets_have_consistent_arithmetic() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            let total = config.total_cells();
            assert_eq!(total - config.mines, config.safe_cells());
            assert!(config.mines < total);
        }
    }

    #[test]
    fn first_click_is_safe_and_starts_the_timer() {
        for seed in 0..20 {
            let mut game = Game::new(Difficulty::Easy, seed);
            assert!(!game.timer_running());

            let outcome = game.left_click((4, 5));

            assert_eq!(outcome, ClickOutcome::Revealed);
            assert_eq!(game.status(), GameStatus::Playing);
            assert!(game.first_click_taken());
            assert_eq!(game.board().mine_count(), 10);
            assert!(game.cell_at((4, 5)).is_revealed);

            // no mine on the clicked cell nor any of its 8 neighbors
            assert!(!game.cell_at((4, 5)).is_mine);
            for pos in game.board().neighbors((4, 5)) {
                assert!(!game.cell_at(pos).is_mine);
            }

            assert!(game.timer_running());
            assert_eq!(game.elapsed_secs(), 0);
            assert!(game.tick());
            assert_eq!(game.elapsed_secs(), 1);
        }
    }

    #[test]
    fn clicks_out_of_bounds_are_ignored() {
        let mut game = Game::new(Difficulty::Easy, 1);
        assert_eq!(game.left_click((8, 0)), ClickOutcome::NoChange);
        assert_eq!(game.left_click((0, 10)), ClickOutcome::NoChange);
        assert!(!game.first_click_taken());
        assert_eq!(game.right_click((200, 200)), FlagOutcome::NoChange);
    }

    #[test]
    fn cannot_flag_before_the_first_click() {
        let mut game = Game::new(Difficulty::Easy, 2);
        assert_eq!(game.right_click((0, 0)), FlagOutcome::NoChange);
        assert_eq!(game.flag_count(), 0);
    }

    #[test]
    fn flag_toggle_adjusts_the_counter() {
        let mut game = walled_game();

        assert_eq!(game.right_click((0, 0)), FlagOutcome::Flagged);
        assert_eq!(game.flag_count(), 1);
        assert_eq!(game.mines_left(), 9);

        assert_eq!(game.right_click((0, 0)), FlagOutcome::Unflagged);
        assert_eq!(game.flag_count(), 0);
        assert_eq!(game.mines_left(), 10);
    }

    #[test]
    fn flagging_a_revealed_cell_is_ignored() {
        let mut game = walled_game();
        assert!(game.cell_at((4, 5)).is_revealed);
        assert_eq!(game.right_click((4, 5)), FlagOutcome::NoChange);
        assert_eq!(game.flag_count(), 0);
    }

    #[test]
    fn clicking_a_revealed_or_flagged_cell_is_ignored() {
        let mut game = walled_game();
        assert_eq!(game.left_click((4, 5)), ClickOutcome::NoChange);

        game.right_click((0, 0));
        assert_eq!(game.left_click((0, 0)), ClickOutcome::NoChange);
        assert!(!game.cell_at((0, 0)).is_revealed);
    }

    #[test]
    fn exploding_reveals_mines_and_misflags_and_freezes_the_board() {
        let mut game = walled_game();
        game.right_click((0, 0)); // wrong flag on a safe cell

        let outcome = game.left_click((3, 2));

        assert_eq!(outcome, ClickOutcome::Exploded);
        assert_eq!(game.status(), GameStatus::Lost);
        assert!(game.status().is_finished());
        assert!(!game.timer_running());
        for row in 0..8u8 {
            assert!(game.cell_at((row, 2)).is_revealed);
        }
        // the wrong flag is exposed
        assert!(game.cell_at((0, 0)).is_revealed);
        assert!(game.cell_at((0, 0)).is_flagged);

        // terminal state: nothing moves anymore
        let frozen = game.clone();
        assert_eq!(game.left_click((1, 0)), ClickOutcome::NoChange);
        assert_eq!(game.right_click((1, 0)), FlagOutcome::NoChange);
        assert!(!game.tick());
        assert_eq!(game, frozen);
    }

    #[test]
    fn revealing_the_last_safe_cell_wins() {
        let mut game = walled_game();
        // columns 3..=9 are flooded open; column 0 is a zero region that
        // floods columns 0 and 1
        let outcome = game.left_click((0, 0));

        assert_eq!(outcome, ClickOutcome::Won);
        assert_eq!(game.status(), GameStatus::Won);
        assert!(game.status().is_finished());
        assert!(!game.timer_running());
        // cosmetic reveal of the remaining mines
        for row in 0..8u8 {
            assert!(game.cell_at((row, 2)).is_revealed);
        }

        // won is just as terminal as lost: nothing moves anymore
        let frozen = game.clone();
        assert_eq!(game.left_click((0, 2)), ClickOutcome::NoChange);
        assert_eq!(game.right_click((0, 2)), FlagOutcome::NoChange);
        assert!(!game.tick());
        assert_eq!(game, frozen);
    }

    #[test]
    fn reset_rearms_the_session() {
        let mut game = walled_game();
        game.right_click((0, 0));
        game.right_click((0, 1));
        game.right_click((1, 0));
        for _ in 0..42 {
            game.tick();
        }
        assert_eq!(game.flag_count(), 3);
        assert_eq!(game.elapsed_secs(), 42);

        game.reset(123);

        assert_eq!(game.flag_count(), 0);
        assert_eq!(game.elapsed_secs(), 0);
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(!game.first_click_taken());
        assert!(!game.timer_running());
        assert_eq!(game.board().mine_count(), 0);
        // first click is armed again, so flagging is a no-op
        assert_eq!(game.right_click((0, 0)), FlagOutcome::NoChange);
    }

    #[test]
    fn difficulty_change_resizes_the_board() {
        let mut game = Game::new(Difficulty::Easy, 5);
        game.left_click((4, 5));

        game.set_difficulty(Difficulty::Hard, 6);

        assert_eq!(game.size(), (16, 30));
        assert_eq!(game.total_mines(), 99);
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(!game.first_click_taken());
    }

    #[test]
    fn timer_stops_at_the_ceiling_without_ending_the_game() {
        let mut game = walled_game();
        for _ in 0..1500 {
            game.tick();
        }
        assert_eq!(game.elapsed_secs(), MAX_ELAPSED_SECS);
        assert!(!game.timer_running());
        assert!(!game.tick());
        assert_eq!(game.status(), GameStatus::Playing);

        // the board still accepts moves after the clock stops
        assert_eq!(game.right_click((0, 0)), FlagOutcome::Flagged);
    }

    #[test]
    fn ticks_before_the_first_click_do_nothing() {
        let mut game = Game::new(Difficulty::Medium, 9);
        assert!(!game.tick());
        assert_eq!(game.elapsed_secs(), 0);
    }

    #[test]
    fn session_snapshot_round_trips_through_serde() {
        let mut game = walled_game();
        game.right_click((0, 0));
        game.tick();

        let json = serde_json::to_string(&game).unwrap();
        let restored: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, game);
    }
}
