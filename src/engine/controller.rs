//! Engine facade: game state plus everything a search needs.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{
    search, EngineError, Evaluator, MaterialEvaluator, Move, Position, PositionStack,
    SearchConfig, SearchInfoCallback, SearchLimits, SearchResult, SearchState,
};
use crate::book::{NoBook, OpeningBook};
use crate::sync::StopFlag;
use crate::timer::{SearchClock, SearchTimer};

use super::config::EngineConfig;
use super::time::compute_budget;

/// One game's worth of engine state.
///
/// Searches run synchronously on the calling thread; the only other thread
/// is the timer started for the duration of a timed [`go`](Engine::go). To
/// stop a search from elsewhere, keep a [`stop_handle`](Engine::stop_handle).
pub struct Engine {
    config: EngineConfig,
    stack: PositionStack,
    state: SearchState,
    evaluator: Box<dyn Evaluator>,
    book: Box<dyn OpeningBook>,
    book_rng: StdRng,
    stop: StopFlag,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        // Build the attack tables now so the first search clock does not pay for them.
        crate::board::attack_tables::init();
        Engine {
            stack: PositionStack::new(Position::new()),
            state: SearchState::new(config.hash_mb),
            evaluator: Box::new(MaterialEvaluator),
            book: Box::new(NoBook),
            book_rng: StdRng::seed_from_u64(config.book_seed),
            stop: StopFlag::new(),
            config,
        }
    }

    /// Replace the leaf evaluator.
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Install an opening book.
    #[must_use]
    pub fn with_book(mut self, book: impl OpeningBook + 'static) -> Self {
        self.book = Box::new(book);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Back to the initial position with empty tables.
    pub fn new_game(&mut self) {
        self.stack.reset(Position::new());
        self.state.reset();
        self.book_rng = StdRng::seed_from_u64(self.config.book_seed);
    }

    /// Set the game to `fen` (or the initial position) followed by `moves`
    /// in coordinate notation.
    ///
    /// # Errors
    /// Fails on a malformed FEN or a malformed or illegal move. The current
    /// game is left untouched on error.
    pub fn set_position(&mut self, fen: Option<&str>, moves: &[&str]) -> Result<(), EngineError> {
        let root = match fen {
            Some(fen) => Position::from_fen(fen)?,
            None => Position::new(),
        };
        let mut stack = PositionStack::new(root);
        for text in moves {
            let mv = stack.current().parse_move(text)?;
            stack.play(mv);
        }
        self.stack = stack;
        Ok(())
    }

    /// Play one move on top of the current game.
    ///
    /// # Errors
    /// Fails if `text` is malformed or illegal here; the game is unchanged.
    pub fn play_move(&mut self, text: &str) -> Result<Move, EngineError> {
        let mv = self.stack.current().parse_move(text)?;
        self.stack.play(mv);
        Ok(mv)
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        self.stack.current()
    }

    /// Resize the transposition table; its contents are lost.
    pub fn set_hash_size(&mut self, mb: usize) {
        self.config.hash_mb = mb;
        self.state.resize_tt(mb);
    }

    /// A handle that stops the running search when set.
    #[must_use]
    pub fn stop_handle(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Pick a move for the current position under `limits`.
    ///
    /// A legal book move is returned immediately when the book knows the
    /// position. Otherwise the search runs until a limit is reached or the
    /// stop handle is raised.
    pub fn go(&mut self, limits: &SearchLimits, info_callback: Option<SearchInfoCallback>) -> SearchResult {
        self.stop.reset();

        if self.config.use_book {
            if let Some(mv) = self.book_move() {
                log::debug!("book move {mv}");
                return SearchResult {
                    best_move: Some(mv),
                    pv: vec![mv],
                    ..SearchResult::default()
                };
            }
        }

        let side = self.stack.current().side_to_move();
        let budget = compute_budget(limits, side, &self.config);
        let clock = Arc::new(SearchClock::new(budget));
        let timer = SearchTimer::start(Arc::clone(&clock), self.stop.clone());

        let mut config = SearchConfig::from_limits(limits);
        config.info_callback = info_callback;

        self.state.new_search();
        let result = search(
            &mut self.stack,
            &mut self.state,
            self.evaluator.as_ref(),
            &config,
            &clock,
            &self.stop,
        );

        if let Some(timer) = timer {
            timer.finish();
        }
        result
    }

    /// A random legal candidate from the book, if any.
    fn book_move(&mut self) -> Option<Move> {
        let pos = self.stack.current();
        let legal = pos.legal_moves();
        let candidates: Vec<Move> = self
            .book
            .lookup(pos)
            .into_iter()
            .filter(|&mv| {
                let ok = legal.contains(mv);
                if !ok {
                    log::warn!("book move {mv} is not legal in {}", pos.to_fen());
                }
                ok
            })
            .collect();
        candidates.choose(&mut self.book_rng).copied()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::HashBook;
    use std::sync::Mutex;

    fn small_engine() -> Engine {
        Engine::new(EngineConfig {
            hash_mb: 1,
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_set_position_plays_moves() {
        let mut engine = small_engine();
        engine.set_position(None, &["e2e4", "e7e5"]).unwrap();
        assert_eq!(
            engine.position().to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
        );
    }

    #[test]
    fn test_set_position_error_leaves_game_untouched() {
        let mut engine = small_engine();
        engine.set_position(None, &["d2d4"]).unwrap();
        let before = *engine.position();

        assert!(matches!(
            engine.set_position(None, &["e2e4", "e2e4"]),
            Err(EngineError::Move(_))
        ));
        assert!(matches!(
            engine.set_position(Some("not a fen"), &[]),
            Err(EngineError::Fen(_))
        ));
        assert_eq!(*engine.position(), before);
    }

    #[test]
    fn test_set_position_rejects_unreachable_positions() {
        let mut engine = small_engine();
        for fen in [
            "4k3/8/8/8/8/8/4R3/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/3P4/4K3 w - e3 0 1",
            "4k3/8/8/8/4p3/8/8/4K3 b - d3 0 1",
        ] {
            assert!(matches!(
                engine.set_position(Some(fen), &[]),
                Err(EngineError::Fen(_))
            ));
        }
        assert_eq!(*engine.position(), Position::new());
        assert!(engine.go(&SearchLimits::depth(3), None).best_move.is_some());
    }

    #[test]
    fn test_go_returns_legal_move() {
        let mut engine = small_engine();
        let result = engine.go(&SearchLimits::depth(3), None);
        let best = result.best_move.expect("a move from the initial position");
        assert!(engine.position().legal_moves().contains(best));
        assert_eq!(result.depth, 3);
    }

    #[test]
    fn test_go_reports_each_iteration() {
        let mut engine = small_engine();
        let depths = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&depths);
        let callback: SearchInfoCallback = Arc::new(move |info| {
            sink.lock().unwrap().push(info.depth);
        });
        engine.go(&SearchLimits::depth(4), Some(callback));
        assert_eq!(*depths.lock().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_book_move_played_without_search() {
        let start = Position::new();
        let mut book = HashBook::new();
        book.insert_line(&start, &["c2c4"]).unwrap();
        let mut engine = small_engine().with_book(book);

        let result = engine.go(&SearchLimits::depth(6), None);
        assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("c2c4"));
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_book_ignored_when_disabled() {
        let start = Position::new();
        let mut book = HashBook::new();
        book.insert_line(&start, &["c2c4"]).unwrap();
        let mut engine = Engine::new(EngineConfig {
            hash_mb: 1,
            use_book: false,
            ..EngineConfig::default()
        })
        .with_book(book);

        let result = engine.go(&SearchLimits::depth(2), None);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_no_legal_moves() {
        let mut engine = small_engine();
        // Fool's mate: White is checkmated.
        engine
            .set_position(None, &["f2f3", "e7e5", "g2g4", "d8h4"])
            .unwrap();
        let result = engine.go(&SearchLimits::depth(3), None);
        assert_eq!(result.best_move, None);
        assert!(result.score < 0);
    }

    #[test]
    fn test_custom_evaluator() {
        let mut engine = small_engine().with_evaluator(|_: &Position| 0);
        let result = engine.go(&SearchLimits::depth(2), None);
        assert!(result.best_move.is_some());
        assert_eq!(result.score, 0);
    }
}
