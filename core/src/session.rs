use core::time::Duration;
use web_time::Instant;

use crate::*;

/// Watches a session from the outside, e.g. to run a clock or show a banner.
pub trait SessionObserver {
    /// A new board was dealt.
    fn session_started(&mut self) {}

    /// The game status moved, always from `InProgress` to a final status.
    fn status_changed(&mut self, _from: GameStatus, _to: GameStatus) {}
}

impl SessionObserver for () {}

/// Elapsed-time counter that runs from the deal until the game is decided.
#[derive(Clone, Debug, Default)]
pub struct ElapsedClock {
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl ElapsedClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    /// Zero before the first deal, frozen once the game ends
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started_at) => self
                .stopped_at
                .unwrap_or_else(Instant::now)
                .duration_since(started_at),
            None => Duration::ZERO,
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }
}

impl SessionObserver for ElapsedClock {
    fn session_started(&mut self) {
        self.started_at = Some(Instant::now());
        self.stopped_at = None;
    }

    fn status_changed(&mut self, _from: GameStatus, to: GameStatus) {
        if to.is_finished() && self.is_running() {
            self.stopped_at = Some(Instant::now());
            log::debug!("Clock stopped at {}s", self.elapsed_secs());
        }
    }
}

/// One game at a time, plus whoever is watching it.
///
/// Losing reveals every mine right away so the board is ready to show.
#[derive(Debug)]
pub struct GameSession<O> {
    engine: BoardEngine,
    observer: O,
}

impl<O: SessionObserver> GameSession<O> {
    pub fn start(engine: BoardEngine, mut observer: O) -> Self {
        observer.session_started();
        Self { engine, observer }
    }

    /// Throws the current board away and deals `engine` instead.
    pub fn reset(&mut self, engine: BoardEngine) {
        self.engine = engine;
        self.observer.session_started();
    }

    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let before = self.engine.status();
        let outcome = self.engine.reveal(coords)?;
        if outcome == RevealOutcome::Lost {
            self.engine.reveal_all_mines();
        }
        self.notify(before);
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        self.engine.toggle_flag(coords)
    }

    fn notify(&mut self, before: GameStatus) {
        let after = self.engine.status();
        if before != after {
            self.observer.status_changed(before, after);
        }
    }
}
