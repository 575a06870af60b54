use ejypti_core::{Game, GameConfig, KeyValueStore};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

pub type BoxedStore = Box<dyn KeyValueStore>;

/// Terminal front end state: the game plus the wall clock that drives its timers.
pub struct App {
    pub game: Game<BoxedStore>,
    pub notes: Vec<String>,
    pub should_quit: bool,
    started: Instant,
}

impl App {
    pub fn new(config: GameConfig, seed: u64, store: BoxedStore) -> Self {
        Self {
            game: Game::new(config, seed, store),
            notes: Vec::new(),
            should_quit: false,
            started: Instant::now(),
        }
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.notes.push(text.into());
    }

    /// Catches the game clock up with real time, firing any due timers.
    pub fn tick(&mut self) {
        self.game.advance_to(self.started.elapsed());
        for event in self.game.take_events() {
            debug!(?event, "game event");
        }
    }

    /// Sleeps for `span`, or until the next pending timer when `None`.
    pub fn wait(&mut self, span: Option<Duration>) {
        self.tick();
        let target = match span {
            Some(span) => self.game.now() + span,
            None => match self.game.next_due() {
                Some(due) => due,
                None => {
                    self.note("nothing is pending");
                    return;
                }
            },
        };
        let elapsed = self.started.elapsed();
        if target > elapsed {
            thread::sleep(target - elapsed);
        }
        self.tick();
    }
}
