use crate::{
    Draw, DrawRejected, Event, EventBus, FavoriteEntry, FavoritesHistory, FavoritesStore,
    FinalizeError, GameConfig, GameSession, KeyValueStore, PlacedCard, RngState, SlotIndex,
    StatusMessage, Timeline,
};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Timer {
    PlaceCard(Draw),
    ShowSnapshot(FavoriteEntry),
    RecordFavorites(FavoriteEntry),
    ClearStatus(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Gameplay,
    /// Gameplay faded out, snapshot not shown yet.
    Fading,
    Snapshot(FavoriteEntry),
    Favorites,
}

/// Drives one game at a time: forwards gestures into the session, schedules
/// the animation delays and records finished hands.
pub struct Game<S> {
    config: GameConfig,
    rng: RngState,
    session: GameSession,
    next_generation: u64,
    timeline: Timeline<Timer>,
    favorites: FavoritesStore<S>,
    events: EventBus,
    log: Vec<Event>,
    screen: Screen,
    status: Option<String>,
}

impl<S: KeyValueStore> Game<S> {
    pub fn new(config: GameConfig, seed: u64, store: S) -> Self {
        let mut rng = RngState::from_seed(seed);
        let session = GameSession::new(&config, &mut rng, 1);
        let favorites = FavoritesStore::open(store, config.max_favorites);
        let mut game = Self {
            config,
            rng,
            session,
            next_generation: 2,
            timeline: Timeline::new(),
            favorites,
            events: EventBus::default(),
            log: Vec::new(),
            screen: Screen::Gameplay,
            status: None,
        };
        game.announce_start();
        game
    }

    /// Throws the current game away. Timers it scheduled become no-ops.
    pub fn restart(&mut self) {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.session = GameSession::new(&self.config, &mut self.rng, generation);
        self.screen = Screen::Gameplay;
        self.status = None;
        self.favorites.load();
        self.announce_start();
    }

    fn announce_start(&mut self) {
        info!(
            generation = self.session.generation(),
            seed = self.rng.seed(),
            "game started"
        );
        self.events.push(Event::GameStarted {
            generation: self.session.generation(),
            seed: self.rng.seed(),
            deck_size: self.session.initial_deck_size(),
        });
        self.flush_events();
    }

    pub fn click_reel(&mut self) -> Result<Draw, DrawRejected> {
        let result = self.session.request_draw(&mut self.events);
        if let Ok(draw) = result {
            self.schedule(self.config.timings.reveal(), Timer::PlaceCard(draw));
        }
        self.flush_events();
        result
    }

    pub fn click_slot(&mut self, slot: SlotIndex) -> Option<PlacedCard> {
        let removed = self.session.discard_slot(slot, &mut self.events);
        self.flush_events();
        removed
    }

    pub fn click_left_torch(&mut self) -> Result<(), FinalizeError> {
        let result = self.session.arm(&mut self.events);
        self.flush_events();
        result
    }

    pub fn click_right_torch(&mut self) -> Result<FavoriteEntry, FinalizeError> {
        let result = self.session.confirm(&mut self.events);
        if let Ok(entry) = result {
            self.screen = Screen::Fading;
            self.schedule(self.config.timings.fade(), Timer::ShowSnapshot(entry));
        }
        self.flush_events();
        result
    }

    /// Fires every timer due by `now`, in order. Timers scheduled while
    /// firing are measured from their parent's due time.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some(item) = self.timeline.pop_due(now) {
            if item.generation != self.session.generation() {
                debug!(
                    stale = item.generation,
                    current = self.session.generation(),
                    "dropping timer from a previous game"
                );
                continue;
            }
            self.fire(item.task);
            self.flush_events();
        }
        self.timeline.advance_clock(now);
    }

    pub fn advance_by(&mut self, elapsed: Duration) {
        let now = self.timeline.now() + elapsed;
        self.advance_to(now);
    }

    fn fire(&mut self, task: Timer) {
        match task {
            Timer::PlaceCard(draw) => {
                if let Some(lost) = self.session.commit_placement(draw, &mut self.events) {
                    warn!(card_id = lost.id, slot = %draw.slot, "placement overwrote a card");
                }
            }
            Timer::ShowSnapshot(entry) => {
                self.screen = Screen::Snapshot(entry);
                self.schedule(
                    self.config.timings.favorites_delay(),
                    Timer::RecordFavorites(entry),
                );
            }
            Timer::RecordFavorites(entry) => {
                let persisted = match self.favorites.append(entry) {
                    Ok(()) => true,
                    Err(err) => {
                        warn!(
                            error = %err,
                            "favorites not saved, keeping them for this session only"
                        );
                        false
                    }
                };
                self.session.complete_finalize();
                self.screen = Screen::Favorites;
                self.events.push(Event::FavoritesRecorded {
                    stored: self.favorites.history().len(),
                    persisted,
                });
            }
            Timer::ClearStatus(text) => {
                if self.status.as_deref() == Some(text.as_str()) {
                    self.status = None;
                }
            }
        }
    }

    fn schedule(&mut self, delay: Duration, task: Timer) {
        self.timeline.after(delay, self.session.generation(), task);
    }

    fn flush_events(&mut self) {
        let drained: Vec<Event> = self.events.drain().collect();
        for event in drained {
            if let Some(message) = event.status(&self.config.timings) {
                self.set_status(message);
            }
            self.log.push(event);
        }
    }

    fn set_status(&mut self, message: StatusMessage) {
        if let Some(delay) = message.clear_after {
            self.schedule(delay, Timer::ClearStatus(message.text.clone()));
        }
        self.status = Some(message.text);
    }

    /// Events since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.log)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn favorites(&self) -> &FavoritesHistory {
        self.favorites.history()
    }

    pub fn favorites_store(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.timeline.next_due()
    }
}
