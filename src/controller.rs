use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::game::GameState;
use crate::input::Action;
use crate::runtime::GameEvent;
use crate::timer::Interval;

pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Sole owner of the game state and of the countdown that drives it.
///
/// The countdown posts `GameEvent::Second(generation)` into the event queue.
/// Seconds from an older generation are dropped, so a tick that was already
/// queued when a round ended can never touch the next round.
#[derive(Debug)]
pub struct Controller {
    state: GameState,
    countdown: Option<Interval>,
    generation: u64,
    period: Duration,
    tx: Sender<GameEvent>,
}

impl Controller {
    pub fn new(state: GameState, tx: Sender<GameEvent>) -> Self {
        Self::with_period(state, tx, COUNTDOWN_PERIOD)
    }

    pub fn with_period(state: GameState, tx: Sender<GameEvent>, period: Duration) -> Self {
        Self {
            state,
            countdown: None,
            generation: 0,
            period,
            tx,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown.as_ref().is_some_and(Interval::is_running)
    }

    /// Applies a decoded input. Returns false once the player asked to quit.
    pub fn handle(&mut self, action: Action) -> bool {
        match action {
            Action::Start => self.start(),
            Action::Restart => self.restart(),
            Action::Whack(slot) => {
                self.hit_slot(slot);
            }
            Action::Quit => {
                self.shutdown();
                return false;
            }
            Action::None => {}
        }
        true
    }

    pub fn start(&mut self) {
        self.cancel_countdown();
        self.state.start();
        self.generation += 1;

        let generation = self.generation;
        let tx = self.tx.clone();
        self.countdown = Some(Interval::start(self.period, move || {
            tx.send(GameEvent::Second(generation)).is_ok()
        }));
    }

    pub fn restart(&mut self) {
        self.cancel_countdown();
        self.state.restart();
    }

    pub fn hit_slot(&mut self, slot: usize) -> bool {
        self.state.hit_slot(slot)
    }

    pub fn on_second(&mut self, generation: u64) {
        if generation != self.generation {
            log::debug!(
                "dropping stale second from round {} (current {})",
                generation,
                self.generation
            );
            return;
        }
        self.state.tick();
        if !self.state.is_active() {
            self.cancel_countdown();
        }
    }

    pub fn shutdown(&mut self) {
        self.cancel_countdown();
    }

    fn cancel_countdown(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            countdown.cancel();
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.cancel_countdown();
    }
}
