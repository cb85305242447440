use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::Config;
use crate::error::WhackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Screen {
    Welcome,
    Playing,
}

/// Round parameters fixed for the lifetime of a process.
///
/// `slots` must be at least 2; [`GameState`] panics otherwise. Build these
/// through `TryFrom<&Config>` to get a [`WhackError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub slots: usize,
    pub round_secs: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            slots: 6,
            round_secs: 15,
        }
    }
}

impl TryFrom<&Config> for GameSettings {
    type Error = WhackError;

    fn try_from(cfg: &Config) -> Result<Self, Self::Error> {
        cfg.validate()?;
        Ok(Self {
            slots: cfg.slots,
            round_secs: cfg.round_secs,
        })
    }
}

/// The whole game: current round plus the scores of finished rounds.
///
/// `target_slot` is always in `0..settings.slots`, and `settings.slots` is at
/// least 2 so a hit can always move the mole somewhere else.
#[derive(Debug)]
pub struct GameState {
    settings: GameSettings,
    screen: Screen,
    score: u32,
    target_slot: usize,
    seconds_remaining: u32,
    active: bool,
    history: Vec<u32>,
    rng: StdRng,
}

impl GameState {
    pub fn new(settings: GameSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    pub fn with_seed(settings: GameSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: GameSettings, mut rng: StdRng) -> Self {
        assert!(settings.slots >= 2, "a game needs at least two slots");
        let target_slot = rng.gen_range(0..settings.slots);
        Self {
            settings,
            screen: Screen::Welcome,
            score: 0,
            target_slot,
            seconds_remaining: settings.round_secs,
            active: false,
            history: Vec::new(),
            rng,
        }
    }

    /// Begin a fresh round from whatever state we are in.
    pub fn start(&mut self) {
        self.score = 0;
        self.target_slot = self.rng.gen_range(0..self.settings.slots);
        self.screen = Screen::Playing;
        self.seconds_remaining = self.settings.round_secs;
        self.active = true;
        log::info!(
            "round started: {} slots, {}s, mole at {}",
            self.settings.slots,
            self.settings.round_secs,
            self.target_slot
        );
    }

    /// Abandon (or leave) the current round and go back to the welcome screen.
    /// Does nothing when already on the welcome screen.
    pub fn restart(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        if self.score > 0 {
            self.history.push(self.score);
        }
        log::info!("back to welcome, archived score {}", self.score);
        self.screen = Screen::Welcome;
        self.active = false;
        self.seconds_remaining = self.settings.round_secs;
    }

    /// Whack the mole wherever it is. Returns whether the hit counted.
    pub fn hit(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.score += 1;
        self.target_slot = self.reroll_target();
        log::debug!("hit! score {} mole now at {}", self.score, self.target_slot);
        true
    }

    /// A click on `slot`; only the occupied slot counts.
    pub fn hit_slot(&mut self, slot: usize) -> bool {
        if slot != self.target_slot {
            return false;
        }
        self.hit()
    }

    /// One second of countdown.
    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.active = false;
            log::info!("time's up, final score {}", self.score);
        }
    }

    // uniform over every slot except the current one
    fn reroll_target(&mut self) -> usize {
        let pick = self.rng.gen_range(0..self.settings.slots - 1);
        if pick >= self.target_slot {
            pick + 1
        } else {
            pick
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_slot(&self) -> usize {
        self.target_slot
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_round_over(&self) -> bool {
        self.screen == Screen::Playing && !self.active
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    /// Completed scores in the order they were archived
    pub fn history(&self) -> &[u32] {
        &self.history
    }

    pub fn high_scores(&self) -> Vec<u32> {
        self.history.iter().copied().sorted_by(|a, b| b.cmp(a)).collect()
    }
}
