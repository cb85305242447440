use std::error::Error;
use std::sync::mpsc::Sender;

use ratatui::{backend::Backend, layout::Rect, Terminal};

use crate::{
    controller::Controller,
    game::GameState,
    input::{action_for_key, action_for_mouse, Action},
    runtime::{GameEvent, GameEventSource, Runner, Ticker},
    ui,
};

#[derive(Debug)]
pub struct App {
    pub controller: Controller,
    /// Where the last frame put each slot, for mouse hit-testing
    pub slot_areas: Vec<Rect>,
}

impl App {
    pub fn new(state: GameState, tx: Sender<GameEvent>) -> Self {
        Self {
            controller: Controller::new(state, tx),
            slot_areas: Vec::new(),
        }
    }

    pub fn with_controller(controller: Controller) -> Self {
        Self {
            controller,
            slot_areas: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        self.controller.state()
    }

    /// Feed one event through. Returns false once the app should exit.
    pub fn on_event(&mut self, event: GameEvent) -> bool {
        let screen = self.state().screen();
        let action = match event {
            GameEvent::Key(key) => action_for_key(key, screen, self.state().settings().slots),
            GameEvent::Mouse(mouse) => action_for_mouse(mouse, screen, &self.slot_areas),
            GameEvent::Second(generation) => {
                self.controller.on_second(generation);
                Action::None
            }
            GameEvent::Resize | GameEvent::Frame => Action::None,
        };
        self.controller.handle(action)
    }
}

/// Drive the app until the player quits. Redraws after every event that
/// could have changed what is on screen.
pub fn run<B, E, T>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    E: GameEventSource,
    T: Ticker,
{
    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        let event = runner.step();
        let redraw = !matches!(event, GameEvent::Frame);
        if !app.on_event(event) {
            break;
        }
        if redraw {
            terminal.draw(|f| ui::draw(app, f))?;
        }
    }

    app.controller.shutdown();
    Ok(())
}
