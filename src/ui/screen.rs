use ratatui::Frame;

use crate::{
    app::App,
    game::Screen,
    ui::{render_playing, render_welcome},
};

/// A UI view boundary: responsible for rendering one game screen
pub trait View {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Title, instructions and high scores
pub struct WelcomeView;

impl View for WelcomeView {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_welcome(app, f);
    }
}

/// Score, timer and the slot row (plus the end-of-round banner)
pub struct PlayingView;

impl View for PlayingView {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_playing(app, f);
    }
}

/// Helper to construct the appropriate view for the current screen
pub fn current_screen(screen: Screen) -> Box<dyn View> {
    match screen {
        Screen::Welcome => Box::new(WelcomeView),
        Screen::Playing => Box::new(PlayingView),
    }
}
