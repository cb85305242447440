pub mod screen;

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use crate::{app::App, ui::screen::current_screen};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub const SLOT_WIDTH: u16 = 9;
pub const SLOT_HEIGHT: u16 = 5;
const SLOT_GAP: u16 = 2;

const MOLE: &str = "(o.o)";
const MAX_LISTED_SCORES: usize = 10;

pub fn draw(app: &mut App, f: &mut Frame) {
    let screen = current_screen(app.state().screen());
    screen.render(app, f);
}

/// Centered row of `n` equally sized slot boxes inside `area`
pub fn slot_areas(area: Rect, n: usize) -> Vec<Rect> {
    let [row] = Layout::vertical([Constraint::Length(SLOT_HEIGHT)])
        .flex(Flex::Center)
        .areas(area);

    Layout::horizontal(vec![Constraint::Length(SLOT_WIDTH); n])
        .flex(Flex::Center)
        .spacing(SLOT_GAP)
        .split(row)
        .to_vec()
}

pub(crate) fn render_welcome(app: &mut App, f: &mut Frame) {
    let state = app.state();
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let high_scores = state.high_scores();
    let hidden = high_scores.len().saturating_sub(MAX_LISTED_SCORES);
    let mut score_lines: Vec<Line> = Vec::new();
    if !high_scores.is_empty() {
        score_lines.push(Line::from(Span::styled("High Scores", bold_style)));
        score_lines.extend(
            high_scores
                .iter()
                .take(MAX_LISTED_SCORES)
                .enumerate()
                .map(|(i, score)| Line::from(format!("{}. {}", i + 1, score))),
        );
        if hidden > 0 {
            score_lines.push(Line::from(Span::styled(
                format!("... and {} more", hidden),
                dim_style,
            )));
        }
    }
    let scores_height = u16::try_from(score_lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(1);

    let [title, intro, hint, scores] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(scores_height),
    ])
    .flex(Flex::Center)
    .horizontal_margin(HORIZONTAL_MARGIN)
    .vertical_margin(VERTICAL_MARGIN)
    .areas(f.area());

    f.render_widget(
        Paragraph::new(Span::styled(
            "Whack-a-Mole!",
            bold_style.fg(Color::Yellow),
        ))
        .alignment(Alignment::Center),
        title,
    );

    f.render_widget(
        Paragraph::new(vec![
            Line::from(format!(
                "Hit the mole as many times as you can in {} seconds!",
                state.settings().round_secs
            )),
            Line::from("It jumps to a new hole every time you get it."),
            Line::from(format!(
                "Click it, or press 1-{} for the hole it is in.",
                state.settings().slots
            )),
        ])
        .alignment(Alignment::Center),
        intro,
    );

    f.render_widget(
        Paragraph::new(Span::styled("(enter) play / (esc) quit", dim_style))
            .alignment(Alignment::Center),
        hint,
    );

    if !score_lines.is_empty() {
        f.render_widget(
            Paragraph::new(score_lines).alignment(Alignment::Center),
            scores,
        );
    }
}

pub(crate) fn render_playing(app: &mut App, f: &mut Frame) {
    let state = app.state();
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let [score, time, hint, board, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(SLOT_HEIGHT + 2),
        Constraint::Length(2),
    ])
    .flex(Flex::Center)
    .horizontal_margin(HORIZONTAL_MARGIN)
    .vertical_margin(VERTICAL_MARGIN)
    .areas(f.area());

    f.render_widget(
        Paragraph::new(Span::styled(format!("Score: {}", state.score()), bold_style))
            .alignment(Alignment::Center),
        score,
    );

    let time_style = if state.seconds_remaining() <= 3 {
        bold_style.fg(Color::Red)
    } else {
        bold_style
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("Time: {}s", state.seconds_remaining()),
            time_style,
        ))
        .alignment(Alignment::Center),
        time,
    );

    f.render_widget(
        Paragraph::new(Span::styled("(r) restart / (esc) quit", dim_style))
            .alignment(Alignment::Center),
        hint,
    );

    let areas = slot_areas(board, state.settings().slots);
    for (idx, area) in areas.iter().enumerate() {
        let occupied = idx == state.target_slot();
        let border_style = match (occupied, state.is_active()) {
            (true, true) => bold_style.fg(Color::Yellow),
            (true, false) => dim_style.fg(Color::Yellow),
            (false, _) => dim_style,
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!(" {} ", idx + 1))
            .title_alignment(Alignment::Center);

        let inner = block.inner(*area);
        f.render_widget(block, *area);

        if occupied {
            let [mid] = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(inner);
            f.render_widget(
                Paragraph::new(Span::styled(MOLE, border_style)).alignment(Alignment::Center),
                mid,
            );
        }
    }

    if state.is_round_over() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "Time's up!",
                bold_style.fg(Color::Magenta),
            ))
            .alignment(Alignment::Center),
            status,
        );
    }

    app.slot_areas = areas;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameSettings, GameState};
    use ratatui::{backend::TestBackend, Terminal};

    fn app(seed: u64) -> App {
        let (tx, _rx) = std::sync::mpsc::channel();
        App::new(GameState::with_seed(GameSettings::default(), seed), tx)
    }

    fn rendered(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn slot_areas_are_disjoint_and_inside() {
        let area = Rect::new(0, 0, 100, 20);
        let areas = slot_areas(area, 6);
        assert_eq!(areas.len(), 6);
        for (i, a) in areas.iter().enumerate() {
            assert_eq!(a.width, SLOT_WIDTH);
            assert_eq!(a.height, SLOT_HEIGHT);
            assert!(area.contains(a.as_position()));
            for b in &areas[i + 1..] {
                assert!(!a.intersects(*b));
            }
        }
    }

    #[test]
    fn welcome_without_history() {
        let mut app = app(1);
        let content = rendered(&mut app);
        assert!(content.contains("Whack-a-Mole!"));
        assert!(content.contains("(enter) play"));
        assert!(!content.contains("High Scores"));
        assert!(app.slot_areas.is_empty());
    }

    #[test]
    fn welcome_lists_high_scores_descending() {
        let mut app = app(2);
        for hits in [2, 7, 4] {
            app.controller.start();
            for _ in 0..hits {
                let target = app.state().target_slot();
                app.controller.hit_slot(target);
            }
            app.controller.restart();
        }
        let content = rendered(&mut app);
        assert!(content.contains("High Scores"));
        let first = content.find("1. 7").unwrap();
        let second = content.find("2. 4").unwrap();
        let third = content.find("3. 2").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn long_history_lists_only_the_best() {
        let mut app = app(6);
        for hits in 1..=14 {
            app.controller.start();
            for _ in 0..hits {
                let target = app.state().target_slot();
                app.controller.hit_slot(target);
            }
            app.controller.restart();
        }
        let content = rendered(&mut app);
        assert!(content.contains("1. 14"));
        assert!(content.contains("10. 5"));
        assert!(!content.contains("11. 4"));
        assert!(content.contains("... and 4 more"));
    }

    #[test]
    fn playing_shows_score_time_and_mole() {
        let mut app = app(3);
        app.controller.start();
        let content = rendered(&mut app);
        assert!(content.contains("Score: 0"));
        assert!(content.contains("Time: 15s"));
        assert!(content.contains(MOLE));
        assert!(!content.contains("Time's up!"));
        assert_eq!(app.slot_areas.len(), 6);
    }

    #[test]
    fn mole_drawn_in_target_slot() {
        let mut app = app(4);
        app.controller.start();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
        let buffer = terminal.backend().buffer();

        let slot_text = |area: Rect| -> String {
            (area.y..area.bottom())
                .flat_map(|y| (area.x..area.right()).map(move |x| (x, y)))
                .map(|(x, y)| buffer[(x, y)].symbol().to_string())
                .collect()
        };
        for (idx, area) in app.slot_areas.iter().enumerate() {
            let has_mole = slot_text(*area).contains(MOLE);
            assert_eq!(has_mole, idx == app.state().target_slot());
        }
    }

    #[test]
    fn round_over_banner() {
        let mut app = app(5);
        app.controller.start();
        let generation = app.controller.generation();
        for _ in 0..15 {
            app.controller.on_second(generation);
        }
        let content = rendered(&mut app);
        assert!(content.contains("Time's up!"));
        assert!(content.contains("Time: 0s"));
    }
}
