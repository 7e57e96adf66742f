//! src/panels/console.rs
//!
//! Console panel: renders the tail of the bounded log, latest line
//! highlighted.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::sim::SharedSim;

pub struct ConsolePanel {
    pub shared: SharedSim,
}

impl ConsolePanel {
    pub fn new(shared: SharedSim) -> Self {
        Self { shared }
    }
}

impl crate::ui::Panel for ConsolePanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let state = self.shared.read().unwrap();
        let visible = (area.height as usize).saturating_sub(2);
        let total = state.console.len();
        let start = total.saturating_sub(visible);

        let lines: Vec<Line> = state
            .console
            .lines()
            .enumerate()
            .skip(start)
            .map(|(i, text)| {
                let style = if i + 1 == total {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::styled(text.to_string(), style)
            })
            .collect();

        let block = Block::default().title("Console").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
