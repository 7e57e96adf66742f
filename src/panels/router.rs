//! src/panels/router.rs
//!
//! Router panel: status dot, identity, interfaces, and BGP fields for a
//! single router. The focused router gets a highlighted border.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::sim::SharedSim;

pub struct RouterPanel {
    pub shared: SharedSim,
    pub index: usize,
    pub highlighted: bool,
}

impl RouterPanel {
    pub fn new(shared: SharedSim, index: usize) -> Self {
        Self {
            shared,
            index,
            highlighted: false,
        }
    }
}

impl crate::ui::Panel for RouterPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let state = self.shared.read().unwrap();
        let Some(r) = state.routers.get(self.index) else {
            return;
        };

        let interfaces: Vec<Span> = r
            .interfaces
            .iter()
            .flat_map(|(name, link)| {
                let style = match *link {
                    crate::sim::LinkState::Up => Style::default().fg(Color::Green),
                    crate::sim::LinkState::Down => Style::default().fg(Color::DarkGray),
                };
                vec![
                    Span::raw(format!("{name}: ")),
                    Span::styled(link.label().to_string(), style),
                    Span::raw("  "),
                ]
            })
            .collect();

        let bgp = if r.bgp.is_empty() {
            Span::styled("BGP neighbor: (not set)", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(format!(
                "BGP neighbor: {} AS{}",
                r.bgp.neighbor_ip, r.bgp.neighbor_as
            ))
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("\u{25cf} ", Style::default().fg(r.status.color())),
                Span::styled(&r.id, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(" ({})", r.status_text())),
            ]),
            Line::from(interfaces),
            Line::from(bgp),
        ];

        let mut block = Block::default()
            .title(format!("{}:{}", r.ip, r.port))
            .borders(Borders::ALL);
        if self.highlighted {
            block = block.style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
