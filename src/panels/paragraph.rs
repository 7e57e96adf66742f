//! src/panels/paragraph.rs
//!
//! Simple paragraph panel used for help text and the status/footer line.

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Small reusable paragraph panel.
pub struct ParagraphPanel {
    pub text: String,
    pub title: String,
}

impl ParagraphPanel {
    pub fn new(text: impl Into<String>, title: &str) -> Self {
        Self {
            text: text.into(),
            title: title.to_string(),
        }
    }
}

impl crate::ui::Panel for ParagraphPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let p = Paragraph::new(self.text.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(self.title.clone())
                    .borders(Borders::ALL),
            );
        f.render_widget(p, area);
    }
}
