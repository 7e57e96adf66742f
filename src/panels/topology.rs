//! src/panels/topology.rs
//!
//! Topology panel: draws the router triangle plus the ODL controller on a
//! canvas, nodes colored by status. Pure consumer of router state.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, canvas::Canvas},
};

use crate::sim::SharedSim;
use crate::topology::{Topology, layout::spring_layout};

/// Layout seed, fixed so the picture never jumps between frames.
const LAYOUT_SEED: u64 = 42;

pub struct TopologyPanel {
    pub shared: SharedSim,
}

impl TopologyPanel {
    pub fn new(shared: SharedSim) -> Self {
        Self { shared }
    }
}

impl crate::ui::Panel for TopologyPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let topo = {
            let state = self.shared.read().unwrap();
            Topology::from_routers(&state.routers)
        };
        let pos = spring_layout(topo.nodes.len(), &topo.edges, LAYOUT_SEED);

        let canvas = Canvas::default()
            .block(Block::default().title("Topology").borders(Borders::ALL))
            .x_bounds([0.0, 1.0])
            .y_bounds([0.0, 1.0])
            .paint(|ctx| {
                for &(a, b) in &topo.edges {
                    ctx.draw(&ratatui::widgets::canvas::Line {
                        x1: pos[a].0,
                        y1: pos[a].1,
                        x2: pos[b].0,
                        y2: pos[b].1,
                        color: Color::DarkGray,
                    });
                }
                ctx.layer();
                for (node, &(x, y)) in topo.nodes.iter().zip(pos.iter()) {
                    ctx.print(
                        x,
                        y,
                        Line::styled(
                            format!("\u{25cf} {}", node.name),
                            Style::default().fg(node.color),
                        ),
                    );
                }
            });

        f.render_widget(canvas, area);
    }
}
