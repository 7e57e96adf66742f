//! src/topology.rs
//!
//! View-side topology model: router nodes plus the fixed ODL controller
//! node, with a ring of links between the routers (a triangle for the
//! canonical three) and one uplink from the controller to the first router.

pub mod layout;

use ratatui::style::Color;

use crate::sim::Router;

/// Name of the controller node shown in the topology view.
pub const CONTROLLER: &str = "ODL";

/// One node in the topology view, colored by the status it was derived from.
#[derive(Clone, Debug)]
pub struct TopoNode {
    pub name: String,
    pub color: Color,
}

/// Static topology derived from the current router sequence. Pure consumer
/// of router status; never mutates anything.
#[derive(Clone, Debug)]
pub struct Topology {
    pub nodes: Vec<TopoNode>,
    /// Index pairs into `nodes`.
    pub edges: Vec<(usize, usize)>,
}

impl Topology {
    pub fn from_routers(routers: &[Router]) -> Self {
        let mut nodes: Vec<TopoNode> = routers
            .iter()
            .map(|r| TopoNode {
                name: r.id.clone(),
                color: r.status.color(),
            })
            .collect();
        nodes.push(TopoNode {
            name: CONTROLLER.to_string(),
            color: Color::Blue,
        });
        let controller = nodes.len() - 1;

        let mut edges = Vec::new();
        // ring over the routers (R1-R2, R2-R3, R3-R1 for the usual three)
        if routers.len() >= 2 {
            for i in 0..routers.len() {
                edges.push((i, (i + 1) % routers.len()));
            }
        }
        // controller uplink to the first router
        if !routers.is_empty() {
            edges.push((controller, 0));
        }
        Self { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::registry;

    fn routers() -> Vec<Router> {
        registry::parse(
            r#"[
                {"id": "R1", "ip": "192.168.10.1", "port": 830},
                {"id": "R2", "ip": "192.168.10.2", "port": 830},
                {"id": "R3", "ip": "192.168.10.3", "port": 830}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn three_routers_form_a_triangle_plus_controller_uplink() {
        let topo = Topology::from_routers(&routers());
        assert_eq!(topo.nodes.len(), 4);
        assert_eq!(topo.nodes[3].name, CONTROLLER);
        assert_eq!(topo.edges, vec![(0, 1), (1, 2), (2, 0), (3, 0)]);
    }

    #[test]
    fn node_colors_follow_status() {
        let mut rs = routers();
        rs[0].status = crate::sim::Status::Connected;
        rs[1].status = crate::sim::Status::Unauthorized;
        let topo = Topology::from_routers(&rs);
        assert_eq!(topo.nodes[0].color, Color::Green);
        assert_eq!(topo.nodes[1].color, Color::Red);
        assert_eq!(topo.nodes[2].color, Color::Gray);
        assert_eq!(topo.nodes[3].color, Color::Blue);
    }
}
