//! src/sim/router.rs
//!
//! Router data model: status enum, interface link states, and BGP fields.

use std::collections::BTreeMap;

use ratatui::style::Color;

/// Fixed interface name set every router is created with.
pub const INTERFACE_NAMES: [&str; 3] = ["Gig0/0", "Gig0/1", "Gig0/2"];

/// Closed router status vocabulary.
///
/// The "(sim)" annotation is carried separately on [`Router::simulated`];
/// display code matches on the variant, never on a status string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Disconnected,
    Connected,
    Restarting,
    Unauthorized,
    Error,
}

impl Status {
    /// Lowercase label used in the console and router panels.
    pub fn label(self) -> &'static str {
        match self {
            Status::Disconnected => "disconnected",
            Status::Connected => "connected",
            Status::Restarting => "restarting",
            Status::Unauthorized => "unauthorized",
            Status::Error => "error",
        }
    }

    /// Status dot / topology node color.
    pub fn color(self) -> Color {
        match self {
            Status::Connected => Color::Green,
            Status::Unauthorized | Status::Error => Color::Red,
            Status::Restarting => Color::Yellow,
            Status::Disconnected => Color::Gray,
        }
    }
}

/// Administrative state of a single interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkState {
    Up,
    Down,
}

impl LinkState {
    pub fn toggled(self) -> Self {
        match self {
            LinkState::Up => LinkState::Down,
            LinkState::Down => LinkState::Up,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LinkState::Up => "up",
            LinkState::Down => "down",
        }
    }
}

/// BGP neighbor fields. Free text, both may be empty; no protocol logic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BgpConfig {
    pub neighbor_ip: String,
    pub neighbor_as: String,
}

impl BgpConfig {
    pub fn is_empty(&self) -> bool {
        self.neighbor_ip.is_empty() && self.neighbor_as.is_empty()
    }
}

/// One simulated router.
///
/// `id` is unique within the registry and immutable after load. The
/// interface map is fixed at creation and never grows or shrinks.
#[derive(Clone, Debug)]
pub struct Router {
    pub id: String,
    pub ip: String,
    pub port: u16,
    pub status: Status,
    /// True once the status was produced by a simulated action.
    pub simulated: bool,
    pub interfaces: BTreeMap<String, LinkState>,
    pub bgp: BgpConfig,
}

impl Router {
    /// Create a router in its post-load default state: disconnected, the
    /// fixed three interfaces down, BGP fields empty.
    pub fn new(id: String, ip: String, port: u16) -> Self {
        let interfaces = INTERFACE_NAMES
            .iter()
            .map(|name| (name.to_string(), LinkState::Down))
            .collect();
        Self {
            id,
            ip,
            port,
            status: Status::Disconnected,
            simulated: false,
            interfaces,
            bgp: BgpConfig::default(),
        }
    }

    /// Status text as shown to the user, e.g. `connected (sim)`.
    pub fn status_text(&self) -> String {
        if self.simulated {
            format!("{} (sim)", self.status.label())
        } else {
            self.status.label().to_string()
        }
    }

    /// One-line summary used by the `view` action.
    pub fn summary(&self) -> String {
        format!(
            "{}: IP={} Port={} Status={}",
            self.id,
            self.ip,
            self.port,
            self.status_text()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_router_has_defaults() {
        let r = Router::new("R1".into(), "10.0.0.1".into(), 830);
        assert_eq!(r.status, Status::Disconnected);
        assert!(!r.simulated);
        assert_eq!(r.interfaces.len(), 3);
        assert!(r.interfaces.values().all(|s| *s == LinkState::Down));
        assert!(r.bgp.is_empty());
    }

    #[test]
    fn status_text_carries_sim_annotation() {
        let mut r = Router::new("R1".into(), "10.0.0.1".into(), 830);
        assert_eq!(r.status_text(), "disconnected");
        r.status = Status::Connected;
        r.simulated = true;
        assert_eq!(r.status_text(), "connected (sim)");
    }

    #[test]
    fn link_state_toggle_is_involution() {
        assert_eq!(LinkState::Down.toggled().toggled(), LinkState::Down);
        assert_eq!(LinkState::Up.toggled(), LinkState::Down);
    }
}
