//! src/sim/state.rs
//!
//! The shared simulation state: router registry, console log, pending
//! restart deadlines, and the action dispatcher that mutates it all.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;

use super::console::Console;
use super::router::{Router, Status};

/// Delay between a restart and its simulated completion.
pub const RESTART_DELAY: Duration = Duration::from_millis(2000);

/// Recoverable action errors. Logged or surfaced as a warning by the
/// caller; the router involved is left unmutated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("{router}: no interface named {name:?}")]
    UnknownInterface { router: String, name: String },
    #[error("select both ping endpoints first")]
    MissingSelection,
}

/// The authoritative simulation state shared with the UI panels.
#[derive(Debug)]
pub struct SimState {
    pub routers: Vec<Router>,
    pub console: Console,
    /// Pending restart completion per router id. Starting a new restart
    /// replaces the entry, so only the latest deadline ever completes.
    pending: HashMap<String, Instant>,
    /// Display refresh flag, set by every mutating action and drained by
    /// the event loop via [`SimState::take_dirty`].
    dirty: bool,
}

impl SimState {
    pub fn new(routers: Vec<Router>) -> Self {
        Self {
            routers,
            console: Console::default(),
            pending: HashMap::new(),
            dirty: true,
        }
    }

    /// Consume the refresh flag; the display re-reads the full router
    /// sequence and re-renders whenever this returns true.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn log(&mut self, line: String) {
        self.console.push(line);
        self.dirty = true;
    }

    /// Surface a recoverable error as a console warning.
    pub fn warn(&mut self, err: &ActionError) {
        self.log(format!("warning: {err}"));
    }

    /// Simulated connect: status becomes connected. Idempotent.
    pub fn connect(&mut self, idx: usize) {
        let r = &mut self.routers[idx];
        r.status = Status::Connected;
        r.simulated = true;
        let line = format!("{}: Simulating connect...", r.id);
        self.log(line);
    }

    /// Read-only summary of one router, echoed to the console.
    pub fn view(&mut self, idx: usize) -> String {
        let line = self.routers[idx].summary();
        self.log(line.clone());
        line
    }

    /// Begin a simulated restart. The completion fires from [`tick`] once
    /// [`RESTART_DELAY`] has elapsed. Restarting again before then replaces
    /// the pending deadline rather than queueing a second completion.
    pub fn restart(&mut self, idx: usize, now: Instant) {
        let r = &mut self.routers[idx];
        r.status = Status::Restarting;
        r.simulated = true;
        let id = r.id.clone();
        self.pending.insert(id.clone(), now + RESTART_DELAY);
        self.log(format!("{id}: Restarting..."));
    }

    /// Complete every restart whose deadline has passed. Returns the number
    /// of routers that finished restarting.
    pub fn tick(&mut self, now: Instant) -> usize {
        let due: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &due {
            self.pending.remove(id);
            if let Some(r) = self.routers.iter_mut().find(|r| &r.id == id) {
                r.status = Status::Connected;
                r.simulated = true;
            }
            self.log(format!("{id}: Restart complete"));
        }
        due.len()
    }

    /// True while a restart completion is outstanding for the router.
    pub fn restart_pending(&self, idx: usize) -> bool {
        self.pending.contains_key(&self.routers[idx].id)
    }

    /// Flip one interface between up and down.
    pub fn toggle_interface(&mut self, idx: usize, name: &str) -> Result<(), ActionError> {
        let r = &mut self.routers[idx];
        let Some(state) = r.interfaces.get_mut(name) else {
            return Err(ActionError::UnknownInterface {
                router: r.id.clone(),
                name: name.to_string(),
            });
        };
        *state = state.toggled();
        let line = format!("{}: Interface {} set to {}", r.id, name, state.label());
        self.log(line);
        Ok(())
    }

    /// Set both BGP neighbor fields, or do nothing if either is empty.
    pub fn set_bgp(&mut self, idx: usize, ip: &str, asn: &str) {
        if ip.is_empty() || asn.is_empty() {
            return;
        }
        let r = &mut self.routers[idx];
        r.bgp.neighbor_ip = ip.to_string();
        r.bgp.neighbor_as = asn.to_string();
        let line = format!("{}: BGP neighbor set to {ip} AS{asn}", r.id);
        self.log(line);
    }

    /// Simulated ping: succeeds iff both endpoints are currently connected.
    /// Pure over router state; only the console changes.
    pub fn ping(&mut self, from: Option<usize>, to: Option<usize>) -> Result<bool, ActionError> {
        let (Some(from), Some(to)) = (from, to) else {
            return Err(ActionError::MissingSelection);
        };
        let line = format!(
            "Pinging from {} to {}...",
            self.routers[from].id, self.routers[to].id
        );
        self.log(line);
        let ok = self.routers[from].status == Status::Connected
            && self.routers[to].status == Status::Connected;
        if ok {
            self.log("Ping successful!".to_string());
        } else {
            self.log("Ping failed (simulated)".to_string());
        }
        Ok(ok)
    }

    /// Every router to connected (sim), regardless of prior state.
    pub fn connect_all(&mut self) {
        for r in &mut self.routers {
            r.status = Status::Connected;
            r.simulated = true;
        }
        self.log("All routers set to connected (simulated)".to_string());
    }

    /// Every router to unauthorized (sim): the controller went away.
    pub fn simulate_failure(&mut self) {
        for r in &mut self.routers {
            r.status = Status::Unauthorized;
            r.simulated = true;
        }
        self.log("All routers set to unauthorized (simulated ODL failure)".to_string());
    }
}

/// Alias: Arc<RwLock<SimState>>
pub type SharedSim = Arc<RwLock<SimState>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::registry;
    use crate::sim::router::LinkState;

    fn three_routers() -> SimState {
        let routers = registry::parse(
            r#"[
                {"id": "R1", "ip": "192.168.10.1", "port": 830},
                {"id": "R2", "ip": "192.168.10.2", "port": 830},
                {"id": "R3", "ip": "192.168.10.3", "port": 830}
            ]"#,
        )
        .unwrap();
        SimState::new(routers)
    }

    fn last_line(state: &SimState) -> &str {
        state.console.lines().last().unwrap()
    }

    #[test]
    fn connect_then_view_reports_connected_sim() {
        let mut s = three_routers();
        s.connect(0);
        assert_eq!(
            s.view(0),
            "R1: IP=192.168.10.1 Port=830 Status=connected (sim)"
        );
        // idempotent
        s.connect(0);
        assert_eq!(s.routers[0].status, Status::Connected);
    }

    #[test]
    fn toggle_interface_is_an_involution() {
        let mut s = three_routers();
        let before = s.routers[0].interfaces["Gig0/0"];
        s.toggle_interface(0, "Gig0/0").unwrap();
        assert_eq!(s.routers[0].interfaces["Gig0/0"], LinkState::Up);
        s.toggle_interface(0, "Gig0/0").unwrap();
        assert_eq!(s.routers[0].interfaces["Gig0/0"], before);
    }

    #[test]
    fn toggle_unknown_interface_fails_and_leaves_router_unmutated() {
        let mut s = three_routers();
        let before = s.routers[0].clone();
        let err = s.toggle_interface(0, "Gig0/9").unwrap_err();
        assert_eq!(
            err,
            ActionError::UnknownInterface {
                router: "R1".into(),
                name: "Gig0/9".into(),
            }
        );
        assert_eq!(s.routers[0].interfaces, before.interfaces);
        assert_eq!(s.routers[0].status, before.status);
    }

    #[test]
    fn ping_requires_both_endpoints_connected() {
        let mut s = three_routers();
        s.connect(0);
        assert!(!s.ping(Some(0), Some(1)).unwrap());
        s.connect(1);
        assert!(s.ping(Some(0), Some(1)).unwrap());
        assert_eq!(last_line(&s), "Ping successful!");
        // connected vs unauthorized fails
        s.simulate_failure();
        s.connect(0);
        assert!(!s.ping(Some(0), Some(1)).unwrap());
        assert_eq!(last_line(&s), "Ping failed (simulated)");
    }

    #[test]
    fn ping_without_both_selections_is_a_missing_selection() {
        let mut s = three_routers();
        assert_eq!(s.ping(Some(0), None), Err(ActionError::MissingSelection));
        assert_eq!(s.ping(None, Some(1)), Err(ActionError::MissingSelection));
        // no state change, nothing logged
        assert!(s.console.is_empty());
    }

    #[test]
    fn set_bgp_with_empty_field_is_a_no_op() {
        let mut s = three_routers();
        s.set_bgp(0, "", "65000");
        assert!(s.routers[0].bgp.is_empty());
        s.set_bgp(0, "10.0.0.1", "");
        assert!(s.routers[0].bgp.is_empty());
        s.set_bgp(0, "10.0.0.1", "65000");
        assert_eq!(s.routers[0].bgp.neighbor_ip, "10.0.0.1");
        assert_eq!(s.routers[0].bgp.neighbor_as, "65000");
    }

    #[test]
    fn connect_all_and_simulate_failure_hit_every_router() {
        let mut s = three_routers();
        s.restart(1, Instant::now());
        s.connect_all();
        assert!(s.routers.iter().all(|r| r.status == Status::Connected));
        s.simulate_failure();
        assert!(s.routers.iter().all(|r| r.status == Status::Unauthorized));
        assert!(s.routers.iter().all(|r| r.simulated));
    }

    #[test]
    fn restart_completes_after_the_delay() {
        let mut s = three_routers();
        let t0 = Instant::now();
        s.restart(0, t0);
        assert_eq!(s.routers[0].status, Status::Restarting);
        assert!(s.restart_pending(0));
        // not yet due
        assert_eq!(s.tick(t0 + Duration::from_millis(1999)), 0);
        assert_eq!(s.routers[0].status, Status::Restarting);
        // due
        assert_eq!(s.tick(t0 + RESTART_DELAY), 1);
        assert_eq!(s.routers[0].status, Status::Connected);
        assert!(!s.restart_pending(0));
        assert_eq!(last_line(&s), "R1: Restart complete");
    }

    #[test]
    fn overlapping_restarts_complete_exactly_once_at_the_later_deadline() {
        let mut s = three_routers();
        let t0 = Instant::now();
        s.restart(0, t0);
        let t1 = t0 + Duration::from_millis(500);
        s.restart(0, t1);
        // first deadline passes: replaced, nothing completes
        assert_eq!(s.tick(t0 + RESTART_DELAY), 0);
        assert_eq!(s.routers[0].status, Status::Restarting);
        // second deadline completes once
        assert_eq!(s.tick(t1 + RESTART_DELAY), 1);
        assert_eq!(s.routers[0].status, Status::Connected);
        let completions = s
            .console
            .lines()
            .filter(|l| *l == "R1: Restart complete")
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn mutating_actions_set_the_refresh_flag() {
        let mut s = three_routers();
        assert!(s.take_dirty()); // initial render
        assert!(!s.take_dirty());
        s.connect(0);
        assert!(s.take_dirty());
        s.toggle_interface(0, "Gig0/1").unwrap();
        assert!(s.take_dirty());
    }
}
