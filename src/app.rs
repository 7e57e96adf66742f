//! src/app.rs
//!
//! Multi-router simulator TUI.
//! Loads the router list from `routers.json`, then runs a terminal UI where
//! every action is simulated: state changes are in-memory mutations, no real
//! network I/O happens anywhere.
//!
//! # Screen Layout
//!
//! - Title bar
//! - Router column (one panel per router: status dot, interfaces, BGP)
//!   next to the topology canvas (router triangle + ODL controller node)
//! - Console log (every action appends a line)
//! - Status line + controls help
//!
//! # Keyboard Controls
//!
//! - **Tab** — Cycle the focused router. The focused panel is highlighted.
//! - **c** — Simulated connect for the focused router.
//! - **v** — Log a one-line summary of the focused router.
//! - **r** — Simulated restart: status goes to restarting, then back to
//!   connected two seconds later. Restarting again before completion
//!   replaces the pending deadline, so only one completion fires.
//! - **1/2/3** — Toggle the focused router's Gig0/0, Gig0/1, Gig0/2.
//! - **b** — Set the focused router's BGP neighbor. The status line prompts
//!   for the neighbor IP, then the AS number; **Enter** advances/commits,
//!   **Esc** cancels. Leaving either field empty keeps the old values.
//! - **f** / **t** — Mark the focused router as ping source / destination.
//! - **p** — Simulated ping between the marked routers. Succeeds iff both
//!   are currently connected. Warns if either endpoint is unmarked.
//! - **A** — Connect every router.
//! - **X** — Simulate an ODL controller failure (every router unauthorized).
//! - **q** — Quit and restore the terminal.
//!
//! # Refresh Model
//!
//! Every mutating action sets a refresh flag on the shared state. The event
//! loop re-reads the full router sequence and redraws whenever the flag is
//! set, a key is pressed, or the terminal is resized; there is no
//! incremental diffing. Pending restart deadlines are checked on every pass
//! of the loop, so completions ride the same 50ms cadence.

use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::DefaultTerminal;
use ratatui::layout::Constraint;

use crate::panels::{ConsolePanel, ParagraphPanel, RouterPanel, TitlePanel, TopologyPanel};
use crate::sim::router::INTERFACE_NAMES;
use crate::sim::{SharedSim, SimState, registry};
use crate::ui::{Node, cols, leaf, rows};

/// Router list read once at startup; malformed input is fatal.
const ROUTERS_FILE: &str = "routers.json";

const HELP: &str = "TAB=Focus  C=Connect  V=View  R=Restart  1-3=Toggle Gig0/x  \
                    B=BGP  F/T=Ping from/to  P=Ping  A=Connect all  X=ODL failure  Q=Quit";

/// How long the loop waits for input before checking restart deadlines.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of handling one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Inline text-entry state for the BGP prompts.
#[derive(Debug)]
enum InputMode {
    Normal,
    BgpIp { router: usize, buf: String },
    BgpAs { router: usize, ip: String, buf: String },
}

/// Per-session UI state: focus, ping endpoint selection, input mode.
/// Owned by the event loop; the simulation state lives in [`SharedSim`].
pub struct App {
    focused: usize,
    ping_from: Option<usize>,
    ping_to: Option<usize>,
    input: InputMode,
}

impl App {
    pub fn new() -> Self {
        Self {
            focused: 0,
            ping_from: None,
            ping_to: None,
            input: InputMode::Normal,
        }
    }

    /// Handle one key press against the simulation state.
    pub fn handle_key(&mut self, key: KeyEvent, state: &mut SimState) -> Flow {
        match std::mem::replace(&mut self.input, InputMode::Normal) {
            InputMode::Normal => return self.handle_normal(key.code, state),
            InputMode::BgpIp { router, mut buf } => match key.code {
                KeyCode::Enter => {
                    self.input = InputMode::BgpAs {
                        router,
                        ip: buf,
                        buf: String::new(),
                    };
                }
                KeyCode::Esc => {}
                KeyCode::Backspace => {
                    buf.pop();
                    self.input = InputMode::BgpIp { router, buf };
                }
                KeyCode::Char(c) => {
                    buf.push(c);
                    self.input = InputMode::BgpIp { router, buf };
                }
                _ => self.input = InputMode::BgpIp { router, buf },
            },
            InputMode::BgpAs {
                router,
                ip,
                mut buf,
            } => match key.code {
                // no-op when either field was left empty
                KeyCode::Enter => state.set_bgp(router, &ip, &buf),
                KeyCode::Esc => {}
                KeyCode::Backspace => {
                    buf.pop();
                    self.input = InputMode::BgpAs { router, ip, buf };
                }
                KeyCode::Char(c) => {
                    buf.push(c);
                    self.input = InputMode::BgpAs { router, ip, buf };
                }
                _ => self.input = InputMode::BgpAs { router, ip, buf },
            },
        }
        Flow::Continue
    }

    fn handle_normal(&mut self, code: KeyCode, state: &mut SimState) -> Flow {
        let n = state.routers.len();
        if n == 0 {
            return match code {
                KeyCode::Char('q') | KeyCode::Char('Q') => Flow::Quit,
                _ => Flow::Continue,
            };
        }
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return Flow::Quit,
            KeyCode::Tab => self.focused = (self.focused + 1) % n,
            KeyCode::Char('c') => state.connect(self.focused),
            KeyCode::Char('v') => {
                state.view(self.focused);
            }
            KeyCode::Char('r') => state.restart(self.focused, Instant::now()),
            KeyCode::Char(d @ '1'..='3') => {
                let name = INTERFACE_NAMES[d as usize - '1' as usize];
                // recoverable: logged and ignored
                if let Err(e) = state.toggle_interface(self.focused, name) {
                    state.warn(&e);
                }
            }
            KeyCode::Char('b') => {
                self.input = InputMode::BgpIp {
                    router: self.focused,
                    buf: String::new(),
                };
            }
            KeyCode::Char('f') => self.ping_from = Some(self.focused),
            KeyCode::Char('t') => self.ping_to = Some(self.focused),
            KeyCode::Char('p') => {
                if let Err(e) = state.ping(self.ping_from, self.ping_to) {
                    state.warn(&e);
                }
            }
            KeyCode::Char('A') => state.connect_all(),
            KeyCode::Char('X') => state.simulate_failure(),
            _ => {}
        }
        Flow::Continue
    }

    /// Text for the status line: focus and ping selection, or the active
    /// BGP prompt.
    fn status_line(&self, state: &SimState) -> String {
        let id = |sel: Option<usize>| {
            sel.and_then(|i| state.routers.get(i))
                .map(|r| r.id.as_str())
                .unwrap_or("-")
                .to_string()
        };
        match &self.input {
            InputMode::Normal => format!(
                "Focused: {}  Ping: {} -> {}",
                id(Some(self.focused)),
                id(self.ping_from),
                id(self.ping_to)
            ),
            InputMode::BgpIp { router, buf } => {
                format!("BGP neighbor IP for {}: {buf}_", id(Some(*router)))
            }
            InputMode::BgpAs { router, buf, .. } => {
                format!("BGP neighbor AS for {}: {buf}_", id(Some(*router)))
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Compose the frame's panel tree from the current state.
fn build_tree(shared: &SharedSim, app: &App) -> Node {
    let (router_count, status_text) = {
        let state = shared.read().unwrap();
        (state.routers.len(), app.status_line(&state))
    };

    let mut router_panels: Vec<Node> = Vec::new();
    let mut router_constraints: Vec<Constraint> = Vec::new();
    for i in 0..router_count {
        let mut panel = RouterPanel::new(shared.clone(), i);
        panel.highlighted = i == app.focused;
        router_panels.push(leaf(panel));
        router_constraints.push(Constraint::Ratio(1, router_count as u32));
    }

    rows(
        vec![
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(8),
            Constraint::Length(4),
        ],
        vec![
            leaf(TitlePanel::new("Multi-Router Simulator")),
            cols(
                vec![Constraint::Percentage(45), Constraint::Percentage(55)],
                vec![
                    rows(router_constraints, router_panels),
                    leaf(TopologyPanel::new(shared.clone())),
                ],
            ),
            leaf(ConsolePanel::new(shared.clone())),
            cols(
                vec![Constraint::Percentage(40), Constraint::Percentage(60)],
                vec![
                    leaf(ParagraphPanel::new(status_text, "Status")),
                    leaf(ParagraphPanel::new(HELP, "Controls")),
                ],
            ),
        ],
    )
}

fn event_loop(terminal: &mut DefaultTerminal, shared: &SharedSim) -> Result<()> {
    let mut app = App::new();
    let mut redraw = true;

    loop {
        shared.write().unwrap().tick(Instant::now());
        if shared.write().unwrap().take_dirty() {
            redraw = true;
        }
        if redraw {
            let root = build_tree(shared, &app);
            terminal.draw(|f| root.draw(f, f.area()))?;
            redraw = false;
        }

        if crossterm::event::poll(POLL_INTERVAL)? {
            match crossterm::event::read()? {
                Event::Key(key) => {
                    let mut state = shared.write().unwrap();
                    if app.handle_key(key, &mut state) == Flow::Quit {
                        return Ok(());
                    }
                    drop(state);
                    redraw = true;
                }
                Event::Resize(_, _) => redraw = true,
                _ => {}
            }
        }
    }
}

pub fn run() -> Result<()> {
    color_eyre::install()?;
    // fatal before the terminal enters raw mode
    let routers = registry::load(Path::new(ROUTERS_FILE))?;
    let shared: SharedSim = Arc::new(RwLock::new(SimState::new(routers)));

    let mut terminal = ratatui::init();
    let res = event_loop(&mut terminal, &shared);
    ratatui::restore();
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Status;

    fn state() -> SimState {
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

    fn press(app: &mut App, state: &mut SimState, code: KeyCode) -> Flow {
        app.handle_key(KeyEvent::from(code), state)
    }

    fn type_str(app: &mut App, state: &mut SimState, text: &str) {
        for c in text.chars() {
            press(app, state, KeyCode::Char(c));
        }
    }

    #[test]
    fn q_quits_and_tab_cycles_focus() {
        let mut app = App::new();
        let mut s = state();
        assert_eq!(press(&mut app, &mut s, KeyCode::Tab), Flow::Continue);
        assert_eq!(app.focused, 1);
        press(&mut app, &mut s, KeyCode::Tab);
        press(&mut app, &mut s, KeyCode::Tab);
        assert_eq!(app.focused, 0);
        assert_eq!(press(&mut app, &mut s, KeyCode::Char('q')), Flow::Quit);
    }

    #[test]
    fn connect_and_interface_keys_act_on_the_focused_router() {
        let mut app = App::new();
        let mut s = state();
        press(&mut app, &mut s, KeyCode::Tab);
        press(&mut app, &mut s, KeyCode::Char('c'));
        assert_eq!(s.routers[1].status, Status::Connected);
        assert_eq!(s.routers[0].status, Status::Disconnected);
        press(&mut app, &mut s, KeyCode::Char('2'));
        assert_eq!(
            s.routers[1].interfaces["Gig0/1"],
            crate::sim::LinkState::Up
        );
    }

    #[test]
    fn bgp_prompt_flow_commits_both_fields() {
        let mut app = App::new();
        let mut s = state();
        press(&mut app, &mut s, KeyCode::Char('b'));
        type_str(&mut app, &mut s, "10.0.0.2");
        press(&mut app, &mut s, KeyCode::Enter);
        type_str(&mut app, &mut s, "65000");
        press(&mut app, &mut s, KeyCode::Enter);
        assert_eq!(s.routers[0].bgp.neighbor_ip, "10.0.0.2");
        assert_eq!(s.routers[0].bgp.neighbor_as, "65000");
    }

    #[test]
    fn bgp_prompt_escape_or_empty_field_keeps_old_values() {
        let mut app = App::new();
        let mut s = state();
        s.set_bgp(0, "10.0.0.9", "64512");

        press(&mut app, &mut s, KeyCode::Char('b'));
        type_str(&mut app, &mut s, "10.1.1.1");
        press(&mut app, &mut s, KeyCode::Esc);
        assert_eq!(s.routers[0].bgp.neighbor_ip, "10.0.0.9");

        // empty AS field: commit is a no-op
        press(&mut app, &mut s, KeyCode::Char('b'));
        type_str(&mut app, &mut s, "10.1.1.1");
        press(&mut app, &mut s, KeyCode::Enter);
        press(&mut app, &mut s, KeyCode::Enter);
        assert_eq!(s.routers[0].bgp.neighbor_ip, "10.0.0.9");
        assert_eq!(s.routers[0].bgp.neighbor_as, "64512");
    }

    #[test]
    fn bgp_prompt_swallows_action_keys() {
        let mut app = App::new();
        let mut s = state();
        press(&mut app, &mut s, KeyCode::Char('b'));
        // 'c' is text here, not a connect action
        press(&mut app, &mut s, KeyCode::Char('c'));
        assert_eq!(s.routers[0].status, Status::Disconnected);
        let line = app.status_line(&s);
        assert_eq!(line, "BGP neighbor IP for R1: c_");
    }

    #[test]
    fn ping_without_selection_warns_and_mutates_nothing() {
        let mut app = App::new();
        let mut s = state();
        press(&mut app, &mut s, KeyCode::Char('p'));
        let last = s.console.lines().last().unwrap().to_string();
        assert_eq!(last, "warning: select both ping endpoints first");
        assert!(s.routers.iter().all(|r| r.status == Status::Disconnected));
    }

    #[test]
    fn ping_selection_keys_mark_endpoints() {
        let mut app = App::new();
        let mut s = state();
        press(&mut app, &mut s, KeyCode::Char('f'));
        press(&mut app, &mut s, KeyCode::Tab);
        press(&mut app, &mut s, KeyCode::Char('t'));
        press(&mut app, &mut s, KeyCode::Char('A'));
        press(&mut app, &mut s, KeyCode::Char('p'));
        let last = s.console.lines().last().unwrap().to_string();
        assert_eq!(last, "Ping successful!");
        assert_eq!(app.status_line(&s), "Focused: R2  Ping: R1 -> R2");
    }
}
