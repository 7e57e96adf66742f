//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod console;
pub mod paragraph;
pub mod router;
pub mod title;
pub mod topology;

pub use console::ConsolePanel;
pub use paragraph::ParagraphPanel;
pub use router::RouterPanel;
pub use title::TitlePanel;
pub use topology::TopologyPanel;
