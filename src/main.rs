//! src/main.rs
//!
//! Entrypoint delegating to `app::run()`.

mod app;
mod panels;
mod sim;
mod topology;
mod ui;

fn main() -> color_eyre::Result<()> {
    app::run()
}
