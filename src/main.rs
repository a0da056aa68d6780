mod app;
mod config;
mod context;
mod error;
mod graphics;
mod math;
mod orbit;
mod scene;
mod sphere;
mod state;
mod terminal;
mod vertex;

use app::App;
use clap::Parser;
use config::Args;
use log::info;

/// Main function
pub fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    info!("{} {} starting", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let mut app = App::new(args)?;
    app.run()?;

    Ok(())
}
