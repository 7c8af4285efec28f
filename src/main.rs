// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use clap::Parser;
use household_builder::{init_logging, Settings};

fn main() -> Result<()> {
    let settings = Settings::parse();
    init_logging(&settings)?;

    tracing::info!(
        version = household_builder::VERSION,
        id_strategy = %settings.id_strategy,
        export_style = %settings.export_style,
        "starting household builder"
    );

    run_ui_mode(&settings)
}

#[cfg(feature = "tui")]
fn run_ui_mode(settings: &Settings) -> Result<()> {
    use household_builder::{Controller, HouseholdStore};

    let store = HouseholdStore::with_strategy(settings.id_strategy);
    let mut controller = Controller::new(store, settings.export_style);
    let mut app = ui::App::new();

    ui::run_ui(&mut app, &mut controller)?;

    tracing::info!(members = controller.store().len(), "form closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_settings: &Settings) -> Result<()> {
    eprintln!("❌ Interactive form not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
