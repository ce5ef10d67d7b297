//! Binary entry point: resolve the data file, start logging, load the library
//! for this session, and drive the Ratatui event loop until the user exits.
use personal_library_manager::{logging, run_app, store, App, Catalog, Store};

fn main() -> anyhow::Result<()> {
    let library_path = store::library_path()?;

    // Logging is optional; the manager works without it.
    if let Err(err) = store::log_path().and_then(|path| logging::init(&path)) {
        eprintln!("logging disabled: {err:#}");
    }

    let catalog = Catalog::open(Store::new(library_path));
    let mut app = App::new(catalog);
    run_app(&mut app)
}
