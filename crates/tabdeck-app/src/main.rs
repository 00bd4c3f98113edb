//! Main application entry point.

fn main() {
    env_logger::init();
    log::debug!("Starting TabDeck");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = pollster::block_on(tabdeck_app::App::run(&args)) {
        eprintln!("tabdeck: {}", e);
        std::process::exit(1);
    }
}
