use log::LevelFilter;
use simple_logger::SimpleLogger;

fn main() {
    if let Err(e) = SimpleLogger::new().with_level(LevelFilter::Info).init() {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::info!("fourop: 4-operator FM voice, use the keyboard or a MIDI controller to play");

    fourop::runtime::native::start();
}
