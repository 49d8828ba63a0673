use clap::Parser;

use critterdeep::app;

fn main() {
    env_logger::init();
    log::info!("critterdeep starting up");

    if let Err(e) = app::run(app::Args::parse()) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
