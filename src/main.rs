// glkpack - bundles the interpreter sources into minified scripts
// Entry point with clean separation of concerns

use glkpack::cli::CliHandler;

#[tokio::main]
async fn main() {
    let handler = CliHandler::new();

    if let Err(e) = handler.run().await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
