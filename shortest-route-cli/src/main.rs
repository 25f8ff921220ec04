//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    shortest_route_cli::init_logging();
    if let Err(err) = shortest_route_cli::run() {
        eprintln!("shortest-route: {err}");
        std::process::exit(1);
    }
}
