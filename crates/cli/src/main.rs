fn main() {
    if let Err(e) = satchel_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
