use std::io::{self, Write};
use std::process::exit;

use clap::Parser;

fn main() {
    pretty_env_logger::init();

    let cli = dirsize::Cli::parse();
    let lines = match dirsize::list_files(&cli) {
        Ok(lines) => lines,
        Err(err) => {
            eprintln!("error: {}", err);
            exit(1);
        }
    };

    let mut stdout = io::stdout().lock();
    for line in lines {
        if writeln!(stdout, "{}", line).is_err() {
            exit(1);
        }
    }
}
