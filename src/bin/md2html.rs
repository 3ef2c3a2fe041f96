//! Command-line interface for md2html
//! Converts a Markdown file into a sibling HTML file.
//!
//! Usage:
//!   md2html `<path>`  - Convert path.md into path.html

use clap::{Arg, Command};
use std::path::PathBuf;

fn main() {
    let matches = Command::new("md2html")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting Markdown files to HTML")
        .arg(
            Arg::new("path")
                .help("Path to the markdown (.md) file to convert")
                .required(true)
                .index(1),
        )
        .get_matches();

    let path = matches.get_one::<String>("path").unwrap();
    handle_convert_command(path);
}

/// Handle the conversion
fn handle_convert_command(path: &str) {
    let input = PathBuf::from(path);
    match md2html::convert_file(&input) {
        Ok(output) => {
            println!("Converted {} to {}", input.display(), output.display());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
