//! # Vitrin CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file
//! only invokes `cli::run()` and turns an error into exit status 1.
//!
//! ```text
//! vitrin import catalog.json
//! vitrin hero set IST-1 1
//! vitrin carousel add PRJ-7
//! vitrin media categorize PRJ-7 --exterior m1,m2 --interior m3
//! vitrin search 2+1 3+1
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
