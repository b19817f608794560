//! A thin harness for trying a pattern against a subject from the command
//! line. Not part of the library's public contract: output formatting and
//! argument parsing live here precisely so they don't leak into `src/`.

use brex::regex::cp::Regex;
use clap::Parser;

/// Match a pattern in the extended backtracking regex language against a
/// subject string.
#[derive(Parser)]
struct Args {
    /// The pattern to compile.
    pattern: String,
    /// The subject to search.
    subject: String,
}

fn main() {
    let args = Args::parse();
    let re = match Regex::new(&args.pattern) {
        Ok(re) => re,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    match re.find(&args.subject) {
        Some(m) => println!("partial match: {:?} at {}..{}", &args.subject[m.span()], m.start(), m.end()),
        None => println!("no match"),
    }

    println!("exact match: {}", re.is_match(&args.subject));
}
