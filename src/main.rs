use std::env;
use std::process;

use opticlink::cli;

fn main() {
    let args: Vec<String> = env::args().collect();

    let _ = cli::Config::run(&args).unwrap_or_else(|err| {
        println!();
        cli::print_error(&err.to_string());
        println!();
        cli::print_help();
        println!();
        // repeat the error after the help text so it is the last thing on screen
        cli::print_error(&err.to_string());
        process::exit(1);
    });
}
