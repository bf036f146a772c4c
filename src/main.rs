use clap::Parser;
use idxlens::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
