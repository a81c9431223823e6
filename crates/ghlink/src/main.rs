use std::process::ExitCode;

use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let cli = ghlink::cli::Cli::parse();
    ghlink::init(cli.verbose);

    ghlink::cli::run(cli)
}
