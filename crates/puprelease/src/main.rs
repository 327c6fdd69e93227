use std::io;
use std::process::ExitCode;

use clap::Parser;
use puprelease::logging::init_tracing;
use puprelease::{report, run, Cli};
use puprelease_render::Console;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut console = Console::stdout().with_width(cli.width);
    let result = run(&cli, &mut console);

    let mut errors = Console::new(io::stderr()).with_width(cli.width);
    ExitCode::from(report(result, &mut errors))
}
