use archtest::cli::{Cli, Command};
use archtest::logging::init_tracing;
use archtest::{cmd_check, cmd_init, cmd_walk};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Command::Check(args) => cmd_check(args),
        Command::Walk(args) => cmd_walk(args),
        Command::Init(args) => cmd_init(args),
    };

    std::process::exit(exit_code);
}
