use clap::Parser;
use miette::Result;
use traitmix::cli::{Cli, Commands};
use traitmix::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => traitmix::cli::build::run(args, &printer)?,
        Commands::Validate(args) => traitmix::cli::validate::run(args, &printer)?,
        Commands::Stats(args) => traitmix::cli::stats::run(args, &printer)?,
        Commands::Completions(args) => traitmix::cli::completions::run(args)?,
    }

    Ok(())
}
