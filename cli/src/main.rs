mod commands;
mod terminal;

use commands::{CommandLine, Commands, probe, regions};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let q: u8 = commands.quiet;

    logging::init_logging(commands.verbose, q);

    match commands.command {
        Commands::Probe(args) => {
            if !args.json {
                print::banner(q);
                print::header("getting ready to probe", q);
            }
            probe::probe(args, q).await
        }
        Commands::Regions { catalog } => {
            print::banner(q);
            regions::regions(catalog.as_deref(), q)
        }
    }
}
