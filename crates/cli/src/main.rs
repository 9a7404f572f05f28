use clap::Parser;
use safeher_cli::{commands, completions, interactive, Cli, Commands};
use safeher_common::{init_tracing_with_level, SystemConfig};
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = SystemConfig::load_or_default(&cli.config)?;
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing_with_level(level)?;

    let mut stdout = io::stdout().lock();
    match cli.command {
        Some(Commands::Assess { input, seed, record, pretty }) => {
            commands::assess(&config, input.as_deref(), seed, record, pretty, &mut stdout)?;
        }
        Some(Commands::Strip { input }) => {
            commands::strip(input.as_deref(), &mut stdout)?;
        }
        Some(Commands::History) => {
            commands::history(&config, &mut stdout)?;
        }
        Some(Commands::Prompt) => {
            commands::print_prompt(&mut stdout)?;
        }
        Some(Commands::Completions { shell }) => {
            completions::generate_to(shell, &mut stdout);
        }
        None => {
            drop(stdout);
            interactive::run(&config)?;
        }
    }

    Ok(())
}
