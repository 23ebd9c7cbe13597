use clap::Parser;
use crane::core::dispatch::program_name;
use crane::utils::logger;
use crane::{CliConfig, CommandTable, Context, HttpClient};
use std::io::{self, Write};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    let program = std::env::args()
        .next()
        .map(|arg0| program_name(&arg0))
        .unwrap_or_else(|| "crane".to_string());
    let table = command_table();

    if let Err(e) = run(&config, &program, &table).await {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

#[cfg(feature = "deprecated")]
fn command_table() -> CommandTable {
    CommandTable::deprecated("tsuru")
}

#[cfg(not(feature = "deprecated"))]
fn command_table() -> CommandTable {
    CommandTable::standard()
}

async fn run(config: &CliConfig, program: &str, table: &CommandTable) -> crane::Result<()> {
    let mut stdout = io::stdout();

    let Some(name) = config.command.as_deref() else {
        write!(stdout, "{}", table.usage(program))?;
        return Ok(());
    };

    if name == "help" {
        let text = match config.args.first() {
            Some(command) => table.help(program, command)?,
            None => table.usage(program),
        };
        write!(stdout, "{}", text)?;
        return Ok(());
    }

    let command = table.lookup(program, name, config.args.len())?;
    let transport = HttpClient::from_overrides(config.overrides())?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stderr = io::stderr();

    let result = {
        let mut ctx = Context::new(config.args.clone(), &mut input, &mut stdout, &mut stderr);
        command.run(&mut ctx, &transport).await
    };
    stdout.flush()?;
    result
}
