use anyhow::Result;

use chess_tournament::cli::Command;
use chess_tournament::config::AppConfig;
use chess_tournament::{
    CreateArgs, handle_create, handle_criteria, handle_export, handle_ranking, handle_record, handle_report, handle_rounds,
    handle_schedule, handle_search, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    let config = AppConfig::new().with_database_path(cli.database);
    execute_command(config, &cli.command)
}

fn execute_command(config: AppConfig, command: &Command) -> Result<()> {
    match command {
        Command::Create {
            name,
            players,
            win,
            draw,
            lose,
            speed,
            board,
            criteria,
        } => handle_create(
            config,
            CreateArgs {
                name,
                players,
                win: *win,
                draw: *draw,
                lose: *lose,
                speed,
                board,
                criteria,
            },
        ),
        Command::Search { text } => handle_search(config, text),
        Command::Criteria {
            tournament,
            add,
            remove,
            clean,
        } => handle_criteria(config, tournament, add, remove, *clean),
        Command::Schedule { tournament, sorted } => handle_schedule(config, tournament, *sorted),
        Command::Record {
            game,
            result,
            overwrite,
        } => handle_record(config, *game, result, *overwrite),
        Command::Report { game, result, email } => handle_report(config, *game, result, email),
        Command::Ranking { tournament, json } => handle_ranking(config, tournament, *json),
        Command::Rounds { tournament } => handle_rounds(config, tournament),
        Command::Export { tournament, output } => handle_export(config, tournament, output),
    }
}
