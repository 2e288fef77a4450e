pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod pairing;
pub mod ranking;
pub mod roster_file;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::config::AppConfig;
use crate::domain::{BoardType, GameId, RankingSystem, TournamentSpeed};
use crate::pairing::ScheduleOutcome;
use crate::services::{NewTournament, TournamentService, report};

pub fn interpret() -> Cli {
    Cli::parse()
}

pub struct CreateArgs<'a> {
    pub name: &'a str,
    pub players: &'a str,
    pub win: Option<f64>,
    pub draw: Option<f64>,
    pub lose: Option<f64>,
    pub speed: &'a str,
    pub board: &'a str,
    pub criteria: &'a [String],
}

fn parse_criteria(codes: &[String]) -> Result<Vec<RankingSystem>> {
    codes
        .iter()
        .map(|code| RankingSystem::from_code(code.trim()))
        .collect()
}

pub fn handle_create(config: AppConfig, args: CreateArgs) -> Result<()> {
    let criteria = parse_criteria(args.criteria)?;

    let request = NewTournament {
        name: args.name.to_string(),
        scoring: config.scoring.points(args.win, args.draw, args.lose),
        speed: TournamentSpeed::from_code(args.speed)?,
        board_type: BoardType::from_code(args.board)?,
        criteria,
        players: roster_file::load_players(args.players)?,
    };

    let service = TournamentService::new(&config)?;
    let tournament = service.create_tournament(&request)?;
    println!("Created tournament {} (id {})", tournament.name, tournament.id);
    Ok(())
}

pub fn handle_criteria(
    config: AppConfig,
    tournament: &str,
    add: &[String],
    remove: &[String],
    clean: bool,
) -> Result<()> {
    let service = TournamentService::new(&config)?;
    let updated = service.update_criteria(tournament, &parse_criteria(add)?, &parse_criteria(remove)?, clean)?;

    let codes: Vec<_> = updated.ranking_list.iter().map(|c| c.as_str()).collect();
    println!("Ranking criteria of {}: {}", updated.name, codes.join(","));
    Ok(())
}

pub fn handle_schedule(config: AppConfig, tournament: &str, sorted: bool) -> Result<()> {
    let service = TournamentService::new(&config)?;

    match service.schedule(tournament, sorted)? {
        ScheduleOutcome::Skipped(reason) => println!("{}", reason.message()),
        ScheduleOutcome::Created { rounds, pairings } => {
            println!("Created {} rounds with {} pairings", rounds, pairings)
        }
    }
    Ok(())
}

pub fn handle_search(config: AppConfig, text: &str) -> Result<()> {
    let service = TournamentService::new(&config)?;
    let found = service.search_tournaments(text)?;
    println!("{}", report::tournament_list(&found));
    Ok(())
}

pub fn handle_record(config: AppConfig, game: GameId, result: &str, overwrite: bool) -> Result<()> {
    let service = TournamentService::new(&config)?;
    let game = service.record_result(game, result, overwrite)?;
    println!("Game {} finished: {}", game.id, game.result.label());
    Ok(())
}

pub fn handle_report(config: AppConfig, game: GameId, result: &str, email: &str) -> Result<()> {
    let service = TournamentService::new(&config)?;
    let game = service.report_result(game, result, email)?;
    println!("Game {} reported: {}", game.id, game.result.label());
    Ok(())
}

pub fn handle_ranking(config: AppConfig, tournament: &str, json: bool) -> Result<()> {
    let service = TournamentService::new(&config)?;
    let standings = service.standings(tournament)?;

    if json {
        println!("{}", report::ranking_json(&standings)?);
    } else {
        println!("{}", report::ranking_table(&standings));
    }
    Ok(())
}

pub fn handle_rounds(config: AppConfig, tournament: &str) -> Result<()> {
    let service = TournamentService::new(&config)?;
    let (roster, rounds) = service.rounds(tournament)?;
    let summary = service.round_summary(tournament)?;

    println!("{}", report::rounds_listing(&roster, &rounds));
    println!(
        "{} players, {} rounds, {} with games, latest: {}",
        summary.players,
        summary.rounds,
        summary.rounds_with_games,
        summary.latest_with_games.as_deref().unwrap_or("-")
    );
    Ok(())
}

pub fn handle_export(config: AppConfig, tournament: &str, output: &str) -> Result<()> {
    let service = TournamentService::new(&config)?;
    let roster = service.roster(tournament)?;
    roster_file::save_players(output, roster.players())?;
    println!("Wrote {} players to {}", roster.len(), output);
    Ok(())
}
