use anyhow::{Context, Result, bail};
use log::info;

use crate::config::AppConfig;
use crate::database::{self, DbConn, DbPool, SqliteRoundStore};
use crate::domain::{
    BoardType, Game, GameId, GameResult, Player, RankingSystem, Roster, Round, ScoringPoints, Tournament,
    TournamentSpeed,
};
use crate::pairing::{self, ScheduleOutcome};
use crate::ranking::{self, Ranking};

/// Everything needed to open a tournament
#[derive(Debug, Clone)]
pub struct NewTournament {
    pub name: String,
    pub scoring: ScoringPoints,
    pub speed: TournamentSpeed,
    pub board_type: BoardType,
    pub criteria: Vec<RankingSystem>,
    pub players: Vec<Player>,
}

/// Ranking together with the data it was computed from
#[derive(Debug, Clone)]
pub struct Standings {
    pub tournament: Tournament,
    pub roster: Roster,
    pub ranking: Ranking,
}

#[derive(Debug, Clone)]
pub struct RoundWithGames {
    pub round: Round,
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub players: usize,
    pub rounds: u32,
    pub rounds_with_games: u32,
    pub latest_with_games: Option<String>,
}

pub struct TournamentService {
    pool: DbPool,
}

impl TournamentService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let pool = database::create_pool(&config.database.path)?;
        info!("Using database {}", config.database.path);
        Self::with_pool(pool)
    }

    pub fn with_pool(pool: DbPool) -> Result<Self> {
        let conn = database::get_connection(&pool)?;
        database::setup::ensure_schema(&conn)?;
        drop(conn);

        Ok(Self { pool })
    }

    fn connection(&self) -> Result<DbConn> {
        database::get_connection(&self.pool)
    }

    pub fn create_tournament(&self, request: &NewTournament) -> Result<Tournament> {
        let mut conn = self.connection()?;
        let tx = conn.transaction().context("Failed to start transaction")?;

        let mut tournament = database::tournaments::insert_tournament(
            &tx,
            &request.name,
            &request.scoring,
            request.speed,
            request.board_type,
        )?;

        for criterion in &request.criteria {
            tournament.add_to_ranking_list(*criterion);
        }
        database::tournaments::save_ranking_list(&tx, &tournament)?;

        for player in &request.players {
            let stored = database::players::upsert_player(&tx, player)?;
            database::players::enrol_player(&tx, tournament.id, stored.id)?;
        }

        tx.commit().context("Failed to commit new tournament")?;

        info!(
            "Created tournament {} with {} players",
            tournament.name,
            request.players.len()
        );
        Ok(tournament)
    }

    fn require_tournament(&self, conn: &DbConn, key: &str) -> Result<Tournament> {
        database::tournaments::find_by_key(conn, key)?
            .ok_or_else(|| anyhow::anyhow!("Tournament {} not found", key))
    }

    pub fn search_tournaments(&self, text: &str) -> Result<Vec<Tournament>> {
        let conn = self.connection()?;
        let found = database::tournaments::search_by_name(&conn, text)?;

        info!("Found {} tournaments matching {:?}", found.len(), text.trim());
        Ok(found)
    }

    /// Edits the tie-break list: clears it when `clean` is set, then drops
    /// `remove` and appends `add`, keeping the order given.
    pub fn update_criteria(
        &self,
        key: &str,
        add: &[RankingSystem],
        remove: &[RankingSystem],
        clean: bool,
    ) -> Result<Tournament> {
        let mut conn = self.connection()?;
        let tx = conn.transaction().context("Failed to start transaction")?;
        let mut tournament = database::tournaments::find_by_key(&tx, key)?
            .ok_or_else(|| anyhow::anyhow!("Tournament {} not found", key))?;

        if clean {
            tournament.clean_ranking_list();
        }
        for criterion in remove {
            tournament.remove_from_ranking_list(*criterion);
        }
        for criterion in add {
            tournament.add_to_ranking_list(*criterion);
        }

        database::tournaments::save_ranking_list(&tx, &tournament)?;
        tx.commit().context("Failed to commit ranking criteria")?;

        let codes: Vec<_> = tournament.ranking_list.iter().map(|c| c.as_str()).collect();
        info!("Ranking criteria of {}: {}", tournament.name, codes.join(","));
        Ok(tournament)
    }

    /// Generates and stores the round robin. An unknown tournament or an
    /// empty roster yields a skipped outcome, not an error.
    pub fn schedule(&self, key: &str, sorted: bool) -> Result<ScheduleOutcome> {
        let mut conn = self.connection()?;
        let tournament = database::tournaments::find_by_key(&conn, key)?;

        let roster = match &tournament {
            Some(t) => self.load_roster(&conn, t, sorted)?,
            None => Roster::default(),
        };

        let mut store = SqliteRoundStore::new(&mut conn);
        pairing::create_rounds(tournament.as_ref(), &roster, &[], &mut store)
    }

    fn load_roster(&self, conn: &DbConn, tournament: &Tournament, sorted: bool) -> Result<Roster> {
        let roster = database::players::list_roster(conn, tournament.id)?;

        if sorted {
            Ok(roster.sorted_by_rating(tournament.speed, tournament.board_type))
        } else {
            Ok(roster)
        }
    }

    pub fn roster(&self, key: &str) -> Result<Roster> {
        let conn = self.connection()?;
        let tournament = self.require_tournament(&conn, key)?;
        database::players::list_roster(&conn, tournament.id)
    }

    fn require_game(&self, conn: &DbConn, game_id: GameId) -> Result<Game> {
        database::games::find_by_id(conn, game_id)?
            .ok_or_else(|| anyhow::anyhow!("Game {} not found", game_id))
    }

    /// Referee entry: any result but `*`. A finished game keeps its result
    /// unless `overwrite` is set.
    pub fn record_result(&self, game_id: GameId, code: &str, overwrite: bool) -> Result<Game> {
        let result = GameResult::from_reported(code)?;
        let conn = self.connection()?;
        let game = self.require_game(&conn, game_id)?;

        if game.finished && !overwrite {
            bail!(
                "Game {} is already finished with {}, pass overwrite to change it",
                game_id,
                game.result.as_str()
            );
        }

        self.store_result(&conn, game_id, result)
    }

    /// Player entry: `w`, `b` or `d` for an unfinished game, reported by
    /// one of its two players, identified by email.
    pub fn report_result(&self, game_id: GameId, code: &str, email: &str) -> Result<Game> {
        let result = GameResult::from_reported(code)?;
        if !result.is_over_the_board() {
            bail!("Invalid result value: {}", code);
        }

        let conn = self.connection()?;
        let game = self.require_game(&conn, game_id)?;

        if game.finished {
            bail!("Game {} is blocked, only an administrator can update it", game_id);
        }
        if !self.plays_in(&conn, &game, email)? {
            bail!("Email does not match any player in game {}", game_id);
        }

        self.store_result(&conn, game_id, result)
    }

    fn plays_in(&self, conn: &DbConn, game: &Game, email: &str) -> Result<bool> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Ok(false);
        }

        for player_id in [game.white, game.black].into_iter().flatten() {
            let player = database::players::find_by_id(conn, player_id)?;
            let matches = player
                .and_then(|p| p.email)
                .is_some_and(|stored| stored.trim().to_lowercase() == email);
            if matches {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn store_result(&self, conn: &DbConn, game_id: GameId, result: GameResult) -> Result<Game> {
        let game = database::games::record_result(conn, game_id, result)?;

        info!("Recorded {} for game {}", result.label(), game_id);
        Ok(game)
    }

    pub fn standings(&self, key: &str) -> Result<Standings> {
        let conn = self.connection()?;
        let tournament = self.require_tournament(&conn, key)?;
        let roster = database::players::list_roster(&conn, tournament.id)?;
        let games = database::games::list_by_tournament(&conn, tournament.id)?;

        let ranking = ranking::compute_ranking(&tournament, &roster, &games);

        Ok(Standings {
            tournament,
            roster,
            ranking,
        })
    }

    pub fn rounds(&self, key: &str) -> Result<(Roster, Vec<RoundWithGames>)> {
        let conn = self.connection()?;
        let tournament = self.require_tournament(&conn, key)?;
        let roster = database::players::list_roster(&conn, tournament.id)?;

        let rounds = database::rounds::list_by_tournament(&conn, tournament.id)?
            .into_iter()
            .map(|round| {
                let games = database::games::list_by_round(&conn, round.id)?;
                Ok(RoundWithGames { round, games })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((roster, rounds))
    }

    pub fn round_summary(&self, key: &str) -> Result<RoundSummary> {
        let conn = self.connection()?;
        let tournament = self.require_tournament(&conn, key)?;

        Ok(RoundSummary {
            players: database::players::count_players(&conn, tournament.id)?,
            rounds: database::rounds::count_rounds(&conn, tournament.id)?,
            rounds_with_games: database::rounds::count_rounds_with_games(&conn, tournament.id)?,
            latest_with_games: database::rounds::latest_round_with_games(&conn, tournament.id)?
                .map(|r| r.name),
        })
    }
}
