use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "chess tournament round-robin scheduler")]
pub struct Cli {
    /// SQLite database file (defaults to DATABASE_PATH or chess_tournament.db)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Create a tournament and enrol the players listed in a JSON file
    Create {
        #[arg(short, long)]
        name: String,
        /// JSON array of players
        #[arg(short, long)]
        players: String,
        #[arg(long)]
        win: Option<f64>,
        #[arg(long)]
        draw: Option<f64>,
        #[arg(long)]
        lose: Option<f64>,
        /// BU, BL, RA or CL
        #[arg(long, default_value = "RA")]
        speed: String,
        /// LIC or OTB
        #[arg(long, default_value = "LIC")]
        board: String,
        /// Tie-break criteria after plain score, e.g. WI,BT
        #[arg(long, value_delimiter = ',')]
        criteria: Vec<String>,
    },
    /// Find tournaments whose name contains the text, newest first
    Search {
        text: String,
    },
    /// Change the tie-break criteria of a tournament
    Criteria {
        #[arg(short, long)]
        tournament: String,
        /// Criteria to append, e.g. WI,BT
        #[arg(long, value_delimiter = ',')]
        add: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        remove: Vec<String>,
        /// Empty the list before applying the other changes
        #[arg(long)]
        clean: bool,
    },
    /// Generate every round of the round robin
    Schedule {
        /// Tournament name or id
        #[arg(short, long)]
        tournament: String,
        /// Seat players by rating for the tournament category
        #[arg(long)]
        sorted: bool,
    },
    /// Record the result of a game as referee
    Record {
        #[arg(short, long)]
        game: i64,
        /// w, b, = (or d), +, F, U, H or Z
        #[arg(short, long, allow_hyphen_values = true)]
        result: String,
        /// Replace the result of an already finished game
        #[arg(long)]
        overwrite: bool,
    },
    /// Report the result of your own unfinished game
    Report {
        #[arg(short, long)]
        game: i64,
        /// w, b or d
        #[arg(short, long)]
        result: String,
        /// Email of the white or black player
        #[arg(short, long)]
        email: String,
    },
    /// Print the current ranking
    Ranking {
        #[arg(short, long)]
        tournament: String,
        #[arg(long)]
        json: bool,
    },
    /// List rounds and their games
    Rounds {
        #[arg(short, long)]
        tournament: String,
    },
    /// Write the tournament roster to a JSON file
    Export {
        #[arg(short, long)]
        tournament: String,
        #[arg(short, long)]
        output: String,
    },
}
