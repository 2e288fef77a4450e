use crate::domain::ScoringPoints;

const DEFAULT_DATABASE_PATH: &str = "chess_tournament.db";

pub struct ScoringSettings {
    pub win_points: f64,
    pub draw_points: f64,
    pub lose_points: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        let points = ScoringPoints::default();
        Self {
            win_points: points.win,
            draw_points: points.draw,
            lose_points: points.lose,
        }
    }
}

impl ScoringSettings {
    /// Tournament points, falling back to the defaults for anything not given
    pub fn points(&self, win: Option<f64>, draw: Option<f64>, lose: Option<f64>) -> ScoringPoints {
        ScoringPoints {
            win: win.unwrap_or(self.win_points),
            draw: draw.unwrap_or(self.draw_points),
            lose: lose.unwrap_or(self.lose_points),
        }
    }
}

pub struct DatabaseSettings {
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string()),
        }
    }
}

pub struct AppConfig {
    pub scoring: ScoringSettings,
    pub database: DatabaseSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scoring: ScoringSettings::default(),
            database: DatabaseSettings::default(),
        }
    }

    pub fn with_database_path(mut self, path: Option<String>) -> Self {
        if let Some(path) = path {
            self.database.path = path;
        }
        self
    }
}
