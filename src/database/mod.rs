pub mod connection;
pub mod games;
pub mod models;
pub mod players;
pub mod rounds;
pub mod setup;
mod store;
pub mod tournaments;

pub use connection::{DbConn, DbPool, create_memory_pool, create_pool, get_connection};
pub use store::SqliteRoundStore;
