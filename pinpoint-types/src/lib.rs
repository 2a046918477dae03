pub mod errors;
pub mod game;
pub mod messages;
pub mod player;
pub mod results;

/// Session identifier. Either a UUID or a short shareable join code.
pub type GameId = String;
pub type PlayerId = uuid::Uuid;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use messages::*;
pub use player::*;
pub use results::*;
