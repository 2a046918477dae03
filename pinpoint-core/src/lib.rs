pub mod game_events;
pub mod game_state;
pub mod geodesy;
pub mod location;
pub mod scoring;
pub mod seeds;

// Re-export main components
pub use game_events::*;
pub use game_state::*;
pub use geodesy::*;
pub use location::*;
pub use scoring::*;
