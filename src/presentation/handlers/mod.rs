mod engines;
mod episode;
mod health;
pub mod response;
mod transcribe;

pub use engines::engines_handler;
pub use episode::parse_episode_handler;
pub use health::health_handler;
pub use transcribe::transcribe_handler;
