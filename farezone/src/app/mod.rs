mod cli_error;
pub mod inspect;
pub mod replay;
mod replay_configuration;
mod replay_script;

pub use cli_error::FarezoneCliError;
pub use replay_configuration::ReplayConfiguration;
pub use replay_script::{ReplayScript, ReplayStep};
