/// Main configuration module.
/// 
/// Re-exports submodules for game, server and anti-spam configuration.
pub mod anti_spam;
pub mod game;
pub mod server;
