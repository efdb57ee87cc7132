pub mod config;
pub mod undo;

pub use config::AppConfig;
pub use undo::UndoSettings;
