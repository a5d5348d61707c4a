// ==========================================
// Class Assign - config layer
// ==========================================
// Storage: config_kv table, global scope only
// ==========================================

pub mod config_manager;
pub mod settings_reader;

pub use config_manager::{config_keys, ConfigManager};
pub use settings_reader::SettingsReader;
