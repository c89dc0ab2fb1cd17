use std::env;
use std::path::PathBuf;

/// File name of the SQLite database inside the Gazette directory
pub const DATABASE_FILE_NAME: &str = "gazette.db";

/// Get the path to the Gazette directory (~/.gazette)
pub fn gazette_dir() -> PathBuf {
    // HOME wins so tests can point it at a temp dir
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".gazette")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gazette")
    }
}

/// Get the default database path (~/.gazette/gazette.db)
pub fn database_file() -> PathBuf {
    gazette_dir().join(DATABASE_FILE_NAME)
}
