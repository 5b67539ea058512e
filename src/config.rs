use std::path::PathBuf;

/// Server configuration, read from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Directory holding the data file.
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("HELLO_API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let data_dir = std::env::var("HELLO_API_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("hello-api")
            });

        Self { port, data_dir }
    }

    /// Path of the JSON document holding the greeting collection.
    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join("data.json")
    }
}
