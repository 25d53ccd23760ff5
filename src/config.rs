use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

const API_KEY_FILE: &str = "api_key";
const SETTINGS_FILE: &str = "matrix_settings.json";

/// Settings shared with the matrix server; field names are PascalCase on
/// disk because the server side wrote the file.
#[derive(Debug, Deserialize)]
struct MatrixSettings {
    #[serde(rename = "ServerUrl")]
    server_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
    /// Base64 of the api_key file contents, ready for the Authorization
    /// header. Encoded once here, reused for every request.
    pub encoded_api_key: String,
}

impl Config {
    /// Load configuration from the matrix data directory.
    ///
    /// The directory defaults to `{cwd}/Matrix/Data` and can be overridden
    /// with the `MATRIX_DATA_DIR` environment variable (a `.env` file is
    /// honored). Missing or malformed files are fatal.
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Load environment variables
        dotenv::dotenv().ok();

        let data_dir = match env::var("MATRIX_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => env::current_dir()?.join("Matrix").join("Data"),
        };

        Self::from_data_dir(&data_dir)
    }

    pub fn from_data_dir(data_dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let key_path = data_dir.join(API_KEY_FILE);
        let key = fs::read(&key_path)
            .map_err(|e| format!("Failed to read api key from {:?}: {}", key_path, e))?;

        // The key file is used verbatim, trailing whitespace included
        let encoded_api_key = BASE64.encode(&key);

        let settings_path = data_dir.join(SETTINGS_FILE);
        let settings_raw = fs::read_to_string(&settings_path)
            .map_err(|e| format!("Failed to read settings from {:?}: {}", settings_path, e))?;
        let settings: MatrixSettings = serde_json::from_str(&settings_raw)
            .map_err(|e| format!("Invalid settings file {:?}: {}", settings_path, e))?;

        Ok(Config {
            server_url: settings.server_url,
            encoded_api_key,
        })
    }
}
