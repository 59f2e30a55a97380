use crate::models::shift_type::ShiftType;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Identity consumed by every command; the environment vouches for it.
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub admin: bool,
    /// IANA business timezone every window and lateness computation uses.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_shift_type")]
    pub default_shift_type: String,
}

fn default_timezone() -> String {
    "Asia/Jakarta".to_string()
}

fn default_shift_type() -> String {
    "regular".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            user: String::new(),
            admin: false,
            timezone: default_timezone(),
            default_shift_type: default_shift_type(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("shiftlog")
        } else {
            let home = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from(env::var("HOME").unwrap_or_else(|_| ".".to_string())));
            home.join(".shiftlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shiftlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).expect("❌ Failed to read configuration file");
            serde_yaml::from_str(&content).expect("❌ Failed to parse configuration file")
        } else {
            Config::default()
        }
    }

    /// Parsed default shift type, falling back to regular on a bad value.
    pub fn default_type(&self) -> ShiftType {
        ShiftType::from_db_str(&self.default_shift_type).unwrap_or(ShiftType::Regular)
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            if crate::utils::path::is_absolute(&name) {
                PathBuf::from(&name)
            } else {
                dir.join(&name)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).unwrap();
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }
}
