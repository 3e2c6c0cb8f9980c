// --- File: crates/citaflow_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Google Calendar Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    pub calendar_id: Option<String>,
    /// IANA time zone name, e.g. "America/Santiago".
    pub time_zone: Option<String>,
    /// First bookable hour of the day (inclusive).
    pub open_hour: Option<u32>,
    /// Hour at which booking closes (exclusive).
    pub close_hour: Option<u32>,
    /// Length of the rolling availability window in calendar days.
    pub window_days: Option<u32>,
}

impl GcalConfig {
    pub fn time_zone(&self) -> &str {
        self.time_zone.as_deref().unwrap_or("America/Santiago")
    }

    pub fn open_hour(&self) -> u32 {
        self.open_hour.unwrap_or(9)
    }

    pub fn close_hour(&self) -> u32 {
        self.close_hour.unwrap_or(18)
    }

    pub fn window_days(&self) -> u32 {
        self.window_days.unwrap_or(7)
    }
}

// --- Google OAuth Config ---
// Holds the OAuth application credentials. The client secret is expected to be
// supplied through the environment (CITAFLOW_OAUTH__CLIENT_SECRET).
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OauthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Where the callback redirects the browser after a successful exchange.
    pub frontend_url: String,
    /// Path of the persisted admin credential record.
    pub token_file: Option<String>,
}

impl OauthConfig {
    pub fn token_file(&self) -> &str {
        self.token_file.as_deref().unwrap_or("admin_token.json")
    }
}

// --- Mailer Config ---
// HTTP mail API used for appointment confirmation emails. The API key is
// expected to be supplied through the environment (CITAFLOW_MAILER__API_KEY).
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MailerConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
    /// Address that receives the new-appointment notice.
    pub admin_address: String,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,
    #[serde(default)]
    pub use_mailer: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub oauth: Option<OauthConfig>,
    #[serde(default)]
    pub mailer: Option<MailerConfig>,
}
