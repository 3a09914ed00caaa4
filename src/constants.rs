//! App-wide constants.
//!
//! Centralises the tool name, default paths, marker strings, environment
//! variable names, and URLs so a rename only requires changing this file.

/// Crate version, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local config filename (e.g. `.compose-setup.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".compose-setup.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "compose-setup";

/// Suffix appended to the compose file path to form the backup path.
pub const BACKUP_SUFFIX: &str = ".backup";

// ── Default file locations ──────────────────────────────────────────

pub const DEFAULT_KEY_PATH: &str = "server/keys/public_key.pem";
pub const DEFAULT_COMPOSE_PATH: &str = "docker-compose.yml";

// ── Key block markers ───────────────────────────────────────────────

/// Compose key whose block-scalar value holds the public key.
pub const KEY_MARKER: &str = "JWT_PUBLIC_KEY:";
/// YAML literal block-scalar indicator.
pub const BLOCK_INDICATOR: &str = "|";
/// Indentation of the key body lines (8 spaces).
pub const KEY_INDENT: &str = "        ";
pub const PEM_BEGIN: &str = "BEGIN PUBLIC KEY";
pub const PEM_END: &str = "END PUBLIC KEY";
pub const KEY_PLACEHOLDER: &str = "REPLACE_WITH_YOUR_PUBLIC_KEY";

// ── License ─────────────────────────────────────────────────────────

pub const LICENSE_PLACEHOLDER: &str = "YOUR_LICENSE_KEY_HERE";
pub const ACTIVATION_MARKER: &str = "ACTIVATION_KEY:";
pub const LICENSE_PORTAL_URL: &str = "https://my.nutrient.io/";
pub const LICENSE_PROMPT: &str = "Enter your Nutrient license key (or press Enter to skip): ";

// ── Next steps ──────────────────────────────────────────────────────

pub const HEALTH_URL: &str = "http://localhost:5000/health";
pub const DASHBOARD_URL: &str = "http://localhost:5000/dashboard";
pub const DASHBOARD_USER: &str = "dashboard";
pub const DASHBOARD_PASSWORD: &str = "secret";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_KEY_FILE: &str = "COMPOSE_SETUP_KEY_FILE";
pub const ENV_COMPOSE_FILE: &str = "COMPOSE_SETUP_COMPOSE_FILE";
pub const ENV_LICENSE_KEY: &str = "COMPOSE_SETUP_LICENSE_KEY";
