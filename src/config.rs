use std::time::Duration;

// --- Timing Configuration ---
// Bounded wait applied to every element lookup before a click.
pub const ELEMENT_WAIT_TIMEOUT: Duration = Duration::from_secs(60);

// Short pause between scripted interactions to keep browsing realistic.
pub const SETTLE_WAIT: Duration = Duration::from_secs(1);

// --- Credentials ---
// Default location of the credentials file consumed by login hooks.
pub const DEFAULT_CREDENTIALS_PATH: &str = "./credentials.json";
