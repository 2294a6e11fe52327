//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, also clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config, vault, entry).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong passphrase, too many attempts).
    pub const AUTH_FAILED: i32 = 5;

    /// A stored secret or document failed its integrity check.
    pub const INTEGRITY_FAILED: i32 = 6;

    /// Operation attempted without an unlocked session.
    pub const SESSION_LOCKED: i32 = 7;
}

/// Environment variable overriding the config file path.
pub const CONFIG_ENV: &str = "STRONGBOX_CONFIG";

/// Environment variable overriding the vault directory.
pub const VAULT_PATH_ENV: &str = "STRONGBOX_PATH";

/// Unlock attempts allowed when prompting on a TTY.
pub const INTERACTIVE_UNLOCK_ATTEMPTS: u32 = 3;

/// Lowest `kdf_iterations` accepted from the config file.
pub const MIN_CONFIG_KDF_ITERATIONS: u32 = 100_000;
