use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Input rejected before the card is searched for or written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Nothing to save: enable at least one section")]
    NothingToSave,

    #[error("Network name (SSID) is required when Wi-Fi is enabled")]
    MissingSsid,

    #[error("Country not selected")]
    MissingCountry,

    #[error("Country code '{0}' is not a two-letter code")]
    InvalidCountry(String),

    #[error("Login '{0}' not valid, please use small latin letters, digits, minus and underline")]
    InvalidLogin(String),

    #[error("User '{0}' needs a password or an SSH public key")]
    MissingCredentials(String),

    #[error("{section}: IP address and prefix must be given together")]
    IncompleteAddress { section: &'static str },

    #[error("{section}: '{value}' is not a valid IP address")]
    InvalidAddress { section: &'static str, value: String },

    #[error("{section}: '{value}' is not a valid prefix length")]
    InvalidPrefix { section: &'static str, value: String },

    #[error("SSH public key for '{0}' must be a single line without quotes, '\\', '$' or '`'")]
    InvalidSshKey(String),

    #[error("--ssh-key needs a [user] section in the settings")]
    SshKeyWithoutUser,

    #[error("Selected SSH public key {} could not be read: {reason}", path.display())]
    SshKey { path: PathBuf, reason: String },
}

/// The configuration file could not be created or written.
#[derive(Error, Debug)]
#[error("Could not write {}: {source}. Check that the card is not write-protected", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Everything a save can report back to the user.
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("SD card for Raspberry Pi not found. Re-insert the card and make sure its boot partition is readable")]
    MediaNotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

impl ProvisionError {
    /// Process exit code for this kind of failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProvisionError::Validation(_) => 2,
            ProvisionError::MediaNotFound => 3,
            ProvisionError::Write(_) => 4,
        }
    }
}
