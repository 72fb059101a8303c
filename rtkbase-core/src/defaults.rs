//! Values pre-filled from the host user's environment.

use crate::errors::ValidationError;
use crate::validation::is_valid_login;
use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

pub const MAX_LOGIN: usize = 80;
pub const MAX_SSH_KEY: usize = 8192;

/// The host user name as a device login, if it is a valid one.
pub fn default_login() -> Option<String> {
    let name = env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .ok()?;
    login_from_user_name(&name)
}

/// Lower-cases and truncates `name`; `None` if the result breaks the login rule.
pub fn login_from_user_name(name: &str) -> Option<String> {
    let login: String = name.chars().take(MAX_LOGIN).collect::<String>().to_lowercase();
    is_valid_login(&login).then_some(login)
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

/// `~/.ssh/id_rsa.pub` if it exists.
pub fn default_ssh_key_path() -> Option<PathBuf> {
    ssh_key_path_in(&home_dir()?)
}

pub fn ssh_key_path_in(home: &Path) -> Option<PathBuf> {
    let path = home.join(".ssh").join("id_rsa.pub");
    path.is_file().then_some(path)
}

/// Reads the first line of a public key file, without trailing whitespace
/// or control characters.
pub fn read_public_key(path: &Path) -> Result<String, ValidationError> {
    let key_error = |reason: String| ValidationError::SshKey {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| key_error(e.to_string()))?;
    let mut reader = BufReader::new(file.take(MAX_SSH_KEY as u64));
    let mut line = Vec::new();
    reader
        .read_until(b'\n', &mut line)
        .map_err(|e| key_error(e.to_string()))?;

    let text = String::from_utf8_lossy(&line);
    let key = text.trim_end_matches(|c: char| c <= ' ');
    if key.is_empty() {
        return Err(key_error("file is empty".to_string()));
    }

    log::debug!("read SSH public key from {}", path.display());
    Ok(key.to_string())
}
