//! Turns CLI input into a finished settings record.

use crate::cli::RecordArgs;
use anyhow::Result;
use rtkbase_core::defaults::{default_login, default_ssh_key_path, read_public_key};
use rtkbase_core::settings::{self, encoding_for_label, UserSettings};
use rtkbase_core::{ProvisionError, SettingsRecord, ValidationError};
use std::path::{Path, PathBuf};

pub fn load_record(args: &RecordArgs) -> Result<SettingsRecord> {
    let encoding = args
        .source_encoding
        .as_deref()
        .map(encoding_for_label)
        .transpose()?;
    let mut record = settings::load(&args.settings, encoding)?;

    complete_record(
        &mut record,
        args.ssh_key.as_deref(),
        default_login(),
        default_ssh_key_path(),
    )
    .map_err(ProvisionError::from)?;
    Ok(record)
}

/// Applies [`fill_user`] to the user section. An explicit key file with no
/// user section to receive it is rejected.
pub fn complete_record(
    record: &mut SettingsRecord,
    ssh_key: Option<&Path>,
    login: Option<String>,
    default_key: Option<PathBuf>,
) -> Result<(), ValidationError> {
    match record.user.as_mut() {
        Some(user) => fill_user(user, ssh_key, login, default_key),
        None if ssh_key.is_some() => Err(ValidationError::SshKeyWithoutUser),
        None => Ok(()),
    }
}

/// Completes the user section the way the form pre-fills it: the host login
/// when none is given, and the default public key when there is neither a
/// password nor a key.
pub fn fill_user(
    user: &mut UserSettings,
    ssh_key: Option<&Path>,
    login: Option<String>,
    default_key: Option<PathBuf>,
) -> Result<(), ValidationError> {
    if user.login.is_empty() {
        if let Some(login) = login {
            log::info!("👤 Using login '{}'", login);
            user.login = login;
        }
    }

    if let Some(path) = ssh_key {
        user.ssh_key = read_public_key(path)?;
    } else if user.ssh_key.is_empty() && user.password.is_empty() {
        if let Some(path) = default_key {
            log::info!("🔑 Using SSH key {}", path.display());
            user.ssh_key = read_public_key(&path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key_file(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, text).expect("write key");
        path
    }

    #[test]
    fn empty_login_takes_host_login() {
        let mut user = UserSettings {
            password: "pw".to_string(),
            ..Default::default()
        };
        fill_user(&mut user, None, Some("alice".to_string()), None).unwrap();
        assert_eq!(user.login, "alice");
    }

    #[test]
    fn given_login_is_kept() {
        let mut user = UserSettings {
            login: "rtk".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        };
        fill_user(&mut user, None, Some("alice".to_string()), None).unwrap();
        assert_eq!(user.login, "rtk");
    }

    #[test]
    fn explicit_key_file_overrides_settings() {
        let dir = TempDir::new().expect("tempdir");
        let key = key_file(&dir, "id.pub", "ssh-ed25519 AAAA new\n");
        let mut user = UserSettings {
            login: "pi".to_string(),
            ssh_key: "ssh-rsa OLD".to_string(),
            ..Default::default()
        };
        fill_user(&mut user, Some(&key), None, None).unwrap();
        assert_eq!(user.ssh_key, "ssh-ed25519 AAAA new");
    }

    #[test]
    fn default_key_only_when_no_credentials() {
        let dir = TempDir::new().expect("tempdir");
        let key = key_file(&dir, "id_rsa.pub", "ssh-rsa AAAA default\n");

        let mut bare = UserSettings {
            login: "pi".to_string(),
            ..Default::default()
        };
        fill_user(&mut bare, None, None, Some(key.clone())).unwrap();
        assert_eq!(bare.ssh_key, "ssh-rsa AAAA default");

        let mut with_password = UserSettings {
            login: "pi".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        };
        fill_user(&mut with_password, None, None, Some(key)).unwrap();
        assert!(with_password.ssh_key.is_empty());
    }

    #[test]
    fn key_file_without_user_section_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let key = key_file(&dir, "id.pub", "ssh-ed25519 AAAA\n");
        let mut record = SettingsRecord::default();
        assert_eq!(
            complete_record(&mut record, Some(&key), None, None),
            Err(ValidationError::SshKeyWithoutUser)
        );
        assert!(record.user.is_none());

        assert_eq!(complete_record(&mut record, None, None, None), Ok(()));
    }

    #[test]
    fn user_section_receives_key_file() {
        let dir = TempDir::new().expect("tempdir");
        let key = key_file(&dir, "id.pub", "ssh-ed25519 AAAA\n");
        let mut record = SettingsRecord {
            user: Some(UserSettings {
                login: "pi".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        complete_record(&mut record, Some(&key), None, None).unwrap();
        assert_eq!(record.user.unwrap().ssh_key, "ssh-ed25519 AAAA");
    }

    #[test]
    fn unreadable_key_is_a_validation_error() {
        let dir = TempDir::new().expect("tempdir");
        let mut user = UserSettings::default();
        let missing = dir.path().join("nope.pub");
        assert!(matches!(
            fill_user(&mut user, Some(&missing), None, None),
            Err(ValidationError::SshKey { .. })
        ));
    }
}
