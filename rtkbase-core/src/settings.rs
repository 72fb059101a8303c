//! The settings record handed to the serializer.
//!
//! Each section is optional; `None` means the section is switched off and
//! nothing is written for it.

use anyhow::{anyhow, Context, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsRecord {
    pub wireless: Option<WirelessSettings>,
    pub regional: Option<RegionalSettings>,
    pub user: Option<UserSettings>,
    pub ethernet: Option<NetworkSettings>,
    pub wifi_network: Option<NetworkSettings>,
}

impl SettingsRecord {
    pub fn is_empty(&self) -> bool {
        self.wireless.is_none()
            && self.regional.is_none()
            && self.user.is_none()
            && self.ethernet.is_none()
            && self.wifi_network.is_none()
    }
}

/// Wi-Fi credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WirelessSettings {
    pub ssid: String,
    /// Passphrase; empty for an open network.
    pub key: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegionalSettings {
    /// ISO 3166 alpha-2 code, e.g. `GB`.
    pub country: String,
}

/// Login created on first boot. Empty strings mean "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserSettings {
    pub login: String,
    pub password: String,
    /// Public key text, written verbatim.
    pub ssh_key: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpMode {
    #[default]
    Dhcp,
    Static,
}

/// Addressing for one interface. The static fields are kept while DHCP is
/// selected but are not written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkSettings {
    pub mode: IpMode,
    pub address: String,
    pub prefix: String,
    pub gateway: String,
    pub dns: String,
}

impl NetworkSettings {
    pub fn dhcp() -> Self {
        Self::default()
    }

    pub fn static_address(address: &str, prefix: &str) -> Self {
        Self {
            mode: IpMode::Static,
            address: address.to_string(),
            prefix: prefix.to_string(),
            ..Self::default()
        }
    }
}

/// Resolves an encoding label such as `windows-1251` or `latin1`.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| anyhow!("Unknown text encoding: {}", label))
}

/// Parses settings text; `.json` files are JSON, anything else is TOML.
pub fn parse(text: &str, path: &Path) -> Result<SettingsRecord> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        serde_json::from_str(text).with_context(|| format!("Invalid JSON in {}", path.display()))
    } else {
        toml::from_str(text).with_context(|| format!("Invalid TOML in {}", path.display()))
    }
}

/// Loads a settings file, decoding it from `encoding` first when given.
pub fn load(path: &Path, encoding: Option<&'static Encoding>) -> Result<SettingsRecord> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read settings {}", path.display()))?;

    let text = match encoding {
        Some(encoding) => {
            let (text, used, had_errors) = encoding.decode(&bytes);
            if had_errors {
                log::warn!(
                    "{} has bytes that are not valid {}",
                    path.display(),
                    used.name()
                );
            }
            text.into_owned()
        }
        None => String::from_utf8(bytes)
            .with_context(|| format!("{} is not UTF-8; pass its encoding", path.display()))?,
    };

    let record = parse(&text, path)?;
    log::debug!("loaded settings from {}", path.display());
    Ok(record)
}
