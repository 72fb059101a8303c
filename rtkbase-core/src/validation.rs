//! Checks run on a settings record before anything touches the card.

use crate::errors::ValidationError;
use crate::settings::{IpMode, NetworkSettings, SettingsRecord};
use std::net::IpAddr;

/// Login rule of the target's `useradd`: a lower-case letter, then lower-case
/// letters, digits, `-` or `_`, optionally ending in a single `$`.
pub fn is_valid_login(login: &str) -> bool {
    let body = login.strip_suffix('$').unwrap_or(login);
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// The key is written verbatim inside double quotes and read back by a
/// shell, so it must stay on one line and keep the shell inert.
pub fn is_valid_ssh_key(key: &str) -> bool {
    !key
        .chars()
        .any(|c| c.is_control() || matches!(c, '"' | '\\' | '$' | '`'))
}

/// Decimal digits only, no sign and no leading zero.
fn is_canonical_number(text: &str) -> bool {
    !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && (text == "0" || !text.starts_with('0'))
}

pub fn is_valid_country(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_uppercase())
}

/// Validates every enabled section of `record`.
pub fn validate(record: &SettingsRecord) -> Result<(), ValidationError> {
    if record.is_empty() {
        return Err(ValidationError::NothingToSave);
    }

    if let Some(wireless) = &record.wireless {
        if wireless.ssid.is_empty() {
            return Err(ValidationError::MissingSsid);
        }
    }

    if let Some(regional) = &record.regional {
        if regional.country.is_empty() {
            return Err(ValidationError::MissingCountry);
        }
        if !is_valid_country(&regional.country) {
            return Err(ValidationError::InvalidCountry(regional.country.clone()));
        }
    }

    if let Some(user) = &record.user {
        if !is_valid_login(&user.login) {
            return Err(ValidationError::InvalidLogin(user.login.clone()));
        }
        if user.password.is_empty() && user.ssh_key.is_empty() {
            return Err(ValidationError::MissingCredentials(user.login.clone()));
        }
        if !is_valid_ssh_key(&user.ssh_key) {
            return Err(ValidationError::InvalidSshKey(user.login.clone()));
        }
    }

    if let Some(ethernet) = &record.ethernet {
        validate_network("Ethernet", ethernet)?;
    }
    if let Some(wifi) = &record.wifi_network {
        validate_network("Wi-Fi IP", wifi)?;
    }

    Ok(())
}

fn validate_network(section: &'static str, net: &NetworkSettings) -> Result<(), ValidationError> {
    if net.mode == IpMode::Dhcp {
        return Ok(());
    }

    match (net.address.is_empty(), net.prefix.is_empty()) {
        (true, true) => return Ok(()),
        (false, false) => {}
        _ => return Err(ValidationError::IncompleteAddress { section }),
    }

    let address: IpAddr = net
        .address
        .parse()
        .map_err(|_| ValidationError::InvalidAddress {
            section,
            value: net.address.clone(),
        })?;

    let width = if address.is_ipv4() { 32 } else { 128 };
    if !is_canonical_number(&net.prefix) {
        return Err(ValidationError::InvalidPrefix {
            section,
            value: net.prefix.clone(),
        });
    }
    match net.prefix.parse::<u8>() {
        Ok(p) if p <= width => Ok(()),
        _ => Err(ValidationError::InvalidPrefix {
            section,
            value: net.prefix.clone(),
        }),
    }
}
