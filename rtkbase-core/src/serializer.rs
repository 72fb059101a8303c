//! Writes a [`SettingsRecord`] as the `system.txt` file read on first boot.
//!
//! One `KEY=value` line per entry, sections in a fixed order, every free-text
//! value quoted on its own with [`quote`].

use crate::errors::WriteError;
use crate::quoting::quote;
use crate::settings::{IpMode, NetworkSettings, SettingsRecord};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Name of the configuration file at the root of the boot partition.
pub const CONFIG_FILE_NAME: &str = "system.txt";

/// Where the configuration file lives on a volume mounted at `root`.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Renders the lines of the file, without line terminators.
pub fn render(record: &SettingsRecord) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(wireless) = &record.wireless {
        lines.push(format!("SSID={}", quote(&wireless.ssid)));
        if !wireless.key.is_empty() {
            lines.push(format!("KEY={}", quote(&wireless.key)));
        }
        if wireless.hidden {
            lines.push("HIDDEN=Y".to_string());
        }
    }

    if let Some(regional) = &record.regional {
        lines.push(format!("COUNTRY={}", regional.country));
    }

    if let Some(user) = &record.user {
        lines.push(format!("LOGIN={}", quote(&user.login)));
        if !user.password.is_empty() {
            lines.push(format!("PWD={}", quote(&user.password)));
        }
        if !user.ssh_key.is_empty() {
            // The key keeps its own formatting; the boot script strips the quotes.
            lines.push(format!("SSH=\"{}\"", user.ssh_key));
        }
    }

    if let Some(ethernet) = &record.ethernet {
        render_network(&mut lines, "ETH", ethernet);
    }
    if let Some(wifi) = &record.wifi_network {
        render_network(&mut lines, "WIFI", wifi);
    }

    lines
}

fn render_network(lines: &mut Vec<String>, prefix: &str, net: &NetworkSettings) {
    if net.mode == IpMode::Dhcp {
        lines.push(format!("{}_IP=DHCP", prefix));
        return;
    }

    if !net.address.is_empty() && !net.prefix.is_empty() {
        lines.push(format!("{}_IP=\"{}/{}\"", prefix, net.address, net.prefix));
    }
    if !net.gateway.is_empty() {
        lines.push(format!("{}_GATE={}", prefix, quote(&net.gateway)));
    }
    if !net.dns.is_empty() {
        lines.push(format!("{}_DNS={}", prefix, quote(&net.dns)));
    }
}

/// Renders the whole file as text.
pub fn render_to_string(record: &SettingsRecord) -> String {
    render(record)
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}

/// Writes `record` to `destination`, replacing whatever was there.
///
/// There is no temp-file-and-rename step: a failed write can leave the file
/// truncated, and the caller may simply retry.
pub fn serialize(record: SettingsRecord, destination: impl AsRef<Path>) -> Result<(), WriteError> {
    let path = destination.as_ref();
    let wrap = |source| WriteError {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(wrap)?;
    let mut out = BufWriter::new(file);
    for line in render(&record) {
        writeln!(out, "{}", line).map_err(wrap)?;
    }
    out.flush().map_err(wrap)?;

    log::info!("📝 Wrote {}", path.display());
    Ok(())
}
