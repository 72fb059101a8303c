//! CLI argument parsing for rtkbase-setup.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rtkbase-setup", version)]
#[command(about = "📡 Prepare a Raspberry Pi SD card for an RtkBase first boot")]
#[command(long_about = "📡 Prepare a Raspberry Pi SD card for an RtkBase first boot\n\n\
    Finds the card's boot partition (FAT32, label 'bootfs') and writes system.txt\n\
    with Wi-Fi, country, user and network settings taken from a TOML or JSON file.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug details of the drive scan
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 🔍 Find the Raspberry Pi boot partition
    Locate,

    /// 🧾 Print the system.txt that would be written
    Render(RecordArgs),

    /// 💾 Write system.txt to the card (or to --target)
    Write {
        #[command(flatten)]
        record: RecordArgs,

        /// Write into this directory instead of searching for the card
        #[arg(long, value_name = "DIR")]
        target: Option<PathBuf>,

        /// Show what would be written without touching the card
        #[arg(long)]
        dry_run: bool,
    },

    /// ✅ Check a login name against the device's rules
    CheckLogin {
        login: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Settings file (.toml or .json)
    #[arg(long, value_name = "FILE")]
    pub settings: PathBuf,

    /// Encoding of the settings file if it is not UTF-8 (e.g. windows-1251)
    #[arg(long, value_name = "LABEL")]
    pub source_encoding: Option<String>,

    /// Public key file whose first line becomes the user's SSH key
    #[arg(long, value_name = "FILE")]
    pub ssh_key: Option<PathBuf>,
}
