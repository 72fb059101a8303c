use rtkbase_core::provision::{save, save_to_dir};
use rtkbase_core::settings::{NetworkSettings, RegionalSettings, SettingsRecord, UserSettings};
use rtkbase_core::{ProvisionError, ValidationError};
use rtkbase_hal::{DriveId, FakeDrive, FakeHal, Operation, VolumeInfo};
use tempfile::TempDir;

fn card(root: &std::path::Path) -> FakeHal {
    FakeHal::new()
        .with_drive(
            "sdb1",
            FakeDrive::removable(VolumeInfo {
                filesystem: "FAT32".to_string(),
                label: "bootfs".to_string(),
                read_only: false,
                root: Some(root.to_path_buf()),
            }),
        )
        .with_file(root.join("config.txt"))
        .with_file(root.join("cmdline.txt"))
        .with_file(root.join("BOOTCODE.BIN"))
}

fn record() -> SettingsRecord {
    SettingsRecord {
        regional: Some(RegionalSettings {
            country: "NL".to_string(),
        }),
        user: Some(UserSettings {
            login: "rtk".to_string(),
            password: "base'station".to_string(),
            ssh_key: String::new(),
        }),
        ethernet: Some(NetworkSettings::dhcp()),
        ..Default::default()
    }
}

#[test]
fn save_writes_system_txt_on_the_card() {
    let root = TempDir::new().expect("tempdir");
    let hal = card(root.path());

    let report = save(&hal, record(), false).expect("save");

    assert_eq!(report.drive, Some(DriveId::new("sdb1")));
    assert_eq!(report.path, root.path().join("system.txt"));
    assert!(report.written);
    assert_eq!(
        std::fs::read_to_string(&report.path).unwrap(),
        "COUNTRY=NL\nLOGIN=$'rtk'\nPWD=$'base\\'station'\nETH_IP=DHCP\n"
    );
}

#[test]
fn dry_run_leaves_the_card_alone() {
    let root = TempDir::new().expect("tempdir");
    let hal = card(root.path());

    let report = save(&hal, record(), true).expect("save");

    assert!(!report.written);
    assert_eq!(report.lines.len(), 4);
    assert!(!report.path.exists());
}

#[test]
fn missing_card_is_media_not_found() {
    let hal = FakeHal::new();
    assert!(matches!(
        save(&hal, record(), false),
        Err(ProvisionError::MediaNotFound)
    ));
}

#[test]
fn invalid_input_is_rejected_before_scanning() {
    let root = TempDir::new().expect("tempdir");
    let hal = card(root.path());
    let mut bad = record();
    if let Some(user) = bad.user.as_mut() {
        user.login = "Admin".to_string();
    }

    let err = save(&hal, bad, false).unwrap_err();

    assert!(matches!(
        err,
        ProvisionError::Validation(ValidationError::InvalidLogin(_))
    ));
    assert!(!hal.has_operation(|op| matches!(op, Operation::ListDrives)));
}

#[test]
fn save_to_dir_skips_the_scan() {
    let dir = TempDir::new().expect("tempdir");
    let report = save_to_dir(record(), dir.path(), false).expect("save");

    assert_eq!(report.drive, None);
    assert!(report.path.is_file());
}

#[test]
fn unwritable_target_is_a_write_error() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("not-there");

    let err = save_to_dir(record(), &missing, false).unwrap_err();

    assert!(matches!(err, ProvisionError::Write(_)));
    assert_eq!(err.exit_code(), 4);
}
