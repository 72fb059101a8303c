use rtkbase_core::serializer::{render, serialize};
use rtkbase_core::settings::{
    IpMode, NetworkSettings, RegionalSettings, SettingsRecord, UserSettings, WirelessSettings,
};
use tempfile::TempDir;

fn ethernet(net: NetworkSettings) -> SettingsRecord {
    SettingsRecord {
        ethernet: Some(net),
        ..Default::default()
    }
}

#[test]
fn country_only_is_one_line() {
    let record = SettingsRecord {
        regional: Some(RegionalSettings {
            country: "US".to_string(),
        }),
        ..Default::default()
    };
    assert_eq!(render(&record), vec!["COUNTRY=US"]);
}

#[test]
fn dhcp_ignores_static_fields() {
    let net = NetworkSettings {
        mode: IpMode::Dhcp,
        address: "192.168.1.50".to_string(),
        prefix: "24".to_string(),
        gateway: "192.168.1.1".to_string(),
        dns: "1.1.1.1".to_string(),
    };
    assert_eq!(render(&ethernet(net)), vec!["ETH_IP=DHCP"]);
}

#[test]
fn static_without_gateway_or_dns() {
    let net = NetworkSettings::static_address("192.168.1.50", "24");
    assert_eq!(render(&ethernet(net)), vec![r#"ETH_IP="192.168.1.50/24""#]);
}

#[test]
fn static_with_gateway_and_dns_on_wifi() {
    let mut net = NetworkSettings::static_address("10.0.0.7", "16");
    net.gateway = "10.0.0.1".to_string();
    net.dns = "10.0.0.1 8.8.8.8".to_string();
    let record = SettingsRecord {
        wifi_network: Some(net),
        ..Default::default()
    };

    assert_eq!(
        render(&record),
        vec![
            r#"WIFI_IP="10.0.0.7/16""#,
            "WIFI_GATE=$'10.0.0.1'",
            "WIFI_DNS=$'10.0.0.1 8.8.8.8'",
        ]
    );
}

#[test]
fn static_without_prefix_writes_only_gateway() {
    let mut net = NetworkSettings::static_address("10.0.0.7", "");
    net.gateway = "10.0.0.1".to_string();
    assert_eq!(render(&ethernet(net)), vec!["ETH_GATE=$'10.0.0.1'"]);
}

#[test]
fn wireless_values_are_quoted_individually() {
    let record = SettingsRecord {
        wireless: Some(WirelessSettings {
            ssid: "Joe's café".to_string(),
            key: r#"p"w\d"#.to_string(),
            hidden: false,
        }),
        ..Default::default()
    };
    assert_eq!(
        render(&record),
        vec![r"SSID=$'Joe\'s caf\u00E9'", r#"KEY=$'p\"w\\d'"#]
    );
}

#[test]
fn ssh_key_is_written_verbatim_in_double_quotes() {
    let record = SettingsRecord {
        user: Some(UserSettings {
            login: "pi".to_string(),
            password: String::new(),
            ssh_key: "ssh-ed25519 AAAAC3Nza pi@desk".to_string(),
        }),
        ..Default::default()
    };
    assert_eq!(
        render(&record),
        vec!["LOGIN=$'pi'", r#"SSH="ssh-ed25519 AAAAC3Nza pi@desk""#]
    );
}

#[test]
fn disabled_sections_write_nothing() {
    assert!(render(&SettingsRecord::default()).is_empty());
}

#[test]
fn serialize_replaces_existing_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("system.txt");
    std::fs::write(&path, "OLD=1\nOLDER=2\nOLDEST=3\n").expect("seed");

    let record = SettingsRecord {
        regional: Some(RegionalSettings {
            country: "GB".to_string(),
        }),
        ..Default::default()
    };
    serialize(record, &path).expect("serialize");

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "COUNTRY=GB\n");
}

#[test]
fn serialize_reports_unwritable_destination() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("missing-dir").join("system.txt");

    let err = serialize(SettingsRecord::default(), &path).unwrap_err();
    assert_eq!(err.path, path);
    assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
}
