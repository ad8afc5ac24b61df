//! Tests for printing contracts and initialization reports. Styling is disabled, so the output is plain text.

use anstream::AutoStream;
use propkeys::{ConfigKeys, ConfigProvider, Properties};
use propkeys_commands::Printer;

fn is_port(value: &str) -> bool {
    value.parse::<u16>().is_ok_and(|port| port != 0)
}

#[derive(Debug, Clone, Copy, ConfigKeys)]
#[config(properties_path = "config/server.properties", provider = "ServerConfig")]
#[config(qualifier = "Server", rename_all = "snake_case")]
pub enum ServerKey {
    Ignored,
    Host,
    #[config(validate = is_port)]
    ListenPort,
}

fn capture(print: impl FnOnce(Printer<&mut Vec<u8>>) -> std::io::Result<()>) -> String {
    let mut buffer = vec![];
    print(Printer::custom(AutoStream::never(&mut buffer))).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[test]
fn printing_contract() {
    let output = capture(|printer| printer.print_contract(ServerConfig::contract()));
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(
        lines,
        [
            "ServerConfig [config/server.properties]",
            "  Null key: Ignored",
            "  Host -> host",
            "  ListenPort -> listen_port",
            "    Validation: must satisfy `is_port`",
        ]
    );
}

#[test]
fn printing_successful_report() {
    let mut provider = ServerConfig::new();
    let properties = Properties::new()
        .with("host", "localhost")
        .with("listen_port", "8080");
    let result = provider.initialize_from(&properties);

    let output = capture(|printer| printer.print_report(&provider, &result));
    assert_eq!(output, "ready ServerConfig: 2 properties validated\n");
}

#[test]
fn printing_report_with_violations() {
    let mut provider = ServerConfig::new();
    let properties = Properties::new()
        .with("host", " ")
        .with("listen_port", "100000");
    let result = provider.initialize_from(&properties);

    let output = capture(|printer| printer.print_report(&provider, &result));
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(
        lines,
        [
            "failed ServerConfig: 2 violation(s)",
            "  Host (host): missing or empty",
            "  ListenPort (listen_port): invalid value; must satisfy `is_port`",
        ]
    );
    assert!(!output.contains("100000"), "{output}");
}

#[test]
fn printing_report_for_unavailable_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server.properties");
    let mut provider = ServerConfig::new();
    let result = provider.initialize_from_path(&path);

    let output = capture(|printer| printer.print_report(&provider, &result));
    let mut lines = output.lines();
    assert_eq!(
        lines.next(),
        Some("failed ServerConfig: properties source is unavailable")
    );
    let source_line = lines.next().unwrap();
    assert!(source_line.starts_with("  "), "{source_line}");
    assert!(source_line.contains("server.properties"), "{source_line}");
    assert_eq!(lines.next(), None);
}

#[test]
fn printing_report_for_repeated_initialization() {
    let mut provider = ServerConfig::new();
    let properties = Properties::new()
        .with("host", "localhost")
        .with("listen_port", "80");
    provider.initialize_from(&properties).unwrap();
    let result = provider.initialize_from(&properties);

    let output = capture(|printer| printer.print_report(&provider, &result));
    assert_eq!(
        output,
        "ready ServerConfig: provider is already initialized (state: ready)\n"
    );
}
