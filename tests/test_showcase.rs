mod common;
use common::assert_multiline_eq;
use escargot::{CargoBuild, CargoRun};
use std::{process::Command, str::from_utf8, sync::OnceLock};

fn get_built_showcase_example() -> Command {
    static ONCE: OnceLock<CargoRun> = OnceLock::new();
    let mut command = ONCE
        .get_or_init(|| CargoBuild::new().example("showcase").run().unwrap())
        .command();
    command.env_clear();
    command
}

#[test]
fn test_showcase_example_no_args() {
    let mut command = get_built_showcase_example();
    let output = command.output().unwrap();

    let expected = &r#"
host = 127.0.0.1
port = 6000
ssl = false
timeout = 15s
upstream = 127.0.0.1:4000
path_filter =
verbose = 0
peer_urls = []
labels = {}
"#[1..];

    assert_multiline_eq!(from_utf8(&output.stdout).unwrap(), &expected);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_showcase_example_help() {
    let mut command = get_built_showcase_example();
    let output = command.args(["--help"]).output().unwrap();
    let stdout = from_utf8(&output.stdout).unwrap();

    for expected in [
        "Solves widget optimization problems on demand as a service",
        "Usage: showcase [OPTIONS]",
        "--http-host <string>",
        "HTTP host",
        "[env MYCO_HTTP_HOST=]",
        "[default: 127.0.0.1]",
        "-p, --http-port <uint16>",
        "Port to listen on",
        "--http-timeout <duration>",
        "[default: 15s]",
        "-v, --verbose",
        "--peer <stringSlice>",
        "[env MYCO_PEERS=]",
        "--labels <stringStringMap>",
        "--old-mode",
        "[deprecated]",
    ] {
        assert!(stdout.contains(expected), "missing {expected:?} in:\n{stdout}");
    }
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_showcase_example_success_args() {
    let mut command = get_built_showcase_example();
    let output = command
        .args([
            "--http-host",
            "localhost",
            "-p",
            "9000",
            "--http-ssl",
            "--http-timeout",
            "1m 30s",
            "--http-upstream",
            "10.0.0.1:8000",
            "--path-filter",
            "^/api/",
            "-vvv",
            "--peer",
            "http://replica1.service.local",
            "--peer",
            "http://replica2.service.local",
            "--labels",
            "team:core,env:prod",
        ])
        .output()
        .unwrap();

    let expected = &r#"
host = localhost
port = 9000
ssl = true
timeout = 90s
upstream = 10.0.0.1:8000
path_filter = ^/api/
verbose = 3
peer_urls = ["http://replica1.service.local", "http://replica2.service.local"]
labels = {"env": "prod", "team": "core"}
"#[1..];

    assert_multiline_eq!(from_utf8(&output.stdout).unwrap(), &expected);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_showcase_example_success_env() {
    let mut command = get_built_showcase_example();
    let output = command
        .envs([
            ("MYCO_HTTP_HOST", "example.com"),
            ("MYCO_HTTP_PORT", "7000"),
            ("MYCO_HTTP_SSL", "yes"),
            ("MYCO_VERBOSE", "2"),
            ("MYCO_PEERS", "http://replica1.service.local,http://replica2.service.local"),
        ])
        .output()
        .unwrap();

    let expected = &r#"
host = example.com
port = 7000
ssl = true
timeout = 15s
upstream = 127.0.0.1:4000
path_filter =
verbose = 2
peer_urls = ["http://replica1.service.local", "http://replica2.service.local"]
labels = {}
"#[1..];

    assert_multiline_eq!(from_utf8(&output.stdout).unwrap(), &expected);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_showcase_example_validation_error() {
    let mut command = get_built_showcase_example();
    let output = command
        .args(["--http-host", "wrong domain", "--http-port", "0"])
        .output()
        .unwrap();

    let stderr = from_utf8(&output.stderr).unwrap();
    assert!(
        stderr.contains("when parsing '--http-host' value 'wrong domain': `wrong domain` does not validate as host"),
        "{stderr}"
    );
    assert!(
        stderr.contains("when parsing '--http-port' value '0': `0` does not validate as port"),
        "{stderr}"
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}
