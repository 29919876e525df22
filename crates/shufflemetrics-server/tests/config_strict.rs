#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use shufflemetrics_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:19998"
storage:
  remote_pathz: ["hdfs://hdfs1:9000/rss"] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:19998");
    assert_eq!(cfg.server.encoded_tag().as_str(), "ss_v5");
    assert!(cfg.storage.remote_paths.is_empty());
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn listen_must_be_socket_addr() {
    let bad = r#"
version: 1
server:
  listen: "localhost"
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn tags_are_encoded_and_validated() {
    let ok = r#"
version: 1
server:
  tags: ["ss_v5", "GRPC", "ss_v5"]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.encoded_tag().as_str(), "GRPC,ss_v5");

    let bad = r#"
version: 1
server:
  tags: ["a,b"]
"#;
    assert!(config::load_from_str(bad).is_err());

    let empty = r#"
version: 1
server:
  tags: []
"#;
    assert!(config::load_from_str(empty).is_err());
}

#[test]
fn remote_paths_must_name_a_host() {
    let bad = r#"
version: 1
storage:
  remote_paths: ["hdfs:///rss"]
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}
