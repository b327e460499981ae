use std::path::PathBuf;

use hearth::config::Config;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.server.recv_buffer_size, 1024);
    assert_eq!(cfg.server.read_timeout_secs, Some(30));
    assert_eq!(cfg.static_files.root, PathBuf::from("./resources"));
    assert_eq!(cfg.store.path, Some(PathBuf::from("./db/accounts.json")));
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml(
        "server:\n  listen_addr: 0.0.0.0:3000\nstatic_files:\n  root: /srv/www\n",
    )
    .unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.server.recv_buffer_size, 1024);
    assert_eq!(cfg.static_files.root, PathBuf::from("/srv/www"));
    assert_eq!(cfg.store.path, Some(PathBuf::from("./db/accounts.json")));
}

#[test]
fn test_config_null_store_path_means_memory() {
    let cfg = Config::from_yaml("store:\n  path: null\nserver:\n  read_timeout_secs: null\n").unwrap();

    assert_eq!(cfg.store.path, None);
    assert_eq!(cfg.server.read_timeout(), None);
}

#[test]
fn test_config_rejects_zero_buffer() {
    assert!(Config::from_yaml("server:\n  recv_buffer_size: 0\n").is_err());
}

#[test]
fn test_config_from_missing_file() {
    assert!(Config::from_file("/definitely/not/here/hearth.yaml").is_err());
}

#[test]
fn test_config_listen_override_from_env() {
    unsafe {
        std::env::remove_var("HEARTH_CONFIG");
        std::env::set_var("LISTEN", "0.0.0.0:5000");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:5000");
    unsafe {
        std::env::remove_var("LISTEN");
    }
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.server.listen_addr, cfg2.server.listen_addr);
}
