// ABOUTME: Integration tests for configuration parsing and validation.
// ABOUTME: Tests YAML parsing, env var interpolation, and command-line overrides.

use dockrun::config::*;
use dockrun::error::ErrorKind;
use dockrun::runtime::Endpoint;
use std::collections::BTreeMap;
use std::fs;
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = Config::from_yaml("{}").unwrap();
        assert!(config.connection.url.is_none());
        assert!(config.build.is_none());
        assert!(config.run.is_none());
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
connection:
  url: unix:///var/run/docker.sock
  username: deploy
  password: { env: REGISTRY_PASSWORD }
  email: ops@example.com
  timeout: 10m

build:
  context: ./app
  tag: registry.example.com/app:1

run:
  image: registry.example.com/app:1
  name: app
  hostname: app.local
  rm: true
  env:
    RUST_LOG: info
  ports:
    8080: 80
    "53/udp": "127.0.0.1:53"
  volumes:
    /srv/data: /data
  volumes_from: [store]
  links: [db:database]
  dns: [8.8.8.8]
  dns_search: [example.com]
"#;
        let config = Config::from_yaml(yaml).unwrap();

        assert_eq!(config.connection.timeout, Some(Duration::from_secs(600)));
        assert_eq!(
            config.connection.username,
            Some(EnvValue::Literal("deploy".to_string()))
        );

        let build = config.build.unwrap();
        assert_eq!(build.context.to_str(), Some("./app"));
        assert_eq!(build.tag, "registry.example.com/app:1");

        let run = config.run.unwrap();
        assert!(run.rm);
        assert!(!run.detached);
        assert_eq!(run.ports.get("8080").map(String::as_str), Some("80"));
        assert_eq!(
            run.ports.get("53/udp").map(String::as_str),
            Some("127.0.0.1:53")
        );
        assert_eq!(run.volumes.get("/srv/data").map(String::as_str), Some("/data"));
        assert_eq!(run.links, vec!["db:database"]);
        assert_eq!(run.dns_search, vec!["example.com"]);
    }

    #[test]
    fn build_context_defaults_to_current_dir() {
        let config = Config::from_yaml("build:\n  tag: app:1\n").unwrap();
        assert_eq!(config.build.unwrap().context.to_str(), Some("."));
    }

    #[test]
    fn auto_remove_is_accepted_for_rm() {
        let config = Config::from_yaml("run:\n  auto_remove: true\n").unwrap();
        assert!(config.run.unwrap().rm);
    }

    #[test]
    fn blank_build_tag_is_rejected() {
        let err = Config::from_yaml("build:\n  tag: \"\"\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("build.tag"));
    }

    #[test]
    fn detached_with_rm_is_rejected() {
        let err = Config::from_yaml("run:\n  detached: true\n  rm: true\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::from_yaml("run:\n  restart: always\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}

mod env_vars {
    use super::*;

    #[test]
    fn env_reference_with_default() {
        let yaml = r#"
run:
  env:
    LEVEL:
      env: DOCKRUN_TEST_LEVEL
      default: "warn"
"#;
        let config = Config::from_yaml(yaml).unwrap();
        match config.run.unwrap().env.get("LEVEL") {
            Some(EnvValue::FromEnv {
                var,
                default: Some(def),
            }) => {
                assert_eq!(var, "DOCKRUN_TEST_LEVEL");
                assert_eq!(def, "warn");
            }
            other => panic!("Expected FromEnv with default, got {:?}", other),
        }
    }

    #[test]
    fn resolve_env_values() {
        let mut env_map = BTreeMap::new();
        env_map.insert("KEY".to_string(), EnvValue::Literal("literal".to_string()));
        env_map.insert(
            "FROM_ENV".to_string(),
            EnvValue::FromEnv {
                var: "DOCKRUN_TEST_VAR".to_string(),
                default: None,
            },
        );
        env_map.insert(
            "WITH_DEFAULT".to_string(),
            EnvValue::FromEnv {
                var: "DOCKRUN_MISSING_VAR".to_string(),
                default: Some("default_value".to_string()),
            },
        );

        temp_env::with_vars(
            [
                ("DOCKRUN_TEST_VAR", Some("from_environment")),
                ("DOCKRUN_MISSING_VAR", None),
            ],
            || {
                let resolved = resolve_env_map(&env_map).unwrap();

                assert_eq!(resolved.get("KEY"), Some(&"literal".to_string()));
                assert_eq!(
                    resolved.get("FROM_ENV"),
                    Some(&"from_environment".to_string())
                );
                assert_eq!(
                    resolved.get("WITH_DEFAULT"),
                    Some(&"default_value".to_string())
                );
            },
        );
    }

    #[test]
    fn missing_variable_without_default_fails() {
        let config = Config::from_yaml("run:\n  env:\n    TOKEN: { env: DOCKRUN_ABSENT }\n").unwrap();

        temp_env::with_var_unset("DOCKRUN_ABSENT", || {
            let err = config.run.as_ref().unwrap().to_request().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config);
            assert!(err.to_string().contains("DOCKRUN_ABSENT"));
        });
    }
}

mod connection {
    use super::*;

    #[test]
    fn file_settings_resolve_secrets() {
        let yaml = r#"
connection:
  url: tcp://10.0.0.5:2375
  username: deploy
  password: { env: DOCKRUN_TEST_PASSWORD }
"#;
        let config = Config::from_yaml(yaml).unwrap();

        temp_env::with_var("DOCKRUN_TEST_PASSWORD", Some("s3cret"), || {
            let connection = config
                .connection_config(&ConnectionOverrides::default())
                .unwrap();
            assert_eq!(connection.url(), Some("tcp://10.0.0.5:2375"));
            assert_eq!(connection.credentials().username, "deploy");
            assert_eq!(connection.credentials().password, "s3cret");
            assert_eq!(connection.credentials().email, "");
            assert_eq!(
                connection.endpoint().unwrap(),
                Endpoint::Http("tcp://10.0.0.5:2375".to_string())
            );
        });
    }

    #[test]
    fn overrides_win_over_file() {
        let config = Config::from_yaml(
            "connection:\n  url: tcp://10.0.0.5:2375\n  username: deploy\n  timeout: 30s\n",
        )
        .unwrap();
        let overrides = ConnectionOverrides {
            url: Some("unix:///run/user/1000/docker.sock".to_string()),
            username: Some("ci".to_string()),
            ..Default::default()
        };

        let connection = config.connection_config(&overrides).unwrap();

        assert_eq!(connection.url(), Some("unix:///run/user/1000/docker.sock"));
        assert_eq!(connection.credentials().username, "ci");
        assert_eq!(connection.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn missing_section_means_local_daemon() {
        let connection = Config::default()
            .connection_config(&ConnectionOverrides::default())
            .unwrap();
        assert_eq!(connection.endpoint().unwrap(), Endpoint::LocalDefault);
    }
}

mod run_section {
    use super::*;

    #[test]
    fn to_request_carries_every_field() {
        let yaml = r#"
run:
  image: app:1
  name: web
  detached: true
  env: { MODE: prod }
  ports: { 80: 8080 }
  volumes: { /a: /b }
  volumes_from: [store]
  links: [db]
  dns: [1.1.1.1]
"#;
        let config = Config::from_yaml(yaml).unwrap();
        let request = config.run.unwrap().to_request().unwrap();

        assert_eq!(request.image, "app:1");
        assert_eq!(request.name.as_deref(), Some("web"));
        assert!(request.detached);
        assert!(!request.auto_remove);
        assert_eq!(request.env.get("MODE").map(String::as_str), Some("prod"));
        assert_eq!(request.ports.get("80").map(String::as_str), Some("8080"));
        assert_eq!(request.volumes.get("/a").map(String::as_str), Some("/b"));
        assert_eq!(request.volumes_from, vec!["store"]);
        assert_eq!(request.links, vec!["db"]);
        assert_eq!(request.dns, vec!["1.1.1.1"]);
    }
}

mod discovery {
    use super::*;

    #[test]
    fn finds_primary_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dockrun.yml"), "run:\n  image: app\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.run.unwrap().image.as_deref(), Some("app"));
    }

    #[test]
    fn finds_config_in_dot_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".dockrun")).unwrap();
        fs::write(dir.path().join(".dockrun/config.yml"), "{}").unwrap();

        assert_eq!(
            Config::find(dir.path()),
            Some(dir.path().join(".dockrun/config.yml"))
        );
    }

    #[test]
    fn missing_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::discover(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
