// ABOUTME: Integration tests for configuration parsing and discovery.
// ABOUTME: Tests YAML parsing, defaults, env overrides, and init scaffolding.

use pullwatch::config::*;
use pullwatch::error::Error;
use pullwatch::types::Architecture;
use std::fs;
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.registry, DEFAULT_REGISTRY);
        assert_eq!(config.architecture, Architecture::Amd64);
        assert_eq!(config.relay_capacity, 64);
        assert!(config.engine.socket.is_none());
        assert_eq!(config.engine.timeout, Duration::from_secs(120));
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
registry: mirror.example.com
architecture: arm64
relay_capacity: 8
engine:
  socket: /run/podman/podman.sock
  timeout: 30s
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.registry, "mirror.example.com");
        assert_eq!(config.architecture, Architecture::Arm64);
        assert_eq!(config.relay_capacity, 8);
        assert_eq!(
            config.engine.socket.as_deref(),
            Some("/run/podman/podman.sock")
        );
        assert_eq!(config.engine.timeout, Duration::from_secs(30));
    }

    #[test]
    fn unknown_architecture_is_rejected() {
        let err = Config::from_yaml("architecture: sparc").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains("sparc"));
    }

    #[test]
    fn zero_relay_capacity_is_rejected() {
        let err = Config::from_yaml("relay_capacity: 0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn blank_registry_is_rejected() {
        let err = Config::from_yaml("registry: '  '").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn pull_defaults_follow_config() {
        let config = Config::from_yaml("registry: r.local\narchitecture: i386").unwrap();
        assert_eq!(
            config.pull_defaults(),
            PullDefaults {
                registry: "r.local".to_string(),
                architecture: Architecture::I386,
            }
        );
    }
}

mod discovery {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.pull_defaults(), PullDefaults::default());
    }

    #[test]
    fn finds_alternate_filename() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_ALT), "architecture: arm").unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.architecture, Architecture::Arm);
    }

    #[test]
    fn primary_filename_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "architecture: arm64").unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_ALT), "architecture: arm").unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.architecture, Architecture::Arm64);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }
}

mod env_overrides {
    use super::*;

    #[test]
    fn env_overrides_file_values() {
        temp_env::with_vars(
            [(ENV_REGISTRY, Some("env.example.com")), (ENV_ARCH, Some("arm64"))],
            || {
                let config = Config::from_yaml("registry: file.example.com")
                    .unwrap()
                    .with_env_overrides()
                    .unwrap();
                assert_eq!(config.registry, "env.example.com");
                assert_eq!(config.architecture, Architecture::Arm64);
            },
        );
    }

    #[test]
    fn invalid_env_architecture_is_rejected() {
        temp_env::with_vars([(ENV_REGISTRY, None), (ENV_ARCH, Some("z80"))], || {
            let err = Config::default().with_env_overrides().unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(_)));
            assert!(err.to_string().contains(ENV_ARCH));
        });
    }

    #[test]
    fn unset_env_keeps_file_values() {
        temp_env::with_vars([(ENV_REGISTRY, None::<&str>), (ENV_ARCH, None)], || {
            let config = Config::from_yaml("architecture: arm")
                .unwrap()
                .with_env_overrides()
                .unwrap();
            assert_eq!(config.architecture, Architecture::Arm);
            assert_eq!(config.registry, DEFAULT_REGISTRY);
        });
    }
}

mod init {
    use super::*;

    #[test]
    fn init_writes_loadable_template() {
        let dir = tempfile::tempdir().unwrap();
        init_config(dir.path(), false).unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.pull_defaults(), PullDefaults::default());
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "architecture: arm").unwrap();

        let err = init_config(dir.path(), false).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));

        init_config(dir.path(), true).unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.architecture, Architecture::Amd64);
    }
}
