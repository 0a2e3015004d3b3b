// ABOUTME: Integration tests for configuration parsing and validation.
// ABOUTME: Tests YAML parsing, env var lookups, discovery, and CLI overrides.

use retag_push::config::*;
use retag_push::error::Error;
use retag_push::runtime::RuntimeType;
use retag_push::transfer::CleanupMode;
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn parse_full_config() {
        let yaml = r#"
version: "4.0.0"
registry_prefix: registry.example.com/petclinic
source_prefix: localhost/builds
log_file: transfer.log
runtime: docker
insecure_registry: false
abort_on_retag_failure: true
retry:
  max_attempts: 5
  delay: 250ms
cleanup:
  enabled: true
  remove_source: false
services:
  - api
  - web
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.version, EnvValue::Literal("4.0.0".to_string()));
        assert_eq!(config.source_prefix, "localhost/builds");
        assert_eq!(config.runtime, RuntimeType::Docker);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.delay, Duration::from_millis(250));
        assert_eq!(config.services.len(), 2);

        let run = config.resolve(&Overrides::default()).unwrap();
        assert_eq!(run.registry_prefix, "registry.example.com/petclinic");
        assert!(run.push.tls_verify);
        assert!(run.abort_on_retag_failure);
        assert_eq!(run.cleanup, CleanupMode::DestinationOnly);
    }

    #[test]
    fn env_reference_without_default() {
        let yaml = "registry_prefix: { env: PUSH_TARGET }\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(
            config.registry_prefix,
            EnvValue::FromEnv {
                var: "PUSH_TARGET".to_string(),
                default: None
            }
        );
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(Config::from_yaml("registry: localhost:5001\n").is_err());
    }

    #[test]
    fn duplicate_service_rejected() {
        let yaml = "services:\n  - api\n  - api\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn empty_service_list_rejected() {
        assert!(Config::from_yaml("services: []\n").is_err());
    }

    #[test]
    fn zero_attempts_rejected() {
        let yaml = "retry:\n  max_attempts: 0\n";
        assert!(Config::from_yaml(yaml).is_err());
    }
}

mod environment {
    use super::*;

    #[test]
    fn unset_variables_use_defaults() {
        temp_env::with_vars_unset(["VERSION", "REPOSITORY_PREFIX"], || {
            let run = Config::default().resolve(&Overrides::default()).unwrap();
            assert_eq!(run.version, "3.2.7");
            assert_eq!(run.registry_prefix, "localhost:5001");
        });
    }

    #[test]
    fn set_variables_win() {
        temp_env::with_vars(
            [
                ("VERSION", Some("9.9.9")),
                ("REPOSITORY_PREFIX", Some("registry.example.com/ns")),
            ],
            || {
                let run = Config::default().resolve(&Overrides::default()).unwrap();
                assert_eq!(run.version, "9.9.9");
                assert_eq!(run.registry_prefix, "registry.example.com/ns");
            },
        );
    }

    #[test]
    fn empty_prefix_variable_is_not_replaced_by_default() {
        temp_env::with_var("REPOSITORY_PREFIX", Some(""), || {
            let run = Config::default().resolve(&Overrides::default()).unwrap();
            assert_eq!(run.registry_prefix, "");
        });
    }

    #[test]
    fn missing_variable_without_default_is_an_error() {
        temp_env::with_var_unset("PUSH_TARGET", || {
            let config = Config::from_yaml("registry_prefix: { env: PUSH_TARGET }\n").unwrap();
            assert!(matches!(
                config.resolve(&Overrides::default()),
                Err(Error::MissingEnvVar(var)) if var == "PUSH_TARGET"
            ));
        });
    }
}

mod overrides {
    use super::*;

    #[test]
    fn cli_values_take_precedence() {
        temp_env::with_var("VERSION", Some("1.0.0"), || {
            let overrides = Overrides {
                version: Some("2.0.0".to_string()),
                registry_prefix: Some("ghcr.io/org".to_string()),
                runtime: Some(RuntimeType::Docker),
                ..Default::default()
            };
            let run = Config::default().resolve(&overrides).unwrap();
            assert_eq!(run.version, "2.0.0");
            assert_eq!(run.registry_prefix, "ghcr.io/org");
            assert_eq!(run.runtime, RuntimeType::Docker);
        });
    }

    #[test]
    fn cleanup_flags_select_mode() {
        let config = Config::default();
        let mode = |overrides: Overrides| config.resolve(&overrides).unwrap().cleanup;

        assert_eq!(mode(Overrides::default()), CleanupMode::DestinationAndSource);
        assert_eq!(
            mode(Overrides {
                keep_source: true,
                ..Default::default()
            }),
            CleanupMode::DestinationOnly
        );
        assert_eq!(
            mode(Overrides {
                no_cleanup: true,
                ..Default::default()
            }),
            CleanupMode::Disabled
        );
    }

    #[test]
    fn strict_enables_abort_on_retag_failure() {
        let run = Config::default()
            .resolve(&Overrides {
                strict: true,
                ..Default::default()
            })
            .unwrap();
        assert!(run.abort_on_retag_failure);
    }
}

mod discovery {
    use super::*;

    #[test]
    fn discovers_primary_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("retag-push.yml"), "source_prefix: local/ns\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.source_prefix, "local/ns");
    }

    #[test]
    fn discovers_yaml_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("retag-push.yaml"), "runtime: docker\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.runtime, RuntimeType::Docker);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::discover(dir.path()),
            Err(Error::ConfigNotFound(_))
        ));

        let config = Config::load_or_default(dir.path(), None).unwrap();
        assert_eq!(config.services.len(), 8);
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yml");
        assert!(matches!(
            Config::load_or_default(dir.path(), Some(&missing)),
            Err(Error::ConfigNotFound(_))
        ));
    }

    #[test]
    fn init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_config(dir.path(), false).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.source_prefix, DEFAULT_SOURCE_PREFIX);
        assert!(matches!(
            init_config(dir.path(), false),
            Err(Error::AlreadyExists(_))
        ));
        assert!(init_config(dir.path(), true).is_ok());
    }
}
