#[cfg(test)]
mod tests {
    use mest::libs::config::{Config, ServerConfig, ShiftConfig};
    use mest::libs::data_storage::DataStorage;
    use mest::libs::shift::Shift;
    use parking_lot::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Tests below rewrite the process environment, so they run one at a time.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct ConfigTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_shift(), Shift::A);
        assert_eq!(config.operator(), "");
        assert_eq!(config.api_url(), None);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(_ctx: &mut ConfigTestContext) {
        let config = Config {
            shift: Some(ShiftConfig {
                default_shift: Shift::C,
                operator: "kim".to_string(),
            }),
            server: Some(ServerConfig {
                api_url: "http://mes.local:3000".to_string(),
            }),
        };
        config.save().unwrap();

        assert!(DataStorage::new().get_path("config.json").unwrap().exists());

        let read = Config::read().unwrap();
        assert_eq!(read, config);
        assert_eq!(read.default_shift(), Shift::C);
        assert_eq!(read.operator(), "kim");
        assert_eq!(read.api_url(), Some("http://mes.local:3000"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_uses_defaults(_ctx: &mut ConfigTestContext) {
        let path = DataStorage::new().get_path("config.json").unwrap();
        std::fs::write(&path, r#"{ "shift": { "default_shift": "B" } }"#).unwrap();

        let config = Config::read().unwrap();
        assert_eq!(config.default_shift(), Shift::B);
        assert_eq!(config.operator(), "");
        assert!(config.server.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_blank_api_url_means_unconfigured(_ctx: &mut ConfigTestContext) {
        let config = Config {
            shift: None,
            server: Some(ServerConfig {
                api_url: "   ".to_string(),
            }),
        };
        assert_eq!(config.api_url(), None);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_is_an_error(_ctx: &mut ConfigTestContext) {
        let path = DataStorage::new().get_path("config.json").unwrap();
        std::fs::write(&path, "{ shift: ").unwrap();
        assert!(Config::read().is_err());
    }
}
