#[cfg(test)]
mod tests {
    use parking_lot::{const_mutex, Mutex, MutexGuard};
    use std::path::PathBuf;
    use tasklane::libs::config::{ClientConfig, Config, DatabaseConfig, ServerConfig};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    // Tests in this file point HOME at their own temp dir.
    static ENV_LOCK: Mutex<()> = const_mutex(());

    struct ConfigTestContext {
        temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                temp_dir,
                _guard: guard,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_without_file_gives_defaults(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server_address(), "127.0.0.1:3000");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(_ctx: &mut ConfigTestContext) {
        let config = Config {
            server: Some(ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            }),
            database: Some(DatabaseConfig {
                path: Some(PathBuf::from("/srv/tasklane.db")),
            }),
            client: Some(ClientConfig {
                api_url: "http://tasks.local:8080/".to_string(),
            }),
        };
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.api_url(), "http://tasks.local:8080");
        assert_eq!(loaded.db_path().unwrap(), PathBuf::from("/srv/tasklane.db"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_delete(_ctx: &mut ConfigTestContext) {
        Config::default().save().unwrap();

        assert!(Config::delete().unwrap());
        assert!(!Config::delete().unwrap());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_db_path_defaults_to_data_dir(ctx: &mut ConfigTestContext) {
        let path = Config::default().db_path().unwrap();

        assert!(path.starts_with(ctx.temp_dir.path()));
        assert!(path.ends_with("tasklane.db"));
    }
}
