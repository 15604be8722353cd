//! Configuration provider tests

#[cfg(test)]
mod tests {
    use bvc_position_agent::settings::{
        json::CONFIG_FILE_NAME, yaml::DEFAULT_CONFIG_YAML, ConfigProvider, Configuration,
        JsonFileProvider, SchemaProvider, SchemaRecord, YamlProvider,
    };
    use std::fs;
    use tempfile::TempDir;

    fn configured() -> Configuration {
        Configuration::new("https://bvc.example.com", "secret-token", 3)
    }

    // -----------------------------------------------------------------------
    // Configuration record
    // -----------------------------------------------------------------------

    #[test]
    fn blank_fields_are_reported_missing() {
        let cfg = Configuration::new("", "x", 2);
        assert!(!cfg.is_valid());
        assert_eq!(cfg.missing_fields(), vec!["bvc-server"]);

        let cfg = Configuration::new("   ", "  ", 2);
        assert_eq!(cfg.missing_fields(), vec!["bvc-server", "access-token"]);

        assert!(configured().is_valid());
    }

    #[test]
    fn debug_output_never_shows_the_token() {
        assert!(!format!("{:?}", configured()).contains("secret-token"));
        assert!(format!("{:?}", Configuration::default()).contains("<blank>"));
    }

    // -----------------------------------------------------------------------
    // JSON file provider
    // -----------------------------------------------------------------------

    #[test]
    fn missing_json_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let provider = JsonFileProvider::new(dir.path());
        assert_eq!(provider.path(), dir.path().join(CONFIG_FILE_NAME));

        let cfg = provider.load();
        assert_eq!(cfg, Configuration::default());
        assert!(!cfg.is_valid());
        assert!(provider.path().exists());

        let written: Configuration =
            serde_json::from_str(&fs::read_to_string(provider.path()).unwrap()).unwrap();
        assert_eq!(written, Configuration::default());
    }

    #[test]
    fn create_default_does_not_overwrite_existing_file() {
        let dir = TempDir::new().unwrap();
        let provider = JsonFileProvider::new(dir.path());
        provider.save(&configured()).unwrap();

        provider.create_default_if_missing();
        assert_eq!(provider.load(), configured());
    }

    #[test]
    fn unparseable_json_yields_default_and_keeps_file() {
        let dir = TempDir::new().unwrap();
        let provider = JsonFileProvider::new(dir.path());
        fs::write(provider.path(), "{ not json").unwrap();

        assert_eq!(provider.load(), Configuration::default());
        assert_eq!(fs::read_to_string(provider.path()).unwrap(), "{ not json");
    }

    #[test]
    fn json_accepts_camel_case_keys() {
        let dir = TempDir::new().unwrap();
        let provider = JsonFileProvider::new(dir.path());
        fs::write(
            provider.path(),
            r#"{"bvcServer":"http://localhost:3000","accessToken":"abc","minimumPlayers":4}"#,
        )
        .unwrap();

        let cfg = provider.load();
        assert_eq!(cfg, Configuration::new("http://localhost:3000", "abc", 4));
    }

    #[test]
    fn json_null_and_missing_fields_fall_back() {
        let dir = TempDir::new().unwrap();
        let provider = JsonFileProvider::new(dir.path());
        fs::write(provider.path(), r#"{"bvc-server":null,"access-token":"abc"}"#).unwrap();

        let cfg = provider.load();
        assert_eq!(cfg.bvc_server, "");
        assert_eq!(cfg.access_token, "abc");
        assert_eq!(cfg.minimum_players, 2);
        assert!(!cfg.is_valid());
    }

    #[test]
    fn json_save_then_load_is_identity() {
        let dir = TempDir::new().unwrap();
        let provider = JsonFileProvider::new(dir.path().join("nested").join("config"));

        let cfg = Configuration::new("https://bvc.example.com/", "tok", -1);
        provider.save(&cfg).unwrap();
        assert_eq!(provider.load(), cfg);
    }

    #[test]
    fn json_is_written_pretty_with_hyphenated_keys() {
        let dir = TempDir::new().unwrap();
        let provider = JsonFileProvider::new(dir.path());
        provider.save(&configured()).unwrap();

        let text = fs::read_to_string(provider.path()).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"bvc-server\": \"https://bvc.example.com\""));
        assert!(text.contains("\"access-token\""));
        assert!(text.contains("\"minimum-players\": 3"));
    }

    // -----------------------------------------------------------------------
    // YAML provider
    // -----------------------------------------------------------------------

    #[test]
    fn default_yaml_resource_is_materialised() {
        let dir = TempDir::new().unwrap();
        let provider = YamlProvider::new(dir.path().join("plugins").join("config.yml"));

        provider.create_default_if_missing();
        assert_eq!(
            fs::read_to_string(provider.path()).unwrap(),
            DEFAULT_CONFIG_YAML
        );

        let cfg = provider.load();
        assert_eq!(cfg, Configuration::default());
    }

    #[test]
    fn yaml_reads_hyphenated_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(
            &path,
            "bvc-server: \"https://bvc.example.com\"\naccess-token: \"abc\"\nminimum-players: 5\n",
        )
        .unwrap();

        let cfg = YamlProvider::new(&path).load();
        assert_eq!(cfg, Configuration::new("https://bvc.example.com", "abc", 5));
    }

    #[test]
    fn yaml_falls_back_to_camel_case_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(
            &path,
            "bvcServer: \"https://bvc.example.com\"\naccessToken: \"abc\"\n",
        )
        .unwrap();

        let cfg = YamlProvider::new(&path).load();
        assert_eq!(cfg.bvc_server, "https://bvc.example.com");
        assert_eq!(cfg.access_token, "abc");
        assert_eq!(cfg.minimum_players, 2);
    }

    #[test]
    fn yaml_missing_file_yields_default() {
        let dir = TempDir::new().unwrap();
        let provider = YamlProvider::new(dir.path().join("absent.yml"));
        assert_eq!(provider.load(), Configuration::default());
    }

    #[test]
    fn yaml_save_rewrites_keys_and_keeps_the_rest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "bvcServer: old\nother-plugin-option: true\n").unwrap();

        let provider = YamlProvider::new(&path);
        provider.save(&configured()).unwrap();

        let doc: serde_yaml::Value =
            serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["other-plugin-option"], serde_yaml::Value::Bool(true));
        assert!(doc.get("bvcServer").is_none());
        assert_eq!(doc["bvc-server"].as_str(), Some("https://bvc.example.com"));

        assert_eq!(provider.load(), configured());
    }

    // -----------------------------------------------------------------------
    // Schema provider
    // -----------------------------------------------------------------------

    #[test]
    fn schema_provider_reads_the_host_record() {
        let provider = SchemaProvider::new(|| SchemaRecord {
            bvc_server: "https://bvc.example.com".into(),
            access_token: "abc".into(),
            minimum_players: 0,
        });

        provider.create_default_if_missing();
        let cfg = provider.load();
        assert!(cfg.is_valid());
        assert_eq!(cfg.minimum_players, 0);
        assert_eq!(cfg.effective_minimum_players(), 2);
    }

    #[test]
    fn schema_default_record_is_invalid() {
        let provider = SchemaProvider::new(SchemaRecord::default);
        assert_eq!(provider.load(), Configuration::default());
    }
}
