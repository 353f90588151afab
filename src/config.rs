use std::io::{Error, ErrorKind};

use url::Url;

#[derive(Debug, Default, serde_derive::Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server_address: Option<Url>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub skip_notice: bool,
}

impl Config {
    pub fn get() -> Self {
        dirs::config_dir()
            .ok_or(Error::new(ErrorKind::NotFound, "configuration directory not found"))
            .and_then(|dir| std::fs::read_to_string(dir.join("mpv/introskipper.toml")))
            .and_then(|data| toml::from_str(&data).map_err(|e| Error::new(ErrorKind::InvalidData, e)))
            .unwrap_or_else(|e| {
                log::warn!("Failed to load configuration file: {}. Falling back to default", e);
                Self::default()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn parse_full_configuration() {
        let config: Config = toml::from_str(
            r#"
            server_address = "https://jellyfin.example.com/"
            api_key = "d0d566f11bb24e3bb30e31dccb1d331c"
            skip_notice = true
            "#,
        )
        .unwrap();

        assert_eq!(
            config.server_address.unwrap().as_str(),
            "https://jellyfin.example.com/"
        );
        assert_eq!(config.api_key.as_deref(), Some("d0d566f11bb24e3bb30e31dccb1d331c"));
        assert!(config.skip_notice);
    }

    #[test]
    fn empty_configuration_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert!(config.server_address.is_none());
        assert!(config.api_key.is_none());
        assert!(!config.skip_notice);
    }
}
