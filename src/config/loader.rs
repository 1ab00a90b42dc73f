use crate::config::schema::MonitorConfig;
use crate::error::{Error, Result};
use url::Url;
use validator::Validate;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Checks every URL and the numeric settings, returning the config
    /// unchanged when it is usable.
    pub fn build(config: MonitorConfig) -> Result<MonitorConfig> {
        if config.urls.is_empty() {
            return Err(Error::NoUrls);
        }

        for url in &config.urls {
            Self::validate_url(url)?;
        }

        config.validate()?;

        match serde_json::to_string(&config) {
            Ok(json) => log::debug!("Effective config: {}", json),
            Err(e) => log::debug!("Could not serialize config: {}", e),
        }

        Ok(config)
    }

    /// Rejects anything that cannot be used as the target of a GET request.
    pub fn validate_url(url: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::InvalidUrl {
                    url: url.to_string(),
                    reason: format!("unsupported protocol scheme \"{}\"", other),
                });
            }
        }

        if !parsed.has_host() {
            return Err(Error::InvalidUrl {
                url: url.to_string(),
                reason: "no host in request URL".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::OutputFormat;

    fn config_with(urls: &[&str]) -> MonitorConfig {
        MonitorConfig {
            urls: urls.iter().map(|u| u.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_http_and_https() {
        let config = ConfigLoader::build(config_with(&[
            "https://example.com",
            "http://localhost:8080",
        ]))
        .unwrap();
        assert_eq!(config.urls.len(), 2);
        assert_eq!(config.interval_secs, 5);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.refresh_ms, 1000);
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn rejects_empty_url_list() {
        let err = ConfigLoader::build(config_with(&[])).unwrap_err();
        assert!(matches!(err, Error::NoUrls));
    }

    #[test]
    fn rejects_garbage_url() {
        let err = ConfigLoader::build(config_with(&[":::invalid-url:::"])).unwrap_err();
        match err {
            Error::InvalidUrl { url, .. } => assert_eq!(url, ":::invalid-url:::"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_url_without_scheme() {
        assert!(ConfigLoader::validate_url("example.com").is_err());
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ConfigLoader::validate_url("ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported protocol scheme"));
    }

    #[test]
    fn invalid_url_stops_at_first_bad_entry() {
        let err = ConfigLoader::build(config_with(&[
            "https://example.com",
            "not a url",
            "also bad",
        ]))
        .unwrap_err();
        assert!(err.to_string().starts_with("invalid URL address: not a url"));
    }

    #[test]
    fn rejects_zero_interval() {
        let mut config = config_with(&["https://example.com"]);
        config.interval_secs = 0;
        let err = ConfigLoader::build(config).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn rejects_too_fast_refresh() {
        let mut config = config_with(&["https://example.com"]);
        config.refresh_ms = 10;
        assert!(matches!(
            ConfigLoader::build(config).unwrap_err(),
            Error::Validation(_)
        ));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: MonitorConfig =
            serde_json::from_str(r#"{"urls": ["https://example.com"], "format": "json"}"#).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.interval(), std::time::Duration::from_secs(5));
        assert_eq!(config.timeout(), std::time::Duration::from_secs(10));
        assert!(config.user_agent.starts_with("sitewatch/"));
    }
}
