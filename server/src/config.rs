use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

/// Settings read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Base for absolute links handed to clients, without a trailing slash.
    pub public_url: String,
    /// TrueType face for shopping-list PDFs; the bundled DejaVu Sans when unset.
    pub font_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:3000")?;

        let public_url = lookup("PUBLIC_URL")
            .unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !public_url.starts_with("http://") && !public_url.starts_with("https://") {
            anyhow::bail!("PUBLIC_URL must start with http:// or https://");
        }

        Ok(Settings {
            database_url,
            bind_addr,
            public_url,
            font_path: lookup("PDF_FONT_PATH").map(PathBuf::from),
        })
    }

    pub fn photo_url(&self, id: uuid::Uuid) -> String {
        format!("{}/api/photos/{}", self.public_url, id)
    }

    pub fn short_link_url(&self, code: &str) -> String {
        format!("{}/r/{}/", self.public_url, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")])).unwrap();
        assert_eq!(settings.database_url, "postgres://db");
        assert_eq!(settings.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(settings.public_url, "http://localhost:3000");
        assert_eq!(settings.font_path, None);
    }

    #[test]
    fn test_font_override() {
        let settings = Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("PDF_FONT_PATH", "/srv/fonts/NotoSans.ttf"),
        ]))
        .unwrap();
        assert_eq!(
            settings.font_path,
            Some(PathBuf::from("/srv/fonts/NotoSans.ttf"))
        );
    }

    #[test]
    fn test_missing_database_url() {
        assert!(Settings::from_lookup(lookup(&[])).is_err());
    }

    #[test]
    fn test_public_url_trailing_slash_trimmed() {
        let settings = Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("PUBLIC_URL", "https://foodgram.example/"),
        ]))
        .unwrap();
        assert_eq!(settings.public_url, "https://foodgram.example");
        assert_eq!(
            settings.short_link_url("g8"),
            "https://foodgram.example/r/g8/"
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("BIND_ADDR", "not an address"),
        ]))
        .is_err());
        assert!(Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("PUBLIC_URL", "foodgram.example"),
        ]))
        .is_err());
    }

    #[test]
    fn test_photo_url() {
        let settings = Settings::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")])).unwrap();
        let id = uuid::Uuid::nil();
        assert_eq!(
            settings.photo_url(id),
            "http://localhost:3000/api/photos/00000000-0000-0000-0000-000000000000"
        );
    }
}
