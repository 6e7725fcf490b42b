use crate::corpus::{default_corpus_dir, DEFAULT_CORPUS_URL};
use anyhow::{Context as AnyhowContext, Result};
use lexis_lookup::SuggestConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "LEXIS_CONFIG";
pub const WORDNET_DIR_ENV: &str = "LEXIS_WORDNET_DIR";
pub const CORPUS_URL_ENV: &str = "LEXIS_CORPUS_URL";
pub const CORPUS_SHA256_ENV: &str = "LEXIS_CORPUS_SHA256";
pub const OFFLINE_ENV: &str = "LEXIS_OFFLINE";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub corpus_dir: Option<PathBuf>,
    pub corpus_url: Option<String>,
    pub corpus_sha256: Option<String>,
    pub offline: Option<bool>,
    pub max_suggestions: Option<usize>,
    pub suggestion_cutoff: Option<f64>,
    pub pretty: Option<bool>,
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub wordnet_dir: Option<PathBuf>,
    pub corpus_url: Option<String>,
    pub offline: bool,
    pub max_suggestions: Option<usize>,
    pub suggestion_cutoff: Option<f64>,
    pub pretty: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub corpus: CorpusSettings,
    pub suggest: SuggestConfig,
    pub pretty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorpusSettings {
    pub dir: PathBuf,
    pub url: String,
    /// Expected SHA-256 of the archive, lowercase hex.
    pub sha256: Option<String>,
    pub offline: bool,
}

fn truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lexis").join("config.toml"))
}

fn parse_file(path: &Path) -> Result<FileConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
}

/// Read the config file named by the flag or `LEXIS_CONFIG`, else the per-user default.
///
/// An explicitly named file must exist; the default one is optional.
pub fn load_file<E>(explicit: Option<&Path>, env: &E) -> Result<FileConfig>
where
    E: Fn(&str) -> Option<String>,
{
    let named = explicit
        .map(Path::to_path_buf)
        .or_else(|| env(CONFIG_ENV).map(PathBuf::from));
    if let Some(path) = named {
        log::debug!("Loading config from {}", path.display());
        return parse_file(&path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            log::debug!("Loading config from {}", path.display());
            parse_file(&path)
        }
        _ => Ok(FileConfig::default()),
    }
}

/// Layer defaults < config file < environment < command line.
pub fn resolve<E>(overrides: &Overrides, file: FileConfig, env: &E) -> Result<Settings>
where
    E: Fn(&str) -> Option<String>,
{
    let dir = overrides
        .wordnet_dir
        .clone()
        .or_else(|| env(WORDNET_DIR_ENV).map(PathBuf::from))
        .or(file.corpus_dir)
        .unwrap_or_else(default_corpus_dir);

    let url = overrides
        .corpus_url
        .clone()
        .or_else(|| env(CORPUS_URL_ENV))
        .or(file.corpus_url)
        .unwrap_or_else(|| DEFAULT_CORPUS_URL.to_string());

    let sha256 = env(CORPUS_SHA256_ENV)
        .or(file.corpus_sha256)
        .map(|digest| digest.trim().to_ascii_lowercase())
        .filter(|digest| !digest.is_empty());

    let offline = overrides.offline
        || env(OFFLINE_ENV)
            .map(|v| truthy(&v))
            .or(file.offline)
            .unwrap_or(false);

    let defaults = SuggestConfig::default();
    let suggest = SuggestConfig {
        limit: overrides
            .max_suggestions
            .or(file.max_suggestions)
            .unwrap_or(defaults.limit),
        cutoff: overrides
            .suggestion_cutoff
            .or(file.suggestion_cutoff)
            .unwrap_or(defaults.cutoff),
    };
    suggest.validate()?;

    Ok(Settings {
        corpus: CorpusSettings {
            dir,
            url,
            sha256,
            offline,
        },
        suggest,
        pretty: overrides.pretty || file.pretty.unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_any_source() {
        let settings = resolve(&Overrides::default(), FileConfig::default(), &env_of(&[])).unwrap();
        assert_eq!(settings.corpus.url, DEFAULT_CORPUS_URL);
        assert_eq!(settings.corpus.dir, default_corpus_dir());
        assert!(!settings.corpus.offline);
        assert_eq!(settings.corpus.sha256, None);
        assert_eq!(settings.suggest, SuggestConfig::default());
        assert!(!settings.pretty);
    }

    #[test]
    fn flags_beat_environment_beats_file() {
        let file: FileConfig = toml::from_str(
            r#"
            corpus_dir = "/from/file"
            corpus_url = "https://file.example/wn.tar.gz"
            max_suggestions = 3
            "#,
        )
        .unwrap();
        let env = env_of(&[
            (WORDNET_DIR_ENV, "/from/env"),
            (CORPUS_URL_ENV, "https://env.example/wn.tar.gz"),
        ]);
        let overrides = Overrides {
            wordnet_dir: Some(PathBuf::from("/from/flag")),
            ..Overrides::default()
        };

        let settings = resolve(&overrides, file, &env).unwrap();
        assert_eq!(settings.corpus.dir, PathBuf::from("/from/flag"));
        assert_eq!(settings.corpus.url, "https://env.example/wn.tar.gz");
        assert_eq!(settings.suggest.limit, 3);
        assert_eq!(settings.suggest.cutoff, 0.8);
    }

    #[test]
    fn offline_and_digest_come_from_environment() {
        let env = env_of(&[(OFFLINE_ENV, "TRUE"), (CORPUS_SHA256_ENV, "  ABCDEF  ")]);
        let settings = resolve(&Overrides::default(), FileConfig::default(), &env).unwrap();
        assert!(settings.corpus.offline);
        assert_eq!(settings.corpus.sha256.as_deref(), Some("abcdef"));

        let env = env_of(&[(OFFLINE_ENV, "0")]);
        let file = FileConfig {
            offline: Some(true),
            ..FileConfig::default()
        };
        let settings = resolve(&Overrides::default(), file, &env).unwrap();
        assert!(!settings.corpus.offline);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: std::result::Result<FileConfig, _> = toml::from_str("colour = \"red\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn invalid_cutoff_is_an_error() {
        let overrides = Overrides {
            suggestion_cutoff: Some(2.0),
            ..Overrides::default()
        };
        assert!(resolve(&overrides, FileConfig::default(), &env_of(&[])).is_err());
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(load_file(Some(&missing), &env_of(&[])).is_err());

        let present = dir.path().join("lexis.toml");
        std::fs::write(&present, "pretty = true\nsuggestion_cutoff = 0.5\n").unwrap();
        let env = env_of(&[(CONFIG_ENV, present.to_str().unwrap())]);
        let file = load_file(None, &env).unwrap();
        assert_eq!(file.pretty, Some(true));
        assert_eq!(file.suggestion_cutoff, Some(0.5));
    }
}
