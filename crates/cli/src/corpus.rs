use crate::config::CorpusSettings;
use crate::failure::Failure;
use anyhow::{Context as AnyhowContext, Result};
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use lexis_wordnet::{missing_files, EXCEPTION_FILES, REQUIRED_FILES};
use reqwest::Client;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const DEFAULT_CORPUS_URL: &str = "https://wordnetcode.princeton.edu/3.0/WNdb-3.0.tar.gz";

/// `<data dir>/lexis/wordnet`, or `./wordnet` on platforms without a data dir.
pub fn default_corpus_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("lexis").join("wordnet"))
        .unwrap_or_else(|| PathBuf::from("wordnet"))
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FetchReport {
    pub corpus_dir: String,
    pub url: String,
    pub sha256: String,
    pub installed: Vec<String>,
}

/// Make sure every required database file is present, fetching the archive once if not.
///
/// Returns `None` when the corpus was already installed.
pub async fn ensure_corpus(
    settings: &CorpusSettings,
    show_progress: bool,
) -> std::result::Result<Option<FetchReport>, Failure> {
    let missing = missing_files(&settings.dir);
    if missing.is_empty() {
        log::debug!("WordNet corpus present in {}", settings.dir.display());
        return Ok(None);
    }

    if settings.offline {
        return Err(Failure::CorpusUnavailable {
            dir: settings.dir.clone(),
            missing: missing.join(", "),
        });
    }

    log::info!(
        "WordNet corpus missing from {} ({}); fetching {}",
        settings.dir.display(),
        missing.join(", "),
        settings.url
    );
    let progress = spinner(show_progress);
    let outcome = install_corpus(settings, &progress).await;
    progress.finish_and_clear();

    let report = outcome.map_err(|source| Failure::CorpusFetch {
        dir: settings.dir.clone(),
        source,
    })?;
    log::info!(
        "Installed {} WordNet file(s) into {}",
        report.installed.len(),
        report.corpus_dir
    );
    Ok(Some(report))
}

fn spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} {bytes}") {
        bar.set_style(style);
    }
    bar.set_message("Downloading WordNet");
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

async fn install_corpus(settings: &CorpusSettings, progress: &ProgressBar) -> Result<FetchReport> {
    let dir = &settings.dir;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let client = Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    let archive = temp_path_for(&dir.join("wordnet.tar.gz"));
    let expected = settings.sha256.as_deref().unwrap_or_default();
    let digest = match download_with_sha256(&client, &settings.url, &archive, expected, progress).await {
        Ok(digest) => digest,
        Err(err) => {
            std::fs::remove_file(&archive).ok();
            return Err(err);
        }
    };

    progress.set_message("Extracting WordNet");
    let extracted = extract_corpus(&archive, dir);
    std::fs::remove_file(&archive).ok();
    let installed = extracted?;

    let still_missing = missing_files(dir);
    if !still_missing.is_empty() {
        anyhow::bail!(
            "archive from {} did not contain {}",
            settings.url,
            still_missing.join(", ")
        );
    }

    Ok(FetchReport {
        corpus_dir: dir.display().to_string(),
        url: settings.url.clone(),
        sha256: digest,
        installed,
    })
}

/// Stream `url` into `dest`, returning the body's SHA-256. A non-empty `expected` digest must match.
async fn download_with_sha256(
    client: &Client,
    url: &str,
    dest: &Path,
    expected: &str,
    progress: &ProgressBar,
) -> Result<String> {
    let mut response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Download failed: GET {url}"))?
        .error_for_status()
        .with_context(|| format!("Download failed: GET {url}"))?;

    let mut file =
        File::create(dest).with_context(|| format!("Failed to create {}", dest.display()))?;
    let mut hasher = Sha256::new();

    while let Some(chunk) = response
        .chunk()
        .await
        .with_context(|| format!("Failed while reading HTTP body from {url}"))?
    {
        file.write_all(&chunk)
            .with_context(|| format!("Failed to write {}", dest.display()))?;
        hasher.update(&chunk);
        progress.inc(chunk.len() as u64);
    }
    file.flush()
        .with_context(|| format!("Failed to flush {}", dest.display()))?;

    let actual = to_lower_hex(&hasher.finalize());
    if !expected.is_empty() && actual != expected.to_ascii_lowercase() {
        anyhow::bail!("SHA256 mismatch for {url}: expected {expected} actual {actual}");
    }
    log::debug!("Downloaded {url} (sha256 {actual})");
    Ok(actual)
}

/// Database file name for an archive entry, if it is one we install.
///
/// Entries are matched by file name only; absolute paths and `..` are refused outright.
fn wanted_file(entry: &Path) -> Option<&'static str> {
    let mut name = None;
    for component in entry.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::ParentDir => return None,
            Component::CurDir => {}
            Component::Normal(part) => name = Some(part),
        }
    }
    let name = name?.to_str()?;
    REQUIRED_FILES
        .iter()
        .chain(EXCEPTION_FILES.iter())
        .find(|wanted| **wanted == name)
        .copied()
}

/// Unpack the database files from a `.tar.gz`, flattened into `dir`. Returns the names written.
pub fn extract_corpus(archive: &Path, dir: &Path) -> Result<Vec<String>> {
    let file =
        File::open(archive).with_context(|| format!("Failed to open {}", archive.display()))?;
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    let mut written = HashSet::new();
    let mut installed = Vec::new();

    let entries = tar
        .entries()
        .with_context(|| format!("Failed to read archive {}", archive.display()))?;
    for entry in entries {
        let mut entry = entry.context("Corrupt archive entry")?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = match entry.path() {
            Ok(path) => wanted_file(&path),
            Err(err) => return Err(err).context("Archive entry has an invalid path"),
        };
        let Some(name) = name else {
            continue;
        };
        if !written.insert(name) {
            log::warn!("Ignoring duplicate {name} in archive");
            continue;
        }

        let target = dir.join(name);
        let tmp = temp_path_for(&target);
        let copied = File::create(&tmp)
            .and_then(|mut out| io::copy(&mut entry, &mut out).and_then(|_| out.flush()));
        if let Err(err) = copied {
            std::fs::remove_file(&tmp).ok();
            return Err(err).with_context(|| format!("Failed to write {}", target.display()));
        }
        std::fs::rename(&tmp, &target).with_context(|| {
            format!("Failed to move {} to {}", tmp.display(), target.display())
        })?;
        installed.push(name.to_string());
    }

    installed.sort();
    Ok(installed)
}

fn to_lower_hex(bytes: &[u8]) -> String {
    const LUT: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(LUT[(byte >> 4) as usize] as char);
        out.push(LUT[(byte & 0x0f) as usize] as char);
    }
    out
}

fn temp_path_for(path: &Path) -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    PathBuf::from(format!("{}.{}.download", path.display(), ts))
}
