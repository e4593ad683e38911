use std::{fs, path::PathBuf};
use anyhow::Context;
use ucdgen_logging::{log_info, log_verbose, LogCategory};

pub const LOG_CAT : LogCategory = LogCategory::new_with_sub("Main", "Source");

pub const DEFAULT_SOURCE_URL: &str = "https://www.unicode.org/Public/UCD/latest/ucd/UnicodeData.txt";

/// Where the source table comes from
#[derive(Clone, Debug)]
pub struct SourceSettings {
    /// Local copy, preferred when it exists
    pub path:         PathBuf,
    /// Fallback when there is no local copy
    pub url:          String,
    /// Write a fetched table to `path`
    pub save_fetched: bool,
}

/// Get the text of the source table, from the local copy if there is one, otherwise from the network
pub fn load(settings: &SourceSettings) -> anyhow::Result<String> {
    if settings.path.is_file() {
        log_verbose!(LOG_CAT, "reading local copy '{}'", settings.path.display());
        return fs::read_to_string(&settings.path)
            .with_context(|| format!("failed to read '{}'", settings.path.display()));
    }

    log_info!(LOG_CAT, "no local copy at '{}', fetching '{}'", settings.path.display(), settings.url);
    let text = fetch(&settings.url)?;

    if settings.save_fetched {
        fs::write(&settings.path, &text)
            .with_context(|| format!("failed to store the fetched table at '{}'", settings.path.display()))?;
        log_verbose!(LOG_CAT, "stored fetched table at '{}'", settings.path.display());
    }
    Ok(text)
}

fn fetch(url: &str) -> anyhow::Result<String> {
    // Only the given url is contacted, proxy environment variables are ignored
    let client = reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .context("failed to create the http client")?;

    let response = client.get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .with_context(|| format!("failed to fetch '{url}'"))?;
    let bytes = response.bytes().with_context(|| format!("failed to read the response of '{url}'"))?;
    decode_utf8(bytes.to_vec(), url)
}

/// Strict utf-8, the same as reading the local copy, whatever charset the server claims
fn decode_utf8(bytes: Vec<u8>, origin: &str) -> anyhow::Result<String> {
    String::from_utf8(bytes).with_context(|| format!("'{origin}' is not valid utf-8"))
}
