use std::fs::File;
use std::path::Path;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info, warn};

use crate::domain::ReleaseVersion;
use crate::error::BiogridError;
use crate::fs_util::{extract_zip, first_entry_name};
use crate::store::Store;
use crate::table::InteractionTable;

const DOWNLOAD_BASE: &str = "https://downloads.thebiogrid.org/Download/BioGRID";

/// A loaded table together with the release it came from.
#[derive(Debug, Clone)]
pub struct LoadedRelease {
    pub table: InteractionTable,
    pub version: ReleaseVersion,
    /// URL or local path the table was read from.
    pub source: String,
}

pub trait BiogridClient: Send + Sync {
    /// Saves the coronavirus `tab3` archive of `version` (latest when `None`)
    /// to `destination`.
    fn download_archive(
        &self,
        version: Option<&ReleaseVersion>,
        destination: &Path,
    ) -> Result<(), BiogridError>;
}

pub fn archive_url(version: Option<&ReleaseVersion>) -> String {
    match version {
        Some(version) => format!(
            "{DOWNLOAD_BASE}/Release-Archive/BIOGRID-{version}/BIOGRID-CORONAVIRUS-{version}.tab3.zip"
        ),
        None => format!("{DOWNLOAD_BASE}/Latest-Release/BIOGRID-CORONAVIRUS-LATEST.tab3.zip"),
    }
}

#[derive(Clone)]
pub struct BiogridHttpClient {
    client: Client,
}

impl BiogridHttpClient {
    pub fn new() -> Result<Self, BiogridError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("biogrid-atomese/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| BiogridError::BiogridHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|err| BiogridError::BiogridHttp(err.to_string()))?;
        Ok(Self { client })
    }

    fn send_with_retries(&self, url: &str) -> Result<reqwest::blocking::Response, BiogridError> {
        const MAX_RETRIES: usize = 3;
        const BASE_DELAY_MS: u64 = 200;
        let mut attempt = 0usize;
        loop {
            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if attempt < MAX_RETRIES && is_retryable_status(status) {
                        warn!(status, attempt, "retrying BioGRID download");
                        thread::sleep(Duration::from_millis(BASE_DELAY_MS * (attempt as u64 + 1)));
                        attempt += 1;
                        continue;
                    }
                    return Ok(resp);
                }
                Err(err) => {
                    if attempt < MAX_RETRIES && is_retryable_error(&err) {
                        warn!(error = %err, attempt, "retrying BioGRID download");
                        thread::sleep(Duration::from_millis(BASE_DELAY_MS * (attempt as u64 + 1)));
                        attempt += 1;
                        continue;
                    }
                    return Err(BiogridError::BiogridHttp(err.to_string()));
                }
            }
        }
    }
}

impl BiogridClient for BiogridHttpClient {
    fn download_archive(
        &self,
        version: Option<&ReleaseVersion>,
        destination: &Path,
    ) -> Result<(), BiogridError> {
        let url = archive_url(version);
        info!(%url, "downloading BioGRID release");
        let mut response = self.send_with_retries(&url)?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "BioGRID request failed".to_string());
            return Err(BiogridError::BiogridStatus { status, message });
        }
        let mut file = File::create(destination)
            .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        std::io::copy(&mut response, &mut file)
            .map_err(|err| BiogridError::Filesystem(err.to_string()))?;
        Ok(())
    }
}

fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

fn is_retryable_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

/// Loads an already downloaded `tab3` text file. The release is taken from
/// the file name.
pub fn load_local(path: &Path) -> Result<LoadedRelease, BiogridError> {
    let source = path.display().to_string();
    let version = ReleaseVersion::from_file_name(&source)?;
    let table = InteractionTable::load(path)?;
    Ok(LoadedRelease {
        table,
        version,
        source,
    })
}

/// Downloads, unpacks and loads a release archive into the store's raw data
/// directory. The release is resolved from the archive's first entry, so a
/// latest-release download still reports its concrete version.
pub fn fetch_release<C: BiogridClient>(
    client: &C,
    store: &Store,
    version: Option<&ReleaseVersion>,
) -> Result<LoadedRelease, BiogridError> {
    store.ensure_raw_data_dir()?;
    let url = archive_url(version);
    let archive_name = url.rsplit('/').next().unwrap_or("BIOGRID-CORONAVIRUS.tab3.zip");
    let archive_path = store.raw_data_dir().join(archive_name);

    client.download_archive(version, archive_path.as_std_path())?;
    let entry = first_entry_name(archive_path.as_std_path())?;
    let resolved = ReleaseVersion::from_file_name(&entry)?;
    debug!(%entry, version = %resolved, "resolved release version");

    let extracted = extract_zip(archive_path.as_std_path(), store.raw_data_dir().as_std_path())?;
    let table_path = extracted
        .into_iter()
        .next()
        .ok_or_else(|| BiogridError::EmptyArchive(archive_path.clone().into_std_path_buf()))?;
    let table = InteractionTable::load(&table_path)?;
    Ok(LoadedRelease {
        table,
        version: resolved,
        source: url,
    })
}
