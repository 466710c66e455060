//! APK download with an explicit "already downloaded" check.
//!
//! Files are named after the app so a sample can be inspected by hand:
//! `<TitleCasedName>_<versionCode>.apk`. A file with that name counts as the
//! finished download; nothing else is verified.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use crate::selection::PackageRecord;
use crate::util::title_case;

/// Shared HTTP client. Downloads run one after another, so one connection pool is enough.
static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .user_agent(concat!("droid-study/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

/// What happened when a record was requested from the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file already existed and was left untouched.
    AlreadyPresent(PathBuf),
    /// The file was fetched and written.
    Downloaded(PathBuf),
}

impl DownloadOutcome {
    /// Location of the APK on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::AlreadyPresent(p) | Self::Downloaded(p) => p,
        }
    }
}

/// What: Directory of downloaded APKs.
///
/// Details:
/// - `contains` is the idempotency check: `fetch` never re-downloads a file it reports.
#[derive(Clone, Debug)]
pub struct ApkStore {
    /// Directory the APKs live in.
    dir: PathBuf,
}

impl ApkStore {
    /// Create a store rooted at `dir`; the directory is created on first download.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// What: File name for a record.
    ///
    /// Inputs:
    /// - `record`: Selected package.
    ///
    /// Output:
    /// - Title-cased display name with spaces replaced by `_`, then `_<versionCode>.apk`.
    #[must_use]
    pub fn file_name(record: &PackageRecord) -> String {
        format!(
            "{}_{}.apk",
            title_case(&record.name).replace(' ', "_"),
            record.version_code
        )
    }

    /// Path the APK for `record` is stored at.
    #[must_use]
    pub fn path_for(&self, record: &PackageRecord) -> PathBuf {
        self.dir.join(Self::file_name(record))
    }

    /// Whether the APK for `record` is already on disk.
    #[must_use]
    pub fn contains(&self, record: &PackageRecord) -> bool {
        self.path_for(record).is_file()
    }

    /// What: Make sure the APK for `record` is on disk.
    ///
    /// Inputs:
    /// - `record`: Selected package with its download URL.
    ///
    /// Output:
    /// - `AlreadyPresent` when [`ApkStore::contains`] holds, otherwise `Downloaded`.
    ///
    /// Details:
    /// - The body is buffered and written in one go; an interrupted run leaves no
    ///   file or a partial one, which a later run treats as present.
    /// - No retries; the caller decides whether a failure ends the run.
    ///
    /// # Errors
    /// - Network failures, non-success HTTP status and I/O errors.
    pub async fn fetch(&self, record: &PackageRecord) -> crate::Result<DownloadOutcome> {
        let path = self.path_for(record);
        if self.contains(record) {
            tracing::info!(file = %path.display(), "Download already exists.");
            return Ok(DownloadOutcome::AlreadyPresent(path));
        }

        tracing::info!(url = %record.url, file = %path.display(), "Downloading APK");
        std::fs::create_dir_all(&self.dir)?;
        let response = HTTP_CLIENT.get(&record.url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        std::fs::write(&path, &body)?;
        tracing::info!(file = %path.display(), bytes = body.len(), "Download done");
        Ok(DownloadOutcome::Downloaded(path))
    }
}
