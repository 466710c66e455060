//! `select`: filter the index, sample one app per category, download the sample.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::args::{FormatIndexArgs, SelectArgs};
use crate::config::SelectorConfig;
use crate::download::{ApkStore, DownloadOutcome};
use crate::index::{format_index_file, load_index};
use crate::selection::{
    CATEGORIES_FILE, CATEGORY_PACKAGES_FILE, CategorySelection, FilterCounts, PACKAGES_FILE,
    SELECTION_FILE, group_by_category, list_filtered_packages, sample_per_category,
};
use crate::util::write_json_file;

/// What happened during one selection pass.
#[derive(Clone, Debug)]
pub struct SelectionReport {
    /// Packages listed in the index.
    pub indexed: usize,
    /// Exclusion tally.
    pub counts: FilterCounts,
    /// Packages left after filtering.
    pub remaining: usize,
    /// Sampler result.
    pub selection: CategorySelection,
}

/// Overlay command-line flags on the loaded configuration.
fn apply_overrides(config: &mut SelectorConfig, opts: &SelectArgs) {
    if let Some(index) = &opts.index {
        config.index_file.clone_from(index);
    }
    if let Some(dir) = &opts.output_dir {
        config.output_dir.clone_from(dir);
    }
    if let Some(dir) = &opts.apk_dir {
        config.apk_dir.clone_from(dir);
    }
    if opts.no_download {
        config.download = false;
    }
}

/// What: Filter, group and sample, writing the four JSON artifacts.
///
/// Inputs:
/// - `config`: Effective selector configuration.
/// - `now`: Reference time for the age rule.
///
/// Output:
/// - Counts and the sampled apps; nothing is downloaded here.
///
/// Details:
/// - Writes `categories.json`, `packages.json`, `category_packages.json` and
///   `random_app_per_category.json` into `config.output_dir`, in that order.
///
/// # Errors
/// - Index read/parse errors, JSON write errors, seed exhaustion.
pub fn select_apps(config: &SelectorConfig, now: DateTime<Utc>) -> crate::Result<SelectionReport> {
    let index = load_index(&config.index_file)?;
    let out = config.output_dir.as_path();

    let categories = index.categories_excluding(|c| config.rules.is_excluded_category(c));
    write_json_file(&out.join(CATEGORIES_FILE), &categories)?;
    tracing::info!("Index contains {} packages.", index.packages.len());

    let (packages, counts) = list_filtered_packages(&index, &config.rules, now);
    write_json_file(&out.join(PACKAGES_FILE), &packages)?;
    tracing::info!("Filtered {} packages manually.", counts.manual);
    tracing::info!("Filtered {} packages with category filter.", counts.category);
    tracing::info!("Filtered {} packages above max age.", counts.age);
    tracing::info!("Filtered {} packages with unsuitable SDK version.", counts.sdk);
    tracing::info!("{} packages remain after filtering.", packages.len());

    let grouped = group_by_category(&categories, &packages);
    write_json_file(&out.join(CATEGORY_PACKAGES_FILE), &grouped)?;

    let selection = sample_per_category(&grouped, &config.seed_values, config.max_draw_attempts)?;
    write_json_file(&out.join(SELECTION_FILE), &selection.selected)?;
    tracing::info!(
        selected = selection.selected.len(),
        categories = grouped.len(),
        "selection written"
    );

    Ok(SelectionReport {
        indexed: index.packages.len(),
        counts,
        remaining: packages.len(),
        selection,
    })
}

/// What: Download every sampled APK into `apk_dir`.
///
/// Inputs:
/// - `apk_dir`: Target directory.
/// - `selection`: Sampler result.
///
/// Output:
/// - Number of files actually fetched (already present files are skipped).
///
/// # Errors
/// - The first failed download; files fetched before it stay on disk.
pub async fn download_selection(apk_dir: &Path, selection: &CategorySelection) -> crate::Result<usize> {
    let store = ApkStore::new(apk_dir);
    let mut fetched = 0;
    for record in selection.selected.values() {
        if let DownloadOutcome::Downloaded(path) = store.fetch(record).await? {
            tracing::debug!(path = %path.display(), "stored apk");
            fetched += 1;
        }
    }
    Ok(fetched)
}

/// What: Entry point of the `select` subcommand.
///
/// Inputs:
/// - `opts`: Subcommand flags.
///
/// Output:
/// - The selection report.
///
/// # Errors
/// - Config, index, output, sampling and download errors.
pub async fn run(opts: &SelectArgs) -> crate::Result<SelectionReport> {
    let mut config = SelectorConfig::load(opts.config.as_deref())?;
    apply_overrides(&mut config, opts);
    tracing::debug!(
        index = %config.index_file.display(),
        output = %config.output_dir.display(),
        "selector configured"
    );

    let report = select_apps(&config, Utc::now())?;
    if config.download {
        let fetched = download_selection(&config.apk_dir, &report.selection).await?;
        tracing::info!(fetched, dir = %config.apk_dir.display(), "downloads finished");
    } else {
        tracing::info!("downloads disabled");
    }
    Ok(report)
}

/// What: Entry point of the `format-index` subcommand.
///
/// Inputs:
/// - `opts`: Subcommand flags.
///
/// Output:
/// - The index file rewritten with four-space indentation.
///
/// # Errors
/// - Config, read, parse or write errors.
pub fn format_index(opts: &FormatIndexArgs) -> crate::Result<()> {
    let config = SelectorConfig::load(opts.config.as_deref())?;
    let path = opts.index.as_deref().unwrap_or(&config.index_file);
    format_index_file(path)?;
    tracing::info!(file = %path.display(), "index formatted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    /// What: Command-line flags override config values.
    ///
    /// Inputs:
    /// - Default config and flags for every override.
    ///
    /// Output:
    /// - Paths replaced and downloads disabled; unset flags leave values alone.
    fn select_overrides_apply() {
        let mut config = SelectorConfig::default();
        let opts = SelectArgs {
            config: None,
            index: Some(PathBuf::from("idx.json")),
            output_dir: None,
            apk_dir: Some(PathBuf::from("apks")),
            no_download: true,
        };
        apply_overrides(&mut config, &opts);
        assert_eq!(config.index_file, PathBuf::from("idx.json"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.apk_dir, PathBuf::from("apks"));
        assert!(!config.download);
    }

    #[test]
    /// What: A missing index file fails before anything is written.
    ///
    /// Inputs:
    /// - Config pointing at a non-existent index inside a temp directory.
    ///
    /// Output:
    /// - Error; the output directory is not created.
    fn select_missing_index_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = SelectorConfig {
            index_file: dir.path().join("missing.json"),
            output_dir: dir.path().join("out"),
            ..SelectorConfig::default()
        };
        assert!(select_apps(&config, Utc::now()).is_err());
        assert!(!dir.path().join("out").exists());
    }
}
