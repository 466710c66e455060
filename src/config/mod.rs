//! Selector settings: the study's constants, overridable through `selector.conf`.
//!
//! `SelectorConfig::default()` reproduces the constants the published sample
//! was drawn with. A config file only needs to name the values it changes.

use std::path::{Path, PathBuf};

mod parse;
mod paths;

pub use parse::parse_selector_config;
pub use paths::resolve_selector_config_path;

/// Seeds consumed one per non-empty category, in category order.
pub const DEFAULT_SEED_VALUES: [u64; 16] =
    [29, 147, 5, 86, 24, 61, 55, 44, 88, 32, 27, 1, 121, 14, 31, 17];

/// Apps that failed to install, launch or instrument during the study.
pub const DEFAULT_EXCLUDED_APPS: [&str; 14] = [
    "com.androidfromfrankfurt.workingtimealert",
    "click.dummer.yidkey",
    "org.retroshare.android.qml_app",
    "pl.net.szafraniec.NFCTagmaker",
    "com.diblui.fullcolemak",
    "de.cketti.dashclock.k9",
    "se.manyver",
    "de.devmil.muzei.bingimageofthedayartsource",
    "info.tangential.cone",
    "org.weilbach.splitbills",
    "io.lbry.browser",
    "org.bitbucket.watashi564.combapp",
    "org.dash.electrum.electrum_dash",
    "com.mmazzarolo.breathly",
];

/// Game engines such as Unity defeat the static analysis, so games are out.
pub const DEFAULT_EXCLUDED_CATEGORIES: [&str; 1] = ["Games"];

/// What: Exclusion rules applied by the filter pipeline.
///
/// Details:
/// - Age is compared in years of 365 days; the SDK range is inclusive on both ends.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterRules {
    /// Package identifiers excluded by hand.
    pub excluded_apps: Vec<String>,
    /// Categories whose members are excluded, and which are dropped from the category list.
    pub excluded_categories: Vec<String>,
    /// Maximum age since the last update, in years.
    pub max_app_age_years: f64,
    /// Lowest accepted min/target SDK version.
    pub min_sdk_version: u32,
    /// Highest accepted min/target SDK version.
    pub max_sdk_version: u32,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            excluded_apps: DEFAULT_EXCLUDED_APPS.iter().map(ToString::to_string).collect(),
            excluded_categories: DEFAULT_EXCLUDED_CATEGORIES
                .iter()
                .map(ToString::to_string)
                .collect(),
            max_app_age_years: 10.0,
            min_sdk_version: 16,
            max_sdk_version: 29,
        }
    }
}

impl FilterRules {
    /// Whether `category` is on the excluded-category list.
    #[must_use]
    pub fn is_excluded_category(&self, category: &str) -> bool {
        self.excluded_categories.iter().any(|c| c == category)
    }

    /// Whether `version` lies inside the accepted SDK range.
    #[must_use]
    pub const fn sdk_in_range(&self, version: u32) -> bool {
        self.min_sdk_version <= version && version <= self.max_sdk_version
    }
}

/// What: Everything the `select` subcommand needs to run.
///
/// Inputs:
/// - Built from defaults, then a config file, then CLI overrides.
///
/// Output:
/// - Consumed by `app::select::run`.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorConfig {
    /// F-Droid style index to read.
    pub index_file: PathBuf,
    /// Directory receiving the four JSON artifacts.
    pub output_dir: PathBuf,
    /// Directory receiving downloaded APKs.
    pub apk_dir: PathBuf,
    /// Whether sampled apps are downloaded.
    pub download: bool,
    /// Ordered seed list for the per-category sampler.
    pub seed_values: Vec<u64>,
    /// Draw attempts per category before it is reported as exhausted.
    pub max_draw_attempts: usize,
    /// Filter pipeline rules.
    pub rules: FilterRules,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            index_file: PathBuf::from("input/app_index.json"),
            output_dir: PathBuf::from("output"),
            apk_dir: PathBuf::from("apk"),
            download: true,
            seed_values: DEFAULT_SEED_VALUES.to_vec(),
            max_draw_attempts: 16,
            rules: FilterRules::default(),
        }
    }
}

impl SelectorConfig {
    /// What: Load the selector configuration.
    ///
    /// Inputs:
    /// - `explicit`: Path given on the command line, if any.
    ///
    /// Output:
    /// - Defaults overlaid with the first config file found.
    ///
    /// Details:
    /// - An explicit path that cannot be read is an error; a discovered path that
    ///   disappears is treated as absent.
    ///
    /// # Errors
    /// - Returns the I/O error for an unreadable explicit config file.
    pub fn load(explicit: Option<&Path>) -> crate::Result<Self> {
        let mut config = Self::default();
        if let Some(path) = explicit {
            let content = std::fs::read_to_string(path)?;
            parse_selector_config(&content, &mut config);
            tracing::info!(path = %path.display(), "loaded selector config");
        } else if let Some(path) = resolve_selector_config_path()
            && let Ok(content) = std::fs::read_to_string(&path)
        {
            parse_selector_config(&content, &mut config);
            tracing::info!(path = %path.display(), "loaded selector config");
        } else {
            tracing::debug!("no selector config found; using built-in defaults");
        }
        Ok(config)
    }
}
