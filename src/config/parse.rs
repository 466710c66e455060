use std::path::PathBuf;

use super::SelectorConfig;
use crate::util::config::{parse_bool, parse_key_value, parse_list, skip_comment_or_empty};

/// What: Apply `selector.conf` content onto an existing configuration.
///
/// Inputs:
/// - `content`: Text of the config file.
/// - `config`: Configuration to update in place.
///
/// Output:
/// - None (modifies `config` in-place).
///
/// Details:
/// - Values that fail to parse are logged and leave the previous value untouched.
/// - List settings replace the default list rather than extending it.
/// - Unknown keys are logged at debug level and ignored.
pub fn parse_selector_config(content: &str, config: &mut SelectorConfig) {
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        match key.as_str() {
            "index_file" | "app_index" => config.index_file = PathBuf::from(&val),
            "output_dir" | "output_directory" => config.output_dir = PathBuf::from(&val),
            "apk_dir" | "apk_directory" => config.apk_dir = PathBuf::from(&val),
            "download" | "download_apks" => match parse_bool(&val) {
                Some(b) => config.download = b,
                None => invalid(&key, &val),
            },
            "seed_values" | "seeds" => {
                let parsed: Result<Vec<u64>, _> =
                    parse_list(&val).iter().map(|s| s.parse::<u64>()).collect();
                match parsed {
                    Ok(seeds) if !seeds.is_empty() => config.seed_values = seeds,
                    _ => invalid(&key, &val),
                }
            }
            "max_draw_attempts" => match val.parse::<usize>() {
                Ok(n) if n > 0 => config.max_draw_attempts = n,
                _ => invalid(&key, &val),
            },
            "max_app_age" | "max_app_age_years" => match val.parse::<f64>() {
                Ok(years) if years.is_finite() && years >= 0.0 => {
                    config.rules.max_app_age_years = years;
                }
                _ => invalid(&key, &val),
            },
            "min_sdk_version" => match val.parse::<u32>() {
                Ok(v) => config.rules.min_sdk_version = v,
                Err(_) => invalid(&key, &val),
            },
            "max_sdk_version" => match val.parse::<u32>() {
                Ok(v) => config.rules.max_sdk_version = v,
                Err(_) => invalid(&key, &val),
            },
            "excluded_categories" | "filtered_categories" => {
                config.rules.excluded_categories = parse_list(&val);
            }
            "excluded_apps" | "filtered_apps" => {
                config.rules.excluded_apps = parse_list(&val);
            }
            _ => tracing::debug!(key = %key, "ignoring unknown selector setting"),
        }
    }
    if config.rules.min_sdk_version > config.rules.max_sdk_version {
        tracing::warn!(
            min = config.rules.min_sdk_version,
            max = config.rules.max_sdk_version,
            "SDK range is empty; every package will fail the SDK filter"
        );
    }
}

/// Log a setting whose value could not be used.
fn invalid(key: &str, val: &str) {
    tracing::warn!(key = %key, value = %val, "invalid selector setting; keeping previous value");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SEED_VALUES;

    #[test]
    /// What: Every supported key overrides its default.
    ///
    /// Inputs:
    /// - Config text touching paths, seeds, rules and download flag, with comments.
    ///
    /// Output:
    /// - All fields updated; lists replaced, not extended.
    fn parse_selector_config_applies_all_keys() {
        let text = "\
# sample of 2024
index_file = data/index-v1.json
output-dir = out
apk_dir = apks // downloads
download = no
seeds = 7, 8, 9
max_draw_attempts = 3
max_app_age_years = 5.5
min_sdk_version = 21
max_sdk_version = 34
excluded_categories = Games, Money
filtered_apps = org.example.one
";
        let mut cfg = SelectorConfig::default();
        parse_selector_config(text, &mut cfg);
        assert_eq!(cfg.index_file, PathBuf::from("data/index-v1.json"));
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.apk_dir, PathBuf::from("apks"));
        assert!(!cfg.download);
        assert_eq!(cfg.seed_values, vec![7, 8, 9]);
        assert_eq!(cfg.max_draw_attempts, 3);
        assert!((cfg.rules.max_app_age_years - 5.5).abs() < f64::EPSILON);
        assert_eq!(cfg.rules.min_sdk_version, 21);
        assert_eq!(cfg.rules.max_sdk_version, 34);
        assert_eq!(cfg.rules.excluded_categories, vec!["Games", "Money"]);
        assert_eq!(cfg.rules.excluded_apps, vec!["org.example.one"]);
    }

    #[test]
    /// What: Invalid values leave defaults untouched.
    ///
    /// Inputs:
    /// - Non-numeric seeds, zero attempts, negative age and an unknown key.
    ///
    /// Output:
    /// - Configuration equal to the defaults.
    fn parse_selector_config_ignores_invalid_values() {
        let text = "seeds = 1, two\nmax_draw_attempts = 0\nmax_app_age = -1\nflavour = mint\n";
        let mut cfg = SelectorConfig::default();
        parse_selector_config(text, &mut cfg);
        assert_eq!(cfg.seed_values, DEFAULT_SEED_VALUES.to_vec());
        assert_eq!(cfg, SelectorConfig::default());
    }
}
