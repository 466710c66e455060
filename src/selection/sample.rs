//! Deterministic one-app-per-category sampler.
//!
//! Every draw builds a fresh `StdRng` from a seed taken in order from the seed
//! list, so the result depends only on the input maps and the seeds. Output is
//! reproducible within this implementation; it is not meant to match the
//! generators of other languages.

use std::collections::HashSet;

use indexmap::IndexMap;
use rand::prelude::*;

use super::{CategoryPackages, PackageRecord};

/// What: Draw a 1-based position in `[1, population]` from `seed`.
///
/// Inputs:
/// - `seed`: Seed value for a freshly created generator.
/// - `population`: Number of candidates, at least 1.
///
/// Output:
/// - Uniform position in `1..=population`.
#[must_use]
pub fn draw_position(seed: u64, population: usize) -> usize {
    let mut rng = StdRng::seed_from_u64(seed);
    rng.random_range(1..=population.max(1))
}

/// Result of sampling one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryOutcome {
    /// A package was picked.
    Selected {
        /// Chosen package id.
        package: String,
        /// 1-based draw that produced it.
        position: usize,
        /// Number of candidates in the category.
        population: usize,
        /// Seed the draw used.
        seed: u64,
    },
    /// The category has no eligible packages; no seed was used.
    Empty,
    /// Every draw hit an already selected package.
    Exhausted {
        /// Seed that kept colliding.
        seed: u64,
        /// Draws attempted before giving up.
        attempts: usize,
    },
}

/// What: Sampling result across all categories.
///
/// Details:
/// - `selected` maps category to the chosen record, in category order.
/// - `outcomes` records what happened to every category, including skipped ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategorySelection {
    /// Category to chosen record.
    pub selected: IndexMap<String, PackageRecord>,
    /// Category to sampling outcome.
    pub outcomes: IndexMap<String, CategoryOutcome>,
}

/// What: Pick one unselected package per category.
///
/// Inputs:
/// - `category_packages`: Category to its eligible packages, both in fixed order.
/// - `seeds`: Ordered seed list; one seed is used per non-empty category.
/// - `max_attempts`: Draws per category before reporting it exhausted.
///
/// Output:
/// - `CategorySelection` with at most one package per category and no package
///   chosen twice.
///
/// Details:
/// - On a collision the same seed is used again. A redraw with the same seed
///   repeats the same position, so a colliding category exhausts its attempts
///   and is reported rather than looping forever; its seed still counts as used.
/// - Empty categories are logged and use no seed.
///
/// # Errors
/// - Returns an error when a non-empty category finds the seed list used up.
pub fn sample_per_category(
    category_packages: &CategoryPackages,
    seeds: &[u64],
    max_attempts: usize,
) -> crate::Result<CategorySelection> {
    let mut selection = CategorySelection::default();
    let mut chosen: HashSet<&str> = HashSet::new();
    let mut seed_cursor = seeds.iter().copied();

    for (category, packages) in category_packages {
        if packages.is_empty() {
            tracing::error!(category = %category, "No packages with category");
            selection
                .outcomes
                .insert(category.clone(), CategoryOutcome::Empty);
            continue;
        }

        let seed = seed_cursor.next().ok_or_else(|| {
            format!(
                "seed list exhausted at category '{category}' ({} seeds configured)",
                seeds.len()
            )
        })?;
        let population = packages.len();

        let mut attempts = 0;
        let mut pick = None;
        while attempts < max_attempts.max(1) {
            attempts += 1;
            let position = draw_position(seed, population);
            if let Some((package, record)) = packages.get_index(position - 1)
                && !chosen.contains(package.as_str())
            {
                pick = Some((package, record, position));
                break;
            }
        }

        let outcome = if let Some((package, record, position)) = pick {
            tracing::info!(
                category = %category,
                package = %package,
                "Selected '{}' app {} from {}.",
                record.name,
                position,
                population
            );
            chosen.insert(package.as_str());
            selection.selected.insert(category.clone(), record.clone());
            CategoryOutcome::Selected {
                package: package.clone(),
                position,
                population,
                seed,
            }
        } else {
            tracing::error!(
                category = %category,
                seed,
                attempts,
                "every draw hit an app already selected for an earlier category; skipping"
            );
            CategoryOutcome::Exhausted { seed, attempts }
        };
        selection.outcomes.insert(category.clone(), outcome);
    }

    Ok(selection)
}
