//! Collection-wide sums and language shares for the classic board.

use repocards_store::{AggregateReport, LanguageShare, RepoRecord};
use std::collections::HashMap;

/// Language list is truncated to the biggest shares.
const TOP_LANGUAGES: usize = 6;

pub fn compute_aggregates(repos: &[RepoRecord]) -> AggregateReport {
    let stars_total = repos.iter().map(|r| r.stargazers_count).sum();
    let forks_total = repos.iter().map(|r| r.forks_count).sum();
    let archived_count = repos.iter().filter(|r| r.is_archived).count();
    let forked_count = repos.iter().filter(|r| r.is_fork).count();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        *counts.entry(language).or_insert(0) += 1;
    }

    // Shares are fractions of the language-tagged subset, not of all repos.
    let tagged_total = counts.values().sum::<usize>().max(1) as f64;
    let mut languages: Vec<LanguageShare> = counts
        .into_iter()
        .map(|(name, count)| LanguageShare {
            name: name.to_string(),
            share: count as f64 / tagged_total,
        })
        .collect();
    languages.sort_by(|a, b| {
        b.share
            .partial_cmp(&a.share)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    languages.truncate(TOP_LANGUAGES);

    AggregateReport {
        stars_total,
        forks_total,
        archived_count,
        forked_count,
        languages,
    }
}
