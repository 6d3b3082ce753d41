//! Classic stats board: KPI row, language donut, push-recency histogram.
//! 720x240.

use super::base::{base_svg, escape_xml, format_compact, Frame, Palette};
use super::charts::{bars, donut_segments};
use crate::params::Theme;
use repocards_store::{LanguageShare, RepoRecord};
use std::fmt::Write;

pub struct ClassicBoard<'a> {
    pub username: &'a str,
    pub repo_count: usize,
    pub stars: i64,
    pub forks: i64,
    pub maturity_score: u8,
    pub top_languages: &'a [LanguageShare],
    pub activity: [usize; 6],
    pub updated_at: &'a str,
    pub theme: Theme,
    pub accent: &'a str,
    pub bg: &'a str,
    pub border: bool,
}

const WIDTH: u32 = 720;
const HEIGHT: u32 = 240;

const KPI_REPOS: &str = "#6366F1";
const KPI_STARS: &str = "#F59E0B";
const KPI_FORKS: &str = "#22D3EE";
const KPI_MATURITY: &str = "#22C55E";

const LANG_COLORS: [&str; 6] = [
    "#6366F1", "#F59E0B", "#22D3EE", "#22C55E", "#EF4444", "#A855F7",
];

const ACTIVITY_LABELS: [&str; 6] = ["1w", "1m", "3m", "6m", "1y", "1y+"];

/// Buckets repos by days since last push: within a week, a month, a
/// quarter, half a year, a year, and older.
pub fn activity_bins(repos: &[RepoRecord]) -> [usize; 6] {
    let mut bins = [0usize; 6];
    for repo in repos {
        let d = repo.activity.days_since_push;
        let idx = if d <= 7 {
            0
        } else if d <= 30 {
            1
        } else if d <= 90 {
            2
        } else if d <= 180 {
            3
        } else if d <= 365 {
            4
        } else {
            5
        };
        bins[idx] += 1;
    }
    bins
}

pub fn render_classic_board(board: &ClassicBoard<'_>) -> String {
    let palette = Palette::for_theme(board.theme);

    let mut body = String::new();
    let _ = write!(
        body,
        r#"  <text x="24" y="40" class="t fg" font-size="20" font-weight="800">{name} • Classic Board</text>
  <text x="24" y="60" class="t muted" font-size="12">Updated {updated}</text>
"#,
        name = escape_xml(board.username),
        updated = escape_xml(board.updated_at),
    );

    // KPI row.
    let kpis = [
        (0, "Repos", board.repo_count.to_string(), KPI_REPOS),
        (110, "Stars", format_compact(board.stars), KPI_STARS),
        (220, "Forks", format_compact(board.forks), KPI_FORKS),
        (330, "Maturity", board.maturity_score.to_string(), KPI_MATURITY),
    ];
    body.push_str("  <g transform=\"translate(24, 84)\">\n");
    for (x, label, value, color) in kpis {
        let _ = write!(
            body,
            r#"    <g transform="translate({x},0)">
      <rect x="0" y="0" width="96" height="62" rx="10" fill="{soft}" />
      <rect x="0" y="0" width="4" height="62" rx="2" fill="{color}" />
      <text x="14" y="22" class="t muted" font-size="11">{label}</text>
      <text x="14" y="48" class="t fg" font-size="20" font-weight="800">{value}</text>
    </g>
"#,
            x = x,
            soft = palette.soft,
            color = color,
            label = label,
            value = escape_xml(&value),
        );
    }
    body.push_str("  </g>\n");

    // Language donut with legend.
    let segments: Vec<(f64, &str)> = board
        .top_languages
        .iter()
        .zip(LANG_COLORS.iter())
        .map(|(l, c)| (l.share, *c))
        .collect();
    body.push_str(&donut_segments(524.0, 92.0, 36.0, 12.0, palette.soft, &segments));
    let _ = write!(
        body,
        r#"  <text x="584" y="48" class="t muted" font-size="11">Languages</text>
"#,
    );
    if board.top_languages.is_empty() {
        let _ = write!(
            body,
            r#"  <text x="584" y="68" class="t muted" font-size="11">—</text>
"#,
        );
    }
    for (i, (lang, color)) in board
        .top_languages
        .iter()
        .zip(LANG_COLORS.iter())
        .enumerate()
    {
        let y = 62.0 + i as f64 * 16.0;
        let _ = write!(
            body,
            r#"  <rect x="584" y="{ry}" width="8" height="8" rx="2" fill="{color}" />
  <text x="598" y="{ty}" class="t muted" font-size="11">{name} {pct}%</text>
"#,
            ry = y - 8.0,
            color = color,
            ty = y,
            name = escape_xml(&lang.name),
            pct = (lang.share * 100.0).round() as i64,
        );
    }

    // Push-recency histogram.
    let _ = write!(
        body,
        r#"  <text x="24" y="178" class="t muted" font-size="11">Last push</text>
"#,
    );
    body.push_str(&bars(
        24.0,
        186.0,
        430.0,
        36.0,
        &board.activity,
        board.accent,
    ));
    let step = (430.0 - 2.0 * 5.0) / 6.0 + 2.0;
    for (i, label) in ACTIVITY_LABELS.iter().enumerate() {
        let _ = write!(
            body,
            r#"  <text x="{lx}" y="234" text-anchor="middle" class="t muted" font-size="10">{label}</text>
"#,
            lx = 24.0 + i as f64 * step + step / 2.0 - 1.0,
            label = label,
        );
    }

    base_svg(
        &Frame {
            width: WIDTH,
            height: HEIGHT,
            title: &format!("{} Classic Board", board.username),
            desc: &format!(
                "GitHub statistics board for {} with repos, stars, forks, maturity, languages, and push recency.",
                board.username
            ),
            bg: board.bg,
            border: board.border,
            accent: board.accent,
            theme: board.theme,
        },
        &body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use repocards_store::RepoActivity;

    fn repo(days_since_push: i64) -> RepoRecord {
        let t = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        RepoRecord {
            id: 1,
            name: "r".to_string(),
            full_name: "u/r".to_string(),
            html_url: "https://github.com/u/r".to_string(),
            description: None,
            is_fork: false,
            is_archived: false,
            is_template: false,
            created_at: t,
            updated_at: t,
            pushed_at: t,
            language: None,
            topics: Vec::new(),
            stargazers_count: 0,
            forks_count: 0,
            open_issues_count: 0,
            size_kb: 0,
            default_branch: "main".to_string(),
            has_wiki: false,
            has_pages: false,
            activity: RepoActivity {
                days_since_push,
                age_days: 100,
            },
        }
    }

    fn board<'a>(languages: &'a [LanguageShare]) -> ClassicBoard<'a> {
        ClassicBoard {
            username: "octocat",
            repo_count: 12,
            stars: 3456,
            forks: 78,
            maturity_score: 64,
            top_languages: languages,
            activity: [3, 2, 4, 1, 1, 1],
            updated_at: "2026-08-25",
            theme: Theme::Light,
            accent: "#22C55E",
            bg: "#FFFFFF",
            border: true,
        }
    }

    #[test]
    fn bins_land_on_bucket_boundaries() {
        let repos: Vec<RepoRecord> =
            [0, 7, 8, 30, 31, 90, 91, 180, 181, 365, 366, 900]
                .into_iter()
                .map(repo)
                .collect();
        assert_eq!(activity_bins(&repos), [2, 2, 2, 2, 2, 2]);
    }

    #[test]
    fn empty_collection_yields_empty_bins() {
        assert_eq!(activity_bins(&[]), [0; 6]);
    }

    #[test]
    fn renders_kpis_and_legend() {
        let languages = vec![
            LanguageShare {
                name: "Rust".to_string(),
                share: 0.6,
            },
            LanguageShare {
                name: "Go".to_string(),
                share: 0.4,
            },
        ];
        let svg = render_classic_board(&board(&languages));
        assert!(svg.contains("octocat • Classic Board"));
        assert!(svg.contains("3.5K"));
        assert!(svg.contains("Rust 60%"));
        assert!(svg.contains(r#"width="720" height="240""#));
    }

    #[test]
    fn no_languages_shows_a_dash() {
        let svg = render_classic_board(&board(&[]));
        assert!(svg.contains(">—</text>"));
    }
}
