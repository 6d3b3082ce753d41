//! Profile overview card: headline counters plus language and hygiene
//! footnotes. 540x220.

use super::base::{base_svg, escape_xml, format_compact, Frame};
use crate::params::Theme;
use repocards_store::LanguageShare;
use std::fmt::Write;

pub struct ProfileCard<'a> {
    pub username: &'a str,
    pub repo_count: usize,
    pub stars: i64,
    pub forks: i64,
    pub top_languages: &'a [LanguageShare],
    pub archived_count: usize,
    pub forked_count: usize,
    pub maturity_score: u8,
    pub updated_at: &'a str,
    pub theme: Theme,
    pub accent: &'a str,
    pub bg: &'a str,
    pub border: bool,
}

const WIDTH: u32 = 540;
const HEIGHT: u32 = 220;

pub fn render_profile_card(card: &ProfileCard<'_>) -> String {
    let lang_display = if card.top_languages.is_empty() {
        "—".to_string()
    } else {
        card.top_languages
            .iter()
            .take(4)
            .map(|l| format!("{} ({}%)", l.name, (l.share * 100.0).round() as i64))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut body = String::new();
    let _ = write!(
        body,
        r#"  <text x="24" y="38" class="t fg" font-size="18" font-weight="700">{name} • Profile Overview</text>
  <text x="24" y="60" class="t muted" font-size="12">Last updated: {updated}</text>
  <g transform="translate(24, 80)">
"#,
        name = escape_xml(card.username),
        updated = escape_xml(card.updated_at),
    );

    let metrics = [
        (0, "Repos", card.repo_count.to_string()),
        (120, "Stars", format_compact(card.stars)),
        (240, "Forks", format_compact(card.forks)),
        (360, "Maturity", card.maturity_score.to_string()),
    ];
    for (x, label, value) in metrics {
        let _ = write!(
            body,
            r#"    <g transform="translate({x},0)">
      <text x="0" y="14" class="t muted" font-size="12">{label}</text>
      <text x="0" y="38" class="t fg" font-size="22" font-weight="800">{value}</text>
      <rect x="0" y="46" width="90" height="4" rx="2" fill="{accent}" opacity="0.25" />
    </g>
"#,
            x = x,
            label = label,
            value = escape_xml(&value),
            accent = card.accent,
        );
    }

    let _ = write!(
        body,
        r#"  </g>
  <g transform="translate(24, 150)">
    <text x="0" y="14" class="t muted" font-size="12">Archived: {archived} • Forked: {forked}</text>
    <text x="0" y="36" class="t muted" font-size="12">Languages: {langs}</text>
  </g>
"#,
        archived = card.archived_count,
        forked = card.forked_count,
        langs = escape_xml(&lang_display),
    );

    base_svg(
        &Frame {
            width: WIDTH,
            height: HEIGHT,
            title: &format!("{} Profile Overview", card.username),
            desc: &format!(
                "GitHub profile statistics for {} including repos, stars, forks, and maturity score.",
                card.username
            ),
            bg: card.bg,
            border: card.border,
            accent: card.accent,
            theme: card.theme,
        },
        &body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card<'a>(languages: &'a [LanguageShare]) -> ProfileCard<'a> {
        ProfileCard {
            username: "octocat",
            repo_count: 8,
            stars: 1234,
            forks: 56,
            top_languages: languages,
            archived_count: 1,
            forked_count: 2,
            maturity_score: 70,
            updated_at: "2026-08-25",
            theme: Theme::Light,
            accent: "#6366F1",
            bg: "#FFFFFF",
            border: true,
        }
    }

    #[test]
    fn renders_counters_and_languages() {
        let languages = vec![
            LanguageShare {
                name: "Rust".to_string(),
                share: 0.75,
            },
            LanguageShare {
                name: "Go".to_string(),
                share: 0.25,
            },
        ];
        let svg = render_profile_card(&card(&languages));
        assert!(svg.contains("octocat • Profile Overview"));
        assert!(svg.contains("1.2K"));
        assert!(svg.contains("Rust (75%)"));
        assert!(svg.contains(r#"width="540" height="220""#));
    }

    #[test]
    fn no_languages_renders_a_dash() {
        let svg = render_profile_card(&card(&[]));
        assert!(svg.contains("Languages: —"));
    }

    #[test]
    fn is_deterministic() {
        let svg_a = render_profile_card(&card(&[]));
        let svg_b = render_profile_card(&card(&[]));
        assert_eq!(svg_a, svg_b);
    }
}
