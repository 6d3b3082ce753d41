//! Maturity card: 0-100 score ring with docs / maintenance / hygiene
//! subscore meters. 640x220.

use super::base::{base_svg, escape_xml, Frame, Palette};
use super::charts::{ring_gauge, score_bar};
use crate::params::{Details, Theme};
use repocards_store::MaturitySubscores;
use std::fmt::Write;

pub struct MaturityCard<'a> {
    pub username: &'a str,
    pub score: u8,
    pub subscores: MaturitySubscores,
    pub updated_at: &'a str,
    pub theme: Theme,
    pub accent: &'a str,
    pub bg: &'a str,
    pub border: bool,
    pub details: Details,
}

const WIDTH: u32 = 640;
const HEIGHT: u32 = 220;

fn verdict(score: u8) -> (&'static str, &'static str) {
    if score >= 70 {
        ("Production-ready", "#22C55E")
    } else if score >= 40 {
        ("Developing", "#F59E0B")
    } else {
        ("Early-stage", "#EF4444")
    }
}

pub fn render_maturity_card(card: &MaturityCard<'_>) -> String {
    let palette = Palette::for_theme(card.theme);
    let (verdict_label, verdict_color) = verdict(card.score);

    let mut body = String::new();
    let _ = write!(
        body,
        r##"  <defs>
    <linearGradient id="heroGrad" x1="0" y1="0" x2="1" y2="0">
      <stop offset="0%" stop-color="{accent}" stop-opacity="0.9"/>
      <stop offset="100%" stop-color="{accent}" stop-opacity="0.4"/>
    </linearGradient>
  </defs>
  <rect x="0" y="0" width="{w}" height="64" rx="16" fill="url(#heroGrad)"/>
  <text x="24" y="40" class="t" font-size="20" font-weight="900" fill="#ffffff">{name} • Engineering Maturity</text>
  <text x="24" y="58" class="t" font-size="12" fill="rgba(255,255,255,0.85)">Updated {updated}</text>
"##,
        accent = card.accent,
        w = WIDTH,
        name = escape_xml(card.username),
        updated = escape_xml(card.updated_at),
    );

    // Score ring.
    body.push_str(&ring_gauge(
        120.0,
        140.0,
        44.0,
        f64::from(card.score) / 100.0,
        palette.soft,
        verdict_color,
        10.0,
    ));
    let _ = write!(
        body,
        r#"  <g transform="translate(120, 140)">
    <text y="-2" text-anchor="middle" class="t fg" font-size="26" font-weight="900">{score}</text>
    <text y="18" text-anchor="middle" class="t muted" font-size="11">/ 100</text>
    <text y="64" text-anchor="middle" class="t" font-size="12" font-weight="700" fill="{color}">{label}</text>
  </g>
"#,
        score = card.score,
        color = verdict_color,
        label = verdict_label,
    );

    // Subscore meters.
    let rows = [
        ("Docs", card.subscores.docs),
        ("Maintenance", card.subscores.maintenance),
        ("Repo hygiene", card.subscores.repo_hygiene),
    ];
    let _ = write!(body, r#"  <g transform="translate(260, 96)">
"#);
    for (i, (label, value)) in rows.iter().enumerate() {
        let y = i as f64 * 36.0;
        let _ = write!(
            body,
            r#"    <text x="0" y="{ty}" class="t muted" font-size="12">{label}</text>
"#,
            ty = y + 10.0,
            label = label,
        );
        body.push_str(&score_bar(
            110.0,
            y + 4.0,
            220.0,
            *value,
            palette.soft,
            card.accent,
        ));
        if card.details == Details::High {
            let _ = write!(
                body,
                r#"    <text x="344" y="{ty}" class="t fg" font-size="12" font-weight="700">{value}</text>
"#,
                ty = y + 10.0,
                value = value,
            );
        }
    }
    body.push_str("  </g>\n");

    let _ = write!(
        body,
        r#"  <text x="24" y="{fy}" class="t muted" font-size="10" opacity="0.6">Based on repo docs, maintenance cadence, and hygiene</text>
"#,
        fy = HEIGHT - 12,
    );

    base_svg(
        &Frame {
            width: WIDTH,
            height: HEIGHT,
            title: &format!("{} Engineering Maturity", card.username),
            desc: &format!("Engineering maturity assessment for {}.", card.username),
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

    fn card(score: u8, details: Details) -> MaturityCard<'static> {
        MaturityCard {
            username: "octocat",
            score,
            subscores: MaturitySubscores {
                docs: 40,
                maintenance: 80,
                repo_hygiene: 60,
            },
            updated_at: "2026-08-25",
            theme: Theme::Light,
            accent: "#22C55E",
            bg: "#FFFFFF",
            border: true,
            details,
        }
    }

    #[test]
    fn verdict_tracks_the_score() {
        assert!(render_maturity_card(&card(85, Details::Low)).contains("Production-ready"));
        assert!(render_maturity_card(&card(55, Details::Low)).contains("Developing"));
        assert!(render_maturity_card(&card(10, Details::Low)).contains("Early-stage"));
    }

    #[test]
    fn high_details_prints_subscore_numbers() {
        let low = render_maturity_card(&card(60, Details::Low));
        let high = render_maturity_card(&card(60, Details::High));
        assert!(!low.contains(">80</text>"));
        assert!(high.contains(">80</text>"));
    }

    #[test]
    fn keeps_fixed_dimensions() {
        let svg = render_maturity_card(&card(60, Details::Low));
        assert!(svg.contains(r#"width="640" height="220""#));
    }

    #[test]
    fn hero_banner_carries_the_gradient_and_title() {
        let svg = render_maturity_card(&card(60, Details::Low));
        assert!(svg.contains(r##"fill="url(#heroGrad)""##));
        assert!(svg.contains(r##"fill="#ffffff">octocat • Engineering Maturity"##));
    }
}
