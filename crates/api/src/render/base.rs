//! Shared card chrome: outer frame, font stack, theme palette.

use crate::params::Theme;
use std::fmt::Write;

pub struct Palette {
    pub fg: &'static str,
    pub muted: &'static str,
    pub soft: &'static str,
    pub border: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Palette {
                fg: "#E5E7EB",
                muted: "#9CA3AF",
                soft: "rgba(255,255,255,0.08)",
                border: "#374151",
            },
            Theme::Light => Palette {
                fg: "#0F172A",
                muted: "#64748B",
                soft: "rgba(2,6,23,0.06)",
                border: "#E5E7EB",
            },
        }
    }
}

pub struct Frame<'a> {
    pub width: u32,
    pub height: u32,
    pub title: &'a str,
    pub desc: &'a str,
    pub bg: &'a str,
    pub border: bool,
    pub accent: &'a str,
    pub theme: Theme,
}

pub fn base_svg(frame: &Frame<'_>, body: &str) -> String {
    let palette = Palette::for_theme(frame.theme);
    let mut svg = String::with_capacity(body.len() + 1024);

    let _ = write!(
        svg,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" role="img" aria-label="{title}" viewBox="0 0 {w} {h}">
  <title>{title}</title>
  <desc>{desc}</desc>
  <defs>
    <style>
      .t {{ font-family: ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Arial; }}
      .fg {{ fill: {fg}; }}
      .muted {{ fill: {muted}; }}
      .accent {{ fill: {accent}; }}
    </style>
  </defs>
  <rect x="0" y="0" width="{w}" height="{h}" rx="16" fill="{bg}" />
"#,
        w = frame.width,
        h = frame.height,
        title = escape_xml(frame.title),
        desc = escape_xml(frame.desc),
        fg = palette.fg,
        muted = palette.muted,
        accent = frame.accent,
        bg = frame.bg,
    );

    if frame.border {
        let _ = write!(
            svg,
            r#"  <rect x="0.5" y="0.5" width="{}" height="{}" rx="16" fill="none" stroke="{}" />
"#,
            frame.width - 1,
            frame.height - 1,
            palette.border,
        );
    }

    svg.push_str(body);
    svg.push_str("</svg>");
    svg
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn format_compact(n: i64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
