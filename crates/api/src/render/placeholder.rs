//! Dimensionally stable placeholder cards.
//!
//! Served on every non-success path so an embedded image never breaks or
//! changes size while a snapshot is being generated.

use super::base::escape_xml;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Classic,
    Profile,
    Maturity,
}

impl CardKind {
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            CardKind::Classic => (720, 240),
            CardKind::Profile => (540, 220),
            CardKind::Maturity => (640, 220),
        }
    }

    fn heading(self) -> &'static str {
        match self {
            CardKind::Classic => "Classic Board",
            CardKind::Profile => "Profile Overview",
            CardKind::Maturity => "Engineering Maturity",
        }
    }
}

pub fn placeholder_svg(kind: CardKind, username: &str, note: &str) -> String {
    let (width, height) = kind.dimensions();
    let name = escape_xml(username);

    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" role="img" aria-label="{name}" viewBox="0 0 {w} {h}">
  <title>{name} • {heading}</title>
  <desc>{note}</desc>
  <rect x="0" y="0" width="{w}" height="{h}" rx="16" fill="#ffffff"/>
  <rect x="0.5" y="0.5" width="{w1}" height="{h1}" rx="16" fill="none" stroke="#e5e7eb"/>
  <text x="24" y="52" font-family="ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Arial" font-size="18" font-weight="800" fill="#111827">{name} • {heading}</text>
  <text x="24" y="80" font-family="ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Arial" font-size="12" fill="#6b7280">{note}</text>
</svg>"##,
        w = width,
        h = height,
        w1 = width - 1,
        h1 = height - 1,
        name = name,
        heading = kind.heading(),
        note = escape_xml(note),
    )
}
