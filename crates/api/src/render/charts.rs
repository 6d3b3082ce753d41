//! Small chart primitives built from circle dash arrays and rects.

use std::fmt::Write;

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Circular gauge showing a single 0..1 value.
pub fn ring_gauge(
    cx: f64,
    cy: f64,
    r: f64,
    value01: f64,
    track: &str,
    fill: &str,
    stroke_width: f64,
) -> String {
    let circumference = 2.0 * std::f64::consts::PI * r;
    let dash = clamp01(value01) * circumference;

    format!(
        r#"<g transform="translate({cx},{cy})">
  <circle r="{r}" fill="none" stroke="{track}" stroke-width="{sw}" />
  <circle r="{r}" fill="none" stroke="{fill}" stroke-width="{sw}" stroke-dasharray="{dash} {rest}" stroke-linecap="round" transform="rotate(-90)" />
</g>"#,
        cx = cx,
        cy = cy,
        r = r,
        track = track,
        fill = fill,
        sw = stroke_width,
        dash = dash,
        rest = circumference - dash,
    )
}

/// Multi-segment donut; segment values sum to at most 1.
pub fn donut_segments(
    cx: f64,
    cy: f64,
    r: f64,
    stroke_width: f64,
    track: &str,
    segments: &[(f64, &str)],
) -> String {
    let circumference = 2.0 * std::f64::consts::PI * r;
    let mut out = format!(
        r#"<g transform="translate({cx},{cy}) rotate(-90)">
  <circle r="{r}" fill="none" stroke="{track}" stroke-width="{sw}" />
"#,
        cx = cx,
        cy = cy,
        r = r,
        track = track,
        sw = stroke_width,
    );

    let mut offset = 0.0;
    for (value01, color) in segments {
        let v = clamp01(*value01);
        if v <= 0.0 {
            continue;
        }
        let _ = write!(
            out,
            r#"  <circle r="{r}" fill="none" stroke="{color}" stroke-width="{sw}" stroke-dasharray="{dash} {circ}" stroke-dashoffset="{off}" stroke-linecap="butt" />
"#,
            r = r,
            color = color,
            sw = stroke_width,
            dash = v * circumference,
            circ = circumference,
            off = -offset * circumference,
        );
        offset += v;
        if offset >= 1.0 {
            break;
        }
    }

    out.push_str("</g>");
    out
}

/// Mini bar chart scaled to the max value.
pub fn bars(x: f64, y: f64, w: f64, h: f64, values: &[usize], fill: &str) -> String {
    let n = values.len().max(1);
    let gap = 2.0;
    let max_v = values.iter().copied().max().unwrap_or(0).max(1) as f64;
    let bar_w = (w - gap * (n as f64 - 1.0)) / n as f64;

    let mut out = String::new();
    for (i, v) in values.iter().enumerate() {
        let bar_h = *v as f64 / max_v * h;
        let bx = x + i as f64 * (bar_w + gap);
        let by = y + (h - bar_h);
        let _ = write!(
            out,
            r#"<rect x="{bx}" y="{by}" width="{bw}" height="{bh}" rx="2" fill="{fill}" />
"#,
            bx = bx,
            by = by,
            bw = bar_w,
            bh = bar_h,
            fill = fill,
        );
    }
    out
}

/// Horizontal meter for a 0..=100 score.
pub fn score_bar(x: f64, y: f64, w: f64, score: u8, track: &str, fill: &str) -> String {
    let filled = w * f64::from(score.min(100)) / 100.0;
    format!(
        r#"<rect x="{x}" y="{y}" width="{w}" height="6" rx="3" fill="{track}" />
<rect x="{x}" y="{y}" width="{filled}" height="6" rx="3" fill="{fill}" />
"#,
        x = x,
        y = y,
        w = w,
        filled = filled,
        track = track,
        fill = fill,
    )
}
