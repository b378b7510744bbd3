// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of sampled frames.

use std::fmt::Write as _;

use peniko::Brush;
use scatterviz_core::{Mark, MarkPayload, TextAnchor, TextBaseline};

use crate::coordinator::Frame;
use crate::labels::{ACTIVE_CLASS, INACTIVE_CLASS};
use crate::tooltip::Popup;

const STYLE: &str = "\
.active { font-weight: bold; fill: #000000; cursor: default; }
.inactive { font-weight: lighter; fill: #808080; cursor: pointer; }
.inactive:hover { fill: #000000; }
.tooltip rect { fill: #000000; fill-opacity: 0.8; }
.tooltip text { fill: #ffffff; font-family: sans-serif; font-size: 12px; }
";

const POPUP_LINE_HEIGHT: f64 = 16.0;
const POPUP_PADDING: f64 = 6.0;

/// Writes a full `<svg>` document for `frame`.
pub fn render_frame(frame: &Frame) -> String {
    let mut out = String::new();
    let (w, h) = (frame.canvas.width, frame.canvas.height);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = writeln!(out, "<style>\n{STYLE}</style>");
    let _ = writeln!(
        out,
        r#"<g transform="translate({} {})" data-x="{}" data-y="{}">"#,
        frame.offset.x, frame.offset.y, frame.selection.x, frame.selection.y
    );
    for mark in &frame.marks {
        write_mark(&mut out, mark);
    }
    out.push_str("</g>\n");
    if let Some(popup) = &frame.popup {
        write_popup(&mut out, popup);
    }
    out.push_str("</svg>\n");
    out
}

/// A standalone document showing `message` in place of the chart.
pub fn failure_svg(message: &str) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="960" height="500">"#,
            "\n",
            r##"<text x="20" y="40" font-size="16" fill="#b22222">{}</text>"##,
            "\n</svg>\n"
        ),
        escape_xml(message)
    )
}

fn write_mark(out: &mut String, mark: &Mark) {
    match &mark.payload {
        MarkPayload::Circle(c) => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                c.center.x, c.center.y, c.radius
            );
            write_paint_attr(out, "fill", &c.fill);
            if c.opacity < 1.0 {
                let _ = write!(out, r#" opacity="{}""#, c.opacity);
            }
            out.push_str("/>\n");
        }
        MarkPayload::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
            };
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                t.pos.x, t.pos.y, t.font_size, baseline
            );
            if let Some(family) = &t.font_family {
                let _ = write!(out, r#" font-family="{}""#, escape_xml(family));
            }
            if t.angle != 0.0 {
                let _ = write!(
                    out,
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.pos.x, t.pos.y
                );
            }
            out.push_str(match t.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            match mark.class.as_deref() {
                // Emphasis comes from the style block.
                Some(class @ (ACTIVE_CLASS | INACTIVE_CLASS)) => {
                    let _ = write!(out, r#" class="{class}""#);
                }
                Some(class) => {
                    let _ = write!(out, r#" class="{}""#, escape_xml(class));
                    write_paint_attr(out, "fill", &t.fill);
                }
                None => write_paint_attr(out, "fill", &t.fill),
            }
            out.push('>');
            out.push_str(&escape_xml(&t.text));
            out.push_str("</text>\n");
        }
        MarkPayload::Path(p) => {
            let _ = write!(out, r#"<path d="{}""#, p.path.to_svg());
            write_paint_attr(out, "fill", &p.fill);
            if p.stroke_width > 0.0 {
                write_paint_attr(out, "stroke", &p.stroke);
                let _ = write!(out, r#" stroke-width="{}""#, p.stroke_width);
            }
            out.push_str("/>\n");
        }
    }
}

fn write_popup(out: &mut String, popup: &Popup) {
    let lines: Vec<&str> = popup.lines().collect();
    let width = lines
        .iter()
        .map(|l| l.chars().count() as f64 * 7.2)
        .fold(0.0, f64::max)
        + 2.0 * POPUP_PADDING;
    let height = lines.len() as f64 * POPUP_LINE_HEIGHT + 2.0 * POPUP_PADDING;
    let x0 = popup.anchor.x - width / 2.0;
    let y0 = popup.anchor.y - height;
    let _ = writeln!(
        out,
        r#"<g class="tooltip" data-record="{}">"#,
        popup.record
    );
    let _ = writeln!(
        out,
        r#"<rect x="{x0}" y="{y0}" width="{width}" height="{height}" rx="4"/>"#
    );
    for (i, line) in lines.iter().enumerate() {
        let y = y0 + POPUP_PADDING + (i as f64 + 1.0) * POPUP_LINE_HEIGHT - 4.0;
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{y}" text-anchor="middle">{}</text>"#,
            popup.anchor.x,
            escape_xml(line)
        );
    }
    out.push_str("</g>\n");
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
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

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::time::Duration;

    use kurbo::Point;
    use scatterviz_charts::{ChartLayout, Margin, Size};

    use super::*;
    use crate::coordinator::{Coordinator, Event};
    use crate::data::{Dataset, Record};
    use crate::field::{XField, YField};
    use crate::tooltip::TooltipBinding;

    fn chart() -> Coordinator {
        let dataset = Dataset::from_records(vec![
            Record {
                abbr: "A&B".to_string(),
                yards_per_pass_attempt: 6.0,
                total_points: 300.0,
                ..Record::default()
            },
            Record {
                abbr: "C".to_string(),
                yards_per_pass_attempt: 8.0,
                total_points: 400.0,
                ..Record::default()
            },
        ])
        .expect("non-empty");
        let layout =
            ChartLayout::new(Size::new(960.0, 500.0), Margin::new(40.0, 40.0, 80.0, 100.0));
        Coordinator::new(Rc::new(dataset), layout, Duration::ZERO).expect("chart")
    }

    #[test]
    fn frame_has_style_group_and_emphasis() {
        let svg = render_frame(&chart().frame(Duration::ZERO));
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"width="960" height="500""#));
        assert!(svg.contains(".active { font-weight: bold"));
        assert!(svg.contains(r#"<g transform="translate(100 40)""#));
        assert_eq!(svg.matches(r#"class="active""#).count(), 2);
        assert_eq!(svg.matches(r#"class="inactive""#).count(), 4);
        assert!(svg.contains(r#"transform="rotate(-90 "#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn glyphs_and_labels_are_written() {
        let svg = render_frame(&chart().frame(Duration::ZERO));
        assert_eq!(svg.matches("<circle ").count(), 2);
        assert!(svg.contains(r##"r="20" fill="#a52a2a" opacity="0.75""##));
        assert!(svg.contains(">A&amp;B</text>"));
        assert!(svg.contains(r#"font-family="sans-serif""#));
    }

    #[test]
    fn popup_is_one_text_per_line() {
        let record = Record {
            abbr: "NE".to_string(),
            passing_touchdowns: 35.0,
            total_touchdowns: 55.0,
            ..Record::default()
        };
        let popup = TooltipBinding::new(XField::PassingTouchdowns, YField::TotalTouchdowns).popup(
            0,
            &record,
            Point::new(300.0, 200.0),
        );
        let mut out = String::new();
        write_popup(&mut out, &popup);
        assert!(out.starts_with(r#"<g class="tooltip" data-record="0">"#));
        assert_eq!(out.matches("<text ").count(), 3);
        assert!(out.contains(">Total Touchdowns:  55</text>"));
    }

    #[test]
    fn hovered_frame_includes_popup() {
        let mut c = chart();
        let frame = c.frame(Duration::ZERO);
        let glyph = frame
            .marks
            .iter()
            .find_map(|m| match &m.payload {
                MarkPayload::Circle(circle) => Some(circle.center),
                _ => None,
            })
            .expect("a glyph");
        c.dispatch(Event::PointerMove(glyph + frame.offset), Duration::ZERO);
        let svg = render_frame(&c.frame(Duration::ZERO));
        assert!(svg.contains(r#"class="tooltip""#));
    }

    #[test]
    fn failure_message_is_escaped() {
        let svg = failure_svg("Failed to load data: <missing>");
        assert!(svg.contains("Failed to load data: &lt;missing&gt;"));
    }
}
