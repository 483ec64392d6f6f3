//! Bar, line and pie charts drawn from report data.
//!
//! The graphical interface embeds the SVG output; the text interface prints
//! the ASCII rendering.

use std::f64::consts::PI;

use askama::Template;

use crate::error::{AppError, Result};

pub const PALETTE: [&str; 5] = ["#3498db", "#2ecc71", "#e74c3c", "#e67e22", "#9b59b6"];

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 56.0;
const MAX_AXIS_LABELS: usize = 8;
const ASCII_BAR: char = '█';

#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub unit: String,
    pub points: Vec<DataPoint>,
}

struct Bar {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: &'static str,
    label: String,
    label_x: f64,
    value_y: f64,
    value: String,
}

struct LinePoint {
    x: f64,
    y: f64,
    /// Empty when the axis label is skipped to avoid overlap.
    label: String,
    value: String,
}

struct Slice {
    path: String,
    full: bool,
    color: &'static str,
    legend: String,
    legend_y: f64,
    dot_y: f64,
}

#[derive(Template)]
#[template(path = "charts/bar.svg")]
struct BarSvg<'a> {
    title: &'a str,
    width: f64,
    height: f64,
    center_x: f64,
    middle_y: f64,
    axis_x: f64,
    axis_y: f64,
    axis_end: f64,
    axis_label_x: f64,
    label_y: f64,
    max_label: String,
    bars: Vec<Bar>,
}

#[derive(Template)]
#[template(path = "charts/line.svg")]
struct LineSvg<'a> {
    title: &'a str,
    width: f64,
    height: f64,
    center_x: f64,
    middle_y: f64,
    axis_x: f64,
    axis_y: f64,
    axis_end: f64,
    axis_label_x: f64,
    label_y: f64,
    max_label: String,
    min_label: String,
    polyline: String,
    points: Vec<LinePoint>,
}

#[derive(Template)]
#[template(path = "charts/pie.svg")]
struct PieSvg<'a> {
    title: &'a str,
    width: f64,
    height: f64,
    center_x: f64,
    middle_y: f64,
    cx: f64,
    cy: f64,
    radius: f64,
    legend_x: f64,
    legend_text_x: f64,
    slices: Vec<Slice>,
}

impl Chart {
    pub fn bar(title: impl Into<String>, unit: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self::build(ChartKind::Bar, title, unit, points)
    }

    pub fn line(title: impl Into<String>, unit: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self::build(ChartKind::Line, title, unit, points)
    }

    /// Slices with a zero or negative value are dropped.
    pub fn pie(title: impl Into<String>, points: Vec<DataPoint>) -> Self {
        let points = points.into_iter().filter(|p| p.value > 0.0).collect();
        Self::build(ChartKind::Pie, title, "", points)
    }

    fn build(
        kind: ChartKind,
        title: impl Into<String>,
        unit: impl Into<String>,
        points: Vec<DataPoint>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            unit: unit.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn to_svg(&self) -> Result<String> {
        let rendered = match self.kind {
            ChartKind::Bar => self.bar_svg().render(),
            ChartKind::Line => self.line_svg().render(),
            ChartKind::Pie => self.pie_svg().render(),
        };
        rendered.map_err(|e| AppError::Internal(e.to_string()))
    }

    /// Horizontal bars scaled to `width` characters. Pie charts show each
    /// slice's share.
    pub fn to_ascii(&self, width: usize) -> String {
        let mut out = format!("{}\n", self.title);
        if self.is_empty() {
            out.push_str("  No data\n");
            return out;
        }

        let label_width = self
            .points
            .iter()
            .map(|p| p.label.chars().count())
            .max()
            .unwrap_or(0);
        let total: f64 = self.points.iter().map(|p| p.value).sum();
        let max = self
            .points
            .iter()
            .map(|p| p.value)
            .fold(0.0_f64, f64::max);

        for point in &self.points {
            let (scaled, value) = match self.kind {
                ChartKind::Pie => {
                    let share = point.value / total;
                    (share, format!("{:.1}%", share * 100.0))
                }
                ChartKind::Bar | ChartKind::Line => (
                    if max > 0.0 { point.value / max } else { 0.0 },
                    format_value(point.value, &self.unit),
                ),
            };
            let cells = (scaled.max(0.0) * width as f64).round() as usize;
            out.push_str(&format!(
                "  {:<label_width$} | {} {}\n",
                point.label,
                ASCII_BAR.to_string().repeat(cells),
                value,
            ));
        }
        out
    }

    fn plot_height() -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn bar_svg(&self) -> BarSvg<'_> {
        let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let max = self
            .points
            .iter()
            .map(|p| p.value)
            .fold(0.0_f64, f64::max);
        let scale = if max > 0.0 { Self::plot_height() / max } else { 0.0 };
        let slot = plot_width / self.points.len().max(1) as f64;
        let axis_y = HEIGHT - MARGIN_BOTTOM;

        let bars = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let height = round1(p.value.max(0.0) * scale);
                let x = MARGIN_LEFT + slot * i as f64 + slot * 0.15;
                Bar {
                    x: round1(x),
                    y: round1(axis_y - height),
                    width: round1(slot * 0.7),
                    height,
                    color: PALETTE[i % PALETTE.len()],
                    label: p.label.clone(),
                    label_x: round1(x + slot * 0.35),
                    value_y: round1(axis_y - height - 4.0),
                    value: format_value(p.value, &self.unit),
                }
            })
            .collect();

        BarSvg {
            title: &self.title,
            width: WIDTH,
            height: HEIGHT,
            center_x: WIDTH / 2.0,
            middle_y: HEIGHT / 2.0,
            axis_x: MARGIN_LEFT,
            axis_y,
            axis_end: WIDTH - MARGIN_RIGHT,
            axis_label_x: MARGIN_LEFT - 6.0,
            label_y: axis_y + 18.0,
            max_label: format_value(max, &self.unit),
            bars,
        }
    }

    fn line_svg(&self) -> LineSvg<'_> {
        let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let axis_y = HEIGHT - MARGIN_BOTTOM;
        let (mut min, mut max) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.value), hi.max(p.value))
            });
        if self.points.is_empty() {
            (min, max) = (0.0, 0.0);
        }
        if (max - min).abs() < f64::EPSILON {
            min -= 1.0;
            max += 1.0;
        }
        let step_x = if self.points.len() > 1 {
            plot_width / (self.points.len() - 1) as f64
        } else {
            0.0
        };
        let label_every = self.points.len().div_ceil(MAX_AXIS_LABELS).max(1);

        let points: Vec<LinePoint> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let x = if self.points.len() > 1 {
                    MARGIN_LEFT + step_x * i as f64
                } else {
                    MARGIN_LEFT + plot_width / 2.0
                };
                let y = axis_y - (p.value - min) / (max - min) * Self::plot_height();
                LinePoint {
                    x: round1(x),
                    y: round1(y),
                    label: if i % label_every == 0 || i + 1 == self.points.len() {
                        p.label.clone()
                    } else {
                        String::new()
                    },
                    value: format_value(p.value, &self.unit),
                }
            })
            .collect();
        let polyline = points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        LineSvg {
            title: &self.title,
            width: WIDTH,
            height: HEIGHT,
            center_x: WIDTH / 2.0,
            middle_y: HEIGHT / 2.0,
            axis_x: MARGIN_LEFT,
            axis_y,
            axis_end: WIDTH - MARGIN_RIGHT,
            axis_label_x: MARGIN_LEFT - 6.0,
            label_y: axis_y + 18.0,
            max_label: format_value(max, &self.unit),
            min_label: format_value(min, &self.unit),
            polyline,
            points,
        }
    }

    fn pie_svg(&self) -> PieSvg<'_> {
        let radius = (HEIGHT - MARGIN_TOP - 24.0) / 2.0;
        let cx = MARGIN_LEFT + radius;
        let cy = MARGIN_TOP + radius + 8.0;
        let total: f64 = self.points.iter().map(|p| p.value).sum();

        let mut angle = -PI / 2.0;
        let slices = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let share = p.value / total;
                let sweep = share * 2.0 * PI;
                let (x1, y1) = (cx + radius * angle.cos(), cy + radius * angle.sin());
                angle += sweep;
                let (x2, y2) = (cx + radius * angle.cos(), cy + radius * angle.sin());
                let large_arc = u8::from(sweep > PI);
                Slice {
                    path: format!(
                        "M {cx} {cy} L {} {} A {radius} {radius} 0 {large_arc} 1 {} {} Z",
                        round1(x1),
                        round1(y1),
                        round1(x2),
                        round1(y2),
                    ),
                    full: share >= 0.9999,
                    color: PALETTE[i % PALETTE.len()],
                    legend: format!("{} ({:.1}%)", p.label, share * 100.0),
                    legend_y: MARGIN_TOP + 20.0 + 24.0 * i as f64,
                    dot_y: MARGIN_TOP + 16.0 + 24.0 * i as f64,
                }
            })
            .collect();

        PieSvg {
            title: &self.title,
            width: WIDTH,
            height: HEIGHT,
            center_x: WIDTH / 2.0,
            middle_y: HEIGHT / 2.0,
            cx,
            cy,
            radius,
            legend_x: cx + radius + 40.0,
            legend_text_x: cx + radius + 52.0,
            slices,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn format_value(value: f64, unit: &str) -> String {
    let number = if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    };
    if unit.is_empty() {
        number
    } else {
        format!("{number} {unit}")
    }
}
