//! Inline SVG charts for the dashboards.
//!
//! Pie slices are drawn as polygons approximating each arc; bars are scaled
//! against the largest value.

use std::f64::consts::PI;
use std::fmt::Write;

use registry_types::Status;

use crate::views::escape;

/// Shown instead of a chart when there is nothing to plot
pub const NO_DATA: &str = "<p class=\"no-data\">No data to display.</p>";

const ACTIVE_COLOR: &str = "#2e9e44";
const INACTIVE_COLOR: &str = "#d03b3b";
const OTHER_COLOR: &str = "#9a9a9a";

const PIE_SIZE: f64 = 240.0;
const BAR_WIDTH: f64 = 48.0;
const BAR_GAP: f64 = 24.0;
const BAR_AREA_HEIGHT: f64 = 220.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Datum {
    pub label: String,
    pub value: usize,
    pub color: &'static str,
}

impl Datum {
    /// A datum colored by a raw status value
    pub fn for_status(label: impl Into<String>, value: usize, raw_status: &str) -> Self {
        Self {
            label: label.into(),
            value,
            color: status_color(raw_status),
        }
    }
}

pub fn status_color(raw_status: &str) -> &'static str {
    match Status::parse(raw_status) {
        Some(Status::Active) => ACTIVE_COLOR,
        Some(Status::Inactive) => INACTIVE_COLOR,
        None => OTHER_COLOR,
    }
}

/// Display label for a raw status value
pub fn status_label(raw_status: &str) -> String {
    match Status::parse(raw_status) {
        Some(status) => status.display_label().to_string(),
        None => raw_status.to_string(),
    }
}

pub fn pie_chart(title: &str, slices: &[Datum]) -> String {
    let total: usize = slices.iter().map(|s| s.value).sum();
    if total == 0 {
        return NO_DATA.to_string();
    }

    let radius = PIE_SIZE / 2.0 - 10.0;
    let (cx, cy) = (PIE_SIZE / 2.0, PIE_SIZE / 2.0 + 30.0);
    let legend_x = PIE_SIZE + 20.0;
    let height = PIE_SIZE + 40.0;

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg class=\"chart pie\" xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" role=\"img\">",
        w = legend_x + 180.0,
        h = height,
    );
    let _ = write!(
        svg,
        "<text x=\"10\" y=\"20\" font-weight=\"bold\">{}</text>",
        escape(title)
    );

    let mut start = -PI / 2.0;
    for slice in slices.iter().filter(|s| s.value > 0) {
        let sweep = slice.value as f64 / total as f64 * 2.0 * PI;
        if slice.value == total {
            let _ = write!(
                svg,
                "<circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"{radius:.1}\" fill=\"{}\"/>",
                slice.color
            );
        } else {
            let steps = ((sweep / (PI / 32.0)).ceil() as usize).max(3);
            let mut points = format!("{cx:.1},{cy:.1}");
            for j in 0..=steps {
                let angle = start + j as f64 / steps as f64 * sweep;
                let _ = write!(
                    points,
                    " {:.1},{:.1}",
                    cx + angle.cos() * radius,
                    cy + angle.sin() * radius
                );
            }
            let _ = write!(
                svg,
                "<polygon points=\"{points}\" fill=\"{}\" stroke=\"#ffffff\" stroke-width=\"1\"/>",
                slice.color
            );
        }
        start += sweep;
    }

    for (i, slice) in slices.iter().enumerate() {
        let y = 50.0 + i as f64 * 22.0;
        let pct = slice.value as f64 / total as f64 * 100.0;
        let _ = write!(
            svg,
            "<rect x=\"{legend_x:.1}\" y=\"{:.1}\" width=\"12\" height=\"12\" fill=\"{}\"/>\
             <text x=\"{:.1}\" y=\"{:.1}\">{} ({}, {:.1}%)</text>",
            y - 10.0,
            slice.color,
            legend_x + 18.0,
            y,
            escape(&slice.label),
            slice.value,
            pct
        );
    }

    svg.push_str("</svg>");
    svg
}

pub fn bar_chart(title: &str, bars: &[Datum]) -> String {
    if bars.is_empty() {
        return NO_DATA.to_string();
    }

    let max = bars.iter().map(|b| b.value).max().unwrap_or(0).max(1);
    let left = 40.0;
    let top = 40.0;
    let baseline = top + BAR_AREA_HEIGHT;
    let width = left + bars.len() as f64 * (BAR_WIDTH + BAR_GAP) + BAR_GAP;
    let height = baseline + 50.0;

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg class=\"chart bar\" xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" viewBox=\"0 0 {width:.0} {height:.0}\" role=\"img\">"
    );
    let _ = write!(
        svg,
        "<text x=\"10\" y=\"20\" font-weight=\"bold\">{}</text>",
        escape(title)
    );
    let _ = write!(
        svg,
        "<line x1=\"{left}\" y1=\"{baseline}\" x2=\"{width:.1}\" y2=\"{baseline}\" stroke=\"#333333\"/>\
         <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{max}</text>\
         <text x=\"{:.1}\" y=\"{baseline:.1}\" text-anchor=\"end\">0</text>",
        left - 6.0,
        top + 4.0,
        left - 6.0,
    );

    for (i, bar) in bars.iter().enumerate() {
        let x = left + BAR_GAP + i as f64 * (BAR_WIDTH + BAR_GAP);
        let h = bar.value as f64 / max as f64 * BAR_AREA_HEIGHT;
        let _ = write!(
            svg,
            "<rect x=\"{x:.1}\" y=\"{:.1}\" width=\"{BAR_WIDTH}\" height=\"{h:.1}\" fill=\"{}\"><title>{}: {}</title></rect>\
             <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\
             <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\">{}</text>",
            baseline - h,
            bar.color,
            escape(&bar.label),
            bar.value,
            x + BAR_WIDTH / 2.0,
            baseline - h - 4.0,
            bar.value,
            x + BAR_WIDTH / 2.0,
            baseline + 16.0,
            escape(&bar.label),
        );
    }

    svg.push_str("</svg>");
    svg
}
