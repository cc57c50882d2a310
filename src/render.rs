use crate::config::{Layout, ReportConfig};
use crate::report::ReportSummary;
use anyhow::{Context, Result};
use std::{
    fs,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// File name of the machine-readable summary artifact.
pub const SUMMARY_FILE: &str = "report.json";

/// File name of the dashboard page artifact.
pub const PAGE_FILE: &str = "report.html";

const CHART_TITLE: &str = "Normal Distribution of Values";
const X_AXIS_LABEL: &str = "Values";
const Y_AXIS_LABEL: &str = "Probability density";

const MEAN_CAPTION: &str =
    "The mean indicates the central value of the distribution, in this case the average of the values.";
const STD_DEV_CAPTION: &str =
    "The standard deviation indicates how spread out the data are around the mean.";

const CHART_MARGIN: f64 = 48.0;

/// Write the summary as pretty-printed JSON.
pub fn write_summary<P: AsRef<Path>>(file: P, summary: &ReportSummary) -> Result<()> {
    let file = file.as_ref();
    let writer = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, summary)
        .context("failed to serialize report summary")?;
    // Errors during the implicit flush on drop are discarded, so flush here.
    writer.flush().with_context(|| format!("failed to write {file:?}"))?;
    Ok(())
}

/// Write the self-contained dashboard page.
pub fn write_page<P: AsRef<Path>>(
    file: P,
    summary: &ReportSummary,
    cfg: &ReportConfig,
) -> Result<()> {
    let file = file.as_ref();
    fs::write(file, render_page(summary, cfg))
        .with_context(|| format!("failed to write {file:?}"))?;
    Ok(())
}

/// Render the dashboard page: configured title and description, the curve
/// chart, and the descriptive annotation block.
pub fn render_page(summary: &ReportSummary, cfg: &ReportConfig) -> String {
    let main_style = match cfg.layout {
        Layout::Centered => "max-width: 48rem; margin: 2rem auto;",
        Layout::Wide => "margin: 2rem;",
    };

    let title = escape_html(&summary.title);
    let description = escape_html(&cfg.description);
    let chart = render_chart(summary, cfg);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: system-ui, sans-serif; color: #222; }}
main {{ {main_style} }}
figure {{ margin: 1.5rem 0; }}
.annotations p {{ margin: 0.25rem 0; }}
.caption {{ color: #555; font-size: 0.9rem; }}
</style>
</head>
<body>
<main>
<h1>{title}</h1>
<p>{description}</p>
<figure>
{chart}</figure>
<section class="annotations">
<p>Mean (&mu;) = {mean:.4}</p>
<p>Standard deviation (&sigma;) = {std_dev:.4}</p>
<p class="caption">{MEAN_CAPTION}</p>
<p class="caption">{STD_DEV_CAPTION}</p>
<p>Records read: {count}</p>
<p class="caption">Start date: {start}<br>End date: {end}</p>
</section>
</main>
</body>
</html>
"#,
        mean = summary.parameters.mean,
        std_dev = summary.parameters.std_dev,
        count = summary.record_count,
        start = summary.start_date,
        end = summary.end_date,
    )
}

/// Render the curve as an inline SVG line chart with the area under the
/// curve filled.
fn render_chart(summary: &ReportSummary, cfg: &ReportConfig) -> String {
    let width = cfg.chart_width;
    let height = cfg.chart_height;
    let plot_width = f64::from(width) - 2.0 * CHART_MARGIN;
    let plot_height = f64::from(height) - 2.0 * CHART_MARGIN;

    let (x_min, x_max) = summary.curve.x_bounds();
    let y_max = summary.curve.max_density();

    // Map curve coordinates onto the plot area; the y axis grows downwards.
    let px = |x: f64| CHART_MARGIN + (x - x_min) / (x_max - x_min) * plot_width;
    let py = |density: f64| CHART_MARGIN + plot_height - density / y_max * plot_height;

    let line = summary
        .curve
        .points()
        .iter()
        .map(|point| format!("{:.2},{:.2}", px(point.x), py(point.density)))
        .collect::<Vec<_>>()
        .join(" ");

    let left = px(x_min);
    let right = px(x_max);
    let baseline = py(0.0);
    let area = format!("{line} {right:.2},{baseline:.2} {left:.2},{baseline:.2}");

    let mid = (x_min + x_max) / 2.0;
    let tick_y = baseline + 18.0;

    format!(
        r##"<svg viewBox="0 0 {width} {height}" width="{width}" height="{height}" role="img">
<text x="{center_x:.0}" y="24" text-anchor="middle" font-size="16">{CHART_TITLE}</text>
<polygon points="{area}" fill="#1f77b4" fill-opacity="0.3"/>
<polyline points="{line}" fill="none" stroke="#1f77b4" stroke-width="1.5"/>
<line x1="{left:.2}" y1="{baseline:.2}" x2="{right:.2}" y2="{baseline:.2}" stroke="#888"/>
<line x1="{left:.2}" y1="{top:.2}" x2="{left:.2}" y2="{baseline:.2}" stroke="#888"/>
<text x="{left:.2}" y="{tick_y:.2}" text-anchor="middle" font-size="12">{x_min:.1}</text>
<text x="{mid_px:.2}" y="{tick_y:.2}" text-anchor="middle" font-size="12">{mid:.1}</text>
<text x="{right:.2}" y="{tick_y:.2}" text-anchor="middle" font-size="12">{x_max:.1}</text>
<text x="{center_x:.0}" y="{label_y:.0}" text-anchor="middle" font-size="13">{X_AXIS_LABEL}</text>
<text transform="rotate(-90)" x="-{y_label_x:.0}" y="16" text-anchor="middle" font-size="13">{Y_AXIS_LABEL}</text>
</svg>
"##,
        center_x = f64::from(width) / 2.0,
        top = CHART_MARGIN,
        mid_px = px(mid),
        label_y = f64::from(height) - 10.0,
        y_label_x = f64::from(height) / 2.0,
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
