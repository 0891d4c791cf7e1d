use std::path::PathBuf;
use plotly::common::{Marker, MarkerSymbol, Mode, Title};
use plotly::layout::{Axis, AxisType};
use plotly::{Layout, Plot, Scatter};

use crate::data::dataset::Record;
use crate::error::Result;
use crate::plot::chart::{AxisEncoding, ChartSpec, Field, Interaction, PointShape, ScaleType};
use crate::plot::render::{write_atomic, Renderer};

const PLOT_DIV_ID: &str = "fib-compare-chart";

fn numeric(record: &Record, field: Field) -> f64 {
    match field {
        Field::Index => record.index as f64,
        Field::ElapsedSeconds => record.elapsed_seconds,
        Field::SizeBytes => record.size_bytes as f64,
        Field::Method => f64::NAN,
    }
}

fn symbol(shape: PointShape) -> MarkerSymbol {
    match shape {
        PointShape::Circle => MarkerSymbol::Circle,
        PointShape::Square => MarkerSymbol::Square,
        PointShape::Diamond => MarkerSymbol::Diamond,
    }
}

fn axis(enc: &AxisEncoding) -> Axis {
    let kind = match enc.scale {
        ScaleType::Linear => AxisType::Linear,
    };
    Axis::new().title(Title::new(&enc.title)).type_(kind)
}

/// Drag gesture for the layout. With both flags set, dragging pans and the wheel zooms.
fn drag_mode(interaction: &Interaction) -> Option<&'static str> {
    match (interaction.zoom, interaction.pan) {
        (_, true) => Some("pan"),
        (true, false) => Some("zoom"),
        (false, false) => None,
    }
}

/// Wheel zoom is only needed when dragging is taken by pan.
fn scroll_zoom(interaction: &Interaction) -> bool {
    interaction.zoom && interaction.pan
}

/// Plotly hover template showing the tooltip fields in order.
fn hover_template(spec: &ChartSpec) -> String {
    let lines: Vec<String> = spec
        .tooltip
        .iter()
        .filter_map(|&f| {
            // the legend name is the method, no per-point column needed
            let slot = if f == spec.color {
                "%{fullData.name}"
            } else if f == spec.x.field {
                "%{x}"
            } else if f == spec.y.field {
                "%{y}"
            } else {
                return None;
            };
            Some(format!("{}: {}", f.column(), slot))
        })
        .collect();
    format!("{}<extra></extra>", lines.join("<br>"))
}

/// Plotly figure for `spec`: one line+marker trace per method.
pub fn to_plot(spec: &ChartSpec) -> Plot {
    let mut plot = Plot::new();
    let template = hover_template(spec);

    for series in spec.series() {
        let xs: Vec<f64> = series.points.iter().map(|r| numeric(r, spec.x.field)).collect();
        let ys: Vec<f64> = series.points.iter().map(|r| numeric(r, spec.y.field)).collect();

        let mut scatter = Scatter::new(xs, ys).name(series.method).hover_template(&template);
        // point overlay on top of the line, if the style asks for one
        scatter = match spec.mark.point {
            Some(point) => scatter
                .mode(Mode::LinesMarkers)
                .marker(Marker::new().size(point.size as usize).symbol(symbol(point.shape))),
            None => scatter.mode(Mode::Lines),
        };
        plot.add_trace(scatter);
    }

    let mut layout = Layout::new()
        .title(Title::new(&spec.title))
        .width(spec.width as usize)
        .height(spec.height as usize)
        .x_axis(axis(&spec.x))
        .y_axis(axis(&spec.y));
    if let Some(mode) = drag_mode(&spec.interaction) {
        layout = layout.drag_mode(mode);
    }
    plot.set_layout(layout);
    plot
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Full standalone page: heading plus the inline plotly chart.
pub fn to_html_page(spec: &ChartSpec, page_title: &str) -> String {
    let plot_html = to_plot(spec).to_inline_html(Some(PLOT_DIV_ID));
    let title = escape_html(page_title);

    // scrollZoom is a plot config option, not layout, so it is switched on after the first draw
    let config_script = if scroll_zoom(&spec.interaction) {
        format!(
            r#"<script type="text/javascript">
window.onload = function() {{
    const chart = document.getElementById('{id}');
    Plotly.react(chart, chart.data, chart.layout, {{scrollZoom: true}});
}};
</script>"#,
            id = PLOT_DIV_ID
        )
    } else {
        String::new()
    };

    format!(r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://cdn.plot.ly/plotly-latest.min.js"></script>
</head>
<body>
<h1>{title}</h1>
{plot_html}
{config_script}
</body>
</html>
"#,
        title = title,
        plot_html = plot_html,
        config_script = config_script,
    )
}

/// Writes each chart as a standalone HTML page.
#[derive(Clone, Debug)]
pub struct HtmlRenderer {
    output: PathBuf,
    page_title: String,
}

impl HtmlRenderer {
    pub fn new(output: impl Into<PathBuf>, page_title: impl Into<String>) -> Self {
        Self { output: output.into(), page_title: page_title.into() }
    }
}

impl Renderer for HtmlRenderer {
    fn render(&mut self, spec: &ChartSpec) -> Result<()> {
        write_atomic(&self.output, &to_html_page(spec, &self.page_title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::Dataset;
    use crate::data::parser::Measurement;
    use crate::plot::chart::ChartBuilder;
    use tempfile::TempDir;

    fn spec() -> ChartSpec {
        let ds = Dataset::new(vec![
            Record::new("iterative", Measurement { index: 0, elapsed_seconds: 0.0001, size_bytes: 8 }),
            Record::new("iterative", Measurement { index: 1, elapsed_seconds: 0.0002, size_bytes: 16 }),
            Record::new("binet", Measurement { index: 0, elapsed_seconds: 0.0005, size_bytes: 8 }),
        ]);
        ChartBuilder::default().build(&ds)
    }

    #[test]
    fn hover_shows_method_index_and_time() {
        assert_eq!(
            hover_template(&spec()),
            "Method: %{fullData.name}<br>Fibonacci index: %{x}<br>Time (s): %{y}<extra></extra>"
        );
    }

    #[test]
    fn page_carries_title_and_traces() {
        let html = to_html_page(&spec(), "Fibonacci <V2>");
        assert!(html.contains("<h1>Fibonacci &lt;V2&gt;</h1>"));
        assert!(html.contains(PLOT_DIV_ID));
        assert!(html.contains("\"iterative\""));
        assert!(html.contains("\"binet\""));
        assert!(html.contains("Fibonacci Index"));
    }

    #[test]
    fn zoom_and_pan_both_stay_reachable() {
        let both = Interaction { zoom: true, pan: true };
        assert_eq!(drag_mode(&both), Some("pan"));
        assert!(scroll_zoom(&both));

        let zoom_only = Interaction { zoom: true, pan: false };
        assert_eq!(drag_mode(&zoom_only), Some("zoom"));
        assert!(!scroll_zoom(&zoom_only));

        let pan_only = Interaction { zoom: false, pan: true };
        assert_eq!(drag_mode(&pan_only), Some("pan"));
        assert!(!scroll_zoom(&pan_only));

        assert_eq!(drag_mode(&Interaction { zoom: false, pan: false }), None);
    }

    #[test]
    fn default_page_pans_on_drag_and_zooms_on_scroll() {
        let html = to_html_page(&spec(), "Fibonacci V2");
        assert!(html.contains("dragmode") && html.contains("\"pan\""));
        assert!(html.contains("scrollZoom: true"));

        let mut zoom_only = spec();
        zoom_only.interaction.pan = false;
        let html = to_html_page(&zoom_only, "Fibonacci V2");
        assert!(html.contains("dragmode") && html.contains("\"zoom\""));
        assert!(!html.contains("scrollZoom"));
    }

    #[test]
    fn empty_chart_still_renders() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.html");
        let empty = ChartBuilder::default().build(&Dataset::default());

        HtmlRenderer::new(&path, "Fibonacci V2").render(&empty).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<h1>Fibonacci V2</h1>"));
        assert!(!html.contains("\"binet\""));
    }
}
