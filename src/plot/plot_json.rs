use std::path::PathBuf;
use serde_json::{json, Map, Value};

use crate::data::dataset::Record;
use crate::error::Result;
use crate::plot::chart::{AxisEncoding, ChartSpec, Field};
use crate::plot::render::{write_atomic, Renderer};

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

fn field_value(record: &Record, field: Field) -> Value {
    match field {
        Field::Method => json!(record.method),
        Field::Index => json!(record.index),
        Field::ElapsedSeconds => json!(record.elapsed_seconds),
        Field::SizeBytes => json!(record.size_bytes),
    }
}

/// Inline data row keyed by the display column names.
fn row(record: &Record) -> Value {
    let mut map = Map::new();
    for field in [Field::Index, Field::ElapsedSeconds, Field::SizeBytes, Field::Method] {
        map.insert(field.column().to_string(), field_value(record, field));
    }
    Value::Object(map)
}

fn axis(enc: &AxisEncoding) -> Value {
    json!({
        "field": enc.field.column(),
        "type": enc.field.field_type(),
        "title": enc.title,
        "scale": { "type": enc.scale },
    })
}

/// Vega-Lite v5 document for `spec`. Zoom/pan becomes an interval selection bound to the scales.
pub fn to_vega_lite(spec: &ChartSpec) -> Value {
    // line mark, optionally with a point overlay
    let mut mark = json!({ "type": spec.mark.kind });
    if let Some(point) = spec.mark.point {
        mark["point"] = json!({ "shape": point.shape, "size": point.size });
    }

    let tooltip: Vec<Value> = spec
        .tooltip
        .iter()
        .map(|f| json!({ "field": f.column(), "type": f.field_type() }))
        .collect();

    let mut doc = json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": spec.title,
        "width": spec.width,
        "height": spec.height,
        "data": { "values": spec.data.iter().map(row).collect::<Vec<_>>() },
        "mark": mark,
        "encoding": {
            "x": axis(&spec.x),
            "y": axis(&spec.y),
            "color": { "field": spec.color.column(), "type": spec.color.field_type() },
            "tooltip": tooltip,
        },
    });

    // interval over both axes, bound to the scales: drag pans, wheel zooms
    let encodings: Vec<&str> = match (spec.interaction.zoom, spec.interaction.pan) {
        (false, false) => vec![],
        _ => vec!["x", "y"],
    };
    if !encodings.is_empty() {
        doc["params"] = json!([{
            "name": "zoom_pan",
            "select": { "type": "interval", "encodings": encodings, "zoom": spec.interaction.zoom },
            "bind": "scales",
        }]);
    }
    doc
}

/// Writes each chart as a pretty-printed Vega-Lite file.
#[derive(Clone, Debug)]
pub struct JsonRenderer {
    output: PathBuf,
}

impl JsonRenderer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self { output: output.into() }
    }
}

impl Renderer for JsonRenderer {
    fn render(&mut self, spec: &ChartSpec) -> Result<()> {
        let text = serde_json::to_string_pretty(&to_vega_lite(spec))?;
        write_atomic(&self.output, &text)
    }
}
