use serde::{Deserialize, Serialize};

use crate::data::dataset::{Dataset, Record};

/// Styling constants every chart is built with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub point_size: u32,
    pub point_shape: PointShape,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 800,
            height: 300,
            point_size: 2,
            point_shape: PointShape::Circle,
        }
    }
}

/// Record columns a chart can encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Method,
    Index,
    ElapsedSeconds,
    SizeBytes,
}

impl Field {
    /// Column name as it appears in chart data.
    pub fn column(self) -> &'static str {
        match self {
            Field::Method => "Method",
            Field::Index => "Fibonacci index",
            Field::ElapsedSeconds => "Time (s)",
            Field::SizeBytes => "Size (bytes)",
        }
    }

    pub fn field_type(self) -> FieldType {
        match self {
            Field::Method => FieldType::Nominal,
            _ => FieldType::Quantitative,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Nominal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Linear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointShape {
    Circle,
    Square,
    Diamond,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Line,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PointOverlay {
    pub shape: PointShape,
    pub size: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Mark {
    pub kind: MarkKind,
    pub point: Option<PointOverlay>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AxisEncoding {
    pub field: Field,
    pub title: String,
    pub scale: ScaleType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub zoom: bool,
    pub pan: bool,
}

/// Declarative description of what to draw. Rebuilt from scratch on every selection change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub mark: Mark,
    pub x: AxisEncoding,
    pub y: AxisEncoding,
    pub color: Field,
    pub tooltip: Vec<Field>,
    pub interaction: Interaction,
    pub data: Vec<Record>,
}

/// Points of one method, in data order.
#[derive(Clone, Debug, PartialEq)]
pub struct Series<'a> {
    pub method: &'a str,
    pub points: Vec<&'a Record>,
}

impl ChartSpec {
    /// Data grouped by the color field (method), series in first-appearance order.
    pub fn series(&self) -> Vec<Series<'_>> {
        let mut out: Vec<Series<'_>> = Vec::new();
        for record in &self.data {
            match out.iter_mut().find(|s| s.method == record.method) {
                Some(s) => s.points.push(record),
                None => out.push(Series { method: &record.method, points: vec![record] }),
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Pure function of (filtered dataset, style) to `ChartSpec`.
#[derive(Clone, Debug, Default)]
pub struct ChartBuilder {
    style: ChartStyle,
}

impl ChartBuilder {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    pub fn build(&self, filtered: &Dataset) -> ChartSpec {
        ChartSpec {
            title: self.style.title.clone(),
            width: self.style.width,
            height: self.style.height,
            mark: Mark {
                kind: MarkKind::Line,
                point: Some(PointOverlay { shape: self.style.point_shape, size: self.style.point_size }),
            },
            x: AxisEncoding { field: Field::Index, title: "Fibonacci Index".into(), scale: ScaleType::Linear },
            y: AxisEncoding { field: Field::ElapsedSeconds, title: "Time (s)".into(), scale: ScaleType::Linear },
            color: Field::Method,
            tooltip: vec![Field::Method, Field::Index, Field::ElapsedSeconds],
            interaction: Interaction { zoom: true, pan: true },
            data: filtered.records().to_vec(),
        }
    }
}
