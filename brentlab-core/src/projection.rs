//! Chart projection: price series + change points → renderable series.
//!
//! Series 0 is the continuous price line. Every change point then gets
//! its own sparse series of the same length, null everywhere except at the
//! change point's index, so it renders as an isolated marker. Each series
//! carries a [`SeriesTag`] naming what it plots; pointer hits are resolved
//! through the tag, never through the series position.

use crate::correlate::resolve_event;
use crate::domain::{ChangePoint, ChangePointId, Event, PriceSeries};

pub const PRICE_LABEL: &str = "Brent Oil Price";

/// What a chart series plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesTag {
    Price,
    ChangePoint(ChangePointId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub tag: SeriesTag,
    pub label: String,
    pub values: Vec<Option<f64>>,
}

impl ChartSeries {
    /// Non-null values as `(x, y)` pairs, x being the point index.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|y| (i as f64, y)))
            .collect()
    }

    /// Runs of consecutive non-null values, so a line can be drawn with
    /// gaps where quotes are missing.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for (i, v) in self.values.iter().enumerate() {
            match v {
                Some(y) => current.push((i as f64, *y)),
                None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    /// Position of the first non-null value. For a marker series this is
    /// the change point's index.
    pub fn marker_index(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }
}

/// Multi-series chart with a shared date axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartModel {
    /// Number of points on the x axis.
    pub fn len(&self) -> usize {
        self.price().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn price(&self) -> &ChartSeries {
        &self.series[0]
    }

    pub fn markers(&self) -> &[ChartSeries] {
        &self.series[1..]
    }

    /// Date label of a point, blank when there is none.
    pub fn label_at(&self, point_index: usize) -> &str {
        self.labels.get(point_index).map_or("", String::as_str)
    }

    /// The change point plotted by `series_index`, if it plots one.
    pub fn change_point_at(&self, series_index: usize) -> Option<ChangePointId> {
        match self.series.get(series_index)?.tag {
            SeriesTag::ChangePoint(id) => Some(id),
            SeriesTag::Price => None,
        }
    }

    /// Change points with a marker series, in series order.
    pub fn marker_ids(&self) -> impl Iterator<Item = ChangePointId> + '_ {
        self.series.iter().filter_map(|s| match s.tag {
            SeriesTag::ChangePoint(id) => Some(id),
            SeriesTag::Price => None,
        })
    }

    /// Series index of the marker plotting `id`.
    pub fn series_of(&self, id: ChangePointId) -> Option<usize> {
        self.series
            .iter()
            .position(|s| s.tag == SeriesTag::ChangePoint(id))
    }

    /// Series index of the marker closest to `point_index`, within
    /// `radius` points. Ties go to the earlier series.
    pub fn nearest_marker(&self, point_index: usize, radius: usize) -> Option<usize> {
        self.series
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s.tag, SeriesTag::ChangePoint(_)))
            .filter_map(|(i, s)| s.marker_index().map(|m| (i, m.abs_diff(point_index))))
            .filter(|&(_, distance)| distance <= radius)
            .min_by_key(|&(i, distance)| (distance, i))
            .map(|(i, _)| i)
    }

    /// Min/max of the price line padded by 5%, for axis bounds.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let values: Vec<f64> = self.price().values.iter().flatten().copied().filter(|v| v.is_finite()).collect();
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        let pad = if range > 0.0 {
            range * 0.05
        } else {
            (max.abs() * 0.05).max(1.0)
        };
        Some((min - pad, max + pad))
    }
}

/// Build the chart model. Duplicate change point indices produce
/// coincident markers; out-of-range indices, or an index whose price is
/// missing, produce all-null series.
pub fn project(prices: &PriceSeries, change_points: &[ChangePoint]) -> ChartModel {
    let mut series = Vec::with_capacity(change_points.len() + 1);
    series.push(ChartSeries {
        tag: SeriesTag::Price,
        label: PRICE_LABEL.to_string(),
        values: prices.prices.clone(),
    });

    for (k, cp) in change_points.iter().enumerate() {
        let id = ChangePointId(k);
        let offset = cp.offset();
        let values = prices
            .prices
            .iter()
            .enumerate()
            .map(|(i, &p)| if Some(i) == offset { p } else { None })
            .collect();
        series.push(ChartSeries {
            tag: SeriesTag::ChangePoint(id),
            label: id.label(),
            values,
        });
    }

    ChartModel {
        labels: prices.dates.clone(),
        series,
    }
}

/// Tooltip text for a point of a series.
///
/// Marker tooltips go through [`resolve_event`], the same resolver the
/// detail view uses.
pub fn tooltip(
    model: &ChartModel,
    series_index: usize,
    point_index: usize,
    change_points: &[ChangePoint],
    events: &[Event],
) -> Option<String> {
    let series = model.series.get(series_index)?;
    match series.tag {
        SeriesTag::Price => {
            let price = series.values.get(point_index).copied().flatten()?;
            Some(format!("Price: ${price}"))
        }
        SeriesTag::ChangePoint(id) => {
            let cp = change_points.get(id.0)?;
            let date = crate::correlate::change_point_date(cp, &model.labels).unwrap_or_default();
            Some(match resolve_event(cp, &model.labels, events) {
                Some(event) => format!("Change Point: {date}\nEvent: {}", event.description),
                None => format!("Change Point: {date}"),
            })
        }
    }
}
