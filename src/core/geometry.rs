use crate::core::precision::Precision;
use crate::util::bounds::Bounds;
use crate::util::coord::{GeoPoint, ProjectedPoint, Projection};
use crate::util::error::MgrsError;
use geo_types::{LineString, coord};
use serde::Serialize;

/// Bisection stops once the bracketed part of a segment is shorter than this, in meters.
pub(crate) const CLIP_TOLERANCE: f64 = 1e-4;

/// A grid line segment between two points in the same projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Line {
    pub start: ProjectedPoint,
    pub end: ProjectedPoint,
    pub precision: Precision,
}

impl Line {
    pub fn new(start: ProjectedPoint, end: ProjectedPoint, precision: Precision) -> Self {
        Self {
            start,
            end,
            precision,
        }
    }

    pub fn projection(&self) -> Projection {
        self.start.projection
    }

    /// Length in the line's own units.
    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }

    /// Re-expresses both endpoints in `target`.
    pub fn to_projection(&self, target: Projection) -> Result<Line, MgrsError> {
        Ok(Line {
            start: self.start.to_projection(target)?,
            end: self.end.to_projection(target)?,
            precision: self.precision,
        })
    }

    pub fn to_degrees(&self) -> Result<Line, MgrsError> {
        self.to_projection(Projection::Geographic)
    }

    pub fn to_meters(&self) -> Result<Line, MgrsError> {
        self.to_projection(Projection::WebMercator)
    }

    pub fn to_line_string(&self) -> LineString<f64> {
        LineString::new(vec![
            coord! { x: self.start.x, y: self.start.y },
            coord! { x: self.end.x, y: self.end.y },
        ])
    }
}

/// A grid cell label: its identifier, the cell's footprint in degrees and an anchor point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub name: String,
    pub zone: u8,
    pub band: char,
    pub precision: Precision,
    pub bounds: Bounds,
    pub center: GeoPoint,
}

impl Label {
    /// Footprint in Web Mercator meters, for fitting the label text on screen.
    pub fn bounds_meters(&self) -> Result<Bounds, MgrsError> {
        self.bounds.to_meters()
    }

    pub fn center_meters(&self) -> ProjectedPoint {
        self.center.to_meters()
    }
}

/// Clips the straight segment `a`-`b` to the part where `inside` holds.
///
/// The segment is sampled at `samples` even steps and every inside/outside change is
/// refined by bisection, so each returned piece starts and ends on the region boundary
/// (or on an input endpoint). Pieces shorter than the tolerance are dropped.
pub(crate) fn clip_segment<F>(
    a: (f64, f64),
    b: (f64, f64),
    samples: usize,
    inside: F,
) -> Vec<((f64, f64), (f64, f64))>
where
    F: Fn(f64, f64) -> bool,
{
    let length = (b.0 - a.0).hypot(b.1 - a.1);
    if length == 0.0 {
        return Vec::new();
    }
    let at = |t: f64| (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1));
    let test = |t: f64| {
        let (x, y) = at(t);
        inside(x, y)
    };
    // Bisects between an inside and an outside parameter, returning the inside one.
    let boundary = |mut t_in: f64, mut t_out: f64| {
        while (t_out - t_in).abs() * length > CLIP_TOLERANCE {
            let mid = (t_in + t_out) / 2.0;
            if test(mid) {
                t_in = mid;
            } else {
                t_out = mid;
            }
        }
        t_in
    };

    let samples = samples.max(1);
    let mut pieces = Vec::new();
    let mut entry = if test(0.0) { Some(0.0) } else { None };
    let mut previous = 0.0;

    for i in 1..=samples {
        let t = i as f64 / samples as f64;
        let now_inside = test(t);
        match (entry, now_inside) {
            (None, true) => entry = Some(boundary(t, previous)),
            (Some(start), false) => {
                pieces.push((start, boundary(previous, t)));
                entry = None;
            }
            _ => {}
        }
        previous = t;
    }
    if let Some(start) = entry {
        pieces.push((start, 1.0));
    }

    pieces
        .into_iter()
        .filter(|(t0, t1)| (t1 - t0) * length > CLIP_TOLERANCE)
        .map(|(t0, t1)| {
            // Endpoints that were not clipped keep their exact input values.
            let start = if t0 == 0.0 { a } else { at(t0) };
            let end = if t1 == 1.0 { b } else { at(t1) };
            (start, end)
        })
        .collect()
}
