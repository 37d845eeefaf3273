use crate::util::coord::{
    Coordinate, GeoPoint, ProjectedPoint, Projection, degrees_to_meters, meters_to_degrees,
};
use crate::util::error::MgrsError;
use geo_types::{Polygon, Rect, coord};
use serde::{Deserialize, Serialize};

/// A (west, south, east, north) rectangle in one [`Projection`].
///
/// Construction normalizes so that `south <= north` and `west <= east`. In degrees a
/// west edge greater than the east edge denotes a box across the antimeridian; it is
/// stored with `east + 360` and can be split back with [`pieces`](Self::pieces).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    west: f64,
    south: f64,
    east: f64,
    north: f64,
    projection: Projection,
}

impl Bounds {
    pub fn new(west: f64, south: f64, east: f64, north: f64, projection: Projection) -> Self {
        let (south, north) = if south <= north {
            (south, north)
        } else {
            (north, south)
        };
        if projection == Projection::Geographic {
            return Self::normalize_degrees(west, south, east, north);
        }
        let (west, east) = if west <= east {
            (west, east)
        } else {
            (east, west)
        };
        Self {
            west,
            south,
            east,
            north,
            projection,
        }
    }

    /// A box in longitude/latitude degrees.
    ///
    /// # Example
    /// ```
    /// use mgrs_grid::Bounds;
    ///
    /// let pacific = Bounds::degrees(170.0, -10.0, -170.0, 10.0);
    /// assert!(pacific.crosses_antimeridian());
    /// assert_eq!(pacific.pieces().len(), 2);
    /// ```
    pub fn degrees(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self::new(west, south, east, north, Projection::Geographic)
    }

    /// A box in Web Mercator meters.
    pub fn meters(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self::new(west, south, east, north, Projection::WebMercator)
    }

    pub fn from_rect(rect: &Rect<f64>, projection: Projection) -> Self {
        Self::new(
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y,
            projection,
        )
    }

    /// The whole UTM/MGRS world, 180°W to 180°E and 80°S to 84°N.
    pub fn world() -> Self {
        Self::degrees(-180.0, -80.0, 180.0, 84.0)
    }

    fn normalize_degrees(west: f64, south: f64, east: f64, north: f64) -> Self {
        let mut west = west;
        let mut east = if west > east { east + 360.0 } else { east };
        if west < -180.0 {
            west += 360.0;
            east += 360.0;
        }
        if east - west >= 360.0 {
            west = -180.0;
            east = 180.0;
        }
        Self {
            west,
            south,
            east,
            north,
            projection: Projection::Geographic,
        }
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.projection == Projection::Geographic && self.east > 180.0
    }

    pub fn southwest(&self) -> ProjectedPoint {
        ProjectedPoint::new(self.west, self.south, self.projection)
    }

    pub fn northeast(&self) -> ProjectedPoint {
        ProjectedPoint::new(self.east, self.north, self.projection)
    }

    /// Corners counter-clockwise from the southwest.
    pub fn corners(&self) -> [ProjectedPoint; 4] {
        [
            ProjectedPoint::new(self.west, self.south, self.projection),
            ProjectedPoint::new(self.east, self.south, self.projection),
            ProjectedPoint::new(self.east, self.north, self.projection),
            ProjectedPoint::new(self.west, self.north, self.projection),
        ]
    }

    pub fn center(&self) -> ProjectedPoint {
        let mut x = (self.west + self.east) / 2.0;
        if self.crosses_antimeridian() && x > 180.0 {
            x -= 360.0;
        }
        ProjectedPoint::new(x, (self.south + self.north) / 2.0, self.projection)
    }

    /// The four edges, counter-clockwise from the southern one.
    pub fn edges(&self) -> [(ProjectedPoint, ProjectedPoint); 4] {
        let [sw, se, ne, nw] = self.corners();
        [(sw, se), (se, ne), (ne, nw), (nw, sw)]
    }

    /// Closed containment test.
    pub fn contains<C: Coordinate>(&self, coord: &C) -> bool {
        let (x, y) = (coord.x(), coord.y());
        let inside_x = (self.west..=self.east).contains(&x)
            || (self.crosses_antimeridian() && (self.west..=self.east).contains(&(x + 360.0)));
        inside_x && (self.south..=self.north).contains(&y)
    }

    /// True if the closed boxes share at least one point.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.pairs(other).any(|(a, b)| {
            a.west <= b.east && b.west <= a.east && a.south <= b.north && b.south <= a.north
        })
    }

    /// True if the boxes share a region of positive area.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.pairs(other)
            .filter_map(|(a, b)| a.clip(&b))
            .any(|b| !b.is_empty())
    }

    /// The common part of two boxes in the same projection, `None` if they are disjoint.
    /// Touching boxes yield a degenerate (zero width or height) result.
    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        if self.projection != other.projection {
            return None;
        }
        if !self.crosses_antimeridian() && !other.crosses_antimeridian() {
            return self.clip(other);
        }
        // The largest common piece; a box of under 360° can meet another on both sides
        // of the antimeridian only in degenerate cases.
        self.pairs(other)
            .filter_map(|(a, b)| a.clip(&b))
            .max_by(|a, b| (a.width() * a.height()).total_cmp(&(b.width() * b.height())))
    }

    fn clip(&self, other: &Bounds) -> Option<Bounds> {
        let west = self.west.max(other.west);
        let east = self.east.min(other.east);
        let south = self.south.max(other.south);
        let north = self.north.min(other.north);
        if west > east || south > north {
            return None;
        }
        Some(Bounds {
            west,
            south,
            east,
            north,
            projection: self.projection,
        })
    }

    fn pairs(&self, other: &Bounds) -> impl Iterator<Item = (Bounds, Bounds)> {
        let own = if self.projection == other.projection {
            self.pieces()
        } else {
            Vec::new()
        };
        let theirs = other.pieces();
        own.into_iter()
            .flat_map(move |a| theirs.clone().into_iter().map(move |b| (a, b)))
    }

    /// Splits a box across the antimeridian into boxes within [-180, 180].
    pub fn pieces(&self) -> Vec<Bounds> {
        if !self.crosses_antimeridian() {
            return vec![*self];
        }
        vec![
            Bounds {
                east: 180.0,
                ..*self
            },
            Bounds {
                west: -180.0,
                east: self.east - 360.0,
                ..*self
            },
        ]
    }

    /// Grows the box by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Bounds {
        Bounds {
            west: self.west - margin,
            south: self.south - margin,
            east: self.east + margin,
            north: self.north + margin,
            projection: self.projection,
        }
    }

    /// Degrees to Web Mercator meters.
    pub fn to_meters(&self) -> Result<Bounds, MgrsError> {
        match self.projection {
            Projection::WebMercator => Ok(*self),
            Projection::Geographic => {
                let (west, south) = degrees_to_meters(self.west, self.south);
                let (east, north) = degrees_to_meters(self.east, self.north);
                Ok(Bounds {
                    west,
                    south,
                    east,
                    north,
                    projection: Projection::WebMercator,
                })
            }
            Projection::Utm { .. } => self.to_degrees()?.to_meters(),
        }
    }

    /// Meters back to degrees. UTM boxes map to the box around their projected corners.
    pub fn to_degrees(&self) -> Result<Bounds, MgrsError> {
        match self.projection {
            Projection::Geographic => Ok(*self),
            Projection::WebMercator => {
                let (west, south) = meters_to_degrees(self.west, self.south);
                let (east, north) = meters_to_degrees(self.east, self.north);
                Ok(Bounds::degrees(west, south, east, north))
            }
            Projection::Utm { .. } => {
                let geo = self
                    .corners()
                    .iter()
                    .map(|c| c.to_geo())
                    .collect::<Result<Vec<GeoPoint>, MgrsError>>()?;
                let west = geo.iter().map(|p| p.lon()).fold(f64::INFINITY, f64::min);
                let east = geo.iter().map(|p| p.lon()).fold(f64::NEG_INFINITY, f64::max);
                let south = geo.iter().map(|p| p.lat()).fold(f64::INFINITY, f64::min);
                let north = geo.iter().map(|p| p.lat()).fold(f64::NEG_INFINITY, f64::max);
                Ok(Bounds::degrees(west, south, east, north))
            }
        }
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.west, y: self.south },
            coord! { x: self.east, y: self.north },
        )
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}
