use crate::api::grid::GridGeometry;
use crate::api::mgrs::encode;
use crate::core::precision::Precision;
use crate::util::bounds::Bounds;
use crate::util::coord::GeoPoint;
use crate::util::error::MgrsError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default label buffer: the share of a label's footprint kept clear on each side.
pub const DEFAULT_LABEL_BUFFER: f64 = 0.1;

/// When a grid's cell labels are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelerStyle {
    pub enabled: bool,
    pub min_zoom: u8,
    #[serde(default)]
    pub max_zoom: Option<u8>,
    #[serde(default = "default_buffer")]
    pub buffer: f64,
}

fn default_buffer() -> f64 {
    DEFAULT_LABEL_BUFFER
}

impl LabelerStyle {
    pub fn new(min_zoom: u8) -> Self {
        Self {
            enabled: true,
            min_zoom,
            max_zoom: None,
            buffer: DEFAULT_LABEL_BUFFER,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(0)
        }
    }

    pub fn contains_zoom(&self, zoom: u8) -> bool {
        self.enabled && zoom >= self.min_zoom && self.max_zoom.is_none_or(|max| zoom <= max)
    }

    fn validate(&self) -> Result<(), MgrsError> {
        if self.max_zoom.is_some_and(|max| max < self.min_zoom) {
            return Err(MgrsError::Config(format!(
                "label zoom range {}-{:?} is empty",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(0.0..0.5).contains(&self.buffer) {
            return Err(MgrsError::Config(format!(
                "label buffer {} outside [0, 0.5)",
                self.buffer
            )));
        }
        Ok(())
    }
}

/// Zoom range and labeling for one grid precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridStyle {
    pub precision: Precision,
    pub enabled: bool,
    pub min_zoom: u8,
    #[serde(default)]
    pub max_zoom: Option<u8>,
    pub labeler: LabelerStyle,
}

impl GridStyle {
    /// The stock style of a precision.
    pub fn default_for(precision: Precision) -> Self {
        let (min_zoom, labeler) = match precision {
            Precision::Gzd => (0, LabelerStyle::new(4)),
            Precision::HundredKm => (3, LabelerStyle::new(6)),
            Precision::TenKm => (5, LabelerStyle::disabled()),
            Precision::Kilometer => (8, LabelerStyle::disabled()),
            Precision::HundredMeter => (11, LabelerStyle::disabled()),
            Precision::TenMeter => (14, LabelerStyle::disabled()),
            Precision::Meter => (17, LabelerStyle::disabled()),
        };
        Self {
            precision,
            enabled: true,
            min_zoom,
            max_zoom: None,
            labeler,
        }
    }

    /// True if the grid's lines are drawn at `zoom`.
    pub fn contains_zoom(&self, zoom: u8) -> bool {
        self.enabled && zoom >= self.min_zoom && self.max_zoom.is_none_or(|max| zoom <= max)
    }

    /// True if the grid's labels are drawn at `zoom`.
    pub fn labels_at(&self, zoom: u8) -> bool {
        self.contains_zoom(zoom) && self.labeler.contains_zoom(zoom)
    }

    fn validate(&self) -> Result<(), MgrsError> {
        if self.max_zoom.is_some_and(|max| max < self.min_zoom) {
            return Err(MgrsError::Config(format!(
                "{} zoom range {}-{:?} is empty",
                self.precision, self.min_zoom, self.max_zoom
            )));
        }
        self.labeler.validate()
    }
}

/// Zoom-level configuration of every grid precision.
///
/// # Example
/// ```
/// use mgrs_grid::{GridsConfig, Precision};
///
/// # fn main() -> Result<(), mgrs_grid::MgrsError> {
/// let config = GridsConfig::new()
///     .disable(Precision::Meter)
///     .max_zoom(Precision::Gzd, 10)?;
///
/// assert_eq!(config.precision_for_zoom(6), Precision::TenKm);
/// assert!(!config.grids_for_zoom(12).iter().any(|g| g.precision == Precision::Gzd));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridsConfig {
    grids: Vec<GridStyle>,
}

impl Default for GridsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GridsConfig {
    /// Every precision with its stock style.
    pub fn new() -> Self {
        Self::with_types(&Precision::ALL)
    }

    /// Only the given precisions enabled; the rest keep their stock zooms but are off.
    pub fn with_types(types: &[Precision]) -> Self {
        let grids = Precision::ALL
            .iter()
            .map(|&precision| GridStyle {
                enabled: types.contains(&precision),
                ..GridStyle::default_for(precision)
            })
            .collect();
        Self { grids }
    }

    pub fn gzd_only() -> Self {
        Self::with_types(&[Precision::Gzd])
    }

    /// Parses and validates a JSON configuration. Precisions the document leaves out
    /// are added disabled.
    pub fn from_json(json: &str) -> Result<Self, MgrsError> {
        let parsed: GridsConfig = serde_json::from_str(json)?;

        let mut grids = Vec::with_capacity(Precision::ALL.len());
        for precision in Precision::ALL {
            let mut styles = parsed.grids.iter().filter(|g| g.precision == precision);
            let style = match (styles.next(), styles.next()) {
                (Some(style), None) => *style,
                (Some(_), Some(_)) => {
                    return Err(MgrsError::Config(format!(
                        "{} grid configured more than once",
                        precision
                    )));
                }
                (None, _) => {
                    warn!("No {} grid configured, leaving it disabled", precision);
                    GridStyle {
                        enabled: false,
                        ..GridStyle::default_for(precision)
                    }
                }
            };
            style.validate()?;
            grids.push(style);
        }
        Ok(Self { grids })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MgrsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, MgrsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn grids(&self) -> &[GridStyle] {
        &self.grids
    }

    pub fn style(&self, precision: Precision) -> GridStyle {
        self.grids
            .iter()
            .find(|g| g.precision == precision)
            .copied()
            .unwrap_or_else(|| GridStyle::default_for(precision))
    }

    fn update<F>(mut self, precision: Precision, change: F) -> Result<Self, MgrsError>
    where
        F: FnOnce(&mut GridStyle),
    {
        if let Some(style) = self.grids.iter_mut().find(|g| g.precision == precision) {
            change(style);
            style.validate()?;
        }
        Ok(self)
    }

    pub fn enable(self, precision: Precision) -> Self {
        self.toggle(precision, |style| style.enabled = true)
    }

    pub fn disable(self, precision: Precision) -> Self {
        self.toggle(precision, |style| style.enabled = false)
    }

    pub fn enable_labeler(self, precision: Precision) -> Self {
        self.toggle(precision, |style| style.labeler.enabled = true)
    }

    pub fn disable_labeler(self, precision: Precision) -> Self {
        self.toggle(precision, |style| style.labeler.enabled = false)
    }

    fn toggle<F>(mut self, precision: Precision, change: F) -> Self
    where
        F: FnOnce(&mut GridStyle),
    {
        if let Some(style) = self.grids.iter_mut().find(|g| g.precision == precision) {
            change(style);
        }
        self
    }

    pub fn min_zoom(self, precision: Precision, zoom: u8) -> Result<Self, MgrsError> {
        self.update(precision, |style| style.min_zoom = zoom)
    }

    pub fn max_zoom(self, precision: Precision, zoom: u8) -> Result<Self, MgrsError> {
        self.update(precision, |style| style.max_zoom = Some(zoom))
    }

    pub fn label_min_zoom(self, precision: Precision, zoom: u8) -> Result<Self, MgrsError> {
        self.update(precision, |style| style.labeler.min_zoom = zoom)
    }

    pub fn label_max_zoom(self, precision: Precision, zoom: u8) -> Result<Self, MgrsError> {
        self.update(precision, |style| style.labeler.max_zoom = Some(zoom))
    }

    pub fn label_buffer(self, precision: Precision, buffer: f64) -> Result<Self, MgrsError> {
        self.update(precision, |style| style.labeler.buffer = buffer)
    }

    /// Enabled grids drawn at `zoom`, coarse to fine.
    pub fn grids_for_zoom(&self, zoom: u8) -> Vec<GridStyle> {
        let mut grids: Vec<GridStyle> = self
            .grids
            .iter()
            .filter(|g| g.contains_zoom(zoom))
            .copied()
            .collect();
        grids.sort_by_key(|g| g.precision);
        grids
    }

    /// Finest grid drawn at `zoom`, GZD when none is.
    pub fn precision_for_zoom(&self, zoom: u8) -> Precision {
        self.grids_for_zoom(zoom)
            .last()
            .map(|g| g.precision)
            .unwrap_or(Precision::Gzd)
    }

    /// MGRS reference of `point` at the precision shown at `zoom`.
    pub fn coordinate(&self, point: &GeoPoint, zoom: u8) -> Result<String, MgrsError> {
        Ok(encode(point, self.precision_for_zoom(zoom))?.to_string())
    }

    /// Zoom to move to so that a reference of `precision` is visible from
    /// `current_zoom`, or `None` if it already is.
    pub fn coordinate_zoom(&self, precision: Precision, current_zoom: u8) -> Option<u8> {
        let style = self.style(precision);
        if current_zoom < style.min_zoom {
            return Some(style.min_zoom);
        }
        let max_zoom = if precision == Precision::Gzd {
            self.style(Precision::HundredKm).min_zoom.checked_sub(1)
        } else {
            style.max_zoom
        };
        max_zoom.filter(|&max| current_zoom > max)
    }

    /// Grid geometry for `bounds` at the precision shown at `zoom`, with labels when
    /// that grid is labeled at `zoom`.
    pub fn geometry(&self, bounds: &Bounds, zoom: u8) -> Result<GridGeometry, MgrsError> {
        let precision = self.precision_for_zoom(zoom);
        GridGeometry::builder()
            .precision(precision)
            .bounds(bounds)
            .labels(self.style(precision).labels_at(zoom))
            .build()
    }
}
