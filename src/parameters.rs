use crate::DEFAULT_TOLERANCE;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Controls the tolerance policy and the point location of a [Subdivision](crate::Subdivision).
///
/// The following parameters will be used by `Self::default` and [Self::new]:
/// * `tolerance`: [DEFAULT_TOLERANCE] (`1e-6`)
/// * `max_locate_steps`: the number of directed edges plus two
///
/// # Example
///
/// ```
/// use quadedge_delaunay::{InsertionError, Point2, Subdivision, SubdivisionParameters};
///
/// # fn main() -> Result<(), InsertionError> {
/// let parameters = SubdivisionParameters::new()
///     .with_tolerance(1e-9)
///     .with_max_locate_steps(10_000);
///
/// let subdivision = Subdivision::with_parameters(
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
///     parameters,
/// )?;
/// assert_eq!(subdivision.parameters().tolerance(), 1e-9);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct SubdivisionParameters {
    tolerance: f64,
    max_locate_steps: Option<usize>,
}

impl Default for SubdivisionParameters {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_locate_steps: None,
        }
    }
}

impl SubdivisionParameters {
    /// Creates a new set of `SubdivisionParameters`.
    ///
    /// Refer to the [struct definition](Self) for more information.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specifies the distance below which two positions refer to the same vertex.
    ///
    /// The same value bounds the perpendicular distance of a point that is considered to
    /// lie on an edge and the smallest altitude of the initial triangle.
    ///
    /// Negative values are treated as zero.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Limits the number of steps a single point location walk may take.
    ///
    /// A walk that exceeds this limit is aborted with
    /// [InsertionError::DegenerateGeometry](crate::InsertionError::DegenerateGeometry).
    /// By default, the limit is the number of directed edges plus two. A walk that visits
    /// more edges than that must have entered a cycle.
    pub fn with_max_locate_steps(mut self, max_locate_steps: usize) -> Self {
        self.max_locate_steps = Some(max_locate_steps);
        self
    }

    /// Returns the configured tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the explicit step limit, `None` if the automatic limit is used.
    pub fn max_locate_steps(&self) -> Option<usize> {
        self.max_locate_steps
    }
}
