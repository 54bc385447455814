use std::{error::Error, fmt::Display};

use crate::{HasPosition, LineSideInfo, Point2, SubdivisionNum};

/// The default distance below which two positions are considered to be the same vertex.
///
/// Also used as the maximum perpendicular distance for a point to count as lying on an
/// edge.
///
/// *See also [SubdivisionParameters::with_tolerance](crate::SubdivisionParameters::with_tolerance)*
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// The error type used for creating and extending a subdivision.
///
/// Inserting a point that coincides with an existing vertex is *not* an error, the
/// existing vertex is returned instead.
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash)]
pub enum InsertionError {
    /// The three seed points are collinear or (almost) coincident.
    ///
    /// A subdivision can only be created from a triangle whose smallest altitude is larger
    /// than the configured tolerance.
    DegenerateInitialTriangle,

    /// The local geometry is too degenerate for the floating point predicates.
    ///
    /// This is returned if a circumcircle has a vanishing determinant, if point location
    /// does not terminate or if a point outside of the convex hull sees no hull edge.
    /// The subdivision is left unchanged.
    DegenerateGeometry,

    /// A coordinate value was too small.
    ///
    /// The absolute value of any inserted vertex coordinate must either be zero or
    /// greater than or equal to [crate::MIN_ALLOWED_VALUE].
    TooSmall,

    /// A coordinate value was too large.
    ///
    /// The absolute value of any inserted vertex coordinate must be less than or equal to
    /// [crate::MAX_ALLOWED_VALUE].
    TooLarge,

    /// A coordinate value was NaN.
    NAN,
}

impl Display for InsertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Debug>::fmt(self, f)
    }
}

impl Error for InsertionError {}

/// The smallest allowed coordinate value greater than zero. This value is equal to
/// 2<sup>-142</sup>.
///
/// The *absolute value* of any inserted vertex coordinate must be either zero or greater
/// than or equal to this value. Smaller values underflow when squared by the in-circle
/// test.
///
/// *See also [validate_coordinate], [validate_vertex], [MAX_ALLOWED_VALUE],
/// [mitigate_underflow]*
pub const MIN_ALLOWED_VALUE: f64 = 1.793662034335766e-43; // 1.0 * 2^-142

/// The largest allowed coordinate value. This value is equal to 2<sup>201</sup>.
///
/// The *absolute value* of any inserted vertex coordinate must be smaller than or equal
/// to this value.
///
/// *See also [validate_coordinate], [validate_vertex], [MIN_ALLOWED_VALUE]*
pub const MAX_ALLOWED_VALUE: f64 = 3.2138760885179806e60; // 1.0 * 2^201

/// Checks if a coordinate value is suitable for insertion into a subdivision.
///
/// Will return an error if and only if
///  - The absolute value of the coordinate is too small (See [MIN_ALLOWED_VALUE])
///  - The absolute value of the coordinate is too large (See [MAX_ALLOWED_VALUE])
///  - The coordinate is NaN (not a number)
///
/// Passing in any non-finite floating point number (e.g. `f32::NEG_INFINITY`) will
/// result in `Err(InsertionError::TooLarge)`.
///
/// *See also [mitigate_underflow]*
pub fn validate_coordinate<S: SubdivisionNum>(value: S) -> Result<(), InsertionError> {
    let as_f64: f64 = value.into();
    if as_f64.is_nan() {
        Err(InsertionError::NAN)
    } else if as_f64.abs() < MIN_ALLOWED_VALUE && as_f64 != 0.0 {
        Err(InsertionError::TooSmall)
    } else if as_f64.abs() > MAX_ALLOWED_VALUE {
        Err(InsertionError::TooLarge)
    } else {
        Ok(())
    }
}

/// Checks if a vertex is suitable for insertion into a subdivision.
///
/// A vertex is considered suitable if both of its coordinates are valid. See
/// [validate_coordinate] for more information.
pub fn validate_vertex<V: HasPosition>(vertex: &V) -> Result<(), InsertionError> {
    let position = vertex.position();
    validate_coordinate(position.x)?;
    validate_coordinate(position.y)?;
    Ok(())
}

/// Prevents underflow issues of a position by setting any coordinate that is too small
/// to zero.
///
/// A vertex inserted with a position returned by this function will never cause
/// [InsertionError::TooSmall]. Rounding is always towards zero.
///
/// # Example
/// ```
/// use quadedge_delaunay::{InsertionError, Point2, Subdivision};
///
/// # fn main() -> Result<(), InsertionError> {
/// let mut subdivision = Subdivision::new(
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(5.0, 10.0),
/// )?;
///
/// let invalid_position = Point2::new(1.0e-44, 4.2);
/// assert_eq!(
///     subdivision.insert_site(invalid_position),
///     Err(InsertionError::TooSmall)
/// );
///
/// let valid_position = quadedge_delaunay::mitigate_underflow(invalid_position);
/// assert_eq!(valid_position, Point2::new(0.0, 4.2));
/// assert!(subdivision.insert_site(valid_position).is_ok());
/// # Ok(())
/// # }
/// ```
pub fn mitigate_underflow(position: Point2<f64>) -> Point2<f64> {
    Point2::new(
        mitigate_underflow_for_coordinate(position.x),
        mitigate_underflow_for_coordinate(position.y),
    )
}

fn mitigate_underflow_for_coordinate<S: SubdivisionNum>(coordinate: S) -> S {
    if coordinate != S::zero() && coordinate.abs().into() < MIN_ALLOWED_VALUE {
        S::zero()
    } else {
        coordinate
    }
}

/// A circle given by its center and radius.
///
/// Returned by [DirectedEdgeHandle::circumcircle](crate::handles::DirectedEdgeHandle::circumcircle)
/// and [TriangleHandle::circumcircle](crate::handles::TriangleHandle::circumcircle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// The circle's center.
    pub center: Point2<f64>,
    /// The circle's radius.
    pub radius: f64,
}

impl Circle {
    /// Returns `true` if `position` lies strictly inside of this circle.
    pub fn contains(&self, position: Point2<f64>) -> bool {
        self.center.distance_2(position) < self.radius * self.radius
    }
}

/// Indicates a point's projected position relative to an edge.
///
/// Created by [DirectedEdgeHandle::project_point](crate::handles::DirectedEdgeHandle::project_point).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointProjection {
    factor: f64,
    length_2: f64,
}

impl PointProjection {
    fn new(factor: f64, length_2: f64) -> Self {
        Self { factor, length_2 }
    }

    /// Returns `true` if the projection lies before the edge's origin.
    pub fn is_before_edge(&self) -> bool {
        self.factor < 0.0
    }

    /// Returns `true` if the projection lies behind the edge's destination.
    pub fn is_behind_edge(&self) -> bool {
        self.factor > self.length_2
    }

    /// Returns `true` if the projection lies between the edge's end points.
    pub fn is_on_edge(&self) -> bool {
        !self.is_before_edge() && !self.is_behind_edge()
    }

    /// Returns the relative position of the projection along the edge.
    ///
    /// `0.0` corresponds to the edge's origin and `1.0` to its destination.
    pub fn relative_position(&self) -> f64 {
        self.factor / self.length_2
    }
}

pub(crate) fn project_point(
    from: Point2<f64>,
    to: Point2<f64>,
    query_point: Point2<f64>,
) -> PointProjection {
    let dir = to.sub(from);
    PointProjection::new(query_point.sub(from).dot(dir), dir.length2())
}

pub(crate) fn nearest_point(
    from: Point2<f64>,
    to: Point2<f64>,
    query_point: Point2<f64>,
) -> Point2<f64> {
    let projection = project_point(from, to, query_point);
    if projection.is_before_edge() {
        from
    } else if projection.is_behind_edge() {
        to
    } else {
        from.add(to.sub(from).mul(projection.relative_position()))
    }
}

/// Squared distance between `query_point` and the segment `from -> to`.
pub(crate) fn distance_2(from: Point2<f64>, to: Point2<f64>, query_point: Point2<f64>) -> f64 {
    query_point.distance_2(nearest_point(from, to, query_point))
}

fn to_robust_coord(point: Point2<f64>) -> robust::Coord<f64> {
    robust::Coord {
        x: point.x,
        y: point.y,
    }
}

/// Twice the signed area of the triangle `(a, b, c)`.
///
/// The result is positive if the points are ordered counter clockwise. Its sign is
/// exact: permuting the arguments only ever flips the sign and the result is zero if and
/// only if the points are collinear.
#[inline]
pub fn orientation(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    robust::orient2d(to_robust_coord(a), to_robust_coord(b), to_robust_coord(c))
}

/// Returns on which side of the line `from -> to` the point `query_point` lies.
pub fn side_query(from: Point2<f64>, to: Point2<f64>, query_point: Point2<f64>) -> LineSideInfo {
    LineSideInfo::from_determinant(orientation(from, to, query_point))
}

/// Returns `true` if `d` lies strictly inside the circle through `a`, `b` and `c`.
///
/// `a`, `b` and `c` must be ordered counter clockwise. Only the exact sign of the
/// in-circle determinant is inspected, co-circular points are not contained.
pub fn in_circle(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>, d: Point2<f64>) -> bool {
    robust::incircle(
        to_robust_coord(a),
        to_robust_coord(b),
        to_robust_coord(c),
        to_robust_coord(d),
    ) > 0.0
}

/// Calculates the circle through three points.
///
/// Returns [InsertionError::DegenerateGeometry] if the points are collinear or if the
/// result is not finite.
pub fn circumcircle(
    a: Point2<f64>,
    b: Point2<f64>,
    c: Point2<f64>,
) -> Result<Circle, InsertionError> {
    let d = 2.0 * orientation(a, b, c);
    let b = b.sub(a);
    let c = c.sub(a);

    if d == 0.0 {
        return Err(InsertionError::DegenerateGeometry);
    }
    let len_b = b.length2();
    let len_c = c.length2();

    let x = (len_b * c.y - len_c * b.y) / d;
    let y = (len_c * b.x - len_b * c.x) / d;
    let radius = (x * x + y * y).sqrt();
    let center = Point2::new(x, y).add(a);

    if center.all_component_wise(f64::is_finite) && radius.is_finite() {
        Ok(Circle { center, radius })
    } else {
        Err(InsertionError::DegenerateGeometry)
    }
}

/// Returns `true` if two positions are at most `tolerance` apart.
#[inline]
pub fn coincide(a: Point2<f64>, b: Point2<f64>, tolerance: f64) -> bool {
    a.distance_2(b) <= tolerance * tolerance
}

/// Returns `true` if `x` lies on the segment `from -> to`.
///
/// This is the case if `x` coincides with one of the end points or if it is not farther
/// away from either end point than the segment is long and its perpendicular distance to
/// the segment's line is at most `tolerance`.
pub fn on_segment(x: Point2<f64>, from: Point2<f64>, to: Point2<f64>, tolerance: f64) -> bool {
    if coincide(x, from, tolerance) || coincide(x, to, tolerance) {
        return true;
    }
    let length_2 = from.distance_2(to);
    if x.distance_2(from) > length_2 || x.distance_2(to) > length_2 {
        return false;
    }
    let perpendicular = orientation(from, to, x).abs() / length_2.sqrt();
    perpendicular <= tolerance
}

/// The unsigned area of a triangle.
pub fn triangle_area(positions: [Point2<f64>; 3]) -> f64 {
    let [a, b, c] = positions;
    orientation(a, b, c).abs() * 0.5
}

/// The smallest altitude of a triangle, `0.0` if any two corners coincide.
pub(crate) fn smallest_altitude(positions: [Point2<f64>; 3]) -> f64 {
    let [a, b, c] = positions;
    let longest_2 = a.distance_2(b).max(b.distance_2(c)).max(c.distance_2(a));
    if longest_2 == 0.0 {
        return 0.0;
    }
    2.0 * triangle_area(positions) / longest_2.sqrt()
}
