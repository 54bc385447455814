/// Describes on which side of a directed line a point lies.
///
/// Created by [DirectedEdgeHandle::side_query](crate::handles::DirectedEdgeHandle::side_query)
/// and [side_query](crate::side_query). The classification is exact with respect to the
/// computed orientation: a point counts as being on the line only if the orientation is
/// exactly zero.
#[derive(Debug, Clone, Copy)]
pub struct LineSideInfo {
    signed_side: f64,
}

impl PartialEq for LineSideInfo {
    fn eq(&self, other: &LineSideInfo) -> bool {
        if self.is_on_line() || other.is_on_line() {
            self.is_on_line() && other.is_on_line()
        } else {
            self.is_on_right_side() == other.is_on_right_side()
        }
    }
}

impl LineSideInfo {
    #[inline]
    pub(crate) fn from_determinant(s: f64) -> LineSideInfo {
        LineSideInfo { signed_side: s }
    }

    /// Twice the signed area spanned by the line's end points and the query point.
    pub fn signed_side(&self) -> f64 {
        self.signed_side
    }

    /// Returns `true` if the point lies strictly left of the line.
    pub fn is_on_left_side(&self) -> bool {
        self.signed_side > 0.0
    }

    /// Returns `true` if the point lies strictly right of the line.
    pub fn is_on_right_side(&self) -> bool {
        self.signed_side < 0.0
    }

    /// Returns `true` if the point lies left of the line or on the line itself.
    pub fn is_on_left_side_or_on_line(&self) -> bool {
        self.signed_side >= 0.0
    }

    /// Returns `true` if the point lies right of the line or on the line itself.
    pub fn is_on_right_side_or_on_line(&self) -> bool {
        self.signed_side <= 0.0
    }

    /// Returns `true` if the orientation is exactly zero.
    #[inline]
    pub fn is_on_line(&self) -> bool {
        self.signed_side == 0.0
    }

    /// Returns the classification relative to the reversed line.
    pub fn reversed(self) -> LineSideInfo {
        LineSideInfo {
            signed_side: -self.signed_side,
        }
    }
}
