use core::convert::TryFrom;
use core::fmt;
use core::ops;

use euclid::Transform3D;

use crate::error::MatrixError;
use crate::traits::{Mat4R, Mat4W};
use crate::utils4::{self, Cells};

/// A 4x4 single precision matrix stored column-major.
///
/// Cell `(row, col)` lives at index `col * 4 + row` of the backing array, so
/// each column is contiguous and [`Mat4R::to_array`] can be uploaded as is to
/// APIs expecting OpenGL style matrices. Points are column vectors: `M * p`.
///
/// Most of the interesting methods come from [`Mat4R`] and [`Mat4W`].
///
/// ```
/// use tupmath_matrix::{Mat4F, Mat4R, Mat4W};
///
/// let m = Mat4F::identity().translate3_n(1.0, 2.0, 3.0).scale3_n(2.0, 2.0, 2.0);
/// assert_eq!(m.transform_point3(&[0.0f32, 0.0, 0.0]), [1.0, 2.0, 3.0]);
/// assert_eq!(m.transform_vec3(&[1.0f32, 0.0, 0.0]), [2.0, 0.0, 0.0]);
/// ```
#[repr(C)]
#[derive(Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Mat4F {
    m: Cells,
}

impl Mat4F {
    /// Creates a matrix from its cells, listed row by row as they read on paper.
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub fn new(
        m00: f32, m01: f32, m02: f32, m03: f32,
        m10: f32, m11: f32, m12: f32, m13: f32,
        m20: f32, m21: f32, m22: f32, m23: f32,
        m30: f32, m31: f32, m32: f32, m33: f32,
    ) -> Self {
        Mat4F {
            m: [
                m00, m10, m20, m30,
                m01, m11, m21, m31,
                m02, m12, m22, m32,
                m03, m13, m23, m33,
            ],
        }
    }

    #[inline]
    pub fn identity() -> Self {
        Mat4F {
            m: utils4::identity(),
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Mat4F { m: utils4::zero() }
    }

    /// Creates a matrix from column-major cells.
    #[inline]
    pub fn from_array(m: Cells) -> Self {
        Mat4F { m }
    }

    /// Creates a matrix from row-major cells.
    #[inline]
    pub fn from_array_row_major(rows: Cells) -> Self {
        let mut m = utils4::zero();
        utils4::transpose(&rows, &mut m);
        Mat4F { m }
    }

    /// Creates a matrix from 16 column-major cells.
    pub fn try_from_slice(cells: &[f32]) -> Result<Self, MatrixError> {
        if cells.len() != 16 {
            return Err(MatrixError::SliceLength {
                expected: 16,
                found: cells.len(),
            });
        }

        let mut m = utils4::zero();
        m.copy_from_slice(cells);
        Ok(Mat4F { m })
    }

    /// Copies the cells of any readable matrix.
    #[inline]
    pub fn copy_of<M: Mat4R + ?Sized>(other: &M) -> Self {
        Mat4F { m: *other.cells() }
    }

    /// Returns the inverse, or `None` if the determinant is zero or not finite.
    ///
    /// Unlike [`Mat4W::invert`] this never produces a matrix full of
    /// infinities.
    pub fn checked_inverse(&self) -> Option<Self> {
        let det = self.det();
        if det == 0.0 || !det.is_finite() {
            log::debug!("refusing to invert a matrix with determinant {}", det);
            return None;
        }

        Some(self.invert_n())
    }

    /// Converts into an euclid transform.
    ///
    /// euclid multiplies row vectors from the left, which makes its `m11, m12, ..`
    /// field order line up with this type's column-major cells.
    #[inline]
    #[rustfmt::skip]
    pub fn to_transform3d<Src, Dst>(&self) -> Transform3D<f32, Src, Dst> {
        let m = &self.m;
        Transform3D::new(
            m[0], m[1], m[2], m[3],
            m[4], m[5], m[6], m[7],
            m[8], m[9], m[10], m[11],
            m[12], m[13], m[14], m[15],
        )
    }

    #[inline]
    #[rustfmt::skip]
    pub fn from_transform3d<Src, Dst>(t: &Transform3D<f32, Src, Dst>) -> Self {
        Mat4F {
            m: [
                t.m11, t.m12, t.m13, t.m14,
                t.m21, t.m22, t.m23, t.m24,
                t.m31, t.m32, t.m33, t.m34,
                t.m41, t.m42, t.m43, t.m44,
            ],
        }
    }
}

impl Mat4R for Mat4F {
    #[inline]
    fn cells(&self) -> &Cells {
        &self.m
    }
}

impl Mat4W for Mat4F {
    #[inline]
    fn cells_mut(&mut self) -> &mut Cells {
        &mut self.m
    }

    #[inline]
    fn from_cells(cells: Cells) -> Self {
        Mat4F { m: cells }
    }
}

impl Default for Mat4F {
    fn default() -> Self {
        Mat4F::identity()
    }
}

impl From<Cells> for Mat4F {
    fn from(m: Cells) -> Self {
        Mat4F::from_array(m)
    }
}

impl From<Mat4F> for Cells {
    fn from(m: Mat4F) -> Self {
        m.m
    }
}

impl<'l> TryFrom<&'l [f32]> for Mat4F {
    type Error = MatrixError;

    fn try_from(cells: &'l [f32]) -> Result<Self, MatrixError> {
        Mat4F::try_from_slice(cells)
    }
}

impl<Src, Dst> From<Mat4F> for Transform3D<f32, Src, Dst> {
    fn from(m: Mat4F) -> Self {
        m.to_transform3d()
    }
}

impl<Src, Dst> From<Transform3D<f32, Src, Dst>> for Mat4F {
    fn from(t: Transform3D<f32, Src, Dst>) -> Self {
        Mat4F::from_transform3d(&t)
    }
}

/// The matrix product `self * rhs`: `rhs` applies first, then `self`.
impl ops::Mul for Mat4F {
    type Output = Mat4F;

    #[inline]
    fn mul(self, rhs: Mat4F) -> Mat4F {
        self.rev_mul_n(&rhs)
    }
}

/// `self = self * rhs`
impl ops::MulAssign for Mat4F {
    #[inline]
    fn mul_assign(&mut self, rhs: Mat4F) {
        self.rev_mul(&rhs);
    }
}

/// Indexes by `(row, col)`.
impl ops::Index<(usize, usize)> for Mat4F {
    type Output = f32;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(row < 4 && col < 4, "cell ({}, {}) is out of range", row, col);
        &self.m[utils4::index(row, col)]
    }
}

impl ops::IndexMut<(usize, usize)> for Mat4F {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        assert!(row < 4 && col < 4, "cell ({}, {}) is out of range", row, col);
        &mut self.m[utils4::index(row, col)]
    }
}

impl fmt::Debug for Mat4F {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let r = |i| self.row(i);
        write!(
            f,
            "Mat4F[{:?} | {:?} | {:?} | {:?}]",
            r(0),
            r(1),
            r(2),
            r(3)
        )
    }
}

impl fmt::Display for Mat4F {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for i in 0..4 {
            let [a, b, c, d] = self.row(i);
            writeln!(f, "| {} {} {} {} |", a, b, c, d)?;
        }
        Ok(())
    }
}

#[test]
#[rustfmt::skip]
fn test_new_is_row_major_reading() {
    let m = Mat4F::new(
        1.0, 2.0, 3.0, 4.0,
        5.0, 6.0, 7.0, 8.0,
        9.0, 10.0, 11.0, 12.0,
        13.0, 14.0, 15.0, 16.0,
    );
    assert_eq!(m.row(0), [1.0, 2.0, 3.0, 4.0]);
    assert_eq!(m.col(0), [1.0, 5.0, 9.0, 13.0]);
    assert_eq!(m[(1, 2)], 7.0);
    assert_eq!(m.m12(), 7.0);
    assert_eq!(m.to_array_row_major()[..4], [1.0, 2.0, 3.0, 4.0]);
    assert_eq!(Mat4F::from_array_row_major(m.to_array_row_major()), m);
    assert_eq!(m.trace(), 34.0);
}

#[test]
fn test_default_is_identity() {
    assert_eq!(Mat4F::default(), Mat4F::identity());
    assert_eq!(Mat4F::default().det(), 1.0);
}

#[test]
fn test_try_from_slice() {
    let cells: [f32; 17] = [1.0; 17];
    assert_eq!(
        Mat4F::try_from_slice(&cells),
        Err(MatrixError::SliceLength {
            expected: 16,
            found: 17
        })
    );
    assert_eq!(
        Mat4F::try_from(&cells[..15]),
        Err(MatrixError::SliceLength {
            expected: 16,
            found: 15
        })
    );
    let m = Mat4F::try_from(&cells[1..]).unwrap();
    assert_eq!(m.to_array(), [1.0; 16]);
}

#[test]
fn test_index_mut() {
    let mut m = Mat4F::zero();
    m[(3, 0)] = 2.0;
    assert_eq!(m.to_array()[3], 2.0);
    assert_eq!(m.at(3, 0), 2.0);
}

#[test]
#[should_panic]
fn test_index_out_of_range() {
    let m = Mat4F::identity();
    let _v = m[(0, 4)];
}

#[test]
fn test_operators() {
    let t = Mat4F::identity().set_translation3_n(1.0, 0.0, 0.0);
    let s = Mat4F::identity().set_scaling3_n(2.0, 2.0, 2.0);

    assert_eq!((t * s).transform_point3(&[1.0f32, 0.0, 0.0]), [3.0, 0.0, 0.0]);

    let mut acc = t;
    acc *= s;
    assert_eq!(acc, t * s);
    assert_eq!(acc, t.rev_mul_n(&s));
    assert_eq!(acc, s.mul_n(&t));
}

#[test]
fn test_checked_inverse() {
    assert_eq!(Mat4F::zero().checked_inverse(), None);

    let m = Mat4F::identity().translate3_n(1.0, 2.0, 3.0).rotate_deg_n(0.0, 0.0, 1.0, 30.0);
    let inv = m.checked_inverse().unwrap();
    assert!((m * inv).approx_eq(&Mat4F::identity()));
}

#[test]
fn test_euclid_round_trip() {
    use euclid::default::Transform3D;

    let m = Mat4F::identity()
        .translate3_n(1.0, 2.0, 3.0)
        .rotate_rad_n(0.0, 1.0, 0.0, 0.4)
        .scale3_n(1.0, 2.0, 3.0);

    let t: Transform3D<f32> = m.into();
    assert_eq!(Mat4F::from(t), m);

    let v = t.transform_vector3d(euclid::vec3(1.0, -1.0, 0.5));
    let ours = m.transform_vec3(&[1.0f32, -1.0, 0.5]);
    assert!((ours[0] - v.x).abs() < 1e-4);
    assert!((ours[1] - v.y).abs() < 1e-4);
    assert!((ours[2] - v.z).abs() < 1e-4);

    let p = t.transform_point3d(euclid::point3(0.0, 0.0, 0.0)).unwrap();
    let ours = m.transform_point3(&[0.0f32, 0.0, 0.0]);
    assert!((ours[0] - p.x).abs() < 1e-4);
    assert!((ours[1] - p.y).abs() < 1e-4);
    assert!((ours[2] - p.z).abs() < 1e-4);
}

#[test]
fn test_display() {
    use std::string::ToString;

    let s = Mat4F::identity().to_string();
    assert!(s.starts_with("| 1 0 0 0 |"));
    assert_eq!(s.lines().count(), 4);
}
