//! The read and write contracts of 4x4 matrices.
//!
//! [`Mat4R`] is a capability over a shared borrow. While a `&impl Mat4R` is
//! alive the borrow checker guarantees nothing mutates the cells behind it; a
//! caller that needs the values to outlive the borrow copies them (see
//! [`Mat4R::to_array`], or simply copy a [`Mat4F`](crate::Mat4F)).
//!
//! [`Mat4W`] offers every operation twice. The plain form mutates the receiver
//! and returns it for chaining. The `_n` form leaves the receiver untouched and
//! returns a new matrix. Both run the same routine from [`utils4`], so they
//! agree to the bit.

use crate::error::MatrixError;
use crate::scalar;
use crate::utils4::{self, Cells};
use tupmath_tup::{Tup2R, Tup2W, Tup3R, Tup3W, Tup4R, Tup4W};

macro_rules! float_of {
    ($c:ident) => {
        f32
    };
}

macro_rules! cell_getters {
    ($($name:ident = $idx:expr),*) => {
        $(
            #[inline]
            fn $name(&self) -> f32 {
                self.cells()[$idx]
            }
        )*
    };
}

macro_rules! cell_setters {
    ($($name:ident = $idx:expr),*) => {
        $(
            #[inline]
            fn $name(&mut self, v: f32) -> &mut Self {
                self.cells_mut()[$idx] = v;
                self
            }
        )*
    };
}

// Derives the `_into` and `_with` flavours from a transform returning an array.
macro_rules! transform_variants {
    ($(
        $(#[$doc:meta])*
        $name:ident, $into:ident, $with:ident [$($flag:ident)?]
        ($TupR:ident -> $TupW:ident::$set:ident) [$($c:ident),+];
    )*) => {
        $(
            $(#[$doc])*
            ///
            /// Writes the result into `res` and returns it.
            #[inline]
            fn $into<'r, T, R>(&self, $($flag: bool,)? v: &T, res: &'r mut R) -> &'r mut R
            where
                T: $TupR + ?Sized,
                R: $TupW + ?Sized,
            {
                let [$($c),+] = self.$name($($flag,)? v);
                res.$set($($c),+)
            }

            $(#[$doc])*
            ///
            /// Hands the result components to `f` and returns what it builds.
            #[inline]
            fn $with<T, O, F>(&self, $($flag: bool,)? v: &T, f: F) -> O
            where
                T: $TupR + ?Sized,
                F: FnOnce($(float_of!($c)),+) -> O,
            {
                let [$($c),+] = self.$name($($flag,)? v);
                f($($c),+)
            }
        )*
    };
}

// Operations that discard the current content.
macro_rules! overwrite_ops {
    ($(
        $(#[$doc:meta])*
        fn $name:ident / $name_n:ident [$($g:tt)*] ($($arg:ident: $T:ty),*) => $body:expr;
    )*) => {
        $(
            $(#[$doc])*
            #[inline]
            fn $name<$($g)*>(&mut self, $($arg: $T),*) -> &mut Self {
                *self.cells_mut() = $body;
                self
            }

            $(#[$doc])*
            ///
            /// Returns a new matrix and leaves `self` untouched.
            #[inline]
            fn $name_n<$($g)*>(&self, $($arg: $T),*) -> Self
            where
                Self: Sized,
            {
                Self::from_cells($body)
            }
        )*
    };
}

// Operations that read the current content. `$src` and `$dst` never alias: the
// in-place form reads from a copy.
macro_rules! compose_ops {
    ($(
        $(#[$doc:meta])*
        fn $name:ident / $name_n:ident [$($g:tt)*] ($($arg:ident: $T:ty),*)
            => |$src:ident, $dst:ident| $body:expr;
    )*) => {
        $(
            $(#[$doc])*
            #[inline]
            fn $name<$($g)*>(&mut self, $($arg: $T),*) -> &mut Self {
                let copy = *self.cells();
                {
                    let $src = &copy;
                    let $dst = self.cells_mut();
                    $body;
                }
                self
            }

            $(#[$doc])*
            ///
            /// Returns a new matrix and leaves `self` untouched.
            #[inline]
            fn $name_n<$($g)*>(&self, $($arg: $T),*) -> Self
            where
                Self: Sized,
            {
                let mut out = utils4::zero();
                {
                    let $src = self.cells();
                    let $dst = &mut out;
                    $body;
                }
                Self::from_cells(out)
            }
        )*
    };
}

/// Read access to a column-major 4x4 matrix.
pub trait Mat4R {
    /// The 16 cells in column-major order, cell `(row, col)` at `col * 4 + row`.
    fn cells(&self) -> &Cells;

    /// Panics if `row` or `col` is not in `0..4`.
    #[inline]
    fn at(&self, row: usize, col: usize) -> f32 {
        assert!(row < 4 && col < 4, "cell ({}, {}) is out of range", row, col);
        self.cells()[utils4::index(row, col)]
    }

    fn try_at(&self, row: usize, col: usize) -> Result<f32, MatrixError> {
        if row >= 4 {
            return Err(MatrixError::IndexOutOfRange { index: row, len: 4 });
        }
        if col >= 4 {
            return Err(MatrixError::IndexOutOfRange { index: col, len: 4 });
        }
        Ok(self.cells()[utils4::index(row, col)])
    }

    cell_getters!(
        m00 = 0, m10 = 1, m20 = 2, m30 = 3,
        m01 = 4, m11 = 5, m21 = 6, m31 = 7,
        m02 = 8, m12 = 9, m22 = 10, m32 = 11,
        m03 = 12, m13 = 13, m23 = 14, m33 = 15
    );

    /// Panics if `i` is not in `0..4`.
    #[inline]
    fn row(&self, i: usize) -> [f32; 4] {
        assert!(i < 4, "row {} is out of range", i);
        utils4::row(self.cells(), i)
    }

    #[inline]
    fn row_into<'r>(&self, i: usize, out: &'r mut [f32; 4]) -> &'r mut [f32; 4] {
        *out = self.row(i);
        out
    }

    /// Panics if `i` is not in `0..4`.
    #[inline]
    fn col(&self, i: usize) -> [f32; 4] {
        assert!(i < 4, "column {} is out of range", i);
        utils4::col(self.cells(), i)
    }

    #[inline]
    fn col_into<'r>(&self, i: usize, out: &'r mut [f32; 4]) -> &'r mut [f32; 4] {
        *out = self.col(i);
        out
    }

    /// A column-major copy of the cells.
    #[inline]
    fn to_array(&self) -> Cells {
        *self.cells()
    }

    #[inline]
    fn to_array_into<'r>(&self, out: &'r mut Cells) -> &'r mut Cells {
        *out = *self.cells();
        out
    }

    /// A row-major copy of the cells, for consumers that upload rows first.
    #[inline]
    fn to_array_row_major(&self) -> Cells {
        let mut out = utils4::zero();
        utils4::row_major(self.cells(), &mut out);
        out
    }

    #[inline]
    fn to_array_row_major_into<'r>(&self, out: &'r mut Cells) -> &'r mut Cells {
        utils4::row_major(self.cells(), out);
        out
    }

    #[inline]
    fn trace(&self) -> f32 {
        utils4::trace(self.cells())
    }

    /// The determinant, recomputed from the current cells on every call.
    #[inline]
    fn det(&self) -> f32 {
        utils4::det(self.cells())
    }

    #[inline]
    fn is_finite(&self) -> bool {
        self.cells().iter().all(|v| v.is_finite())
    }

    fn approx_eq_eps<M: Mat4R + ?Sized>(&self, other: &M, epsilon: f32) -> bool {
        self.cells()
            .iter()
            .zip(other.cells().iter())
            .all(|(a, b)| scalar::approx_eq_eps(*a, *b, epsilon))
    }

    #[inline]
    fn approx_eq<M: Mat4R + ?Sized>(&self, other: &M) -> bool {
        self.approx_eq_eps(other, scalar::EPSILON)
    }

    /// Multiplies the homogeneous column vector `v` by this matrix.
    #[inline]
    fn transform4<T: Tup4R + ?Sized>(&self, v: &T) -> [f32; 4] {
        utils4::transform4(self.cells(), v.v0(), v.v1(), v.v2(), v.v3())
    }

    /// Transforms `v` as a point (`w = 1`) or as a direction (`w = 0`).
    #[inline]
    fn transform3<T: Tup3R + ?Sized>(&self, is_point: bool, v: &T) -> [f32; 3] {
        utils4::transform3(self.cells(), is_point, v.v0(), v.v1(), v.v2())
    }

    #[inline]
    fn transform_point3<T: Tup3R + ?Sized>(&self, v: &T) -> [f32; 3] {
        self.transform3(true, v)
    }

    /// The translation part of the matrix does not apply to directions.
    #[inline]
    fn transform_vec3<T: Tup3R + ?Sized>(&self, v: &T) -> [f32; 3] {
        self.transform3(false, v)
    }

    /// Transforms `(x, y, 0)` as a point (`w = 1`) or as a direction (`w = 0`).
    #[inline]
    fn transform2<T: Tup2R + ?Sized>(&self, is_point: bool, v: &T) -> [f32; 2] {
        utils4::transform2(self.cells(), is_point, v.v0(), v.v1())
    }

    #[inline]
    fn transform_point2<T: Tup2R + ?Sized>(&self, v: &T) -> [f32; 2] {
        self.transform2(true, v)
    }

    #[inline]
    fn transform_vec2<T: Tup2R + ?Sized>(&self, v: &T) -> [f32; 2] {
        self.transform2(false, v)
    }

    transform_variants!(
        /// See [`Mat4R::transform4`].
        transform4, transform4_into, transform4_with [] (Tup4R -> Tup4W::set4) [x, y, z, w];
        /// See [`Mat4R::transform3`].
        transform3, transform3_into, transform3_with [is_point] (Tup3R -> Tup3W::set3) [x, y, z];
        /// See [`Mat4R::transform_point3`].
        transform_point3, transform_point3_into, transform_point3_with [] (Tup3R -> Tup3W::set3) [x, y, z];
        /// See [`Mat4R::transform_vec3`].
        transform_vec3, transform_vec3_into, transform_vec3_with [] (Tup3R -> Tup3W::set3) [x, y, z];
        /// See [`Mat4R::transform2`].
        transform2, transform2_into, transform2_with [is_point] (Tup2R -> Tup2W::set2) [x, y];
        /// See [`Mat4R::transform_point2`].
        transform_point2, transform_point2_into, transform_point2_with [] (Tup2R -> Tup2W::set2) [x, y];
        /// See [`Mat4R::transform_vec2`].
        transform_vec2, transform_vec2_into, transform_vec2_with [] (Tup2R -> Tup2W::set2) [x, y];
    );
}

/// Write access to a column-major 4x4 matrix.
///
/// Compositions right-multiply: after `m.translate3(..)`, transforming a point
/// with `m` applies the translation first and the previous content of `m`
/// second.
pub trait Mat4W: Mat4R {
    fn cells_mut(&mut self) -> &mut Cells;

    fn from_cells(cells: Cells) -> Self
    where
        Self: Sized;

    /// Copies the cells of `other`.
    #[inline]
    fn set<M: Mat4R + ?Sized>(&mut self, other: &M) -> &mut Self {
        *self.cells_mut() = *other.cells();
        self
    }

    #[inline]
    fn set_cells(&mut self, cells: &Cells) -> &mut Self {
        *self.cells_mut() = *cells;
        self
    }

    /// Panics if `row` or `col` is not in `0..4`.
    #[inline]
    fn set_at(&mut self, row: usize, col: usize, v: f32) -> &mut Self {
        assert!(row < 4 && col < 4, "cell ({}, {}) is out of range", row, col);
        self.cells_mut()[utils4::index(row, col)] = v;
        self
    }

    /// Panics if `i` is not in `0..4`, before writing anything.
    fn set_row(&mut self, i: usize, values: [f32; 4]) -> &mut Self {
        assert!(i < 4, "row {} is out of range", i);
        let cells = self.cells_mut();
        for (c, v) in values.iter().enumerate() {
            cells[utils4::index(i, c)] = *v;
        }
        self
    }

    /// Panics if `i` is not in `0..4`, before writing anything.
    fn set_col(&mut self, i: usize, values: [f32; 4]) -> &mut Self {
        assert!(i < 4, "column {} is out of range", i);
        let start = i * 4;
        self.cells_mut()[start..start + 4].copy_from_slice(&values);
        self
    }

    #[inline]
    fn set_row_tup<T: Tup4R + ?Sized>(&mut self, i: usize, values: &T) -> &mut Self {
        self.set_row(i, values.to_array4())
    }

    #[inline]
    fn set_col_tup<T: Tup4R + ?Sized>(&mut self, i: usize, values: &T) -> &mut Self {
        self.set_col(i, values.to_array4())
    }

    cell_setters!(
        set_m00 = 0, set_m10 = 1, set_m20 = 2, set_m30 = 3,
        set_m01 = 4, set_m11 = 5, set_m21 = 6, set_m31 = 7,
        set_m02 = 8, set_m12 = 9, set_m22 = 10, set_m32 = 11,
        set_m03 = 12, set_m13 = 13, set_m23 = 14, set_m33 = 15
    );

    overwrite_ops!(
        fn set_zero / set_zero_n [] () => utils4::zero();

        fn set_identity / set_identity_n [] () => utils4::identity();

        /// Overwrites with a translation by `(x, y, 0)`.
        fn set_translation2 / set_translation2_n [] (x: f32, y: f32)
            => utils4::translation(x, y, 0.0);

        /// Overwrites with a translation by `(x, y, z)`.
        fn set_translation3 / set_translation3_n [] (x: f32, y: f32, z: f32)
            => utils4::translation(x, y, z);

        /// Overwrites with a scaling by `(x, y, 1, 1)`.
        fn set_scaling2 / set_scaling2_n [] (x: f32, y: f32)
            => utils4::scaling(x, y, 1.0, 1.0);

        /// Overwrites with a scaling by `(x, y, z, 1)`.
        fn set_scaling3 / set_scaling3_n [] (x: f32, y: f32, z: f32)
            => utils4::scaling(x, y, z, 1.0);

        /// Overwrites with a scaling by `(x, y, z, w)`.
        fn set_scaling4 / set_scaling4_n [] (x: f32, y: f32, z: f32, w: f32)
            => utils4::scaling(x, y, z, w);

        /// Overwrites with the basis change whose columns are `u`, `v` and `w`.
        fn set_base_changing / set_base_changing_n
            [U: Tup3R + ?Sized, V: Tup3R + ?Sized, W: Tup3R + ?Sized]
            (u: &U, v: &V, w: &W)
            => utils4::base_changing(u.to_array3(), v.to_array3(), w.to_array3());

        /// Overwrites with a rotation of `rad` radians around `(a0, a1, a2)`.
        ///
        /// The axis is normalized first. A zero axis fills the rotation block
        /// with NaNs.
        fn set_rotation_rad / set_rotation_rad_n [] (a0: f32, a1: f32, a2: f32, rad: f32)
            => utils4::rotation([a0, a1, a2], rad);

        /// Overwrites with a rotation of `deg` degrees around `(a0, a1, a2)`.
        fn set_rotation_deg / set_rotation_deg_n [] (a0: f32, a1: f32, a2: f32, deg: f32)
            => utils4::rotation([a0, a1, a2], scalar::to_radians(deg));

        /// Overwrites with the rotation of the quaternion `(x, y, z, w)`, which
        /// is expected to be normalized already.
        fn set_rotation_quat / set_rotation_quat_n [] (x: f32, y: f32, z: f32, w: f32)
            => utils4::rotation_quat(x, y, z, w);

        /// Overwrites with an OpenGL style perspective projection, `fov_y` in
        /// radians.
        fn set_perspective / set_perspective_n [] (fov_y: f32, aspect: f32, near: f32, far: f32)
            => utils4::perspective(fov_y, aspect, near, far);

        /// Overwrites with an OpenGL style perspective projection, `fov_y` in
        /// degrees.
        fn set_perspective_deg / set_perspective_deg_n [] (fov_y: f32, aspect: f32, near: f32, far: f32)
            => utils4::perspective(scalar::to_radians(fov_y), aspect, near, far);

        /// Overwrites with an OpenGL style orthographic projection.
        fn set_ortho / set_ortho_n []
            (left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32)
            => utils4::ortho(left, right, bottom, top, near, far);
    );

    compose_ops!(
        /// Appends a translation by `(x, y, 0)`.
        fn translate2 / translate2_n [] (x: f32, y: f32)
            => |src, dst| utils4::translate(src, x, y, 0.0, dst);

        /// Appends a translation by `(x, y, z)`.
        fn translate3 / translate3_n [] (x: f32, y: f32, z: f32)
            => |src, dst| utils4::translate(src, x, y, z, dst);

        /// Appends a scaling by `(x, y, 1, 1)`.
        fn scale2 / scale2_n [] (x: f32, y: f32)
            => |src, dst| utils4::scale(src, x, y, 1.0, 1.0, dst);

        /// Appends a scaling by `(x, y, z, 1)`.
        fn scale3 / scale3_n [] (x: f32, y: f32, z: f32)
            => |src, dst| utils4::scale(src, x, y, z, 1.0, dst);

        /// Appends a scaling by `(x, y, z, w)`.
        fn scale4 / scale4_n [] (x: f32, y: f32, z: f32, w: f32)
            => |src, dst| utils4::scale(src, x, y, z, w, dst);

        /// Appends the basis change whose columns are `u`, `v` and `w`.
        fn base_change / base_change_n
            [U: Tup3R + ?Sized, V: Tup3R + ?Sized, W: Tup3R + ?Sized]
            (u: &U, v: &V, w: &W)
            => |src, dst| utils4::base_change(src, u.to_array3(), v.to_array3(), w.to_array3(), dst);

        /// Appends a rotation of `rad` radians around `(a0, a1, a2)`.
        fn rotate_rad / rotate_rad_n [] (a0: f32, a1: f32, a2: f32, rad: f32)
            => |src, dst| utils4::rotate(src, [a0, a1, a2], rad, dst);

        /// Appends a rotation of `deg` degrees around `(a0, a1, a2)`.
        fn rotate_deg / rotate_deg_n [] (a0: f32, a1: f32, a2: f32, deg: f32)
            => |src, dst| utils4::rotate(src, [a0, a1, a2], scalar::to_radians(deg), dst);

        /// Replaces the matrix with its inverse.
        ///
        /// A singular matrix does not panic: its inverse is made of infinities
        /// and NaNs.
        fn invert / invert_n [] ()
            => |src, dst| utils4::invert(src, dst);

        /// `self = m * self`
        fn mul / mul_n [M: Mat4R + ?Sized] (m: &M)
            => |src, dst| utils4::mul(m.cells(), src, dst);

        /// `self = self * m`
        fn rev_mul / rev_mul_n [M: Mat4R + ?Sized] (m: &M)
            => |src, dst| utils4::mul(src, m.cells(), dst);
    );

    /// Swaps the cells across the diagonal.
    #[inline]
    fn transpose(&mut self) -> &mut Self {
        utils4::transpose_in_place(self.cells_mut());
        self
    }

    /// Returns the transposed matrix and leaves `self` untouched.
    #[inline]
    fn transpose_n(&self) -> Self
    where
        Self: Sized,
    {
        let mut out = utils4::zero();
        utils4::transpose(self.cells(), &mut out);
        Self::from_cells(out)
    }
}

impl Mat4R for Cells {
    #[inline]
    fn cells(&self) -> &Cells {
        self
    }
}

impl Mat4W for Cells {
    #[inline]
    fn cells_mut(&mut self) -> &mut Cells {
        self
    }

    #[inline]
    fn from_cells(cells: Cells) -> Self {
        cells
    }
}

impl<'l, M: Mat4R + ?Sized> Mat4R for &'l M {
    #[inline]
    fn cells(&self) -> &Cells {
        (*self).cells()
    }
}

#[test]
fn test_cell_accessors() {
    let mut m = utils4::identity();
    m.set_m03(5.0).set_m10(2.0);
    assert_eq!(m.m03(), 5.0);
    assert_eq!(m.at(0, 3), 5.0);
    assert_eq!(m.m10(), 2.0);
    assert_eq!(m[1], 2.0);
    assert_eq!(m.try_at(4, 0), Err(MatrixError::IndexOutOfRange { index: 4, len: 4 }));
    assert_eq!(m.try_at(0, 7), Err(MatrixError::IndexOutOfRange { index: 7, len: 4 }));
    assert_eq!(m.try_at(3, 3), Ok(1.0));
}

#[test]
#[should_panic]
fn test_at_out_of_range() {
    let m = utils4::identity();
    let _ = m.at(1, 4);
}

#[test]
#[should_panic]
fn test_set_row_out_of_range() {
    let mut m = utils4::identity();
    m.set_row(4, [9.0; 4]);
}

#[test]
fn test_bad_row_or_column_leaves_cells_alone() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let mut m = utils4::identity();
    assert!(catch_unwind(AssertUnwindSafe(|| {
        m.set_row(4, [9.0; 4]);
    }))
    .is_err());
    assert!(catch_unwind(AssertUnwindSafe(|| {
        m.set_col(4, [9.0; 4]);
    }))
    .is_err());
    assert_eq!(m, utils4::identity());
}

#[test]
#[should_panic(expected = "row 4 is out of range")]
fn test_row_out_of_range() {
    let m = utils4::identity();
    let _ = m.row(4);
}

#[test]
#[should_panic(expected = "column 4 is out of range")]
fn test_col_out_of_range() {
    let m = utils4::identity();
    let _ = m.col(4);
}

#[test]
fn test_rows_and_columns() {
    let mut m = utils4::zero();
    m.set_row(1, [1.0, 2.0, 3.0, 4.0]);
    m.set_col_tup(3, &[9.0f32, 8.0, 7.0, 6.0]);

    assert_eq!(m.row(1), [1.0, 2.0, 3.0, 8.0]);
    assert_eq!(m.col(3), [9.0, 8.0, 7.0, 6.0]);

    let mut buf = [0.0; 4];
    assert_eq!(*m.row_into(1, &mut buf), [1.0, 2.0, 3.0, 8.0]);
    assert_eq!(*m.col_into(0, &mut buf), [0.0, 1.0, 0.0, 0.0]);

    let row_major = m.to_array_row_major();
    assert_eq!(&row_major[4..8], &[1.0, 2.0, 3.0, 8.0]);
}

#[test]
fn test_transform_variants() {
    let m = utils4::translation(1.0, 2.0, 3.0);

    let mut out = [0.0f32; 3];
    m.transform_point3_into(&[1.0f32, 1.0, 1.0], &mut out);
    assert_eq!(out, [2.0, 3.0, 4.0]);

    let sum = m.transform_vec3_with(&(1.0f32, 1.0f32, 1.0f32), |x, y, z| x + y + z);
    assert_eq!(sum, 3.0);

    let mut out2 = (0.0f32, 0.0f32);
    m.transform2_into(true, &[0.0f32, 0.0], &mut out2);
    assert_eq!(out2, (1.0, 2.0));

    let w = m.transform4_with(&[0.0f32, 0.0, 0.0, 2.0], |_, _, _, w| w);
    assert_eq!(w, 2.0);
}
