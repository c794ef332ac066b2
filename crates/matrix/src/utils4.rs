//! The 4x4 matrix algorithms.
//!
//! Everything here works on bare column-major [`Cells`], where cell
//! `(row, col)` lives at `col * 4 + row`. The functions that produce a matrix
//! write into a `dst` borrowed mutably while the inputs are borrowed shared, so
//! a source can never alias its destination. In-place callers copy the 16
//! cells out first.
//!
//! None of these functions check for numeric degeneracy. A singular matrix, a
//! zero rotation axis or a zero scale produce infinities and NaNs according to
//! the usual IEEE-754 rules.

use crate::scalar::{self, det2, fma};

pub type Cells = [f32; 16];

#[inline]
pub const fn index(row: usize, col: usize) -> usize {
    col * 4 + row
}

#[inline]
pub fn identity() -> Cells {
    [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

#[inline]
pub fn zero() -> Cells {
    [0.0; 16]
}

#[inline]
pub fn trace(m: &Cells) -> f32 {
    m[0] + m[5] + m[10] + m[15]
}

#[inline]
pub fn row(m: &Cells, i: usize) -> [f32; 4] {
    [m[i], m[4 + i], m[8 + i], m[12 + i]]
}

#[inline]
pub fn col(m: &Cells, i: usize) -> [f32; 4] {
    let c = i * 4;
    [m[c], m[c + 1], m[c + 2], m[c + 3]]
}

/// The twelve 2x2 minors formed by the first two and the last two columns.
///
/// `b[0..6]` pair up columns 0 and 1, `b[6..12]` columns 2 and 3. Both the
/// determinant and the adjugate are assembled from these.
#[inline]
fn minors(m: &Cells) -> [f32; 12] {
    let (a00, a01, a02, a03) = (m[0], m[1], m[2], m[3]);
    let (a10, a11, a12, a13) = (m[4], m[5], m[6], m[7]);
    let (a20, a21, a22, a23) = (m[8], m[9], m[10], m[11]);
    let (a30, a31, a32, a33) = (m[12], m[13], m[14], m[15]);

    [
        det2(a00, a01, a10, a11),
        det2(a00, a02, a10, a12),
        det2(a00, a03, a10, a13),
        det2(a01, a02, a11, a12),
        det2(a01, a03, a11, a13),
        det2(a02, a03, a12, a13),
        det2(a20, a21, a30, a31),
        det2(a20, a22, a30, a32),
        det2(a20, a23, a30, a33),
        det2(a21, a22, a31, a32),
        det2(a21, a23, a31, a33),
        det2(a22, a23, a32, a33),
    ]
}

#[inline]
fn det_from_minors(b: &[f32; 12]) -> f32 {
    let d = det2(b[0], b[1], b[10], b[11]);
    let d = fma(b[2], b[9], d);
    let d = fma(b[3], b[8], d);
    let d = fma(-b[4], b[7], d);
    fma(b[5], b[6], d)
}

/// `p * x - q * y + r * z`
#[inline]
fn cofactor(p: f32, x: f32, q: f32, y: f32, r: f32, z: f32) -> f32 {
    fma(r, z, det2(p, q, y, x))
}

pub fn det(m: &Cells) -> f32 {
    det_from_minors(&minors(m))
}

/// Writes the adjugate of `src` divided by its determinant into `dst`.
pub fn invert(src: &Cells, dst: &mut Cells) {
    let (a00, a01, a02, a03) = (src[0], src[1], src[2], src[3]);
    let (a10, a11, a12, a13) = (src[4], src[5], src[6], src[7]);
    let (a20, a21, a22, a23) = (src[8], src[9], src[10], src[11]);
    let (a30, a31, a32, a33) = (src[12], src[13], src[14], src[15]);

    let b = minors(src);
    let det = det_from_minors(&b);
    if det == 0.0 || !det.is_finite() {
        log::trace!("inverting a matrix with determinant {}, the result is not finite", det);
    }

    let inv = 1.0 / det;

    dst[0] = cofactor(a11, b[11], a12, b[10], a13, b[9]) * inv;
    dst[1] = cofactor(a02, b[10], a01, b[11], -a03, b[9]) * inv;
    dst[2] = cofactor(a31, b[5], a32, b[4], a33, b[3]) * inv;
    dst[3] = cofactor(a22, b[4], a21, b[5], -a23, b[3]) * inv;
    dst[4] = cofactor(a12, b[8], a10, b[11], -a13, b[7]) * inv;
    dst[5] = cofactor(a00, b[11], a02, b[8], a03, b[7]) * inv;
    dst[6] = cofactor(a32, b[2], a30, b[5], -a33, b[1]) * inv;
    dst[7] = cofactor(a20, b[5], a22, b[2], a23, b[1]) * inv;
    dst[8] = cofactor(a10, b[10], a11, b[8], a13, b[6]) * inv;
    dst[9] = cofactor(a01, b[8], a00, b[10], -a03, b[6]) * inv;
    dst[10] = cofactor(a30, b[4], a31, b[2], a33, b[0]) * inv;
    dst[11] = cofactor(a21, b[2], a20, b[4], -a23, b[0]) * inv;
    dst[12] = cofactor(a11, b[7], a10, b[9], -a12, b[6]) * inv;
    dst[13] = cofactor(a00, b[9], a01, b[7], a02, b[6]) * inv;
    dst[14] = cofactor(a31, b[1], a30, b[3], -a32, b[0]) * inv;
    dst[15] = cofactor(a20, b[3], a21, b[1], a22, b[0]) * inv;
}

/// `dst = a * b`
pub fn mul(a: &Cells, b: &Cells, dst: &mut Cells) {
    for c in 0..4 {
        let k = c * 4;
        for r in 0..4 {
            let acc = a[r] * b[k];
            let acc = fma(a[4 + r], b[k + 1], acc);
            let acc = fma(a[8 + r], b[k + 2], acc);
            dst[k + r] = fma(a[12 + r], b[k + 3], acc);
        }
    }
}

pub fn transpose(src: &Cells, dst: &mut Cells) {
    for c in 0..4 {
        for r in 0..4 {
            dst[index(r, c)] = src[index(c, r)];
        }
    }
}

pub fn transpose_in_place(m: &mut Cells) {
    m.swap(1, 4);
    m.swap(2, 8);
    m.swap(3, 12);
    m.swap(6, 9);
    m.swap(7, 13);
    m.swap(11, 14);
}

/// Writes the row-major reading of `src` into `dst`.
#[inline]
pub fn row_major(src: &Cells, dst: &mut Cells) {
    transpose(src, dst);
}

/// Multiplies the column vector `(x, y, z, w)` by `m`.
#[inline]
pub fn transform4(m: &Cells, x: f32, y: f32, z: f32, w: f32) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (r, v) in out.iter_mut().enumerate() {
        let acc = m[r] * x;
        let acc = fma(m[4 + r], y, acc);
        let acc = fma(m[8 + r], z, acc);
        *v = fma(m[12 + r], w, acc);
    }
    out
}

#[inline]
pub fn transform3(m: &Cells, is_point: bool, x: f32, y: f32, z: f32) -> [f32; 3] {
    let w = if is_point { 1.0 } else { 0.0 };
    let [rx, ry, rz, _] = transform4(m, x, y, z, w);
    [rx, ry, rz]
}

#[inline]
pub fn transform2(m: &Cells, is_point: bool, x: f32, y: f32) -> [f32; 2] {
    let w = if is_point { 1.0 } else { 0.0 };
    let [rx, ry, _, _] = transform4(m, x, y, 0.0, w);
    [rx, ry]
}

#[inline]
pub fn transform_point3(m: &Cells, x: f32, y: f32, z: f32) -> [f32; 3] {
    transform3(m, true, x, y, z)
}

#[inline]
pub fn transform_vec3(m: &Cells, x: f32, y: f32, z: f32) -> [f32; 3] {
    transform3(m, false, x, y, z)
}

#[inline]
pub fn transform_point2(m: &Cells, x: f32, y: f32) -> [f32; 2] {
    transform2(m, true, x, y)
}

#[inline]
pub fn transform_vec2(m: &Cells, x: f32, y: f32) -> [f32; 2] {
    transform2(m, false, x, y)
}

pub fn translation(x: f32, y: f32, z: f32) -> Cells {
    let mut m = identity();
    m[12] = x;
    m[13] = y;
    m[14] = z;
    m
}

pub fn scaling(x: f32, y: f32, z: f32, w: f32) -> Cells {
    let mut m = zero();
    m[0] = x;
    m[5] = y;
    m[10] = z;
    m[15] = w;
    m
}

/// `dst = src * translation(x, y, z)`
pub fn translate(src: &Cells, x: f32, y: f32, z: f32, dst: &mut Cells) {
    dst[..12].copy_from_slice(&src[..12]);
    for r in 0..4 {
        let acc = fma(src[r], x, src[12 + r]);
        let acc = fma(src[4 + r], y, acc);
        dst[12 + r] = fma(src[8 + r], z, acc);
    }
}

/// `dst = src * scaling(x, y, z, w)`
pub fn scale(src: &Cells, x: f32, y: f32, z: f32, w: f32, dst: &mut Cells) {
    let s = [x, y, z, w];
    for (i, v) in dst.iter_mut().enumerate() {
        *v = src[i] * s[i / 4];
    }
}

/// The upper 3x3 block of a rotation of `rad` radians around `axis`, as three
/// columns.
///
/// The axis does not need to be normalized. A zero-length axis yields NaNs.
fn rotation_block(axis: [f32; 3], rad: f32) -> [[f32; 3]; 3] {
    let [ax, ay, az] = axis;
    let inv_len = 1.0 / scalar::sqrt(fma(ax, ax, fma(ay, ay, az * az)));
    let x = ax * inv_len;
    let y = ay * inv_len;
    let z = az * inv_len;

    let (s, c) = scalar::sin_cos(rad);
    let t = 1.0 - c;

    [
        [x * x * t + c, y * x * t + z * s, z * x * t - y * s],
        [x * y * t - z * s, y * y * t + c, z * y * t + x * s],
        [x * z * t + y * s, y * z * t - x * s, z * z * t + c],
    ]
}

fn with_upper3(block: [[f32; 3]; 3]) -> Cells {
    let mut m = identity();
    for (c, column) in block.iter().enumerate() {
        m[c * 4..c * 4 + 3].copy_from_slice(column);
    }
    m
}

/// `dst = src * B` where `B` is `block` padded to 4x4 with identity.
fn mul_upper3(src: &Cells, block: [[f32; 3]; 3], dst: &mut Cells) {
    for (c, b) in block.iter().enumerate() {
        for r in 0..4 {
            let acc = src[r] * b[0];
            let acc = fma(src[4 + r], b[1], acc);
            dst[c * 4 + r] = fma(src[8 + r], b[2], acc);
        }
    }
    dst[12..].copy_from_slice(&src[12..]);
}

/// A rotation of `rad` radians around `axis`, counter-clockwise when looking
/// from the tip of the axis towards the origin.
pub fn rotation(axis: [f32; 3], rad: f32) -> Cells {
    with_upper3(rotation_block(axis, rad))
}

/// `dst = src * rotation(axis, rad)`
pub fn rotate(src: &Cells, axis: [f32; 3], rad: f32, dst: &mut Cells) {
    mul_upper3(src, rotation_block(axis, rad), dst);
}

/// The rotation described by the quaternion `x*i + y*j + z*k + w`.
///
/// The quaternion is used as is, without being normalized.
pub fn rotation_quat(x: f32, y: f32, z: f32, w: f32) -> Cells {
    let (x2, y2, z2) = (x + x, y + y, z + z);
    let (xx, xy, xz) = (x * x2, x * y2, x * z2);
    let (yy, yz, zz) = (y * y2, y * z2, z * z2);
    let (wx, wy, wz) = (w * x2, w * y2, w * z2);

    with_upper3([
        [1.0 - (yy + zz), xy + wz, xz - wy],
        [xy - wz, 1.0 - (xx + zz), yz + wx],
        [xz + wy, yz - wx, 1.0 - (xx + yy)],
    ])
}

/// Places `u`, `v` and `w` in the first three columns.
pub fn base_changing(u: [f32; 3], v: [f32; 3], w: [f32; 3]) -> Cells {
    with_upper3([u, v, w])
}

/// `dst = src * base_changing(u, v, w)`
pub fn base_change(src: &Cells, u: [f32; 3], v: [f32; 3], w: [f32; 3], dst: &mut Cells) {
    mul_upper3(src, [u, v, w], dst);
}

/// OpenGL style perspective projection, `fov_y` in radians.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Cells {
    let f = 1.0 / scalar::tan(fov_y / 2.0);
    let nf = 1.0 / (near - far);

    let mut m = zero();
    m[0] = f / aspect;
    m[5] = f;
    m[10] = (far + near) * nf;
    m[11] = -1.0;
    m[14] = (2.0 * far * near) * nf;
    m
}

/// OpenGL style orthographic projection.
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Cells {
    let mut m = identity();
    m[0] = 2.0 / (right - left);
    m[5] = 2.0 / (top - bottom);
    m[10] = -2.0 / (far - near);
    m[12] = -(right + left) / (right - left);
    m[13] = -(top + bottom) / (top - bottom);
    m[14] = -(far + near) / (far - near);
    m
}

#[cfg(test)]
fn assert_cells_approx_eq(a: &Cells, b: &Cells) {
    for i in 0..16 {
        assert!(
            scalar::approx_eq(a[i], b[i]),
            "cell {} differs: {:?} vs {:?}",
            i,
            a,
            b
        );
    }
}

#[test]
fn test_det() {
    assert_eq!(det(&identity()), 1.0);
    assert_eq!(det(&zero()), 0.0);
    assert_eq!(det(&scaling(2.0, 3.0, 4.0, 1.0)), 24.0);

    // Swapping two rows flips the sign.
    let mut m = identity();
    m.swap(0, 1);
    m.swap(4, 5);
    assert_eq!(det(&m), -1.0);

    // | 1 2 3 4 |
    // | 5 6 7 8 |    det = 0, the rows are linearly dependent.
    // | 2 4 6 8 |
    // | 0 0 0 1 |
    let dependent = [
        1.0, 5.0, 2.0, 0.0,
        2.0, 6.0, 4.0, 0.0,
        3.0, 7.0, 6.0, 0.0,
        4.0, 8.0, 8.0, 1.0,
    ];
    assert_eq!(det(&dependent), 0.0);
}

#[test]
fn test_invert() {
    let mut m = zero();
    let mut inv = zero();
    let mut product = zero();

    let t = translation(1.0, -2.0, 3.0);
    invert(&t, &mut inv);
    assert_cells_approx_eq(&inv, &translation(-1.0, 2.0, -3.0));

    rotate(&t, [1.0, 1.0, 0.0], 0.7, &mut m);
    invert(&m, &mut inv);
    mul(&m, &inv, &mut product);
    assert_cells_approx_eq(&product, &identity());
}

#[test]
fn test_invert_singular() {
    let mut inv = identity();
    invert(&zero(), &mut inv);
    assert!(inv.iter().all(|v| !v.is_finite()));
}

#[test]
fn test_mul_order() {
    let t = translation(1.0, 0.0, 0.0);
    let s = scaling(2.0, 2.0, 2.0, 1.0);
    let mut ts = zero();
    let mut st = zero();
    mul(&t, &s, &mut ts);
    mul(&s, &t, &mut st);

    assert_eq!(transform_point3(&ts, 1.0, 0.0, 0.0), [3.0, 0.0, 0.0]);
    assert_eq!(transform_point3(&st, 1.0, 0.0, 0.0), [4.0, 0.0, 0.0]);
}

#[test]
fn test_translate_and_scale_match_mul() {
    let mut base = zero();
    rotate(&identity(), [0.0, 0.0, 1.0], 0.3, &mut base);

    let mut a = zero();
    let mut b = zero();
    translate(&base, 1.0, 2.0, 3.0, &mut a);
    mul(&base, &translation(1.0, 2.0, 3.0), &mut b);
    assert_cells_approx_eq(&a, &b);

    scale(&base, 2.0, 3.0, 4.0, 1.0, &mut a);
    mul(&base, &scaling(2.0, 3.0, 4.0, 1.0), &mut b);
    assert_cells_approx_eq(&a, &b);

    rotate(&base, [1.0, 0.0, 0.0], 1.1, &mut a);
    mul(&base, &rotation([1.0, 0.0, 0.0], 1.1), &mut b);
    assert_cells_approx_eq(&a, &b);
}

#[test]
fn test_transpose() {
    let mut m = [0.0; 16];
    for (i, v) in m.iter_mut().enumerate() {
        *v = i as f32;
    }
    let mut t = zero();
    transpose(&m, &mut t);
    assert_eq!(row(&t, 1), col(&m, 1));

    let mut in_place = m;
    transpose_in_place(&mut in_place);
    assert_eq!(in_place, t);
}

#[test]
fn test_rotation() {
    let r = rotation([0.0, 1.0, 0.0], core::f32::consts::FRAC_PI_2);
    let p = transform_point3(&r, 1.0, 0.0, 0.0);
    assert!(scalar::approx_eq(p[0], 0.0));
    assert!(scalar::approx_eq(p[1], 0.0));
    assert!(scalar::approx_eq(p[2], -1.0));

    // The axis is normalized.
    assert_cells_approx_eq(
        &rotation([0.0, 0.0, 5.0], 0.5),
        &rotation([0.0, 0.0, 1.0], 0.5),
    );

    let degenerate = rotation([0.0, 0.0, 0.0], 0.5);
    assert!(degenerate[0].is_nan());
    assert_eq!(degenerate[15], 1.0);
}

#[test]
fn test_rotation_quat() {
    // 90 degrees around z.
    let h = core::f32::consts::FRAC_1_SQRT_2;
    assert_cells_approx_eq(
        &rotation_quat(0.0, 0.0, h, h),
        &rotation([0.0, 0.0, 1.0], core::f32::consts::FRAC_PI_2),
    );
    assert_eq!(rotation_quat(0.0, 0.0, 0.0, 1.0), identity());

    // A general axis.
    let [ax, ay, az] = [1.0f32, 2.0, 3.0];
    let len = scalar::sqrt(ax * ax + ay * ay + az * az);
    let (s, c) = scalar::sin_cos(0.45);
    assert_cells_approx_eq(
        &rotation_quat(ax / len * s, ay / len * s, az / len * s, c),
        &rotation([ax, ay, az], 0.9),
    );
}

#[test]
fn test_rotation_quat_is_not_normalized() {
    // (0, 0, 2, 0) is twice the half turn around z. Normalizing it would give
    // -1 on the first two diagonal cells.
    let m = rotation_quat(0.0, 0.0, 2.0, 0.0);
    assert_eq!(m[0], -7.0);
    assert_eq!(m[5], -7.0);
    assert_eq!(m[10], 1.0);
    assert_eq!(col(&m, 0), [-7.0, 0.0, 0.0, 0.0]);

    let unit = rotation_quat(0.0, 0.0, 1.0, 0.0);
    assert_eq!(unit[0], -1.0);
    assert_eq!(unit[5], -1.0);
}

#[test]
fn test_projections() {
    let p = perspective(core::f32::consts::FRAC_PI_2, 2.0, 1.0, 10.0);
    // A point on the near plane maps to z = -1 after the perspective divide.
    let [x, y, z, w] = transform4(&p, 1.0, 1.0, -1.0, 1.0);
    assert!(scalar::approx_eq(w, 1.0));
    assert!(scalar::approx_eq(x / w, 0.5));
    assert!(scalar::approx_eq(y / w, 1.0));
    assert!(scalar::approx_eq(z / w, -1.0));
    // And on the far plane to z = 1.
    let [_, _, z, w] = transform4(&p, 0.0, 0.0, -10.0, 1.0);
    assert!(scalar::approx_eq(z / w, 1.0));

    let o = ortho(0.0, 800.0, 0.0, 600.0, -1.0, 1.0);
    let [x, y, z, w] = transform4(&o, 800.0, 0.0, 0.0, 1.0);
    assert!(scalar::approx_eq(x, 1.0));
    assert!(scalar::approx_eq(y, -1.0));
    assert!(scalar::approx_eq(z, 0.0));
    assert_eq!(w, 1.0);
}

#[test]
fn test_base_change() {
    let m = base_changing([0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
    assert_eq!(transform_vec3(&m, 1.0, 0.0, 0.0), [0.0, 1.0, 0.0]);
    assert_eq!(transform_vec3(&m, 0.0, 2.0, 0.0), [-2.0, 0.0, 0.0]);

    let mut composed = zero();
    base_change(&translation(1.0, 1.0, 1.0), [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], &mut composed);
    assert_eq!(transform_point3(&composed, 1.0, 0.0, 0.0), [1.0, 2.0, 1.0]);
}
