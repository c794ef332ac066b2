use crate::scalar;
use crate::utils4::{self, Cells};
use crate::{Mat4F, Mat4R, Mat4W, MatrixError};

use core::convert::TryFrom;

fn bits(m: &impl Mat4R) -> [u32; 16] {
    let mut out = [0; 16];
    for (o, c) in out.iter_mut().zip(m.cells().iter()) {
        *o = c.to_bits();
    }
    out
}

#[rustfmt::skip]
fn samples() -> [Mat4F; 4] {
    [
        Mat4F::identity(),
        Mat4F::identity()
            .translate3_n(1.0, -2.0, 3.5)
            .rotate_deg_n(1.0, 1.0, 0.0, 35.0)
            .scale3_n(0.5, 2.0, 1.5),
        Mat4F::identity().set_perspective_deg_n(60.0, 1.5, 0.1, 100.0),
        Mat4F::new(
            2.0, 0.5, 0.0, 1.0,
            0.0, 1.0, 3.0, -1.0,
            1.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.25, 1.0,
        ),
    ]
}

// Runs the in-place and the `_n` flavour of an operation and checks that they
// agree to the bit while the `_n` flavour leaves its receiver alone.
macro_rules! assert_flavours_agree {
    ($m:expr, $op:ident / $op_n:ident ($($arg:expr),*)) => {{
        let original: Mat4F = $m;
        let mut in_place = original;
        in_place.$op($($arg),*);
        let fresh = original.$op_n($($arg),*);
        assert_eq!(bits(&in_place), bits(&fresh), "{}", stringify!($op));
        assert_eq!(bits(&original), bits(&$m));
    }};
}

#[test]
fn identity_is_neutral() {
    for m in &samples() {
        let i = Mat4F::identity();
        assert_eq!(*m * i, *m);
        assert_eq!(i * *m, *m);
        assert_eq!(m.mul_n(&i), *m);
        assert_eq!(m.rev_mul_n(&i), *m);
    }
}

#[test]
fn inverse_law() {
    for m in &samples() {
        let inv = m.invert_n();
        assert!((*m * inv).approx_eq(&Mat4F::identity()), "{:?}", m);
        assert!((inv * *m).approx_eq(&Mat4F::identity()), "{:?}", m);
    }
}

#[test]
fn transpose_is_an_involution() {
    for m in &samples() {
        assert_eq!(bits(&m.transpose_n().transpose_n()), bits(m));

        let mut t = *m;
        t.transpose().transpose();
        assert_eq!(bits(&t), bits(m));

        assert_eq!(m.transpose_n().to_array(), m.to_array_row_major());
    }
}

#[test]
fn in_place_and_fresh_flavours_agree() {
    let u = euclid::vec3::<f32, euclid::UnknownUnit>(0.0, 1.0, 0.0);
    let v = [-1.0f32, 0.0, 0.0];
    let w = (0.0f32, 0.0f32, 1.0f32);
    for m in &samples() {
        let other = samples()[1];

        assert_flavours_agree!(*m, set_zero / set_zero_n());
        assert_flavours_agree!(*m, set_identity / set_identity_n());
        assert_flavours_agree!(*m, set_translation2 / set_translation2_n(1.0, 2.0));
        assert_flavours_agree!(*m, set_translation3 / set_translation3_n(1.0, 2.0, 3.0));
        assert_flavours_agree!(*m, set_scaling2 / set_scaling2_n(2.0, 3.0));
        assert_flavours_agree!(*m, set_scaling3 / set_scaling3_n(2.0, 3.0, 4.0));
        assert_flavours_agree!(*m, set_scaling4 / set_scaling4_n(2.0, 3.0, 4.0, 5.0));
        assert_flavours_agree!(*m, set_base_changing / set_base_changing_n(&u, &v, &w));
        assert_flavours_agree!(*m, set_rotation_rad / set_rotation_rad_n(1.0, 2.0, 3.0, 0.7));
        assert_flavours_agree!(*m, set_rotation_deg / set_rotation_deg_n(1.0, 2.0, 3.0, 40.0));
        assert_flavours_agree!(*m, set_rotation_quat / set_rotation_quat_n(0.0, 0.0, 0.0, 1.0));
        assert_flavours_agree!(*m, set_perspective / set_perspective_n(1.0, 1.5, 0.1, 10.0));
        assert_flavours_agree!(*m, set_perspective_deg / set_perspective_deg_n(45.0, 1.5, 0.1, 10.0));
        assert_flavours_agree!(*m, set_ortho / set_ortho_n(-1.0, 1.0, -2.0, 2.0, 0.1, 10.0));

        assert_flavours_agree!(*m, translate2 / translate2_n(1.0, 2.0));
        assert_flavours_agree!(*m, translate3 / translate3_n(1.0, 2.0, 3.0));
        assert_flavours_agree!(*m, scale2 / scale2_n(2.0, 3.0));
        assert_flavours_agree!(*m, scale3 / scale3_n(2.0, 3.0, 4.0));
        assert_flavours_agree!(*m, scale4 / scale4_n(2.0, 3.0, 4.0, 5.0));
        assert_flavours_agree!(*m, base_change / base_change_n(&u, &v, &w));
        assert_flavours_agree!(*m, rotate_rad / rotate_rad_n(0.0, 1.0, 1.0, 1.2));
        assert_flavours_agree!(*m, rotate_deg / rotate_deg_n(0.0, 1.0, 1.0, 70.0));
        assert_flavours_agree!(*m, invert / invert_n());
        assert_flavours_agree!(*m, mul / mul_n(&other));
        assert_flavours_agree!(*m, rev_mul / rev_mul_n(&other));
        assert_flavours_agree!(*m, transpose / transpose_n());
    }
}

#[test]
fn determinants() {
    assert_eq!(Mat4F::identity().det(), 1.0);
    assert_eq!(Mat4F::zero().det(), 0.0);

    let s = Mat4F::identity().set_scaling3_n(2.0, 3.0, 4.0);
    assert!(scalar::approx_eq(s.det(), 24.0));

    let r = Mat4F::identity().set_rotation_deg_n(1.0, -2.0, 0.5, 123.0);
    assert!(scalar::approx_eq(r.det(), 1.0));

    for m in &samples() {
        let inv = m.invert_n();
        let d = m.det() * inv.det();
        assert!(scalar::approx_eq(d, 1.0), "{}", d);
    }
}

#[test]
fn translation_ignores_vectors() {
    let t = Mat4F::identity().set_translation3_n(5.0, -6.0, 7.0);
    assert_eq!(t.transform_vec3(&[1.0f32, 2.0, 3.0]), [1.0, 2.0, 3.0]);
    assert_eq!(t.transform_point3(&[1.0f32, 2.0, 3.0]), [6.0, -4.0, 10.0]);
    assert_eq!(t.transform_vec2(&[1.0f32, 2.0]), [1.0, 2.0]);
    assert_eq!(t.transform_point2(&[1.0f32, 2.0]), [6.0, -4.0]);
}

#[test]
fn translate_then_scale() {
    let m = Mat4F::identity()
        .translate3_n(1.0, 2.0, 3.0)
        .scale3_n(2.0, 2.0, 2.0);

    assert_eq!(m.transform_point3(&[0.0f32, 0.0, 0.0]), [1.0, 2.0, 3.0]);
    assert_eq!(m.transform_point3(&[1.0f32, 1.0, 1.0]), [3.0, 4.0, 5.0]);
    assert_eq!(m.transform_vec3(&[1.0f32, 0.0, 0.0]), [2.0, 0.0, 0.0]);
}

#[test]
fn rotation_is_right_handed() {
    let y = Mat4F::identity().rotate_deg_n(0.0, 1.0, 0.0, 90.0);
    let p = y.transform_point3(&[1.0f32, 0.0, 0.0]);
    assert!(scalar::approx_eq(p[0], 0.0));
    assert!(scalar::approx_eq(p[1], 0.0));
    assert!(scalar::approx_eq(p[2], -1.0));

    let z = Mat4F::identity().rotate_deg_n(0.0, 0.0, 1.0, 90.0);
    let p = z.transform_point3(&[1.0f32, 0.0, 0.0]);
    assert!(scalar::approx_eq(p[0], 0.0));
    assert!(scalar::approx_eq(p[1], 1.0));

    // The axis does not need to be normalized.
    let z2 = Mat4F::identity().rotate_deg_n(0.0, 0.0, 5.0, 90.0);
    assert!(z.approx_eq(&z2));
}

#[test]
fn rotation_around_zero_axis_is_nan() {
    let m = Mat4F::identity().rotate_rad_n(0.0, 0.0, 0.0, 1.0);
    assert!(!m.is_finite());
    assert!(m.m00().is_nan());
    // The translation column is left alone.
    assert_eq!(m.col(3), [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn singular_inverse_does_not_panic() {
    let mut m = Mat4F::identity().set_scaling3_n(1.0, 0.0, 1.0);
    m.invert();
    assert!(!m.is_finite());
    assert_eq!(Mat4F::identity().set_scaling3_n(1.0, 0.0, 1.0).checked_inverse(), None);
}

#[test]
fn perspective_maps_near_and_far_planes() {
    let (near, far) = (0.5, 50.0);
    let m = Mat4F::identity().set_perspective_deg_n(90.0, 2.0, near, far);

    let n = m.transform4(&[0.0f32, 0.0, -near, 1.0]);
    assert!(scalar::approx_eq(n[2] / n[3], -1.0));

    let f = m.transform4(&[0.0f32, 0.0, -far, 1.0]);
    assert!(scalar::approx_eq(f[2] / f[3], 1.0));

    // With a 90 degree field of view the top of the frustum sits at y = -z.
    let top = m.transform4(&[0.0f32, 1.0, -1.0, 1.0]);
    assert!(scalar::approx_eq(top[1] / top[3], 1.0));
    let right = m.transform4(&[2.0f32, 0.0, -1.0, 1.0]);
    assert!(scalar::approx_eq(right[0] / right[3], 1.0));
}

#[test]
fn ortho_maps_the_box_to_the_unit_cube() {
    let m = Mat4F::identity().set_ortho_n(0.0, 800.0, 600.0, 0.0, -1.0, 1.0);
    let a = m.transform_point3(&[0.0f32, 0.0, 0.0]);
    let b = m.transform_point3(&[800.0f32, 600.0, 0.0]);
    assert!(scalar::approx_eq(a[0], -1.0));
    assert!(scalar::approx_eq(a[1], 1.0));
    assert!(scalar::approx_eq(b[0], 1.0));
    assert!(scalar::approx_eq(b[1], -1.0));
}

#[test]
fn base_change_uses_columns() {
    let m = Mat4F::identity().set_base_changing_n(
        &[0.0f32, 1.0, 0.0],
        &[-1.0f32, 0.0, 0.0],
        &[0.0f32, 0.0, 1.0],
    );
    assert_eq!(m.transform_vec3(&[1.0f32, 0.0, 0.0]), [0.0, 1.0, 0.0]);
    assert_eq!(m.transform_vec3(&[0.0f32, 1.0, 0.0]), [-1.0, 0.0, 0.0]);

    let r = Mat4F::identity().set_rotation_deg_n(0.0, 0.0, 1.0, 90.0);
    assert!(m.approx_eq(&r));
}

#[test]
fn arrays_round_trip() {
    let mut cells: Cells = [0.0; 16];
    for (i, c) in cells.iter_mut().enumerate() {
        *c = i as f32 * 0.5 - 3.0;
    }
    cells[5] = f32::NAN;
    cells[9] = f32::INFINITY;
    cells[10] = -0.0;

    let m = Mat4F::from_array(cells);
    assert_eq!(bits(&m.to_array()), bits(&cells));
    assert_eq!(bits(&Mat4F::from(cells)), bits(&cells));
    assert_eq!(bits(&Mat4F::try_from(&cells[..]).unwrap()), bits(&cells));
    assert_eq!(bits(&Mat4F::copy_of(&cells)), bits(&cells));

    assert_eq!(bits(&m.transpose_n().transpose_n()), bits(&cells));
    assert_eq!(bits(&Mat4F::from_array_row_major(m.to_array_row_major())), bits(&cells));

    let back: Cells = m.into();
    assert_eq!(bits(&back), bits(&cells));

    let mut out = [1.0; 16];
    m.to_array_into(&mut out);
    assert_eq!(bits(&out), bits(&cells));
}

#[test]
fn slice_errors() {
    assert_eq!(
        Mat4F::try_from(&[0.0f32; 4][..]),
        Err(MatrixError::SliceLength {
            expected: 16,
            found: 4
        })
    );
    assert_eq!(Mat4F::try_from(&[0.0f32; 0][..]).unwrap_err(), MatrixError::SliceLength {
        expected: 16,
        found: 0
    });
}

#[test]
fn agrees_with_euclid() {
    use euclid::default::Transform3D;
    use euclid::Angle;

    let ours = Mat4F::identity()
        .translate3_n(1.0, 2.0, 3.0)
        .rotate_rad_n(0.0, 0.0, 1.0, 0.5);

    // euclid's `then` applies its receiver first.
    let theirs: Transform3D<f32> = Transform3D::rotation(0.0, 0.0, 1.0, Angle::radians(0.5))
        .then(&Transform3D::translation(1.0, 2.0, 3.0));

    assert!(ours.approx_eq(&Mat4F::from(theirs)));

    let t: Transform3D<f32> = ours.into();
    let p = t.transform_point3d(euclid::point3(1.0, 1.0, 1.0)).unwrap();
    let q = ours.transform_point3(&[1.0f32, 1.0, 1.0]);
    assert!(scalar::approx_eq(p.x, q[0]));
    assert!(scalar::approx_eq(p.y, q[1]));
    assert!(scalar::approx_eq(p.z, q[2]));

    let inv = Mat4F::from(theirs.inverse().unwrap());
    assert!(inv.approx_eq(&ours.invert_n()));
}

#[test]
fn generic_over_storage() {
    fn place<M: Mat4W>(m: &mut M) {
        m.set_identity().translate2(3.0, 4.0).scale2(2.0, 2.0);
    }

    let mut cells = utils4::zero();
    place(&mut cells);
    let mut mat = Mat4F::zero();
    place(&mut mat);

    assert_eq!(bits(&cells), bits(&mat));
    assert_eq!(mat.transform_point2(&[1.0f32, 1.0]), [5.0, 6.0]);

    // Shared borrows are readable matrices too.
    let r = &mat;
    assert_eq!(Mat4F::copy_of(&r), mat);
    assert_eq!(Mat4F::identity().mul_n(&r), mat);
}

#[test]
fn writes_into_foreign_tuples() {
    let m = Mat4F::identity().set_translation2_n(1.0, 1.0);

    let mut p = euclid::default::Point2D::<f32>::origin();
    m.transform_point2_into(&euclid::point2::<f32, euclid::UnknownUnit>(1.0, 2.0), &mut p);
    assert_eq!(p, euclid::point2(2.0, 3.0));

    let mut h = [0.0f32; 4];
    m.transform4_into(&(1.0f32, 1.0f32, 1.0f32, 0.0f32), &mut h);
    assert_eq!(h, [1.0, 1.0, 1.0, 0.0]);

    let len2 = m.transform_point3_with(&[0.0f32; 3], |x, y, z| x * x + y * y + z * z);
    assert_eq!(len2, 2.0);
}
