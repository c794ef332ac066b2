extern crate tupmath;
#[macro_use]
extern crate bencher;

use bencher::{black_box, Bencher};

use tupmath::matrix::utils4;
use tupmath::{Mat4F, Mat4R, Mat4W};

const N: usize = 100;

fn model() -> Mat4F {
    Mat4F::identity()
        .translate3_n(1.0, 2.0, 3.0)
        .rotate_deg_n(0.3, 1.0, 0.2, 33.0)
        .scale3_n(1.5, 1.5, 1.5)
}

fn mul(bench: &mut Bencher) {
    let a = model();
    let b = Mat4F::identity().set_perspective_deg_n(60.0, 1.5, 0.1, 100.0);
    bench.iter(|| {
        let mut m = a;
        for _ in 0..N {
            m.rev_mul(black_box(&b));
        }
        m
    });
}

fn mul_raw(bench: &mut Bencher) {
    let a = model().to_array();
    let b = utils4::identity();
    let mut out = utils4::zero();
    bench.iter(|| {
        for _ in 0..N {
            utils4::mul(black_box(&a), black_box(&b), &mut out);
        }
        out
    });
}

fn invert(bench: &mut Bencher) {
    let a = model();
    bench.iter(|| {
        let mut m = a;
        for _ in 0..N {
            m.invert();
        }
        m
    });
}

fn det(bench: &mut Bencher) {
    let a = model();
    bench.iter(|| {
        let mut acc = 0.0;
        for _ in 0..N {
            acc += black_box(&a).det();
        }
        acc
    });
}

fn rotate(bench: &mut Bencher) {
    bench.iter(|| {
        let mut m = Mat4F::identity();
        for i in 0..N {
            m.rotate_deg(0.0, 1.0, 0.0, i as f32);
        }
        m
    });
}

fn transform_points(bench: &mut Bencher) {
    let m = model();
    let mut points = [[0.0f32; 3]; 64];
    for (i, p) in points.iter_mut().enumerate() {
        *p = [i as f32, 1.0, -(i as f32)];
    }
    bench.iter(|| {
        let mut out = [0.0f32; 3];
        for p in &points {
            m.transform_point3_into(black_box(p), &mut out);
        }
        out
    });
}

benchmark_group!(products, mul, mul_raw, det);
benchmark_group!(inverse, invert);
benchmark_group!(transforms, rotate, transform_points);

benchmark_main!(products, inverse, transforms);
