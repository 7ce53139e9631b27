//! # Densify Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use plan_lib::{
    densify::MotionProfile,
    edit::PathEditSession,
    field::SideRestriction,
    geom::Point,
};
use plan_if::edit::{ActuatorCmd, EditCmd};

/// Build a long zig-zag path alternating straight and curved segments across the field.
fn build_session() -> PathEditSession {
    let mut session = PathEditSession::with_restriction(SideRestriction::None);

    session.place_straight(Point::new(10.0, 10.0)).unwrap();

    for i in 0..40 {
        let y = 10.0 + 8.0 * i as f64;
        if i % 2 == 0 {
            session.place_straight(Point::new(350.0, y)).unwrap();
        } else {
            session.place_curve(Point::new(10.0, y)).unwrap();
            session
                .apply(&EditCmd::CurveFinalize {
                    x: 180.0,
                    y: y + 60.0,
                })
                .unwrap();
        }
    }

    session.select(5).unwrap();
    session.assign_command(ActuatorCmd::Clasp).unwrap();
    session.select(10).unwrap();
    session.assign_command(ActuatorCmd::Scoop).unwrap();
    session.select(20).unwrap();
    session.assign_command(ActuatorCmd::Release).unwrap();

    session
}

fn densify_benchmark(c: &mut Criterion) {
    let session = build_session();
    let profile = MotionProfile::default();

    c.bench_function("densify segments", |b| {
        b.iter(|| {
            session
                .path()
                .segments()
                .map(|s| profile.densify(black_box(&s)).len())
                .sum::<usize>()
        })
    });

    c.bench_function("compile path", |b| {
        b.iter(|| session.compile(black_box(&profile)).unwrap())
    });

    let instrs = session.compile(&profile).unwrap();
    c.bench_function("render artifacts", |b| {
        b.iter(|| {
            (
                plan_lib::export::to_struct_array(black_box(&instrs)),
                plan_lib::export::to_transcript(black_box(&instrs)),
            )
        })
    });
}

criterion_group!(benches, densify_benchmark);
criterion_main!(benches);
