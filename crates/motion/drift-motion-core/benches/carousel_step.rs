use criterion::{black_box, criterion_group, criterion_main, Criterion};
use drift_motion_core::{
    CarouselConfig, CarouselEngine, FollowerConfig, Point, PointerEnvironment, PointerFollower,
    TrackLayout, WheelInput,
};

fn bench_carousel(c: &mut Criterion) {
    let mut eng = CarouselEngine::new(CarouselConfig::default()).expect("carousel");
    eng.set_layout(&TrackLayout::measure(&[320.0; 10], 24.0));
    let wheel = WheelInput {
        delta_y: 120.0,
        viewport_height: 800.0,
        scroll_y: 200.0,
        document_height: 3000.0,
        ..WheelInput::default()
    };

    let mut t = 0.0_f64;
    c.bench_function("carousel_step_60fps", |b| {
        b.iter(|| {
            t += 16.0;
            black_box(eng.step(black_box(0.016), t))
        })
    });

    c.bench_function("carousel_wheel_then_step", |b| {
        b.iter(|| {
            t += 16.0;
            eng.on_wheel(black_box(wheel), t);
            black_box(eng.step(0.016, t))
        })
    });
}

fn bench_follower(c: &mut Criterion) {
    let mut f = PointerFollower::new(
        FollowerConfig::default(),
        PointerEnvironment::default(),
        Point::new(1280.0, 720.0),
    )
    .expect("follower");
    let mut x = 0.0_f32;
    c.bench_function("follower_move_and_step", |b| {
        b.iter(|| {
            x = (x + 3.0) % 1280.0;
            f.pointer_move(x, 360.0);
            black_box(f.step())
        })
    });
}

criterion_group!(benches, bench_carousel, bench_follower);
criterion_main!(benches);
