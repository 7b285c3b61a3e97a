use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use surveysim_rust::geometry::{angular_separation, horizontal_coordinates};
use surveysim_rust::prelude::*;
use surveysim_rust::time::{mjd_to_lst, mjd_to_utc, utc_to_mjd};

fn dark_night() -> NightlyEphemeris {
    let eph = NightlyEphemeris::new(60_000.0..=60_001.0)
        .with_body(SolarSystemBody::Moon, EquatorialPosition::from_degrees(180.0, -70.0));
    SolarSystemBody::PLANETS.iter().fold(eph, |eph, body| {
        eph.with_body(*body, EquatorialPosition::from_degrees(0.0, -80.0))
    })
}

/// `n` DARK tiles spread over the sky; only the last one is visible.
fn worst_case_plan(n: usize, lst: f64) -> NightPlan {
    let mut tiles: Vec<Tile> = (0..n.saturating_sub(1))
        .map(|i| {
            let ra = (lst + 60.0 + (i as f64 * 7.3) % 240.0) % 360.0;
            Tile::new(
                TileId::new(i as i64),
                Degrees::new(ra),
                Degrees::new(10.0 + (i % 50) as f64),
                Degrees::new((ra - 15.0).rem_euclid(360.0)),
                Degrees::new((ra + 15.0).rem_euclid(360.0)),
                Seconds::new(1000.0),
            )
        })
        .collect();
    tiles.push(Tile::new(
        TileId::new(n as i64),
        Degrees::new(lst),
        Degrees::new(30.0),
        Degrees::new((lst - 15.0).rem_euclid(360.0)),
        Degrees::new((lst + 15.0).rem_euclid(360.0)),
        Seconds::new(1000.0),
    ));
    NightPlan::new(0.0, tiles).expect("benchmark plan is valid")
}

fn bench_select_next(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_next");
    let site = Site::kitt_peak();
    let mjd = 60_000.3;
    let lst = mjd_to_lst(mjd, site.longitude).value();
    let selector = TileSelector::from_ephemeris(Arc::new(dark_night()), site);
    let observed = ObservedSet::new();

    for size in [10usize, 100, 1000, 5000] {
        let plan = worst_case_plan(size, lst);
        let context = SelectionContext::for_plan(&plan, mjd, Pointing::from_degrees(lst, 20.0), true);
        group.bench_with_input(BenchmarkId::new("tiles", size), &plan, |b, plan| {
            b.iter(|| selector.select_next(black_box(plan), &observed, black_box(&context)));
        });
    }

    group.finish();
}

fn bench_sidereal_time(c: &mut Criterion) {
    let mut group = c.benchmark_group("time");
    let longitude = Site::kitt_peak().longitude;

    group.bench_function("mjd_to_lst", |b| {
        b.iter(|| {
            for i in 0..1000 {
                let mjd = 60_000.0 + (i as f64 * 0.001);
                black_box(mjd_to_lst(black_box(mjd), longitude));
            }
        });
    });

    group.bench_function("mjd_utc_round_trip", |b| {
        b.iter(|| {
            for i in 0..1000 {
                let mjd = 59_580.0 + (i as f64 * 0.01);
                if let Some(dt) = mjd_to_utc(black_box(mjd)) {
                    black_box(utc_to_mjd(&dt));
                }
            }
        });
    });

    group.finish();
}

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    let latitude = Site::kitt_peak().latitude;

    group.bench_function("horizontal_coordinates", |b| {
        b.iter(|| {
            horizontal_coordinates(
                black_box(Degrees::new(123.4)),
                black_box(Degrees::new(21.0)),
                black_box(Degrees::new(150.0)),
                latitude,
            )
        });
    });

    group.bench_function("angular_separation", |b| {
        b.iter(|| {
            angular_separation(
                black_box(Degrees::new(10.0)),
                black_box(Degrees::new(-5.0)),
                black_box(Degrees::new(200.0)),
                black_box(Degrees::new(45.0)),
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_select_next, bench_sidereal_time, bench_geometry);
criterion_main!(benches);
