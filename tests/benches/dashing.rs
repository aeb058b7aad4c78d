extern crate dashline_tests;
extern crate dashline;
#[macro_use]
extern crate criterion;

use criterion::Criterion;
use dashline::algorithms::{dash, DashPattern};
use dashline::path::{flatten, FlattenOptions, RawPath};
use dashline::{dashed, DashOptions};
use dashline_tests::*;

const N: usize = 10;

fn flattening(c: &mut Criterion) {
    let commands = wavy_path(100);
    for &density in &[0.5, 1.0, 4.0] {
        let options = FlattenOptions::density(density);
        c.bench_function(&format!("flatten density {}", density), |b| {
            b.iter(|| {
                for _ in 0..N {
                    std::hint::black_box(flatten(&commands, &options));
                }
            })
        });
    }
}

fn dashing(c: &mut Criterion) {
    let polylines = flatten(&wavy_path(100), &FlattenOptions::DEFAULT);
    for lengths in &[&[4.0, 2.0][..], &[0.5, 0.25, 3.0][..]] {
        let pattern = DashPattern::new(lengths).unwrap();
        c.bench_function(&format!("dash {:?}", lengths), |b| {
            b.iter(|| {
                for _ in 0..N {
                    std::hint::black_box(dash(&polylines, &pattern, 1.5));
                }
            })
        });
    }
}

fn pipeline(c: &mut Criterion) {
    let raw = RawPath::from_commands(&wavy_path(100));
    let options = DashOptions::dashes(&[4.0, 2.0]).with_offset(1.0);
    c.bench_function("dashed raw buffer", |b| {
        b.iter(|| {
            for _ in 0..N {
                std::hint::black_box(dashed(&raw, &options).unwrap());
            }
        })
    });
}

criterion_group!(dash_benches, flattening, dashing, pipeline);
criterion_main!(dash_benches);
