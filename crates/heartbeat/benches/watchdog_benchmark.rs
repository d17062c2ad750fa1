//! Performance benchmarks for the watchdog control handle.

use criterion::{Criterion, criterion_group, criterion_main};
use heartbeat::prelude::*;
use heartbeat::{monitor, signal};
use std::hint::black_box;
use std::time::Duration;

fn bench_pet_armed(c: &mut Criterion) {
    let Ok(pet) = monitor::monitor::<fn()>(Duration::from_secs(3600), None) else {
        return;
    };

    c.bench_function("pet_reset_armed", |b| {
        b.iter(|| pet.pet(black_box(false)));
    });

    c.bench_function("try_pet_reset_armed", |b| {
        b.iter(|| black_box(pet.try_pet(false)));
    });

    pet.pet(true);
}

fn bench_pet_terminated(c: &mut Criterion) {
    let Ok((expired, pet)) = signal::channel(Duration::from_millis(1)) else {
        return;
    };
    if expired.recv_timeout(Duration::from_secs(1)).is_err() {
        return;
    }

    c.bench_function("pet_reset_terminated", |b| {
        b.iter(|| pet.pet(black_box(false)));
    });
}

fn bench_stats_snapshot(c: &mut Criterion) {
    let Ok(pet) = monitor::monitor::<fn()>(Duration::from_secs(3600), None) else {
        return;
    };

    c.bench_function("stats_snapshot", |b| {
        b.iter(|| black_box(pet.stats()));
    });

    c.bench_function("state_read", |b| {
        b.iter(|| black_box(pet.state() == WatchdogState::Armed));
    });

    pet.pet(true);
}

criterion_group!(
    benches,
    bench_pet_armed,
    bench_pet_terminated,
    bench_stats_snapshot
);
criterion_main!(benches);
