use chrono::{Duration as ChronoDuration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

use engine::spawn_lottery_actor;
use engine::types::draw_types::DrawUpdate;
use engine::types::ticket_types::TicketNumbers;
use engine::types::user_types::{NewUser, Role};
use engine::{match_numbers, resolve_prize, validate_numbers};

// ==================== TEST DATA GENERATION UTILITIES ====================

/// Random valid picks: six distinct numbers from 1..=49, unsorted
fn generate_picks(count: usize) -> Vec<Vec<i64>> {
    let pool: Vec<i64> = (1..=49).collect();
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| pool.choose_multiple(&mut rng, 6).copied().collect())
        .collect()
}

/// Random candidates, roughly a third of them invalid in some way
fn generate_mixed_candidates(count: usize) -> Vec<Vec<i64>> {
    let mut rng = rand::thread_rng();
    generate_picks(count)
        .into_iter()
        .map(|mut pick| {
            match rng.gen_range(0..9) {
                0 => {
                    pick.pop();
                }
                1 => pick[0] = rng.gen_range(50..100),
                2 => pick[5] = pick[0],
                _ => {}
            }
            pick
        })
        .collect()
}

fn to_tickets(picks: &[Vec<i64>]) -> Vec<TicketNumbers> {
    picks
        .iter()
        .filter_map(|p| validate_numbers(p).ok())
        .collect()
}

// ==================== BENCHMARK SCENARIOS ====================

/// Validation of a stream of purchase candidates
fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");

    for count in [1_000, 10_000, 100_000].iter() {
        let candidates = generate_mixed_candidates(*count);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("candidates", count), &candidates, |b, candidates| {
            b.iter(|| {
                for candidate in candidates {
                    black_box(validate_numbers(candidate).ok());
                }
            });
        });
    }

    group.finish();
}

/// Settling many tickets against one draw, prize lookup included
fn bench_settlement(c: &mut Criterion) {
    let mut group = c.benchmark_group("settlement");
    let winning = to_tickets(&generate_picks(1)).remove(0);

    for count in [1_000, 10_000, 100_000].iter() {
        let tickets = to_tickets(&generate_picks(*count));
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("tickets", count), &tickets, |b, tickets| {
            b.iter(|| {
                let total: u64 = tickets
                    .iter()
                    .filter_map(|t| match_numbers(t, Some(&winning)).matched)
                    .map(resolve_prize)
                    .sum();
                black_box(total)
            });
        });
    }

    group.finish();
}

/// Result sheets through the actor for a user holding many coupons
fn bench_coupon_results(c: &mut Criterion) {
    let mut group = c.benchmark_group("coupon_results");
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let (store, coupon_ids) = runtime.block_on(async {
        let store = spawn_lottery_actor();
        let user = store
            .add_user(NewUser {
                name: "bench".into(),
                email: "bench@test.com".into(),
                password: "x".into(),
                role: Role::User,
            })
            .await
            .unwrap();

        let mut draw_ids = Vec::new();
        for day in 1..=10 {
            let draw = store
                .create_draw(Utc::now() + ChronoDuration::days(day))
                .await
                .unwrap();
            draw_ids.push(draw.id);
        }

        let mut coupon_ids = Vec::new();
        for ticket in to_tickets(&generate_picks(1_000)) {
            let coupon = store
                .create_coupon(user.id, ticket, draw_ids.clone())
                .await
                .unwrap();
            coupon_ids.push(coupon.id);
        }

        for (draw_id, winning) in draw_ids.iter().zip(to_tickets(&generate_picks(10))) {
            store
                .update_draw(
                    *draw_id,
                    DrawUpdate {
                        winning_numbers: Some(winning),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }

        (store, coupon_ids)
    });

    group.bench_function("single_coupon", |b| {
        b.to_async(&runtime)
            .iter(|| async { black_box(store.coupon_results(coupon_ids[0]).await.ok()) });
    });

    group.bench_function("all_coupons", |b| {
        b.to_async(&runtime).iter(|| async {
            for id in &coupon_ids {
                black_box(store.coupon_results(*id).await.ok());
            }
        });
    });

    group.finish();
}

// ==================== CRITERION CONFIGURATION ====================

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(10))
        .sample_size(50);
    targets =
        bench_validation,
        bench_settlement,
        bench_coupon_results
);

criterion_main!(benches);
