// Criterion benchmarks for Roost Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use roost_algo::core::{distance::{haversine_distance, lookup_bounding_box}, scoring::score_and_rank};
use roost_algo::models::{AmenityCounts, ListingRecord, LocationDescriptor, PreferenceWeights, RankedListing};
use uuid::Uuid;

fn create_candidate(id: usize) -> RankedListing {
    RankedListing::new(
        ListingRecord {
            id: Uuid::new_v4(),
            title: format!("Flat {}", id),
            price: 3_000_000 + (id as i64 % 30) * 100_000,
            bedrooms: Some((id % 4 + 1) as i32),
            location: LocationDescriptor::Structured {
                locality: Some(format!("Locality {}", id % 20)),
                city: Some("Kolkata".to_string()),
            },
            latitude: Some(22.5 + (id as f64 * 0.001) % 0.5),
            longitude: Some(88.3 + (id as f64 * 0.001) % 0.5),
            created_at: None,
        },
        AmenityCounts {
            schools: (id as u32 * 3) % 11,
            hospitals: (id as u32 * 7) % 5,
            restaurants: (id as u32 * 13) % 23,
        },
    )
}

fn create_weights() -> PreferenceWeights {
    PreferenceWeights {
        schools: 5.0,
        hospitals: 3.0,
        restaurants: 7.0,
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(22.5726),
                black_box(88.3639),
                black_box(22.5958),
                black_box(88.2636),
            )
        });
    });
}

fn bench_lookup_bounding_box(c: &mut Criterion) {
    c.bench_function("lookup_bounding_box", |b| {
        b.iter(|| lookup_bounding_box(black_box(22.5726), black_box(88.3639), black_box(0.01)));
    });
}

fn bench_score_and_rank(c: &mut Criterion) {
    let weights = create_weights();

    let mut group = c.benchmark_group("scoring");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<RankedListing> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("score_and_rank", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| score_and_rank(black_box(candidates.clone()), black_box(&weights)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_lookup_bounding_box,
    bench_score_and_rank
);

criterion_main!(benches);
