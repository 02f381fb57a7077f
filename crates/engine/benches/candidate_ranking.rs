//! Benchmarks for candidate ranking
//!
//! Run with: cargo bench --package engine

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use data_loader::MovieRecord;
use engine::{SelectionPolicy, SuggestionSelector};
use pipeline::PreferenceProfile;

const GENRES: [&str; 8] = [
    "Action", "Comedy", "Drama", "Horror", "Romance", "Thriller", "Western", "Animation",
];

fn synthetic_catalog(count: u64) -> Vec<MovieRecord> {
    (1..=count)
        .map(|id| {
            let i = id as usize;
            MovieRecord::new(id, format!("Movie {}", id))
                .with_genres([GENRES[i % 8], GENRES[(i / 8) % 8]])
                .with_director(format!("Director {}", id % 40))
                .with_actors([
                    format!("Actor {}", id % 97),
                    format!("Actor {}", id % 53),
                    format!("Actor {}", id % 31),
                ])
        })
        .collect()
}

fn bench_build_profile(c: &mut Criterion) {
    let catalog = synthetic_catalog(200);
    let (liked, disliked) = catalog.split_at(120);

    c.bench_function("build_profile_200_rated", |b| {
        b.iter(|| black_box(PreferenceProfile::build(black_box(liked), black_box(disliked))))
    });
}

fn bench_rank_untouched(c: &mut Criterion) {
    let catalog = synthetic_catalog(2_200);
    let (rated, untouched) = catalog.split_at(200);
    let profile = PreferenceProfile::build(&rated[..120], &rated[120..]);

    let ranked = SuggestionSelector::new(SelectionPolicy::Ranked);
    c.bench_function("rank_2000_untouched", |b| {
        b.iter(|| black_box(ranked.rank(black_box(untouched), &profile).len()))
    });

    let strict = SuggestionSelector::new(SelectionPolicy::AvoidDisliked);
    c.bench_function("rank_2000_untouched_avoid_disliked", |b| {
        b.iter(|| black_box(strict.rank(black_box(untouched), &profile).len()))
    });
}

criterion_group!(benches, bench_build_profile, bench_rank_untouched);
criterion_main!(benches);
