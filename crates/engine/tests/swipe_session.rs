//! Swipe sessions over an in-memory snapshot catalog

use std::collections::HashSet;

use catalog_client::SnapshotCatalog;
use data_loader::{MovieId, MovieRecord, Verdict};
use engine::{
    CatalogSession, EngineConfig, RecommendationEngine, RefillStatus, SelectionPolicy, SlotOutcome,
};

/// 45 movies: a crime block by one director, a comedy block, then filler
fn catalog() -> SnapshotCatalog {
    let records = (1..=45)
        .map(|id| {
            let movie = MovieRecord::new(id, format!("Movie {}", id));
            match id {
                1..=5 | 30..=34 => movie
                    .with_genres(["Crime", "Drama"])
                    .with_director("Michael Mann")
                    .with_actors(["Al Pacino", "Robert De Niro"]),
                6..=10 | 35..=39 => movie
                    .with_genres(["Comedy"])
                    .with_director("David Zucker")
                    .with_actors(["Leslie Nielsen"]),
                _ => movie
                    .with_genres(["Documentary"])
                    .with_director(format!("Director {}", id)),
            }
        })
        .collect();
    SnapshotCatalog::new(records)
}

fn engine(policy: SelectionPolicy) -> RecommendationEngine {
    RecommendationEngine::new(&EngineConfig {
        selection_policy: policy,
        pages_per_batch: 1,
        ..EngineConfig::default()
    })
}

fn shown(session: &CatalogSession<SnapshotCatalog>) -> Vec<MovieId> {
    session.engine().suggested().iter().map(|m| m.id).collect()
}

#[tokio::test]
async fn test_likes_pull_in_matching_movies() {
    let mut session = CatalogSession::new(engine(SelectionPolicy::Ranked), catalog());
    session.start().await.unwrap();

    // Pages 0..=1 give the first twenty
    assert_eq!(session.engine().pools().all().len(), 20);
    assert_eq!(shown(&session), (1..=10).collect::<Vec<_>>());

    let report = session.submit_feedback(1, Verdict::Liked).await.unwrap().report;
    // Nothing in 11..=20 matches a crime movie, so first-in-pool wins
    assert_eq!(report.slot, SlotOutcome::Replaced { next: 11 });

    for id in 2..=5 {
        session.submit_feedback(id, Verdict::Liked).await.unwrap();
    }
    for id in 6..=10 {
        session.submit_feedback(id, Verdict::Disliked).await.unwrap();
    }
    assert!(session.engine().pools().untouched().is_empty());
    assert_eq!(shown(&session), (11..=20).collect::<Vec<_>>());

    // Eleventh verdict empties a slot and drops below ten unrated,
    // so page 2 (21..=40) is fetched
    let feedback = session.submit_feedback(11, Verdict::Disliked).await.unwrap();
    assert!(feedback.report.is_exhausted());
    assert!(matches!(feedback.refill, RefillStatus::Ingested(_)));
    assert_eq!(session.engine().pools().all().len(), 40);

    // Crime movies from page 2 now outrank everything else
    let report = session.submit_feedback(12, Verdict::Liked).await.unwrap().report;
    assert_eq!(report.slot, SlotOutcome::Replaced { next: 30 });
    assert_eq!(report.backfilled, vec![31]);
}

#[tokio::test]
async fn test_window_never_repeats_or_reshows_rated() {
    let mut session = CatalogSession::new(engine(SelectionPolicy::Ranked), catalog());
    session.start().await.unwrap();

    let mut rated = HashSet::new();
    for round in 0..40 {
        let Some(first) = session.engine().suggested().first().map(|m| m.id) else {
            break;
        };
        let verdict = if round % 3 == 0 { Verdict::Disliked } else { Verdict::Liked };
        session.submit_feedback(first, verdict).await.unwrap();
        rated.insert(first);

        let ids = shown(&session);
        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len(), "duplicate slot in {:?}", ids);
        assert!(ids.iter().all(|id| !rated.contains(id)));

        let pools = session.engine().pools();
        assert_eq!(pools.liked().len() + pools.disliked().len(), rated.len());
        assert!(pools.suggested().len() <= pools.capacity());
    }

    // 40 rated out of 45 known
    assert_eq!(session.engine().pools().all().len(), 45);
    assert_eq!(rated.len(), 40);
    assert_eq!(session.engine().suggested().len(), 5);
}

#[tokio::test]
async fn test_avoid_disliked_policy_skips_disliked_attributes() {
    let mut session = CatalogSession::new(engine(SelectionPolicy::AvoidDisliked), catalog());
    session.start().await.unwrap();

    // Dislike every comedy on screen; none of the replacements are comedies
    for id in 6..=10 {
        session.submit_feedback(id, Verdict::Disliked).await.unwrap();
    }
    let comedies_shown = session
        .engine()
        .suggested()
        .iter()
        .filter(|m| m.genres.iter().any(|g| g == "Comedy"))
        .count();
    assert_eq!(comedies_shown, 0);
}
