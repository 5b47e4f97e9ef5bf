use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const DAY: u64 = 86_400;

// =============================================================
// spin_status
// =============================================================

#[test]
fn never_spun_is_allowed() {
    assert_eq!(spin_status(None, 1_000.0, DAY), SpinStatus { allowed: true, remaining_secs: 0 });
}

#[test]
fn within_cooldown_reports_remaining_truncated() {
    let status = spin_status(Some(1_000.0), 1_000.0 + 3_600.4, DAY);
    assert!(!status.allowed);
    assert_eq!(status.remaining_secs, DAY - 3_601);
}

#[test]
fn exactly_at_cooldown_is_allowed() {
    #[allow(clippy::cast_precision_loss)]
    let now = 1_000.0 + DAY as f64;
    assert_eq!(spin_status(Some(1_000.0), now, DAY), SpinStatus { allowed: true, remaining_secs: 0 });
}

#[test]
fn zero_cooldown_always_allows() {
    assert!(spin_status(Some(5.0), 5.0, 0).allowed);
}

// =============================================================
// roll / outcome
// =============================================================

#[test]
fn roll_respects_certain_odds() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        assert_eq!(roll(&mut rng, 1.0), SpinOutcome::Win);
        assert_eq!(roll(&mut rng, 0.0), SpinOutcome::Lose);
    }
}

#[test]
fn roll_produces_both_outcomes_at_even_odds() {
    let mut rng = StdRng::seed_from_u64(42);
    let wins = (0..1_000).filter(|_| roll(&mut rng, 0.5) == SpinOutcome::Win).count();
    assert!((300..700).contains(&wins), "wins = {wins}");
}

#[test]
fn outcome_names_round_trip() {
    for outcome in [SpinOutcome::Win, SpinOutcome::Lose] {
        assert_eq!(SpinOutcome::from_str(outcome.as_str()), Some(outcome));
    }
    assert_eq!(SpinOutcome::from_str("draw"), None);
}

#[test]
fn outcome_rewards() {
    assert_eq!(SpinOutcome::Win.reward(), VideoVersion::Uncensored);
    assert_eq!(SpinOutcome::Lose.reward(), VideoVersion::Pixelated);
}

// =============================================================
// ledger
// =============================================================

#[tokio::test]
async fn mark_spun_locks_album_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("spin_state.json");
    let ledger = SpinLedger::load(path.clone()).await;

    ledger.mark_spun("album_001", 10_000.0).await.unwrap();

    let status = ledger.status("album_001", 10_060.0, DAY).await;
    assert!(!status.allowed);
    assert_eq!(status.remaining_secs, DAY - 60);
    assert!(ledger.status("album_002", 10_060.0, DAY).await.allowed);

    let reloaded = SpinLedger::load(path).await;
    assert_eq!(reloaded.last_spin("album_001").await, Some(10_000.0));
}

#[tokio::test]
async fn malformed_state_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spin_state.json");
    tokio::fs::write(&path, b"[1, 2").await.unwrap();

    let ledger = SpinLedger::load(path).await;
    assert_eq!(ledger.last_spin("album_001").await, None);
}

#[tokio::test]
async fn clones_share_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = SpinLedger::load(dir.path().join("spin_state.json")).await;
    let other = ledger.clone();

    ledger.mark_spun("album_009", 1.0).await.unwrap();
    assert_eq!(other.last_spin("album_009").await, Some(1.0));
}
