use pokerledger::db::init_db;
use pokerledger::domain::{points_to_dollars, pots_earned, Decimal, DeltaPolicy, PotEntryId};
use pokerledger::{EntryId, Ledger, LedgerError, PlayerId, Repository, Status};
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;

async fn setup_ledger() -> (Ledger, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    let repo = Arc::new(Repository::new(pool));
    (Ledger::new(repo), temp_dir)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[tokio::test]
async fn test_alice_session_end_to_end() {
    let (ledger, _temp) = setup_ledger().await;
    let alice = ledger.register("Alice").await.unwrap();
    assert_eq!(alice.running_total, 0);

    let entry = ledger.add_points(alice.id, 1000).await.unwrap();
    assert_eq!(entry.total_after, 1000);
    assert_eq!(points_to_dollars(entry.total_after), dec("5.00"));

    let entry = ledger.add_points(alice.id, -1500).await.unwrap();
    assert_eq!(entry.total_after, -500);

    let alice = ledger.player(alice.id).await.unwrap();
    assert_eq!(alice.running_total, -500);
    assert_eq!(alice.dollar_amount(), dec("-2.50"));
    assert_eq!(alice.status(), Status::Lost);

    let details = ledger.player_details(alice.id).await.unwrap();
    assert_eq!(details.stats.total_games, 2);
    assert_eq!(details.stats.total_wins, 1);
    assert_eq!(details.stats.total_losses, 1);
    assert_eq!(details.stats.biggest_win, 1000);
    assert_eq!(details.stats.biggest_loss, -1500);
    assert_eq!(details.stats.win_rate, dec("50.0"));
    assert_eq!(details.pots.pots_earned, -1);
    assert_eq!(details.history.len(), 2);
    assert_eq!(details.history[0].points_added, -1500);
    assert_eq!(details.history[0].dollar_after, dec("-2.50"));
}

#[tokio::test]
async fn test_running_total_equals_sum_of_entries() {
    let (ledger, _temp) = setup_ledger().await;
    let bob = ledger.register("Bob").await.unwrap();

    let deltas = [250, -75, 1200, -3, 40, -999];
    for delta in deltas {
        ledger.add_points(bob.id, delta).await.unwrap();
    }

    let bob = ledger.player(bob.id).await.unwrap();
    let history = ledger.history(Some("Bob")).await.unwrap();
    let sum: i64 = history.iter().map(|r| r.points_added).sum();
    assert_eq!(sum, bob.running_total);
    assert_eq!(bob.running_total, deltas.iter().sum::<i64>());
    assert_eq!(history[0].total_after, bob.running_total);
}

#[tokio::test]
async fn test_reverse_then_readd_leaves_total_unchanged() {
    let (ledger, _temp) = setup_ledger().await;
    let carol = ledger.register("Carol").await.unwrap();
    ledger.add_points(carol.id, 300).await.unwrap();
    let entry = ledger.add_points(carol.id, 120).await.unwrap();

    let reversal = ledger.reverse_entry(entry.id).await.unwrap();
    assert_eq!(reversal.points_removed, 120);
    assert_eq!(reversal.new_total, 300);

    ledger.add_points(carol.id, 120).await.unwrap();
    assert_eq!(ledger.player(carol.id).await.unwrap().running_total, 420);
}

#[tokio::test]
async fn test_reversal_does_not_rewrite_later_snapshots() {
    let (ledger, _temp) = setup_ledger().await;
    let dan = ledger.register("Dan").await.unwrap();
    let first = ledger.add_points(dan.id, 100).await.unwrap();
    ledger.add_points(dan.id, 50).await.unwrap();

    ledger.reverse_entry(first.id).await.unwrap();

    let history = ledger.history(Some("Dan")).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].total_after, 150);
    assert_eq!(ledger.player(dan.id).await.unwrap().running_total, 50);
}

#[tokio::test]
async fn test_reverse_missing_entry_is_not_found() {
    let (ledger, _temp) = setup_ledger().await;
    let err = ledger.reverse_entry(EntryId::new(42)).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}

#[tokio::test]
async fn test_clear_history_keeps_running_totals() {
    let (ledger, _temp) = setup_ledger().await;
    let eve = ledger.register("Eve").await.unwrap();
    ledger.add_points(eve.id, 700).await.unwrap();
    ledger.add_points(eve.id, -200).await.unwrap();

    assert_eq!(ledger.clear_history().await.unwrap(), 2);
    assert!(ledger.history(None).await.unwrap().is_empty());

    let details = ledger.player_details(eve.id).await.unwrap();
    assert_eq!(details.summary.running_total, 500);
    assert_eq!(details.stats.total_games, 0);
    assert_eq!(details.stats.win_rate, Decimal::zero());
}

#[tokio::test]
async fn test_delete_player_removes_their_rows() {
    let (ledger, _temp) = setup_ledger().await;
    let frank = ledger.register("Frank").await.unwrap();
    let gina = ledger.register("Gina").await.unwrap();
    ledger.add_points(frank.id, 10).await.unwrap();
    ledger.add_points(gina.id, 20).await.unwrap();
    ledger.add_pot(frank.id, None).await.unwrap();

    ledger.delete_player(frank.id).await.unwrap();

    let history = ledger.history(None).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].player_name, "Gina");
    assert!(ledger.pot_history().await.unwrap().is_empty());
    assert!(matches!(
        ledger.player(frank.id).await.unwrap_err(),
        LedgerError::NotFound(_)
    ));

    // Deleting again is a no-op.
    ledger.delete_player(frank.id).await.unwrap();
}

#[tokio::test]
async fn test_register_rejects_blank_and_duplicate_names() {
    let (ledger, _temp) = setup_ledger().await;
    assert!(matches!(
        ledger.register("   ").await.unwrap_err(),
        LedgerError::InvalidName
    ));

    let hank = ledger.register("  Hank ").await.unwrap();
    assert_eq!(hank.name, "Hank");
    assert!(matches!(
        ledger.register("Hank").await.unwrap_err(),
        LedgerError::DuplicateName(_)
    ));

    // Names are case-sensitive.
    ledger.register("hank").await.unwrap();
    assert_eq!(ledger.players().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_zero_delta_policy() {
    let (ledger, _temp) = setup_ledger().await;
    let ivy = ledger.register("Ivy").await.unwrap();
    assert!(matches!(
        ledger.add_points(ivy.id, 0).await.unwrap_err(),
        LedgerError::InvalidDelta
    ));
    assert!(ledger.history(None).await.unwrap().is_empty());

    let lenient = ledger.clone().with_delta_policy(DeltaPolicy::AllowZero);
    let entry = lenient.add_points(ivy.id, 0).await.unwrap();
    assert_eq!(entry.total_after, 0);

    let details = lenient.player_details(ivy.id).await.unwrap();
    assert_eq!(details.stats.total_games, 1);
    assert_eq!(details.stats.total_wins, 0);
    assert_eq!(details.stats.total_losses, 0);
}

#[tokio::test]
async fn test_add_points_to_missing_player() {
    let (ledger, _temp) = setup_ledger().await;
    let err = ledger.add_points(PlayerId::new(9), 10).await.unwrap_err();
    assert_eq!(err.to_string(), "Player 9 not found");
}

#[tokio::test]
async fn test_players_sorted_by_total_then_id() {
    let (ledger, _temp) = setup_ledger().await;
    let a = ledger.register("a").await.unwrap();
    let b = ledger.register("b").await.unwrap();
    let c = ledger.register("c").await.unwrap();
    ledger.add_points(b.id, 500).await.unwrap();
    ledger.add_points(c.id, -5).await.unwrap();

    let order: Vec<PlayerId> = ledger
        .players()
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(order, vec![b.id, a.id, c.id]);
}

#[tokio::test]
async fn test_global_stats_on_empty_registry() {
    let (ledger, _temp) = setup_ledger().await;
    let stats = ledger.global_stats().await.unwrap();
    assert_eq!(stats.total_players, 0);
    assert_eq!(stats.total_transactions, 0);
    assert_eq!(stats.total_points, 0);
    assert_eq!(stats.total_dollars, dec("0.00"));
    assert_eq!(stats.winners + stats.losers + stats.even, 0);
}

#[test]
fn test_pots_earned_floors_negative_totals() {
    assert_eq!(pots_earned(-500), -1);
    assert_eq!(pots_earned(-1000), -1);
    assert_eq!(pots_earned(-1001), -2);
    assert_eq!(pots_earned(1999), 1);
}

#[tokio::test]
async fn test_pot_counter_and_history() {
    let (ledger, _temp) = setup_ledger().await;
    let jo = ledger.register("Jo").await.unwrap();

    let first = ledger.add_pot(jo.id, None).await.unwrap();
    assert_eq!(first.pot_count, 1);
    assert_eq!(
        first.history.session_name,
        first.history.session_date.default_session_name()
    );

    let second = ledger.add_pot(jo.id, Some("Friday game")).await.unwrap();
    assert_eq!(second.pot_count, 2);
    assert_eq!(second.history.session_name, "Friday game");
    assert_eq!(second.history.pot_count, 1);

    let today = ledger.pots_today().await.unwrap();
    assert_eq!(today.total, 2);
    assert_eq!(today.players.len(), 1);

    assert_eq!(ledger.remove_pot(jo.id).await.unwrap(), 1);
    assert_eq!(ledger.remove_pot(jo.id).await.unwrap(), 0);
    assert_eq!(ledger.remove_pot(jo.id).await.unwrap(), 0);

    // History is permanent: counters moved, entries did not.
    let sessions = ledger.pot_history().await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].entries.len(), 2);

    ledger.add_pot(jo.id, None).await.unwrap();
    assert_eq!(ledger.reset_today().await.unwrap(), 1);
    assert_eq!(ledger.pots_today().await.unwrap().total, 0);
    assert_eq!(ledger.pot_history().await.unwrap()[0].entries.len(), 3);

    let details = ledger.player_details(jo.id).await.unwrap();
    assert_eq!(details.pots.total_pots_bought, 3);
}

#[tokio::test]
async fn test_add_pot_for_missing_player() {
    let (ledger, _temp) = setup_ledger().await;
    assert!(matches!(
        ledger.add_pot(PlayerId::new(3), None).await.unwrap_err(),
        LedgerError::NotFound(_)
    ));
    assert!(ledger.pot_history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_and_delete_pot_history() {
    let (ledger, _temp) = setup_ledger().await;
    let kim = ledger.register("Kim").await.unwrap();
    let added = ledger.add_pot(kim.id, None).await.unwrap();
    let id = added.history.id;

    assert!(matches!(
        ledger.edit_pot_history(id, 0).await.unwrap_err(),
        LedgerError::InvalidCount(0)
    ));

    ledger.edit_pot_history(id, 4).await.unwrap();
    let sessions = ledger.pot_history().await.unwrap();
    assert_eq!(sessions[0].entries[0].pot_count, 4);
    assert_eq!(sessions[0].total, 4);

    // Daily counter is independent of history edits.
    assert_eq!(ledger.pots_today().await.unwrap().total, 1);

    ledger.delete_pot_history(id).await.unwrap();
    assert!(ledger.pot_history().await.unwrap().is_empty());
    assert!(matches!(
        ledger.delete_pot_history(id).await.unwrap_err(),
        LedgerError::NotFound(_)
    ));
    assert!(matches!(
        ledger.edit_pot_history(PotEntryId::new(999), 2).await.unwrap_err(),
        LedgerError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_pot_history_limit() {
    let (ledger, _temp) = setup_ledger().await;
    let lee = ledger.register("Lee").await.unwrap();
    let ledger = ledger.with_pot_history_limit(3);
    for _ in 0..5 {
        ledger.add_pot(lee.id, None).await.unwrap();
    }

    let sessions = ledger.pot_history().await.unwrap();
    let shown: usize = sessions.iter().map(|s| s.entries.len()).sum();
    assert_eq!(shown, 3);
    assert_eq!(ledger.pots_today().await.unwrap().total, 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_add_pot_loses_no_increments() {
    let (ledger, _temp) = setup_ledger().await;
    let player_id = ledger.register("Max").await.unwrap().id;
    let ledger = Arc::new(ledger.with_pot_history_limit(100));

    let tasks = (0..20).map(|_| {
        let ledger = ledger.clone();
        tokio::spawn(async move { ledger.add_pot(player_id, None).await })
    });
    for result in futures::future::join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let today = ledger.pots_today().await.unwrap();
    assert_eq!(today.total, 20);

    let entries = ledger.repo().pot_history(100).await.unwrap();
    assert_eq!(entries.len(), 20);
    assert!(entries.iter().all(|e| e.player_id == player_id));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_add_points_keeps_sum() {
    let (ledger, _temp) = setup_ledger().await;
    let player_id = ledger.register("Ned").await.unwrap().id;
    let ledger = Arc::new(ledger);

    let tasks = (1..=20).map(|i: i64| {
        let ledger = ledger.clone();
        tokio::spawn(async move { ledger.add_points(player_id, i * 10).await })
    });
    for result in futures::future::join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let ned = ledger.player(player_id).await.unwrap();
    assert_eq!(ned.running_total, (1..=20i64).map(|i| i * 10).sum::<i64>());

    let mut totals: Vec<i64> = ledger
        .history(Some("Ned"))
        .await
        .unwrap()
        .iter()
        .map(|r| r.total_after)
        .collect();
    totals.sort_unstable();
    totals.dedup();
    assert_eq!(totals.len(), 20);
}
