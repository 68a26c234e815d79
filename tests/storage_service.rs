mod common;

use hustler_hunter::database::session_store_repo::{self, SessionEntryWrite};
use hustler_hunter::error::StorageError;
use hustler_hunter::models::AppSettings;
use hustler_hunter::services::storage_service::{
    GURUS_KEY, MOCK_REPORTS_KEY, REPORTS_KEY, SETTINGS_KEY,
};
use sqlx::SqlitePool;

use common::{day, guru, memory_pool, report, storage};

async fn write_raw(pool: &SqlitePool, session_id: &str, key: &str, value: &str) {
    let mut conn = pool.acquire().await.unwrap();
    session_store_repo::upsert_entry(
        &mut conn,
        SessionEntryWrite {
            session_id,
            key,
            value,
            updated_at: "2024-01-01T00:00:00.000Z",
        },
    )
    .await
    .unwrap();
}

async fn enable_mock(pool: &SqlitePool, session_id: &str) {
    storage(pool, session_id)
        .save_settings(&AppSettings {
            use_mock_data: true,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn settings_round_trip() {
    let pool = memory_pool().await;
    let store = storage(&pool, "s1");

    for use_mock_data in [true, false, true] {
        let settings = AppSettings { use_mock_data };
        store.save_settings(&settings).await.unwrap();
        assert_eq!(store.get_settings().await.unwrap(), settings);
    }
}

#[tokio::test]
async fn first_settings_read_persists_defaults() {
    let pool = memory_pool().await;
    let store = storage(&pool, "s1");

    assert_eq!(store.get_settings().await.unwrap(), AppSettings::default());

    let mut conn = pool.acquire().await.unwrap();
    let row = session_store_repo::load_entry(&mut conn, "s1", SETTINGS_KEY)
        .await
        .unwrap()
        .expect("defaults written on first read");
    assert_eq!(row.entry_value, r#"{"useMockData":false}"#);
}

#[tokio::test]
async fn mock_mode_serves_the_seed_gurus() {
    let pool = memory_pool().await;
    enable_mock(&pool, "s1").await;

    let gurus = storage(&pool, "s1").get_gurus().await.unwrap();
    let shape: Vec<(&str, usize, usize)> = gurus
        .iter()
        .map(|g| (g.id.as_str(), g.evidence.len(), g.reports.len()))
        .collect();
    assert_eq!(
        shape,
        vec![("guru1", 2, 1), ("guru2", 2, 1), ("guru3", 1, 1)]
    );
    assert_eq!(storage(&pool, "s1").get_reports().await.unwrap().len(), 3);
}

#[tokio::test]
async fn persisted_mode_starts_empty() {
    let pool = memory_pool().await;
    let store = storage(&pool, "s1");
    assert!(store.get_gurus().await.unwrap().is_empty());
    assert!(store.get_reports().await.unwrap().is_empty());
    assert!(store.get_guru_by_id("guru1").await.unwrap().is_none());
}

#[tokio::test]
async fn added_report_shows_up_once_in_both_views() {
    let pool = memory_pool().await;
    let store = storage(&pool, "s1");
    store
        .save_gurus(&[
            guru("g1", "Dan Dropship", "Drop Shipping", "Ships nothing"),
            guru("g2", "Rita Realty", "Real Estate", "Flips houses on paper"),
        ])
        .await
        .unwrap();

    store.add_report(report("rep-1", "g1")).await.unwrap();

    let flat = store.get_reports().await.unwrap();
    assert_eq!(flat.iter().filter(|r| r.id == "rep-1").count(), 1);

    let gurus = store.get_gurus().await.unwrap();
    let g1 = gurus.iter().find(|g| g.id == "g1").unwrap();
    let g2 = gurus.iter().find(|g| g.id == "g2").unwrap();
    assert_eq!(g1.reports.iter().filter(|r| r.id == "rep-1").count(), 1);
    assert!(g2.reports.is_empty());
    assert_eq!(g1.updated_at, day(2024, 6, 1));
    assert_eq!(g2.updated_at, day(2024, 1, 2));
}

#[tokio::test]
async fn report_for_unknown_guru_is_rejected_without_writing() {
    let pool = memory_pool().await;
    let store = storage(&pool, "s1");
    store
        .save_gurus(&[guru("g1", "Dan", "Other", "bio")])
        .await
        .unwrap();

    let err = store.add_report(report("rep-1", "ghost")).await.unwrap_err();
    assert!(matches!(err, StorageError::UnknownGuru(ref id) if id == "ghost"));
    assert!(store.get_reports().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_report_ids_are_rejected() {
    let pool = memory_pool().await;
    let store = storage(&pool, "s1");
    store
        .save_gurus(&[guru("g1", "Dan", "Other", "bio")])
        .await
        .unwrap();

    store.add_report(report("rep-1", "g1")).await.unwrap();
    let err = store.add_report(report("rep-1", "g1")).await.unwrap_err();
    assert!(matches!(err, StorageError::DuplicateReport(_)));
    assert_eq!(store.get_reports().await.unwrap().len(), 1);
}

#[tokio::test]
async fn mock_mode_reports_survive_toggling() {
    let pool = memory_pool().await;
    let store = storage(&pool, "s1");
    enable_mock(&pool, "s1").await;

    store.add_report(report("rep-1", "guru1")).await.unwrap();
    let guru1 = store.get_guru_by_id("guru1").await.unwrap().unwrap();
    let ids: Vec<&str> = guru1.reports.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "rep-1"]);

    store
        .save_settings(&AppSettings {
            use_mock_data: false,
        })
        .await
        .unwrap();
    assert!(store.get_reports().await.unwrap().is_empty());

    enable_mock(&pool, "s1").await;
    assert_eq!(store.get_reports().await.unwrap().len(), 4);
}

#[tokio::test]
async fn saving_reports_in_mock_mode_keeps_seeds_out_of_storage() {
    let pool = memory_pool().await;
    let store = storage(&pool, "s1");
    enable_mock(&pool, "s1").await;

    let mut reports = store.get_reports().await.unwrap();
    reports.push(report("rep-1", "guru2"));
    store.save_reports(&reports).await.unwrap();

    let reloaded = store.get_reports().await.unwrap();
    assert_eq!(reloaded.len(), 4);
    assert_eq!(reloaded.iter().filter(|r| r.id == "r1").count(), 1);
}

#[tokio::test]
async fn empty_search_returns_everything_in_order() {
    let pool = memory_pool().await;
    let store = storage(&pool, "s1");
    enable_mock(&pool, "s1").await;

    let all = store.get_gurus().await.unwrap();
    let found = store.search_gurus("", None).await.unwrap();
    assert_eq!(found, all);
}

#[tokio::test]
async fn search_applies_query_and_niche_together() {
    let pool = memory_pool().await;
    let store = storage(&pool, "s1");
    store
        .save_gurus(&[
            guru("a", "Forex Fred", "Forex Trading", "Signals group"),
            guru("b", "Crypto Carl", "Cryptocurrency", "forex and coins"),
            guru("c", "Quiet Quinn", "Forex Trading", "Teaches FOREX basics"),
            guru("d", "Nora", "Forex Trading", "Sells candles"),
        ])
        .await
        .unwrap();

    let found = store
        .search_gurus("forex", Some("Forex Trading"))
        .await
        .unwrap();
    let ids: Vec<&str> = found.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);

    for g in &found {
        let hay = format!("{} {}", g.name, g.bio).to_lowercase();
        assert!(hay.contains("forex"));
        assert_eq!(g.niche, "Forex Trading");
    }
}

#[tokio::test]
async fn clear_all_forgets_the_session() {
    let pool = memory_pool().await;
    let store = storage(&pool, "s1");
    store
        .save_gurus(&[guru("g1", "Dan", "Other", "bio")])
        .await
        .unwrap();
    store.add_report(report("rep-1", "g1")).await.unwrap();
    enable_mock(&pool, "s1").await;

    store.clear_all().await.unwrap();

    assert_eq!(store.get_settings().await.unwrap(), AppSettings::default());
    assert!(store.get_gurus().await.unwrap().is_empty());
    assert!(store.get_reports().await.unwrap().is_empty());
}

#[tokio::test]
async fn sessions_do_not_see_each_other() {
    let pool = memory_pool().await;
    storage(&pool, "s1")
        .save_gurus(&[guru("g1", "Dan", "Other", "bio")])
        .await
        .unwrap();
    enable_mock(&pool, "s2").await;

    assert_eq!(storage(&pool, "s1").get_gurus().await.unwrap().len(), 1);
    assert_eq!(storage(&pool, "s2").get_gurus().await.unwrap().len(), 3);
    assert!(storage(&pool, "s3").get_gurus().await.unwrap().is_empty());
}

#[tokio::test]
async fn timestamps_are_rehydrated_from_stored_strings() {
    let pool = memory_pool().await;
    write_raw(
        &pool,
        "s1",
        GURUS_KEY,
        r#"[{"id":"g1","name":"Dan","niche":"Other","rating":3.5,"bio":"b",
            "evidence":[{"id":"e1","title":"t","description":"d","type":"failure",
                         "createdAt":"2024-02-03T10:00:00.000Z"}],
            "createdAt":"2023-06-01T00:00:00.000Z","updatedAt":"2024-03-15T00:00:00.000Z"}]"#,
    )
    .await;
    write_raw(
        &pool,
        "s1",
        REPORTS_KEY,
        r#"[{"id":"r9","guruId":"g1","title":"t","description":"d","category":"false_claims",
             "createdAt":"2024-04-01T12:30:00.000Z"}]"#,
    )
    .await;

    let gurus = storage(&pool, "s1").get_gurus().await.unwrap();
    assert_eq!(gurus[0].created_at, day(2023, 6, 1));
    assert_eq!(
        gurus[0].evidence[0].created_at.to_rfc3339(),
        "2024-02-03T10:00:00+00:00"
    );
    assert_eq!(gurus[0].reports[0].id, "r9");
    assert_eq!(gurus[0].reports[0].reporter_name, None);
}

#[tokio::test]
async fn malformed_documents_fail_loudly() {
    let pool = memory_pool().await;
    write_raw(&pool, "s1", GURUS_KEY, "{not json").await;
    let err = storage(&pool, "s1").get_gurus().await.unwrap_err();
    assert!(matches!(err, StorageError::Malformed { key, .. } if key == GURUS_KEY));
    assert!(err.is_corrupt_data());

    write_raw(&pool, "s2", SETTINGS_KEY, r#"{"useMockData":"yes"}"#).await;
    let err = storage(&pool, "s2").get_settings().await.unwrap_err();
    assert!(matches!(err, StorageError::Malformed { key, .. } if key == SETTINGS_KEY));

    write_raw(
        &pool,
        "s3",
        REPORTS_KEY,
        r#"[{"id":"r1","guruId":"g1","title":"t","description":"d","category":"spam",
             "createdAt":"2024-04-01T00:00:00Z"}]"#,
    )
    .await;
    assert!(storage(&pool, "s3").get_reports().await.is_err());
}

#[tokio::test]
async fn invalid_mock_mode_reports_name_their_own_document() {
    let pool = memory_pool().await;
    enable_mock(&pool, "s1").await;
    write_raw(
        &pool,
        "s1",
        MOCK_REPORTS_KEY,
        r#"[{"id":"u1","guruId":"guru1","title":" ","description":"d","category":"scam",
             "createdAt":"2024-04-01T00:00:00Z"}]"#,
    )
    .await;

    let err = storage(&pool, "s1").get_reports().await.unwrap_err();
    assert!(matches!(err, StorageError::Invalid { key, .. } if key == MOCK_REPORTS_KEY));
    assert!(err.to_string().contains(MOCK_REPORTS_KEY));
}

#[tokio::test]
async fn out_of_range_ratings_are_invalid() {
    let pool = memory_pool().await;
    let mut bad = guru("g1", "Dan", "Other", "bio");
    bad.rating = 7.5;

    let err = storage(&pool, "s1").save_gurus(&[bad]).await.unwrap_err();
    assert!(matches!(err, StorageError::Invalid { .. }));

    write_raw(
        &pool,
        "s1",
        GURUS_KEY,
        r#"[{"id":"g1","name":"Dan","niche":"Other","rating":-1,"bio":"b","evidence":[],
            "createdAt":"2023-06-01T00:00:00Z","updatedAt":"2023-06-01T00:00:00Z"}]"#,
    )
    .await;
    let err = storage(&pool, "s1").get_gurus().await.unwrap_err();
    assert!(matches!(err, StorageError::Invalid { .. }));
}
