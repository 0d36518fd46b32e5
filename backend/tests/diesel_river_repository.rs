//! `DieselRiverRepository` against embedded PostgreSQL.
//!
//! Covers what the in-memory store cannot: the unique code index, `ILIKE`
//! escaping and partial `UPDATE ... RETURNING`.

#![expect(
    clippy::expect_used,
    clippy::print_stderr,
    reason = "test code uses expect for clear failure messages and reports skipped clusters"
)]

use riverwq::domain::ports::{RiverRepository, RiverRepositoryError};
use riverwq::domain::{River, RiverChanges, RiverDraft};
use riverwq::outbound::persistence::DieselRiverRepository;
use rstest::{fixture, rstest};

#[path = "support/embedded_postgres.rs"]
mod embedded_postgres;

use embedded_postgres::{PgHarness, pg_harness};

#[fixture]
fn harness() -> Option<PgHarness> {
    pg_harness()
}

fn draft(name: &str, code: &str) -> RiverDraft {
    RiverDraft::new(name, code, "").expect("valid draft")
}

async fn seed(repo: &DieselRiverRepository, rivers: &[(&str, &str)]) -> Vec<River> {
    let mut created = Vec::with_capacity(rivers.len());
    for (name, code) in rivers {
        created.push(repo.create(&draft(name, code)).await.expect("insert river"));
    }
    created
}

#[rstest]
fn duplicate_code_is_reported_with_the_code(harness: Option<PgHarness>) {
    let Some(harness) = harness else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_code_is_reported_with_the_code skipped");
        return;
    };
    let repo = DieselRiverRepository::new(harness.pool.clone());

    harness.runtime.block_on(async {
        seed(&repo, &[("Rio Doce", "RD-01")]).await;

        let err = repo
            .create(&draft("Rio Doce Baixo", "RD-01"))
            .await
            .expect_err("second insert must trip the code index");

        assert_eq!(err, RiverRepositoryError::duplicate_code("RD-01"));
        assert_eq!(repo.list().await.expect("list").len(), 1);
    });
}

#[rstest]
fn renaming_onto_a_taken_code_is_a_duplicate(harness: Option<PgHarness>) {
    let Some(harness) = harness else {
        eprintln!("SKIP-TEST-CLUSTER: renaming_onto_a_taken_code_is_a_duplicate skipped");
        return;
    };
    let repo = DieselRiverRepository::new(harness.pool.clone());

    harness.runtime.block_on(async {
        seed(&repo, &[("Rio Doce", "RD-01"), ("Rio Pardo", "RP-01")]).await;
        let changes =
            RiverChanges::new(None, Some("RD-01".to_owned()), None).expect("valid changes");

        let err = repo
            .update_by_code("RP-01", &changes)
            .await
            .expect_err("code collision");

        assert_eq!(err, RiverRepositoryError::duplicate_code("RD-01"));
    });
}

#[rstest]
fn partial_update_keeps_omitted_columns(harness: Option<PgHarness>) {
    let Some(harness) = harness else {
        eprintln!("SKIP-TEST-CLUSTER: partial_update_keeps_omitted_columns skipped");
        return;
    };
    let repo = DieselRiverRepository::new(harness.pool.clone());

    harness.runtime.block_on(async {
        let original = repo
            .create(&RiverDraft::new("Rio Doce", "RD-01", "leste").expect("valid draft"))
            .await
            .expect("insert river");
        let changes =
            RiverChanges::new(Some("Rio Doce Baixo".to_owned()), None, None).expect("valid");

        let updated = repo
            .update_by_code("RD-01", &changes)
            .await
            .expect("update")
            .expect("row exists");

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.name, "Rio Doce Baixo");
        assert_eq!(updated.code, "RD-01");
        assert_eq!(updated.description, "leste");
    });
}

#[rstest]
fn empty_changes_return_the_stored_row_or_none(harness: Option<PgHarness>) {
    let Some(harness) = harness else {
        eprintln!("SKIP-TEST-CLUSTER: empty_changes_return_the_stored_row_or_none skipped");
        return;
    };
    let repo = DieselRiverRepository::new(harness.pool.clone());

    harness.runtime.block_on(async {
        let created = seed(&repo, &[("Rio Doce", "RD-01")]).await;

        let unchanged = repo
            .update_by_code("RD-01", &RiverChanges::default())
            .await
            .expect("no-op update");
        let missing = repo
            .update_by_code("NOPE", &RiverChanges::default())
            .await
            .expect("no-op update");

        assert_eq!(unchanged.as_ref(), created.first());
        assert_eq!(missing, None);
    });
}

#[rstest]
#[case::case_insensitive("DOCE", &["RD-01", "RD-02"])]
#[case::literal_percent("50%", &["RP-50"])]
#[case::literal_underscore("a_b", &["RX-01"])]
#[case::no_match("tietê", &[])]
fn search_escapes_wildcards_and_orders_by_id(
    harness: Option<PgHarness>,
    #[case] fragment: &str,
    #[case] expected: &[&str],
) {
    let Some(harness) = harness else {
        eprintln!("SKIP-TEST-CLUSTER: search_escapes_wildcards_and_orders_by_id skipped");
        return;
    };
    let repo = DieselRiverRepository::new(harness.pool.clone());

    harness.runtime.block_on(async {
        seed(
            &repo,
            &[
                ("Rio Doce", "RD-01"),
                ("Rio Pardo 50%", "RP-50"),
                ("Rio Pardo 500", "RP-500"),
                ("Doce Mirim", "RD-02"),
                ("Canal a_b", "RX-01"),
                ("Canal axb", "RX-02"),
            ],
        )
        .await;

        let found = repo.search_by_name(fragment).await.expect("search");
        let codes: Vec<&str> = found.iter().map(|river| river.code.as_str()).collect();

        assert_eq!(codes, expected);
    });
}

#[rstest]
fn lookups_by_code_name_and_id_agree(harness: Option<PgHarness>) {
    let Some(harness) = harness else {
        eprintln!("SKIP-TEST-CLUSTER: lookups_by_code_name_and_id_agree skipped");
        return;
    };
    let repo = DieselRiverRepository::new(harness.pool.clone());

    harness.runtime.block_on(async {
        let created = seed(&repo, &[("Rio Doce", "RD-01")]).await;
        let river = created.first().expect("seeded river");

        let by_code = repo.find_by_code("RD-01").await.expect("by code");
        let by_name = repo.find_by_name("Rio Doce").await.expect("by name");
        let by_id = repo.find_by_id(river.id).await.expect("by id");

        assert_eq!(by_code.as_ref(), Some(river));
        assert_eq!(by_name.as_ref(), Some(river));
        assert_eq!(by_id.as_ref(), Some(river));
        assert_eq!(repo.find_by_name("rio doce").await.expect("exact"), None);
    });
}
