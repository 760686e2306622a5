use crate::resolver::{self, ModFetcher};
use crate::types::models::mod_meta::ModSummary;
use crate::types::models::snapshot::{ChangeReport, Snapshot};
use crate::webhook::Notify;

pub struct SyncOutcome {
    pub snapshot: Snapshot,
    pub report: ChangeReport,
}

/// Walks the fresh listing against the previous snapshot and builds the new
/// one, resolving only mods whose listing entry changed.
///
/// Each summary lands in exactly one bucket: carried unchanged, carried
/// invalid, newly indexed (created or updated), or newly invalid. A single
/// mod's resolution failure is recorded and the run continues; only the
/// listing fetch upstream of this function is fatal.
pub async fn reconcile<F: ModFetcher, N: Notify>(
    previous: Option<&Snapshot>,
    summaries: &[ModSummary],
    fetcher: &F,
    notifier: &N,
) -> SyncOutcome {
    let mut next = Snapshot::default();
    let mut report = ChangeReport::default();

    // The subfeed lists newest-first; walking it in reverse emits created/
    // updated entries oldest-to-newest for downstream notification. This is
    // an assumption about the listing's ordering, not about the algorithm.
    for summary in summaries.iter().rev() {
        if next.contains(summary.id) {
            log::warn!("Duplicate listing entry for mod {}, skipping", summary.id);
            continue;
        }

        let prev_record = previous.and_then(|s| s.record(summary.id));

        if let Some(prev) = prev_record {
            if prev.last_modified == summary.last_modified {
                next.insert(prev.clone());
                continue;
            }
        }

        if prev_record.is_none() {
            if let Some(invalid) = previous.and_then(|s| s.invalid_entry(summary.id)) {
                if invalid.last_modified == summary.last_modified {
                    next.invalid_mods.push(invalid.clone());
                    continue;
                }
            }
        }

        match resolver::resolve(fetcher, prev_record, summary).await {
            Ok(meta) => {
                log::info!("Resolved mod {} ({})", summary.id, summary.name);
                match prev_record {
                    Some(old) => report.updated.push((old.clone(), meta.clone())),
                    None => report.created.push(meta.clone()),
                }
                next.insert(meta);
            }
            Err(e) => {
                log::warn!(
                    "Mod {} ({}) failed to resolve, marking invalid: {}",
                    summary.id,
                    summary.name,
                    e
                );
                notifier.publish_invalid(summary, &e).await;
                // the fresh summary, not the stale invalid marker: its
                // modify date is what rule (b) compares against next run
                next.invalid_mods.push(summary.clone());
            }
        }
    }

    SyncOutcome {
        snapshot: next,
        report,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::resolver::test_support::*;
    use crate::types::api::IndexError;
    use crate::types::models::mod_meta::ModMetadata;

    #[derive(Default)]
    struct RecordingNotifier {
        invalids: RefCell<Vec<(u64, String)>>,
    }

    impl Notify for RecordingNotifier {
        async fn publish_created(&self, _meta: &ModMetadata) {}
        async fn publish_updated(&self, _old: &ModMetadata, _new: &ModMetadata) {}
        async fn publish_invalid(&self, summary: &ModSummary, reason: &IndexError) {
            self.invalids
                .borrow_mut()
                .push((summary.id, reason.to_string()));
        }
        async fn publish_progress(&self, _message: &str) {}
        async fn publish_run_outcome(&self, _success: bool, _detail: &str) {}
    }

    fn previous_with(metas: Vec<ModMetadata>, invalid: Vec<ModSummary>) -> Snapshot {
        let mut snapshot = Snapshot::default();
        for meta in metas {
            snapshot.insert(meta);
        }
        snapshot.invalid_mods = invalid;
        snapshot
    }

    #[tokio::test]
    async fn unchanged_mod_is_carried_without_any_network_call() {
        let previous = previous_with(
            vec![ModMetadata::from_manifest(
                &summary(42, 100),
                detail(42, 10),
                manifest("1.0.0"),
            )],
            vec![],
        );
        let fetcher = FakeFetcher::default();
        let notifier = RecordingNotifier::default();

        let outcome = reconcile(Some(&previous), &[summary(42, 100)], &fetcher, &notifier).await;

        assert_eq!(fetcher.detail_calls.get(), 0);
        assert_eq!(fetcher.manifest_calls.get(), 0);
        assert!(outcome.report.is_empty());
        assert_eq!(outcome.snapshot.record(42), previous.record(42));
    }

    #[tokio::test]
    async fn metadata_bump_with_unchanged_artifact_reuses_manifest_fields() {
        let previous = previous_with(
            vec![ModMetadata::from_manifest(
                &summary(42, 100),
                detail(42, 10),
                manifest("1.0.0"),
            )],
            vec![],
        );
        let fetcher = FakeFetcher {
            details: [(42, detail(42, 10))].into(),
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();

        let outcome = reconcile(Some(&previous), &[summary(42, 200)], &fetcher, &notifier).await;

        assert_eq!(fetcher.detail_calls.get(), 1);
        assert_eq!(fetcher.manifest_calls.get(), 0);
        assert_eq!(outcome.report.created.len(), 0);
        assert_eq!(outcome.report.updated.len(), 1);

        let (old, new) = &outcome.report.updated[0];
        assert_eq!(old.last_modified, ts(100));
        assert_eq!(new.last_modified, ts(200));
        assert_eq!(new.version.as_deref(), Some("1.0.0"));
    }

    #[tokio::test]
    async fn manifest_not_found_marks_the_mod_invalid() {
        let fetcher = FakeFetcher {
            details: [(99, detail(99, 10))].into(),
            manifests: [(
                "mod_99.zip".to_string(),
                Err(IndexError::ManifestNotFound("manifest.json".into())),
            )]
            .into(),
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();

        let outcome = reconcile(None, &[summary(99, 100)], &fetcher, &notifier).await;

        assert!(outcome.snapshot.record(99).is_none());
        assert_eq!(outcome.snapshot.invalid_mods.len(), 1);
        assert_eq!(outcome.snapshot.invalid_mods[0].id, 99);
        assert_eq!(outcome.snapshot.invalid_mods[0].last_modified, ts(100));
        assert!(outcome.report.is_empty());
        assert_eq!(notifier.invalids.borrow().len(), 1);
        assert_eq!(notifier.invalids.borrow()[0].0, 99);
    }

    #[tokio::test]
    async fn still_invalid_mod_is_carried_without_refetching() {
        let previous = previous_with(vec![], vec![summary(99, 100)]);
        let fetcher = FakeFetcher::default();
        let notifier = RecordingNotifier::default();

        let outcome = reconcile(Some(&previous), &[summary(99, 100)], &fetcher, &notifier).await;

        assert_eq!(fetcher.detail_calls.get(), 0);
        assert_eq!(outcome.snapshot.invalid_mods.len(), 1);
        assert!(notifier.invalids.borrow().is_empty());
    }

    #[tokio::test]
    async fn invalid_mod_with_new_modify_date_is_retried() {
        let previous = previous_with(vec![], vec![summary(99, 100)]);
        let fetcher = FakeFetcher {
            details: [(99, detail(99, 10))].into(),
            manifests: [("mod_99.zip".to_string(), Ok(manifest("1.0.0")))].into(),
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();

        let outcome = reconcile(Some(&previous), &[summary(99, 200)], &fetcher, &notifier).await;

        assert_eq!(fetcher.detail_calls.get(), 1);
        assert!(outcome.snapshot.invalid_mods.is_empty());
        // it never made it into the index before, so this is a creation
        assert_eq!(outcome.report.created.len(), 1);
        assert_eq!(outcome.report.created[0].id, 99);
    }

    #[tokio::test]
    async fn created_entries_come_out_oldest_first() {
        // listing order is newest-first: 3, 2, 1
        let summaries = vec![summary(3, 300), summary(2, 200), summary(1, 100)];
        let fetcher = FakeFetcher {
            details: [(1, detail(1, 10)), (2, detail(2, 20)), (3, detail(3, 30))].into(),
            manifests: [
                ("mod_1.zip".to_string(), Ok(manifest("1.0.0"))),
                ("mod_2.zip".to_string(), Ok(manifest("1.0.0"))),
                ("mod_3.zip".to_string(), Ok(manifest("1.0.0"))),
            ]
            .into(),
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();

        let outcome = reconcile(None, &summaries, &fetcher, &notifier).await;

        let created_ids: Vec<u64> = outcome.report.created.iter().map(|m| m.id).collect();
        assert_eq!(created_ids, [1, 2, 3]);
        assert_eq!(outcome.snapshot.id_to_index[&1], 0);
        assert_eq!(outcome.snapshot.id_to_index[&3], 2);
    }

    #[tokio::test]
    async fn every_summary_lands_in_exactly_one_bucket() {
        let previous = previous_with(
            vec![
                // will be carried unchanged
                ModMetadata::from_manifest(&summary(1, 100), detail(1, 10), manifest("1.0.0")),
                // will be updated
                ModMetadata::from_manifest(&summary(2, 100), detail(2, 20), manifest("1.0.0")),
            ],
            // will be carried invalid
            vec![summary(3, 100)],
        );
        let fetcher = FakeFetcher {
            details: [(2, detail(2, 25)), (4, detail(4, 40))].into(),
            manifests: [
                ("mod_2.zip".to_string(), Ok(manifest("2.0.0"))),
                ("mod_4.zip".to_string(), Ok(manifest("1.0.0"))),
            ]
            .into(),
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();

        let summaries = vec![
            summary(5, 500), // new, no detail available -> newly invalid
            summary(4, 400), // new -> created
            summary(3, 100), // carried invalid
            summary(2, 200), // updated
            summary(1, 100), // carried unchanged
        ];

        let outcome = reconcile(Some(&previous), &summaries, &fetcher, &notifier).await;

        assert_eq!(
            outcome.snapshot.id_to_index.len() + outcome.snapshot.invalid_mods.len(),
            summaries.len()
        );
        assert_eq!(outcome.report.created.len(), 1);
        assert_eq!(outcome.report.updated.len(), 1);
        assert_eq!(outcome.snapshot.invalid_mods.len(), 2);
        for summary in &summaries {
            let indexed = outcome.snapshot.record(summary.id).is_some();
            let invalid = outcome.snapshot.invalid_entry(summary.id).is_some();
            assert!(indexed ^ invalid, "mod {} must be in exactly one", summary.id);
        }
    }

    #[tokio::test]
    async fn rerunning_with_no_remote_changes_is_idempotent() {
        let summaries = vec![summary(2, 200), summary(1, 100)];
        let fetcher = FakeFetcher {
            details: [(1, detail(1, 10)), (2, detail(2, 20))].into(),
            manifests: [
                ("mod_1.zip".to_string(), Ok(manifest("1.0.0"))),
                ("mod_2.zip".to_string(), Ok(manifest("1.0.0"))),
            ]
            .into(),
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();

        let first = reconcile(None, &summaries, &fetcher, &notifier).await;

        let idle_fetcher = FakeFetcher::default();
        let second = reconcile(Some(&first.snapshot), &summaries, &idle_fetcher, &notifier).await;

        assert_eq!(idle_fetcher.detail_calls.get(), 0);
        assert_eq!(idle_fetcher.manifest_calls.get(), 0);
        assert!(second.report.is_empty());
        assert_eq!(second.snapshot, first.snapshot);
    }

    #[tokio::test]
    async fn cold_start_classifies_nothing_as_unchanged() {
        let fetcher = FakeFetcher {
            details: [(1, detail(1, 10))].into(),
            manifests: [("mod_1.zip".to_string(), Ok(manifest("1.0.0")))].into(),
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();

        let outcome = reconcile(None, &[summary(1, 100), summary(2, 200)], &fetcher, &notifier)
            .await;

        // everything is either created or invalid on a cold start
        assert_eq!(outcome.report.created.len(), 1);
        assert_eq!(outcome.snapshot.invalid_mods.len(), 1);
        assert_eq!(outcome.report.updated.len(), 0);
    }

    #[tokio::test]
    async fn duplicate_listing_entries_are_skipped() {
        let fetcher = FakeFetcher {
            details: [(1, detail(1, 10))].into(),
            manifests: [("mod_1.zip".to_string(), Ok(manifest("1.0.0")))].into(),
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();

        let outcome = reconcile(
            None,
            &[summary(1, 100), summary(1, 100)],
            &fetcher,
            &notifier,
        )
        .await;

        assert_eq!(fetcher.detail_calls.get(), 1);
        assert_eq!(outcome.snapshot.mod_metas.len(), 1);
        assert_eq!(outcome.report.created.len(), 1);
    }
}
