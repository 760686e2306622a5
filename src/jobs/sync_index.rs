use crate::config::AppData;
use crate::gamebanana::GameBananaClient;
use crate::reconcile;
use crate::resolver::LiveFetcher;
use crate::store::SnapshotStore;
use crate::types::api::IndexError;
use crate::webhook::Notify;

/// One full indexing run: load the previous snapshot, fetch the complete
/// listing, reconcile, persist the new snapshot, then publish the change
/// report. The previous snapshot stays untouched on disk unless the run
/// reaches the save step.
pub async fn start<N: Notify>(data: &AppData, notifier: &N) -> Result<(), IndexError> {
    let store = SnapshotStore::new(data.index_path(), data.min_index_path());
    let client = GameBananaClient::new(data);

    let previous = store.load();
    match &previous {
        Some(snapshot) => log::info!(
            "Loaded snapshot with {} mods ({} invalid)",
            snapshot.mod_metas.len(),
            snapshot.invalid_mods.len()
        ),
        None => log::info!("Starting from an empty snapshot"),
    }

    let summaries = match client.fetch_all_summaries().await {
        Ok(summaries) => summaries,
        Err(e) => {
            notifier.publish_run_outcome(false, &e.to_string()).await;
            return Err(e);
        }
    };
    log::info!("Listing complete: {} mods", summaries.len());
    notifier
        .publish_progress(&format!("Reconciling {} listed mods", summaries.len()))
        .await;

    let fetcher = LiveFetcher::new(&client, data.max_download_mb());
    let outcome = reconcile::reconcile(previous.as_ref(), &summaries, &fetcher, notifier).await;

    if let Err(e) = store.save(&outcome.snapshot) {
        notifier.publish_run_outcome(false, &e.to_string()).await;
        return Err(e);
    }

    for meta in &outcome.report.created {
        notifier.publish_created(meta).await;
    }
    for (old, new) in &outcome.report.updated {
        notifier.publish_updated(old, new).await;
    }

    let unchanged = outcome
        .snapshot
        .mod_metas
        .len()
        .saturating_sub(outcome.report.created.len() + outcome.report.updated.len());
    let detail = format!(
        "{} created, {} updated, {} unchanged, {} invalid",
        outcome.report.created.len(),
        outcome.report.updated.len(),
        unchanged,
        outcome.snapshot.invalid_mods.len()
    );
    log::info!("Sync finished: {}", detail);
    notifier.publish_run_outcome(true, &detail).await;

    Ok(())
}
