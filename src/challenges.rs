use crate::errors::ProgressError;
use crate::store::ProgressStore;
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use tracing::info;

pub const DAILY_CHALLENGE_COUNT: usize = 5;

/// Built-in challenge pool, used whenever the data file carries none.
pub fn default_pool() -> Vec<String> {
    [
        "Bike or walk instead of driving",
        "Use a reusable water bottle",
        "Recycle your plastic waste",
        "Take a five-minute shower",
        "Eat a meat-free meal",
        "Unplug idle electronics",
        "Take public transport",
        "Bring a reusable bag to the store",
        "Air-dry your laundry",
        "Switch off unused lights",
        "Compost your food scraps",
        "Buy a local seasonal product",
        "Skip single-use cutlery",
        "Lower your thermostat by one degree",
        "Pick up litter on your walk",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

/// Draws a fresh daily set: a random sample without replacement, every entry
/// starting uncompleted. Short pools yield short sets.
pub fn draw_daily(pool: &[String], count: usize, rng: &mut impl Rng) -> BTreeMap<String, bool> {
    pool.choose_multiple(rng, count)
        .map(|name| (name.clone(), false))
        .collect()
}

/// Returns the user's active challenge set for `today`, drawing and persisting
/// a fresh one when the stored set is stale or missing. Repeat calls within
/// the same day return the same set; the previous day's map is replaced, not
/// merged into.
pub async fn ensure_daily_set(
    store: &ProgressStore,
    username: &str,
    today: NaiveDate,
) -> Result<BTreeMap<String, bool>, ProgressError> {
    let progress = store.get_user_progress(username).await?;
    if progress.last_updated == Some(today) && !progress.challenges.is_empty() {
        return Ok(progress.challenges);
    }

    let pool = store.challenge_pool().await;
    if pool.is_empty() {
        return Err(ProgressError::EmptyPool);
    }
    let fresh = draw_daily(&pool, DAILY_CHALLENGE_COUNT, &mut rand::thread_rng());

    let mut replaced = false;
    let updated = store
        .run_transaction(username, |doc| {
            replaced = false;
            if doc.last_updated == Some(today) && !doc.challenges.is_empty() {
                // Another request refreshed the set first; keep theirs.
                return Ok(());
            }
            doc.challenges = fresh.clone();
            doc.last_updated = Some(today);
            replaced = true;
            Ok(())
        })
        .await?;

    if replaced {
        info!(user = username, %today, "daily challenges refreshed");
    }
    Ok(updated.challenges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreData;
    use chrono::Duration;

    fn temp_store(tag: &str) -> ProgressStore {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("ecotrack_{tag}_{}_{nanos}.json", std::process::id()));
        ProgressStore::new(path, StoreData::default())
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn draw_takes_a_subset_of_the_pool() {
        let pool = default_pool();
        let drawn = draw_daily(&pool, DAILY_CHALLENGE_COUNT, &mut rand::thread_rng());
        assert_eq!(drawn.len(), DAILY_CHALLENGE_COUNT);
        assert!(drawn.keys().all(|name| pool.contains(name)));
        assert!(drawn.values().all(|done| !done));
    }

    #[test]
    fn draw_from_a_short_pool_takes_everything() {
        let pool = vec!["a".to_string(), "b".to_string()];
        let drawn = draw_daily(&pool, DAILY_CHALLENGE_COUNT, &mut rand::thread_rng());
        assert_eq!(drawn.len(), 2);
    }

    #[tokio::test]
    async fn same_day_calls_return_the_same_set() {
        let store = temp_store("idempotent");
        store.create_user("willow").await.unwrap();
        let today = day(2026, 3, 10);

        let first = ensure_daily_set(&store, "willow", today).await.unwrap();
        let second = ensure_daily_set(&store, "willow", today).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), DAILY_CHALLENGE_COUNT);
    }

    #[tokio::test]
    async fn a_new_day_replaces_the_previous_set() {
        let store = temp_store("replace");
        store.create_user("willow").await.unwrap();
        let yesterday = day(2026, 3, 9);
        let today = yesterday + Duration::days(1);

        ensure_daily_set(&store, "willow", yesterday).await.unwrap();
        // Mark one complete so we can tell a replacement from a merge.
        store
            .run_transaction("willow", |doc| {
                let first = doc.challenges.keys().next().unwrap().clone();
                doc.challenges.insert(first, true);
                Ok(())
            })
            .await
            .unwrap();

        let fresh = ensure_daily_set(&store, "willow", today).await.unwrap();
        assert_eq!(fresh.len(), DAILY_CHALLENGE_COUNT);
        assert!(fresh.values().all(|done| !done));

        let progress = store.get_user_progress("willow").await.unwrap();
        assert_eq!(progress.last_updated, Some(today));
        assert_eq!(progress.challenges.len(), DAILY_CHALLENGE_COUNT);
    }

    #[tokio::test]
    async fn unknown_user_surfaces_not_found() {
        let store = temp_store("nouser");
        let err = ensure_daily_set(&store, "nobody", day(2026, 3, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::UserNotFound(_)));
    }
}
