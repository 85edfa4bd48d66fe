use crate::errors::ProgressError;
use crate::level::level_for_coins;
use crate::models::UserProgress;
use crate::store::ProgressStore;
use crate::streak;
use chrono::NaiveDate;
use tracing::info;

pub const CHALLENGE_REWARD_COINS: u64 = 10;

#[derive(Debug)]
pub struct CompletionOutcome {
    pub progress: UserProgress,
    pub leveled_up: bool,
}

/// Creates the progression document for a fresh account.
pub async fn register_user(
    store: &ProgressStore,
    username: &str,
) -> Result<UserProgress, ProgressError> {
    let progress = store.create_user(username).await?;
    info!(user = username, "account registered");
    Ok(progress)
}

/// Marks one of today's challenges complete, awards the coin reward,
/// recomputes the level, and advances the streak — all in one transaction on
/// the user's document. Completing a challenge that is missing from today's
/// set or already done is rejected before anything is written.
pub async fn complete_challenge(
    store: &ProgressStore,
    username: &str,
    challenge: &str,
    today: NaiveDate,
) -> Result<CompletionOutcome, ProgressError> {
    let mut leveled_up = false;
    let progress = store
        .run_transaction(username, |doc| {
            match doc.challenges.get(challenge) {
                None => return Err(ProgressError::UnknownChallenge(challenge.to_string())),
                Some(true) => return Err(ProgressError::AlreadyCompleted(challenge.to_string())),
                Some(false) => {}
            }
            doc.challenges.insert(challenge.to_string(), true);

            let previous_level = doc.level;
            doc.coins += CHALLENGE_REWARD_COINS;
            doc.level = level_for_coins(doc.coins);
            leveled_up = doc.level > previous_level;

            streak::apply(doc, today);
            Ok(())
        })
        .await?;

    info!(
        user = username,
        challenge,
        coins = progress.coins,
        level = progress.level,
        leveled_up,
        "challenge completed"
    );
    Ok(CompletionOutcome {
        progress,
        leveled_up,
    })
}

/// Login-time streak evaluation: extends or breaks the streak exactly as a
/// completion would, so a missed day is caught as soon as the user shows up.
pub async fn record_login(
    store: &ProgressStore,
    username: &str,
    today: NaiveDate,
) -> Result<UserProgress, ProgressError> {
    let mut transition = streak::Transition::Unchanged;
    let progress = store
        .run_transaction(username, |doc| {
            transition = streak::apply(doc, today);
            Ok(())
        })
        .await?;

    info!(
        user = username,
        streak = progress.streak,
        ?transition,
        "login streak check"
    );
    Ok(progress)
}
