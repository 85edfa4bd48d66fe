use crate::models::UserProgress;
use chrono::NaiveDate;

/// What a streak evaluation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// First qualifying action ever recorded.
    Started,
    /// Already evaluated today.
    Unchanged,
    /// Last qualifying day was yesterday.
    Extended,
    /// More than one day was missed.
    Broken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub streak: u32,
    pub last_checked: NaiveDate,
    pub transition: Transition,
}

/// Day-granularity streak machine. Both trigger points (login and challenge
/// completion) run this same evaluation; the reset consumes the trigger, so
/// after a missed day the comeback day reads 0 and counting resumes tomorrow.
pub fn evaluate(streak: u32, last_checked: Option<NaiveDate>, today: NaiveDate) -> Evaluation {
    match last_checked {
        None => Evaluation {
            streak: streak + 1,
            last_checked: today,
            transition: Transition::Started,
        },
        Some(last) => {
            let gap = (today - last).num_days();
            if gap <= 0 {
                // Same day, or the clock moved backwards. Never move the
                // checked date back in time.
                Evaluation {
                    streak,
                    last_checked: last,
                    transition: Transition::Unchanged,
                }
            } else if gap == 1 {
                Evaluation {
                    streak: streak + 1,
                    last_checked: today,
                    transition: Transition::Extended,
                }
            } else {
                Evaluation {
                    streak: 0,
                    last_checked: today,
                    transition: Transition::Broken,
                }
            }
        }
    }
}

/// Applies the evaluation to a progress document in place.
pub fn apply(progress: &mut UserProgress, today: NaiveDate) -> Transition {
    let evaluation = evaluate(progress.streak, progress.streak_last_checked, today);
    progress.streak = evaluation.streak;
    progress.streak_last_checked = Some(evaluation.last_checked);
    evaluation.transition
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_qualifying_action_starts_streak() {
        let today = day(2026, 3, 10);
        let eval = evaluate(0, None, today);
        assert_eq!(eval.streak, 1);
        assert_eq!(eval.last_checked, today);
        assert_eq!(eval.transition, Transition::Started);
    }

    #[test]
    fn checked_yesterday_extends() {
        let today = day(2026, 3, 10);
        let eval = evaluate(4, Some(today - Duration::days(1)), today);
        assert_eq!(eval.streak, 5);
        assert_eq!(eval.last_checked, today);
        assert_eq!(eval.transition, Transition::Extended);
    }

    #[test]
    fn checked_today_is_a_no_op() {
        let today = day(2026, 3, 10);
        let eval = evaluate(4, Some(today), today);
        assert_eq!(eval.streak, 4);
        assert_eq!(eval.last_checked, today);
        assert_eq!(eval.transition, Transition::Unchanged);
    }

    #[test]
    fn missed_days_reset_to_zero() {
        let today = day(2026, 3, 10);
        let eval = evaluate(7, Some(today - Duration::days(3)), today);
        assert_eq!(eval.streak, 0);
        assert_eq!(eval.last_checked, today);
        assert_eq!(eval.transition, Transition::Broken);
    }

    #[test]
    fn reset_absorbs_same_day_follow_up() {
        let today = day(2026, 3, 10);
        let broken = evaluate(7, Some(today - Duration::days(3)), today);
        let again = evaluate(broken.streak, Some(broken.last_checked), today);
        assert_eq!(again.streak, 0);
        assert_eq!(again.transition, Transition::Unchanged);

        let tomorrow = today + Duration::days(1);
        let resumed = evaluate(again.streak, Some(again.last_checked), tomorrow);
        assert_eq!(resumed.streak, 1);
        assert_eq!(resumed.transition, Transition::Extended);
    }

    #[test]
    fn future_checked_date_is_left_alone() {
        let today = day(2026, 3, 10);
        let tomorrow = today + Duration::days(1);
        let eval = evaluate(2, Some(tomorrow), today);
        assert_eq!(eval.streak, 2);
        assert_eq!(eval.last_checked, tomorrow);
        assert_eq!(eval.transition, Transition::Unchanged);
    }

    #[test]
    fn apply_updates_document() {
        let mut progress = UserProgress::new();
        let today = day(2026, 3, 10);
        let transition = apply(&mut progress, today);
        assert_eq!(transition, Transition::Started);
        assert_eq!(progress.streak, 1);
        assert_eq!(progress.streak_last_checked, Some(today));
    }
}
