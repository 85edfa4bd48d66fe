use crate::models::{LeaderboardEntry, UserProgress};

pub const PODIUM_SIZE: usize = 3;

#[derive(Debug)]
pub struct Leaderboard {
    pub podium: Vec<LeaderboardEntry>,
    pub rest: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// 1-based rank of a user, or `None` when they are not on the board.
    pub fn rank_of(&self, username: &str) -> Option<u32> {
        self.podium
            .iter()
            .chain(self.rest.iter())
            .find(|entry| entry.username == username)
            .map(|entry| entry.rank)
    }
}

/// Full re-rank of every user by coin total, descending. The sort is stable,
/// so ties keep the order the store handed them over in (username order).
/// Small population, recomputed on every call.
pub fn rank_users(users: Vec<(String, UserProgress)>) -> Leaderboard {
    let mut users = users;
    users.sort_by(|(_, a), (_, b)| b.coins.cmp(&a.coins));

    let mut entries = users.into_iter().enumerate().map(|(index, (username, progress))| {
        LeaderboardEntry {
            rank: index as u32 + 1,
            username,
            coins: progress.coins,
            level: progress.level,
        }
    });

    let podium = entries.by_ref().take(PODIUM_SIZE).collect();
    let rest = entries.collect();
    Leaderboard { podium, rest }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, coins: u64) -> (String, UserProgress) {
        let mut progress = UserProgress::new();
        progress.coins = coins;
        (name.to_string(), progress)
    }

    #[test]
    fn ranks_are_a_permutation_by_descending_coins() {
        let board = rank_users(vec![
            user("ash", 50),
            user("birch", 200),
            user("cedar", 200),
            user("dahlia", 10),
        ]);

        let all: Vec<_> = board.podium.iter().chain(board.rest.iter()).collect();
        let mut ranks: Vec<u32> = all.iter().map(|entry| entry.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3, 4]);

        assert_eq!(all[0].username, "birch");
        assert_eq!(all[1].username, "cedar");
        assert_eq!(all[2].username, "ash");
        assert_eq!(all[3].username, "dahlia");
    }

    #[test]
    fn ties_keep_input_order() {
        let first = rank_users(vec![user("birch", 200), user("cedar", 200)]);
        let second = rank_users(vec![user("birch", 200), user("cedar", 200)]);
        assert_eq!(first.podium[0].username, "birch");
        assert_eq!(second.podium[0].username, "birch");
        assert_eq!(first.podium[1].rank, 2);
    }

    #[test]
    fn podium_and_rest_split_at_three() {
        let board = rank_users(vec![
            user("ash", 40),
            user("birch", 30),
            user("cedar", 20),
            user("dahlia", 10),
            user("elm", 5),
        ]);
        assert_eq!(board.podium.len(), 3);
        assert_eq!(board.rest.len(), 2);
        assert_eq!(board.rest[0].rank, 4);
    }

    #[test]
    fn small_boards_have_no_rest() {
        let board = rank_users(vec![user("ash", 1)]);
        assert_eq!(board.podium.len(), 1);
        assert!(board.rest.is_empty());
    }

    #[test]
    fn rank_of_finds_users_and_sentinels_missing_ones() {
        let board = rank_users(vec![user("ash", 50), user("birch", 200)]);
        assert_eq!(board.rank_of("birch"), Some(1));
        assert_eq!(board.rank_of("ash"), Some(2));
        assert_eq!(board.rank_of("nobody"), None);
    }
}
