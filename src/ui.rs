use crate::leaderboard::Leaderboard;
use crate::models::{LeaderboardEntry, UserProgress};

pub fn render_index(board: &Leaderboard, viewer: Option<&(String, UserProgress)>) -> String {
    let podium = if board.podium.is_empty() {
        "<p class=\"empty\">No users yet. Register one via the API to get started.</p>".to_string()
    } else {
        board.podium.iter().map(podium_card).collect()
    };
    let rest: String = board.rest.iter().map(list_row).collect();

    INDEX_HTML
        .replace("{{VIEWER}}", &viewer_card(viewer))
        .replace("{{PODIUM}}", &podium)
        .replace("{{REST}}", &rest)
}

fn podium_card(entry: &LeaderboardEntry) -> String {
    format!(
        "<div class=\"podium-card rank-{}\"><span class=\"rank\">#{}</span>\
         <span class=\"name\">{}</span><span class=\"coins\">{} coins</span>\
         <span class=\"level\">Lv {}</span></div>",
        entry.rank,
        entry.rank,
        escape(&entry.username),
        entry.coins,
        entry.level,
    )
}

fn list_row(entry: &LeaderboardEntry) -> String {
    format!(
        "<li><span class=\"rank\">{}</span><span class=\"name\">{}</span>\
         <span class=\"coins\">{} coins</span></li>",
        entry.rank,
        escape(&entry.username),
        entry.coins,
    )
}

fn viewer_card(viewer: Option<&(String, UserProgress)>) -> String {
    let Some((name, progress)) = viewer else {
        return String::new();
    };
    let done = progress.challenges.values().filter(|done| **done).count();
    format!(
        "<section class=\"viewer\"><h2>Hi, {}</h2>\
         <div class=\"stats\"><span>{} coins</span><span>Level {}</span>\
         <span>{} day streak</span><span>{}/{} challenges today</span></div></section>",
        escape(name),
        progress.coins,
        progress.level,
        progress.streak,
        done,
        progress.challenges.len(),
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>EcoTrack</title>
  <style>
    :root {
      --bg-1: #f2f7ef;
      --bg-2: #cfe3c4;
      --ink: #12372a;
      --accent: #79a065;
      --accent-2: #056b4b;
      --gold: #ffc453;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 20px 48px rgba(5, 107, 75, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4efdc 60%, #f4f8f0 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", "Segoe UI", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: 2.2rem;
      color: var(--accent-2);
    }

    .subtitle {
      margin: 0;
      color: #5a7a4e;
    }

    .viewer {
      background: var(--accent);
      color: white;
      border-radius: 16px;
      padding: 16px 20px;
    }

    .viewer h2 {
      margin: 0 0 8px;
    }

    .viewer .stats {
      display: flex;
      flex-wrap: wrap;
      gap: 16px;
      font-weight: 600;
    }

    .podium {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 12px;
    }

    .podium-card {
      background: white;
      border: 1px solid rgba(5, 107, 75, 0.12);
      border-radius: 16px;
      padding: 14px;
      display: grid;
      gap: 4px;
      text-align: center;
    }

    .podium-card.rank-1 {
      border-color: var(--gold);
      box-shadow: 0 10px 24px rgba(255, 196, 83, 0.35);
    }

    .podium-card .rank {
      font-size: 1.2rem;
      font-weight: 700;
      color: var(--accent-2);
    }

    .podium-card .coins {
      color: #b98a1d;
      font-weight: 600;
    }

    ol.board {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    ol.board li {
      display: flex;
      gap: 14px;
      align-items: baseline;
      background: white;
      border: 1px solid rgba(5, 107, 75, 0.1);
      border-radius: 12px;
      padding: 10px 16px;
    }

    ol.board .rank {
      font-weight: 700;
      width: 2ch;
    }

    ol.board .coins {
      margin-left: auto;
      color: #8b857d;
    }

    .empty {
      color: #8b857d;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>EcoTrack</h1>
      <p class="subtitle">Daily eco-challenges, streaks, and the leaderboard.</p>
    </header>
    {{VIEWER}}
    <section>
      <div class="podium">{{PODIUM}}</div>
    </section>
    <section>
      <ol class="board">{{REST}}</ol>
    </section>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::rank_users;

    #[test]
    fn index_lists_podium_and_viewer() {
        let mut progress = UserProgress::new();
        progress.coins = 120;
        progress.level = 2;
        let board = rank_users(vec![("willow".to_string(), progress.clone())]);

        let page = render_index(&board, Some(&("willow".to_string(), progress)));
        assert!(page.contains("willow"));
        assert!(page.contains("120 coins"));
        assert!(page.contains("Hi, willow"));
    }

    #[test]
    fn usernames_are_escaped() {
        let progress = UserProgress::new();
        let board = rank_users(vec![("<script>".to_string(), progress)]);
        let page = render_index(&board, None);
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
