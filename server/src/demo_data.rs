use chrono::{TimeZone, Utc};
use engine::Mode;

use crate::store::{LeaderboardEntry, LeaderboardStore, UserStore};

const DEMO_PASSWORD: &str = "password123";

/// Populate the in-memory stores with the sample accounts and scores
/// the demo deployment ships with.
pub fn seed(users: &dyn UserStore, leaderboard: &dyn LeaderboardStore) {
    let demo_users = [
        ("SnakeMaster", "master@snake.example", 156, 42, (2024, 1, 15)),
        ("NeonViper", "viper@snake.example", 134, 38, (2024, 2, 20)),
        ("PixelHunter", "pixel@snake.example", 128, 55, (2024, 1, 8)),
        ("RetroGamer", "retro@snake.example", 210, 89, (2023, 11, 5)),
        ("SpeedDemon", "speed@snake.example", 88, 15, (2024, 3, 1)),
        ("GlitchInTheMatrix", "glitch@snake.example", 342, 112, (2023, 10, 12)),
    ];
    for (username, email, high_score, games_played, (year, month, day)) in demo_users {
        let mut user = users.register(username, email, DEMO_PASSWORD);
        user.high_score = high_score;
        user.games_played = games_played;
        user.created_at = Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap();
        users.put(user);
    }

    let demo_scores = [
        ("SnakeMaster", 156, Mode::Walls, (2024, 12, 28)),
        ("NeonViper", 134, Mode::Passthrough, (2024, 12, 27)),
        ("PixelHunter", 128, Mode::Walls, (2024, 12, 26)),
        ("RetroGamer", 210, Mode::Passthrough, (2024, 12, 20)),
        ("GlitchInTheMatrix", 342, Mode::Walls, (2024, 12, 10)),
        ("SpeedDemon", 88, Mode::Passthrough, (2024, 12, 29)),
        ("NeonViper", 130, Mode::Walls, (2024, 12, 14)),
        ("SnakeMaster", 140, Mode::Passthrough, (2024, 12, 15)),
    ];
    for (index, (username, score, mode, (year, month, day))) in demo_scores.into_iter().enumerate() {
        leaderboard.put(LeaderboardEntry {
            id: format!("seed-{}", index + 1),
            username: username.to_string(),
            score,
            mode,
            date: Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap(),
        });
    }
}
