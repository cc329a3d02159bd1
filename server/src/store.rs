use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use engine::Mode;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub high_score: u32,
    pub games_played: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub username: String,
    pub score: u32,
    pub mode: Mode,
    pub date: DateTime<Utc>,
}

/// A finished game reported by a session.
#[derive(Debug, Clone)]
pub struct NewScore {
    pub username: String,
    pub score: u32,
    pub mode: Mode,
}

/// Identity collaborator: account lookup, credentials, per-user stats.
/// The engine never sees this; sessions consult it at the game-over
/// boundary.
pub trait UserStore: Send + Sync {
    fn get(&self, id: &UserId) -> Option<User>;
    fn find_by_email(&self, email: &str) -> Option<User>;
    fn find_by_username(&self, username: &str) -> Option<User>;
    fn put(&self, user: User);
    fn list(&self) -> Vec<User>;
    fn verify_password(&self, email: &str, password: &str) -> bool;
    fn register(&self, username: &str, email: &str, password: &str) -> User;
    /// Bump games_played and raise the high score if beaten. Returns
    /// the updated user.
    fn record_game(&self, id: &UserId, score: u32) -> Option<User>;
}

/// Score repository: ranked inserts plus mode-filtered listing.
pub trait LeaderboardStore: Send + Sync {
    fn put(&self, entry: LeaderboardEntry);
    fn list(&self, mode: Option<Mode>) -> Vec<LeaderboardEntry>;
    /// Insert a freshly finished game and return its 1-based rank over
    /// all entries, both modes combined. Ties rank below earlier
    /// entries with the same score.
    fn submit(&self, score: NewScore) -> u32;
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    passwords: Mutex<HashMap<String, String>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryUserStore {
    fn get(&self, id: &UserId) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| &u.id == id).cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.email == email).cloned()
    }

    fn find_by_username(&self, username: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    fn put(&self, user: User) {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => users.push(user),
        }
    }

    fn list(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn verify_password(&self, email: &str, password: &str) -> bool {
        self.passwords
            .lock()
            .unwrap()
            .get(email)
            .is_some_and(|stored| stored == password)
    }

    fn register(&self, username: &str, email: &str, password: &str) -> User {
        let mut users = self.users.lock().unwrap();
        let user = User {
            id: UserId::new((users.len() + 1).to_string()),
            username: username.to_string(),
            email: email.to_string(),
            high_score: 0,
            games_played: 0,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        self.passwords
            .lock()
            .unwrap()
            .insert(email.to_string(), password.to_string());
        user
    }

    fn record_game(&self, id: &UserId, score: u32) -> Option<User> {
        let mut users = self.users.lock().unwrap();
        let user = users.iter_mut().find(|u| &u.id == id)?;
        user.games_played += 1;
        if score > user.high_score {
            user.high_score = score;
        }
        Some(user.clone())
    }
}

#[derive(Default)]
pub struct MemoryLeaderboard {
    entries: Mutex<Vec<LeaderboardEntry>>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeaderboardStore for MemoryLeaderboard {
    fn put(&self, entry: LeaderboardEntry) {
        self.entries.lock().unwrap().push(entry);
    }

    fn list(&self, mode: Option<Mode>) -> Vec<LeaderboardEntry> {
        let entries = self.entries.lock().unwrap();
        let mut selected: Vec<LeaderboardEntry> = entries
            .iter()
            .filter(|e| mode.is_none_or(|m| e.mode == m))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.score.cmp(&a.score));
        selected
    }

    fn submit(&self, score: NewScore) -> u32 {
        let mut entries = self.entries.lock().unwrap();
        let entry = LeaderboardEntry {
            id: random_id(16),
            username: score.username,
            score: score.score,
            mode: score.mode,
            date: Utc::now(),
        };
        let id = entry.id.clone();
        entries.push(entry);

        let mut sorted: Vec<&LeaderboardEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
            .iter()
            .position(|e| e.id == id)
            .map(|i| i as u32 + 1)
            .unwrap_or(0)
    }
}

/// Opaque bearer token -> user mapping, issued at login/register.
#[derive(Default)]
pub struct TokenStore {
    tokens: Mutex<HashMap<String, UserId>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, user_id: &UserId) -> String {
        let token = random_id(32);
        self.tokens
            .lock()
            .unwrap()
            .insert(token.clone(), user_id.clone());
        token
    }

    pub fn resolve(&self, token: &str) -> Option<UserId> {
        self.tokens.lock().unwrap().get(token).cloned()
    }

    pub fn revoke(&self, token: &str) {
        self.tokens.lock().unwrap().remove(token);
    }
}

const ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn random_id(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| ID_CHARS[rng.random_range(0..ID_CHARS.len())] as char)
        .collect()
}
