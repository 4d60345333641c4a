use super::*;
use serde::Deserialize;
use serde::Serialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub level: SkillLevel,
    pub elo: u16,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl From<&Member> for ProfileResponse {
    fn from(member: &Member) -> Self {
        use arb_core::Unique;
        Self {
            id: member.id().to_string(),
            username: member.username().to_string(),
            level: member.level(),
            elo: member.elo(),
            wins: member.wins(),
            losses: member.losses(),
            draws: member.draws(),
        }
    }
}

#[derive(Deserialize)]
pub struct LevelRequest {
    pub level: String,
}
