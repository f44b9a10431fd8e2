use chrono::Duration;
use tubely_api::auth::JwtService;
use uuid::Uuid;

/// Secret shared by the test router and the tokens minted here.
pub const TEST_JWT_SECRET: &str = "tubely-test-secret";

/// `Authorization` header value for `user_id`, valid for an hour.
pub fn bearer_for(user_id: Uuid) -> String {
    let token = JwtService::new(TEST_JWT_SECRET)
        .issue_token(user_id, Duration::hours(1))
        .expect("Failed to issue test token");
    format!("Bearer {}", token)
}

/// Token signed with a different secret.
pub fn forged_bearer_for(user_id: Uuid) -> String {
    let token = JwtService::new("not-the-server-secret")
        .issue_token(user_id, Duration::hours(1))
        .expect("Failed to issue test token");
    format!("Bearer {}", token)
}

pub fn expired_bearer_for(user_id: Uuid) -> String {
    let token = JwtService::new(TEST_JWT_SECRET)
        .issue_token(user_id, Duration::minutes(-5))
        .expect("Failed to issue test token");
    format!("Bearer {}", token)
}
