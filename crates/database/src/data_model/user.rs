use model::User;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: i64,
    pub email: String,
    pub details: Option<String>,
}

impl UserRow {
    pub fn to_model(self) -> User {
        User {
            email: self.email,
            details: self.details,
        }
    }
}
