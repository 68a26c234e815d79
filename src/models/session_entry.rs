#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionEntryRow {
    pub entry_key: String,
    pub entry_value: String,
    pub updated_at: String,
}
