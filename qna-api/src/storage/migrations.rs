use refinery::embed_migrations;

// Embed migrations from the migrations directory
embed_migrations!("src/storage/migrations");

/// Run the question and answer migrations on a SQLite connection
///
/// Creates:
/// - questions: one row per question, indexed by receiver and creation time
/// - answers: one row per answer, referencing its question
/// - created_at indexes on both, for timestamp lookups
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), refinery::Error> {
    migrations::runner().run(conn).map(|_| ())
}

/// Check if the question tables exist in a database
pub fn has_question_schema(conn: &rusqlite::Connection) -> rusqlite::Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='questions'")?;
    stmt.exists([])
}
