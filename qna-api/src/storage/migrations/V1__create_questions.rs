/// Create the questions table, one row per question document
pub fn migration() -> String {
    r#"
CREATE TABLE questions (
    id TEXT PRIMARY KEY NOT NULL,
    body TEXT NOT NULL,
    receiver_uid TEXT NOT NULL,
    is_replied INTEGER NOT NULL DEFAULT 0 CHECK (is_replied IN (0, 1)),
    created_at INTEGER NOT NULL
);

CREATE INDEX idx_questions_receiver_created
    ON questions(receiver_uid, created_at DESC);
"#
    .to_string()
}
