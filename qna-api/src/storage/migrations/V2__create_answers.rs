/// Create the answers table
///
/// `created_at` is stored as microseconds since the Unix epoch, like `questions.created_at`.
pub fn migration() -> String {
    r#"
CREATE TABLE answers (
    id TEXT PRIMARY KEY NOT NULL,
    uid TEXT NOT NULL,
    question_id TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    FOREIGN KEY (question_id) REFERENCES questions (id) ON DELETE CASCADE
);

CREATE INDEX idx_answers_question_created
    ON answers(question_id, created_at);
"#
    .to_string()
}
