/// Index creation time alone, for the per-collection timestamp uniqueness lookup
pub fn migration() -> String {
    r#"
CREATE INDEX idx_questions_created_at ON questions(created_at);

CREATE INDEX idx_answers_created_at ON answers(created_at);
"#
    .to_string()
}
