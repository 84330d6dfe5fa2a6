use crate::storage::{
    migrations, new_document_id, next_free_timestamp, NewAnswer, NewQuestion, QuestionStore,
    StoreError,
};
use crate::DbConnection;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use shared_types::{Answer, Question, ReceivedQuestionsQuery};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct SqliteQuestionStore {
    connection: DbConnection,
}

impl SqliteQuestionStore {
    /// Opens (or creates) the database file and brings its schema up to date
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self, StoreError> {
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        migrations::run_migrations(&mut conn)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn connection(&self) -> DbConnection {
        self.connection.clone()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection
            .lock()
            .map_err(|e| StoreError::OperationFailed(format!("Lock error: {}", e)))
    }
}

fn to_micros(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_micros()
}

fn from_micros(column: usize, micros: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(column, micros))
}

fn question_from_row(row: &Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        body: row.get(1)?,
        receiver_uid: row.get(2)?,
        is_replied: row.get(3)?,
        created_at: from_micros(4, row.get(4)?)?,
    })
}

fn answer_from_row(row: &Row<'_>) -> rusqlite::Result<Answer> {
    Ok(Answer {
        id: row.get(0)?,
        uid: row.get(1)?,
        question_id: row.get(2)?,
        body: row.get(3)?,
        created_at: from_micros(4, row.get(4)?)?,
    })
}

fn timestamp_taken(conn: &Connection, table: &str, ts: DateTime<Utc>) -> Result<bool, StoreError> {
    let sql = format!("SELECT 1 FROM {} WHERE created_at = ?1 LIMIT 1", table);
    Ok(conn
        .query_row(&sql, params![to_micros(ts)], |_| Ok(()))
        .optional()?
        .is_some())
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    async fn create_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let created_at = next_free_timestamp(question.created_at, |ts| {
            timestamp_taken(&tx, "questions", ts)
        })?;
        let id = new_document_id();

        tx.execute(
            r#"
            INSERT INTO questions (id, body, receiver_uid, is_replied, created_at)
            VALUES (?1, ?2, ?3, 0, ?4)
            "#,
            params![id, question.body, question.receiver_uid, to_micros(created_at)],
        )?;
        tx.commit()?;

        Ok(Question {
            id,
            body: question.body,
            receiver_uid: question.receiver_uid,
            is_replied: false,
            created_at,
        })
    }

    async fn get_question(&self, question_id: &str) -> Result<Option<Question>, StoreError> {
        let conn = self.lock()?;

        let question = conn
            .query_row(
                r#"
                SELECT id, body, receiver_uid, is_replied, created_at
                FROM questions
                WHERE id = ?1
                "#,
                params![question_id],
                question_from_row,
            )
            .optional()?;

        Ok(question)
    }

    async fn list_received(
        &self,
        receiver_uid: &str,
        query: &ReceivedQuestionsQuery,
    ) -> Result<Vec<Question>, StoreError> {
        let conn = self.lock()?;
        let limit = query.page_size();

        let questions = match query.after {
            Some(cursor) => conn
                .prepare(
                    r#"
                    SELECT id, body, receiver_uid, is_replied, created_at
                    FROM questions
                    WHERE receiver_uid = ?1 AND created_at < ?2
                    ORDER BY created_at DESC
                    LIMIT ?3
                    "#,
                )?
                .query_map(
                    params![receiver_uid, to_micros(cursor), limit],
                    question_from_row,
                )?
                .collect::<Result<Vec<_>, _>>()?,
            None => conn
                .prepare(
                    r#"
                    SELECT id, body, receiver_uid, is_replied, created_at
                    FROM questions
                    WHERE receiver_uid = ?1
                    ORDER BY created_at DESC
                    LIMIT ?2
                    "#,
                )?
                .query_map(params![receiver_uid, limit], question_from_row)?
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(questions)
    }

    async fn submit_answer(&self, answer: NewAnswer) -> Result<Answer, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let updated = tx.execute(
            "UPDATE questions SET is_replied = 1 WHERE id = ?1",
            params![answer.question_id],
        )?;
        if updated == 0 {
            // dropping the transaction rolls it back
            return Err(StoreError::NotFound(format!(
                "Question {} not found",
                answer.question_id
            )));
        }

        let created_at =
            next_free_timestamp(answer.created_at, |ts| timestamp_taken(&tx, "answers", ts))?;
        let id = new_document_id();

        tx.execute(
            r#"
            INSERT INTO answers (id, uid, question_id, body, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                id,
                answer.uid,
                answer.question_id,
                answer.body,
                to_micros(created_at)
            ],
        )?;
        tx.commit()?;

        Ok(Answer {
            id,
            uid: answer.uid,
            question_id: answer.question_id,
            body: answer.body,
            created_at,
        })
    }

    async fn list_answers(&self, question_id: &str) -> Result<Vec<Answer>, StoreError> {
        let conn = self.lock()?;

        let answers = conn
            .prepare(
                r#"
                SELECT id, uid, question_id, body, created_at
                FROM answers
                WHERE question_id = ?1
                ORDER BY created_at ASC
                "#,
            )?
            .query_map(params![question_id], answer_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(n: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 1, n, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_migrations_create_schema() {
        let store = SqliteQuestionStore::open_in_memory().unwrap();
        let conn = store.connection();
        let conn = conn.lock().unwrap();
        assert!(migrations::has_question_schema(&conn).unwrap());
    }

    #[test]
    fn test_timestamp_lookup_uses_created_at_index() {
        let store = SqliteQuestionStore::open_in_memory().unwrap();
        let conn = store.connection();
        let conn = conn.lock().unwrap();

        for (table, index) in [
            ("questions", "idx_questions_created_at"),
            ("answers", "idx_answers_created_at"),
        ] {
            let sql = format!(
                "EXPLAIN QUERY PLAN SELECT 1 FROM {} WHERE created_at = ?1 LIMIT 1",
                table
            );
            let plan: Vec<String> = conn
                .prepare(&sql)
                .unwrap()
                .query_map(params![0_i64], |row| row.get(3))
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();
            assert!(
                plan.iter().any(|step| step.contains(index)),
                "{} lookup does not use {}: {:?}",
                table,
                index,
                plan
            );
        }
    }

    #[tokio::test]
    async fn test_open_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("qna.db");

        let store = SqliteQuestionStore::open(&db_path).unwrap();
        store
            .create_question(NewQuestion::new("u1", "hello"))
            .await
            .unwrap();

        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_timestamps_round_trip_through_storage() {
        let store = SqliteQuestionStore::open_in_memory().unwrap();
        let created_at = day(10) + Duration::microseconds(123_456);

        let created = store
            .create_question(NewQuestion::new("u1", "hello").created_at(created_at))
            .await
            .unwrap();
        let loaded = store.get_question(&created.id).await.unwrap().unwrap();

        assert_eq!(loaded, created);
        assert_eq!(loaded.created_at, created_at);
    }

    #[tokio::test]
    async fn test_list_received_pages_strictly_after_cursor() {
        let store = SqliteQuestionStore::open_in_memory().unwrap();
        for n in 1..=12 {
            store
                .create_question(NewQuestion::new("u1", format!("q{}", n)).created_at(day(n)))
                .await
                .unwrap();
        }

        let first = store
            .list_received("u1", &ReceivedQuestionsQuery::first_page())
            .await
            .unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].created_at, day(12));
        assert_eq!(first[9].created_at, day(3));

        let second = store
            .list_received(
                "u1",
                &ReceivedQuestionsQuery::starting_after(first[9].created_at),
            )
            .await
            .unwrap();
        let bodies: Vec<&str> = second.iter().map(|q| q.body.as_str()).collect();
        assert_eq!(bodies, vec!["q2", "q1"]);
    }

    #[tokio::test]
    async fn test_submit_answer_marks_question_replied() {
        let store = SqliteQuestionStore::open_in_memory().unwrap();
        let question = store
            .create_question(NewQuestion::new("u1", "お元気ですか"))
            .await
            .unwrap();

        let answer = store
            .submit_answer(NewAnswer::new("u1", question.id.clone(), "元気です"))
            .await
            .unwrap();

        assert_eq!(answer.question_id, question.id);
        let reloaded = store.get_question(&question.id).await.unwrap().unwrap();
        assert!(reloaded.is_replied);
        assert_eq!(store.list_answers(&question.id).await.unwrap(), vec![answer]);
    }

    #[tokio::test]
    async fn test_submit_answer_for_missing_question_rolls_back() {
        let store = SqliteQuestionStore::open_in_memory().unwrap();

        let result = store
            .submit_answer(NewAnswer::new("u1", "missing", "元気です"))
            .await;

        assert!(matches!(result, Err(StoreError::NotFound(_))));
        let conn = store.connection();
        let conn = conn.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM answers", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
