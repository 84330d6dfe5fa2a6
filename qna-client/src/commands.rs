//! Subcommand implementations. Each one drives a view-model and prints what
//! the corresponding page would render.

use std::io::Write;

use crate::api_client::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::source::QuestionSource;
use crate::views::{QuestionDetailView, QuestionRow, ReceivedQuestionsView};

pub async fn whoami<S, W>(source: &S, out: &mut W) -> ClientResult<()>
where
    S: QuestionSource + ?Sized,
    W: Write,
{
    let session = Session::resolve(source).await?;
    writeln!(out, "{}", session.status_label())?;
    Ok(())
}

fn write_row<W: Write>(out: &mut W, row: &QuestionRow) -> std::io::Result<()> {
    let marker = if row.is_replied { "✓" } else { " " };
    writeln!(out, "{} {}  {}  {}", marker, row.created_at, row.body, row.path)
}

/// Prints the first page, or every page with `all`
pub async fn received<S, W>(source: &S, all: bool, out: &mut W) -> ClientResult<()>
where
    S: QuestionSource + ?Sized,
    W: Write,
{
    let session = Session::resolve(source).await?;
    if session.user().is_none() {
        return Err(ClientError::NotSignedIn);
    }

    let mut view = ReceivedQuestionsView::new(session);
    view.load_first_page(source).await?;
    if all {
        while !view.is_finished() {
            view.load_next_page(source).await?;
        }
    }

    for row in view.rows() {
        write_row(out, &row)?;
    }
    if view.questions().is_empty() {
        writeln!(out, "No questions yet")?;
    } else if !view.is_finished() {
        writeln!(out, "(more questions available, use --all)")?;
    }
    Ok(())
}

/// Prints the question, or nothing when it does not exist
pub async fn show<S, W>(source: &S, question_id: &str, out: &mut W) -> ClientResult<()>
where
    S: QuestionSource + ?Sized,
    W: Write,
{
    let session = Session::resolve(source).await?;
    if session.user().is_none() {
        return Err(ClientError::NotSignedIn);
    }

    let mut view = QuestionDetailView::new(question_id, session);
    view.load(source).await?;

    if let Some(question) = view.question() {
        writeln!(out, "{}", question.body)?;
        writeln!(out, "received {}", question.display_created_at())?;
        if question.is_replied {
            writeln!(out, "replied")?;
        }
    }
    Ok(())
}

pub async fn answer<S, W>(source: &S, question_id: &str, body: &str, out: &mut W) -> ClientResult<()>
where
    S: QuestionSource + ?Sized,
    W: Write,
{
    let session = Session::resolve(source).await?;
    let mut view = QuestionDetailView::new(question_id, session);
    view.load(source).await?;
    view.set_body(body);

    let answer = view.submit(source).await?;
    writeln!(out, "Answered {} ({})", answer.question_id, answer.id)?;
    Ok(())
}

pub async fn ask<W: Write>(
    client: &ApiClient,
    receiver_uid: &str,
    body: &str,
    out: &mut W,
) -> ClientResult<()> {
    if !client.has_token() {
        return Err(ClientError::NotSignedIn);
    }
    if body.trim().is_empty() {
        return Err(ClientError::EmptyBody);
    }

    let question = client.create_question(receiver_uid, body).await?;
    writeln!(out, "Asked {}: {}", receiver_uid, question.path())?;
    Ok(())
}
