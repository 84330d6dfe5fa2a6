use crate::api_client::ApiError;
use crate::error::ClientResult;
use crate::session::Session;
use crate::source::QuestionSource;
use chrono::{DateTime, Utc};
use shared_types::{Question, ReceivedQuestionsQuery};
use tracing::{debug, info};

/// Where the received-questions feed stands.
///
/// `Empty` and `Exhausted` are both terminal: `Empty` means the very first
/// page came back empty, `Exhausted` means later pages ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    NotLoaded,
    LoadingFirstPage,
    HasItems,
    LoadingNextPage,
    Empty,
    Exhausted,
}

/// A page fetch handed out by the view; give it back to `complete_page`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: ReceivedQuestionsQuery,
}

impl PageRequest {
    pub fn cursor(&self) -> Option<DateTime<Utc>> {
        self.query.after
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// This many questions were appended
    Appended(usize),
    /// The page was empty; pagination is finished
    Finished,
    /// The result no longer matched the feed and was dropped
    Discarded,
}

/// Bounding box of the scroll container relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    pub container_top: f64,
    pub container_height: f64,
    pub viewport_height: f64,
}

impl ScrollGeometry {
    pub fn bottom_in_viewport(&self) -> bool {
        self.container_top + self.container_height <= self.viewport_height
    }
}

/// One rendered line of the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRow {
    pub path: String,
    pub body: String,
    pub created_at: String,
    pub is_replied: bool,
}

impl From<&Question> for QuestionRow {
    fn from(question: &Question) -> Self {
        Self {
            path: question.path(),
            body: question.body.clone(),
            created_at: question.display_created_at(),
            is_replied: question.is_replied,
        }
    }
}

/// The signed-in user's received questions, newest first, growing a page
/// at a time as the user scrolls.
///
/// At most one page request is outstanding at any time.
#[derive(Debug)]
pub struct ReceivedQuestionsView {
    session: Session,
    questions: Vec<Question>,
    state: FeedState,
}

impl ReceivedQuestionsView {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            questions: Vec::new(),
            state: FeedState::NotLoaded,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn rows(&self) -> Vec<QuestionRow> {
        self.questions.iter().map(QuestionRow::from).collect()
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, FeedState::Empty | FeedState::Exhausted)
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            FeedState::LoadingFirstPage | FeedState::LoadingNextPage
        )
    }

    fn tail_cursor(&self) -> Option<DateTime<Utc>> {
        self.questions.last().map(|q| q.created_at)
    }

    /// Starts the initial load. Only fires once, and only with a signed-in user.
    pub fn begin_first_page(&mut self) -> Option<PageRequest> {
        if self.state != FeedState::NotLoaded || self.session.user().is_none() {
            return None;
        }

        self.state = FeedState::LoadingFirstPage;
        Some(PageRequest {
            query: ReceivedQuestionsQuery::first_page(),
        })
    }

    /// Starts loading the page after the last loaded question.
    ///
    /// Nothing is issued before the first page has been requested, while
    /// another page is in flight, or once the feed is finished. An empty
    /// list past the first page marks the feed finished without querying.
    pub fn begin_next_page(&mut self) -> Option<PageRequest> {
        if self.is_finished() || self.is_loading() {
            return None;
        }
        if self.state == FeedState::NotLoaded {
            debug!("Next page requested before the first page");
            return None;
        }

        let cursor = match self.tail_cursor() {
            Some(cursor) => cursor,
            None => {
                self.state = FeedState::Empty;
                return None;
            }
        };

        self.state = FeedState::LoadingNextPage;
        Some(PageRequest {
            query: ReceivedQuestionsQuery::starting_after(cursor),
        })
    }

    /// Scroll handler: asks for the next page once the container's bottom
    /// edge is inside the viewport
    pub fn on_scroll(&mut self, geometry: ScrollGeometry) -> Option<PageRequest> {
        if self.is_finished() || !geometry.bottom_in_viewport() {
            return None;
        }
        self.begin_next_page()
    }

    /// Folds a page result into the feed.
    ///
    /// On failure the feed goes back to where it was before the request and
    /// the error is returned. Questions not strictly older than the current
    /// tail are dropped so the list stays strictly descending.
    pub fn complete_page(
        &mut self,
        request: &PageRequest,
        result: Result<Vec<Question>, ApiError>,
    ) -> Result<PageOutcome, ApiError> {
        let expected_cursor = match self.state {
            FeedState::LoadingFirstPage => None,
            FeedState::LoadingNextPage => self.tail_cursor(),
            _ => return Ok(PageOutcome::Discarded),
        };
        if request.cursor() != expected_cursor {
            return Ok(PageOutcome::Discarded);
        }

        let first_page = self.state == FeedState::LoadingFirstPage;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                self.state = if first_page {
                    FeedState::NotLoaded
                } else {
                    FeedState::HasItems
                };
                return Err(e);
            }
        };

        if page.is_empty() {
            self.state = if first_page {
                FeedState::Empty
            } else {
                FeedState::Exhausted
            };
            info!(loaded = self.questions.len(), "Received questions fully loaded");
            return Ok(PageOutcome::Finished);
        }

        let before = self.questions.len();
        for question in page {
            let is_older = self
                .tail_cursor()
                .map_or(true, |tail| question.created_at < tail);
            if is_older {
                self.questions.push(question);
            }
        }
        self.state = FeedState::HasItems;

        let appended = self.questions.len() - before;
        debug!(appended, total = self.questions.len(), "Appended page");
        Ok(PageOutcome::Appended(appended))
    }

    async fn run<S: QuestionSource + ?Sized>(
        &mut self,
        source: &S,
        request: PageRequest,
    ) -> ClientResult<PageOutcome> {
        let result = source.fetch_received_page(&request.query).await;
        Ok(self.complete_page(&request, result)?)
    }

    /// Loads the first page. `Ok(None)` when nothing was requested.
    pub async fn load_first_page<S: QuestionSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> ClientResult<Option<PageOutcome>> {
        match self.begin_first_page() {
            Some(request) => self.run(source, request).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn load_next_page<S: QuestionSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> ClientResult<Option<PageOutcome>> {
        match self.begin_next_page() {
            Some(request) => self.run(source, request).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn handle_scroll<S: QuestionSource + ?Sized>(
        &mut self,
        source: &S,
        geometry: ScrollGeometry,
    ) -> ClientResult<Option<PageOutcome>> {
        match self.on_scroll(geometry) {
            Some(request) => self.run(source, request).await.map(Some),
            None => Ok(None),
        }
    }
}
