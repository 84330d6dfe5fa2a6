pub mod question_detail;
pub mod received;

pub use question_detail::{QuestionDetailView, SubmitRequest};
pub use received::{
    FeedState, PageOutcome, PageRequest, QuestionRow, ReceivedQuestionsView, ScrollGeometry,
};
