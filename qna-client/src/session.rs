use crate::api_client::ApiError;
use crate::source::QuestionSource;
use shared_types::UserInfo;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// Authentication has not resolved yet
    #[default]
    Pending,
    SignedOut,
    SignedIn(UserInfo),
}

/// Who is signed in, handed to each view when it is constructed
#[derive(Debug, Clone, Default)]
pub struct Session {
    auth: AuthState,
}

impl Session {
    pub fn signed_in(user: UserInfo) -> Self {
        Self {
            auth: AuthState::SignedIn(user),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            auth: AuthState::SignedOut,
        }
    }

    /// Asks the source who is signed in
    pub async fn resolve<S: QuestionSource + ?Sized>(source: &S) -> Result<Self, ApiError> {
        let session = match source.current_user().await? {
            Some(user) => Self::signed_in(user),
            None => Self::signed_out(),
        };
        tracing::debug!(auth = ?session.auth, "Session resolved");
        Ok(session)
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self.auth, AuthState::Pending)
    }

    pub fn user(&self) -> Option<&UserInfo> {
        match &self.auth {
            AuthState::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    /// Status line text: the uid, or 未ログイン when nobody is signed in
    pub fn status_label(&self) -> String {
        self.user()
            .map(|u| u.uid.clone())
            .unwrap_or_else(|| "未ログイン".to_string())
    }
}
