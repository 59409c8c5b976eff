/// Lifecycle of one view request: `Idle → Loading → Success | Error`.
///
/// A new user action (refresh, submit, retry) re-enters `Loading` from any
/// state. Nothing here blocks re-entrancy; callers disable their buttons
/// while `is_loading()`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RequestState::Success(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RequestState<U> {
        match self {
            RequestState::Idle => RequestState::Idle,
            RequestState::Loading => RequestState::Loading,
            RequestState::Success(v) => RequestState::Success(f(v)),
            RequestState::Error(e) => RequestState::Error(e),
        }
    }
}
