use std::fmt;

use http::StatusCode;

/// Immutable record describing a failed lookup.
///
/// `status` carries a conventional HTTP status even for locally-detected
/// faults (timeouts map to 408, cancellations to 400, and so on). `detail`
/// and `response_body` are diagnostic extras; `Display` renders only the
/// status and message so neither leaks into logs by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    detail: Option<String>,
    response_body: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
            response_body: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.response_body = Some(body.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Raw remote payload, preserved so callers can diagnose malformed or
    /// unexpected responses.
    pub fn response_body(&self) -> Option<&str> {
        self.response_body.as_deref()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum State<T> {
    Success(T),
    Failure(ApiError),
}

/// Two-state result of a remote lookup: a value or an [`ApiError`].
///
/// Exactly one branch is ever populated. The constructors, the accessors,
/// and [`Outcome::map`]/[`Outcome::match_with`] are the whole surface; the
/// internal state is not otherwise inspectable.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T>(State<T>);

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Self(State::Success(value))
    }

    pub fn failure(error: ApiError) -> Self {
        Self(State::Failure(error))
    }

    pub fn is_success(&self) -> bool {
        matches!(self.0, State::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&T> {
        match &self.0 {
            State::Success(value) => Some(value),
            State::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.0 {
            State::Success(_) => None,
            State::Failure(error) => Some(error),
        }
    }

    /// Apply `transform` to a success value; carry a failure through
    /// untouched. The transform is never invoked on the failure path.
    pub fn map<U>(self, transform: impl FnOnce(T) -> U) -> Outcome<U> {
        match self.0 {
            State::Success(value) => Outcome::success(transform(value)),
            State::Failure(error) => Outcome::failure(error),
        }
    }

    /// Invoke exactly one of the two handlers and return its result.
    pub fn match_with<R>(
        self,
        on_success: impl FnOnce(T) -> R,
        on_failure: impl FnOnce(ApiError) -> R,
    ) -> R {
        match self.0 {
            State::Success(value) => on_success(value),
            State::Failure(error) => on_failure(error),
        }
    }
}
