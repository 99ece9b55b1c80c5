/// Outcome of a data load as seen by the screen.
///
/// `Loading` is the initial state; each fetch settles into exactly one of
/// `Success` or `Error`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Resource<T> {
    #[default]
    Loading,
    Success(T),
    Error(String),
}

impl<T> Resource<T> {
    /// Build an `Error`, substituting a generic message for a blank one.
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Resource::Error("Unknown error".to_string())
        } else {
            Resource::Error(message)
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Resource::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resource<U> {
        match self {
            Resource::Loading => Resource::Loading,
            Resource::Success(data) => Resource::Success(f(data)),
            Resource::Error(message) => Resource::Error(message),
        }
    }
}
