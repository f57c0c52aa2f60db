use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum DomError {
    MissingElement(&'static str),
    WrongType(&'static str),
    Js(String),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingElement(name) => write!(f, "missing element: {name}"),
            Self::WrongType(name) => write!(f, "element has the wrong type: {name}"),
            Self::Js(message) => write!(f, "javascript error: {message}"),
        }
    }
}

impl std::error::Error for DomError {}
