use std::fmt;
use std::io;
use std::result;

// Fragments the remote service puts into the message of a uniqueness
// violation raised by the phone number constraint.
const UNIQUENESS_VIOLATION: &str = "Uniqueness violation";
const PHONE_NUMBER_KEY: &str = "phone_number_key";

#[derive(Debug)]
pub enum Error {
    Argument(String),
    Io(String),
    Network(String),
    Protocol(String),
    Service(String),
    State(String),
}

impl Error {
    /// Whether the remote service rejected a mutation because a phone
    /// number is already owned by some contact.
    pub fn is_phone_conflict(&self) -> bool {
        match self {
            Error::Service(msg) => {
                msg.contains(UNIQUENESS_VIOLATION) &&
                msg.contains(PHONE_NUMBER_KEY)
            },
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Argument(msg)    => write!(f, "{}", msg),
            Error::Io(msg)          => write!(f, "{}", msg),
            Error::Network(msg)     => write!(f, "{}", msg),
            Error::Protocol(msg)    => write!(f, "{}", msg),
            Error::Service(msg)     => write!(f, "{}", msg),
            Error::State(msg)       => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(format!("IO error: {}", err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Argument(format!("Invalid url: {}", err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.is_timeout() {
            true => Error::Network(format!("Http error: request timed out {}", err)),
            false => Error::Network(format!("Http error: sending http request error {}", err)),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
