use std::io;

use super::types::{Error, Kind};

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut => Error::new(Kind::Timeout).with(err),
            _ => Error::new(Kind::Transport).with(err),
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match err.kind() {
            Kind::Timeout => io::ErrorKind::TimedOut,
            Kind::Transport => io::ErrorKind::ConnectionAborted,
            Kind::Rejected(_) => io::ErrorKind::ConnectionRefused,
            Kind::Decode => io::ErrorKind::InvalidData,
            Kind::Configuration => io::ErrorKind::InvalidInput,
            Kind::Canceled => io::ErrorKind::Interrupted,
        };
        io::Error::new(kind, err)
    }
}
