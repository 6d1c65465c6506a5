//! Identifiers for runners and projects.
//!
//! GitLab accepts either a numeric ID or, for projects, the URL-encoded
//! `namespace/path`. Both are carried by [`Id`] and turned into a single
//! path segment by [`Id::normalize`].

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{Error, Result};

// Everything except the RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Id {
    Number(u64),
    Path(String),
}

impl Id {
    /// Render the identifier as a percent-encoded path segment.
    pub fn normalize(&self) -> Result<String> {
        match self {
            Id::Number(n) => Ok(n.to_string()),
            Id::Path(s) => {
                if s.trim().is_empty() {
                    return Err(Error::InvalidId(format!("{:?} is empty", s)));
                }
                // Would be collapsed by URL resolution instead of reaching the API
                if s == "." || s == ".." {
                    return Err(Error::InvalidId(format!("{:?} is a dot segment", s)));
                }
                Ok(utf8_percent_encode(s, PATH_SEGMENT).to_string())
            }
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::Path(s) => write!(f, "{}", s),
        }
    }
}

macro_rules! id_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Id {
            fn from(n: $t) -> Self {
                Id::Number(n as u64)
            }
        })*
    };
}

id_from_unsigned!(u8, u16, u32, u64, usize);

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Path(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::Path(s)
    }
}

impl From<&String> for Id {
    fn from(s: &String) -> Self {
        Id::Path(s.clone())
    }
}

impl From<&Id> for Id {
    fn from(id: &Id) -> Self {
        id.clone()
    }
}
