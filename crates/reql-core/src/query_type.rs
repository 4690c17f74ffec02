//! Query envelope types.

use std::fmt;

/// What the client asks the server to do with a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum QueryType {
    Start = 1,
    Continue = 2,
    Stop = 3,
    NoreplyWait = 4,
    ServerInfo = 5,
}

impl QueryType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Start),
            2 => Some(Self::Continue),
            3 => Some(Self::Stop),
            4 => Some(Self::NoreplyWait),
            5 => Some(Self::ServerInfo),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Continue => "CONTINUE",
            Self::Stop => "STOP",
            Self::NoreplyWait => "NOREPLY_WAIT",
            Self::ServerInfo => "SERVER_INFO",
        }
    }

    /// Only `START` carries a term tree.
    pub fn has_term(self) -> bool {
        self == Self::Start
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
