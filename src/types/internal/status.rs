use std::fmt;

/// Review status of a submission
///
/// `Pending` is the only non-terminal state; `Approved` and `Rejected` are
/// mutually exclusive terminal decisions. The soft-delete flag is
/// orthogonal and lives on the submission itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Pending,
    Approved,
    Rejected,
}

impl StatusCode {
    /// String representation stored in the status_code column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<StatusCode> {
        match s {
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
