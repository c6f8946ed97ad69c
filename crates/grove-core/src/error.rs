use std::fmt;

/// Machine-readable error codes for the hierarchy engine and projection.
///
/// Domain errors expose one of these via their `code()` accessor so
/// callers (and automation on top of them) can branch on a stable
/// identifier instead of parsing display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInHierarchy,
    TooDeep,
    InactiveRoot,
    HierarchyUnavailable,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInHierarchy => "E2101",
            Self::TooDeep => "E2102",
            Self::InactiveRoot => "E2201",
            Self::HierarchyUnavailable => "E2202",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInHierarchy => "Group is not part of this hierarchy",
            Self::TooDeep => "Hierarchy exceeds the maximum depth",
            Self::InactiveRoot => "Root group is inactive",
            Self::HierarchyUnavailable => "No hierarchy could be produced",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInHierarchy => {
                Some("Pre-filter records to those whose referring set contains the head group.")
            }
            Self::TooDeep => {
                Some("Check referring sets for reference cycles, or raise [hierarchy].max_depth.")
            }
            Self::InactiveRoot => Some("Reactivate the group or compute the view under another head."),
            Self::HierarchyUnavailable => {
                Some("Verify the head group exists in the record set and its topology is well-formed.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
