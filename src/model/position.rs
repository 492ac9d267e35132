use std::fmt;

use serde::Serialize;

/// Position an applicant can apply for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Position {
    Developer,
    Designer,
    Manager,
}

static ALL_POSITIONS: &[Position] = &[Position::Developer, Position::Designer, Position::Manager];

impl Position {
    /// Returns the display name of this position.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Developer => "Developer",
            Position::Designer => "Designer",
            Position::Manager => "Manager",
        }
    }

    /// Returns all positions in selection order.
    pub fn all() -> &'static [Position] {
        ALL_POSITIONS
    }

    /// Whether years of relevant experience are asked for.
    pub fn requires_experience(&self) -> bool {
        matches!(self, Position::Developer | Position::Designer)
    }

    /// Whether a portfolio link is asked for.
    pub fn requires_portfolio(&self) -> bool {
        matches!(self, Position::Designer)
    }

    /// Whether a management background is asked for.
    pub fn requires_management_experience(&self) -> bool {
        matches!(self, Position::Manager)
    }
}

#[mutants::skip]
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
