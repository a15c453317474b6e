use std::fmt;

/// How urgent a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    Critical,
    Important,
    Moderate,
    Minor,
}

impl Priority {
    /// All priorities, most urgent first
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::Important,
        Priority::Moderate,
        Priority::Minor,
    ];

    /// Sort rank; lower is more urgent
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::Important => 1,
            Self::Moderate => 2,
            Self::Minor => 3,
        }
    }

    /// Label shown in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "🔴 CRITICAL",
            Self::Important => "🟠 IMPORTANT",
            Self::Moderate => "🟡 MODERATE",
            Self::Minor => "🟢 MINOR",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Important => "important",
            Self::Moderate => "moderate",
            Self::Minor => "minor",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One prioritized improvement suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub priority: Priority,
    pub title: String,
    /// What is wrong, including the measured value
    pub problem: String,
    /// What to do about it
    pub solution: String,
}

impl Finding {
    pub fn new(
        priority: Priority,
        title: impl Into<String>,
        problem: impl Into<String>,
        solution: impl Into<String>,
    ) -> Self {
        Self {
            priority,
            title: title.into(),
            problem: problem.into(),
            solution: solution.into(),
        }
    }
}
