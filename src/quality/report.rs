use std::fmt;

/// What is wrong with one metadata entry
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    /// The key is not in the map
    Missing,
    /// The key maps to an explicit null
    Null,
    /// The value's kind is not one of the declared kinds
    WrongType {
        /// Declared kinds
        expected: String,
        /// Kind found
        found: &'static str,
    },
    /// The whole group that should hold this entry is absent or not a map
    GroupMissing,
    /// The value lies outside the permitted range
    OutOfRange {
        /// Name of the violated constraint
        constraint: &'static str,
    },
    /// The value's kind cannot be judged by the constraint
    TypeMismatch(String),
}

impl Issue {
    fn describe(&self) -> Vec<String> {
        match self {
            Issue::Missing => vec!["metadatum not found in dictionary".to_string()],
            Issue::Null => vec![
                "metadatum found in dictionary".to_string(),
                "but the mapped field was null".to_string(),
            ],
            Issue::WrongType { expected, found } => vec![
                "metadatum found in dictionary".to_string(),
                format!("but the mapped field was of type {found}, not {expected}"),
            ],
            Issue::GroupMissing => vec!["the enclosing group is missing".to_string()],
            Issue::OutOfRange { constraint } => {
                vec![format!("value violates the {constraint} constraint")]
            }
            Issue::TypeMismatch(message) => vec![message.clone()],
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Issue::Missing | Issue::Null | Issue::GroupMissing => "missing entry",
            Issue::WrongType { .. } => "corrupt entry",
            Issue::OutOfRange { .. } | Issue::TypeMismatch(_) => "inconsistent entry",
        }
    }
}

/// One deficiency or inconsistency
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    /// Illumination or detection element id, if the entry belongs to one
    pub element: Option<String>,
    /// Tag of the offending entry
    pub tag: String,
    pub issue: Issue,
}

/// A titled block of findings
#[derive(Debug, Clone, Default)]
pub struct ReportSection {
    pub heading: String,
    /// Free-form lines printed before the findings
    pub notes: Vec<String>,
    pub findings: Vec<Finding>,
}

impl ReportSection {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            ..Default::default()
        }
    }
}

/// Result of a completeness or consistency check, renderable as Markdown
#[derive(Debug, Clone)]
pub struct QualityReport {
    pub title: String,
    pub sections: Vec<ReportSection>,
}

impl QualityReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// True if no finding was recorded
    pub fn passed(&self) -> bool {
        self.findings().next().is_none()
    }

    /// All findings across sections
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.sections.iter().flat_map(|section| section.findings.iter())
    }

    /// Number of findings across sections
    pub fn count(&self) -> usize {
        self.findings().count()
    }

    /// Render as Markdown
    pub fn to_markdown(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;

        for section in &self.sections {
            writeln!(f, "## {}", section.heading)?;
            writeln!(f)?;
            for note in &section.notes {
                writeln!(f, "{note}")?;
                writeln!(f)?;
            }
            for finding in &section.findings {
                match &finding.element {
                    Some(element) => writeln!(
                        f,
                        "* {} \"{}\" of element \"{}\"",
                        finding.issue.label(),
                        finding.tag,
                        element
                    )?,
                    None => writeln!(f, "* {} \"{}\"", finding.issue.label(), finding.tag)?,
                }
                for line in finding.issue.describe() {
                    writeln!(f, "  * {line}")?;
                }
            }
            if !section.findings.is_empty() {
                writeln!(f)?;
            }
        }

        writeln!(f, "## Result")?;
        writeln!(f)?;
        if self.passed() {
            writeln!(f, "No problems were found in the metadata.")
        } else {
            writeln!(f, "{} metadata fields were found to be deficient.", self.count())
        }
    }
}
