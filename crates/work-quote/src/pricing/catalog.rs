use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Entry addressable by a stable string identifier.
pub trait CatalogEntry {
    fn id(&self) -> &str;
}

/// Category of purchasable document. `base_price` is quoted per 30 pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkTypeEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub base_price: u32,
    pub icon: &'static str,
}

/// Discipline whose expertise scales the base price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub coefficient: f64,
}

/// Delivery-speed option with its own premium and lead time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrgencyEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub lead_time_days: u32,
    pub coefficient: f64,
}

impl CatalogEntry for WorkTypeEntry {
    fn id(&self) -> &str {
        self.id
    }
}

impl CatalogEntry for SubjectEntry {
    fn id(&self) -> &str {
        self.id
    }
}

impl CatalogEntry for UrgencyEntry {
    fn id(&self) -> &str {
        self.id
    }
}

/// Ordered table with keyed lookup. Display order follows insertion order;
/// when an identifier repeats, lookups resolve to the first occurrence.
#[derive(Debug, Clone)]
pub struct CatalogTable<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: CatalogEntry> CatalogTable<T> {
    pub fn new(entries: Vec<T>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            index.entry(entry.id().to_string()).or_insert(position);
        }
        Self { entries, index }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|position| &self.entries[*position])
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn duplicate_ids(&self) -> Vec<&str> {
        let mut duplicates = Vec::new();
        for (position, entry) in self.entries.iter().enumerate() {
            if self.index.get(entry.id()) != Some(&position) && !duplicates.contains(&entry.id())
            {
                duplicates.push(entry.id());
            }
        }
        duplicates
    }
}

impl<T: Serialize> Serialize for CatalogTable<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

/// Reference data the quote engine prices against.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub work_types: CatalogTable<WorkTypeEntry>,
    pub subjects: CatalogTable<SubjectEntry>,
    pub urgencies: CatalogTable<UrgencyEntry>,
}

/// Which of the three tables a selection was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    WorkType,
    Subject,
    Urgency,
}

impl SelectionKind {
    pub const fn field(self) -> &'static str {
        match self {
            Self::WorkType => "work_type",
            Self::Subject => "subject",
            Self::Urgency => "urgency",
        }
    }
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::WorkType => "work type",
            Self::Subject => "subject",
            Self::Urgency => "urgency",
        };
        f.write_str(label)
    }
}

/// Configuration defect found by [`Catalog::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogIssue {
    DuplicateId {
        kind: SelectionKind,
        id: String,
    },
    ZeroBasePrice {
        id: String,
    },
    InvalidCoefficient {
        kind: SelectionKind,
        id: String,
        coefficient: f64,
    },
    UrgencyPremiumInversion {
        faster: String,
        slower: String,
    },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::DuplicateId { kind, id } => {
                write!(f, "{kind} '{id}' is defined more than once")
            }
            CatalogIssue::ZeroBasePrice { id } => write!(f, "work type '{id}' has no base price"),
            CatalogIssue::InvalidCoefficient {
                kind,
                id,
                coefficient,
            } => write!(f, "{kind} '{id}' has invalid coefficient {coefficient}"),
            CatalogIssue::UrgencyPremiumInversion { faster, slower } => write!(
                f,
                "urgency '{faster}' is faster than '{slower}' but carries a lower coefficient"
            ),
        }
    }
}

impl Catalog {
    pub fn new(
        work_types: Vec<WorkTypeEntry>,
        subjects: Vec<SubjectEntry>,
        urgencies: Vec<UrgencyEntry>,
    ) -> Self {
        Self {
            work_types: CatalogTable::new(work_types),
            subjects: CatalogTable::new(subjects),
            urgencies: CatalogTable::new(urgencies),
        }
    }

    pub fn standard() -> Self {
        Self::new(
            standard_work_types(),
            standard_subjects(),
            standard_urgencies(),
        )
    }

    pub fn work_type(&self, id: &str) -> Option<&WorkTypeEntry> {
        self.work_types.get(id)
    }

    pub fn subject(&self, id: &str) -> Option<&SubjectEntry> {
        self.subjects.get(id)
    }

    pub fn urgency(&self, id: &str) -> Option<&UrgencyEntry> {
        self.urgencies.get(id)
    }

    /// Audits the tables. Nothing here is enforced at lookup time.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        let duplicates = [
            (SelectionKind::WorkType, self.work_types.duplicate_ids()),
            (SelectionKind::Subject, self.subjects.duplicate_ids()),
            (SelectionKind::Urgency, self.urgencies.duplicate_ids()),
        ];
        for (kind, ids) in duplicates {
            issues.extend(ids.into_iter().map(|id| CatalogIssue::DuplicateId {
                kind,
                id: id.to_string(),
            }));
        }

        for work_type in self.work_types.entries() {
            if work_type.base_price == 0 {
                issues.push(CatalogIssue::ZeroBasePrice {
                    id: work_type.id.to_string(),
                });
            }
        }

        let coefficients = self
            .subjects
            .entries()
            .iter()
            .map(|entry| (SelectionKind::Subject, entry.id, entry.coefficient))
            .chain(
                self.urgencies
                    .entries()
                    .iter()
                    .map(|entry| (SelectionKind::Urgency, entry.id, entry.coefficient)),
            );
        for (kind, id, coefficient) in coefficients {
            if !coefficient.is_finite() || coefficient < 0.0 {
                issues.push(CatalogIssue::InvalidCoefficient {
                    kind,
                    id: id.to_string(),
                    coefficient,
                });
            }
        }

        let urgencies = self.urgencies.entries();
        for faster in urgencies {
            for slower in urgencies {
                if faster.lead_time_days < slower.lead_time_days
                    && faster.coefficient < slower.coefficient
                {
                    issues.push(CatalogIssue::UrgencyPremiumInversion {
                        faster: faster.id.to_string(),
                        slower: slower.id.to_string(),
                    });
                }
            }
        }

        issues
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_work_types() -> Vec<WorkTypeEntry> {
    vec![
        WorkTypeEntry {
            id: "essay",
            label: "Essay",
            base_price: 300,
            icon: "file-text",
        },
        WorkTypeEntry {
            id: "test_paper",
            label: "Test Paper",
            base_price: 350,
            icon: "clipboard-check",
        },
        WorkTypeEntry {
            id: "lab_report",
            label: "Lab Report",
            base_price: 400,
            icon: "flask",
        },
        WorkTypeEntry {
            id: "practice_report",
            label: "Internship Report",
            base_price: 500,
            icon: "briefcase",
        },
        WorkTypeEntry {
            id: "coursework",
            label: "Coursework",
            base_price: 600,
            icon: "book-open",
        },
        WorkTypeEntry {
            id: "thesis",
            label: "Graduation Thesis",
            base_price: 2500,
            icon: "graduation-cap",
        },
        WorkTypeEntry {
            id: "masters_thesis",
            label: "Master's Thesis",
            base_price: 3500,
            icon: "award",
        },
    ]
}

fn standard_subjects() -> Vec<SubjectEntry> {
    vec![
        SubjectEntry {
            id: "humanities",
            label: "Humanities",
            coefficient: 1.0,
        },
        SubjectEntry {
            id: "languages",
            label: "Foreign Languages",
            coefficient: 1.0,
        },
        SubjectEntry {
            id: "economics",
            label: "Economics",
            coefficient: 1.1,
        },
        SubjectEntry {
            id: "law",
            label: "Law",
            coefficient: 1.1,
        },
        SubjectEntry {
            id: "natural_sciences",
            label: "Natural Sciences",
            coefficient: 1.15,
        },
        SubjectEntry {
            id: "mathematics",
            label: "Mathematics",
            coefficient: 1.2,
        },
        SubjectEntry {
            id: "engineering",
            label: "Engineering",
            coefficient: 1.25,
        },
        SubjectEntry {
            id: "medicine",
            label: "Medicine",
            coefficient: 1.25,
        },
        SubjectEntry {
            id: "programming",
            label: "Programming",
            coefficient: 1.3,
        },
    ]
}

fn standard_urgencies() -> Vec<UrgencyEntry> {
    vec![
        UrgencyEntry {
            id: "relaxed",
            label: "Relaxed (14 days)",
            lead_time_days: 14,
            coefficient: 0.9,
        },
        UrgencyEntry {
            id: "normal",
            label: "Normal (10 days)",
            lead_time_days: 10,
            coefficient: 1.0,
        },
        UrgencyEntry {
            id: "fast",
            label: "Fast (7 days)",
            lead_time_days: 7,
            coefficient: 1.2,
        },
        UrgencyEntry {
            id: "urgent",
            label: "Urgent (5 days)",
            lead_time_days: 5,
            coefficient: 1.4,
        },
        UrgencyEntry {
            id: "express",
            label: "Express (2 days)",
            lead_time_days: 2,
            coefficient: 1.8,
        },
    ]
}
