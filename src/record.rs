use serde::Deserialize;

/// One row of the publications table.
///
/// Every column is optional. A column missing from the header reads as an
/// empty string for every row, and columns we don't know about are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Record {
    pub title: String,
    pub section: String,
    pub authors: String,
    pub status: String,
    pub year: String,
    pub venue: String,
    pub paper_url: String,
    pub paper_label: String,
    pub slides_url: String,
    pub doi_url: String,
    pub bibtex: String,
    pub media: String,
    pub comment: String,
    #[serde(rename = "abstract")]
    pub abstract_: String,
}

impl Record {
    pub fn section(&self) -> Section {
        Section::normalize(&self.section)
    }
}

/// The four display buckets, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Journal,
    Conference,
    Working,
    Other,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Journal,
        Section::Conference,
        Section::Working,
        Section::Other,
    ];

    /// Classify a free-text section label by its (case-insensitive) prefix.
    pub fn normalize(label: &str) -> Section {
        let label = label.trim().to_lowercase();
        if label.starts_with("jour") {
            Section::Journal
        } else if label.starts_with("work") {
            Section::Working
        } else if label.starts_with("conf") {
            Section::Conference
        } else {
            Section::Other
        }
    }

    pub fn index(self) -> usize {
        match self {
            Section::Journal => 0,
            Section::Conference => 1,
            Section::Working => 2,
            Section::Other => 3,
        }
    }

    /// Anchor id of the section heading.
    pub fn anchor(self) -> &'static str {
        match self {
            Section::Journal => "journal",
            Section::Conference => "conference",
            Section::Working => "working",
            Section::Other => "other",
        }
    }

    /// Element id of the list holding the section's papers.
    pub fn list_id(self) -> &'static str {
        match self {
            Section::Journal => "journal-papers",
            Section::Conference => "conf-papers",
            Section::Working => "working-papers",
            Section::Other => "other-articles",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Section::Journal => "Journal Papers",
            Section::Conference => "Conference Proceedings",
            Section::Working => "Working Papers",
            Section::Other => "Other Articles",
        }
    }
}

/// Records partitioned by section, each bucket in display order.
#[derive(Debug, Default)]
pub struct Buckets {
    buckets: [Vec<Record>; 4],
}

impl Buckets {
    /// Assign every record to its section, then reverse each bucket so the
    /// most recently added row is displayed first.
    pub fn partition(records: Vec<Record>) -> Self {
        let mut buckets: [Vec<Record>; 4] = Default::default();
        for record in records {
            buckets[record.section().index()].push(record);
        }
        for bucket in &mut buckets {
            bucket.reverse();
        }
        Buckets { buckets }
    }

    pub fn get(&self, section: Section) -> &[Record] {
        &self.buckets[section.index()]
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, section: &str) -> Record {
        Record {
            title: title.to_string(),
            section: section.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn normalize_matches_on_prefix() {
        assert_eq!(Section::normalize("Journal Article"), Section::Journal);
        assert_eq!(Section::normalize("conf."), Section::Conference);
        assert_eq!(Section::normalize("Working Paper"), Section::Working);
        assert_eq!(Section::normalize("misc"), Section::Other);
        assert_eq!(Section::normalize("  JOURNAL "), Section::Journal);
        assert_eq!(Section::normalize(""), Section::Other);
        // The prefix has to be at the start.
        assert_eq!(Section::normalize("a journal"), Section::Other);
    }

    #[test]
    fn partition_reverses_within_each_section() {
        let buckets = Buckets::partition(vec![
            record("A", "journal"),
            record("x", "working"),
            record("B", "journal"),
            record("C", "Journal"),
        ]);
        let titles: Vec<_> = buckets
            .get(Section::Journal)
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, ["C", "B", "A"]);
        assert_eq!(buckets.get(Section::Working).len(), 1);
        assert!(buckets.get(Section::Conference).is_empty());
        assert!(buckets.get(Section::Other).is_empty());
    }

    #[test]
    fn partition_keeps_every_record_exactly_once() {
        let labels = vec!["journal", "conf", "working", "misc", "", "Jour", "workshop"];
        proptest::proptest!(|(picks in proptest::collection::vec(proptest::sample::select(labels.clone()), 0..64))| {
            let records: Vec<_> = picks
                .iter()
                .enumerate()
                .map(|(i, s)| record(&i.to_string(), s))
                .collect();
            let buckets = Buckets::partition(records);
            proptest::prop_assert_eq!(buckets.len(), picks.len());

            let mut seen: Vec<usize> = Section::ALL
                .iter()
                .flat_map(|s| buckets.get(*s).iter().map(|r| r.title.parse::<usize>().unwrap()))
                .collect();
            seen.sort_unstable();
            proptest::prop_assert_eq!(seen, (0..picks.len()).collect::<Vec<_>>());
        })
    }
}
