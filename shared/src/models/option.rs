//! Selectable options for categories, locations and tags

use serde::{Deserialize, Serialize};

/// An id/label pair shown in a select control
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Option record as stored in the content backend (locations, categories)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Owning site, absent for collections shared by every site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

impl From<&OptionRecord> for SelectOption {
    fn from(record: &OptionRecord) -> Self {
        SelectOption::new(record.id.clone(), record.name.clone())
    }
}

/// Sort options ascending by label. Equal labels keep their input order.
pub fn sort_by_label(mut options: Vec<SelectOption>) -> Vec<SelectOption> {
    options.sort_by(|a, b| a.label.cmp(&b.label));
    options
}

/// Build a sorted option list from content backend records
pub fn options_from_records<'a, I>(records: I) -> Vec<SelectOption>
where
    I: IntoIterator<Item = &'a OptionRecord>,
{
    sort_by_label(records.into_iter().map(SelectOption::from).collect())
}

/// Build a sorted option list from plain labels (id and label are the same)
pub fn options_from_labels<'a, I>(labels: I) -> Vec<SelectOption>
where
    I: IntoIterator<Item = &'a str>,
{
    sort_by_label(
        labels
            .into_iter()
            .map(|label| SelectOption::new(label, label))
            .collect(),
    )
}
