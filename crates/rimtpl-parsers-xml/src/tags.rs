//! Curated tag lists that decide what counts as translatable.
//!
//! Order matters: simple labels are emitted in list order, and list items
//! take the first sub-label found in list order.

/// Direct children of a Def carrying text.
pub const LABELS: &[&str] = &[
    "label",
    "labelMechanoids",
    "labelMale",
    "labelFemale",
    "labelShort",
    "skillLabel",
    "description",
    "adjective",
    "pawnLabel",
    "gerundLabel",
    "reportString",
    "verb",
    "gerund",
    "deathMessage",
    "pawnsPlural",
    "leaderTitle",
    "jobString",
    "quotation",
    "beginLetterLabel",
    "beginLetter",
    "recoveryMessage",
    "inspectLine",
    "graphLabelY",
    "fixedName",
    "letterLabel",
    "letterText",
    "letterLabelEnemy",
    "arrivalTextEnemy",
    "letterLabelFriendly",
    "arrivalTextFriendly",
    "Description",
    "endMessage",
    "successfullyRemovedHediffMessage",
];

/// Direct children holding a single nested object with labels.
pub const NESTED_STARTS: &[&str] = &["injuryProps"];

/// Labels looked up inside a [`NESTED_STARTS`] element.
pub const NESTED_LABELS: &[&str] = &["destroyedLabel", "destroyedOutLabel"];

/// Direct children holding `li` lists.
pub const LIST_STARTS: &[&str] = &[
    "helpTexts",
    "comps",
    "stages",
    "degreeDatas",
    "rulePack",
    "lifeStages",
    "scoreStages",
    "verbs",
    "hediffGivers",
    "logRulesInitiator",
    "logRulesRecipient",
    "parts",
];

/// Lists found inside a list container that has no `li` items of its own.
pub const NESTED_LISTS: &[&str] = &["rulesStrings"];

/// Labels looked up inside structured `li` items.
pub const LIST_LABELS: &[&str] = &[
    "label",
    "description",
    "labelTendedWell",
    "labelTended",
    "labelTendedWellInner",
    "labelTendedInner",
    "labelSolidTendedWell",
    "labelSolidTended",
    "oldLabel",
    "discoverLetterLabel",
    "discoverLetterText",
    "letterLabel",
    "letter",
    "labelSocial",
    "customLabel",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Labels,
    ListStarts,
    ListLabels,
    NestedLists,
    NestedStarts,
    NestedLabels,
}

/// Immutable tag configuration passed to the classifier and extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSets {
    pub labels: Vec<String>,
    pub list_starts: Vec<String>,
    pub list_labels: Vec<String>,
    pub nested_lists: Vec<String>,
    pub nested_starts: Vec<String>,
    pub nested_labels: Vec<String>,
}

fn owned(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

impl Default for TagSets {
    fn default() -> Self {
        Self {
            labels: owned(LABELS),
            list_starts: owned(LIST_STARTS),
            list_labels: owned(LIST_LABELS),
            nested_lists: owned(NESTED_LISTS),
            nested_starts: owned(NESTED_STARTS),
            nested_labels: owned(NESTED_LABELS),
        }
    }
}

impl TagSets {
    fn list_mut(&mut self, kind: TagKind) -> &mut Vec<String> {
        match kind {
            TagKind::Labels => &mut self.labels,
            TagKind::ListStarts => &mut self.list_starts,
            TagKind::ListLabels => &mut self.list_labels,
            TagKind::NestedLists => &mut self.nested_lists,
            TagKind::NestedStarts => &mut self.nested_starts,
            TagKind::NestedLabels => &mut self.nested_labels,
        }
    }

    /// Append extra tags after the built-in ones, skipping blanks and
    /// names already present.
    pub fn extend(&mut self, kind: TagKind, extra: &[String]) -> &mut Self {
        let list = self.list_mut(kind);
        for tag in extra {
            let tag = tag.trim();
            if tag.is_empty() || list.iter().any(|t| t == tag) {
                continue;
            }
            list.push(tag.to_string());
        }
        self
    }

    pub fn is_label(&self, tag: &str) -> bool {
        self.labels.iter().any(|t| t == tag)
    }

    pub fn is_list_start(&self, tag: &str) -> bool {
        self.list_starts.iter().any(|t| t == tag)
    }
}
