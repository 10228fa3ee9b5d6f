//! Word lists used by the heuristic extractor.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Capitalized words that are never part of a name: function words that
/// start sentences, calendar words, and title abbreviations.
pub static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "The", "This", "That", "These", "Those", "A", "An", "In", "At", "On", "Of", "For",
        "From", "To", "By", "With", "And", "But", "Or", "If", "When", "While", "After",
        "Before", "During", "Since", "As", "It", "Its", "He", "She", "We", "They", "I",
        "You", "His", "Her", "Their", "Our", "My", "There", "Here", "Yesterday", "Today",
        "Tomorrow", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
        "Sunday", "January", "February", "March", "April", "June", "July", "August",
        "September", "October", "November", "December", "Mr", "Mrs", "Ms", "Dr", "Prof",
        "Sen", "Rep", "Gov", "Gen", "Lt", "Col", "Sgt", "Rev", "However", "Meanwhile",
        "Although", "According", "Some", "Many", "Most", "All", "No", "Not", "Also",
        "Later", "Earlier", "Then", "Now", "So", "Yet", "Still", "Instead",
    ]
    .into_iter()
    .collect()
});

/// Titles that, leading a capitalized run, mark the rest of it as a person.
pub static TITLE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "President", "Senator", "Governor", "Minister", "Mayor", "Chancellor", "King",
        "Queen", "Pope", "Judge", "General", "Secretary", "Sheikh", "Prince", "Princess",
        "Ambassador", "Commissioner", "Director", "Professor", "Representative", "Premier",
    ]
    .into_iter()
    .collect()
});

/// Final words that mark a run as an organization.
pub static ORG_SUFFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Inc", "Corp", "Corporation", "Company", "Co", "Ltd", "LLC", "Group", "Bank",
        "University", "Institute", "Ministry", "Department", "Agency", "Council", "Party",
        "Association", "Committee", "Foundation", "Times", "Post", "News", "Organization",
        "Organisation", "Union", "Commission", "Court", "Police", "Army", "Navy", "Bureau",
        "Airlines", "Press", "Club", "Federation", "Church", "College", "Hospital",
    ]
    .into_iter()
    .collect()
});

/// Leading words that mark a multi-word run as an organization.
pub static ORG_HEADS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "University", "Ministry", "Department", "Bank", "Institute", "Council", "Committee",
        "Commission", "Federation", "Church", "Office", "Board", "Bureau",
    ]
    .into_iter()
    .collect()
});
