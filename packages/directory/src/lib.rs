#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Static directory of immigration lawyers, known facility locations,
//! news articles, and active class-action lawsuits.
//!
//! The datasets ship embedded in the binary and are parsed once on first
//! access. Everything here is read-only reference material for the UI;
//! none of it participates in report matching.

use std::sync::OnceLock;

use alert_map_geo::Coordinate;
use serde::{Deserialize, Serialize};

static LAWYERS_JSON: &str = include_str!("../data/lawyers.json");
static FACILITIES_JSON: &str = include_str!("../data/facilities.json");
static NEWS_JSON: &str = include_str!("../data/news.json");
static LAWSUITS_JSON: &str = include_str!("../data/lawsuits.json");

/// An immigration lawyer listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lawyer {
    /// Stable listing id.
    pub id: u32,
    /// Lawyer's name.
    pub name: String,
    /// Firm or organization.
    pub firm: String,
    /// Contact phone number.
    pub phone: String,
    /// Firm website, when known.
    pub website: Option<String>,
    /// Whether pro bono work is offered.
    pub pro_bono: bool,
    /// Languages spoken.
    pub languages: Vec<String>,
    /// Practice specialties.
    pub specialties: Vec<String>,
    /// Two-letter state.
    pub state: String,
    /// City, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// A known facility location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    /// Stable facility id.
    pub id: String,
    /// Facility name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Visiting/operating hours.
    pub hours: String,
    /// Contact phone number.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Official website.
    pub website: String,
    /// Free-text notes.
    pub notes: String,
    /// Two-letter state.
    pub state: String,
    /// Facility coordinates for the facilities map.
    pub location: Coordinate,
}

/// A news article listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    /// Stable article id.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Publication name.
    pub source: String,
    /// Link to the article.
    pub url: String,
    /// Publication date, ISO 8601 (e.g. `2024-07-15`).
    pub date: String,
    /// Short summary.
    pub summary: String,
    /// Preview image URL.
    pub image_url: String,
}

/// One eligibility screening question for a lawsuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityQuestion {
    /// The question itself, phrased for the affected person.
    pub question: String,
    /// Why the answer matters for this case.
    pub relevance: String,
}

/// A legal organization to contact about a lawsuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalResource {
    /// Organization name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Organization website.
    pub website: String,
}

/// The full description of a lawsuit in one language.
///
/// `steps` entries may carry `**bold**` markers for the UI to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawsuitContent {
    /// Case name with a short parenthetical summary.
    pub name: String,
    /// What the case is about, in plain language.
    pub about: String,
    /// Who the case covers.
    pub who_it_helps: String,
    /// What the case is trying to achieve.
    pub goal: String,
    /// Screening questions for whether the case applies.
    pub questions: Vec<EligibilityQuestion>,
    /// What an affected person should do now.
    pub steps: Vec<String>,
    /// Documents worth gathering.
    pub documents: Vec<String>,
    /// Organizations to contact.
    pub resources: Vec<LegalResource>,
    /// Timing considerations.
    pub deadlines: String,
    /// Confidentiality note.
    pub privacy: String,
}

/// An active class-action lawsuit listing, with English and Spanish
/// content blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lawsuit {
    /// Stable case id.
    pub id: String,
    /// English content.
    pub en: LawsuitContent,
    /// Spanish content.
    pub es: LawsuitContent,
}

fn parse_embedded<T: serde::de::DeserializeOwned>(name: &str, json: &str) -> Vec<T> {
    serde_json::from_str(json)
        .unwrap_or_else(|e| panic!("embedded {name} dataset is malformed: {e}"))
}

/// All lawyer listings.
///
/// # Panics
///
/// Panics if the embedded dataset is malformed (a build-time defect).
#[must_use]
pub fn lawyers() -> &'static [Lawyer] {
    static LAWYERS: OnceLock<Vec<Lawyer>> = OnceLock::new();
    LAWYERS.get_or_init(|| parse_embedded("lawyers", LAWYERS_JSON))
}

/// All known facilities.
///
/// # Panics
///
/// Panics if the embedded dataset is malformed (a build-time defect).
#[must_use]
pub fn facilities() -> &'static [Facility] {
    static FACILITIES: OnceLock<Vec<Facility>> = OnceLock::new();
    FACILITIES.get_or_init(|| parse_embedded("facilities", FACILITIES_JSON))
}

/// All news articles, newest first.
///
/// # Panics
///
/// Panics if the embedded dataset is malformed (a build-time defect).
#[must_use]
pub fn news() -> &'static [NewsArticle] {
    static NEWS: OnceLock<Vec<NewsArticle>> = OnceLock::new();
    NEWS.get_or_init(|| {
        let mut articles: Vec<NewsArticle> = parse_embedded("news", NEWS_JSON);
        articles.sort_by(|a, b| b.date.cmp(&a.date));
        articles
    })
}

/// All lawsuit listings.
///
/// # Panics
///
/// Panics if the embedded dataset is malformed (a build-time defect).
#[must_use]
pub fn lawsuits() -> &'static [Lawsuit] {
    static LAWSUITS: OnceLock<Vec<Lawsuit>> = OnceLock::new();
    LAWSUITS.get_or_init(|| parse_embedded("lawsuits", LAWSUITS_JSON))
}

/// Lawyer listings for one state.
#[must_use]
pub fn lawyers_by_state(state: &str) -> Vec<&'static Lawyer> {
    lawyers()
        .iter()
        .filter(|l| l.state.eq_ignore_ascii_case(state))
        .collect()
}

/// Facilities in one state.
#[must_use]
pub fn facilities_by_state(state: &str) -> Vec<&'static Facility> {
    facilities()
        .iter()
        .filter(|f| f.state.eq_ignore_ascii_case(state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_datasets_parse() {
        assert!(!lawyers().is_empty());
        assert!(!facilities().is_empty());
        assert!(!news().is_empty());
        assert!(!lawsuits().is_empty());
    }

    #[test]
    fn lawsuits_carry_both_languages_and_unique_ids() {
        let mut seen = std::collections::HashSet::new();
        for lawsuit in lawsuits() {
            assert!(seen.insert(lawsuit.id.as_str()), "{}", lawsuit.id);
            for content in [&lawsuit.en, &lawsuit.es] {
                assert!(!content.name.is_empty());
                assert!(!content.questions.is_empty());
                assert!(!content.steps.is_empty());
                assert!(!content.resources.is_empty());
            }
            // Translations describe the same case.
            assert_eq!(lawsuit.en.questions.len(), lawsuit.es.questions.len());
            assert_eq!(lawsuit.en.resources.len(), lawsuit.es.resources.len());
        }
    }

    #[test]
    fn state_filter_is_case_insensitive() {
        let upper = lawyers_by_state("CA").len();
        let lower = lawyers_by_state("ca").len();
        assert!(upper > 0);
        assert_eq!(upper, lower);
    }

    #[test]
    fn news_is_newest_first() {
        let dates: Vec<&str> = news().iter().map(|a| a.date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[test]
    fn facility_coordinates_are_valid() {
        for facility in facilities() {
            assert!(facility.location.is_valid(), "{}", facility.id);
        }
    }
}
