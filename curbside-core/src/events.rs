//! Links to public events near a ZIP code.
//!
//! Festivals and fairs draw crowds that suit food vendors. The engine only
//! builds search links; it never fetches event listings.

use crate::PlanError;

/// Base URL of the event search.
pub const EVENT_SEARCH_URL: &str = "https://www.eventbrite.com/d/united-states--";

/// Why every event category is worth a look.
pub const EVENT_REASON: &str = "Public outdoor events, food vendors likely";

const CATEGORIES: [(&str, &str); 5] = [
    ("Festivals", "festival"),
    ("Concerts & Live Music", "music"),
    ("Holiday Events", "holiday"),
    ("Fairs & Carnivals", "fair"),
    ("Community Celebrations", "community"),
];

/// One event search link.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLink {
    /// Category name.
    pub name: String,
    /// Search URL.
    pub url: String,
    /// Why the category matters to a vendor.
    pub reason: String,
}

/// Event search links for `zip`, one per category.
///
/// # Errors
///
/// Returns [`PlanError::InputMissing`] when `zip` is blank.
///
/// # Examples
///
/// ```
/// use curbside_core::events::event_links;
///
/// let links = event_links("32771")?;
/// assert_eq!(links.len(), 5);
/// assert_eq!(
///     links[0].url,
///     "https://www.eventbrite.com/d/united-states--32771/festival/"
/// );
/// # Ok::<(), curbside_core::PlanError>(())
/// ```
pub fn event_links(zip: &str) -> Result<Vec<EventLink>, PlanError> {
    let code = zip.trim();
    if code.is_empty() {
        return Err(PlanError::InputMissing { field: "zip" });
    }
    Ok(CATEGORIES
        .iter()
        .map(|(name, slug)| EventLink {
            name: (*name).to_owned(),
            url: format!("{EVENT_SEARCH_URL}{code}/{slug}/"),
            reason: EVENT_REASON.to_owned(),
        })
        .collect())
}
