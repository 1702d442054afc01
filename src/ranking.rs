//! Relevance ranking of resolved airports against the user's partial query.
//!
//! Scoring (query trimmed and lower-cased, comparisons case-insensitive):
//! - exact IATA code match: +1000
//! - display name starts with query: +500, contains query: +200
//! - city starts with query: +150, contains query: +100
//! - country or region contains query: +50
//! - query is a US state name: +200 for US candidates, -100 otherwise
//! - no match on code, name or city: -500 (kept, but sorted last)

use crate::models::{CanonicalAirport, ScoredCandidate};

/// Maximum number of suggestions returned by [`rank`]
pub const MAX_SUGGESTIONS: usize = 8;

const US_STATES: [&str; 50] = [
    "alabama",
    "alaska",
    "arizona",
    "arkansas",
    "california",
    "colorado",
    "connecticut",
    "delaware",
    "florida",
    "georgia",
    "hawaii",
    "idaho",
    "illinois",
    "indiana",
    "iowa",
    "kansas",
    "kentucky",
    "louisiana",
    "maine",
    "maryland",
    "massachusetts",
    "michigan",
    "minnesota",
    "mississippi",
    "missouri",
    "montana",
    "nebraska",
    "nevada",
    "new hampshire",
    "new jersey",
    "new mexico",
    "new york",
    "north carolina",
    "north dakota",
    "ohio",
    "oklahoma",
    "oregon",
    "pennsylvania",
    "rhode island",
    "south carolina",
    "south dakota",
    "tennessee",
    "texas",
    "utah",
    "vermont",
    "virginia",
    "washington",
    "west virginia",
    "wisconsin",
    "wyoming",
];

fn lower(value: Option<&String>) -> String {
    value.map(|v| v.to_lowercase()).unwrap_or_default()
}

/// Score one candidate against an already trimmed, lower-cased query
#[must_use]
pub fn score(airport: &CanonicalAirport, query: &str) -> i32 {
    let name = airport.display_name.to_lowercase();
    let code = lower(airport.iata_code.as_ref());
    let city = lower(airport.city.as_ref());
    let country = lower(airport.country.as_ref());
    let region = lower(airport.region.as_ref());

    let code_match = !code.is_empty() && code == query;
    let name_contains = !name.is_empty() && name.contains(query);
    let city_contains = !city.is_empty() && city.contains(query);

    let mut score = 0;
    if code_match {
        score += 1000;
    }
    if !name.is_empty() && name.starts_with(query) {
        score += 500;
    }
    if name_contains {
        score += 200;
    }
    if !city.is_empty() && city.starts_with(query) {
        score += 150;
    }
    if city_contains {
        score += 100;
    }
    if (!country.is_empty() && country.contains(query))
        || (!region.is_empty() && region.contains(query))
    {
        score += 50;
    }

    if US_STATES.contains(&query) {
        if country.contains("united states") {
            score += 200;
        } else {
            score -= 100;
        }
    }

    if !(code_match || name_contains || city_contains) {
        score -= 500;
    }

    score
}

/// Score and order candidates, highest first, keeping provider order among ties.
#[must_use]
pub fn rank_scored(candidates: Vec<CanonicalAirport>, query: &str) -> Vec<ScoredCandidate> {
    let query = query.trim().to_lowercase();
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|airport| {
            let score = score(&airport, &query);
            ScoredCandidate { airport, score }
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_SUGGESTIONS);
    scored
}

/// Order candidates by relevance and keep at most [`MAX_SUGGESTIONS`]
#[must_use]
pub fn rank(candidates: Vec<CanonicalAirport>, query: &str) -> Vec<CanonicalAirport> {
    rank_scored(candidates, query)
        .into_iter()
        .map(|candidate| candidate.airport)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airport(name: &str, code: &str, city: &str, country: &str) -> CanonicalAirport {
        CanonicalAirport::new(name, Some(code.to_string()))
            .unwrap()
            .with_city(Some(city.to_string()))
            .with_country(Some(country.to_string()))
    }

    #[test]
    fn test_exact_code_sorts_first() {
        let candidates = vec![
            airport("Austin Straubel International", "GRB", "Green Bay", "United States"),
            airport("Houston Hobby", "HOU", "Houston", "United States"),
            airport("Austin-Bergstrom International", "AUS", "Austin", "United States"),
        ];

        let ranked = rank(candidates, "AUS");
        assert_eq!(ranked[0].iata_code.as_deref(), Some("AUS"));
        assert_eq!(ranked[1].iata_code.as_deref(), Some("GRB"));
        assert_eq!(ranked[2].iata_code.as_deref(), Some("HOU"));
    }

    #[test]
    fn test_score_components() {
        let aus = airport("Austin-Bergstrom International", "AUS", "Austin", "United States");
        // code 1000 + name starts 500 + name contains 200 + city starts 150 + city contains 100
        assert_eq!(score(&aus, "aus"), 1950);
        // name starts + contains + city starts + contains
        assert_eq!(score(&aus, "austin"), 950);
        // country only, plus the no-match penalty
        assert_eq!(score(&aus, "united"), 50 - 500);
    }

    #[test]
    fn test_irrelevant_candidates_are_kept_but_last() {
        let candidates = vec![
            airport("Nowhere Field", "NWF", "Nowhere", "Canada"),
            airport("Teterboro", "TEB", "Teterboro", "United States"),
        ];
        let ranked = rank_scored(candidates, "teter");
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].airport.iata_code.as_deref(), Some("TEB"));
        assert_eq!(ranked[1].score, -500);
    }

    #[test]
    fn test_us_state_query_prefers_us_candidates() {
        let candidates = vec![
            airport("Georgia Intl", "TBS", "Tbilisi", "Georgia"),
            airport("Hartsfield-Jackson", "ATL", "Atlanta", "United States")
                .with_region(Some("Georgia".to_string())),
        ];
        let ranked = rank_scored(candidates, "Georgia");
        assert_eq!(ranked[0].airport.iata_code.as_deref(), Some("TBS"));
        // TBS: name starts 500 + contains 200 + country 50 - 100 = 650
        assert_eq!(ranked[0].score, 650);
        // ATL: region 50 + state bonus 200 - no-match penalty 500
        assert_eq!(ranked[1].score, -250);
    }

    #[test]
    fn test_state_bonus_breaks_name_ties() {
        let candidates = vec![
            airport("Texas Gulf Coast Regional", "XGC", "Gulf", "Mexico"),
            airport("Texas Regional", "TXR", "Dallas", "United States"),
        ];
        let ranked = rank(candidates, "texas");
        assert_eq!(ranked[0].iata_code.as_deref(), Some("TXR"));
    }

    #[test]
    fn test_ties_keep_provider_order() {
        let candidates = vec![
            airport("Palm Beach", "PBI", "West Palm Beach", "United States"),
            airport("Palm Springs", "PSP", "Palm Springs", "United States"),
            airport("Palma de Mallorca", "PMI", "Palma", "Spain"),
        ];
        let ranked = rank(candidates, "palm");
        let codes: Vec<_> = ranked.iter().filter_map(|a| a.iata_code.as_deref()).collect();
        assert_eq!(codes, vec!["PSP", "PMI", "PBI"]);
    }

    #[test]
    fn test_truncates_to_max_suggestions() {
        let candidates: Vec<_> = (0..25)
            .map(|i| airport(&format!("Field {i}"), &format!("F{i:02}"), "Springfield", "United States"))
            .collect();
        let ranked = rank(candidates, "field");
        assert_eq!(ranked.len(), MAX_SUGGESTIONS);
        assert_eq!(ranked[0].display_name, "Field 0");
        assert_eq!(ranked[7].display_name, "Field 7");
    }

    #[test]
    fn test_empty_candidates() {
        assert!(rank(Vec::new(), "aus").is_empty());
    }
}
