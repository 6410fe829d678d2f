//! # Gazetteer
//!
//! Static lookup tables mapping text fragments to an administrative region.
//!
//! - Districts (more specific) are checked before states (less specific).
//! - Both tables are ordered slices; the first substring hit wins.
//! - Text that mentions nothing known resolves to [`Region::central`].
//!
//! Matching is plain lower-cased substring search, the same semantics the
//! classifier uses for its keyword lists. State needles run against the text
//! with punctuation turned into spaces and padded at both ends, so a needle
//! written as `" wbp "` only hits the whole word.

use serde::{Deserialize, Serialize};

pub const DEFAULT_STATE: &str = "Central Govt";
pub const ALL_DISTRICTS: &str = "All";

/// `(needle, district, state)` in evaluation order.
const DISTRICTS: &[(&str, &str, &str)] = &[
    ("kolkata", "Kolkata", "West Bengal"),
    ("howrah", "Howrah", "West Bengal"),
    ("hooghly", "Hooghly", "West Bengal"),
    ("darjeeling", "Darjeeling", "West Bengal"),
    ("murshidabad", "Murshidabad", "West Bengal"),
    ("siliguri", "Darjeeling", "West Bengal"),
    ("patna", "Patna", "Bihar"),
    ("muzaffarpur", "Muzaffarpur", "Bihar"),
    ("bhagalpur", "Bhagalpur", "Bihar"),
    ("lucknow", "Lucknow", "Uttar Pradesh"),
    ("kanpur", "Kanpur", "Uttar Pradesh"),
    ("varanasi", "Varanasi", "Uttar Pradesh"),
    ("prayagraj", "Prayagraj", "Uttar Pradesh"),
    ("ranchi", "Ranchi", "Jharkhand"),
    ("dhanbad", "Dhanbad", "Jharkhand"),
    ("bhubaneswar", "Khordha", "Odisha"),
    ("cuttack", "Cuttack", "Odisha"),
    ("guwahati", "Kamrup Metropolitan", "Assam"),
    ("jaipur", "Jaipur", "Rajasthan"),
    ("jodhpur", "Jodhpur", "Rajasthan"),
    ("bhopal", "Bhopal", "Madhya Pradesh"),
    ("indore", "Indore", "Madhya Pradesh"),
    ("raipur", "Raipur", "Chhattisgarh"),
    ("mumbai", "Mumbai", "Maharashtra"),
    ("nagpur", "Nagpur", "Maharashtra"),
    ("ahmedabad", "Ahmedabad", "Gujarat"),
    ("chennai", "Chennai", "Tamil Nadu"),
    ("coimbatore", "Coimbatore", "Tamil Nadu"),
    ("bengaluru", "Bengaluru Urban", "Karnataka"),
    ("bangalore", "Bengaluru Urban", "Karnataka"),
    ("hyderabad", "Hyderabad", "Telangana"),
    ("visakhapatnam", "Visakhapatnam", "Andhra Pradesh"),
    ("thiruvananthapuram", "Thiruvananthapuram", "Kerala"),
    ("ludhiana", "Ludhiana", "Punjab"),
    ("dehradun", "Dehradun", "Uttarakhand"),
    ("shimla", "Shimla", "Himachal Pradesh"),
    ("srinagar", "Srinagar", "Jammu and Kashmir"),
];

/// `(needle, state)` in evaluation order. Includes common recruiting-body aliases.
const STATES: &[(&str, &str)] = &[
    ("west bengal", "West Bengal"),
    ("wbssc", "West Bengal"),
    ("wbpsc", "West Bengal"),
    (" wbp ", "West Bengal"),
    ("bihar", "Bihar"),
    ("bpsc", "Bihar"),
    ("uttar pradesh", "Uttar Pradesh"),
    ("upsssc", "Uttar Pradesh"),
    ("uppsc", "Uttar Pradesh"),
    ("jharkhand", "Jharkhand"),
    ("odisha", "Odisha"),
    ("orissa", "Odisha"),
    ("assam", "Assam"),
    ("rajasthan", "Rajasthan"),
    ("rpsc", "Rajasthan"),
    ("madhya pradesh", "Madhya Pradesh"),
    ("mppsc", "Madhya Pradesh"),
    ("chhattisgarh", "Chhattisgarh"),
    ("maharashtra", "Maharashtra"),
    ("gujarat", "Gujarat"),
    ("tamil nadu", "Tamil Nadu"),
    ("tnpsc", "Tamil Nadu"),
    ("karnataka", "Karnataka"),
    ("telangana", "Telangana"),
    ("tspsc", "Telangana"),
    ("andhra pradesh", "Andhra Pradesh"),
    ("appsc", "Andhra Pradesh"),
    ("kerala", "Kerala"),
    ("punjab", "Punjab"),
    ("haryana", "Haryana"),
    ("hssc", "Haryana"),
    ("uttarakhand", "Uttarakhand"),
    ("himachal", "Himachal Pradesh"),
    ("jammu", "Jammu and Kashmir"),
    ("kashmir", "Jammu and Kashmir"),
    ("delhi", "Delhi"),
    ("dsssb", "Delhi"),
];

/// Administrative region a posting belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub state: String,
    pub district: String,
}

impl Region {
    pub fn new(state: impl Into<String>, district: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            district: district.into(),
        }
    }

    /// State-level region (`district = "All"`).
    pub fn state_wide(state: impl Into<String>) -> Self {
        Self::new(state, ALL_DISTRICTS)
    }

    /// Fallback when nothing in the text is recognised.
    pub fn central() -> Self {
        Self::state_wide(DEFAULT_STATE)
    }

    pub fn is_central(&self) -> bool {
        self.state == DEFAULT_STATE && self.district == ALL_DISTRICTS
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::central()
    }
}

/// Resolve the region mentioned in `text`. Total: always returns exactly one region.
pub fn resolve_region(text: &str) -> Region {
    let lower = text.to_lowercase();

    if let Some((_, district, state)) = DISTRICTS.iter().find(|(n, _, _)| lower.contains(n)) {
        return Region::new(*state, *district);
    }

    let spaced = word_spaced(&lower);
    if let Some((_, state)) = STATES.iter().find(|(n, _)| spaced.contains(n)) {
        return Region::state_wide(*state);
    }

    Region::central()
}

/// `"wbp: si posts"` → `" wbp  si posts "`.
fn word_spaced(lower: &str) -> String {
    let mut out = String::with_capacity(lower.len() + 2);
    out.push(' ');
    out.extend(lower.chars().map(|c| if c.is_alphanumeric() { c } else { ' ' }));
    out.push(' ');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_wins_over_unrelated_state() {
        let r = resolve_region("Bihar Police Constable exam centre list for Kolkata");
        assert_eq!(r, Region::new("West Bengal", "Kolkata"));
    }

    #[test]
    fn state_only_gives_all_districts() {
        let r = resolve_region("UPSSSC Junior Assistant Recruitment 2026");
        assert_eq!(r, Region::state_wide("Uttar Pradesh"));
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(resolve_region("PATNA High Court Clerk").state, "Bihar");
    }

    #[test]
    fn unknown_text_falls_back_to_central() {
        let r = resolve_region("SSC CHSL Recruitment 2026");
        assert!(r.is_central());
        assert_eq!(r.district, "All");
        assert!(resolve_region("").is_central());
    }

    #[test]
    fn short_alias_matches_whole_word_only() {
        let wb = Region::state_wide("West Bengal");
        assert_eq!(resolve_region("WBP: SI recruitment notice"), wb);
        assert_eq!(resolve_region("Constable posts, WBP, 2026"), wb);
        assert_eq!(resolve_region("Lady Constable vacancy WBP"), wb);
        assert_eq!(resolve_region("WBP Constable 2026"), wb);
        assert!(resolve_region("WBPDCL engineer trainee").is_central());
    }

    #[test]
    fn deterministic_for_same_input() {
        let t = "Railway Group D vacancies in Mumbai and Gujarat";
        assert_eq!(resolve_region(t), resolve_region(t));
        assert_eq!(resolve_region(t).state, "Maharashtra");
    }
}
