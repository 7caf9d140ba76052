use std::collections::BTreeSet;

/// Judges the sync knows how to select by short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Codeforces,
    LeetCode,
    AtCoder,
    CodeChef,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Codeforces,
        Platform::LeetCode,
        Platform::AtCoder,
        Platform::CodeChef,
    ];

    pub fn from_code(code: &str) -> Option<Platform> {
        match code {
            "CF" => Some(Platform::Codeforces),
            "LC" => Some(Platform::LeetCode),
            "AC" => Some(Platform::AtCoder),
            "CC" => Some(Platform::CodeChef),
            _ => None,
        }
    }

    /// clist.by resource id
    pub fn resource_id(self) -> u32 {
        match self {
            Platform::Codeforces => 1,
            Platform::LeetCode => 102,
            Platform::AtCoder => 93,
            Platform::CodeChef => 2,
        }
    }
}

/// Maps a comma separated list of platform codes to resource ids.
/// Unknown codes are dropped without complaint.
pub fn parse_platforms(csv: &str) -> BTreeSet<u32> {
    csv.split(',')
        .filter_map(Platform::from_code)
        .map(Platform::resource_id)
        .collect()
}

/// Resource ids to query: the selection, or every known platform when the
/// selection is empty.
pub fn resource_ids(selected: &BTreeSet<u32>) -> Vec<u32> {
    if selected.is_empty() {
        Platform::ALL.iter().map(|p| p.resource_id()).collect()
    } else {
        selected.iter().copied().collect()
    }
}

pub fn resource_ids_csv(selected: &BTreeSet<u32>) -> String {
    resource_ids(selected)
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_resource_ids() {
        let ids = parse_platforms("CF,LC,AC,CC");
        assert_eq!(ids, BTreeSet::from([1, 2, 93, 102]));
    }

    #[test]
    fn test_unknown_codes_are_dropped() {
        let ids = parse_platforms("CF,TC,xx,,AC");
        assert_eq!(ids, BTreeSet::from([1, 93]));
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        assert!(parse_platforms("cf,lc").is_empty());
    }

    #[test]
    fn test_only_unknown_codes_fall_back_to_defaults() {
        let ids = parse_platforms("TC,HR");
        assert!(ids.is_empty());
        assert_eq!(resource_ids(&ids), vec![1, 102, 93, 2]);
        assert_eq!(resource_ids_csv(&ids), "1,102,93,2");
    }

    #[test]
    fn test_selection_is_sent_sorted() {
        let ids = parse_platforms("CC,LC");
        assert_eq!(resource_ids_csv(&ids), "2,102");
    }
}
