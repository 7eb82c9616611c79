use crate::model::CanonicalCategory;

/// A single step of the category ladder, tested against the uppercased label.
struct CategoryRule {
    matches: fn(upper: &str) -> bool,
    category: CanonicalCategory,
}

/// Evaluated top to bottom, first match wins. "CAT-III" contains "II" and
/// "I", so the higher numerals must be tested first.
const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        matches: is_cat_iv,
        category: CanonicalCategory::CatIV,
    },
    CategoryRule {
        matches: is_cat_iii,
        category: CanonicalCategory::CatIII,
    },
    CategoryRule {
        matches: is_cat_ii,
        category: CanonicalCategory::CatII,
    },
    CategoryRule {
        matches: is_cat_i,
        category: CanonicalCategory::CatI,
    },
    CategoryRule {
        matches: is_loose_cat_i,
        category: CanonicalCategory::CatI,
    },
];

/// Map a free-text category label to a canonical category.
///
/// Case-insensitive. Labels that match none of the ladder rules are accepted
/// only if they equal a canonical label exactly; anything else is unmatched
/// and stays out of category-keyed aggregates.
pub fn normalize_category(raw: &str) -> Option<CanonicalCategory> {
    let upper = raw.to_uppercase();
    CATEGORY_RULES
        .iter()
        .find(|rule| (rule.matches)(&upper))
        .map(|rule| rule.category)
        .or_else(|| CanonicalCategory::from_label(raw))
}

fn is_cat_iv(u: &str) -> bool {
    contains_any(u, &["IV", "CAT-IV", "CAT IV", "CATEGORY IV"])
}

fn is_cat_iii(u: &str) -> bool {
    contains_any(u, &["III", "CAT-III", "CAT III", "CATEGORY III"])
}

fn is_cat_ii(u: &str) -> bool {
    contains_any(u, &["II", "CAT-II", "CAT II", "CATEGORY II"])
}

fn is_cat_i(u: &str) -> bool {
    contains_any(u, &["CAT-I", "CAT I", "CATEGORY I"])
        || (u.contains('I') && u.contains("CONTAINER"))
}

fn is_loose_cat_i(u: &str) -> bool {
    has_standalone_i(u) || has_cat_then_i(u)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// A lone "I" word, with word characters being ASCII alphanumerics and '_'.
fn has_standalone_i(upper: &str) -> bool {
    upper
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|token| token == "I")
}

/// "CAT" followed anywhere later by an "I".
fn has_cat_then_i(upper: &str) -> bool {
    upper
        .find("CAT")
        .map(|idx| upper[idx + 3..].contains('I'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use CanonicalCategory::*;

    #[test]
    fn test_cat_i_variants() {
        assert_eq!(normalize_category("Cat-I"), Some(CatI));
        assert_eq!(normalize_category("CATEGORY I"), Some(CatI));
        assert_eq!(normalize_category("Cat I (Containers)"), Some(CatI));
        assert_eq!(normalize_category("cat-i rigid"), Some(CatI));
    }

    #[test]
    fn test_cat_ii_variants() {
        assert_eq!(normalize_category("Cat-II"), Some(CatII));
        assert_eq!(normalize_category("Category II"), Some(CatII));
        assert_eq!(normalize_category("cat ii flexible"), Some(CatII));
    }

    #[test]
    fn test_cat_iii_variants() {
        assert_eq!(normalize_category("Cat-III"), Some(CatIII));
        assert_eq!(normalize_category("CAT III"), Some(CatIII));
        assert_eq!(normalize_category("Category III (Multilayer)"), Some(CatIII));
    }

    #[test]
    fn test_cat_iv_variants() {
        assert_eq!(normalize_category("Cat-IV"), Some(CatIV));
        assert_eq!(normalize_category("category iv"), Some(CatIV));
        assert_eq!(normalize_category("CAT IV Compostable"), Some(CatIV));
    }

    #[test]
    fn test_higher_numerals_win() {
        // "III" contains "II" and "I"; the ladder must not stop early.
        assert_eq!(normalize_category("CAT-III"), Some(CatIII));
        assert_eq!(normalize_category("Cat-II"), Some(CatII));
    }

    #[test]
    fn test_container_keyword() {
        assert_eq!(normalize_category("Rigid Containers"), Some(CatI));
    }

    #[test]
    fn test_unmatched() {
        assert_eq!(normalize_category("Flexible Pouch"), None);
        assert_eq!(normalize_category(""), None);
        assert_eq!(normalize_category("Unknown"), None);
    }

    #[test]
    fn test_standalone_i_false_positives_are_preserved() {
        // Any lone "I" token lands in Cat-I, even when it is not a numeral.
        assert_eq!(normalize_category("Type I film"), Some(CatI));
        assert_eq!(normalize_category("Grade-I wrap"), Some(CatI));
        // Likewise an "I" anywhere after "CAT".
        assert_eq!(normalize_category("Catalogue item"), Some(CatI));
    }

    #[test]
    fn test_substring_numerals_inside_words() {
        // "PRIMITIVE" contains "IV"; substring matching is intentional.
        assert_eq!(normalize_category("Primitive wrap"), Some(CatIV));
        // Numerals glued to other letters still count.
        assert_eq!(normalize_category("MIII"), Some(CatIII));
    }
}
