/// Alias table for common allergens. The first entry of each group is
/// the canonical name; the rest are food words that imply it.
const ALIASES: &[(&str, &[&str])] = &[
    ("peanut", &["peanut", "peanuts", "groundnut", "peanut butter"]),
    (
        "milk",
        &["milk", "dairy", "lactose", "cheese", "yogurt", "butter", "cream"],
    ),
    ("egg", &["egg", "eggs", "omelet", "omelette", "mayonnaise"]),
    (
        "shellfish",
        &["shellfish", "shrimp", "prawn", "prawns", "crab", "lobster", "oyster"],
    ),
    ("fish", &["fish", "salmon", "tuna", "cod", "anchovy", "sardine"]),
    ("soy", &["soy", "soya", "tofu", "edamame", "soy sauce"]),
    (
        "gluten",
        &["gluten", "wheat", "bread", "pasta", "flour", "barley", "rye"],
    ),
    (
        "tree nut",
        &[
            "tree nut", "almond", "almonds", "cashew", "cashews", "walnut", "walnuts",
            "hazelnut", "pecan", "pistachio",
        ],
    ),
    ("sesame", &["sesame", "tahini"]),
];

fn alias_group(term: &str) -> Option<&'static [&'static str]> {
    ALIASES
        .iter()
        .find(|(canonical, aliases)| *canonical == term || aliases.contains(&term))
        .map(|(_, aliases)| *aliases)
}

/// Scan a message for foods the user is allergic to. Literal substring
/// matching of the alias table against the lowercased text; returns the
/// matched food word on a hit.
pub fn flag_allergen(message: &str, allergies: &[String]) -> Option<String> {
    let text = message.to_lowercase();
    for allergy in allergies {
        let term = allergy.trim().to_lowercase();
        if term.is_empty() {
            continue;
        }
        match alias_group(&term) {
            Some(aliases) => {
                for alias in aliases {
                    if text.contains(alias) {
                        return Some((*alias).to_string());
                    }
                }
            }
            // Unknown allergen, match the raw term itself.
            None => {
                if text.contains(&term) {
                    return Some(term);
                }
            }
        }
    }
    None
}

/// Templated refusal sent instead of calling the model.
pub fn refusal(matched: &str) -> String {
    format!(
        "I noticed you mentioned {matched}, which is on your allergy list. \
         I can't recommend meals containing it. Would you like a safe alternative instead?"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allergies(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn direct_match() {
        let hit = flag_allergen("can I eat peanut butter?", &allergies(&["peanut"]));
        assert_eq!(hit.as_deref(), Some("peanut"));
    }

    #[test]
    fn alias_match() {
        let hit = flag_allergen("is greek yogurt healthy?", &allergies(&["milk"]));
        assert_eq!(hit.as_deref(), Some("yogurt"));
    }

    #[test]
    fn alias_lookup_from_non_canonical_term() {
        // User stored "dairy"; message mentions cheese.
        let hit = flag_allergen("a cheese omelette", &allergies(&["dairy"]));
        assert_eq!(hit.as_deref(), Some("cheese"));
    }

    #[test]
    fn unknown_allergen_matches_literally() {
        let hit = flag_allergen("I love kiwi smoothies", &allergies(&["kiwi"]));
        assert_eq!(hit.as_deref(), Some("kiwi"));
    }

    #[test]
    fn case_insensitive() {
        let hit = flag_allergen("SHRIMP fried rice", &allergies(&["shellfish"]));
        assert_eq!(hit.as_deref(), Some("shrimp"));
    }

    #[test]
    fn no_hit_without_allergens() {
        assert!(flag_allergen("grilled chicken and rice", &allergies(&["peanut"])).is_none());
        assert!(flag_allergen("peanut noodles", &[]).is_none());
    }

    #[test]
    fn refusal_names_the_food() {
        let text = refusal("shrimp");
        assert!(text.contains("shrimp"));
        assert!(text.contains("allergy list"));
    }
}
