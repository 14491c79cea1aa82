use super::is_non_halal_ingredient;

/// Ordered so that the first entry contained in an ingredient name wins.
const SUBSTITUTES: &[(&str, &str)] = &[
    ("prosciutto", "bresaola"),
    ("pancetta", "smoked beef"),
    ("sausage", "spiced beef or chicken links"),
    ("bacon", "beef strips or turkey rashers"),
    ("speck", "smoked beef"),
    ("lard", "vegetable shortening or ghee"),
    ("pork", "beef or lamb"),
    ("ham", "smoked turkey"),
    ("wine", "grape juice with a splash of vinegar"),
    ("beer", "sparkling grape juice"),
    ("sherry", "apple cider vinegar"),
    ("brandy", "apple juice"),
    ("cognac", "peach juice"),
    ("bourbon", "apple cider"),
    ("whiskey", "apple cider"),
    ("scotch", "apple cider"),
    ("rum", "apple juice with vanilla"),
    ("vodka", "water with lime juice"),
    ("tequila", "lime juice"),
    ("gin", "juniper-infused water"),
    ("port", "pomegranate juice"),
    ("liqueur", "fruit syrup"),
    ("schnapps", "fruit juice"),
    ("absinthe", "fennel tea"),
    ("alcohol", "fruit juice"),
];

/// Suggests a halal alternative for a flagged ingredient.
///
/// Returns `None` for ingredients that are not flagged, and for flagged
/// fragments that have no table entry.
pub fn suggest_substitute(ingredient: &str) -> Option<&'static str> {
    if !is_non_halal_ingredient(ingredient) {
        return None;
    }

    let needle = ingredient.trim().to_lowercase();
    SUBSTITUTES
        .iter()
        .find(|(term, _)| needle.contains(term) || term.contains(needle.as_str()))
        .map(|(_, substitute)| *substitute)
}
