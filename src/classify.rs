//! Ingredient categorization and diet inference.
//!
//! Categorization is a coarse substring heuristic: an ingredient label is
//! lowercased and tested for *containment* of each keyword, not whole-word
//! matches. "Buttermilk" matches `butter` and `milk`; false positives on
//! embedded substrings are accepted.
//!
//! Diet inference is a pure function of a recipe's full ingredient set:
//! recomputing it from the same ingredients always yields the same diets.

use crate::graph::{Category, Diet};

/// Keywords indicating an animal product.
pub const ANIMAL_PRODUCTS: [&str; 18] = [
    "anchovy", "bacon", "beef", "butter", "cheese", "chicken", "cream", "egg", "fish", "gelatin",
    "honey", "lamb", "milk", "parmesan", "pork", "shrimp", "turkey", "yogurt",
];

/// Keywords indicating a gluten-bearing ingredient.
pub const GLUTEN_GRAINS: [&str; 10] = [
    "barley", "bread", "farro", "flour", "pasta", "rye", "semolina", "spaghetti", "spelt", "wheat",
];

/// The smaller token list that disqualifies a recipe from being vegetarian.
pub const MEAT_TOKENS: [&str; 7] = [
    "beef", "chicken", "fish", "lamb", "pork", "shrimp", "turkey",
];

/// Category markers assigned to one ingredient label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryMarkers {
    pub animal_product: bool,
    pub gluten: bool,
}

impl CategoryMarkers {
    /// The categories this marker set carries, in fixed order.
    pub fn categories(self) -> impl Iterator<Item = Category> {
        [
            self.animal_product.then_some(Category::AnimalProduct),
            self.gluten.then_some(Category::GlutenIngredient),
        ]
        .into_iter()
        .flatten()
    }
}

/// Classify one ingredient label by keyword containment.
pub fn categorize(label: &str) -> CategoryMarkers {
    let lowered = label.to_lowercase();
    CategoryMarkers {
        animal_product: ANIMAL_PRODUCTS.iter().any(|kw| lowered.contains(kw)),
        gluten: GLUTEN_GRAINS.iter().any(|kw| lowered.contains(kw)),
    }
}

/// Outcome of diet inference over a recipe's ingredient set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DietProfile {
    /// Diets the recipe qualifies for.
    pub diets: Vec<Diet>,
    /// Ingredient categories present in the recipe.
    pub contains: Vec<Category>,
}

/// Infer diets from a recipe's ingredients and their category markers.
///
/// Rules, in order:
/// 1. no animal-product marker → Vegan and Vegetarian;
/// 2. otherwise Vegetarian unless some *original label* contains a meat token;
/// 3. no gluten marker → GlutenFree.
///
/// Categories found anywhere in the set are reported in `contains` so the
/// builder can record the recipe's category bookkeeping facts.
pub fn infer_diets(ingredients: &[(&str, CategoryMarkers)]) -> DietProfile {
    let has_animal = ingredients.iter().any(|(_, m)| m.animal_product);
    let has_gluten = ingredients.iter().any(|(_, m)| m.gluten);

    let mut diets = Vec::new();
    if !has_animal {
        diets.push(Diet::Vegan);
        diets.push(Diet::Vegetarian);
    } else {
        // meat tokens are scanned against the original label, not the slug
        let has_meat = ingredients.iter().any(|(label, _)| {
            let lowered = label.to_lowercase();
            MEAT_TOKENS.iter().any(|kw| lowered.contains(kw))
        });
        if !has_meat {
            diets.push(Diet::Vegetarian);
        }
    }
    if !has_gluten {
        diets.push(Diet::GlutenFree);
    }

    let mut contains = Vec::new();
    if has_animal {
        contains.push(Category::AnimalProduct);
    }
    if has_gluten {
        contains.push(Category::GlutenIngredient);
    }

    DietProfile { diets, contains }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(labels: &[&str]) -> DietProfile {
        let pairs: Vec<(&str, CategoryMarkers)> =
            labels.iter().map(|l| (*l, categorize(l))).collect();
        infer_diets(&pairs)
    }

    #[test]
    fn categorize_is_substring_containment() {
        assert!(categorize("Chicken Stock").animal_product);
        assert!(categorize("Buttermilk").animal_product);
        assert!(categorize("All-Purpose Flour").gluten);
        // embedded substring, accepted false positive
        assert!(categorize("Butterfly Pea Tea").animal_product);
        assert_eq!(categorize("Lentils"), CategoryMarkers::default());
    }

    #[test]
    fn all_clear_ingredients_are_vegan_vegetarian_gluten_free() {
        let p = profile(&["Lentils", "Vegetable Stock", "Cumin"]);
        assert_eq!(p.diets, vec![Diet::Vegan, Diet::Vegetarian, Diet::GlutenFree]);
        assert!(p.contains.is_empty());
    }

    #[test]
    fn chicken_stock_is_neither_vegan_nor_vegetarian() {
        let p = profile(&["Chicken Stock", "Rice"]);
        assert!(!p.diets.contains(&Diet::Vegan));
        // "chicken" is itself a meat token
        assert!(!p.diets.contains(&Diet::Vegetarian));
        assert!(p.diets.contains(&Diet::GlutenFree));
        assert_eq!(p.contains, vec![Category::AnimalProduct]);
    }

    #[test]
    fn dairy_without_meat_is_vegetarian_only() {
        let p = profile(&["Milk", "Sugar"]);
        assert_eq!(p.diets, vec![Diet::Vegetarian, Diet::GlutenFree]);
        assert_eq!(p.contains, vec![Category::AnimalProduct]);
    }

    #[test]
    fn gluten_blocks_gluten_free() {
        let p = profile(&["Wheat Flour", "Water"]);
        assert!(!p.diets.contains(&Diet::GlutenFree));
        assert_eq!(p.diets, vec![Diet::Vegan, Diet::Vegetarian]);
        assert_eq!(p.contains, vec![Category::GlutenIngredient]);
    }

    #[test]
    fn inference_is_deterministic() {
        let labels = ["Bacon", "Spaghetti", "Parmesan"];
        assert_eq!(profile(&labels), profile(&labels));
    }

    #[test]
    fn empty_ingredient_set_qualifies_for_everything() {
        let p = profile(&[]);
        assert_eq!(p.diets, vec![Diet::Vegan, Diet::Vegetarian, Diet::GlutenFree]);
        assert!(p.contains.is_empty());
    }

    #[test]
    fn markers_categories_iterator() {
        let both = CategoryMarkers {
            animal_product: true,
            gluten: true,
        };
        let cats: Vec<Category> = both.categories().collect();
        assert_eq!(cats, vec![Category::AnimalProduct, Category::GlutenIngredient]);
        assert_eq!(CategoryMarkers::default().categories().count(), 0);
    }
}
