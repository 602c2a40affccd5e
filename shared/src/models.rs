//! Shared data models.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single recipe. The stored lists are treated as opaque JSON values,
/// usually plain recipe names.
pub type Recipe = Value;

/// Recipes available for one meal type.
pub type RecipeList = Vec<Recipe>;

/// Ordered day-by-day plan.
pub type WeekPlan = Vec<DayPlan>;

/// Meal slots planned for every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealType {
    /// All meal types in plan order.
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Snack,
        MealType::Dinner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Snack => "snack",
            MealType::Dinner => "dinner",
        }
    }

    /// Object storage key holding this meal type's recipe list.
    pub fn object_key(&self) -> &'static str {
        match self {
            MealType::Breakfast => "recipes_json/breakfast.json",
            MealType::Lunch => "recipes_json/lunch.json",
            MealType::Snack => "recipes_json/snack.json",
            MealType::Dinner => "recipes_json/dinner.json",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recipe list per meal type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeBook {
    pub breakfast: RecipeList,
    pub lunch: RecipeList,
    pub snack: RecipeList,
    pub dinner: RecipeList,
}

impl RecipeBook {
    pub fn get(&self, meal: MealType) -> &RecipeList {
        match meal {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Snack => &self.snack,
            MealType::Dinner => &self.dinner,
        }
    }
}

/// Meals chosen for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: String,
    pub breakfast: Recipe,
    pub lunch: Recipe,
    pub snack: Recipe,
    pub dinner: Recipe,
}

impl DayPlan {
    /// The recipe planned for a meal slot.
    pub fn meal(&self, meal: MealType) -> &Recipe {
        match meal {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Snack => &self.snack,
            MealType::Dinner => &self.dinner,
        }
    }
}

/// Success payload of the v1 endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekResponse {
    pub week: WeekPlan,
}
