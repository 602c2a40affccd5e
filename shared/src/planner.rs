//! Weekly meal plan assembly.

use chrono::Weekday;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::models::{DayPlan, MealType, Recipe, RecipeBook, WeekPlan};
use crate::{Error, Result};

/// Chooses one recipe out of a non-empty list.
pub trait RecipePicker {
    fn pick<'a>(&mut self, recipes: &'a [Recipe]) -> Option<&'a Recipe>;
}

/// Uniform random selection, with replacement.
pub struct RandomPicker<R> {
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPicker<StdRng> {
    /// Picker seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Reproducible picker.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RecipePicker for RandomPicker<R> {
    fn pick<'a>(&mut self, recipes: &'a [Recipe]) -> Option<&'a Recipe> {
        recipes.choose(&mut self.rng)
    }
}

/// Monday through Sunday.
pub fn days_of_week() -> [Weekday; 7] {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
}

/// Full English name of a weekday.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Build one [`DayPlan`] per day, choosing each meal independently.
///
/// Every list must hold at least one recipe; this is checked before any
/// selection so an empty list never yields a partial plan.
pub fn assemble<P>(book: &RecipeBook, days: &[Weekday], picker: &mut P) -> Result<WeekPlan>
where
    P: RecipePicker + ?Sized,
{
    if let Some(meal) = MealType::ALL.into_iter().find(|meal| book.get(*meal).is_empty()) {
        return Err(Error::EmptyList(meal));
    }

    let mut pick = |meal: MealType| -> Result<Recipe> {
        picker
            .pick(book.get(meal))
            .cloned()
            .ok_or(Error::EmptyList(meal))
    };

    days.iter()
        .map(|day| {
            Ok(DayPlan {
                day: day_name(*day).to_string(),
                breakfast: pick(MealType::Breakfast)?,
                lunch: pick(MealType::Lunch)?,
                snack: pick(MealType::Snack)?,
                dinner: pick(MealType::Dinner)?,
            })
        })
        .collect()
}

/// Assemble the canonical Monday..Sunday week.
pub fn assemble_week<P>(book: &RecipeBook, picker: &mut P) -> Result<WeekPlan>
where
    P: RecipePicker + ?Sized,
{
    assemble(book, &days_of_week(), picker)
}
