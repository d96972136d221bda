use api::Category;
use dioxus::prelude::*;
use ui::{use_row, CategoryRow, Hero, Row};

/// Landing page: hero banner plus one row per catalog category.
///
/// The popular row also feeds the hero, so it is fetched once here.
#[component]
pub fn Home() -> Element {
    let popular = use_row(Category::Popular);
    let popular = popular.read().clone().unwrap_or_default();

    rsx! {
        Hero { shows: popular.clone() }
        for category in Category::ALL {
            if category == Category::Popular {
                Row { key: "{category.title()}", category, shows: popular.clone() }
            } else {
                CategoryRow { key: "{category.title()}", category }
            }
        }
    }
}
