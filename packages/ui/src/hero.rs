use api::catalog::{self, Show, HERO_OVERVIEW_LEN};
use dioxus::prelude::*;

/// Full-width banner featuring the first of `shows` that has artwork.
#[component]
pub fn Hero(shows: Vec<Show>) -> Element {
    let featured = catalog::featured(&shows).cloned();

    let Some(show) = featured else {
        return rsx! {
            div { class: "hero hero--empty" }
        };
    };

    let title = show.title.clone();
    let backdrop = show.backdrop_url("original").unwrap_or_default();
    let overview = catalog::truncate(&show.overview, HERO_OVERVIEW_LEN);
    let released = show.release_date.clone();

    rsx! {
        div {
            class: "hero",
            img { class: "hero-backdrop", src: "{backdrop}", alt: "{title}" }
            div { class: "hero-shade" }
            div {
                class: "hero-content",
                h1 { class: "hero-title", "{title}" }
                div {
                    class: "hero-buttons",
                    button { class: "hero-play", "Play" }
                    button { class: "hero-later", "Watch Later" }
                }
                if let Some(date) = released {
                    p { class: "hero-date", "Released: {date}" }
                }
                p { class: "hero-overview", "{overview}" }
            }
        }
    }
}
