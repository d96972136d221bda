use api::{Category, Show};
use dioxus::prelude::*;

/// Load one catalog row. Failures are logged and render as an empty row.
pub fn use_row(category: Category) -> Resource<Vec<Show>> {
    use_resource(move || async move {
        match api::fetch_row(category).await {
            Ok(shows) => shows,
            Err(e) => {
                tracing::warn!(?category, "Failed to load row: {}", e);
                Vec::new()
            }
        }
    })
}

/// A row that fetches its own shows.
#[component]
pub fn CategoryRow(category: Category) -> Element {
    let shows = use_row(category);
    let shows = shows.read().clone().unwrap_or_default();

    rsx! {
        Row { category, shows }
    }
}

/// `(id, title, image)` for every show with artwork, in row order.
// Shows without artwork would render as empty tiles
fn tiles(shows: &[Show]) -> Vec<(u64, String, String)> {
    shows
        .iter()
        .filter_map(|show| {
            show.backdrop_url("w500")
                .map(|image| (show.id, show.title.clone(), image))
        })
        .collect()
}

/// One horizontally scrolling row of shows.
#[component]
pub fn Row(category: Category, shows: Vec<Show>) -> Element {
    let heading = category.title();
    let tiles = tiles(&shows);

    rsx! {
        section {
            class: "row",
            h2 { class: "row-title", "{heading}" }
            div {
                class: "row-slider",
                for (id, title, image) in tiles {
                    div {
                        key: "{id}",
                        class: "row-item",
                        img { src: "{image}", alt: "{title}" }
                        p { class: "row-item-title", "{title}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::catalog;

    fn show(id: u64, backdrop: Option<&str>) -> Show {
        Show {
            id,
            title: format!("Show {id}"),
            overview: String::new(),
            backdrop_path: backdrop.map(str::to_string),
            release_date: None,
        }
    }

    #[test]
    fn test_featured_show_leads_the_shared_row() {
        let shows = vec![show(1, None), show(2, Some("/b.jpg")), show(3, Some("/c.jpg"))];

        let tiles = tiles(&shows);
        assert_eq!(tiles.len(), 2);

        let featured = catalog::featured(&shows).unwrap();
        assert_eq!(tiles[0].0, featured.id);
    }
}
