use crate::domain::filters::HotelFilters;
use maud::{html, Markup};

const ROOM_TYPES: [&str; 3] = ["Chambre", "Suite", "Dortoir"];

/// GET form that round-trips the current filters through the query string.
pub fn filter_form(filters: &HotelFilters) -> Markup {
    let number = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    let count = |value: Option<i64>| value.map(|v| v.to_string()).unwrap_or_default();

    html! {
        form class="filters" method="get" action="/hotels" {
            input type="search" name="search" placeholder="Rechercher"
                value=(filters.search.as_deref().unwrap_or(""));
            fieldset {
                legend { "Position" }
                input type="number" step="any" name="lat" placeholder="Latitude" value=(number(filters.lat));
                input type="number" step="any" name="lng" placeholder="Longitude" value=(number(filters.lng));
                input type="number" step="any" name="distance" placeholder="Rayon (km)" value=(number(filters.distance));
            }
            fieldset {
                legend { "Prix" }
                input type="number" name="price_min" placeholder="Min" value=(number(filters.price.min));
                input type="number" name="price_max" placeholder="Max" value=(number(filters.price.max));
            }
            fieldset {
                legend { "Surface" }
                input type="number" name="surface_min" placeholder="Min" value=(number(filters.surface.min));
                input type="number" name="surface_max" placeholder="Max" value=(number(filters.surface.max));
            }
            fieldset {
                legend { "Pièces" }
                input type="number" name="rooms" placeholder="Chambres" value=(count(filters.rooms));
                input type="number" name="bathrooms" placeholder="Salles de bain" value=(count(filters.bathrooms));
            }
            fieldset {
                legend { "Type" }
                @for room_type in ROOM_TYPES {
                    label {
                        input type="checkbox" name="types" value=(room_type)
                            checked[filters.types.iter().any(|t| t == room_type)];
                        (room_type)
                    }
                }
            }
            button class="btn" type="submit" { "Filtrer" }
        }
    }
}
