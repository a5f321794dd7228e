// templates/pages/hotels.rs

use crate::domain::filters::HotelFilters;
use crate::domain::hotel::Hotel;
use crate::templates::{components::filter_form, desktop_layout, hotel_card};
use maud::{html, Markup};

pub fn hotels_page(filters: &HotelFilters, hotels: &[Hotel]) -> Markup {
    desktop_layout(
        "Hotels",
        html! {
            main {
                h1 { "Trouvez votre hôtel" }

                (filter_form(filters))

                p class="result-count" { (hotels.len()) " hôtel(s)" }

                @if hotels.is_empty() {
                    p class="empty" { "Aucun hôtel ne correspond à vos critères." }
                } @else {
                    section class="hotel-list" {
                        @for hotel in hotels {
                            (hotel_card(hotel))
                        }
                    }
                }
            }
        },
    )
}
