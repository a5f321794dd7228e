use crate::domain::hotel::Hotel;
use maud::{html, Markup};

pub fn hotel_card(hotel: &Hotel) -> Markup {
    let room = &hotel.cheapest_room;

    html! {
        article class="card hotel" data-hotel-id=(hotel.id) {
            @if let Some(src) = &hotel.image_url {
                img class="cover" src=(src) alt=(hotel.name);
            }
            h2 { (hotel.name) }
            div class="card-body" {
                p class="address" { (hotel.address.one_line()) }
                @if let Some(phone) = &hotel.phone {
                    p class="phone" { (phone) }
                }
                p class="rating" {
                    @match hotel.rating {
                        Some(rating) => { (rating) "/5 (" (hotel.rating_count) " avis)" }
                        None => { "Pas encore d'avis" }
                    }
                }
                @if let Some(distance) = hotel.distance {
                    p class="distance" { (format!("{distance:.1} km")) }
                }
                div class="cheapest-room" {
                    h3 { (room.title) }
                    ul {
                        li { (room.room_type) }
                        li { (room.surface) " m²" }
                        li { (room.bedrooms) " chambre(s), " (room.bathrooms) " salle(s) de bain" }
                    }
                    p class="price" { (format!("{:.0} €", room.price)) " / nuit" }
                }
            }
        }
    }
}
