use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    Service,
    domain::{
        common::unit_of_work::{MockDataSource, MockUnitOfWorkProvider},
        genre::entities::{Genre, GenreId},
        gig::entities::{Gig, GigInput},
        health::port::MockHealthRepository,
        user::entities::{ApplicationUser, UserId},
    },
};

mod attendance;
mod following;
mod gig;
mod health;
mod unit_of_work;

pub(crate) type MockService = Service<MockUnitOfWorkProvider, MockHealthRepository>;

pub(crate) const JAZZ: GenreId = GenreId(1);
pub(crate) const ROCK: GenreId = GenreId(3);

pub(crate) struct Fixture {
    pub service: MockService,
    pub source: MockDataSource,
    pub health: MockHealthRepository,
    pub artist: UserId,
    pub fan: UserId,
}

/// Seeds the four default genres and two users: an artist and a fan.
pub(crate) async fn fixture() -> Fixture {
    let source = MockDataSource::new();
    let artist = UserId(Uuid::new_v4());
    let fan = UserId(Uuid::new_v4());

    source
        .set_genres(vec![
            Genre::new(GenreId(1), "Jazz"),
            Genre::new(GenreId(2), "Blues"),
            Genre::new(GenreId(3), "Rock"),
            Genre::new(GenreId(4), "Country"),
        ])
        .await;
    source
        .set_users(vec![
            ApplicationUser {
                id: artist,
                name: "Miles Davis".to_string(),
            },
            ApplicationUser {
                id: fan,
                name: "Jane Fan".to_string(),
            },
        ])
        .await;

    let health = MockHealthRepository::new();
    let service = Service::new(MockUnitOfWorkProvider::new(source.clone()), health.clone());

    Fixture {
        service,
        source,
        health,
        artist,
        fan,
    }
}

pub(crate) fn gig_input(days_from_now: i64, venue: &str, genre_id: GenreId) -> GigInput {
    GigInput {
        date_time: Utc::now() + Duration::days(days_from_now),
        venue: venue.to_string(),
        genre_id,
    }
}

/// A stored gig, bypassing validation so past dates can be seeded.
pub(crate) fn stored_gig(artist_id: UserId, days_from_now: i64, venue: &str) -> Gig {
    Gig::new(artist_id, gig_input(days_from_now, venue, JAZZ))
}
