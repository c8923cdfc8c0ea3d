mod catalog;
mod favorite;

pub use catalog::{
    CastMember, CreditList, Genre, GenreList, MovieDetails, MovieSummary, PersonCredit,
    PersonCreditList, PersonDetails, PersonSummary, ResultsPage, SearchResults, Video,
};
pub use favorite::{FavoriteEntry, MediaKind, StoredFavorite};
