pub mod track;

pub use track::Entity as Track;
pub use track::TrackSummary;
