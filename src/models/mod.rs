pub mod competition;
pub mod stock;
pub mod user;

pub use competition::CompetitionRecord;
pub use stock::StockSnapshot;
pub use user::UserProfile;
