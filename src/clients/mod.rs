pub mod countries;
pub mod google_trends;
pub mod twitter;
pub mod youtube;
