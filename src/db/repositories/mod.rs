pub mod country;
pub mod google;
pub mod twitter;
pub mod youtube;
