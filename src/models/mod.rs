pub mod catalog;
pub mod itinerary;
pub mod offer;
pub mod plan;
pub mod trip;
