pub mod airports;
pub mod error;
pub mod filters;
pub mod models;
pub mod provider;

pub use error::SearchError;
pub use filters::{FilterDefaults, FilterParams, SortKey};
pub use models::{
    DestinationAggregate, Itinerary, OriginRequest, PassengerCounts, RawItinerary, RawSegment,
    RouteSummary,
};
pub use provider::{FlightProvider, ProviderError};
