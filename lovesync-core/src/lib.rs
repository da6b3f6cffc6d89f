pub mod collection;
pub mod compose;
pub mod config;
pub mod error;
pub mod expand;
pub mod geo;
pub mod listening;
pub mod models;
pub mod router;
pub mod seed;
pub mod store;
pub mod views;

pub use collection::{sort_by_date_desc, Collection};
pub use compose::Composer;
pub use config::AppConfig;
pub use error::{ConfigError, GeoError, StoreError};
pub use expand::ExpandedSet;
pub use geo::{map_url, FixedGeolocator, Geolocator, HttpGeolocator, Locator};
pub use listening::ListeningTimer;
pub use models::{Details, FeedItem, Flag, ItemId, Position, ViewKind};
pub use router::{MountedView, Page, Router, Session};
pub use store::{Backend, JsonStore, MockRepository, Repository};
