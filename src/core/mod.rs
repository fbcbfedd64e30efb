pub mod center;
pub mod client;
pub mod dependency;
pub mod html;
pub mod marker;
pub mod options;
pub mod renderer;

pub use crate::domain::model::{Business, BusinessPin, BusinessQuery, GeoPoint, MapMarker, MapView};
pub use crate::domain::ports::{BusinessDirectory, Storage};
pub use crate::utils::error::Result;
