pub mod adapter;
pub mod item;
pub mod matcher;

pub use item::{GeoPoint, Item, PriceClass};
pub use matcher::{Query, RawQuery};
