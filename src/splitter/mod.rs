pub mod materialize;
pub mod select;

pub use materialize::materialize;
pub use select::select_split_points;
