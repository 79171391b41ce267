pub mod detail;
pub mod place;
pub mod preview;
pub mod ranking;

pub use detail::*;
pub use place::*;
pub use preview::*;
pub use ranking::best_image;
