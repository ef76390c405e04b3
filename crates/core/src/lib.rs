pub mod bisect;
pub mod gen;
pub mod range;
pub mod timestamp;

pub mod err;

pub use bisect::bisect;
pub use err::Result;
pub use range::SearchRange;
pub use timestamp::Timestamp;
