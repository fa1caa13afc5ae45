pub mod biodata;
pub mod checkout;
pub mod contact;
pub mod document;
pub mod favourite;
pub mod payment;
pub mod premium;
pub mod responses;
pub mod stats;
pub mod story;
pub mod user;

// Re-export commonly used types
pub use biodata::*;
pub use checkout::*;
pub use contact::*;
pub use document::*;
pub use favourite::*;
pub use payment::*;
pub use premium::*;
pub use responses::*;
pub use stats::*;
pub use story::*;
pub use user::*;
