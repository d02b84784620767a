pub mod codec;
pub mod error;
pub mod field_map;
pub mod ids;
pub mod skills;
pub mod stats;
pub mod wire;

pub use codec::{apply_upgrade, decode, encode};
pub use error::CoreError;
pub use field_map::{KEY_FIELD, RawFieldMap};
pub use ids::UserId;
pub use stats::{PlayerRecord, Stat};
