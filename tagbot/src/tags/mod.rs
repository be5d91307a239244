//! Tag data model, codec and preview rendering

pub mod codec;
pub mod model;
pub mod render;

pub use codec::TagCodec;
pub use model::{StagedCover, TagField, Tags};
