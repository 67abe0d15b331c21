pub mod collages;
pub mod normalize;
pub mod upload;
