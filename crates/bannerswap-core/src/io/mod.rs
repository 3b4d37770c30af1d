pub mod frames;
pub mod mask_store;
