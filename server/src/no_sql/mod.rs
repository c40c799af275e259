mod sample_entity;

pub use sample_entity::*;
