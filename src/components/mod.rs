pub mod bracket;
pub mod radar;
pub mod theme;
pub mod world_map;
