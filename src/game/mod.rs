// Game logic: characters and the arena that hosts them

pub mod arena;
pub mod characters;
