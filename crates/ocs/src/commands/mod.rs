pub mod completion;
pub mod config_cmd;
pub mod game;
pub mod glyph;
pub mod goal;
pub mod symbols;
pub mod version;
