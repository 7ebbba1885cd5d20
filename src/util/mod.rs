pub mod cancel;
pub mod difficulty;
pub mod float_ext;
pub mod minimize;
pub mod mods;
pub mod special_functions;
