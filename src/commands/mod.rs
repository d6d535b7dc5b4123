pub mod compress;
pub mod extract;
pub mod info;
pub mod merge;
pub mod split;
pub mod text;
