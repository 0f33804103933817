mod check;

pub use check::{check_mods, CheckModsArgs};
