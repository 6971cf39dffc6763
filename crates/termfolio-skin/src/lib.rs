//! Theme system -- the four terminal color schemes and the store that
//! remembers which one is active.
//!
//! The store is constructed once per session and handed to whoever needs
//! it; there is no global theme state.

pub mod store;
pub mod theme;

pub use store::{THEME_KEY, ThemeStore};
pub use theme::{Color, Palette, Theme};
