//! Layouts shipped with the driver. Every layout inherits from [`US`].

mod german;
mod italian;
mod uk;
mod us;

pub use german::GERMAN;
pub use italian::ITALIAN;
pub use uk::UK;
pub use us::US;

use super::layout::Layout;

pub static ALL: [&Layout; 4] = [&US, &UK, &GERMAN, &ITALIAN];

/// Look up a shipped layout by name, ignoring case.
pub fn by_name(name: &str) -> Option<&'static Layout> {
    ALL.iter().copied().find(|layout| layout.name.eq_ignore_ascii_case(name))
}
