/* ╔═════════════════════════════════════════════════════════════════════════╗
   ║ Module: layout                                                          ║
   ╟─────────────────────────────────────────────────────────────────────────╢
   ║ Keyboard layouts and their resolution.                                  ║
   ║                                                                         ║
   ║ A layout maps scancodes to virtual keys and virtual keys (plus the      ║
   ║ current modifier state) to alternate virtual keys. Layouts may inherit  ║
   ║ from a parent layout; everything a layout does not map itself is       ║
   ║ looked up in its parent.                                                ║
   ║                                                                         ║
   ║ Public functions                                                        ║
   ║   - resolve_scancode    scancode -> virtual key                         ║
   ║   - resolve_alternate   virtual key + modifiers -> alternate key        ║
   ╚═════════════════════════════════════════════════════════════════════════╝
*/

use log::warn;

use crate::consts::MAX_LAYOUT_DEPTH;
use super::modifiers::Modifiers;
use super::virtual_key::VirtualKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScancodeMapping {
    pub scancode: u8,
    pub key: VirtualKey,
}

impl ScancodeMapping {
    pub const fn new(scancode: u8, key: VirtualKey) -> Self {
        Self { scancode, key }
    }
}

/// "If `input` is decoded while `modifiers` hold, produce `output` instead."
///
/// Only CTRL, ALT, SHIFT, CAPS_LOCK and NUM_LOCK are meaningful in
/// `modifiers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlternateKeyRule {
    pub input: VirtualKey,
    pub modifiers: Modifiers,
    pub output: VirtualKey,
}

impl AlternateKeyRule {
    pub const fn new(input: VirtualKey, modifiers: Modifiers, output: VirtualKey) -> Self {
        Self { input, modifiers, output }
    }

    /// CTRL, ALT and NUM_LOCK must match exactly. The SHIFT slot also
    /// matches when the rule is caps lock sensitive and caps lock is on, so
    /// letters follow either key while symbols need a real shift.
    pub fn matches(&self, state: Modifiers) -> bool {
        let required = self.modifiers;
        let same = |flag: Modifiers| required.contains(flag) == state.contains(flag);

        let shift = same(Modifiers::SHIFT)
            || (required.contains(Modifiers::CAPS_LOCK) && state.contains(Modifiers::CAPS_LOCK));

        same(Modifiers::CTRL) && same(Modifiers::ALT) && shift && same(Modifiers::NUM_LOCK)
    }
}

#[derive(Debug)]
pub struct Layout {
    pub name: &'static str,
    pub parent: Option<&'static Layout>,
    pub scancodes: &'static [ScancodeMapping],
    /// Scancodes following the 0xE0 prefix.
    pub extended_scancodes: &'static [ScancodeMapping],
    pub alternates: &'static [AlternateKeyRule],
}

impl Layout {
    /// This layout followed by its ancestors, at most `MAX_LAYOUT_DEPTH` long.
    pub fn chain(&self) -> LayoutChain<'_> {
        LayoutChain { next: Some(self), depth: 0 }
    }

    pub fn resolve_scancode(&self, scancode: u8, extended: bool) -> VirtualKey {
        self.chain()
            .find_map(|layout| {
                let table = if extended { layout.extended_scancodes } else { layout.scancodes };
                table.iter().find(|mapping| mapping.scancode == scancode).map(|mapping| mapping.key)
            })
            .unwrap_or(VirtualKey::None)
    }

    /// Never returns `VirtualKey::None` for a real key: without a matching
    /// rule the key is returned unchanged.
    pub fn resolve_alternate(&self, key: VirtualKey, state: Modifiers) -> VirtualKey {
        self.chain()
            .find_map(|layout| {
                layout.alternates.iter()
                    .find(|rule| rule.input == key && rule.matches(state))
                    .map(|rule| rule.output)
            })
            .unwrap_or(key)
    }
}

pub struct LayoutChain<'a> {
    next: Option<&'a Layout>,
    depth: usize,
}

impl<'a> Iterator for LayoutChain<'a> {
    type Item = &'a Layout;

    fn next(&mut self) -> Option<Self::Item> {
        let layout = self.next?;
        if self.depth == MAX_LAYOUT_DEPTH {
            warn!("Layout chain deeper than {MAX_LAYOUT_DEPTH} at [{}], ignoring the rest", layout.name);
            self.next = None;
            return None;
        }

        self.depth += 1;
        self.next = layout.parent;
        Some(layout)
    }
}
