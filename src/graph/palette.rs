use std::ops::RangeInclusive;

use crate::types::Color;

/// The graph-wide color palette `{1 ..= len}`.
///
/// Colors are handed out contiguously, so the palette is fully described by
/// its size. It only grows through [`Palette::grow`], which the coloring pass
/// calls solely on the opt-in fallback path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    len: u32,
}

impl Palette {
    /// Palette sized for a graph of maximum degree `delta`: `{1 ..= delta + 1}`.
    pub fn for_max_degree(delta: usize) -> Self {
        let len = u32::try_from(delta).unwrap_or(u32::MAX - 1) + 1;
        Self { len }
    }

    /// Number of colors in the palette.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True before the palette has been sized.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Membership test. [`Color::NONE`] is never a member.
    pub fn contains(&self, color: Color) -> bool {
        color.is_assigned() && color.0 <= self.len
    }

    /// Largest color, if any.
    pub fn max(&self) -> Option<Color> {
        (self.len > 0).then_some(Color(self.len))
    }

    /// Colors in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.range().map(Color)
    }

    /// Appends the next color and returns it.
    pub(crate) fn grow(&mut self) -> Color {
        self.len += 1;
        Color(self.len)
    }

    fn range(&self) -> RangeInclusive<u32> {
        1..=self.len
    }
}
