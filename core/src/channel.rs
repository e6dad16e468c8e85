//! Color channels and channel selection.
//!
//! - [`Channel`] - One of the four color channels
//! - [`ChannelMask`] - A set of channels, combined by union
//! - [`Color`] - A four-channel loop color

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::ParseChannelError;

/// A single color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red.
    R,
    /// Green.
    G,
    /// Blue.
    B,
    /// Alpha.
    A,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 4] = [Channel::R, Channel::G, Channel::B, Channel::A];

    /// Position of the channel inside a [`Color`].
    pub fn index(self) -> usize {
        match self {
            Self::R => 0,
            Self::G => 1,
            Self::B => 2,
            Self::A => 3,
        }
    }

    /// The single-bit mask selecting this channel.
    pub fn mask(self) -> ChannelMask {
        match self {
            Self::R => ChannelMask::R,
            Self::G => ChannelMask::G,
            Self::B => ChannelMask::B,
            Self::A => ChannelMask::A,
        }
    }

    /// Lowercase letter used when parsing and printing masks.
    pub fn letter(self) -> char {
        match self {
            Self::R => 'r',
            Self::G => 'g',
            Self::B => 'b',
            Self::A => 'a',
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter().to_ascii_uppercase())
    }
}

impl TryFrom<char> for Channel {
    type Error = ParseChannelError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'r' => Ok(Self::R),
            'g' => Ok(Self::G),
            'b' => Ok(Self::B),
            'a' => Ok(Self::A),
            _ => Err(ParseChannelError(c)),
        }
    }
}

impl FromStr for Channel {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Channel::try_from(c),
            (Some(_), Some(c)) => Err(ParseChannelError(c)),
            (None, _) => Err(ParseChannelError(' ')),
        }
    }
}

bitflags! {
    /// Selection over the four color channels.
    ///
    /// An empty mask is a valid value. Transforms decide what an empty
    /// selection means for them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChannelMask: u8 {
        /// Red channel.
        const R = 1 << 0;
        /// Green channel.
        const G = 1 << 1;
        /// Blue channel.
        const B = 1 << 2;
        /// Alpha channel.
        const A = 1 << 3;
        /// The three color channels.
        const RGB = Self::R.bits() | Self::G.bits() | Self::B.bits();
        /// Every channel.
        const RGBA = Self::RGB.bits() | Self::A.bits();
    }
}

impl ChannelMask {
    /// Whether `channel` is selected.
    pub fn selects(self, channel: Channel) -> bool {
        self.contains(channel.mask())
    }

    /// Selected channels in fixed R, G, B, A order.
    pub fn channels(self) -> impl Iterator<Item = Channel> {
        Channel::ALL.into_iter().filter(move |c| self.selects(*c))
    }
}

/// Color channels R, G and B are selected by default, alpha is left alone.
impl Default for ChannelMask {
    fn default() -> Self {
        Self::RGB
    }
}

impl From<Channel> for ChannelMask {
    fn from(channel: Channel) -> Self {
        channel.mask()
    }
}

impl fmt::Display for ChannelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for channel in self.channels() {
            write!(f, "{channel}")?;
        }
        Ok(())
    }
}

/// Parses masks written as channel letters, e.g. `"rgb"`, `"RA"`.
///
/// `""` and `"-"` both parse to the empty mask. Repeated letters are allowed.
impl FromStr for ChannelMask {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Self::empty());
        }
        s.chars().try_fold(Self::empty(), |mask, c| {
            Channel::try_from(c).map(|channel| mask | channel.mask())
        })
    }
}

/// A four-channel loop color. Channel values are not range-checked.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// All channels zero.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque white, the fill value of a fresh color layer.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// A color with every channel set to `value`.
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Read one channel.
    pub fn channel(&self, channel: Channel) -> f32 {
        self.to_array()[channel.index()]
    }

    /// Overwrite one channel.
    pub fn set_channel(&mut self, channel: Channel, value: f32) {
        let mut values = self.to_array();
        values[channel.index()] = value;
        *self = values.into();
    }

    /// Returns a copy with `channel` replaced by `value`.
    pub fn with_channel(mut self, channel: Channel, value: f32) -> Self {
        self.set_channel(channel, value);
        self
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_reads_follow_storage_order() {
        let color = Color::new(0.1, 0.2, 0.3, 0.4);
        let read: Vec<f32> = Channel::ALL.iter().map(|&c| color.channel(c)).collect();
        assert_eq!(read, vec![0.1, 0.2, 0.3, 0.4]);

        let mut color = Color::ZERO;
        color.set_channel(Channel::A, 1.0);
        assert_eq!(color, Color::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn default_mask_is_rgb() {
        let mask = ChannelMask::default();
        assert!(mask.selects(Channel::R));
        assert!(mask.selects(Channel::G));
        assert!(mask.selects(Channel::B));
        assert!(!mask.selects(Channel::A));
    }

    #[test]
    fn masks_combine_by_union() {
        let mask = ChannelMask::from(Channel::R) | Channel::A.mask();
        assert_eq!(mask.channels().collect::<Vec<_>>(), vec![Channel::R, Channel::A]);
    }

    #[test]
    fn channels_iterate_in_fixed_order() {
        let mask = ChannelMask::A | ChannelMask::G | ChannelMask::R;
        assert_eq!(
            mask.channels().collect::<Vec<_>>(),
            vec![Channel::R, Channel::G, Channel::A]
        );
        assert_eq!(ChannelMask::empty().channels().count(), 0);
    }

    #[test]
    fn parse_mask() {
        assert_eq!("rgb".parse::<ChannelMask>().unwrap(), ChannelMask::RGB);
        assert_eq!("AR".parse::<ChannelMask>().unwrap(), ChannelMask::R | ChannelMask::A);
        assert_eq!("rr".parse::<ChannelMask>().unwrap(), ChannelMask::R);
        assert_eq!("".parse::<ChannelMask>().unwrap(), ChannelMask::empty());
        assert_eq!("-".parse::<ChannelMask>().unwrap(), ChannelMask::empty());
        assert_eq!("rx".parse::<ChannelMask>(), Err(ParseChannelError('x')));
    }

    #[test]
    fn mask_display() {
        assert_eq!(ChannelMask::RGBA.to_string(), "RGBA");
        assert_eq!((ChannelMask::B | ChannelMask::R).to_string(), "RB");
        assert_eq!(ChannelMask::empty().to_string(), "-");
    }

    #[test]
    fn parse_channel() {
        assert_eq!("g".parse::<Channel>().unwrap(), Channel::G);
        assert_eq!("A".parse::<Channel>().unwrap(), Channel::A);
        assert!("rg".parse::<Channel>().is_err());
        assert!("".parse::<Channel>().is_err());
    }

    #[test]
    fn with_channel_replaces_single_value() {
        let color = Color::ZERO.with_channel(Channel::B, 0.5);
        assert_eq!(color, Color::new(0.0, 0.0, 0.5, 0.0));
    }

    #[test]
    fn color_is_plain_data() {
        let colors = [Color::new(1.0, 2.0, 3.0, 4.0)];
        let floats: &[f32] = bytemuck::cast_slice(&colors);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0]);
    }
}
