pub use kurbo::{Point, Vec2};

/// Dense arena index identifying one entity on a stage.
///
/// Ids are assigned in registration order and stay stable for the lifetime of
/// the stage; a timeline freezes the id range `[0, n)` when it is created, so
/// algorithm side-tables can be plain vectors indexed by id.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Arena slot for this id.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Discriminator for the closed set of entity kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EntityKind {
    /// Animated gradient background.
    Backdrop,
    /// The narration line shown under the canvas.
    Hint,
    /// A graph vertex.
    Vertex,
    /// A graph edge between two vertices.
    Edge,
}

/// Straight RGB color with `f64` channels in `[0, 255]`.
///
/// Channels are floating point so colors interpolate smoothly; renderers round
/// at draw time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    /// Build a color from 8-bit channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64,
            g: g as f64,
            b: b as f64,
        }
    }

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);
}

/// Four-stop gradient palette used by the backdrop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Palette(pub [Rgb; 4]);

impl Palette {
    /// Calm blue/violet palette shown while a graph is being edited.
    pub const fn editing() -> Self {
        Self([
            Rgb::new(35, 166, 213),
            Rgb::new(35, 216, 171),
            Rgb::new(141, 40, 218),
            Rgb::new(87, 58, 218),
        ])
    }

    /// Warm palette shown while an algorithm is working.
    pub const fn working() -> Self {
        Self([
            Rgb::new(213, 166, 35),
            Rgb::new(171, 216, 35),
            Rgb::new(218, 40, 141),
            Rgb::new(218, 58, 87),
        ])
    }

    /// Green palette shown when an algorithm has finished.
    pub const fn finished() -> Self {
        Self([
            Rgb::new(125, 160, 26),
            Rgb::new(216, 171, 35),
            Rgb::new(30, 164, 106),
            Rgb::new(44, 164, 65),
        ])
    }
}
