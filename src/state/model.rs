//! Closed state schemas for every entity kind.
//!
//! Each kind declares its full visual state as a plain struct plus a patch
//! twin whose fields are all `Option`. Patches merge field-wise (later writes
//! win), blend field-wise against an old snapshot, and can be masked against a
//! live state to capture baseline values for exactly the fields a recording
//! ever touched. Keeping the schema closed lets the merge and interpolation
//! code be checked exhaustively instead of reflected over at runtime.

use std::fmt;

use crate::foundation::core::{EntityKind, Palette, Point, Rgb};
use crate::state::blend::Blend;

/// Displayed label of a vertex or edge.
///
/// Numeric labels animate (interpolated and rounded to whole digits while a
/// transition is in flight); text labels snap. An edge whose label is not
/// [`Label::Value`] has no usable weight.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// No label set.
    #[default]
    None,
    /// Numeric label (edge weight, vertex distance, running total).
    Value(f64),
    /// Free-form text label.
    Text(String),
}

impl Label {
    /// Numeric payload, if this label carries one.
    pub fn as_value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for Label {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Value(v) if v.fract() == 0.0 => write!(f, "{v:.0}"),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}

impl Blend for Label {
    fn blend(old: &Self, target: &Self, t: f64) -> Self {
        match (old, target) {
            _ if t >= 1.0 => target.clone(),
            (Self::Value(a), Self::Value(b)) => Self::Value((a + (b - a) * t).round()),
            (Self::Text(a), Self::Text(b)) => blend_text_template(a, b, t)
                .map(Self::Text)
                .unwrap_or_else(|| target.clone()),
            _ => target.clone(),
        }
    }
}

/// Interpolate numeric runs inside two strings whose non-numeric scaffolding
/// matches, rounding the interpolated digits ("2/3" toward "5/3" at 0.5 gives
/// "4/3"). Returns `None` when the scaffolding differs, in which case the
/// caller snaps.
fn blend_text_template(old: &str, target: &str, t: f64) -> Option<String> {
    fn runs(s: &str) -> Vec<(bool, &str)> {
        let numeric = |c: char| c.is_ascii_digit() || c == '.';
        let mut out: Vec<(bool, &str)> = Vec::new();
        let mut start = 0;
        let mut prev: Option<bool> = None;
        for (i, c) in s.char_indices() {
            let n = numeric(c);
            if let Some(p) = prev
                && p != n
            {
                out.push((p, &s[start..i]));
                start = i;
            }
            prev = Some(n);
        }
        if let Some(p) = prev {
            out.push((p, &s[start..]));
        }
        out
    }

    let a = runs(old);
    let b = runs(target);
    if a.len() != b.len() {
        return None;
    }
    let mut out = String::with_capacity(target.len());
    for (&(na, ta), &(nb, tb)) in a.iter().zip(b.iter()) {
        match (na, nb) {
            (true, true) => {
                let (from, to): (f64, f64) = (ta.parse().ok()?, tb.parse().ok()?);
                let v = (from + (to - from) * t).round();
                out.push_str(&format!("{v:.0}"));
            }
            (false, false) if ta == tb => out.push_str(ta),
            _ => return None,
        }
    }
    Some(out)
}

/// Arrowhead flags per edge endpoint, indexed like the stored endpoint pair.
///
/// An arrowhead at endpoint `i` means the edge is directed *toward* endpoint
/// `i`; traversal leaving endpoint `i` is then disallowed. No arrowheads means
/// the edge is undirected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Arrows(pub [bool; 2]);

impl Arrows {
    /// Undirected edge.
    pub const fn none() -> Self {
        Self([false, false])
    }

    /// Edge directed toward endpoint `i` (arrowhead drawn there).
    pub fn toward(i: usize) -> Self {
        let mut at = [false, false];
        at[i] = true;
        Self(at)
    }

    /// `true` when an arrowhead sits at endpoint `i`.
    pub fn at(&self, i: usize) -> bool {
        self.0[i]
    }

    /// `true` when any arrowhead is set.
    pub fn is_directed(&self) -> bool {
        self.0[0] || self.0[1]
    }
}

impl Blend for Arrows {
    fn blend(_old: &Self, target: &Self, _t: f64) -> Self {
        *target
    }
}

macro_rules! state_schema {
    (
        $(#[$sm:meta])* state $state:ident;
        $(#[$pm:meta])* patch $patch:ident;
        { $( $(#[$fm:meta])* $field:ident : $ty:ty ),+ $(,)? }
    ) => {
        $(#[$sm])*
        #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $state {
            $( $(#[$fm])* pub $field: $ty, )+
        }

        $(#[$pm])*
        #[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $patch {
            $(
                $(#[$fm])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )+
        }

        impl $state {
            /// Overwrite every field named by `patch`.
            pub fn apply(&mut self, patch: &$patch) {
                $( if let Some(v) = &patch.$field { self.$field = v.clone(); } )+
            }

            /// Write the blend of `old` toward `target` at progress `t`,
            /// touching only the fields named by `target`.
            pub fn blend_from(&mut self, old: &$state, target: &$patch, t: f64) {
                $( if let Some(v) = &target.$field {
                    self.$field = Blend::blend(&old.$field, v, t);
                } )+
            }

            /// Patch carrying this state's values for exactly the fields named
            /// by `shape`.
            pub fn masked_by(&self, shape: &$patch) -> $patch {
                $patch {
                    $( $field: shape.$field.is_some().then(|| self.$field.clone()), )+
                }
            }
        }

        impl $patch {
            /// Empty patch, ready for chained setters.
            pub fn new() -> Self {
                Self::default()
            }

            /// Merge `later` over `self`; overlapping fields take `later`.
            pub fn merge(&mut self, later: &$patch) {
                $( if later.$field.is_some() {
                    self.$field = later.$field.clone();
                } )+
            }

            /// `true` when no field is set.
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )+
            }
        }
    };
}

state_schema! {
    /// Visual state of a vertex.
    state VertexState;
    /// Partial update for [`VertexState`].
    patch VertexPatch;
    {
        /// Displayed label.
        label: Label,
        /// Canvas position of the vertex center.
        pos: Point,
        /// Fill color.
        color: Rgb,
        /// Outline color.
        stroke: Rgb,
        /// Relative size multiplier.
        size: f64,
        /// Opacity in `[0, 1]`.
        opacity: f64,
    }
}

impl Default for VertexState {
    fn default() -> Self {
        Self {
            label: Label::None,
            pos: Point::ORIGIN,
            color: Rgb::WHITE,
            stroke: Rgb::WHITE,
            size: 1.0,
            opacity: 0.0,
        }
    }
}

impl VertexPatch {
    /// Set the label.
    pub fn label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the position.
    pub fn pos(mut self, pos: Point) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Set the fill color.
    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the outline color.
    pub fn stroke(mut self, stroke: Rgb) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Set the size multiplier.
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

state_schema! {
    /// Visual state of an edge.
    state EdgeState;
    /// Partial update for [`EdgeState`].
    patch EdgePatch;
    {
        /// Displayed label; a numeric label doubles as the edge weight.
        label: Label,
        /// Stroke color.
        color: Rgb,
        /// Relative stroke-width multiplier.
        size: f64,
        /// Opacity in `[0, 1]`.
        opacity: f64,
        /// Arrowhead flags per stored endpoint.
        arrows: Arrows,
    }
}

impl Default for EdgeState {
    fn default() -> Self {
        Self {
            label: Label::None,
            color: Rgb::WHITE,
            size: 1.0,
            opacity: 0.0,
            arrows: Arrows::none(),
        }
    }
}

impl EdgePatch {
    /// Set the label.
    pub fn label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the stroke color.
    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the stroke-width multiplier.
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set the arrowhead flags.
    pub fn arrows(mut self, arrows: Arrows) -> Self {
        self.arrows = Some(arrows);
        self
    }
}

state_schema! {
    /// State of the narration line.
    state HintState;
    /// Partial update for [`HintState`].
    patch HintPatch;
    {
        /// Narration text.
        text: String,
    }
}

impl Default for HintState {
    fn default() -> Self {
        Self {
            text: String::new(),
        }
    }
}

impl HintPatch {
    /// Set the narration text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

state_schema! {
    /// State of the animated gradient backdrop.
    state BackdropState;
    /// Partial update for [`BackdropState`].
    patch BackdropPatch;
    {
        /// Gradient color stops.
        palette: Palette,
        /// Gradient drift speed in cycles per second.
        drift: f64,
    }
}

impl Default for BackdropState {
    fn default() -> Self {
        Self {
            palette: Palette::editing(),
            drift: 0.02,
        }
    }
}

impl BackdropPatch {
    /// Set the gradient palette.
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Set the drift speed.
    pub fn drift(mut self, drift: f64) -> Self {
        self.drift = Some(drift);
        self
    }
}

/// Full visual state of one entity, tagged by kind.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum EntityState {
    /// Backdrop state.
    Backdrop(BackdropState),
    /// Hint state.
    Hint(HintState),
    /// Vertex state.
    Vertex(VertexState),
    /// Edge state.
    Edge(EdgeState),
}

/// Partial update for one entity, tagged by kind.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StatePatch {
    /// Backdrop patch.
    Backdrop(BackdropPatch),
    /// Hint patch.
    Hint(HintPatch),
    /// Vertex patch.
    Vertex(VertexPatch),
    /// Edge patch.
    Edge(EdgePatch),
}

impl From<BackdropPatch> for StatePatch {
    fn from(p: BackdropPatch) -> Self {
        Self::Backdrop(p)
    }
}

impl From<HintPatch> for StatePatch {
    fn from(p: HintPatch) -> Self {
        Self::Hint(p)
    }
}

impl From<VertexPatch> for StatePatch {
    fn from(p: VertexPatch) -> Self {
        Self::Vertex(p)
    }
}

impl From<EdgePatch> for StatePatch {
    fn from(p: EdgePatch) -> Self {
        Self::Edge(p)
    }
}

impl EntityState {
    /// Kind discriminator.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Backdrop(_) => EntityKind::Backdrop,
            Self::Hint(_) => EntityKind::Hint,
            Self::Vertex(_) => EntityKind::Vertex,
            Self::Edge(_) => EntityKind::Edge,
        }
    }

    /// Vertex payload, if this is a vertex.
    pub fn as_vertex(&self) -> Option<&VertexState> {
        match self {
            Self::Vertex(v) => Some(v),
            _ => None,
        }
    }

    /// Edge payload, if this is an edge.
    pub fn as_edge(&self) -> Option<&EdgeState> {
        match self {
            Self::Edge(e) => Some(e),
            _ => None,
        }
    }

    /// Hint payload, if this is the narration entity.
    pub fn as_hint(&self) -> Option<&HintState> {
        match self {
            Self::Hint(h) => Some(h),
            _ => None,
        }
    }

    /// Backdrop payload, if this is the backdrop.
    pub fn as_backdrop(&self) -> Option<&BackdropState> {
        match self {
            Self::Backdrop(b) => Some(b),
            _ => None,
        }
    }

    /// Overwrite every field named by `patch`.
    ///
    /// A patch of a different kind is a caller bug and is ignored.
    pub fn apply(&mut self, patch: &StatePatch) {
        match (self, patch) {
            (Self::Backdrop(s), StatePatch::Backdrop(p)) => s.apply(p),
            (Self::Hint(s), StatePatch::Hint(p)) => s.apply(p),
            (Self::Vertex(s), StatePatch::Vertex(p)) => s.apply(p),
            (Self::Edge(s), StatePatch::Edge(p)) => s.apply(p),
            (s, p) => debug_assert!(false, "patch kind {:?} vs state {:?}", p.kind(), s.kind()),
        }
    }

    /// Write the blend of `old` toward `target` at progress `t`, touching only
    /// the fields named by `target`.
    pub fn blend_from(&mut self, old: &EntityState, target: &StatePatch, t: f64) {
        match (self, old, target) {
            (Self::Backdrop(s), Self::Backdrop(o), StatePatch::Backdrop(p)) => {
                s.blend_from(o, p, t)
            }
            (Self::Hint(s), Self::Hint(o), StatePatch::Hint(p)) => s.blend_from(o, p, t),
            (Self::Vertex(s), Self::Vertex(o), StatePatch::Vertex(p)) => s.blend_from(o, p, t),
            (Self::Edge(s), Self::Edge(o), StatePatch::Edge(p)) => s.blend_from(o, p, t),
            (s, ..) => debug_assert!(false, "mismatched blend kinds for {:?}", s.kind()),
        }
    }

    /// Patch carrying this state's values for exactly the fields named by
    /// `shape`.
    pub fn masked_by(&self, shape: &StatePatch) -> StatePatch {
        match (self, shape) {
            (Self::Backdrop(s), StatePatch::Backdrop(p)) => s.masked_by(p).into(),
            (Self::Hint(s), StatePatch::Hint(p)) => s.masked_by(p).into(),
            (Self::Vertex(s), StatePatch::Vertex(p)) => s.masked_by(p).into(),
            (Self::Edge(s), StatePatch::Edge(p)) => s.masked_by(p).into(),
            (s, p) => {
                debug_assert!(false, "mask kind {:?} vs state {:?}", p.kind(), s.kind());
                StatePatch::empty_of(s.kind())
            }
        }
    }
}

impl StatePatch {
    /// Empty patch of the given kind.
    pub fn empty_of(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Backdrop => BackdropPatch::default().into(),
            EntityKind::Hint => HintPatch::default().into(),
            EntityKind::Vertex => VertexPatch::default().into(),
            EntityKind::Edge => EdgePatch::default().into(),
        }
    }

    /// Kind discriminator.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Backdrop(_) => EntityKind::Backdrop,
            Self::Hint(_) => EntityKind::Hint,
            Self::Vertex(_) => EntityKind::Vertex,
            Self::Edge(_) => EntityKind::Edge,
        }
    }

    /// Merge `later` over `self`; overlapping fields take `later`.
    ///
    /// A patch of a different kind is a caller bug and is ignored.
    pub fn merge(&mut self, later: &StatePatch) {
        match (self, later) {
            (Self::Backdrop(a), StatePatch::Backdrop(b)) => a.merge(b),
            (Self::Hint(a), StatePatch::Hint(b)) => a.merge(b),
            (Self::Vertex(a), StatePatch::Vertex(b)) => a.merge(b),
            (Self::Edge(a), StatePatch::Edge(b)) => a.merge(b),
            (a, b) => debug_assert!(false, "merge kind {:?} vs {:?}", b.kind(), a.kind()),
        }
    }

    /// `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Backdrop(p) => p.is_empty(),
            Self::Hint(p) => p.is_empty(),
            Self::Vertex(p) => p.is_empty(),
            Self::Edge(p) => p.is_empty(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/model.rs"]
mod tests;
