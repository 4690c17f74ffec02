//! Position ids and the registry that resolves them.
//!
//! Every id except [`BacktraceId::EMPTY`] names one frame (an argument index
//! or an optarg name) relative to a parent id, so resolving an id walks back
//! to the root and yields the path a client needs to highlight the offending
//! part of its query.

use std::fmt;

/// Opaque handle for a term's source position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[repr(transparent)]
pub struct BacktraceId(u32);

impl BacktraceId {
    /// The root term, or a term nobody assigned a position to.
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

impl fmt::Display for BacktraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One step from a parent term to a child.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Frame {
    Arg(u32),
    Opt(String),
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arg(index) => write!(f, "arg {index}"),
            Self::Opt(name) => write!(f, "optarg `{name}`"),
        }
    }
}

/// Allocates position ids and maps them back to frame paths.
#[derive(Debug, Clone, Default)]
pub struct BacktraceRegistry {
    /// Entry `i` describes id `i + 1`.
    entries: Vec<(BacktraceId, Frame)>,
}

impl BacktraceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id for `frame` under `parent`.
    ///
    /// `parent` must be `EMPTY` or an id this registry handed out. Returns
    /// `None` once every 32-bit id is taken.
    pub fn new_frame(&mut self, parent: BacktraceId, frame: Frame) -> Option<BacktraceId> {
        debug_assert!(parent.is_empty() || self.contains(parent));
        let id = u32::try_from(self.entries.len() + 1).ok()?;
        self.entries.push((parent, frame));
        Some(BacktraceId(id))
    }

    pub fn contains(&self, id: BacktraceId) -> bool {
        !id.is_empty() && (id.0 as usize) <= self.entries.len()
    }

    pub fn parent(&self, id: BacktraceId) -> Option<BacktraceId> {
        self.entry(id).map(|(parent, _)| *parent)
    }

    pub fn frame(&self, id: BacktraceId) -> Option<&Frame> {
        self.entry(id).map(|(_, frame)| frame)
    }

    /// Frames from the root down to `id`.
    ///
    /// Returns `None` for ids this registry never allocated; `EMPTY` resolves
    /// to the empty path.
    pub fn frames(&self, id: BacktraceId) -> Option<Vec<&Frame>> {
        if id.is_empty() {
            return Some(Vec::new());
        }
        let mut path = Vec::new();
        let mut current = id;
        while !current.is_empty() {
            let (parent, frame) = self.entry(current)?;
            path.push(frame);
            current = *parent;
        }
        path.reverse();
        Some(path)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, id: BacktraceId) -> Option<&(BacktraceId, Frame)> {
        (id.0 as usize)
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
    }
}
