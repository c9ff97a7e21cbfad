use std::collections::HashMap;
use std::fmt;

use eframe::egui::{Id, Pos2, Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetCategory {
    Skills,
    Trace,
}

impl TargetCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Trace => "trace",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetHandle(Id);

impl TargetHandle {
    pub fn new(category: TargetCategory, index: usize) -> Self {
        Self(Id::new(("signal_target", category.label(), index)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HitId {
    pub category: TargetCategory,
    pub index: usize,
}

impl HitId {
    pub fn new(category: TargetCategory, index: usize) -> Self {
        Self { category, index }
    }
}

impl fmt::Display for HitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category.label(), self.index)
    }
}

#[derive(Debug, Default)]
pub struct TargetRegistry {
    skills: Vec<TargetHandle>,
    trace: Vec<TargetHandle>,
}

impl TargetRegistry {
    pub fn register(&mut self, category: TargetCategory, handle: TargetHandle) -> usize {
        let handles = self.handles_mut(category);
        if let Some(index) = handles.iter().position(|existing| *existing == handle) {
            return index;
        }
        handles.push(handle);
        handles.len() - 1
    }

    pub fn handles(&self, category: TargetCategory) -> &[TargetHandle] {
        match category {
            TargetCategory::Skills => &self.skills,
            TargetCategory::Trace => &self.trace,
        }
    }

    pub fn len(&self, category: TargetCategory) -> usize {
        self.handles(category).len()
    }

    fn handles_mut(&mut self, category: TargetCategory) -> &mut Vec<TargetHandle> {
        match category {
            TargetCategory::Skills => &mut self.skills,
            TargetCategory::Trace => &mut self.trace,
        }
    }
}

/// Resolves a handle to its current page-space center.
///
/// `None` means the element is not mounted right now.
pub trait TargetLocator {
    fn locate(&self, handle: TargetHandle) -> Option<Pos2>;
}

/// Page-space rects of the targets drawn during the last two frames.
///
/// A target that was not drawn in either frame resolves to `None`.
#[derive(Debug, Default)]
pub struct FrameLayout {
    current: HashMap<TargetHandle, Rect>,
    previous: HashMap<TargetHandle, Rect>,
}

impl FrameLayout {
    pub fn begin_frame(&mut self) {
        self.previous = std::mem::take(&mut self.current);
    }

    pub fn record(&mut self, handle: TargetHandle, viewport_rect: Rect, scroll_offset: Vec2) {
        self.current
            .insert(handle, viewport_rect.translate(scroll_offset));
    }
}

impl TargetLocator for FrameLayout {
    fn locate(&self, handle: TargetHandle) -> Option<Pos2> {
        self.current
            .get(&handle)
            .or_else(|| self.previous.get(&handle))
            .map(|rect| rect.center())
    }
}
