//! TreemapEngine - owns the hierarchy and its animated layout.
//!
//! The flat list is rebuilt wholesale on every structural change and its
//! targets are recomputed on every value, size or config change. The engine
//! is single-threaded and holds no global state; instances are independent.

use crate::animation::{AnimationDriver, driver, prepare_fade_in, seed_from_previous};
use crate::geometry::{Point, Rect};
use crate::hierarchy::{Flattened, HierarchyNode, LayoutRect, flatten};
use crate::layout::LayoutSolver;
use crate::spatial::RectIndex;

use super::config::TreemapConfig;

/// Floats per entry in [`TreemapEngine::rect_buffer`]:
/// `x, y, width, height, r, g, b, alpha, depth`.
pub const RECT_STRIDE: usize = 9;

/// The treemap engine.
///
/// This struct manages:
/// - The caller's source tree (the value-update target)
/// - The flattened, laid-out list the renderer reads
/// - Animation toward layout targets
/// - Point lookup and highlight state
#[derive(Debug)]
pub struct TreemapEngine {
    config: TreemapConfig,
    solver: LayoutSolver,
    driver: AnimationDriver,

    /// Area the root is laid out into
    area: Rect,

    /// Last tree passed to `set_data` / `set_target_data`
    source: Option<HierarchyNode>,

    /// Pre-order flat list
    rects: Vec<LayoutRect>,

    /// Index of the root entry
    root: Option<usize>,

    /// Highlighted entry, unvalidated
    highlighted: Option<usize>,

    /// Spatial index over current rectangles
    spatial: RectIndex,

    /// Whether the spatial index needs rebuilding
    spatial_dirty: bool,
}

impl TreemapEngine {
    /// Create an empty engine.
    pub fn new(config: TreemapConfig) -> Self {
        Self {
            solver: LayoutSolver::new(config.layout.clone()),
            driver: AnimationDriver::new(config.animation.clone()),
            config,
            area: Rect::ZERO,
            source: None,
            rects: Vec::new(),
            root: None,
            highlighted: None,
            spatial: RectIndex::new(),
            spatial_dirty: false,
        }
    }

    /// Create an empty engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TreemapConfig::default())
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The active configuration.
    pub fn config(&self) -> &TreemapConfig {
        &self.config
    }

    /// Replace the configuration. Targets (geometry and palette colors) are
    /// recomputed and the current state animates toward them.
    pub fn set_config(&mut self, config: TreemapConfig) {
        self.solver = LayoutSolver::new(config.layout.clone());
        self.driver = AnimationDriver::new(config.animation.clone());
        self.config = config;
        self.refresh();
    }

    /// The area the root is laid out into.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Change the available area; targets are recomputed.
    pub fn set_area(&mut self, area: Rect) {
        if area == self.area {
            return;
        }
        self.area = area;
        self.refresh();
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Replace the hierarchy and show it immediately, without animation.
    pub fn set_data(&mut self, tree: HierarchyNode) {
        self.source = Some(tree);
        self.rebuild(false);
    }

    /// Replace the hierarchy and animate from what is currently on screen.
    ///
    /// Entries matching a previous entry (see
    /// [`MatchStrategy`](crate::animation::MatchStrategy)) continue from its
    /// current state; the rest fade in at their target.
    pub fn set_target_data(&mut self, tree: HierarchyNode) {
        self.source = Some(tree);
        self.rebuild(true);
    }

    /// Overwrite the value of the leaf reached by walking child labels along
    /// `path` (the first segment names a child of the root), then recompute
    /// targets.
    ///
    /// An unresolvable path, or one that ends at an internal node, changes
    /// nothing. Returns whether the value was applied.
    pub fn update_value<S: AsRef<str>>(&mut self, path: &[S], value: f64) -> bool {
        let Some(node) = self.source.as_mut().and_then(|tree| tree.find_mut(path)) else {
            tracing::debug!(depth = path.len(), "update_value: path not found");
            return false;
        };
        if !node.is_leaf() {
            tracing::debug!(label = %node.label, "update_value: path ends at an internal node");
            return false;
        }
        node.value = value;
        self.refresh();
        true
    }

    /// The current source tree.
    pub fn source(&self) -> Option<&HierarchyNode> {
        self.source.as_ref()
    }

    /// Drop all data and highlight state.
    pub fn clear(&mut self) {
        self.source = None;
        self.rects.clear();
        self.root = None;
        self.highlighted = None;
        self.spatial.clear();
        self.spatial_dirty = false;
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Advance the animation by `dt` seconds.
    ///
    /// Returns true while anything is still moving.
    pub fn update(&mut self, dt: f32) -> bool {
        if dt > 0.0 {
            self.spatial_dirty = true;
        }
        self.driver.tick(&mut self.rects, dt)
    }

    /// True if any entry has not reached its target.
    pub fn is_animating(&self) -> bool {
        self.rects.iter().any(|r| !driver::is_settled(r))
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// The flat list, read-only.
    pub fn computed_rects(&self) -> &[LayoutRect] {
        &self.rects
    }

    /// Entries a renderer should draw, with their indices.
    pub fn drawable_rects(&self) -> impl Iterator<Item = (usize, &LayoutRect)> {
        let min_size = self.config.min_draw_size;
        let alpha_epsilon = self.config.alpha_epsilon;
        self.rects
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.is_drawable(min_size, alpha_epsilon))
    }

    /// Current state packed as [`RECT_STRIDE`] floats per entry, in list
    /// order. `alpha` is the entry's opacity times its color's alpha.
    pub fn rect_buffer(&self) -> Vec<f32> {
        let mut buffer = Vec::with_capacity(self.rects.len() * RECT_STRIDE);
        for r in &self.rects {
            let c = r.current_color;
            buffer.extend_from_slice(&[
                r.current.x,
                r.current.y,
                r.current.width,
                r.current.height,
                c.r,
                c.g,
                c.b,
                r.current_alpha * c.a,
                r.depth as f32,
            ]);
        }
        buffer
    }

    /// Index of the root entry, None when empty.
    pub fn root_index(&self) -> Option<usize> {
        self.root
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Check if the engine holds no entries.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Labels from the root's child down to `index`, suitable for
    /// [`update_value`](Self::update_value). Empty for the root, None for an
    /// out-of-range index.
    ///
    /// With duplicate sibling labels the path resolves to the first sibling.
    pub fn node_path(&self, index: usize) -> Option<Vec<String>> {
        let mut path = Vec::new();
        let mut current = self.rects.get(index)?;
        while let Some(parent) = current.parent {
            path.push(current.label.clone());
            current = self.rects.get(parent)?;
        }
        path.reverse();
        Some(path)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Deepest entry whose current rectangle contains `point`.
    pub fn node_at_point(&mut self, point: Point) -> Option<usize> {
        self.ensure_spatial_index_up_to_date();
        self.spatial.hit(point)
    }

    /// Every entry whose current rectangle contains `point`, root first.
    ///
    /// The last index is the [`node_at_point`](Self::node_at_point) answer;
    /// the rest are its visible ancestors, for breadcrumbs.
    pub fn nodes_at_point(&mut self, point: Point) -> Vec<usize> {
        self.ensure_spatial_index_up_to_date();
        self.spatial.all_at(point)
    }

    /// Store the highlighted entry. The index is not validated.
    pub fn set_highlighted_node(&mut self, index: Option<usize>) {
        self.highlighted = index;
    }

    /// The stored highlight index, as given.
    pub fn highlighted_node(&self) -> Option<usize> {
        self.highlighted
    }

    /// The highlighted entry; a stale or out-of-range index yields None.
    pub fn highlighted_rect(&self) -> Option<&LayoutRect> {
        self.highlighted.and_then(|i| self.rects.get(i))
    }

    fn ensure_spatial_index_up_to_date(&mut self) {
        if self.spatial_dirty {
            self.spatial.rebuild(&self.rects);
            self.spatial_dirty = false;
        }
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    /// Flatten and lay out the source tree.
    fn compute(&self) -> Flattened {
        let Some(tree) = self.source.as_ref() else {
            return Flattened::default();
        };
        let mut flat = flatten(tree, &self.config.palette);
        if let Some(root) = flat.root {
            self.solver.layout(&mut flat.rects, root, self.area);
        }
        flat
    }

    /// Structural replacement: new identities, matched against the old list.
    fn rebuild(&mut self, animate: bool) {
        let Flattened { mut rects, root } = self.compute();

        if animate {
            prepare_fade_in(&mut rects);
            seed_from_previous(&mut rects, &self.rects, self.config.match_strategy);
        } else {
            driver::snap_all(&mut rects);
        }

        tracing::debug!(nodes = rects.len(), animate, "replaced hierarchy");
        self.install(rects, root);
    }

    /// Same structure, new targets: current state carries over by index.
    fn refresh(&mut self) {
        let Flattened { mut rects, root } = self.compute();

        if rects.len() == self.rects.len() {
            for (rect, prev) in rects.iter_mut().zip(&self.rects) {
                rect.current = prev.current;
                rect.current_color = prev.current_color;
                rect.current_alpha = prev.current_alpha;
            }
        } else {
            prepare_fade_in(&mut rects);
            seed_from_previous(&mut rects, &self.rects, self.config.match_strategy);
        }

        tracing::trace!(nodes = rects.len(), "recomputed targets");
        self.install(rects, root);
    }

    fn install(&mut self, rects: Vec<LayoutRect>, root: Option<usize>) {
        self.rects = rects;
        self.root = root;
        self.spatial_dirty = true;
    }
}

impl Default for TreemapEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
