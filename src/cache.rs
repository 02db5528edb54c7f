//! Measurement memoization and the whole-subtree layout fingerprint (C4).
//!
//! Slots are stored inline in small fixed-size arrays per spec.md §9
//! ("Implementations should store these inline, not via dynamic
//! allocation"). An empty slot is marked with `avail_width == SENTINEL`
//! (`-1.0`) rather than `NaN`, because `NaN` is itself a legitimate
//! "unconstrained" available-space value and using it as the empty marker
//! would produce false cache hits against genuine unconstrained queries.

use crate::value::nan_safe_eq;

/// How a consumer will use the size a measurement/layout call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum MeasureMode {
    /// The available dimension is not a constraint.
    Undefined = 0,
    /// The consumer will force exactly this size.
    Exactly = 1,
    /// The returned size must be <= the available space.
    AtMost = 2,
}

/// Sentinel marking an empty cache slot. Never a legitimate available space.
pub const SENTINEL: f32 = -1.0;

const MEASURE_SLOTS: usize = 4;
const LAYOUT_SLOTS: usize = 2;

#[derive(Debug, Clone, Copy)]
struct MeasureEntry {
    avail_width: f32,
    avail_height: f32,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
    measured_width: f32,
    measured_height: f32,
}

impl MeasureEntry {
    const EMPTY: Self = Self {
        avail_width: SENTINEL,
        avail_height: SENTINEL,
        width_mode: MeasureMode::Undefined,
        height_mode: MeasureMode::Undefined,
        measured_width: 0.0,
        measured_height: 0.0,
    };

    fn is_empty(&self) -> bool {
        self.avail_width == SENTINEL
    }
}

#[derive(Debug, Clone, Copy)]
struct LayoutEntry {
    avail_width: f32,
    avail_height: f32,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
    width: f32,
    height: f32,
}

impl LayoutEntry {
    const EMPTY: Self = Self {
        avail_width: SENTINEL,
        avail_height: SENTINEL,
        width_mode: MeasureMode::Undefined,
        height_mode: MeasureMode::Undefined,
        width: 0.0,
        height: 0.0,
    };

    fn is_empty(&self) -> bool {
        self.avail_width == SENTINEL
    }
}

/// One axis's half of a hit test: does `mode`/`avail` match what's cached?
fn axis_hits(
    req_mode: MeasureMode,
    req_avail: f32,
    cached_mode: MeasureMode,
    cached_avail: f32,
    cached_measured: f32,
) -> bool {
    if cached_mode != req_mode {
        return false;
    }
    match req_mode {
        MeasureMode::Exactly => nan_safe_eq(cached_avail, req_avail),
        MeasureMode::AtMost => {
            // cached available space was >= request, and the clamp at that
            // wider space wouldn't have changed given the narrower one.
            (cached_avail.is_nan() || cached_avail >= req_avail) && cached_measured <= req_avail
        }
        MeasureMode::Undefined => true,
    }
}

/// The fingerprint a whole-subtree `calculateLayout` call checks to decide
/// whether it can skip recomputation entirely (C9).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fingerprint {
    pub last_avail_width: f32,
    pub last_avail_height: f32,
    pub last_offset_x: f32,
    pub last_offset_y: f32,
    pub last_direction: crate::edge::Direction,
    pub main_size: f32,
    pub cross_size: f32,
    pub base_size: f32,
    pub layout_valid: bool,
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self {
            last_avail_width: f32::NAN,
            last_avail_height: f32::NAN,
            last_offset_x: 0.0,
            last_offset_y: 0.0,
            last_direction: crate::edge::Direction::Ltr,
            main_size: f32::NAN,
            cross_size: f32::NAN,
            base_size: f32::NAN,
            layout_valid: false,
        }
    }
}

/// All per-node cache state: measurement slots, layout slots, fingerprint.
#[derive(Debug, Clone)]
pub struct NodeCache {
    measure: [MeasureEntry; MEASURE_SLOTS],
    measure_lru: [usize; MEASURE_SLOTS],
    layout: [LayoutEntry; LAYOUT_SLOTS],
    layout_lru: [usize; LAYOUT_SLOTS],
    pub fingerprint: Fingerprint,
}

impl Default for NodeCache {
    fn default() -> Self {
        Self {
            measure: [MeasureEntry::EMPTY; MEASURE_SLOTS],
            measure_lru: [0, 1, 2, 3],
            layout: [LayoutEntry::EMPTY; LAYOUT_SLOTS],
            layout_lru: [0, 1],
            fingerprint: Fingerprint::default(),
        }
    }
}

fn touch<const N: usize>(lru: &mut [usize; N], slot: usize) {
    if let Some(pos) = lru.iter().position(|&s| s == slot) {
        lru[..=pos].rotate_right(1);
    }
}

impl NodeCache {
    /// Clear everything: used when a node is marked dirty, or when a
    /// fingerprint-skip entry walk clears the layout cache along the path.
    pub fn clear_all(&mut self) {
        self.measure = [MeasureEntry::EMPTY; MEASURE_SLOTS];
        self.measure_lru = [0, 1, 2, 3];
        self.layout = [LayoutEntry::EMPTY; LAYOUT_SLOTS];
        self.layout_lru = [0, 1];
        self.fingerprint.layout_valid = false;
    }

    /// Clear only the layout cache (fingerprint-skip miss path: intrinsic
    /// measurement caches of clean subtrees remain valid).
    pub fn clear_layout_cache(&mut self) {
        self.layout = [LayoutEntry::EMPTY; LAYOUT_SLOTS];
        self.layout_lru = [0, 1];
        self.fingerprint.layout_valid = false;
    }

    pub fn find_measurement(
        &mut self,
        avail_width: f32,
        avail_height: f32,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
    ) -> Option<(f32, f32)> {
        for slot in 0..MEASURE_SLOTS {
            let e = self.measure[slot];
            if e.is_empty() {
                continue;
            }
            if axis_hits(width_mode, avail_width, e.width_mode, e.avail_width, e.measured_width)
                && axis_hits(height_mode, avail_height, e.height_mode, e.avail_height, e.measured_height)
            {
                touch(&mut self.measure_lru, slot);
                return Some((e.measured_width, e.measured_height));
            }
        }
        None
    }

    pub fn insert_measurement(
        &mut self,
        avail_width: f32,
        avail_height: f32,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
        measured_width: f32,
        measured_height: f32,
    ) {
        let victim = *self.measure_lru.last().unwrap();
        self.measure[victim] = MeasureEntry {
            avail_width,
            avail_height,
            width_mode,
            height_mode,
            measured_width,
            measured_height,
        };
        touch(&mut self.measure_lru, victim);
    }

    pub fn find_layout(
        &mut self,
        avail_width: f32,
        avail_height: f32,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
    ) -> Option<(f32, f32)> {
        for slot in 0..LAYOUT_SLOTS {
            let e = self.layout[slot];
            if e.is_empty() {
                continue;
            }
            if axis_hits(width_mode, avail_width, e.width_mode, e.avail_width, e.width)
                && axis_hits(height_mode, avail_height, e.height_mode, e.avail_height, e.height)
            {
                touch(&mut self.layout_lru, slot);
                return Some((e.width, e.height));
            }
        }
        None
    }

    pub fn insert_layout(
        &mut self,
        avail_width: f32,
        avail_height: f32,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
        width: f32,
        height: f32,
    ) {
        let victim = *self.layout_lru.last().unwrap();
        self.layout[victim] = LayoutEntry {
            avail_width,
            avail_height,
            width_mode,
            height_mode,
            width,
            height,
        };
        touch(&mut self.layout_lru, victim);
    }
}
