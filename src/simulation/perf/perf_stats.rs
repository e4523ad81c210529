use wasm_bindgen::prelude::*;

/// Timings and counters of the last step
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) collide_ms: f64,
    pub(super) bodies: u32,
    pub(super) pairs_tested: u32,
    pub(super) contacts: u32,
    pub(super) resolved: u32,
    pub(super) faults: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn collide_ms(&self) -> f64 { self.collide_ms }
    #[wasm_bindgen(getter)]
    pub fn bodies(&self) -> u32 { self.bodies }
    #[wasm_bindgen(getter)]
    pub fn pairs_tested(&self) -> u32 { self.pairs_tested }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn resolved(&self) -> u32 { self.resolved }
    #[wasm_bindgen(getter)]
    pub fn faults(&self) -> u32 { self.faults }
}
