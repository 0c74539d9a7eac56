use crate::equation::EquationParams;
use crate::view::{PlotView, OFFSCREEN};

/// Advance of `t` for a step in which no iterate landed on screen.
pub const FALLBACK_ADVANCE: f64 = 0.01;
pub const DISTANCE_SCALE: f32 = 500.0;
pub const DISTANCE_EPSILON: f64 = 1e-5;
pub const SMOOTHING: f64 = 0.99;
/// Iterations hidden while the iteration limit is on.
pub const HIDDEN_ITERATIONS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepperSettings {
    pub iterations: usize,
    pub steps_per_frame: usize,
    pub delta_per_step: f64,
    pub delta_minimum: f64,
    pub t_start: f64,
    pub t_end: f64,
}

impl Default for StepperSettings {
    fn default() -> Self {
        Self {
            iterations: 800,
            steps_per_frame: 500,
            delta_per_step: 1e-5,
            delta_minimum: 1e-7,
            t_start: -3.0,
            t_end: 3.0,
        }
    }
}

impl StepperSettings {
    pub fn sample_count(&self) -> usize {
        self.iterations.saturating_mul(self.steps_per_frame)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    Running,
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub speed: f64,
    /// Park the first [`HIDDEN_ITERATIONS`] iterates off screen.
    pub hide_early_iterations: bool,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            speed: 1.0,
            hide_early_iterations: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    pub steps: usize,
    pub offscreen_steps: usize,
    pub t: f64,
}

pub struct AdaptiveStepper {
    settings: StepperSettings,
    mode: RunMode,
    t: f64,
    rolling_delta: f64,
    history: Vec<[f32; 2]>,
}

impl AdaptiveStepper {
    pub fn new(settings: StepperSettings) -> Self {
        Self {
            mode: RunMode::Running,
            t: settings.t_start,
            rolling_delta: settings.delta_per_step,
            history: vec![[0.0; 2]; settings.iterations],
            settings,
        }
    }

    pub fn settings(&self) -> &StepperSettings {
        &self.settings
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn rolling_delta(&self) -> f64 {
        self.rolling_delta
    }

    pub fn history(&self) -> &[[f32; 2]] {
        &self.history
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RunMode) {
        self.mode = mode;
    }

    pub fn past_end(&self) -> bool {
        self.t > self.settings.t_end
    }

    pub fn restart(&mut self) {
        self.t = self.settings.t_start;
    }

    /// Runs one frame's worth of steps, writing screen positions into `out`
    /// (`iterations` slots per step). Returns `None` while paused.
    pub fn advance_frame(
        &mut self,
        params: &EquationParams,
        view: &PlotView,
        input: FrameInput,
        out: &mut [[f32; 2]],
    ) -> Option<StepReport> {
        if self.mode == RunMode::Paused {
            return None;
        }

        let iterations = self.settings.iterations.max(1);
        let mut steps = 0usize;
        let mut offscreen_steps = 0usize;
        for chunk in out
            .chunks_exact_mut(iterations)
            .take(self.settings.steps_per_frame)
        {
            if !self.step(params, view, input, chunk) {
                offscreen_steps += 1;
            }
            steps += 1;
        }

        Some(StepReport {
            steps,
            offscreen_steps,
            t: self.t,
        })
    }

    pub fn step(
        &mut self,
        params: &EquationParams,
        view: &PlotView,
        input: FrameInput,
        out: &mut [[f32; 2]],
    ) -> bool {
        let nominal = self.settings.delta_per_step * input.speed;
        let floor = self.settings.delta_minimum * input.speed.abs();
        self.rolling_delta = self.rolling_delta * SMOOTHING + nominal * (1.0 - SMOOTHING);

        let t = self.t;
        let mut x = t;
        let mut y = t;
        let mut min_candidate = f64::INFINITY;
        let mut on_screen = false;

        for (iter, (slot, prev)) in out.iter_mut().zip(self.history.iter_mut()).enumerate() {
            (x, y) = params.next_point(x, y, t);

            let screen = if input.hide_early_iterations && iter < HIDDEN_ITERATIONS {
                OFFSCREEN
            } else {
                view.to_screen(x, y)
            };
            *slot = screen;

            if view.contains(screen) {
                let dx = prev[0] - x as f32;
                let dy = prev[1] - y as f32;
                let dist = f64::from(DISTANCE_SCALE * (dx * dx + dy * dy).sqrt());
                let candidate = (nominal.abs() / (dist + DISTANCE_EPSILON)).max(floor);
                min_candidate = min_candidate.min(candidate);
                on_screen = true;
            }
            *prev = [x as f32, y as f32];
        }

        if on_screen {
            if self.rolling_delta.abs() > min_candidate {
                self.rolling_delta = min_candidate.copysign(self.rolling_delta);
            }
            // While a reversal is still being smoothed through zero, hold t.
            if self.rolling_delta * nominal > 0.0 {
                self.t += self.rolling_delta;
            }
        } else {
            self.t += FALLBACK_ADVANCE.copysign(nominal);
        }
        on_screen
    }
}
