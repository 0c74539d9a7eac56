use crate::equation::EquationParams;
use crate::stepper::{AdaptiveStepper, FrameInput, RunMode, StepReport, StepperSettings};
use crate::view::PlotView;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// `t` wrapped past the end bound at the start of this frame.
    pub restarted: bool,
    /// The restart drew a fresh random equation.
    pub new_equation: bool,
    pub steps: StepReport,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    Paused,
    Stepped(FrameReport),
}

pub struct Simulation {
    params: EquationParams,
    stepper: AdaptiveStepper,
    rng: fastrand::Rng,
    repeat: bool,
}

impl Simulation {
    pub fn new(
        settings: StepperSettings,
        mut rng: fastrand::Rng,
        initial: Option<EquationParams>,
        repeat: bool,
    ) -> Self {
        let params = initial.unwrap_or_else(|| EquationParams::random(&mut rng));
        Self {
            params,
            stepper: AdaptiveStepper::new(settings),
            rng,
            repeat,
        }
    }

    pub fn params(&self) -> &EquationParams {
        &self.params
    }

    pub fn stepper(&self) -> &AdaptiveStepper {
        &self.stepper
    }

    pub fn t(&self) -> f64 {
        self.stepper.t()
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    pub fn set_mode(&mut self, mode: RunMode) {
        self.stepper.set_mode(mode);
    }

    pub fn regenerate(&mut self, view: &mut PlotView) {
        self.params = EquationParams::random(&mut self.rng);
        view.reset();
        self.stepper.restart();
    }

    pub fn load(&mut self, params: EquationParams, view: &mut PlotView) {
        self.params = params;
        view.reset();
        self.stepper.restart();
    }

    pub fn frame(
        &mut self,
        view: &mut PlotView,
        input: FrameInput,
        out: &mut [[f32; 2]],
    ) -> FrameOutcome {
        if self.stepper.mode() == RunMode::Paused {
            return FrameOutcome::Paused;
        }

        let restarted = self.stepper.past_end();
        let new_equation = restarted && !self.repeat;
        if restarted {
            if new_equation {
                self.params = EquationParams::random(&mut self.rng);
                view.reset();
            }
            self.stepper.restart();
        }

        match self.stepper.advance_frame(&self.params, view, input, out) {
            Some(steps) => FrameOutcome::Stepped(FrameReport {
                restarted,
                new_equation,
                steps,
            }),
            None => FrameOutcome::Paused,
        }
    }
}
