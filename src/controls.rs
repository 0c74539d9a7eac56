use std::collections::VecDeque;
use std::io::BufRead;

use crate::config::{DotSize, TrailPreset};
use crate::equation::EquationParams;
use crate::stepper::RunMode;
use winit::keyboard::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    AutoMode,
    RepeatMode,
    CenterPlot,
    CycleDotSize,
    ToggleIterationLimit,
    LoadEquation,
    NewEquation,
    TogglePause,
    SaveEquation,
    CycleTrail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeldKey {
    SlowDown,
    SpeedUp,
    Reverse,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PendingAction {
    #[default]
    None,
    RegenerateEquation,
    LoadRequested,
    SaveRequested,
    CenterPlot,
}

pub fn command_for_key(code: KeyCode) -> Option<Command> {
    let cmd = match code {
        KeyCode::Escape => Command::Quit,
        KeyCode::KeyA => Command::AutoMode,
        KeyCode::KeyR => Command::RepeatMode,
        KeyCode::KeyC => Command::CenterPlot,
        KeyCode::KeyD => Command::CycleDotSize,
        KeyCode::KeyI => Command::ToggleIterationLimit,
        KeyCode::KeyL => Command::LoadEquation,
        KeyCode::KeyN => Command::NewEquation,
        KeyCode::KeyP => Command::TogglePause,
        KeyCode::KeyS => Command::SaveEquation,
        KeyCode::KeyT => Command::CycleTrail,
        _ => return None,
    };
    Some(cmd)
}

pub fn held_key_for(code: KeyCode) -> Option<HeldKey> {
    match code {
        KeyCode::ShiftLeft => Some(HeldKey::SlowDown),
        KeyCode::ShiftRight => Some(HeldKey::SpeedUp),
        KeyCode::Space => Some(HeldKey::Reverse),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct Controls {
    pub trail: TrailPreset,
    pub dot: DotSize,
    pub iteration_limit: bool,
    paused: bool,
    repeat: bool,
    quit: bool,
    slow_down: bool,
    speed_up: bool,
    reverse: bool,
    pending: VecDeque<PendingAction>,
}

impl Controls {
    pub fn new(trail: TrailPreset, dot: DotSize, repeat: bool) -> Self {
        Self {
            trail,
            dot,
            iteration_limit: false,
            paused: false,
            repeat,
            quit: false,
            slow_down: false,
            speed_up: false,
            reverse: false,
            pending: VecDeque::new(),
        }
    }

    pub fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => self.quit = true,
            Command::AutoMode => self.repeat = false,
            Command::RepeatMode => self.repeat = true,
            Command::CenterPlot => self.pending.push_back(PendingAction::CenterPlot),
            Command::CycleDotSize => self.dot = self.dot.next(),
            Command::ToggleIterationLimit => self.iteration_limit = !self.iteration_limit,
            Command::LoadEquation => {
                self.repeat = true;
                self.paused = false;
                self.pending.push_back(PendingAction::LoadRequested);
            }
            Command::NewEquation => self.pending.push_back(PendingAction::RegenerateEquation),
            Command::TogglePause => self.paused = !self.paused,
            Command::SaveEquation => self.pending.push_back(PendingAction::SaveRequested),
            Command::CycleTrail => self.trail = self.trail.next(),
        }
    }

    pub fn set_held(&mut self, key: HeldKey, down: bool) {
        match key {
            HeldKey::SlowDown => self.slow_down = down,
            HeldKey::SpeedUp => self.speed_up = down,
            HeldKey::Reverse => self.reverse = down,
        }
    }

    // Slow-down wins over speed-up.
    pub fn speed_multiplier(&self) -> f64 {
        let magnitude = if self.slow_down {
            0.1
        } else if self.speed_up {
            10.0
        } else {
            1.0
        };
        if self.reverse { -magnitude } else { magnitude }
    }

    pub fn take_pending(&mut self) -> PendingAction {
        self.pending.pop_front().unwrap_or_default()
    }

    pub fn run_mode(&self) -> RunMode {
        if self.paused { RunMode::Paused } else { RunMode::Running }
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoadRequest {
    /// Input closed before a line arrived.
    NoInput,
    LastSaved,
    Code(EquationParams),
}

/// Reads one line of the load prompt. A blank line asks for the last saved code.
pub fn read_load_request(input: &mut impl BufRead) -> std::io::Result<LoadRequest> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(LoadRequest::NoInput);
    }
    let code = line.trim();
    if code.is_empty() {
        Ok(LoadRequest::LastSaved)
    } else {
        Ok(LoadRequest::Code(EquationParams::from_code(code)))
    }
}
