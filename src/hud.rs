use crate::config::TrailPreset;
use crate::equation::EquationParams;
use std::time::Duration;

pub fn equation_text(params: &EquationParams) -> String {
    format!(
        "x' = {}\ny' = {}\nCode: {}",
        params.x_formula(),
        params.y_formula(),
        params.to_code()
    )
}

pub fn time_text(t: f64) -> String {
    format!("t = {t:.6}")
}

pub struct TitleState<'a> {
    pub params: &'a EquationParams,
    pub t: f64,
    pub paused: bool,
    pub repeat: bool,
    pub trail: TrailPreset,
    pub fps: f32,
}

pub fn frames_per_second(frames: u32, elapsed: Duration) -> f32 {
    let secs = elapsed.as_secs_f32();
    if secs > 0.0 { frames as f32 / secs } else { 0.0 }
}

pub fn window_title(s: &TitleState<'_>) -> String {
    let mut title = format!(
        "Chaos Equations | x' = {} | y' = {} | Code: {} | {}",
        s.params.x_formula(),
        s.params.y_formula(),
        s.params.to_code(),
        time_text(s.t),
    );
    title.push_str(if s.repeat { " | repeat" } else { " | auto" });
    title.push_str(" | trail: ");
    title.push_str(s.trail.label());
    if s.paused {
        title.push_str(" | PAUSED");
    }
    title.push_str(&format!(" | {:.0} fps", s.fps));
    title
}

const BANNER: &[&str] = &[
    "=========================================================",
    "",
    "                      Chaos Equations",
    "",
    "    These are plots of random recursive equations, which",
    "often produce chaos, and results in beautiful patterns.",
    "For every time t, a point (x,y) is initialized to (t,t).",
    "The equation is applied to the point many times, and each",
    "iteration is drawn in a unique color.",
    "",
    "=========================================================",
    "",
    "Controls:",
    "      'A' - Automatic Mode (randomize equations)",
    "      'R' - Repeat Mode (keep same equation)",
    "",
    "      'C' - Center points",
    "      'D' - Dot size Toggle",
    "      'I' - Iteration Limit Toggle",
    "      'T' - Trail Toggle",
    "",
    "      'P' - Pause",
    " 'LShift' - Slow Down",
    " 'RShift' - Speed Up",
    "  'Space' - Reverse",
    "",
    "      'N' - New Equation (random)",
    "      'L' - Load Equation",
    "      'S' - Save Equation",
    "    'Esc' - Quit",
];

pub fn banner_text() -> String {
    BANNER.join("\n")
}
