use std::time::{Duration, Instant};

use anyhow::Result;
use chaos_equations::equation::EquationParams;
use chaos_equations::simulation::{FrameOutcome, Simulation};
use chaos_equations::stepper::{FrameInput, StepperSettings};
use chaos_equations::view::PlotView;

struct Args {
    frames: usize,
    iterations: usize,
    steps: usize,
    w: u32,
    h: u32,
    seed: u64,
    code: Option<String>,
    ci_smoke: bool,
    max_ms: f64,
}

fn parse_args() -> Args {
    let mut args = Args {
        frames: 120,
        iterations: 800,
        steps: 500,
        w: 1600,
        h: 900,
        seed: 1,
        code: None,
        ci_smoke: false,
        max_ms: 50.0,
    };

    let argv = std::env::args().skip(1).collect::<Vec<_>>();
    let mut i = 0usize;
    while i < argv.len() {
        let k = argv[i].as_str();
        let v = argv.get(i + 1).map(|s| s.as_str());
        match (k, v) {
            ("--frames", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.frames = n.max(1);
                }
                i += 2;
            }
            ("--iterations", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.iterations = n.max(1);
                }
                i += 2;
            }
            ("--steps", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.steps = n.max(1);
                }
                i += 2;
            }
            ("--w", Some(x)) => {
                if let Ok(n) = x.parse::<u32>() {
                    args.w = n.max(1);
                }
                i += 2;
            }
            ("--h", Some(x)) => {
                if let Ok(n) = x.parse::<u32>() {
                    args.h = n.max(1);
                }
                i += 2;
            }
            ("--seed", Some(x)) => {
                if let Ok(n) = x.parse::<u64>() {
                    args.seed = n;
                }
                i += 2;
            }
            ("--code", Some(x)) => {
                args.code = Some(x.to_string());
                i += 2;
            }
            ("--ci-smoke", Some(x)) if !x.starts_with("--") => {
                args.ci_smoke = parse_bool(x).unwrap_or(true);
                i += 2;
            }
            ("--ci-smoke", _) => {
                args.ci_smoke = true;
                i += 1;
            }
            ("--max-ms", Some(x)) => {
                if let Ok(v) = x.parse::<f64>() {
                    args.max_ms = v.max(0.1);
                }
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    args
}

fn parse_bool(s: &str) -> Option<bool> {
    let v = s.trim().to_ascii_lowercase();
    match v.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn main() -> Result<()> {
    let args = parse_args();
    let settings = StepperSettings {
        iterations: args.iterations,
        steps_per_frame: args.steps,
        ..StepperSettings::default()
    };
    let initial = args.code.as_deref().map(EquationParams::from_code);
    let repeat = initial.is_some();
    let mut sim = Simulation::new(
        settings,
        fastrand::Rng::with_seed(args.seed),
        initial,
        repeat,
    );
    let mut view = PlotView::new(args.w, args.h);
    let mut out = vec![[0.0f32; 2]; settings.sample_count()];

    println!(
        "Stepper benchmark: frames={} iterations={} steps/frame={} size={}x{} equation={}",
        args.frames,
        args.iterations,
        args.steps,
        args.w,
        args.h,
        sim.params()
    );

    let mut total = Duration::ZERO;
    let mut worst_ms = 0.0f64;
    let mut lit = 0usize;
    let mut equations = 1usize;
    for _ in 0..args.frames {
        let start = Instant::now();
        let outcome = sim.frame(&mut view, FrameInput::default(), &mut out);
        let elapsed = start.elapsed();
        total += elapsed;
        worst_ms = worst_ms.max(elapsed.as_secs_f64() * 1000.0);

        if let FrameOutcome::Stepped(report) = outcome {
            if report.new_equation {
                equations += 1;
            }
            if report.steps.offscreen_steps < report.steps.steps {
                lit += 1;
            }
        }
    }

    let avg_ms = total.as_secs_f64() * 1000.0 / args.frames as f64;
    let fps = if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 };
    println!(
        "summary: {:>8.3} ms/frame avg  {:>8.3} worst  {:>7.2} FPS  lit={}/{}  equations={}  t={:.6}",
        avg_ms,
        worst_ms,
        fps,
        lit,
        args.frames,
        equations,
        sim.t()
    );

    if args.ci_smoke {
        if avg_ms > args.max_ms {
            eprintln!("CI smoke: FAIL ({:.3} ms/frame > {:.3})", avg_ms, args.max_ms);
            anyhow::bail!("ci smoke failed");
        }
        println!("CI smoke: PASS (max_ms={:.3})", args.max_ms);
    }

    Ok(())
}
