use std::io::Write as _;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::{debug, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Fullscreen, Window, WindowId};

use crate::config::Config;
use crate::controls::{
    command_for_key, held_key_for, read_load_request, Controls, LoadRequest, PendingAction,
};
use crate::equation::EquationParams;
use crate::equation_log::EquationLog;
use crate::hud::{self, TitleState};
use crate::render::FrameRenderer;
use crate::simulation::{FrameOutcome, Simulation};
use crate::stepper::FrameInput;
use crate::view::PlotView;

const TITLE_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(cfg: Config) -> anyhow::Result<()> {
    cfg.validate()?;
    println!("{}", hud::banner_text());

    let event_loop = EventLoop::new().context("create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(cfg);
    event_loop.run_app(&mut app).context("run event loop")?;
    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    cfg: Config,
    window: Option<Arc<Window>>,
    renderer: Option<FrameRenderer>,
    sim: Simulation,
    view: PlotView,
    controls: Controls,
    log: EquationLog,
    last_title: Instant,
    title_frames: u32,
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(cfg: Config) -> Self {
        let rng = cfg
            .seed
            .map(fastrand::Rng::with_seed)
            .unwrap_or_else(fastrand::Rng::new);
        let initial = cfg.code.as_deref().map(EquationParams::from_code);
        let repeat = cfg.repeat || initial.is_some();
        let sim = Simulation::new(cfg.stepper_settings(), rng, initial, repeat);
        announce(sim.params());

        Self {
            view: PlotView::new(cfg.width, cfg.height),
            controls: Controls::new(cfg.trail, cfg.dot, repeat),
            log: EquationLog::new(cfg.save_file.clone()),
            sim,
            window: None,
            renderer: None,
            last_title: Instant::now(),
            title_frames: 0,
            fatal: None,
            cfg,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let mut attrs = Window::default_attributes()
            .with_title("Chaos Equations")
            .with_inner_size(PhysicalSize::new(self.cfg.width, self.cfg.height));
        if self.cfg.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);
        let renderer = FrameRenderer::new(window.clone(), &self.cfg)?;
        let (w, h) = renderer.size();
        self.view.resize(w, h);
        info!("window ready: {w}x{h}, {} samples per frame", self.cfg.sample_count());
        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn frame(&mut self) -> anyhow::Result<()> {
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };
        if !self.view.is_drawable() {
            return Ok(());
        }

        let mut load_after_present = false;
        loop {
            match self.controls.take_pending() {
                PendingAction::None => break,
                PendingAction::RegenerateEquation => {
                    self.sim.regenerate(&mut self.view);
                    announce(self.sim.params());
                }
                PendingAction::SaveRequested => match self.log.append(self.sim.params()) {
                    Ok(code) => {
                        println!("Saved: {code}");
                        info!("saved {code} to {}", self.log.path().display());
                    }
                    Err(err) => warn!("could not save to {}: {err}", self.log.path().display()),
                },
                PendingAction::CenterPlot => self.view.center_on(self.sim.stepper().history()),
                PendingAction::LoadRequested => load_after_present = true,
            }
        }

        self.sim.set_repeat(self.controls.repeat());
        self.sim.set_mode(self.controls.run_mode());
        let input = FrameInput {
            speed: self.controls.speed_multiplier(),
            hide_early_iterations: self.controls.iteration_limit,
        };
        match self.sim.frame(&mut self.view, input, renderer.positions_mut()) {
            FrameOutcome::Paused => renderer.present_only()?,
            FrameOutcome::Stepped(report) => {
                if report.new_equation {
                    announce(self.sim.params());
                } else if report.restarted {
                    debug!("t wrapped; repeating {}", self.sim.params());
                }
                renderer.render(self.controls.trail, self.controls.dot)?;
            }
        }

        self.update_title();
        if load_after_present {
            self.load_equation();
        }
        Ok(())
    }

    fn update_title(&mut self) {
        self.title_frames += 1;
        let elapsed = self.last_title.elapsed();
        if elapsed < TITLE_INTERVAL {
            return;
        }
        let fps = hud::frames_per_second(self.title_frames, elapsed);
        self.title_frames = 0;
        self.last_title = Instant::now();
        if let Some(window) = &self.window {
            window.set_title(&hud::window_title(&TitleState {
                params: self.sim.params(),
                t: self.sim.t(),
                paused: self.controls.paused(),
                repeat: self.controls.repeat(),
                trail: self.controls.trail,
                fps,
            }));
        }
    }

    fn load_equation(&mut self) {
        print!("Enter 6 letter code: ");
        let _ = std::io::stdout().flush();
        let request = match read_load_request(&mut std::io::stdin().lock()) {
            Ok(request) => request,
            Err(err) => {
                warn!("could not read equation code: {err}");
                return;
            }
        };
        let params = match request {
            LoadRequest::NoInput => {
                info!("stdin closed; keeping {}", self.sim.params());
                return;
            }
            LoadRequest::Code(params) => params,
            LoadRequest::LastSaved => match self.log.last() {
                Ok(Some(saved)) => EquationParams::from_code(&saved),
                Ok(None) => {
                    warn!("no saved equations in {}", self.log.path().display());
                    return;
                }
                Err(err) => {
                    warn!("could not read {}: {err}", self.log.path().display());
                    return;
                }
            },
        };
        self.sim.load(params, &mut self.view);
        announce(self.sim.params());
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.fatal = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    debug!("window minimized; pausing frames");
                    self.view.resize(0, 0);
                    return;
                }
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                    let (w, h) = renderer.size();
                    self.view.resize(w, h);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let pressed = event.state == ElementState::Pressed;
                if let Some(held) = held_key_for(code) {
                    self.controls.set_held(held, pressed);
                }
                if pressed && !event.repeat {
                    if let Some(cmd) = command_for_key(code) {
                        self.controls.handle(cmd);
                    }
                }
                if self.controls.quit_requested() {
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.frame() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn announce(params: &EquationParams) {
    info!("equation {params}");
    println!("{}", hud::equation_text(params));
}
