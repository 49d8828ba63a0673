use std::path::PathBuf;

use clap::Parser;
use instant::Instant;

use crate::config::SimConfig;
use crate::ecs::components::{Animal, Diary, Direction, Health, Position};
use crate::ecs::systems::input::TickInput;
use crate::sim::Simulation;

/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;
/// How often to log tick timing (simulated seconds).
const STATS_LOG_INTERVAL: f64 = 5.0;
/// Autopilot picks a new heading this often (ticks).
const AUTOPILOT_PERIOD: u64 = 12;
/// Diary lines printed at shutdown.
const DIARY_TAIL: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "critterdeep")]
#[command(about = "Run the dungeon simulation headless with a wandering farmer")]
pub struct Args {
    /// TOML file overriding the default world setup
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of simulated host frames
    #[arg(long, default_value_t = 3600)]
    pub frames: u64,
}

// ---------------------------------------------------------------------------
// Tick timing
// ---------------------------------------------------------------------------

struct TickStats {
    tick_count: u64,
    sim_time_since_log: f64,
    tick_time_sum: f64,
    tick_time_min: f64,
    tick_time_max: f64,
    ticks_since_log: u32,
}

impl TickStats {
    fn new() -> Self {
        Self {
            tick_count: 0,
            sim_time_since_log: 0.0,
            tick_time_sum: 0.0,
            tick_time_min: f64::MAX,
            tick_time_max: 0.0,
            ticks_since_log: 0,
        }
    }

    fn record_tick(&mut self, cost: f64, dt: f64) {
        self.tick_count += 1;
        self.ticks_since_log += 1;
        self.tick_time_sum += cost;
        self.tick_time_min = self.tick_time_min.min(cost);
        self.tick_time_max = self.tick_time_max.max(cost);
        self.sim_time_since_log += dt;

        if self.sim_time_since_log >= STATS_LOG_INTERVAL {
            let avg_us = (self.tick_time_sum / self.ticks_since_log as f64) * 1_000_000.0;
            log::info!(
                "ticks: {} | avg: {:.1}us | min: {:.1}us | max: {:.1}us",
                self.tick_count,
                avg_us,
                self.tick_time_min * 1_000_000.0,
                self.tick_time_max * 1_000_000.0,
            );
            self.sim_time_since_log = 0.0;
            self.tick_time_sum = 0.0;
            self.tick_time_min = f64::MAX;
            self.tick_time_max = 0.0;
            self.ticks_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Headless host: plays the role of the render loop and the input devices.
struct App {
    sim: Simulation,
    tick_rate: f64,
    accumulator: f64,
    stats: TickStats,
    heading: Option<Direction>,
}

impl App {
    fn new(sim: Simulation, tick_rate: f64) -> Self {
        Self {
            sim,
            tick_rate,
            accumulator: 0.0,
            stats: TickStats::new(),
            heading: None,
        }
    }

    /// Run fixed-timestep simulation ticks for one host frame.
    fn run_fixed_update(&mut self, dt: f64) {
        self.accumulator += dt;

        if self.accumulator > MAX_ACCUMULATOR {
            self.accumulator = MAX_ACCUMULATOR;
        }

        while self.accumulator >= self.tick_rate {
            let input = self.autopilot();
            let start = Instant::now();
            let report = self.sim.tick(self.tick_rate as f32, &input);
            self.stats
                .record_tick(start.elapsed().as_secs_f64(), self.tick_rate);

            if let Some(seen) = report.inspection {
                log::info!("Inspected {} at {}", seen.name, seen.at);
            }

            self.accumulator -= self.tick_rate;
        }
    }

    /// Stand-in for the keyboard: walk in a random open direction, one step
    /// per period.
    fn autopilot(&mut self) -> TickInput {
        if !self.sim.has_player() || self.sim.tick_count() % AUTOPILOT_PERIOD != 0 {
            return TickInput::default();
        }
        let pos = match self.sim.world().get::<&Position>(self.sim.player()) {
            Ok(pos) => pos.0,
            Err(_) => return TickInput::default(),
        };

        let keep_going = self
            .heading
            .filter(|dir| self.sim.map().is_walkable_at(pos + dir.delta()));
        let heading = keep_going.or_else(|| {
            let open: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|dir| self.sim.map().is_walkable_at(pos + dir.delta()))
                .collect();
            if open.is_empty() {
                None
            } else {
                let pick = self.sim.rng().usize(0..open.len());
                Some(open[pick])
            }
        });
        self.heading = heading;
        heading.map(TickInput::moving).unwrap_or_default()
    }

    fn report(&self) {
        let world = self.sim.world();
        let animals = world.query::<&Animal>().iter().count();
        log::info!(
            "Finished after {} ticks, {} animals remain",
            self.sim.tick_count(),
            animals
        );

        let player = self.sim.player();
        if let Ok(health) = world.get::<&Health>(player) {
            log::info!(
                "Jack health: {}/{} ({:.0}%)",
                health.current,
                health.max,
                health.fraction() * 100.0
            );
        }
        if let Ok(diary) = world.get::<&Diary>(player) {
            for line in diary.recent(DIARY_TAIL) {
                log::info!("diary: {line}");
            }
        }
    }
}

/// Entry point - build the world and drive it for `args.frames` frames.
pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let rng = match config.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let sim = Simulation::new(&config, rng)?;
    log::info!(
        "Map {}x{} ready, tick rate {:.4}s",
        sim.map().width(),
        sim.map().height(),
        config.tick_rate
    );

    let mut app = App::new(sim, config.tick_rate);
    for _ in 0..args.frames {
        app.run_fixed_update(config.tick_rate);
    }
    app.report();
    Ok(())
}
