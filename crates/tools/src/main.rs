mod patrol;
mod scenario;

use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use prowl_core::{
    Agent, BehaviorVariant, MotionState, PlanSource, Pos, Target, TickOutcome, TileGrid,
    TrackedTarget,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use patrol::Patrol;
use scenario::{BUILTIN_SCENARIO, Scenario};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario TOML file. The built-in arena is used when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,
    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,
    /// Override the scenario tick count
    #[arg(short, long)]
    ticks: Option<u32>,
    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
enum RunEnd {
    TicksExhausted,
    GoalReached { tick: u32 },
    Caught { agent: usize, tick: u32 },
}

#[derive(Clone, Debug, Default, Serialize)]
struct AgentStats {
    wander_plans: u32,
    chase_plans: u32,
    remembered_plans: u32,
    pending_steps: u32,
    arrivals: u32,
    stalls: u32,
    suspended_ticks: u32,
}

impl AgentStats {
    fn record(&mut self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Planned { source, .. } => match source {
                PlanSource::Wander => self.wander_plans += 1,
                PlanSource::Chase { .. } => self.chase_plans += 1,
                PlanSource::Remembered { .. } => self.remembered_plans += 1,
                PlanSource::Pending => self.pending_steps += 1,
            },
            TickOutcome::Arrived { .. } => self.arrivals += 1,
            TickOutcome::Stalled => self.stalls += 1,
            TickOutcome::Suspended => self.suspended_ticks += 1,
            TickOutcome::Moved { .. } | TickOutcome::Inactive => {}
        }
    }
}

#[derive(Debug, Serialize)]
struct AgentSummary {
    behavior: BehaviorVariant,
    tile: Pos,
    moving: bool,
    snapshot_hash: u64,
    stats: AgentStats,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks_run: u32,
    end: RunEnd,
    target_tile: Pos,
    agents: Vec<AgentSummary>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(scenario: &Scenario, seed: u64, ticks: u32) -> Result<RunSummary> {
    let map = Rc::new(scenario.build_map()?);
    let mut patrol = Patrol::new(map.as_ref(), &scenario.target.route, scenario.target.speed);
    let target = Rc::new(TrackedTarget::new(patrol.tile(), patrol.position()));

    let mut agents: Vec<Agent<TileGrid>> = scenario
        .agents
        .iter()
        .enumerate()
        .map(|(index, config)| {
            Agent::spawn(map.clone(), Some(target.clone()), config.clone(), seed.wrapping_add(index as u64))
                .with_context(|| format!("Failed to spawn agent #{index}"))
        })
        .collect::<Result<_>>()?;
    for agent in &mut agents {
        agent.activate();
    }
    let mut stats = vec![AgentStats::default(); agents.len()];

    tracing::info!(seed, ticks, agents = agents.len(), "simulation started");
    let mut end = RunEnd::TicksExhausted;
    let mut ticks_run = 0;
    while ticks_run < ticks && !target.is_terminal_condition_met() {
        let tick = ticks_run;
        ticks_run += 1;

        let target_tile = patrol.step(map.as_ref(), scenario.dt);
        target.place(target_tile, patrol.position());
        if scenario.target.goal == Some(target_tile) {
            tracing::info!(tick, tile = ?target_tile, "target reached its goal");
            target.set_terminal(true);
            end = RunEnd::GoalReached { tick };
            continue;
        }

        for (index, (agent, stats)) in agents.iter_mut().zip(&mut stats).enumerate() {
            stats.record(agent.tick(scenario.dt));
            if scenario.target.catchable
                && !target.is_terminal_condition_met()
                && agent.current_tile() == target_tile
            {
                tracing::info!(tick, agent = index, tile = ?target_tile, "target caught");
                target.set_terminal(true);
                end = RunEnd::Caught { agent: index, tick };
            }
        }
    }
    tracing::info!(ticks_run, ?end, "simulation finished");

    let agents = agents
        .iter()
        .zip(stats)
        .map(|(agent, stats)| AgentSummary {
            behavior: agent.behavior(),
            tile: agent.current_tile(),
            moving: agent.motion_state() == MotionState::Moving,
            snapshot_hash: agent.snapshot_hash(),
            stats,
        })
        .collect();

    Ok(RunSummary { seed, ticks_run, end, target_tile: target.current_tile(), agents })
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::parse(BUILTIN_SCENARIO).context("Built-in scenario is invalid")?,
    };
    let seed = args.seed.unwrap_or(scenario.seed);
    let ticks = args.ticks.unwrap_or(scenario.ticks);

    let summary = run(&scenario, seed, ticks)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Simulation complete.");
    println!("Seed: {}", summary.seed);
    println!("Ticks: {}", summary.ticks_run);
    println!("End: {:?}", summary.end);
    println!("Target tile: ({}, {})", summary.target_tile.y, summary.target_tile.x);
    for (index, agent) in summary.agents.iter().enumerate() {
        println!(
            "Agent #{index} {:?}: tile ({}, {}), {} arrivals, {} wander / {} chase / {} remembered plans, hash {}",
            agent.behavior,
            agent.tile.y,
            agent.tile.x,
            agent.stats.arrivals,
            agent.stats.wander_plans,
            agent.stats.chase_plans,
            agent.stats.remembered_plans,
            agent.snapshot_hash,
        );
    }

    Ok(())
}
