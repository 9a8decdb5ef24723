use std::rc::Rc;

use anyhow::{Result, bail};
use clap::Parser;
use prowl_core::{
    Agent, AgentConfig, BehaviorVariant, GridMap, MotionState, Pos, TileGrid, TileKind,
    TrackedTarget,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u32,
    /// Number of random maps to run
    #[arg(short, long, default_value_t = 20)]
    maps: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn scattered_map(rng: &mut ChaCha8Rng) -> TileGrid {
    let width = 6 + (rng.next_u64() % 40) as usize;
    let height = 6 + (rng.next_u64() % 40) as usize;
    let mut map = TileGrid::open(width, height);
    for tile in map.all_tiles() {
        if rng.next_u64() % 100 < 30 {
            map.set_tile(tile, TileKind::Wall);
        }
    }
    map
}

fn run_map(rng: &mut ChaCha8Rng, ticks: u32) -> Result<()> {
    let map = Rc::new(scattered_map(rng));
    let walkable: Vec<Pos> =
        map.all_tiles().into_iter().filter(|tile| map.is_walkable(*tile)).collect();
    if walkable.is_empty() {
        return Ok(());
    }

    let start = choose(rng, &walkable);
    let target = Rc::new(TrackedTarget::new(start, map.world_position(start)));
    let mut agents: Vec<Agent<TileGrid>> = Vec::new();
    for behavior in BehaviorVariant::ALL {
        let config = AgentConfig {
            speed: 0.5 + (rng.next_u64() % 30) as f32 / 10.0,
            vision_radius: (rng.next_u64() % 12) as f32,
            max_wander_steps: 1 + (rng.next_u64() % 30) as usize,
            lost_sight_grace: (rng.next_u64() % 4) as u32,
            ..AgentConfig::default()
        }
        .with_behavior(behavior);
        let mut agent = Agent::spawn(map.clone(), Some(target.clone()), config, rng.next_u64())?;
        agent.activate();
        agents.push(agent);
    }

    for tick in 0..ticks {
        if tick % 25 == 0 {
            let tile = choose(rng, &walkable);
            target.place(tile, map.world_position(tile));
        }
        if tick % 200 == 199 {
            let agent_index = (rng.next_u64() as usize) % agents.len();
            agents[agent_index].reset()?;
        }
        let elapsed = (1 + rng.next_u64() % 50) as f32 / 100.0;

        for agent in &mut agents {
            agent.tick(elapsed);

            if !map.is_walkable(agent.current_tile()) {
                bail!("Invariant failed: agent on wall at {:?}", agent.current_tile());
            }
            if agent.motion_state() == MotionState::Moving && agent.target_tile().is_none() {
                bail!("Invariant failed: moving without waypoint");
            }
            if agent.motion_state() == MotionState::Planning
                && agent.world_position() != map.world_position(agent.current_tile())
            {
                bail!("Invariant failed: planning away from current tile");
            }
            if !agent.world_position().is_finite() {
                bail!("Invariant failed: non-finite position");
            }
            if let Some(step) = agent.pending_path().iter().find(|step| !map.is_walkable(*step)) {
                bail!("Invariant failed: pending path through wall at {step:?}");
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        "Starting fuzz harness on seed {} for {} maps x {} ticks...",
        args.seed, args.maps, args.ticks
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for index in 0..args.maps {
        run_map(&mut rng, args.ticks)?;
        println!("Map {index}: invariants held");
    }

    println!("Fuzz complete.");
    Ok(())
}
