//! Minimal kiln session: seed the canonical world, run the background
//! server briefly, and print a temperature summary.
//!
//! Run with: `cargo run -p kiln-engine --example quickstart`

use std::thread;
use std::time::Duration;

use kiln_core::ChunkPos;
use kiln_engine::{seed_world, SimConfig, SimServer};
use kiln_world::summary::{chunk_avg, chunk_minmax};
use kiln_world::World;

fn main() {
    let mut world = World::new();
    seed_world(&mut world);

    let mut server = SimServer::new(world, SimConfig::default()).expect("default config is valid");
    server.start();
    thread::sleep(Duration::from_millis(200));
    server.set_paused(true);

    let handle = server.handle();
    {
        let world = handle.world().read().unwrap();
        let chunk = world.find(ChunkPos::ORIGIN).expect("seeded chunk");
        let (min, max) = chunk_minmax(chunk).expect("section is loaded");
        let avg = chunk_avg(chunk).expect("section is loaded");
        println!(
            "after {} frames: min {min:.1} K, max {max:.1} K, avg {avg:.1} K, {:.3} ms/frame",
            server.frames_simulated(),
            world.total_frame_ms(),
        );
    }

    server.stop();
    server.join();
}
