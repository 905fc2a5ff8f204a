//! Headless demo: run the classic table for a few simulated seconds
//! with scripted flips and log what happens.

use flipper_sim::{classic_table, ScoreSink, Table, TableConfig, TickInput};
use glam::Vec2;

struct Hud {
    points_seen: u64,
    balls_lost: u32,
}

impl ScoreSink for Hud {
    fn add_points(&mut self, points: u64) {
        self.points_seen += points;
        log::info!("+{points} points");
    }

    fn on_ball_lost(&mut self) {
        self.balls_lost += 1;
        log::info!("ball drained");
    }
}

fn main() {
    env_logger::init();

    let mut config = TableConfig::default();
    config.launch_pos = Vec2::new(300.0, 500.0);

    let objects = match classic_table(config.width, config.height) {
        Ok(objects) => objects,
        Err(err) => {
            log::error!("table construction failed: {err}");
            std::process::exit(1);
        }
    };

    let mut table = Table::new(config, objects, 0xF11BBE);
    let mut hud = Hud {
        points_seen: 0,
        balls_lost: 0,
    };

    // 20 simulated seconds at 200 Hz, flipping on a fixed cadence
    for tick_no in 0u32..4000 {
        let input = TickInput {
            flip_left: tick_no % 240 == 0,
            flip_right: tick_no % 360 == 0,
        };
        table.step(input, &mut hud);
    }

    log::info!(
        "done: score {}, {} points seen, {} balls lost",
        table.score(),
        hud.points_seen,
        hud.balls_lost
    );
    if let Some(snapshot) = table.ball_state() {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("snapshot serialization failed: {err}"),
        }
    }
}
