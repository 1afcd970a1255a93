use std::{fs, thread};

mod console;
mod options;
mod stats;

use lifeduel::{
    Game, Leaderboard, PositionEncoder, RunLengthEncoded, Status, error::Result,
};
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use stats::Recorder;

fn main() -> Result<()> {
    env_logger::init();

    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };

    // fail fast on anything malformed before touching the terminal
    let config = args.game_config()?;
    args.policies(config.players)?;
    let generations = args.generations()?;
    let games = args.games()?;
    let sleep = args.sleep()?;
    let winners_file = args.winners_file();
    let mut leaderboard = Leaderboard::load(&winners_file)?;

    let pattern = match args.input_file() {
        Some(file_name) => {
            let encoded = fs::read_to_string(file_name)?;
            Some(RunLengthEncoded::default().decode(&encoded)?)
        }
        None => None,
    };
    let mut seeder = match args.seed()? {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut console = if args.console() {
        Some(console::ConsoleRender::new(args.verbose())?)
    } else {
        None
    };
    let mut stats = stats::SwitchRecorder::new(args.stats_file().is_some());

    let mut last_field = None;
    'games: for round in 1.. {
        if games.is_some_and(|games| round > games) {
            break;
        }

        let policies = args.policies(config.players)?;
        let mut game = Game::new(config.clone(), policies, StdRng::from_rng(&mut seeder))?
            .with_parallel(args.multithreading());
        if let Some(pattern) = &pattern {
            let stamped = game.stamp_pattern(pattern);
            info!("stamped {stamped} of {} pattern cells", pattern.len());
        }
        info!("game {round} started");

        let mut outcome = None;
        for _ in 0..generations {
            // feed keyboard moves in between ticks
            if let Some(ref mut console) = console {
                while let Some(cmd) = console.poll_events()? {
                    match cmd {
                        console::ConsoleCommand::Exit => {
                            last_field = Some(game.cells().clone());
                            break 'games;
                        }
                        console::ConsoleCommand::Move(id, decision) => {
                            game.move_player(id, decision)
                        }
                        console::ConsoleCommand::Handled => {}
                    }
                }
            }

            let report = game.tick();
            stats.record(&report, game.players());

            // report metrics every 500ms, on the console footer if there is one
            if stats.has_report() {
                let text = stats.report();
                match console {
                    Some(ref mut console) => console.set_report(text),
                    None => println!("{text}"),
                }
            }
            if let Some(ref console) = console {
                console.signal(report.signals)?;
                console.render(&game, &leaderboard)?;
            }

            if let Status::Over(result) = report.status {
                outcome = Some(result);
                break;
            }
            if let Some(time) = sleep {
                thread::sleep(time);
            }
        }
        last_field = Some(game.cells().clone());

        // out of ticks without a result
        let Some(outcome) = outcome else {
            break;
        };
        leaderboard.record(&game);
        leaderboard.save(&winners_file)?;

        let message = game.announcement(outcome);
        info!("game {round} over: {}", message.replace('\n', ", "));
        match console {
            Some(ref mut console) => {
                if let console::ConsoleCommand::Exit = console.announce(&game, &message)? {
                    break;
                }
            }
            None => println!("{message}"),
        }
    }
    std::mem::drop(console);

    if let (Some(file_name), Some(field)) = (args.output_file(), last_field) {
        let encoder = RunLengthEncoded::default().set_name("lifeduel final field");
        fs::write(file_name, encoder.encode_grid(&field))?;
    }
    if let Some(file_name) = args.stats_file() {
        stats.save(file_name)?;
    }

    Ok(())
}
