use std::env;
use std::fs::create_dir_all;
use std::path::Path;
use std::process::exit;
use std::thread::sleep;
use std::time::{Duration, Instant};

use failure::Fail;
use log::{debug, info};

use gif_player::{FrameStore, PlaybackEngine};

mod errors;

use crate::errors::{AppResult, AppError};



const TICK: Duration = Duration::from_millis(16);


#[derive(Clone, Debug, Eq, PartialEq)]
struct Setting {
    duration: u64,
    end: Option<isize>,
    filepath: Option<String>,
    output: Option<String>,
    reverse: bool,
    start: Option<isize>,
}


fn main() {
    env_logger::init();

    if let Err(err) = app() {
        let mut fail: &dyn Fail = &err;
        let mut message = err.to_string();
        while let Some(cause) = fail.cause() {
            message.push_str(&format!("\n\tcaused by: {}", cause));
            fail = cause;
        }
        eprintln!("{}\n", message);
        print_usage();
        exit(1);
    }
}

fn print_usage() {
    eprint!("{}", include_str!("usage.txt"));
}

fn app() -> AppResult<()> {
    let setting = parse_args()?;
    let filepath = setting.filepath.as_ref().ok_or(AppError::NotEnoughArgument)?;

    let mut engine = gif_player::open(filepath)?;
    info!("{}: {} frames, {}x{}", filepath, engine.len(), engine.width(), engine.height());

    if let Some(output) = setting.output.as_ref() {
        write_frames(engine.store(), output)?;
    }

    let (start, end) = engine.bounds();
    engine.set_bounds(
        setting.start.unwrap_or(start as isize),
        setting.end.unwrap_or(end as isize));
    if setting.reverse {
        engine.reverse();
        engine.fast_forward();
    }

    let shown = play(&mut engine, Duration::from_millis(setting.duration));
    println!("{}: {} frame changes in {}ms", filepath, shown, setting.duration);

    Ok(())
}


/// Drives the engine like a display loop would and counts how often the frame changed.
fn play(engine: &mut PlaybackEngine, duration: Duration) -> usize {
    let stop = Instant::now() + duration;
    let mut shown = 0;
    let mut last = None;

    loop {
        let now = Instant::now();
        if stop <= now {
            break;
        }
        engine.render(now);
        let position = engine.position();
        if last != Some(position) {
            debug!("frame {} ({}s)", position, engine.current().duration);
            shown += 1;
            last = Some(position);
        }
        sleep(TICK);
    }

    shown
}

fn write_frames(store: &FrameStore, output: &str) -> AppResult<()> {
    create_dir_all(output)?;
    for (index, frame) in store.frames().iter().enumerate() {
        let path = Path::new(output).join(format!("{:04}.png", index));
        let image = image::RgbaImage::from_raw(store.width(), store.height(), frame.bitmap.clone())
            .ok_or(AppError::BitmapSize(store.width(), store.height()))?;
        image.save(&path)?;
        debug!("wrote {:?}", path);
    }
    Ok(())
}


fn parse_args() -> AppResult<Setting> {
    let mut setting = Setting {
        duration: 1000,
        end: None,
        filepath: None,
        output: None,
        reverse: false,
        start: None,
    };

    let mut args = env::args().skip(1);

    #[allow(clippy::while_let_on_iterator)]
    while let Some(arg) = args.next() {
        let mut next = || args.next().ok_or(AppError::NotEnoughArgument);

        match &*arg {
            "-h" | "--help" => {
                print_usage();
                exit(0);
            },
            "-d" | "--duration" =>
                setting.duration = next()?.parse()?,
            "-s" | "--start" =>
                setting.start = Some(next()?.parse()?),
            "-e" | "--end" =>
                setting.end = Some(next()?.parse()?),
            "-r" | "--reverse" =>
                setting.reverse = true,
            "-o" | "--output" =>
                setting.output = Some(next()?),
            option if option.starts_with('-') =>
                return Err(AppError::UnknownOption(option.to_owned())),
            filepath =>
                setting.filepath = Some(filepath.to_owned()),
        }
    }

    Ok(setting)
}
