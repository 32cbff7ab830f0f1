// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use env_logger::Env;
use failure::{format_err, Error};
use itertools::Itertools;
use log::info;
use mandelbrot::params::MAX_WIDTH;
use mandelbrot::{ConsoleProgress, Params, Renderer};
use num::Complex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::str::FromStr;
use std::time::Instant;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    let (l, r) = s.split(separator).collect_tuple()?;
    match (T::from_str(l.trim()), T::from_str(r.trim())) {
        (Ok(l), Ok(r)) => Some((l, r)),
        _ => None,
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

fn validate_complex(s: &str, err: &str) -> Result<(), String> {
    match parse_complex(s) {
        Some(c) if c.re.is_finite() && c.im.is_finite() => Ok(()),
        _ => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const CENTER: &str = "center";
const SIZE: &str = "size";
const WIDTH: &str = "width";
const ITERATIONS: &str = "iterations";
const SAMPLES: &str = "samples";
const THREADS: &str = "threads";
const QUEUE_DEPTH: &str = "queue-depth";
const SEED: &str = "seed";

const MAX_THREADS: usize = 1024;

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .about("Supersampled Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("result.png")
                .help("Output file; the extension picks the format"),
        )
        .arg(
            Arg::with_name(CENTER)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.5557505995,-0.5555999995")
                .validator(|s| validate_complex(&s, "Could not parse center of the view"))
                .help("Center of the view on the complex plane, as RE,IM"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("0.000000001")
                .validator(|s| {
                    validate_range(
                        &s,
                        std::f64::MIN_POSITIVE,
                        std::f64::MAX,
                        "Could not parse plane size",
                        "Plane size must be a positive number",
                    )
                })
                .help("Width of the view on the complex plane"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("10240")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_WIDTH,
                        "Could not parse image width",
                        &format!("Image width must be between 1 and {}", MAX_WIDTH),
                    )
                })
                .help("Width and height of the output image, in pixels"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        usize::max_value(),
                        "Could not parse iteration count",
                        "Iteration count must be at least 1",
                    )
                })
                .help("Maximum number of iterations per sample"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .long(SAMPLES)
                .short("n")
                .takes_value(true)
                .default_value("50")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        usize::max_value(),
                        "Could not parse sample count",
                        "Sample count must be at least 1",
                    )
                })
                .help("Number of samples averaged into each pixel"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_THREADS,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", MAX_THREADS),
                    )
                })
                .help("Number of worker threads [default: one per CPU]"),
        )
        .arg(
            Arg::with_name(QUEUE_DEPTH)
                .long(QUEUE_DEPTH)
                .short("q")
                .takes_value(true)
                .default_value("0")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        MAX_WIDTH,
                        "Could not parse queue depth",
                        &format!("Queue depth must be between 0 and {}", MAX_WIDTH),
                    )
                })
                .help("Rows that may wait for a worker before dispatch blocks"),
        )
        .arg(
            Arg::with_name(SEED)
                .long(SEED)
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        u64::max_value(),
                        "Could not parse seed",
                        "Seed out of range",
                    )
                })
                .help("Seed the sample jitter, making the output reproducible"),
        )
        .get_matches()
}

fn parsed<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    let raw = matches
        .value_of(name)
        .ok_or_else(|| format_err!("Missing value for --{}", name))?;
    T::from_str(raw).map_err(|_| format_err!("Could not parse --{} from {:?}", name, raw))
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let output = matches.value_of(OUTPUT).unwrap_or("result.png");
    let center = matches
        .value_of(CENTER)
        .and_then(parse_complex)
        .ok_or_else(|| format_err!("Could not parse center of the view"))?;
    let params = Params::new(
        center,
        parsed(matches, SIZE)?,
        parsed(matches, WIDTH)?,
        parsed(matches, ITERATIONS)?,
        parsed(matches, SAMPLES)?,
    )?;

    let mut renderer = Renderer::new(params).with_queue_depth(parsed(matches, QUEUE_DEPTH)?);
    if matches.is_present(THREADS) {
        renderer = renderer.with_threads(parsed(matches, THREADS)?);
    }
    let seed = if matches.is_present(SEED) {
        Some(parsed::<u64>(matches, SEED)?)
    } else {
        None
    };

    info!(
        "Rendering {0}x{0} pixels around {1} ({2} wide), {3} samples of up to {4} iterations, on {5} threads",
        params.width(),
        params.center(),
        params.size(),
        params.samples(),
        params.max_iterations(),
        renderer.threads()
    );
    let start = Instant::now();
    let mut progress = ConsoleProgress::stdout();
    let image = match seed {
        Some(seed) => renderer.render(
            |y| StdRng::seed_from_u64(seed.wrapping_add(y as u64)),
            &mut progress,
        ),
        None => renderer.render(|_| rand::thread_rng(), &mut progress),
    };
    info!("Done rendering in {:?}", start.elapsed());

    info!("Encoding image to {}...", output);
    image.save(output)?;
    info!("Done!");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
