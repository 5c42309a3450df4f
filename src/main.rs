//! `sortscope` command line front end.
//!
//! Runs one instrumented sort and prints its trace, exports it as JSON/CSV,
//! or animates it in the terminal.

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sortscope::export;
use sortscope::visualization::{create_progress_bar, highlight, render_bars, render_summary};
use sortscope::{
    run_sort_with, Algorithm, ArrayConfig, BarState, MergeFinalization, PlaybackConfig,
    PlaybackController, PlaybackState, Replayer, Settings, SortRun, Step, StepClock,
    StepSequence, StepStats, StepStream, StreamConfig,
};

/// Longest pause between two redraws while animating
const VISUALIZATION_UPDATE_MS: u64 = 50;

#[derive(Parser)]
#[command(name = "sortscope", version)]
#[command(about = "Run instrumented sorting algorithms and inspect their step traces")]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Algorithm to run (bubble, selection, insertion, quick, merge, heap, shell)
    algorithm: Option<String>,

    /// Values to sort (random values are generated when omitted)
    #[arg(allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Sort N random values instead of the given ones
    #[arg(long, value_name = "N", conflicts_with = "values")]
    random: Option<usize>,

    /// Seed for random input
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Animate the trace in the terminal
    #[arg(long)]
    play: bool,

    /// Animation speed preset (slow, normal, fast)
    #[arg(long)]
    speed: Option<String>,

    /// JSON settings file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Consume steps from a producer thread while the sort runs
    #[arg(long)]
    stream: bool,

    /// Mark merge slots final in every merge, not only the outermost one
    #[arg(long)]
    legacy_merge_marks: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// List the available algorithms and their complexity
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Some(Command::List) => {
            print_algorithms();
            Ok(())
        }
        None => run(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "sortscope=info",
        1 => "sortscope=debug",
        _ => "sortscope=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_algorithms() {
    println!(
        "{:<10} {:<16} {:<11} {:<11} {:<11} {:<6}",
        "NAME", "ALGORITHM", "BEST", "AVERAGE", "WORST", "SPACE"
    );
    for algorithm in Algorithm::ALL {
        let cost = algorithm.complexity();
        println!(
            "{:<10} {:<16} {:<11} {:<11} {:<11} {:<6}",
            algorithm.as_str(),
            algorithm.display_name(),
            cost.best,
            cost.average,
            cost.worst,
            cost.space
        );
    }
}

fn run(args: Args) -> Result<()> {
    let Some(name) = args.algorithm.as_deref() else {
        bail!("missing algorithm name (see `sortscope list`)");
    };
    let algorithm: Algorithm = name.parse()?;

    let mut settings = match &args.config {
        Some(path) => Settings::from_json_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(speed) = &args.speed {
        let bar_height = settings.playback.bar_height;
        settings.playback = PlaybackConfig::preset(speed)?;
        settings.playback.bar_height = bar_height;
    }
    if args.legacy_merge_marks {
        settings.sort.merge_finalization = MergeFinalization::EveryMerge;
    }
    settings.validate()?;

    let values = input_values(&args, &settings.array)?;
    info!(algorithm = %algorithm, len = values.len(), "sorting");

    let run = if args.stream {
        stream_run(algorithm, values, &settings, args.play)?
    } else {
        let run = run_sort_with(algorithm, &values, &settings.sort)?;
        if args.play {
            play(&run, &settings.playback)?;
        }
        run
    };

    write_output(&run, args.format)
}

fn input_values(args: &Args, array: &ArrayConfig) -> Result<Vec<f64>> {
    if !args.values.is_empty() {
        return Ok(args.values.clone());
    }

    let config = ArrayConfig {
        size: args.random.unwrap_or(array.size),
        ..*array
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let values = config.generate(&mut rng)?;
    debug!(size = config.size, seed = ?args.seed, "generated input");
    Ok(values)
}

fn write_output(run: &SortRun, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", export::to_json(run)?),
        OutputFormat::Csv => export::write_csv(&run.steps, io::stdout().lock())?,
        OutputFormat::Text => {
            let stats = run.steps.stats();
            println!("{}", run.algorithm.display_name());
            println!("Input:  {}", format_values(&run.input));
            println!("Sorted: {}", format_values(&run.sorted));
            println!();
            for (index, step) in run.steps.iter().enumerate() {
                println!("{index:>6}  {step}");
            }
            println!();
            println!("{stats}");
        }
    }
    Ok(())
}

fn format_values(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{v}")).collect();
    format!("[{}]", items.join(", "))
}

/// Animate a recorded run with wall-clock pacing.
fn play(run: &SortRun, playback: &PlaybackConfig) -> Result<()> {
    let mut player = Replayer::from_run(run);
    let mut clock = StepClock::new(*playback);
    let height = playback.bar_height;

    print!("\x1B[?25l");
    draw_frame(
        player.values(),
        &player.bar_states(),
        height,
        &prefix_stats(player.steps(), 0),
        (0, player.steps().len()),
        false,
    )?;

    player.play()?;
    let mut last = Instant::now();
    while player.state() == PlaybackState::Playing {
        let wait = clock
            .time_until_next()
            .clamp(Duration::from_millis(1), Duration::from_millis(VISUALIZATION_UPDATE_MS));
        thread::sleep(wait);

        let now = Instant::now();
        if player.advance_by(&mut clock, now - last)? == 0 {
            last = now;
            continue;
        }
        last = now;

        draw_frame(
            player.values(),
            &player.bar_states(),
            height,
            &prefix_stats(player.steps(), player.position()),
            (player.position(), player.steps().len()),
            true,
        )?;
    }

    println!("\x1B[?25h");
    debug!(
        elapsed = clock.get_elapsed_time(),
        steps = clock.get_released(),
        "playback finished"
    );
    Ok(())
}

/// Consume a run from a producer thread, optionally animating each step.
fn stream_run(
    algorithm: Algorithm,
    values: Vec<f64>,
    settings: &Settings,
    animate: bool,
) -> Result<SortRun> {
    let stream = StepStream::spawn(
        algorithm,
        values.clone(),
        settings.sort,
        StreamConfig::low_latency(),
    )?;

    let mut shown = values.clone();
    let mut finals = vec![BarState::empty(); shown.len()];
    let mut stats = StepStats::default();
    let mut steps: Vec<Step> = Vec::new();
    let delay = settings.playback.step_delay();

    if animate {
        print!("\x1B[?25l");
        draw_frame(&shown, &finals, settings.playback.bar_height, &stats, (0, 0), false)?;
    }

    for step in stream.iter() {
        step.apply(&mut shown)?;
        stats.record(&step);
        steps.push(step);
        if let Step::MarkFinal(index) = step {
            finals[index] |= BarState::FINAL;
        }

        if animate {
            let mut states = finals.clone();
            highlight(&mut states, step);
            let position = steps.len();
            draw_frame(
                &shown,
                &states,
                settings.playback.bar_height,
                &stats,
                (position, position),
                true,
            )?;
            thread::sleep(delay);
        }
    }
    if animate {
        println!("\x1B[?25h");
    }

    let sorted = stream.join()?;
    Ok(SortRun {
        algorithm,
        input: values,
        sorted,
        steps: StepSequence::from(steps),
    })
}

fn prefix_stats(steps: &StepSequence, position: usize) -> StepStats {
    let mut stats = StepStats::default();
    for step in &steps.as_slice()[..position.min(steps.len())] {
        stats.record(step);
    }
    stats
}

fn draw_frame(
    values: &[f64],
    states: &[BarState],
    height: usize,
    stats: &StepStats,
    (position, total): (usize, usize),
    redraw: bool,
) -> Result<()> {
    let rows = render_bars(values, states, height);
    let mut out = io::stdout().lock();
    if redraw {
        // bars plus the status line
        write!(out, "\x1B[{}A", rows.len() + 1)?;
    }
    for row in rows {
        writeln!(out, "\x1B[2K\r{row}")?;
    }
    let progress = if total == 0 {
        1.0
    } else {
        position as f32 / total as f32
    };
    writeln!(
        out,
        "\x1B[2K\r{} {}",
        create_progress_bar(progress, 20),
        render_summary(position, total, stats)
    )?;
    out.flush()?;
    Ok(())
}
