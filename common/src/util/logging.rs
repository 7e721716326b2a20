use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::{info, LevelFilter};
use std::future::Future;
use std::time::{Duration, SystemTime};

static mut MULTI: Option<MultiProgress> = None;


pub fn init(log_level: LevelFilter) {
    let logger = env_logger::builder()
        .filter_level(log_level)
        .parse_default_env() // Allow overriding log level through RUST_LOG env var
        .build();

    let multi = MultiProgress::new();

    let wrapper = LogWrapper::new(multi.clone(), logger);
    wrapper.try_init().unwrap();

    unsafe {
        MULTI = Some(multi);
    }
}


pub fn run_with_spinner<'a, F, Out>(
    target: &'a str, task_desc: &'a str, function: F,
) -> Out where
    F: FnOnce() -> Out,
{
    let (pb, start_time) = start_spinner(task_desc);

    let out = function();

    finish_spinner(pb, start_time, target, task_desc);
    out
}

pub async fn run_with_spinner_async<'a, F, Fut, Out>(
    target: &'a str, task_desc: &'a str, function: F,
) -> Out where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Out>,
{
    let (pb, start_time) = start_spinner(task_desc);

    let out = function().await;

    finish_spinner(pb, start_time, target, task_desc);
    out
}

fn start_spinner(task_desc: &str) -> (ProgressBar, SystemTime) {
    let start_time = SystemTime::now();

    let pb = ProgressBar::new_spinner()
        .with_message(format!("{}...", task_desc))
        .with_style(ProgressStyle::with_template("{spinner:.white} [{elapsed:.green}] {msg}").unwrap());
    pb.enable_steady_tick(Duration::from_millis(100));

    // Set up connection with log library so that progress bars don't jump around
    unsafe {
        MULTI.clone().unwrap().add(pb.clone());
    };

    (pb, start_time)
}

fn finish_spinner(pb: ProgressBar, start_time: SystemTime, target: &str, task_desc: &str) {
    pb.finish_and_clear();
    unsafe { MULTI.clone().unwrap().remove(&pb); }
    let elapsed = indicatif::HumanDuration(start_time.elapsed().unwrap());
    info!(target: target, "{} finished (took {})", task_desc, elapsed);
}
