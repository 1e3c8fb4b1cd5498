use ctor::ctor;
use tracing::Level;

// Pipeline stages report at DEBUG; KMTM_LOG=trace additionally shows
// per-pack decisions from greedy packing.
#[ctor]
fn init_tracing() {
    let level = match std::env::var("KMTM_LOG").ok().as_deref() {
        None | Some("") | Some("0") | Some("false") | Some("off") => return,
        Some("trace") => Level::TRACE,
        Some(_) => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}
