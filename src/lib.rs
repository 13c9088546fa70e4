use tracing_subscriber::{
    EnvFilter,
    filter::{Builder, LevelFilter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub mod acl;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod enumerate;
pub mod error;
pub mod s3;
pub mod upload;

#[macro_use]
extern crate tracing;

///progress lines are `info!` events, so they show even without `RUST_LOG`
fn log_filter() -> Builder {
    EnvFilter::builder().with_default_directive(LevelFilter::INFO.into())
}

pub fn setup() {
    if cfg!(debug_assertions) {
        for (key, value) in &[
            ("RUST_SPANTRACE", "full"),
            ("RUST_LIB_BACKTRACE", "full"),
            ("RUST_BACKTRACE", "full"),
            ("RUST_LOG", "info"),
        ] {
            match std::env::var(key) {
                Err(_) => {
                    trace!(%key, %value, "Setting env var");
                    //safety: runs before the runtime or any other thread is started
                    unsafe { std::env::set_var(key, value) };
                }
                Ok(found) => {
                    trace!(%key, %found, "Found existing env var");
                }
            }
        }
    }

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Missing .env file: {e}");
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(log_filter().from_env_lossy())
        .init();

    color_eyre::install().expect("unable to install color-eyre");
}
