//! Renders the battery icon into `assets/wprime-icon.png`
#![deny(warnings)]

use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};
use wprime_icon::{icon, render_icon, write_icon};

type Error = Box<dyn std::error::Error>;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    #[cfg(feature = "serde")]
    if tracing::enabled!(tracing::Level::TRACE) {
        tracing::trace!("[icon] {}", icon::build_icon().to_json()?);
    }

    let image = render_icon();
    write_icon(&image, icon::OUTPUT_PATH)?;
    println!("Icon created successfully at {}", icon::OUTPUT_PATH);

    Ok(())
}
