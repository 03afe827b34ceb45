//! Pure display mapping from results to cards, figures and text panels.
//!
//! Nothing here changes values; it only decides what is shown and in which
//! order. Terminal colouring lives in the CLI.

mod card;
mod figures;
mod insights;
mod json_view;
mod progress;

pub use card::{BulletList, Card, Section};
pub use figures::{EstimateFigures, Figure, PER_REQUEST_DECIMALS, PERIOD_DECIMALS};
pub use insights::{MISSING, insight_sections, preview_lines, sentiment_cards};
pub use json_view::{DEFAULT_DOWNLOAD_NAME, JsonView};
pub use progress::{DONE_CHIP, EMPTY_LOG_TEXT, log_text, step_chips};
