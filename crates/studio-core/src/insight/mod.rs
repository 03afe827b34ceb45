//! Structured results of the remote analysis services.

mod discovery;
mod lenient;
mod sentiment;

pub use discovery::{
    BehavioralSignal, DesiredOutcome, InsightReport, JobToBeDone, MentalModel, PainPoint,
    Workaround,
};
pub use sentiment::{SentimentInsight, SentimentRecord, parse_sentiment_items};
