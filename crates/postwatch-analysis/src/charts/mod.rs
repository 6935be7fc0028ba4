//! Chart data for the labeled table and the renderers that consume it.

pub mod data;
pub mod render;

pub use data::{
    build_chart_data, ChartData, ClassificationCounts, DailyCount,
    SentimentCategory, SentimentCounts, SourceCount, TopSources, NO_LINKED_SOURCES,
};
pub use render::{ChartRenderer, JsonChartRenderer, TextChartRenderer};
