//! Misinformation flagging: outlier verdicts combined with explicit rules.
//!
//! A post is flagged when any rule fires. Rules carry no priority.

pub mod flagger;
pub mod rules;

pub use flagger::{detector_matrix, flag_posts, flag_posts_with_rules, FlagOutcome};
pub use rules::{
    anomaly_rule, default_rules, keyword_rule, viral_negative_rule, BatchContext, MisinfoRule,
};
